//! HTTP client for the catalogue listing API
//!
//! The server paginates; the client sends the filter projection plus
//! `page`/`page_size` and gets back one window of results. Transport and
//! retry policy live server-side; a failed or malformed response surfaces
//! here as a plain error string for the page to display.

use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::filters::FilterSet;

/// Base path of the catalogue API (same-origin).
pub const API_BASE: &str = "/api";

/// Items requested per page.
pub const PAGE_SIZE: u32 = 24;

/// One board game as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub designer: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default)]
    pub min_players: Option<u32>,
    #[serde(default)]
    pub max_players: Option<u32>,
    #[serde(default)]
    pub complexity: Option<f32>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub nz_designer: bool,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub added_at: Option<NaiveDate>,
}

impl Game {
    /// Player count as displayed on cards, e.g. "2-4" or "3".
    pub fn players_label(&self) -> Option<String> {
        match (self.min_players, self.max_players) {
            (Some(min), Some(max)) if min != max => Some(format!("{}-{}", min, max)),
            (Some(n), _) | (None, Some(n)) => Some(n.to_string()),
            (None, None) => None,
        }
    }
}

/// One fetched page of the server-paginated listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageWindow {
    pub items: Vec<Game>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

/// Fetch one page of games for the given filter snapshot.
pub async fn fetch_games(filters: &FilterSet, page: u32) -> Result<PageWindow, String> {
    let params = filters.to_request_params(&[
        ("page", page.to_string()),
        ("page_size", PAGE_SIZE.to_string()),
    ]);
    let query: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let response = Request::get(&format!("{}/games", API_BASE))
        .query(query)
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    // A body missing expected fields counts as a fetch failure
    response
        .json::<PageWindow>()
        .await
        .map_err(|e| format!("malformed response: {}", e))
}
