//! Catalogue filters and their URL query-string codec
//!
//! The filter set is kept bijectively mapped to the shareable URL: any field
//! at its default is absent from the query string, and an absent key parses
//! back to the default. Reloading a filtered URL must reproduce the exact
//! same filter state.

use urlencoding::{decode, encode};
use web_sys::console;

/// Sentinel meaning "no category filter".
pub const DEFAULT_CATEGORY: &str = "all";

/// Days covered by the "new arrivals" checkbox.
pub const RECENTLY_ADDED_DAYS: u32 = 30;

/// Bounds of the complexity (weight) scale.
pub const COMPLEXITY_MIN: f32 = 1.0;
pub const COMPLEXITY_MAX: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexityRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    YearDesc,
    YearAsc,
    TitleAsc,
    TitleDesc,
    RatingDesc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::YearDesc => "year_desc",
            SortOrder::YearAsc => "year_asc",
            SortOrder::TitleAsc => "title_asc",
            SortOrder::TitleDesc => "title_desc",
            SortOrder::RatingDesc => "rating_desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "year_desc" => Some(SortOrder::YearDesc),
            "year_asc" => Some(SortOrder::YearAsc),
            "title_asc" => Some(SortOrder::TitleAsc),
            "title_desc" => Some(SortOrder::TitleDesc),
            "rating_desc" => Some(SortOrder::RatingDesc),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::YearDesc => "Newest first",
            SortOrder::YearAsc => "Oldest first",
            SortOrder::TitleAsc => "Title A-Z",
            SortOrder::TitleDesc => "Title Z-A",
            SortOrder::RatingDesc => "Highest rated",
        }
    }

    /// All variants in display order.
    pub fn all() -> &'static [SortOrder] {
        &[
            SortOrder::YearDesc,
            SortOrder::YearAsc,
            SortOrder::TitleAsc,
            SortOrder::TitleDesc,
            SortOrder::RatingDesc,
        ]
    }
}

/// The canonical set of browsing filters for one catalogue session.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub query: String,
    pub category: String,
    pub designer: String,
    pub nz_designer_only: bool,
    pub player_count: Option<u32>,
    pub complexity: Option<ComplexityRange>,
    pub recently_added_days: Option<u32>,
    pub sort: SortOrder,
}

impl Default for FilterSet {
    fn default() -> Self {
        FilterSet {
            query: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            designer: String::new(),
            nz_designer_only: false,
            player_count: None,
            complexity: None,
            recently_added_days: None,
            sort: SortOrder::default(),
        }
    }
}

impl FilterSet {
    /// Parse filters from a URL query string (with or without leading `?`).
    /// Absent or unparsable keys fall back to the default; unknown keys are
    /// ignored.
    pub fn from_query_string(query_string: &str) -> Self {
        let mut filters = FilterSet::default();
        let qs = query_string.strip_prefix('?').unwrap_or(query_string);

        let mut complexity_min: Option<f32> = None;
        let mut complexity_max: Option<f32> = None;

        for pair in qs.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = match decode(raw) {
                Ok(v) => v.into_owned(),
                Err(_) => continue,
            };
            match key {
                "q" => filters.query = value,
                "category" => filters.category = value,
                "designer" => filters.designer = value,
                "nz_designer" => filters.nz_designer_only = value == "true",
                "players" => filters.player_count = value.parse().ok(),
                "complexity_min" => complexity_min = value.parse().ok(),
                "complexity_max" => complexity_max = value.parse().ok(),
                "recently_added" => filters.recently_added_days = value.parse().ok(),
                "sort" => {
                    if let Some(sort) = SortOrder::parse(&value) {
                        filters.sort = sort;
                    }
                }
                _ => {}
            }
        }

        // A lone bound keeps the other end of the scale
        if complexity_min.is_some() || complexity_max.is_some() {
            filters.complexity = Some(ComplexityRange {
                min: complexity_min.unwrap_or(COMPLEXITY_MIN),
                max: complexity_max.unwrap_or(COMPLEXITY_MAX),
            });
        }

        filters
    }

    /// Serialize the non-default subset into a query string (no leading `?`).
    /// All fields at their defaults produce the empty string.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if !self.query.is_empty() {
            pairs.push(("q", self.query.clone()));
        }
        if self.category != DEFAULT_CATEGORY {
            pairs.push(("category", self.category.clone()));
        }
        if !self.designer.is_empty() {
            pairs.push(("designer", self.designer.clone()));
        }
        if self.nz_designer_only {
            pairs.push(("nz_designer", "true".to_string()));
        }
        if let Some(players) = self.player_count {
            pairs.push(("players", players.to_string()));
        }
        if let Some(range) = self.complexity {
            pairs.push(("complexity_min", range.min.to_string()));
            pairs.push(("complexity_max", range.max.to_string()));
        }
        if let Some(days) = self.recently_added_days {
            pairs.push(("recently_added", days.to_string()));
        }
        if self.sort != SortOrder::default() {
            pairs.push(("sort", self.sort.as_str().to_string()));
        }
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Project the filters into listing-endpoint parameters. Defaults are
    /// elided with two exceptions the server has always been sent: `q`
    /// (possibly empty) and `sort` (possibly the default). Extras such as
    /// `page` are appended as-is.
    pub fn to_request_params(&self, extra: &[(&str, String)]) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();
        params.push(("q".to_string(), self.query.clone()));
        if self.category != DEFAULT_CATEGORY {
            params.push(("category".to_string(), self.category.clone()));
        }
        if !self.designer.is_empty() {
            params.push(("designer".to_string(), self.designer.clone()));
        }
        if self.nz_designer_only {
            params.push(("nz_designer".to_string(), "true".to_string()));
        }
        if let Some(players) = self.player_count {
            params.push(("players".to_string(), players.to_string()));
        }
        if let Some(range) = self.complexity {
            params.push(("complexity_min".to_string(), range.min.to_string()));
            params.push(("complexity_max".to_string(), range.max.to_string()));
        }
        if let Some(days) = self.recently_added_days {
            params.push(("recently_added".to_string(), days.to_string()));
        }
        params.push(("sort".to_string(), self.sort.as_str().to_string()));
        for (key, value) in extra {
            params.push((key.to_string(), value.clone()));
        }
        params
    }

    pub fn has_active_filters(&self) -> bool {
        *self != FilterSet::default()
    }
}

/// Read/write access to the browser URL's query string. Abstracted so the
/// codec can be exercised against an in-memory fake in tests.
pub trait UrlPort {
    fn read_query(&self) -> String;
    fn replace_query(&self, query: &str);
}

/// The real browser URL, written with `history.replaceState` so filter
/// edits never pollute back-button history.
#[derive(Clone, Copy)]
pub struct BrowserUrl;

impl UrlPort for BrowserUrl {
    fn read_query(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn replace_query(&self, query: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
        let url = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };
        let replaced = window
            .history()
            .and_then(|h| h.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url)));
        if let Err(e) = replaced {
            console::warn_1(&format!("failed to update URL: {:?}", e).into());
        }
    }
}

/// Parse the session's starting filters from the URL.
pub fn read_filters(url: &dyn UrlPort) -> FilterSet {
    FilterSet::from_query_string(&url.read_query())
}

/// Re-serialize the full non-default subset back into the URL.
pub fn write_filters(url: &dyn UrlPort, filters: &FilterSet) {
    url.replace_query(&filters.to_query_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct InMemoryUrl(RefCell<String>);

    impl InMemoryUrl {
        fn new(query: &str) -> Self {
            InMemoryUrl(RefCell::new(query.to_string()))
        }
    }

    impl UrlPort for InMemoryUrl {
        fn read_query(&self) -> String {
            self.0.borrow().clone()
        }

        fn replace_query(&self, query: &str) {
            *self.0.borrow_mut() = query.to_string();
        }
    }

    #[test]
    fn test_defaults_serialize_to_empty_string() {
        assert_eq!(FilterSet::default().to_query_string(), "");
        assert!(!FilterSet::default().has_active_filters());
    }

    #[test]
    fn test_query_string_round_trip() {
        let filters = FilterSet {
            query: "Ticket to Ride".to_string(),
            category: "GATEWAY_STRATEGY".to_string(),
            designer: "Alan R. Moon".to_string(),
            nz_designer_only: true,
            player_count: Some(4),
            complexity: Some(ComplexityRange { min: 2.0, max: 3.5 }),
            recently_added_days: Some(30),
            sort: SortOrder::RatingDesc,
        };
        let qs = filters.to_query_string();
        assert_eq!(FilterSet::from_query_string(&qs), filters);
    }

    #[test]
    fn test_round_trip_with_defaults_mixed_in() {
        let filters = FilterSet {
            category: "PARTY".to_string(),
            ..FilterSet::default()
        };
        let qs = filters.to_query_string();
        assert_eq!(qs, "category=PARTY");
        assert_eq!(FilterSet::from_query_string(&qs), filters);
    }

    #[test]
    fn test_parse_ignores_unknown_and_malformed_keys() {
        let filters = FilterSet::from_query_string("?utm_source=abc&players=lots&category=COOP");
        assert_eq!(filters.category, "COOP");
        assert_eq!(filters.player_count, None);
        assert_eq!(filters.query, "");
    }

    #[test]
    fn test_parse_lone_complexity_bound() {
        let filters = FilterSet::from_query_string("complexity_min=3.5");
        assert_eq!(
            filters.complexity,
            Some(ComplexityRange { min: 3.5, max: COMPLEXITY_MAX })
        );
    }

    #[test]
    fn test_percent_encoding_round_trip() {
        let filters = FilterSet {
            query: "7 Wonders & friends".to_string(),
            ..FilterSet::default()
        };
        let qs = filters.to_query_string();
        assert_eq!(qs, "q=7%20Wonders%20%26%20friends");
        assert_eq!(FilterSet::from_query_string(&qs), filters);
    }

    #[test]
    fn test_category_update_scenario() {
        // updateCategory("GATEWAY_STRATEGY") from the all-defaults state
        let mut filters = FilterSet::default();
        filters.category = "GATEWAY_STRATEGY".to_string();

        assert_eq!(filters.to_query_string(), "category=GATEWAY_STRATEGY");

        let params = filters.to_request_params(&[("page", "1".to_string())]);
        assert_eq!(
            params,
            vec![
                ("q".to_string(), "".to_string()),
                ("category".to_string(), "GATEWAY_STRATEGY".to_string()),
                ("sort".to_string(), "year_desc".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_params_elide_defaults_except_q_and_sort() {
        let params = FilterSet::default().to_request_params(&[]);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["q", "sort"]);
    }

    #[test]
    fn test_clear_filters_scenario() {
        let url = InMemoryUrl::new("?category=CORE_STRATEGY&q=Pandemic&nz_designer=true");
        let filters = read_filters(&url);
        assert!(filters.has_active_filters());
        assert_eq!(filters.category, "CORE_STRATEGY");
        assert_eq!(filters.query, "Pandemic");
        assert!(filters.nz_designer_only);

        // clear() resets every field and rewrites the URL in one operation
        let cleared = FilterSet::default();
        write_filters(&url, &cleared);
        assert_eq!(url.read_query(), "");
        assert!(!cleared.has_active_filters());
    }

    #[test]
    fn test_url_restoration_reproduces_defaults_for_absent_keys() {
        let filters = FilterSet::from_query_string("category=FAMILY");
        assert_eq!(filters.sort, SortOrder::YearDesc);
        assert_eq!(filters.player_count, None);
        assert_eq!(filters.category, "FAMILY");
    }

    #[test]
    fn test_sort_order_round_trip() {
        for sort in SortOrder::all() {
            assert_eq!(SortOrder::parse(sort.as_str()), Some(*sort));
        }
        assert_eq!(SortOrder::parse("bogus"), None);
    }
}
