//! The catalogue browsing session: filters, debounced query, incremental
//! results and the scroll-driven header chrome, wired together.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::console;

use crate::api;
use crate::components::{FilterBar, GameGrid, Header};
use crate::debounce::{use_debounced, SEARCH_DEBOUNCE_MS};
use crate::filters::{read_filters, write_filters, BrowserUrl, FilterSet};
use crate::loader::{FetchTicket, ResultsLoader};
use crate::scroll::{use_header_scroll, ScrollThresholds};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

const VIEW_MODE_KEY: &str = "gameshelf.view_mode";

impl ViewMode {
    fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_view_mode() -> ViewMode {
    match local_storage().and_then(|s| s.get_item(VIEW_MODE_KEY).ok().flatten()) {
        Some(v) if v == "list" => ViewMode::List,
        _ => ViewMode::Grid,
    }
}

fn store_view_mode(mode: ViewMode) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(VIEW_MODE_KEY, mode.as_str());
    }
}

/// Issue the fetch for one ticket. The mounted guard makes a completion
/// after teardown a no-op; the fence inside `complete` handles completions
/// superseded by a newer filter snapshot.
fn issue_fetch(
    loader: RwSignal<ResultsLoader>,
    mounted: ReadSignal<bool>,
    snapshot: FilterSet,
    ticket: FetchTicket,
) {
    spawn_local(async move {
        let result = api::fetch_games(&snapshot, ticket.page).await;
        if !mounted.try_get_untracked().unwrap_or(false) {
            return;
        }
        if let Err(e) = &result {
            console::error_1(&format!("page {} fetch failed: {}", ticket.page, e).into());
        }
        loader.update(|l| {
            l.complete(ticket, result);
        });
    });
}

#[component]
pub fn App() -> impl IntoView {
    // Filters seeded from the shareable URL; every edit is re-serialized
    // back with history-replace so the URL always mirrors the session
    let (filters, set_filters) = signal(read_filters(&BrowserUrl));
    Effect::new(move || {
        filters.with(|f| write_filters(&BrowserUrl, f));
    });

    let (view_mode, set_view_mode) = signal(load_view_mode());
    Effect::new(move || store_view_mode(view_mode.get()));

    // Only the debounced copy of the search text reaches the API
    let live_query = Signal::derive(move || filters.with(|f| f.query.clone()));
    let query_debounced = use_debounced(live_query, SEARCH_DEBOUNCE_MS);

    // The finalized snapshot: current filters with the debounced query
    // substituted in. Any change here invalidates accumulated results.
    let snapshot = Memo::new(move |_| {
        let mut f = filters.get();
        f.query = query_debounced.get();
        f
    });

    let loader = RwSignal::new(ResultsLoader::new());
    let (mounted, set_mounted) = signal(true);
    on_cleanup(move || set_mounted.set(false));

    Effect::new(move || {
        let snap = snapshot.get();
        if let Some(ticket) = loader.try_update(|l| l.reset()) {
            issue_fetch(loader, mounted, snap, ticket);
        }
    });

    let on_load_more = Callback::new(move |()| {
        if let Some(Some(ticket)) = loader.try_update(|l| l.load_more()) {
            issue_fetch(loader, mounted, snapshot.get_untracked(), ticket);
        }
    });

    let on_retry = Callback::new(move |()| {
        if let Some(Some(ticket)) = loader.try_update(|l| l.retry()) {
            issue_fetch(loader, mounted, snapshot.get_untracked(), ticket);
        }
    });

    // The only data crossing into the scroll controller
    let is_loading = Signal::derive(move || loader.with(|l| l.is_loading()));
    let scroll = use_header_scroll(is_loading, ScrollThresholds::default());
    let show_scroll_top = Signal::derive(move || scroll.with(|s| s.show_scroll_top));

    view! {
        <div class="app-container">
            <Header
                scroll=scroll
                filters=filters
                set_filters=set_filters
                view_mode=view_mode
                set_view_mode=set_view_mode
            />
            <FilterBar filters=filters set_filters=set_filters />
            <GameGrid
                loader=loader
                view_mode=view_mode
                on_load_more=on_load_more
                on_retry=on_retry
                show_scroll_top=show_scroll_top
            />
            <footer class="build-info">
                {format!("build {} · {}", env!("BUILD_HASH"), env!("BUILD_TIMESTAMP"))}
            </footer>
        </div>
    }
}
