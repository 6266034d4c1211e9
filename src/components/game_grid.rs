//! Game grid and list views over the accumulated results

use leptos::html;
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::api::Game;
use crate::app::ViewMode;
use crate::loader::ResultsLoader;
use crate::scroll::scroll_to_top;

/// How far below the viewport the sentinel may be before the next page is
/// requested.
const SENTINEL_ROOT_MARGIN: &str = "200px";

#[component]
pub fn GameGrid(
    loader: RwSignal<ResultsLoader>,
    view_mode: ReadSignal<ViewMode>,
    on_load_more: Callback<()>,
    on_retry: Callback<()>,
    show_scroll_top: Signal<bool>,
) -> impl IntoView {
    // Sentinel near the end of the rendered list; intersection with the
    // viewport is the "load more" trigger. The loader itself ignores
    // triggers that arrive while a fetch is outstanding or when everything
    // is already loaded.
    let sentinel = NodeRef::<html::Div>::new();
    let sentinel_visible = RwSignal::new(false);
    Effect::new(move || {
        let Some(node) = sentinel.get() else {
            return;
        };
        let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    sentinel_visible.set(entry.is_intersecting());
                    if entry.is_intersecting() {
                        on_load_more.run(());
                    }
                }
            },
        );
        let options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin(SENTINEL_ROOT_MARGIN);
        let observer = match web_sys::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer,
            Err(_) => return,
        };
        observer.observe(&node);
        // The JS handles are !Send; on_cleanup requires Send + Sync
        let cleanup = SendWrapper::new((observer, callback));
        on_cleanup(move || {
            let (observer, callback) = cleanup.take();
            observer.disconnect();
            drop(callback);
        });
    });

    // The observer only reports transitions. A short or empty appended page
    // can leave the sentinel inside the root margin with no new callback
    // coming, so re-check at append time while the sentinel is still in view.
    Effect::new(move || {
        let wants_more = loader.with(|l| l.wants_more());
        if wants_more && sentinel_visible.get_untracked() {
            on_load_more.run(());
        }
    });

    view! {
        <main class="game-content">
            {move || {
                let is_initial = loader.with(|l| l.is_initial_loading());
                let is_empty = loader.with(|l| l.is_empty_result());

                if is_initial {
                    view! { <div class="loading">"Loading games..."</div> }.into_any()
                } else if is_empty {
                    view! {
                        <div class="empty-state">
                            <p>"No games match these filters."</p>
                        </div>
                    }.into_any()
                } else {
                    let games = loader.with(|l| l.items().to_vec());
                    match view_mode.get() {
                        ViewMode::Grid => view! {
                            <div class="game-grid">
                                {games.into_iter().map(|game| {
                                    view! { <GameCard game=game /> }
                                }).collect::<Vec<_>>()}
                            </div>
                        }.into_any(),
                        ViewMode::List => view! {
                            <div class="game-list">
                                <div class="game-list-header">
                                    <span>"Title"</span>
                                    <span>"Designer"</span>
                                    <span>"Players"</span>
                                    <span>"Year"</span>
                                </div>
                                {games.into_iter().map(|game| {
                                    view! { <GameListRow game=game /> }
                                }).collect::<Vec<_>>()}
                            </div>
                        }.into_any(),
                    }
                }
            }}

            // Inline error with a retry scoped to the failed page; items
            // loaded before the failure stay on screen above this
            {move || loader.with(|l| l.error().map(String::from)).map(|message| view! {
                <div class="load-error">
                    <span class="load-error-message">{message}</span>
                    <button class="retry-btn" on:click=move |_| on_retry.run(())>
                        "Retry"
                    </button>
                </div>
            })}

            {move || (loader.with(|l| l.is_loading() && !l.is_initial_loading())).then(|| view! {
                <div class="loading-more">"Loading more..."</div>
            })}

            <div class="load-more-sentinel" node_ref=sentinel></div>

            <div class="game-count" aria-live="polite">
                {move || loader.with(|l| format!("{} of {} games", l.items().len(), l.total()))}
            </div>

            <Show when=move || show_scroll_top.get()>
                <button
                    class="scroll-top-btn"
                    title="Back to top"
                    on:click=move |_| scroll_to_top()
                >
                    "Top"
                </button>
            </Show>
        </main>
    }
}

#[component]
fn GameCard(game: Game) -> impl IntoView {
    let first_char = game.title.chars().next().unwrap_or('?').to_string();
    let players = game.players_label();
    let year = game.year_published;
    let complexity = game.complexity;
    let added = game.added_at.map(|d| d.format("Added %-d %b %Y").to_string());

    view! {
        <div class="game-card">
            <div class="game-cover">
                {match game.thumbnail_url {
                    Some(url) => view! {
                        <img
                            src=url
                            alt=game.title.clone()
                            class="cover-image"
                            loading="lazy"
                        />
                    }.into_any(),
                    None => view! {
                        <div class="cover-placeholder">{first_char}</div>
                    }.into_any(),
                }}
                {game.nz_designer.then(|| view! {
                    <span class="nz-badge" title="New Zealand designer">"NZ"</span>
                })}
            </div>
            <div class="game-info">
                <h3 class="game-title">{game.title}</h3>
                {(!game.designer.is_empty()).then(|| view! {
                    <p class="game-designer">{game.designer}</p>
                })}
                <div class="game-meta">
                    {year.map(|y| view! { <span class="game-year">{y}</span> })}
                    {players.map(|p| view! { <span class="game-players">{p}</span> })}
                    {complexity.map(|c| view! {
                        <span class="game-complexity">{format!("{:.1}", c)}</span>
                    })}
                </div>
                {added.map(|label| view! { <p class="game-added">{label}</p> })}
            </div>
        </div>
    }
}

#[component]
fn GameListRow(game: Game) -> impl IntoView {
    let designer = if game.designer.is_empty() {
        "-".to_string()
    } else {
        game.designer.clone()
    };
    let players = game.players_label().unwrap_or_else(|| "-".to_string());
    let year = game
        .year_published
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string());

    view! {
        <div class="game-list-item">
            <span class="game-title">
                {game.title}
                {game.nz_designer.then(|| view! {
                    <span class="nz-badge">" NZ"</span>
                })}
            </span>
            <span class="game-designer">{designer}</span>
            <span class="game-players">{players}</span>
            <span class="game-year">{year}</span>
        </div>
    }
}
