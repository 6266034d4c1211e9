use leptos::prelude::*;

use crate::app::ViewMode;
use crate::filters::FilterSet;
use crate::scroll::HeaderScrollState;

#[component]
pub fn Header(
    scroll: RwSignal<HeaderScrollState>,
    filters: ReadSignal<FilterSet>,
    set_filters: WriteSignal<FilterSet>,
    view_mode: ReadSignal<ViewMode>,
    set_view_mode: WriteSignal<ViewMode>,
) -> impl IntoView {
    view! {
        <header
            class="toolbar"
            class:toolbar-hidden=move || scroll.with(|s| !s.header_visible)
            class:toolbar-sticky=move || scroll.with(|s| s.sticky)
        >
            <div class="toolbar-left">
                <img src="/assets/logo.svg" alt="Gameshelf" class="app-logo" />
                <h1 class="app-title">"Gameshelf"</h1>
            </div>
            <div class="toolbar-center">
                <div class="search-box">
                    <input
                        type="text"
                        placeholder="Search games..."
                        prop:value=move || filters.with(|f| f.query.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            set_filters.update(|f| f.query = text);
                        }
                    />
                    <Show when=move || filters.with(|f| !f.query.is_empty())>
                        <button
                            class="search-clear"
                            on:click=move |_| set_filters.update(|f| f.query.clear())
                            title="Clear search"
                        >
                            "×"
                        </button>
                    </Show>
                </div>
            </div>
            <div class="toolbar-right">
                <div class="view-toggle">
                    <button
                        class="view-btn"
                        class:active=move || view_mode.get() == ViewMode::Grid
                        on:click=move |_| set_view_mode.set(ViewMode::Grid)
                        title="Grid View"
                    >
                        "Grid"
                    </button>
                    <button
                        class="view-btn"
                        class:active=move || view_mode.get() == ViewMode::List
                        on:click=move |_| set_view_mode.set(ViewMode::List)
                        title="List View"
                    >
                        "List"
                    </button>
                </div>
            </div>
        </header>
    }
}
