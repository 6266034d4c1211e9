//! Filter controls below the header

use leptos::prelude::*;

use crate::filters::{
    ComplexityRange, FilterSet, SortOrder, COMPLEXITY_MAX, COMPLEXITY_MIN, RECENTLY_ADDED_DAYS,
};

/// Fixed category list; the server ignores categories it does not know.
const CATEGORIES: &[(&str, &str)] = &[
    ("all", "All categories"),
    ("GATEWAY_STRATEGY", "Gateway strategy"),
    ("CORE_STRATEGY", "Core strategy"),
    ("FAMILY", "Family"),
    ("PARTY", "Party"),
    ("COOP", "Co-operative"),
    ("ABSTRACT", "Abstract"),
    ("DEXTERITY", "Dexterity"),
];

/// Complexity bands offered in the dropdown, mapped onto the weight scale.
const COMPLEXITY_BANDS: &[(&str, &str, f32, f32)] = &[
    ("light", "Light (1.0-2.0)", COMPLEXITY_MIN, 2.0),
    ("medium", "Medium (2.0-3.5)", 2.0, 3.5),
    ("heavy", "Heavy (3.5-5.0)", 3.5, COMPLEXITY_MAX),
];

fn band_id(complexity: Option<ComplexityRange>) -> &'static str {
    let Some(range) = complexity else { return "" };
    COMPLEXITY_BANDS
        .iter()
        .find(|(_, _, min, max)| *min == range.min && *max == range.max)
        .map(|(id, _, _, _)| *id)
        .unwrap_or("")
}

#[component]
pub fn FilterBar(
    filters: ReadSignal<FilterSet>,
    set_filters: WriteSignal<FilterSet>,
) -> impl IntoView {
    view! {
        <div class="filter-bar">
            <select
                class="filter-select"
                prop:value=move || filters.with(|f| f.category.clone())
                on:change=move |ev| {
                    let category = event_target_value(&ev);
                    set_filters.update(|f| f.category = category);
                }
            >
                <For
                    each=move || CATEGORIES.iter().copied()
                    key=|(id, _)| *id
                    children=move |(id, label)| {
                        view! { <option value=id>{label}</option> }
                    }
                />
            </select>

            <input
                type="text"
                class="filter-designer"
                placeholder="Designer"
                prop:value=move || filters.with(|f| f.designer.clone())
                on:change=move |ev| {
                    let designer = event_target_value(&ev);
                    set_filters.update(|f| f.designer = designer.trim().to_string());
                }
            />

            <select
                class="filter-select"
                prop:value=move || {
                    filters.with(|f| f.player_count.map(|n| n.to_string()).unwrap_or_default())
                }
                on:change=move |ev| {
                    let players = event_target_value(&ev).parse().ok();
                    set_filters.update(|f| f.player_count = players);
                }
            >
                <option value="">"Any player count"</option>
                <For
                    each=move || 1u32..=8
                    key=|n| *n
                    children=move |n| {
                        let label = if n == 8 {
                            "8+ players".to_string()
                        } else {
                            format!("{} players", n)
                        };
                        view! { <option value=n.to_string()>{label}</option> }
                    }
                />
            </select>

            <select
                class="filter-select"
                prop:value=move || filters.with(|f| band_id(f.complexity))
                on:change=move |ev| {
                    let id = event_target_value(&ev);
                    let range = COMPLEXITY_BANDS
                        .iter()
                        .find(|(band, _, _, _)| *band == id)
                        .map(|(_, _, min, max)| ComplexityRange { min: *min, max: *max });
                    set_filters.update(|f| f.complexity = range);
                }
            >
                <option value="">"Any complexity"</option>
                <For
                    each=move || COMPLEXITY_BANDS.iter().copied()
                    key=|(id, _, _, _)| *id
                    children=move |(id, label, _, _)| {
                        view! { <option value=id>{label}</option> }
                    }
                />
            </select>

            <label class="filter-check">
                <input
                    type="checkbox"
                    prop:checked=move || filters.with(|f| f.nz_designer_only)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        set_filters.update(|f| f.nz_designer_only = checked);
                    }
                />
                "NZ designers"
            </label>

            <label class="filter-check">
                <input
                    type="checkbox"
                    prop:checked=move || filters.with(|f| f.recently_added_days.is_some())
                    on:change=move |ev| {
                        let days = event_target_checked(&ev).then_some(RECENTLY_ADDED_DAYS);
                        set_filters.update(|f| f.recently_added_days = days);
                    }
                />
                "New arrivals"
            </label>

            <select
                class="filter-select"
                prop:value=move || filters.with(|f| f.sort.as_str())
                on:change=move |ev| {
                    if let Some(sort) = SortOrder::parse(&event_target_value(&ev)) {
                        set_filters.update(|f| f.sort = sort);
                    }
                }
            >
                <For
                    each=move || SortOrder::all().iter().copied()
                    key=|sort| sort.as_str()
                    children=move |sort| {
                        view! { <option value=sort.as_str()>{sort.label()}</option> }
                    }
                />
            </select>

            <Show when=move || filters.with(|f| f.has_active_filters())>
                <button
                    class="filter-clear"
                    on:click=move |_| set_filters.set(FilterSet::default())
                >
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}
