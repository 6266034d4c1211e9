//! Scroll-driven header visibility
//!
//! Three flags (header visible, sticky mode, back-to-top affordance) driven
//! by one scroll-position sampler. Two layers of hysteresis keep the header
//! from flickering: a per-sample minimum delta, and a buffer distance from
//! the last toggle point. The back-to-top flag uses its own show/hide band.
//! While results are loading the sampler is a complete no-op so the chrome
//! does not jump around under content replacement.

use std::cell::Cell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Tuned on the original client; kept as configuration defaults rather than
/// re-derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThresholds {
    /// Below this the header is always visible and never sticky.
    pub top_zone: f64,
    /// Minimum per-sample delta counted as intentional movement.
    pub min_delta: f64,
    /// Minimum distance from the last toggle point before toggling again.
    pub toggle_buffer: f64,
    /// Back-to-top appears above this position...
    pub scroll_top_show: f64,
    /// ...and disappears below this one.
    pub scroll_top_hide: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        ScrollThresholds {
            top_zone: 50.0,
            min_delta: 15.0,
            toggle_buffer: 50.0,
            scroll_top_show: 450.0,
            scroll_top_hide: 350.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderScrollState {
    pub header_visible: bool,
    pub sticky: bool,
    pub show_scroll_top: bool,
    thresholds: ScrollThresholds,
    last_y: f64,
    last_toggle_y: f64,
}

impl Default for HeaderScrollState {
    fn default() -> Self {
        Self::new(ScrollThresholds::default())
    }
}

impl HeaderScrollState {
    pub fn new(thresholds: ScrollThresholds) -> Self {
        HeaderScrollState {
            header_visible: true,
            sticky: false,
            show_scroll_top: false,
            thresholds,
            last_y: 0.0,
            last_toggle_y: 0.0,
        }
    }

    /// Process one sampled scroll position. Called at most once per animation
    /// frame with the latest position.
    pub fn sample(&mut self, y: f64, is_loading: bool) {
        if is_loading {
            return;
        }
        let t = self.thresholds;

        if y > t.scroll_top_show {
            self.show_scroll_top = true;
        } else if y < t.scroll_top_hide {
            self.show_scroll_top = false;
        }
        // Inside the band the prior value is retained

        let delta = y - self.last_y;
        self.last_y = y;

        // Near the top the header is unconditionally visible and unstuck
        if y < t.top_zone {
            self.header_visible = true;
            self.sticky = false;
            self.last_toggle_y = y;
            return;
        }

        if delta.abs() > t.min_delta && (y - self.last_toggle_y).abs() > t.toggle_buffer {
            if delta > 0.0 && self.header_visible {
                self.header_visible = false;
                self.sticky = true;
                self.last_toggle_y = y;
            } else if delta < 0.0 && !self.header_visible {
                self.header_visible = true;
                self.last_toggle_y = y;
            }
        }
    }
}

/// Wire the state machine to the window: scroll position forced to the top on
/// mount (overriding browser scroll restoration), scroll events coalesced to
/// one sample per animation frame, listener removed on cleanup.
pub fn use_header_scroll(
    is_loading: Signal<bool>,
    thresholds: ScrollThresholds,
) -> RwSignal<HeaderScrollState> {
    let state = RwSignal::new(HeaderScrollState::new(thresholds));

    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }

    let ticking = Rc::new(Cell::new(false));
    let handle = window_event_listener(ev::scroll, move |_| {
        if ticking.get() {
            return;
        }
        ticking.set(true);
        let ticking = ticking.clone();
        // The position is read inside the frame callback so multiple scroll
        // events within one frame collapse into a single sample of the
        // latest position.
        let frame = Closure::once_into_js(move || {
            ticking.set(false);
            let y = web_sys::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or(0.0);
            let loading = is_loading.get_untracked();
            state.update(|s| s.sample(y, loading));
        });
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(frame.unchecked_ref());
        }
    });
    on_cleanup(move || handle.remove());

    state
}

/// Smooth-scroll the window back to the top.
pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
