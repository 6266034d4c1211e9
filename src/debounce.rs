//! Debounced copy of the free-text search input
//!
//! The input field stays fully responsive; only the delayed value feeds the
//! request projection, so typing does not fire one request per keystroke.
//! Each keystroke supersedes the pending timer (last value wins). All the
//! decision logic lives in `DebounceCore`, which owns no timer, so both the
//! supersede rule and the fire path run under plain unit tests; the Leptos
//! hook only schedules `Timeout`s against it.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Quiet interval before a typed query is considered final.
pub const SEARCH_DEBOUNCE_MS: u32 = 150;

#[derive(Debug, Default)]
pub struct DebounceGate {
    current: u64,
}

impl DebounceGate {
    /// Start a new pending value, superseding any earlier one.
    pub fn arm(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Whether a fire for `token` is still the latest.
    pub fn accepts(&self, token: u64) -> bool {
        token == self.current
    }
}

/// The timer-free half of the debounce: tracks the pending value and decides
/// which timer fire gets to publish it.
#[derive(Debug, Default)]
pub struct DebounceCore {
    gate: DebounceGate,
    pending: Option<(u64, String)>,
}

impl DebounceCore {
    /// Register a new input. Returns the token to schedule a timer for, or
    /// `None` when the input already matches the published value (any
    /// pending value is cancelled).
    pub fn input(&mut self, next: String, published: &str) -> Option<u64> {
        if next == published {
            self.gate.arm();
            self.pending = None;
            return None;
        }
        let token = self.gate.arm();
        self.pending = Some((token, next));
        Some(token)
    }

    /// A timer fired for `token`: yields the value to publish if that token
    /// is still the latest, `None` for superseded or already-consumed fires.
    pub fn fire(&mut self, token: u64) -> Option<String> {
        if !self.gate.accepts(token) {
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }
}

/// Derive a delayed copy of `value`, updated once the input has been stable
/// for `delay_ms`.
pub fn use_debounced(value: Signal<String>, delay_ms: u32) -> ReadSignal<String> {
    let (debounced, set_debounced) = signal(value.get_untracked());
    let core = Rc::new(RefCell::new(DebounceCore::default()));
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    Effect::new(move || {
        let next = value.get();
        let token = core.borrow_mut().input(next, &debounced.get_untracked());
        let Some(token) = token else {
            // Typed back to the published value: drop the pending timer
            pending.borrow_mut().take();
            return;
        };
        let core = core.clone();
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(ready) = core.borrow_mut().fire(token) {
                set_debounced.set(ready);
            }
        });
        // Replacing the handle drops, and thereby cancels, the superseded timer
        *pending.borrow_mut() = Some(timeout);
    });

    debounced
}
