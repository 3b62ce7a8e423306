//! Timer and animation-frame wrappers, plus the debounce/throttle wiring
//! around the clock-free state in [`crate::rate_limit`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::rate_limit::{Debouncer, ThrottleGate};

use super::dom;

pub(super) fn set_timeout(f: impl FnOnce() + 'static, ms: i32) -> Result<i32, String> {
    let w = dom::window()?;
    let cb = Closure::once_into_js(f);
    w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
        .map_err(|_| "setTimeout threw".to_string())
}

pub(super) fn request_animation_frame(f: impl FnOnce(f64) + 'static) -> Result<i32, String> {
    let w = dom::window()?;
    let cb = Closure::once_into_js(f);
    w.request_animation_frame(cb.unchecked_ref())
        .map_err(|_| "requestAnimationFrame threw".to_string())
}

/// Trailing-edge debounce. Every call arms a fresh generation and schedules a
/// timer; timers for superseded generations fire as no-ops, so only the last
/// call within a quiet period runs the wrapped function.
pub(super) fn debounce(f: Rc<dyn Fn()>, wait_ms: u32) -> impl Fn() {
    let state = Rc::new(RefCell::new(Debouncer::new()));
    move || {
        let generation = state.borrow_mut().arm();
        let state = Rc::clone(&state);
        let f = Rc::clone(&f);
        let scheduled = set_timeout(
            move || {
                if state.borrow().should_fire(generation) {
                    f();
                }
            },
            wait_ms as i32,
        );
        if scheduled.is_err() {
            dom::console_warn("debounce: failed to schedule timer");
        }
    }
}

/// Leading-edge throttle: calls during the cooldown window are dropped.
pub(super) fn throttle(f: Rc<dyn Fn()>, limit_ms: u32) -> impl Fn() {
    let gate = Rc::new(RefCell::new(ThrottleGate::new(f64::from(limit_ms))));
    move || {
        if gate.borrow_mut().try_fire(dom::performance_now()) {
            f();
        }
    }
}
