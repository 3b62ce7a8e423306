//! Stat-counter animation: counts `.stat-number-minimal[data-count]` up from
//! zero the first time the element scrolls into view. The progression math
//! lives in [`crate::motion`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::config::SiteConfig;
use crate::motion;

use super::dom;

pub(super) fn setup(config: &SiteConfig) -> Result<(), String> {
    if dom::prefers_reduced_motion() {
        return Ok(());
    }

    let targets = dom::query_all(".stat-number-minimal[data-count]");
    if targets.is_empty() {
        return Ok(());
    }

    let duration_ms = f64::from(config.counter_duration_ms);

    if dom::intersection_observer_supported() {
        let options = web_sys::IntersectionObserverInit::new();
        options.set_threshold(&0.5.into());
        let observer = dom::intersection_observer(&options, move |target, observer| {
            observer.unobserve(&target);
            animate(target, duration_ms);
        })?;
        for el in &targets {
            observer.observe(el);
        }
        std::mem::forget(observer);
    } else {
        for el in targets {
            animate(el, duration_ms);
        }
    }
    Ok(())
}

/// Run one ease-out count-up. Each element animates at most once.
fn animate(el: web_sys::Element, duration_ms: f64) {
    if el.get_attribute("data-animated").is_some() {
        return;
    }
    let _ = el.set_attribute("data-animated", "true");

    let Some(target) = el
        .get_attribute("data-count")
        .and_then(|v| v.trim().parse::<u64>().ok())
    else {
        return;
    };

    let start: Rc<RefCell<Option<f64>>> = Rc::new(RefCell::new(None));

    // Self-scheduling animation-frame loop; the closure cell keeps it alive
    // until the final frame, after which it is intentionally left in place.
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let frame2 = Rc::clone(&frame);

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let started = *start.borrow_mut().get_or_insert(now);
        let (value, done) = motion::counter_value(target, now - started, duration_ms);
        el.set_text_content(Some(&motion::format_grouped(value)));

        if !done {
            if let (Ok(w), Some(cb)) = (dom::window(), frame2.borrow().as_ref()) {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let (Ok(w), Some(cb)) = (dom::window(), frame.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
