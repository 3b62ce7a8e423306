//! Small DOM helpers shared by every browser module.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::config::SiteConfig;

pub(super) fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or("no window".to_string())
}

pub(super) fn document() -> Result<web_sys::Document, String> {
    window()?.document().ok_or("no document".to_string())
}

/// All elements matching the selector, in document order. A selector that
/// fails to parse yields an empty list.
pub(super) fn query_all(selector: &str) -> Vec<web_sys::Element> {
    let Ok(doc) = document() else {
        return Vec::new();
    };
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

/// Attach a listener for the lifetime of the page. The closure is leaked on
/// purpose; listeners here are never detached before navigation.
pub(super) fn on_event(
    target: &web_sys::EventTarget,
    kind: &str,
    f: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), String> {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
        .map_err(|_| format!("addEventListener({kind}) threw"))?;
    cb.forget();
    Ok(())
}

pub(super) fn prefers_reduced_motion() -> bool {
    window()
        .ok()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub(super) fn scroll_y() -> f64 {
    window().ok().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub(super) fn performance_now() -> f64 {
    window()
        .ok()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Scroll the viewport so the element lands below the fixed header.
pub(super) fn scroll_to_element(el: &web_sys::Element, config: &SiteConfig) -> Result<(), String> {
    let w = window()?;
    let top = el.get_bounding_client_rect().top() + scroll_y() - f64::from(config.scroll_offset_px);

    let options = web_sys::ScrollToOptions::new();
    options.set_top(top.max(0.0));
    options.set_behavior(if config.enable_smooth_scrolling {
        web_sys::ScrollBehavior::Smooth
    } else {
        web_sys::ScrollBehavior::Auto
    });
    w.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

pub(super) fn scroll_to_top(config: &SiteConfig) {
    let Ok(w) = window() else {
        return;
    };
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(if config.enable_smooth_scrolling {
        web_sys::ScrollBehavior::Smooth
    } else {
        web_sys::ScrollBehavior::Auto
    });
    w.scroll_to_with_scroll_to_options(&options);
}

pub(super) fn add_class(el: &web_sys::Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub(super) fn remove_class(el: &web_sys::Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub(super) fn toggle_class(el: &web_sys::Element, class: &str, on: bool) {
    if on {
        add_class(el, class);
    } else {
        remove_class(el, class);
    }
}

pub(super) fn intersection_observer_supported() -> bool {
    window()
        .ok()
        .map(|w| js_sys::Reflect::has(w.as_ref(), &"IntersectionObserver".into()).unwrap_or(false))
        .unwrap_or(false)
}

/// Build an observer that calls `on_enter` for every entry that became
/// visible. The callback closure lives for the page lifetime.
pub(super) fn intersection_observer(
    options: &web_sys::IntersectionObserverInit,
    mut on_enter: impl FnMut(web_sys::Element, &web_sys::IntersectionObserver) + 'static,
) -> Result<web_sys::IntersectionObserver, String> {
    let cb = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_enter(entry.target(), &observer);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);

    let observer =
        web_sys::IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), options)
            .map_err(|_| "IntersectionObserver constructor threw".to_string())?;
    cb.forget();
    Ok(observer)
}

pub(super) fn console_warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

pub(super) fn console_error(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

pub(super) fn console_log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}
