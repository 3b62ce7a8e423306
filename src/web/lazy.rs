//! Lazy image loading: swap `data-src` into `src` once an image nears the
//! viewport, probing the URL with a detached image first so the visible
//! element never points at a broken source.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::config::SiteConfig;

use super::dom;

/// Per-image lifecycle attribute; makes duplicate registration idempotent.
const STATE_ATTR: &str = "data-lazy";

pub(super) fn setup(config: &SiteConfig) -> Result<(), String> {
    if !config.enable_lazy_loading {
        return Ok(());
    }

    let observer = if config.enable_intersection_observer && dom::intersection_observer_supported()
    {
        let options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin("50px");
        options.set_threshold(&0.1.into());
        Some(dom::intersection_observer(&options, |target, observer| {
            observer.unobserve(&target);
            if let Ok(img) = target.dyn_into::<web_sys::HtmlImageElement>() {
                load_image(&img);
            }
        })?)
    } else {
        None
    };

    for el in dom::query_all(r#"img[data-src], img[loading="lazy"]"#) {
        let Ok(img) = el.dyn_into::<web_sys::HtmlImageElement>() else {
            continue;
        };
        if img.get_attribute(STATE_ATTR).is_some() {
            continue;
        }
        let _ = img.set_attribute(STATE_ATTR, "observed");
        match &observer {
            Some(observer) => observer.observe(&img),
            None => load_image(&img),
        }
    }

    // Observers are held by the callback registration for the page lifetime.
    if let Some(observer) = observer {
        std::mem::forget(observer);
    }
    Ok(())
}

/// Probe the real source off-screen; only swap the visible element's `src`
/// once the probe decoded. Failures are marked and never retried.
fn load_image(img: &web_sys::HtmlImageElement) {
    match img.get_attribute(STATE_ATTR).as_deref() {
        Some("loading") | Some("loaded") | Some("error") => return,
        _ => {}
    }

    let src = img
        .get_attribute("data-src")
        .filter(|s| !s.is_empty())
        .or_else(|| Some(img.src()).filter(|s| !s.is_empty()));
    let Some(src) = src else {
        return;
    };

    let Ok(probe) = web_sys::HtmlImageElement::new() else {
        dom::console_warn("lazy: failed to create probe image");
        return;
    };
    let _ = img.set_attribute(STATE_ATTR, "loading");

    {
        let img = img.clone();
        let src = src.clone();
        let onload = Closure::once_into_js(move || {
            img.set_src(&src);
            dom::add_class(&img, "loaded");
            let _ = img.set_attribute(STATE_ATTR, "loaded");
        });
        probe.set_onload(Some(onload.unchecked_ref()));
    }

    {
        let img = img.clone();
        let src = src.clone();
        let onerror = Closure::once_into_js(move || {
            dom::add_class(&img, "error");
            let _ = img.set_attribute(STATE_ATTR, "error");
            dom::console_warn(&format!("Failed to load image: {src}"));
        });
        probe.set_onerror(Some(onerror.unchecked_ref()));
    }

    probe.set_src(&src);
}
