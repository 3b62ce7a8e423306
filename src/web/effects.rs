//! Presentation-only glue: hover lifts, the parallax hero fade, the header
//! scrolled state, and the back-to-top control.

use std::rc::Rc;

use wasm_bindgen::JsCast;

use crate::motion;

use super::{dom, timers, AppContext};

const CARD_SELECTOR: &str = ".service-card-minimal, .project-item-minimal, .step-item-minimal";

pub(super) fn setup(ctx: &Rc<AppContext>) -> Result<(), String> {
    setup_hover_effects()?;
    setup_parallax(ctx)?;
    setup_header_scroll(ctx)?;
    setup_back_to_top(ctx)?;
    Ok(())
}

fn setup_hover_effects() -> Result<(), String> {
    for card in dom::query_all(CARD_SELECTOR) {
        hover_lift(&card, "-8px", Some("0 20px 40px rgba(0, 0, 0, 0.1)"))?;
    }
    for button in dom::query_all(".btn-minimal") {
        hover_lift(&button, "-2px", None)?;
    }
    Ok(())
}

fn hover_lift(el: &web_sys::Element, lift: &str, shadow: Option<&str>) -> Result<(), String> {
    let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() else {
        return Ok(());
    };

    {
        let style = html.style();
        let lift = lift.to_string();
        let shadow = shadow.map(str::to_string);
        dom::on_event(el.as_ref(), "mouseenter", move |_| {
            let _ = style.set_property("transform", &format!("translateY({lift})"));
            if let Some(shadow) = &shadow {
                let _ = style.set_property("box-shadow", shadow);
            }
        })?;
    }
    {
        let style = html.style();
        let had_shadow = shadow.is_some();
        dom::on_event(el.as_ref(), "mouseleave", move |_| {
            let _ = style.set_property("transform", "translateY(0)");
            if had_shadow {
                let _ = style.remove_property("box-shadow");
            }
        })?;
    }
    Ok(())
}

/// Fade the hero out over the first stretch of scrolling.
fn setup_parallax(ctx: &Rc<AppContext>) -> Result<(), String> {
    if !ctx.config.enable_parallax || dom::prefers_reduced_motion() {
        return Ok(());
    }
    let doc = dom::document()?;
    let Ok(Some(hero)) = doc.query_selector(".hero-minimal") else {
        return Ok(());
    };
    let Some(hero) = hero.dyn_ref::<web_sys::HtmlElement>().cloned() else {
        return Ok(());
    };

    let handler = Rc::new(move || {
        let opacity = motion::hero_opacity(dom::scroll_y());
        let _ = hero.style().set_property("opacity", &format!("{opacity}"));
    }) as Rc<dyn Fn()>;

    let throttled = timers::throttle(handler, ctx.config.throttle_delay_ms);
    let window = dom::window()?;
    dom::on_event(window.as_ref(), "scroll", move |_| throttled())
}

fn setup_header_scroll(ctx: &Rc<AppContext>) -> Result<(), String> {
    let doc = dom::document()?;
    let Ok(Some(header)) = doc.query_selector(".header-minimal") else {
        return Ok(());
    };

    let handler = {
        let ctx = Rc::clone(ctx);
        Rc::new(move || {
            let y = dom::scroll_y();
            dom::toggle_class(&header, "scrolled", y > 100.0);
            ctx.state.scroll_position.publish(&y);
        }) as Rc<dyn Fn()>
    };

    let throttled = timers::throttle(handler, ctx.config.throttle_delay_ms);
    let window = dom::window()?;
    dom::on_event(window.as_ref(), "scroll", move |_| throttled())
}

fn setup_back_to_top(ctx: &Rc<AppContext>) -> Result<(), String> {
    let doc = dom::document()?;
    let Ok(Some(button)) = doc.query_selector(".back-to-top-minimal") else {
        return Ok(());
    };

    let handler = {
        let button = button.clone();
        Rc::new(move || {
            dom::toggle_class(&button, "visible", dom::scroll_y() > 300.0);
        }) as Rc<dyn Fn()>
    };
    let throttled = timers::throttle(handler, ctx.config.throttle_delay_ms);
    let window = dom::window()?;
    dom::on_event(window.as_ref(), "scroll", move |_| throttled())?;

    let ctx = Rc::clone(ctx);
    dom::on_event(button.as_ref(), "click", move |_| {
        dom::scroll_to_top(&ctx.config);
    })
}
