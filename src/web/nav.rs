//! Navigation: anchor clicks, the scroll-spy, and the mobile menu.
//!
//! Section geometry is measured once here; the mapping itself lives in
//! [`crate::scrollspy`] so it can be tested without a rendered page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;

use crate::scrollspy::{ActiveSection, Section, SectionIndex};

use super::{dom, timers, AppContext};

const MENU_TOGGLE: &str = ".menu-toggle-minimal";
const MOBILE_NAV: &str = ".mobile-nav-minimal";

pub(super) fn setup(ctx: &Rc<AppContext>) -> Result<(), String> {
    setup_nav_links(ctx)?;
    setup_scroll_spy(ctx)?;
    setup_mobile_menu(ctx)?;
    Ok(())
}

/// Measure `section[id]` geometry, in DOM order. Stale after layout changes;
/// no re-measurement is performed.
fn measure_sections() -> SectionIndex {
    let sections = dom::query_all("section[id]")
        .into_iter()
        .filter_map(|el| {
            let html = el.dyn_ref::<web_sys::HtmlElement>()?;
            Some(Section {
                id: el.id(),
                offset: f64::from(html.offset_top()),
                height: f64::from(html.offset_height()),
            })
        })
        .collect();
    SectionIndex::new(sections)
}

fn nav_links() -> Vec<web_sys::Element> {
    dom::query_all(r##"nav a[href^="#"]"##)
}

fn set_active_link(active: &web_sys::Element) {
    for link in nav_links() {
        dom::remove_class(&link, "active");
    }
    dom::add_class(active, "active");
}

fn set_active_link_for_section(section_id: &str) {
    let Ok(doc) = dom::document() else {
        return;
    };
    if let Ok(Some(link)) = doc.query_selector(&format!(r##"nav a[href="#{section_id}"]"##)) {
        set_active_link(&link);
    }
}

fn setup_nav_links(ctx: &Rc<AppContext>) -> Result<(), String> {
    for link in nav_links() {
        let ctx = Rc::clone(ctx);
        let link2 = link.clone();
        dom::on_event(link.as_ref(), "click", move |ev| {
            ev.prevent_default();
            let Some(target_id) = link2
                .get_attribute("href")
                .and_then(|h| h.strip_prefix('#').map(str::to_string))
            else {
                return;
            };
            let Ok(doc) = dom::document() else {
                return;
            };
            if let Some(target) = doc.get_element_by_id(&target_id) {
                let _ = dom::scroll_to_element(&target, &ctx.config);
                set_active_link(&link2);
                close_mobile_menu(&ctx);
            }
        })?;
    }
    Ok(())
}

fn setup_scroll_spy(ctx: &Rc<AppContext>) -> Result<(), String> {
    let index = Rc::new(measure_sections());
    if index.is_empty() {
        return Ok(());
    }
    let active = Rc::new(RefCell::new(ActiveSection::new("inicio")));

    let probe_offset = f64::from(ctx.config.scroll_offset_px + ctx.config.scroll_probe_extra_px);
    let handler = {
        let ctx = Rc::clone(ctx);
        Rc::new(move || {
            let probe = dom::scroll_y() + probe_offset;
            let changed = active
                .borrow_mut()
                .update(&index, probe)
                .map(str::to_string);
            if let Some(id) = changed {
                set_active_link_for_section(&id);
                ctx.state.current_section.publish(&id);
            }
        }) as Rc<dyn Fn()>
    };

    let throttled = timers::throttle(handler, ctx.config.throttle_delay_ms);
    let window = dom::window()?;
    dom::on_event(window.as_ref(), "scroll", move |_| throttled())
}

fn menu_elements() -> Option<(web_sys::Element, web_sys::Element)> {
    let doc = dom::document().ok()?;
    let toggle = doc.query_selector(MENU_TOGGLE).ok()??;
    let nav = doc.query_selector(MOBILE_NAV).ok()??;
    Some((toggle, nav))
}

fn setup_mobile_menu(ctx: &Rc<AppContext>) -> Result<(), String> {
    let Some((toggle, nav)) = menu_elements() else {
        return Ok(());
    };

    {
        let ctx = Rc::clone(ctx);
        dom::on_event(toggle.as_ref(), "click", move |_| toggle_mobile_menu(&ctx))?;
    }

    // Tapping a link inside the panel closes it.
    for link in dom::query_all(".mobile-nav-list-minimal a") {
        let ctx = Rc::clone(ctx);
        dom::on_event(link.as_ref(), "click", move |_| close_mobile_menu(&ctx))?;
    }

    // Backdrop click: only when the panel itself is the target.
    {
        let ctx = Rc::clone(ctx);
        let nav2 = nav.clone();
        dom::on_event(nav.as_ref(), "click", move |ev| {
            let hit_backdrop = ev
                .target()
                .map(|t| t.loose_eq(nav2.as_ref()))
                .unwrap_or(false);
            if hit_backdrop {
                close_mobile_menu(&ctx);
            }
        })?;
    }

    {
        let ctx = Rc::clone(ctx);
        let nav = nav.clone();
        let doc = dom::document()?;
        dom::on_event(doc.as_ref(), "keydown", move |ev| {
            let Some(key_ev) = ev.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if key_ev.key() == "Escape" && nav.class_list().contains("active") {
                close_mobile_menu(&ctx);
            }
        })?;
    }

    Ok(())
}

fn toggle_mobile_menu(ctx: &Rc<AppContext>) {
    let Some((toggle, nav)) = menu_elements() else {
        return;
    };
    if nav.class_list().contains("active") {
        close_mobile_menu(ctx);
        return;
    }

    dom::add_class(&nav, "active");
    let _ = nav.set_attribute("aria-hidden", "false");
    dom::add_class(&toggle, "active");
    lock_body_scroll(true);
    ctx.state.menu_open.publish(&true);
}

fn close_mobile_menu(ctx: &Rc<AppContext>) {
    let Some((toggle, nav)) = menu_elements() else {
        return;
    };
    dom::remove_class(&toggle, "active");
    dom::remove_class(&nav, "active");
    let _ = nav.set_attribute("aria-hidden", "true");
    lock_body_scroll(false);
    ctx.state.menu_open.publish(&false);
}

fn lock_body_scroll(locked: bool) {
    let Some(body) = dom::document().ok().and_then(|d| d.body()) else {
        return;
    };
    let style = body.style();
    if locked {
        let _ = style.set_property("overflow", "hidden");
    } else {
        let _ = style.remove_property("overflow");
    }
}
