//! Browser application root: builds the shared context, waits for the DOM,
//! and wires every page feature. Compiled only for `--features web` on a
//! wasm32 target; the page-independent logic lives in the crate root modules.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::config::{SiteConfig, CONFIG_SCRIPT_ID};
use crate::notify::NotificationKind;
use crate::state::AppState;

mod counters;
mod dom;
mod effects;
mod forms;
mod formspree;
mod lazy;
mod nav;
mod notifications;
mod timers;

use notifications::NotificationSystem;

/// Shared by every feature module; constructed once per page view and passed
/// by reference. Nothing in here survives a reload.
pub(crate) struct AppContext {
    pub(crate) config: SiteConfig,
    pub(crate) state: AppState,
    pub(crate) notifications: NotificationSystem,
}

/// Entry point, called from the Trunk-generated bootstrap.
pub fn start() {
    if let Err(e) = boot() {
        dom::console_error(&format!("refycon: boot failed: {e}"));
    }
}

fn boot() -> Result<(), String> {
    install_global_error_hooks()?;

    let document = dom::document()?;
    let config = load_config(&document);
    let ctx = Rc::new(AppContext {
        notifications: NotificationSystem::new(config.notification_exit_ms)?,
        state: AppState::new(),
        config,
    });

    if document.ready_state() == "loading" {
        let ctx = Rc::clone(&ctx);
        dom::on_event(document.as_ref(), "DOMContentLoaded", move |_| {
            if let Err(e) = setup(&ctx) {
                dom::console_error(&format!("refycon: setup failed: {e}"));
            }
        })?;
    } else {
        setup(&ctx)?;
    }
    Ok(())
}

/// Optional inline JSON overrides; absent or malformed blocks keep defaults.
fn load_config(document: &web_sys::Document) -> SiteConfig {
    document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
        .map(|raw| SiteConfig::from_json_str(&raw))
        .unwrap_or_default()
}

fn setup(ctx: &Rc<AppContext>) -> Result<(), String> {
    lazy::setup(&ctx.config)?;
    forms::setup(ctx)?;
    formspree::setup(ctx)?;
    nav::setup(ctx)?;
    counters::setup(&ctx.config)?;
    effects::setup(ctx)?;

    setup_keyboard_navigation(ctx)?;
    setup_accessibility()?;
    prefetch_hero_image()?;
    register_service_worker()?;

    // Welcome toast shortly after the page settles; anything already on
    // screen by then yields to it.
    {
        let delay_ms = ctx.config.welcome_delay_ms as i32;
        let ctx = Rc::clone(ctx);
        let _ = timers::set_timeout(
            move || {
                ctx.notifications.clear();
                let _ = ctx.notifications.show(
                    "¡Bienvenido a Refycon! Descubre nuestros servicios premium de construcción.",
                    NotificationKind::Info,
                    3000,
                );
            },
            delay_ms,
        );
    }
    Ok(())
}

/// Diagnostics only: uncaught errors and unhandled rejections are logged and
/// otherwise ignored; the page stays interactive.
fn install_global_error_hooks() -> Result<(), String> {
    let window = dom::window()?;

    dom::on_event(window.as_ref(), "error", |ev| {
        let message = ev
            .dyn_ref::<web_sys::ErrorEvent>()
            .map(|e| e.message())
            .unwrap_or_else(|| "unknown error".to_string());
        dom::console_error(&format!("Global error: {message}"));
    })?;

    dom::on_event(window.as_ref(), "unhandledrejection", |ev| {
        match ev.dyn_ref::<web_sys::PromiseRejectionEvent>() {
            Some(e) => web_sys::console::error_2(
                &"Unhandled promise rejection:".into(),
                &e.reason(),
            ),
            None => dom::console_error("Unhandled promise rejection"),
        }
    })
}

fn setup_keyboard_navigation(ctx: &Rc<AppContext>) -> Result<(), String> {
    let doc = dom::document()?;

    // Skip link jumps focus to the main content region.
    if let Ok(Some(skip)) = doc.query_selector(".skip-link") {
        let ctx = Rc::clone(ctx);
        dom::on_event(skip.as_ref(), "click", move |ev| {
            ev.prevent_default();
            let Ok(doc) = dom::document() else {
                return;
            };
            if let Some(main) = doc.get_element_by_id("main-content") {
                if let Some(html) = main.dyn_ref::<web_sys::HtmlElement>() {
                    let _ = html.focus();
                }
                let _ = dom::scroll_to_element(&main, &ctx.config);
            }
        })?;
    }

    // Cards become keyboard-activatable: Enter/Space follows their link.
    for card in dom::query_all(
        ".service-card-minimal, .project-item-minimal, .step-item-minimal",
    ) {
        let _ = card.set_attribute("tabindex", "0");
        let card2 = card.clone();
        dom::on_event(card.as_ref(), "keydown", move |ev| {
            let Some(key_ev) = ev.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            let key = key_ev.key();
            if key != "Enter" && key != " " {
                return;
            }
            ev.prevent_default();
            if let Ok(Some(link)) = card2.query_selector("a") {
                if let Some(html) = link.dyn_ref::<web_sys::HtmlElement>() {
                    html.click();
                }
            }
        })?;
    }
    Ok(())
}

fn setup_accessibility() -> Result<(), String> {
    // Buttons without a label inherit their visible text.
    for button in dom::query_all("button:not([aria-label])") {
        let text = button.text_content().unwrap_or_default();
        let text = text.trim();
        if !text.is_empty() {
            let _ = button.set_attribute("aria-label", text);
        }
    }

    // Visible focus indication for every focusable element.
    for el in dom::query_all(r#"a, button, input, textarea, select, [tabindex]:not([tabindex="-1"])"#)
    {
        {
            let el2 = el.clone();
            dom::on_event(el.as_ref(), "focus", move |_| {
                dom::add_class(&el2, "focus-visible");
            })?;
        }
        let el2 = el.clone();
        dom::on_event(el.as_ref(), "blur", move |_| {
            dom::remove_class(&el2, "focus-visible");
        })?;
    }
    Ok(())
}

/// Hint the browser at the hero image early: intrinsic loading attributes
/// plus a `<link rel="preload">` in the head.
fn prefetch_hero_image() -> Result<(), String> {
    let doc = dom::document()?;
    let Ok(Some(el)) = doc.query_selector(".hero-image-minimal img") else {
        return Ok(());
    };
    let Some(img) = el.dyn_ref::<web_sys::HtmlImageElement>() else {
        return Ok(());
    };
    if img.src().is_empty() {
        return Ok(());
    }

    if img.get_attribute("fetchpriority").is_none() {
        let _ = img.set_attribute("fetchpriority", "high");
    }
    if img.get_attribute("decoding").is_none() {
        let _ = img.set_attribute("decoding", "async");
    }

    let Some(head) = doc.head() else {
        return Ok(());
    };
    let link = doc
        .create_element("link")
        .map_err(|_| "create_element(link) failed".to_string())?
        .dyn_into::<web_sys::HtmlLinkElement>()
        .map_err(|_| "link cast failed".to_string())?;
    link.set_rel("preload");
    link.set_as("image");
    let current = img.current_src();
    let href = if current.is_empty() { img.src() } else { current };
    link.set_href(&href);
    let srcset = img.srcset();
    if !srcset.is_empty() {
        let _ = link.set_attribute("imagesrcset", &srcset);
    }
    head.append_child(&link)
        .map_err(|_| "append preload link failed".to_string())?;
    Ok(())
}

/// The worker itself (`sw.js`) intercepts nothing and caches nothing; being
/// installable is its only effect.
fn register_service_worker() -> Result<(), String> {
    let window = dom::window()?;
    let navigator = window.navigator();
    let supported =
        js_sys::Reflect::has(navigator.as_ref(), &"serviceWorker".into()).unwrap_or(false);
    if !supported {
        return Ok(());
    }

    dom::on_event(window.as_ref(), "load", move |_| {
        let Ok(window) = dom::window() else {
            return;
        };
        let promise = window.navigator().service_worker().register("/sw.js");
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(value) => {
                    let scope = value
                        .dyn_into::<web_sys::ServiceWorkerRegistration>()
                        .map(|r| r.scope())
                        .unwrap_or_default();
                    dom::console_log(&format!("Service Worker registrado: {scope}"));
                }
                Err(_) => {
                    dom::console_error("No se pudo registrar el Service Worker");
                }
            }
        });
    })
}
