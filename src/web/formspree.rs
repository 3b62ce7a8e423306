//! Network submission path for the Formspree-backed contact form.
//!
//! Success is decided by HTTP status alone; the response body is not parsed.
//! A submit while another is in flight is not guarded against — inherited
//! behavior, kept as-is (see DESIGN.md).

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::notify::NotificationKind;
use crate::validate::email_is_valid;

use super::{dom, forms, AppContext};

pub(super) const CONTACT_FORM_ID: &str = "contact-form";

pub(super) fn setup(ctx: &Rc<AppContext>) -> Result<(), String> {
    let doc = dom::document()?;
    let Some(el) = doc.get_element_by_id(CONTACT_FORM_ID) else {
        return Ok(());
    };
    let form: web_sys::HtmlFormElement = el
        .dyn_into()
        .map_err(|_| format!("#{CONTACT_FORM_ID} is not a form"))?;

    let ctx = Rc::clone(ctx);
    let form2 = form.clone();
    dom::on_event(form.as_ref(), "submit", move |ev| {
        ev.prevent_default();
        handle_submit(&ctx, &form2);
    })
}

fn named_value(form: &web_sys::HtmlFormElement, name: &str) -> String {
    form.query_selector(&format!("[name=\"{name}\"]"))
        .ok()
        .flatten()
        .map(|el| forms::field_value(&el))
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn handle_submit(ctx: &Rc<AppContext>, form: &web_sys::HtmlFormElement) {
    let status = form.query_selector(".form-status-minimal").ok().flatten();
    let submit_btn = form.query_selector(".btn-submit-minimal").ok().flatten();

    // Presence-only aggregate over the required fields; malformed optional
    // fields do not block this path.
    let nombre = named_value(form, "nombre");
    let email = named_value(form, "email");
    let mensaje = named_value(form, "mensaje");
    let privacidad = !named_value(form, "privacidad").is_empty();

    if nombre.is_empty() || email.is_empty() || mensaje.is_empty() || !privacidad {
        forms::show_status(
            &ctx.config,
            status.as_ref(),
            "Por favor, completa todos los campos requeridos y acepta la política de privacidad.",
            "error",
            true,
        );
        return;
    }

    if !email_is_valid(&email) {
        forms::show_status(
            &ctx.config,
            status.as_ref(),
            "Por favor, introduce un email válido.",
            "error",
            true,
        );
        return;
    }

    forms::set_loading(submit_btn.as_ref(), true);
    forms::hide_status(status.as_ref());

    let ctx = Rc::clone(ctx);
    let form = form.clone();
    spawn_local(async move {
        match post_form(&form).await {
            Ok(()) => {
                forms::show_status(
                    &ctx.config,
                    status.as_ref(),
                    "¡Mensaje enviado correctamente! Te contactaremos pronto.",
                    "success",
                    false,
                );
                form.reset();
                let _ = ctx.notifications.show(
                    "Mensaje enviado correctamente",
                    NotificationKind::Success,
                    3000,
                );
            }
            Err(e) => {
                dom::console_error(&format!("form submission error: {e}"));
                forms::show_status(
                    &ctx.config,
                    status.as_ref(),
                    "Error al enviar el mensaje. Inténtalo de nuevo.",
                    "error",
                    true,
                );
                let _ = ctx.notifications.show(
                    "Error al enviar el mensaje",
                    NotificationKind::Error,
                    3000,
                );
            }
        }
        forms::set_loading(submit_btn.as_ref(), false);
    });
}

/// One multipart POST to the form's configured action URL. Ok iff 2xx.
async fn post_form(form: &web_sys::HtmlFormElement) -> Result<(), String> {
    let data =
        web_sys::FormData::new_with_form(form).map_err(|_| "FormData threw".to_string())?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&data);

    let request = web_sys::Request::new_with_str_and_init(&form.action(), &init)
        .map_err(|_| "request construction failed".to_string())?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|_| "setting Accept header failed".to_string())?;

    let window = dom::window()?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "network request failed".to_string())?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| "fetch resolved to a non-Response".to_string())?;

    if response.ok() {
        Ok(())
    } else {
        Err(format!("server answered {}", response.status()))
    }
}
