//! Per-field form validation and the mailto submission path.
//!
//! Every form on the page is registered here except the Formspree contact
//! form, which has its own network submission path (`web::formspree`); the
//! two paths are mutually exclusive and bound to different form elements.
//!
//! Validation itself is pure (`crate::validate`); this module only reads the
//! rules off the markup and paints results next to the fields.

use std::rc::Rc;

use wasm_bindgen::JsCast;

use crate::config::SiteConfig;
use crate::mailto::{self, ContactMessage};
use crate::notify::NotificationKind;
use crate::validate::{validate_field, FieldError, FieldKind, FieldRules};

use super::{dom, formspree, timers, AppContext};

pub(super) fn setup(ctx: &Rc<AppContext>) -> Result<(), String> {
    for el in dom::query_all("form") {
        let Ok(form) = el.dyn_into::<web_sys::HtmlFormElement>() else {
            continue;
        };
        if form.id() == formspree::CONTACT_FORM_ID {
            continue;
        }
        register_form(ctx, form)?;
    }
    Ok(())
}

fn register_form(ctx: &Rc<AppContext>, form: web_sys::HtmlFormElement) -> Result<(), String> {
    for field in form_fields(&form) {
        {
            let field2 = field.clone();
            dom::on_event(field.as_ref(), "blur", move |_| {
                let _ = validate_and_render(&field2);
            })?;
        }
        {
            let field2 = field.clone();
            let debounced = timers::debounce(
                Rc::new(move || {
                    let _ = validate_and_render(&field2);
                }),
                ctx.config.debounce_delay_ms,
            );
            dom::on_event(field.as_ref(), "input", move |_| debounced())?;
        }
    }

    let ctx = Rc::clone(ctx);
    let form2 = form.clone();
    dom::on_event(form.as_ref(), "submit", move |ev| {
        ev.prevent_default();
        handle_submit(&ctx, &form2);
    })
}

fn form_fields(form: &web_sys::HtmlFormElement) -> Vec<web_sys::Element> {
    let Ok(list) = form.query_selector_all("input, textarea, select") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

pub(super) fn field_rules(el: &web_sys::Element) -> FieldRules {
    FieldRules {
        required: el.has_attribute("required"),
        kind: FieldKind::from_input_type(&el.get_attribute("type").unwrap_or_default()),
        min_length: el
            .get_attribute("minlength")
            .and_then(|v| v.trim().parse().ok()),
    }
}

/// Current value of a field. Checkboxes map to "on"/"" so the required rule
/// means "must be checked".
pub(super) fn field_value(el: &web_sys::Element) -> String {
    if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        if input.type_() == "checkbox" {
            return if input.checked() {
                "on".to_string()
            } else {
                String::new()
            };
        }
        return input.value();
    }
    if let Some(area) = el.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        return area.value();
    }
    if let Some(select) = el.dyn_ref::<web_sys::HtmlSelectElement>() {
        return select.value();
    }
    String::new()
}

/// Validate one field and paint the result on its `.form-group-minimal`.
pub(super) fn validate_and_render(el: &web_sys::Element) -> bool {
    let result = validate_field(&field_value(el), &field_rules(el));
    render_field_state(el, &result);
    result.is_ok()
}

fn render_field_state(el: &web_sys::Element, result: &Result<(), FieldError>) {
    let Ok(Some(group)) = el.closest(".form-group-minimal") else {
        return;
    };
    dom::toggle_class(&group, "error", result.is_err());

    let Ok(Some(error_el)) = group.query_selector(".form-error-minimal") else {
        return;
    };
    match result {
        Err(e) => {
            error_el.set_text_content(Some(&e.message()));
            set_display(&error_el, "block");
        }
        Ok(()) => {
            error_el.set_text_content(None);
            set_display(&error_el, "none");
        }
    }
}

fn set_display(el: &web_sys::Element, value: &str) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().set_property("display", value);
    }
}

fn handle_submit(ctx: &Rc<AppContext>, form: &web_sys::HtmlFormElement) {
    let status = form.query_selector(".form-status-minimal").ok().flatten();
    let submit_btn = form.query_selector(".btn-submit-minimal").ok().flatten();

    // Re-validate everything, including optional fields; any failure blocks
    // this path (unlike the network path's presence-only aggregate).
    let all_valid = form_fields(form)
        .iter()
        .map(validate_and_render)
        .fold(true, |acc, ok| acc && ok);
    if !all_valid {
        show_status(
            &ctx.config,
            status.as_ref(),
            "Por favor, corrige los errores antes de enviar",
            "error",
            true,
        );
        return;
    }

    set_loading(submit_btn.as_ref(), true);

    let outcome = submit_via_mailto(&ctx.config, form);
    match outcome {
        Ok(()) => {
            show_status(
                &ctx.config,
                status.as_ref(),
                "¡Mensaje enviado correctamente! Te contactaremos pronto.",
                "success",
                true,
            );
            form.reset();
            let _ = ctx
                .notifications
                .show("Mensaje enviado correctamente", NotificationKind::Success, 3000);
        }
        Err(e) => {
            dom::console_error(&format!("form submission error: {e}"));
            show_status(
                &ctx.config,
                status.as_ref(),
                "Error al enviar el mensaje. Inténtalo de nuevo.",
                "error",
                true,
            );
            let _ = ctx
                .notifications
                .show("Error al enviar el mensaje", NotificationKind::Error, 3000);
        }
    }

    set_loading(submit_btn.as_ref(), false);
}

fn submit_via_mailto(config: &SiteConfig, form: &web_sys::HtmlFormElement) -> Result<(), String> {
    let data =
        web_sys::FormData::new_with_form(form).map_err(|_| "FormData threw".to_string())?;
    let text = |name: &str| data.get(name).as_string().filter(|v| !v.trim().is_empty());

    let msg = ContactMessage {
        nombre: text("nombre"),
        email: text("email"),
        telefono: text("telefono"),
        servicio: text("servicio"),
        mensaje: text("mensaje"),
        // Checkbox entries are only present when checked.
        privacidad: data.has("privacidad"),
    };

    let url = mailto::build_mailto_url(&config.contact_email, &msg);
    navigate_via_anchor(&url)
}

/// Navigate through a temporary anchor click; more compatible than assigning
/// `location.href` for `mailto:` targets.
fn navigate_via_anchor(url: &str) -> Result<(), String> {
    let doc = dom::document()?;
    let body = doc.body().ok_or("no body".to_string())?;

    let a = doc
        .create_element("a")
        .map_err(|_| "create_element(a) failed".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor cast failed".to_string())?;
    a.set_href(url);
    let _ = a.set_attribute("style", "display: none;");
    body.append_child(&a)
        .map_err(|_| "append anchor failed".to_string())?;
    a.click();
    a.remove();
    Ok(())
}

/// Disable the submit control and swap its label spans while a submission is
/// under way. Buttons without the label spans just get the class toggle.
pub(super) fn set_loading(button: Option<&web_sys::Element>, loading: bool) {
    let Some(button) = button else {
        return;
    };
    if let Some(b) = button.dyn_ref::<web_sys::HtmlButtonElement>() {
        b.set_disabled(loading);
    }
    dom::toggle_class(button, "loading", loading);

    let text = button.query_selector(".btn-text-minimal").ok().flatten();
    let spinner = button.query_selector(".btn-loading-minimal").ok().flatten();
    if let (Some(text), Some(spinner)) = (text, spinner) {
        set_display(&text, if loading { "none" } else { "inline-flex" });
        set_display(&spinner, if loading { "inline-flex" } else { "none" });
    }
}

/// Paint a form status line. `autohide` hides it again after the configured
/// delay; the element keeps its base class plus the kind suffix.
pub(super) fn show_status(
    config: &SiteConfig,
    element: Option<&web_sys::Element>,
    message: &str,
    kind: &str,
    autohide: bool,
) {
    let Some(element) = element else {
        return;
    };
    element.set_text_content(Some(message));
    element.set_class_name(&format!("form-status-minimal {kind}"));
    set_display(element, "block");

    if autohide {
        let element = element.clone();
        let _ = timers::set_timeout(
            move || set_display(&element, "none"),
            config.status_autohide_ms as i32,
        );
    }
}

pub(super) fn hide_status(element: Option<&web_sys::Element>) {
    if let Some(element) = element {
        set_display(element, "none");
    }
}
