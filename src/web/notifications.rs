//! Toast notifications: a fixed top-right container receiving transient,
//! auto-dismissing elements. The data model lives in [`crate::notify`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::notify::{IdGenerator, Notification, NotificationKind};

use super::{dom, timers};

const CONTAINER_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 10000; \
     display: flex; flex-direction: column; gap: 10px; max-width: 400px;";

struct Inner {
    container: web_sys::Element,
    live: RefCell<HashMap<String, web_sys::Element>>,
    ids: RefCell<IdGenerator>,
    exit_ms: u32,
}

/// Cheaply cloneable handle; clones share the container and toast registry.
#[derive(Clone)]
pub(crate) struct NotificationSystem {
    inner: Rc<Inner>,
}

impl NotificationSystem {
    pub(crate) fn new(exit_ms: u32) -> Result<Self, String> {
        let doc = dom::document()?;
        let body = doc.body().ok_or("no body".to_string())?;

        let container = doc
            .create_element("div")
            .map_err(|_| "notifications: create container failed".to_string())?;
        container.set_class_name("notification-container-minimal");
        let _ = container.set_attribute("style", CONTAINER_STYLE);
        body.append_child(&container)
            .map_err(|_| "notifications: append container failed".to_string())?;

        Ok(Self {
            inner: Rc::new(Inner {
                container,
                live: RefCell::new(HashMap::new()),
                ids: RefCell::new(IdGenerator::new(js_sys::Date::now() as u64)),
                exit_ms,
            }),
        })
    }

    /// Show a toast. `duration_ms` of 0 keeps it until explicitly closed.
    /// Returns the toast id for targeted removal.
    pub(crate) fn show(
        &self,
        message: &str,
        kind: NotificationKind,
        duration_ms: u32,
    ) -> Result<String, String> {
        let note = Notification {
            id: self.inner.ids.borrow_mut().next_id(),
            message: message.to_string(),
            kind,
            auto_dismiss_ms: duration_ms,
        };
        let toast = self.build_toast(&note)?;

        self.inner
            .live
            .borrow_mut()
            .insert(note.id.clone(), toast.clone());
        self.inner
            .container
            .append_child(&toast)
            .map_err(|_| "notifications: append toast failed".to_string())?;

        // Entrance animation on the next frame, once the element has layout.
        {
            let toast = toast.clone();
            let _ = timers::request_animation_frame(move |_| dom::add_class(&toast, "show"));
        }

        if !note.is_sticky() {
            let this = self.clone();
            let id = note.id.clone();
            let _ = timers::set_timeout(move || this.remove(&id), note.auto_dismiss_ms as i32);
        }

        Ok(note.id)
    }

    fn build_toast(&self, note: &Notification) -> Result<web_sys::Element, String> {
        let doc = dom::document()?;
        let create = |tag: &str| {
            doc.create_element(tag)
                .map_err(|_| format!("notifications: create_element({tag}) failed"))
        };

        let toast = create("div")?;
        toast.set_class_name(&format!(
            "notification-minimal notification-{}",
            note.kind.css_suffix()
        ));
        let _ = toast.set_attribute("data-id", &note.id);
        let _ = toast.set_attribute("role", "alert");
        let _ = toast.set_attribute("aria-live", "polite");
        let _ = toast.set_attribute(
            "style",
            &format!("border-left: 4px solid {};", note.kind.accent_color()),
        );

        let content = create("div")?;
        content.set_class_name("notification-content-minimal");

        let icon = create("i")?;
        icon.set_class_name(&format!("fas {}", note.kind.icon_class()));
        let _ = icon.set_attribute("aria-hidden", "true");
        let _ = icon.set_attribute("style", &format!("color: {};", note.kind.accent_color()));

        // textContent, not innerHTML: messages may contain user-typed text.
        let text = create("span")?;
        text.set_text_content(Some(&note.message));

        let _ = content.append_child(&icon);
        let _ = content.append_child(&text);

        let close = create("button")?;
        close.set_class_name("notification-close-minimal");
        let _ = close.set_attribute("aria-label", "Cerrar notificación");
        let cross = create("i")?;
        cross.set_class_name("fas fa-times");
        let _ = cross.set_attribute("aria-hidden", "true");
        let _ = close.append_child(&cross);

        let _ = toast.append_child(&content);
        let _ = toast.append_child(&close);

        let this = self.clone();
        let id = note.id.clone();
        dom::on_event(close.as_ref(), "click", move |_| this.remove(&id))?;

        Ok(toast)
    }

    /// Dismiss one toast: exit animation first, detach after the delay.
    /// Idempotent; removing an unknown id is a no-op.
    pub(crate) fn remove(&self, id: &str) {
        let Some(toast) = self.inner.live.borrow_mut().remove(id) else {
            return;
        };
        dom::remove_class(&toast, "show");
        dom::add_class(&toast, "hide");
        let _ = timers::set_timeout(move || toast.remove(), self.inner.exit_ms as i32);
    }

    pub(crate) fn clear(&self) {
        let ids: Vec<String> = self.inner.live.borrow().keys().cloned().collect();
        for id in ids {
            self.remove(&id);
        }
    }
}
