//! Contact form wiring.
//!
//! Client-side validation runs before anything leaves the page: an empty
//! field produces an inline message and no network call. A valid draft is
//! POSTed to the mail relay; failure keeps the visitor's text for retry,
//! success clears the form.
//!
//! Markup contract: a `#contact-form` form with `#contact-name`,
//! `#contact-email`, `#contact-message` fields and a `#contact-status`
//! line.

use crate::dom::{self, EventHandle};
use folio_core::{ContactDraft, RelayReply, SubmitStatus};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const RELAY_URL: &str = "/api/contact";

pub struct ContactForm {
    _listeners: Vec<EventHandle>,
}

struct Fields {
    name: web::HtmlInputElement,
    email: web::HtmlInputElement,
    message: web::HtmlTextAreaElement,
    status: web::Element,
}

impl Fields {
    fn find(document: &web::Document) -> Option<Self> {
        Some(Self {
            name: document.get_element_by_id("contact-name")?.dyn_into().ok()?,
            email: document
                .get_element_by_id("contact-email")?
                .dyn_into()
                .ok()?,
            message: document
                .get_element_by_id("contact-message")?
                .dyn_into()
                .ok()?,
            status: document.get_element_by_id("contact-status")?,
        })
    }

    fn draft(&self) -> ContactDraft {
        ContactDraft::new(&self.name.value(), &self.email.value(), &self.message.value())
    }

    fn clear(&self) {
        self.name.set_value("");
        self.email.set_value("");
        self.message.set_value("");
    }

    fn show(&self, status: &SubmitStatus) {
        self.status.set_text_content(Some(status.inline_text()));
        let _ = self.status.set_attribute(
            "data-state",
            match status {
                SubmitStatus::Idle => "idle",
                SubmitStatus::Sending => "sending",
                SubmitStatus::Sent => "sent",
                SubmitStatus::Failed(_) => "failed",
            },
        );
    }
}

pub fn mount() -> Option<ContactForm> {
    let document = dom::document()?;
    let form = document.get_element_by_id("contact-form")?;
    Fields::find(&document)?;

    let in_flight = Rc::new(Cell::new(false));
    let mut listeners = Vec::new();
    {
        let document = document.clone();
        let in_flight = in_flight.clone();
        let tgt: web::EventTarget = form.into();
        listeners.push(EventHandle::listen(&tgt, "submit", move |ev| {
            ev.prevent_default();
            if in_flight.get() {
                return;
            }
            let Some(fields) = Fields::find(&document) else {
                return;
            };
            let draft = fields.draft();

            // Validation failure never reaches the network.
            if let Err(err) = draft.validate() {
                fields.show(&SubmitStatus::Failed(err.to_string()));
                return;
            }

            fields.show(&SubmitStatus::Sending);
            in_flight.set(true);
            let in_flight = in_flight.clone();
            spawn_local(async move {
                let status = submit(&draft).await;
                if status == SubmitStatus::Sent {
                    fields.clear();
                }
                // On failure the draft stays in the fields for retry.
                fields.show(&status);
                in_flight.set(false);
            });
        }));
    }

    Some(ContactForm {
        _listeners: listeners,
    })
}

async fn submit(draft: &ContactDraft) -> SubmitStatus {
    let Some(win) = dom::window() else {
        return SubmitStatus::Failed("Something went wrong. Try again.".to_string());
    };
    let body = match serde_json::to_string(draft) {
        Ok(body) => body,
        Err(e) => return SubmitStatus::Failed(e.to_string()),
    };

    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));
    let request = match web::Request::new_with_str_and_init(RELAY_URL, &init) {
        Ok(req) => req,
        Err(_) => return SubmitStatus::Failed("Something went wrong. Try again.".to_string()),
    };
    let _ = request.headers().set("Content-Type", "application/json");

    let response = match JsFuture::from(win.fetch_with_request(&request)).await {
        Ok(value) => match value.dyn_into::<web::Response>() {
            Ok(resp) => resp,
            Err(_) => {
                return SubmitStatus::Failed("Something went wrong. Try again.".to_string())
            }
        },
        Err(_) => return SubmitStatus::Failed("Network error. Please try again.".to_string()),
    };

    let http_ok = response.ok();
    let text = match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    let reply: RelayReply = serde_json::from_str(&text).unwrap_or(RelayReply {
        ok: false,
        error: None,
    });
    reply.into_status(http_ok)
}
