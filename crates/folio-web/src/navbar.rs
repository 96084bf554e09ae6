//! Navigation bar wiring: smooth scrolling with bounded retries, the
//! scroll-spy active-section highlight, and the header-height CSS variable.
//!
//! Markup contract: the header carries `data-header`; each link carries
//! `data-nav-link` plus an `href="#<section-id>"` fragment. Sections are
//! ordinary elements with matching ids.

use crate::dom::{self, EventHandle, Timeout};
use folio_core::nav::{active_section, probe_line, scroll_offset, RetrySchedule};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const ACTIVE_CLASS: &str = "active";

/// Per-section fine offsets, matching the page's section paddings.
const SECTION_OFFSETS: &[(&str, f32)] = &[
    ("hero", 40.0),
    ("about", -20.0),
    ("skills", 25.0),
    ("projects", 60.0),
    ("certificates", -3.0),
    ("contact", 47.0),
];

const SECTION_IDS: &[&str] = &[
    "hero",
    "about",
    "skills",
    "projects",
    "certificates",
    "contact",
];

pub struct Navbar {
    _listeners: Vec<EventHandle>,
    _spy_raf: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    _pending_retry: Rc<RefCell<Option<Timeout>>>,
}

pub fn mount() -> Option<Navbar> {
    let document = dom::document()?;
    let win = dom::window()?;
    let mut listeners = Vec::new();
    let pending_retry: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    // Header height CSS variable, maintained on resize.
    update_header_var(&document);
    {
        let document = document.clone();
        let tgt: &web::EventTarget = win.as_ref();
        listeners.push(EventHandle::listen_passive(tgt, "resize", move |_| {
            update_header_var(&document);
        }));
    }

    // Smooth-scroll handlers on every nav link.
    if let Ok(links) = document.query_selector_all("[data-nav-link]") {
        for i in 0..links.length() {
            let Some(node) = links.get(i) else { continue };
            let Ok(el) = node.dyn_into::<web::Element>() else {
                continue;
            };
            let Some(href) = el.get_attribute("href") else {
                continue;
            };
            let Some(id) = href.strip_prefix('#').map(str::to_string) else {
                continue;
            };
            let document = document.clone();
            let retry_slot = pending_retry.clone();
            let tgt: web::EventTarget = el.into();
            listeners.push(EventHandle::listen(&tgt, "click", move |ev| {
                ev.prevent_default();
                attempt_scroll(
                    document.clone(),
                    id.clone(),
                    RetrySchedule::new(),
                    retry_slot.clone(),
                );
            }));
        }
    }

    // Scroll spy: passive listener, heavy work deferred to one rAF tick.
    let spy_raf: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let ticking = Rc::new(Cell::new(false));
        let document_cb = document.clone();
        let ticking_cb = ticking.clone();
        *spy_raf.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            ticking_cb.set(false);
            update_active_link(&document_cb);
        }) as Box<dyn FnMut()>));

        let spy = spy_raf.clone();
        let tgt: &web::EventTarget = win.as_ref();
        listeners.push(EventHandle::listen_passive(tgt, "scroll", move |_| {
            if ticking.get() {
                return;
            }
            if let (Some(w), Some(cb)) = (dom::window(), spy.borrow().as_ref()) {
                if w
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .is_ok()
                {
                    ticking.set(true);
                }
            }
        }));
    }
    // Initial highlight before the first scroll.
    update_active_link(&document);

    Some(Navbar {
        _listeners: listeners,
        _spy_raf: spy_raf,
        _pending_retry: pending_retry,
    })
}

fn header_height(document: &web::Document) -> f32 {
    document
        .query_selector("[data-header]")
        .ok()
        .flatten()
        .map(|el| el.get_bounding_client_rect().height() as f32)
        .unwrap_or(88.0)
}

fn update_header_var(document: &web::Document) {
    let height = header_height(document).ceil();
    if let Some(root) = document.document_element() {
        if let Ok(root) = root.dyn_into::<web::HtmlElement>() {
            let _ = root
                .style()
                .set_property("--site-header-height", &format!("{height}px"));
        }
    }
}

fn section_extra(id: &str) -> Option<f32> {
    SECTION_OFFSETS
        .iter()
        .find(|(section, _)| *section == id)
        .map(|(_, extra)| *extra)
}

/// One scroll attempt. A missing target reschedules itself on the bounded
/// retry schedule; exhaustion logs a warning and falls back to a plain
/// fragment update.
fn attempt_scroll(
    document: web::Document,
    id: String,
    mut schedule: RetrySchedule,
    retry_slot: Rc<RefCell<Option<Timeout>>>,
) {
    if let Some(el) = document.get_element_by_id(&id) {
        let offset = scroll_offset(header_height(&document), section_extra(&id));
        if let Some(win) = dom::window() {
            let top = el.get_bounding_client_rect().top()
                + win.page_y_offset().unwrap_or(0.0)
                - offset as f64;
            let opts = web::ScrollToOptions::new();
            opts.set_top(top.max(0.0).floor());
            opts.set_behavior(web::ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&opts);
        }
        replace_fragment(&id);
        retry_slot.borrow_mut().take();
        return;
    }

    match schedule.next() {
        Some(delay) => {
            let slot = retry_slot.clone();
            let timer = Timeout::new(delay as i32, move || {
                attempt_scroll(document, id, schedule, slot);
            });
            *retry_slot.borrow_mut() = timer;
        }
        None => {
            log::warn!("scroll target #{id} not found after retries; updating fragment only");
            replace_fragment(&id);
            retry_slot.borrow_mut().take();
        }
    }
}

fn replace_fragment(id: &str) {
    if let Some(win) = dom::window() {
        if let Ok(history) = win.history() {
            let _ = history.replace_state_with_url(
                &wasm_bindgen::JsValue::NULL,
                "",
                Some(&format!("#{id}")),
            );
        }
    }
}

fn update_active_link(document: &web::Document) {
    let Some(win) = dom::window() else { return };
    let viewport_h = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let probe = probe_line(header_height(document), viewport_h);

    let tops: Vec<f32> = SECTION_IDS
        .iter()
        .map(|id| {
            document
                .get_element_by_id(id)
                .map(|el| el.get_bounding_client_rect().top() as f32)
                .unwrap_or(f32::NAN)
        })
        .collect();
    let Some(active) = active_section(&tops, probe) else {
        return;
    };
    let active_id = SECTION_IDS[active];

    if let Ok(links) = document.query_selector_all("[data-nav-link]") {
        for i in 0..links.length() {
            let Some(node) = links.get(i) else { continue };
            let Ok(el) = node.dyn_into::<web::Element>() else {
                continue;
            };
            let is_active = el
                .get_attribute("href")
                .map(|h| h == format!("#{active_id}"))
                .unwrap_or(false);
            let classes = el.class_list();
            if is_active {
                let _ = classes.add_1(ACTIVE_CLASS);
            } else {
                let _ = classes.remove_1(ACTIVE_CLASS);
            }
        }
    }
}
