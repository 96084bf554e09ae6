//! Small DOM helpers and owned handles.
//!
//! Every listener and timer in this crate is held as a value whose `Drop`
//! detaches it; teardown is "drop the component", and nothing fires after
//! that. This is the one deliberate departure from leak-and-forget closure
//! wiring: effects here are mounted and unmounted within a page's life.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window() -> Option<web::Window> {
    web::window()
}

#[inline]
pub fn document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn device_pixel_ratio() -> f32 {
    web::window()
        .map(|w| w.device_pixel_ratio() as f32)
        .unwrap_or(1.0)
}

/// True when the visitor asked for reduced motion; effects render nothing.
pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub fn root_add_class(class: &str) {
    if let Some(root) = document().and_then(|d| d.document_element()) {
        let _ = root.class_list().add_1(class);
    }
}

pub fn root_has_class(class: &str) -> bool {
    document()
        .and_then(|d| d.document_element())
        .map(|root| root.class_list().contains(class))
        .unwrap_or(false)
}

/// Sizes a canvas backing store to its CSS box times the pixel ratio.
/// Returns the CSS-pixel bounds.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> folio_core::SurfaceBounds {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = (rect.width() as f32, rect.height() as f32);
    canvas.set_width(((w * dpr) as u32).max(1));
    canvas.set_height(((h * dpr) as u32).max(1));
    folio_core::SurfaceBounds::new(w, h, dpr)
}

/// An attached event listener; detaches on drop.
pub struct EventHandle {
    target: web::EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl EventHandle {
    pub fn listen(
        target: &web::EventTarget,
        name: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let _ = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            name,
            callback,
        }
    }

    /// Passive variant for scroll/pointer handlers that only do bookkeeping.
    pub fn listen_passive(
        target: &web::EventTarget,
        name: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(true);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            callback.as_ref().unchecked_ref(),
            &options,
        );
        Self {
            target: target.clone(),
            name,
            callback,
        }
    }
}

impl Drop for EventHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref());
    }
}

/// A one-shot timer; cleared on drop if still pending.
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(delay_ms: i32, handler: impl FnOnce() + 'static) -> Option<Self> {
        let mut slot = Some(handler);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(f) = slot.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let id = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms,
            )
            .ok()?;
        Some(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

/// Reads an element's computed background color, recovering from missing or
/// malformed values with the given fallback.
pub fn computed_background(el: &web::Element, fallback: folio_core::Rgba) -> folio_core::Rgba {
    let Some(style) = window()
        .and_then(|w| w.get_computed_style(el).ok())
        .flatten()
    else {
        return fallback;
    };
    let value = style
        .get_property_value("background-color")
        .unwrap_or_default();
    folio_core::color::parse_or(&value, fallback)
}

/// Reads a CSS custom property from an element's computed style.
pub fn css_var(el: &web::Element, name: &str) -> Option<String> {
    let style = window().and_then(|w| w.get_computed_style(el).ok()).flatten()?;
    let value = style.get_property_value(name).ok()?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Surface-relative pointer coordinates in CSS pixels.
pub fn pointer_surface_px(el: &web::Element, ev: &web::MouseEvent) -> glam::Vec2 {
    let rect = el.get_bounding_client_rect();
    glam::Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
