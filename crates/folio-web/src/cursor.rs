//! Custom cursor-trail component.
//!
//! The chain simulation lives in the core crate; this component owns a set
//! of fixed-position DOM nodes and writes transform/opacity from the trail
//! snapshot each frame. While a scroll is in flight only the head of each
//! layer is re-projected (debounced scroll-end restores the rest). The
//! glow target comes from the luminance of whatever the pointer is over,
//! with a hardcoded fallback for unparsable backgrounds.

use crate::dom::{self, EventHandle, Timeout};
use crate::runtime::{EffectRuntime, PointerWiring, RuntimeOptions, SurfaceEffect};
use folio_core::color::{glow_from_luminance, FALLBACK_ACCENT};
use folio_core::constants::SCROLL_DEBOUNCE_MS;
use folio_core::CursorTrail;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const LAYER_STYLES: [(&str, f32); 3] = [
    (
        "radial-gradient(circle, rgba(110,200,255,0.9), rgba(12,40,120,0.08))",
        3.5,
    ),
    (
        "radial-gradient(circle, rgba(150,220,255,0.95), rgba(10,40,100,0.1))",
        2.5,
    ),
    (
        "radial-gradient(circle, rgba(200,240,255,1), rgba(50,110,255,0.16))",
        1.2,
    ),
];

const BALL_GRADIENT: &str =
    "radial-gradient(circle at 28% 28%, #fff 0%, #dff5ff 14%, #3ea2ff 40%, rgba(6,18,60,0.12) 100%)";

/// Dot diameter in px.
const DOT_SIZE: f32 = 10.0;

pub struct CursorTrailComponent {
    _runtime: EffectRuntime,
    _listeners: Vec<EventHandle>,
    root: web::Element,
}

struct TrailEffect {
    trail: Rc<RefCell<CursorTrail>>,
    scroll_debounce: Rc<RefCell<Option<Timeout>>>,
    nodes: Vec<Vec<web::HtmlElement>>,
    ball: web::HtmlElement,
    now_ms: f64,
}

/// Mounts the cursor trail; nodes are created under `document.body`.
pub fn mount() -> Option<CursorTrailComponent> {
    if dom::prefers_reduced_motion() {
        return None;
    }
    let document = dom::document()?;
    let body = document.body()?;
    let win = dom::window()?;

    let start = Vec2::new(
        win.inner_width().ok()?.as_f64().unwrap_or(0.0) as f32 / 2.0,
        win.inner_height().ok()?.as_f64().unwrap_or(0.0) as f32 / 2.0,
    );
    let trail = Rc::new(RefCell::new(CursorTrail::new(start)));

    let root = document.create_element("div").ok()?;
    let _ = root.set_attribute(
        "style",
        "position:fixed;inset:0;pointer-events:none;z-index:999999;overflow:visible;",
    );
    let _ = root.set_attribute("aria-hidden", "true");
    let _ = body.append_child(&root);

    let mut nodes: Vec<Vec<web::HtmlElement>> = Vec::new();
    {
        let counts = {
            let t = trail.borrow();
            (0..t.layer_count()).map(|l| t.layer_len(l)).collect::<Vec<_>>()
        };
        for (layer, count) in counts.into_iter().enumerate() {
            let (gradient, blur) = LAYER_STYLES[layer.min(LAYER_STYLES.len() - 1)];
            let mut layer_nodes = Vec::with_capacity(count);
            for _ in 0..count {
                if let Some(node) = make_node(&document, &root, gradient, blur) {
                    layer_nodes.push(node);
                }
            }
            nodes.push(layer_nodes);
        }
    }

    let ball = make_ball(&document, &root)?;

    let scroll_debounce: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let effect = TrailEffect {
        trail: trail.clone(),
        scroll_debounce: scroll_debounce.clone(),
        nodes,
        ball,
        now_ms: 0.0,
    };

    let runtime = EffectRuntime::launch(
        root.clone(),
        Box::new(effect),
        RuntimeOptions {
            pointer: PointerWiring::Window,
            // A fixed full-viewport layer is always intersecting; skip the
            // observer and keep resize handling off too.
            observe_visibility: false,
            track_resize: false,
        },
    )?;

    // Auxiliary listeners beyond the runtime's pointer wiring.
    let mut listeners = Vec::new();
    {
        let trail = trail.clone();
        let win_t: &web::EventTarget = win.as_ref();
        listeners.push(EventHandle::listen_passive(win_t, "pointerleave", move |_| {
            trail.borrow_mut().pointer_left();
        }));
    }
    {
        let trail = trail.clone();
        let debounce = scroll_debounce;
        let win_t: &web::EventTarget = win.as_ref();
        listeners.push(EventHandle::listen_passive(win_t, "scroll", move |_| {
            trail.borrow_mut().set_scrolling(true);
            let trail_end = trail.clone();
            // Replacing the slot clears any pending timer first.
            *debounce.borrow_mut() = Timeout::new(SCROLL_DEBOUNCE_MS, move || {
                trail_end.borrow_mut().set_scrolling(false);
            });
        }));
    }

    Some(CursorTrailComponent {
        _runtime: runtime,
        _listeners: listeners,
        root,
    })
}

impl Drop for CursorTrailComponent {
    fn drop(&mut self) {
        self.root.remove();
    }
}

fn make_node(
    document: &web::Document,
    root: &web::Element,
    gradient: &str,
    blur: f32,
) -> Option<web::HtmlElement> {
    use wasm_bindgen::JsCast;
    let el: web::HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    let _ = el.set_attribute(
        "style",
        &format!(
            "position:fixed;width:{DOT_SIZE}px;height:{DOT_SIZE}px;border-radius:50%;\
             transform:translate3d(-9999px,-9999px,0);opacity:0;\
             will-change:transform,opacity;pointer-events:none;mix-blend-mode:screen;\
             filter:blur({blur}px);background:{gradient};"
        ),
    );
    let _ = root.append_child(&el);
    Some(el)
}

fn make_ball(document: &web::Document, root: &web::Element) -> Option<web::HtmlElement> {
    use wasm_bindgen::JsCast;
    let el: web::HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    let _ = el.set_attribute(
        "style",
        &format!(
            "position:fixed;width:{DOT_SIZE}px;height:{DOT_SIZE}px;border-radius:50%;\
             transform:translate3d(-9999px,-9999px,0);\
             will-change:transform,opacity,box-shadow;pointer-events:none;z-index:1000000;\
             background:{BALL_GRADIENT};\
             box-shadow:0 1px 2px rgba(0,0,0,0.22), 0 0 5px rgba(90,220,255,0.12);"
        ),
    );
    let _ = root.append_child(&el);
    Some(el)
}

impl SurfaceEffect for TrailEffect {
    fn tick(&mut self, _dt_ms: f64, now_ms: f64) {
        self.now_ms = now_ms;
        self.trail.borrow_mut().tick(now_ms);
    }

    fn render(&mut self) {
        let trail = self.trail.borrow();
        for (layer, layer_nodes) in self.nodes.iter().enumerate() {
            let limit = trail.render_limit(layer).min(layer_nodes.len());
            for (i, node) in layer_nodes.iter().enumerate().take(limit) {
                let v = trail.node_view(layer, i);
                let left = v.x - (DOT_SIZE * v.scale) / 2.0;
                let top = v.y - (DOT_SIZE * v.scale) / 2.0;
                let style = node.style();
                let _ = style.set_property(
                    "transform",
                    &format!("translate3d({left}px, {top}px, 0) scale({})", v.scale),
                );
                let _ = style.set_property("opacity", &v.opacity.to_string());
            }
        }

        let dot = trail.dot();
        let glow = trail.glow();
        let style = self.ball.style();
        let left = dot.x - DOT_SIZE / 2.0;
        let top = dot.y - DOT_SIZE / 2.0;
        let _ = style.set_property(
            "transform",
            &format!("translate3d({left}px, {top}px, 0)"),
        );
        let core = 4.0 + glow * 18.0;
        let halo = 10.0 + glow * 36.0;
        let _ = style.set_property(
            "box-shadow",
            &format!(
                "0 1px 2px rgba(0,0,0,0.22), 0 0 {core}px rgba(90,220,255,{}), 0 0 {halo}px rgba(90,220,255,{})",
                0.16 + glow * 0.3,
                0.04 + glow * 0.14
            ),
        );
        let _ = style.set_property("opacity", &trail.dot_opacity(self.now_ms).to_string());
    }

    fn pointer_move(&mut self, pos: Vec2, now_ms: f64) {
        let mut trail = self.trail.borrow_mut();
        trail.pointer_moved(pos, now_ms);
        trail.set_glow_target(glow_under_pointer(pos));
    }
}

/// Luminance-derived glow for the element under the pointer; unparsable or
/// missing backgrounds fall back to the accent default's luminance.
fn glow_under_pointer(pos: Vec2) -> f32 {
    let Some(document) = dom::document() else {
        return 0.0;
    };
    let Some(el) = document.element_from_point(pos.x, pos.y) else {
        return 0.0;
    };
    let rgba = dom::computed_background(&el, FALLBACK_ACCENT);
    glow_from_luminance(rgba.luminance())
}

/// Cancels any pending scroll-end timer on teardown.
impl Drop for TrailEffect {
    fn drop(&mut self) {
        let _ = self.scroll_debounce.borrow_mut().take();
    }
}
