//! The one animated-surface runtime.
//!
//! Every visual effect implements [`SurfaceEffect`] and is driven by an
//! [`EffectRuntime`]: a requestAnimationFrame loop with cancellation,
//! visibility gating through an IntersectionObserver (no frames while the
//! surface is off-screen), reduced-motion gating (the effect never starts),
//! and pointer/resize wiring. Dropping the runtime cancels the scheduled
//! frame and detaches every listener. Nothing fires after teardown.

use crate::dom::{self, EventHandle};
use folio_core::constants::DT_CLAMP_MS;
use folio_core::SurfaceBounds;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub trait SurfaceEffect {
    /// Advance the simulation. `dt_ms` is clamped; `now_ms` is monotonic
    /// from the effect's first frame.
    fn tick(&mut self, dt_ms: f64, now_ms: f64);
    /// Project the current snapshot onto the page.
    fn render(&mut self);
    fn pointer_move(&mut self, _pos: Vec2, _now_ms: f64) {}
    fn pointer_down(&mut self, _pos: Vec2, _now_ms: f64) {}
    fn pointer_up(&mut self, _pos: Vec2, _now_ms: f64) {}
    fn resize(&mut self, _bounds: SurfaceBounds) {}
    fn visibility_changed(&mut self, _visible: bool) {}
    /// Self-terminating effects (the intro) return true to end the loop.
    fn finished(&self) -> bool {
        false
    }
}

/// Where pointer events are captured for an effect.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PointerWiring {
    None,
    /// Surface-relative coordinates from listeners on the surface element.
    Surface,
    /// Viewport coordinates from listeners on the window.
    Window,
}

pub struct RuntimeOptions {
    pub pointer: PointerWiring,
    pub observe_visibility: bool,
    pub track_resize: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            pointer: PointerWiring::Surface,
            observe_visibility: true,
            track_resize: true,
        }
    }
}

struct LoopState {
    effect: Box<dyn SurfaceEffect>,
    last: Option<Instant>,
    now_ms: f64,
    visible: bool,
    scheduled: bool,
    alive: bool,
    raf_id: Option<i32>,
    on_finished: Option<Box<dyn FnOnce()>>,
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct EffectRuntime {
    state: Rc<RefCell<LoopState>>,
    tick_cb: TickClosure,
    _listeners: Vec<EventHandle>,
    observer: Option<web::IntersectionObserver>,
    _observer_cb: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

impl EffectRuntime {
    /// Wires and starts an effect on `surface`. Returns `None` when the
    /// visitor prefers reduced motion: the effect is disabled entirely, not
    /// degraded.
    pub fn launch(
        surface: web::Element,
        effect: Box<dyn SurfaceEffect>,
        options: RuntimeOptions,
    ) -> Option<Self> {
        if dom::prefers_reduced_motion() {
            return None;
        }

        let state = Rc::new(RefCell::new(LoopState {
            effect,
            last: None,
            now_ms: 0.0,
            visible: true,
            scheduled: false,
            alive: true,
            raf_id: None,
            on_finished: None,
        }));
        let tick_cb: TickClosure = Rc::new(RefCell::new(None));

        {
            let state = state.clone();
            let tick_rc = tick_cb.clone();
            *tick_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let finished_hook = {
                    let mut s = state.borrow_mut();
                    s.scheduled = false;
                    s.raf_id = None;
                    if !s.alive {
                        return;
                    }
                    let now = Instant::now();
                    let dt_ms = s
                        .last
                        .map(|prev| (now - prev).as_secs_f64() * 1000.0)
                        .unwrap_or(16.7)
                        .clamp(0.0, DT_CLAMP_MS);
                    s.last = Some(now);
                    s.now_ms += dt_ms;
                    let now_ms = s.now_ms;
                    s.effect.tick(dt_ms, now_ms);
                    s.effect.render();
                    if s.effect.finished() {
                        s.alive = false;
                        s.on_finished.take()
                    } else {
                        None
                    }
                };
                if let Some(hook) = finished_hook {
                    hook();
                    return;
                }
                schedule(&state, &tick_rc);
            }) as Box<dyn FnMut()>));
        }

        let mut listeners = Vec::new();
        let mut observer = None;
        let mut observer_cb = None;

        match options.pointer {
            PointerWiring::None => {}
            PointerWiring::Surface => {
                let el = surface.clone();
                wire_pointer(&mut listeners, surface.clone().into(), &state, move |ev| {
                    dom::pointer_surface_px(&el, ev)
                });
            }
            PointerWiring::Window => {
                if let Some(win) = dom::window() {
                    wire_pointer(&mut listeners, win.into(), &state, |ev| {
                        Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
                    });
                }
            }
        }

        if options.track_resize {
            if let Some(win) = dom::window() {
                let state_r = state.clone();
                let el = surface.clone();
                listeners.push(EventHandle::listen_passive(
                    win.as_ref(),
                    "resize",
                    move |_| {
                        let rect = el.get_bounding_client_rect();
                        let bounds = SurfaceBounds::new(
                            rect.width() as f32,
                            rect.height() as f32,
                            dom::device_pixel_ratio(),
                        );
                        state_r.borrow_mut().effect.resize(bounds);
                    },
                ));
            }
        }

        if options.observe_visibility {
            let state_o = state.clone();
            let tick_o = tick_cb.clone();
            let cb = Closure::wrap(Box::new(move |entries: js_sys::Array| {
                let intersecting = entries
                    .get(0)
                    .dyn_into::<web::IntersectionObserverEntry>()
                    .map(|e| e.is_intersecting())
                    .unwrap_or(true);
                {
                    let mut s = state_o.borrow_mut();
                    s.visible = intersecting;
                    if intersecting {
                        // Forget the suspended interval; the next frame
                        // starts from a fresh dt instead of a giant one.
                        s.last = None;
                    }
                    s.effect.visibility_changed(intersecting);
                }
                if intersecting {
                    schedule(&state_o, &tick_o);
                }
            }) as Box<dyn FnMut(js_sys::Array)>);
            match web::IntersectionObserver::new(cb.as_ref().unchecked_ref()) {
                Ok(obs) => {
                    obs.observe(&surface);
                    observer = Some(obs);
                    observer_cb = Some(cb);
                }
                Err(_) => {
                    // No observer support: run unconditionally.
                }
            }
        }

        let runtime = Self {
            state,
            tick_cb,
            _listeners: listeners,
            observer,
            _observer_cb: observer_cb,
        };
        schedule(&runtime.state, &runtime.tick_cb);
        Some(runtime)
    }

    /// Runs once when a self-terminating effect reports `finished()`.
    pub fn set_on_finished(&self, hook: impl FnOnce() + 'static) {
        self.state.borrow_mut().on_finished = Some(Box::new(hook));
    }

    pub fn dispose(self) {
        // Drop does the work.
    }
}

impl Drop for EffectRuntime {
    fn drop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.alive = false;
        if let (Some(id), Some(win)) = (s.raf_id.take(), dom::window()) {
            let _ = win.cancel_animation_frame(id);
        }
        if let Some(obs) = &self.observer {
            obs.disconnect();
        }
        // Listener handles detach on drop; the tick closure dies with the
        // runtime after the pending frame was cancelled above.
        let _ = self.tick_cb.borrow_mut().take();
    }
}

fn schedule(state: &Rc<RefCell<LoopState>>, tick_cb: &TickClosure) {
    let mut s = state.borrow_mut();
    if !s.alive || !s.visible || s.scheduled {
        return;
    }
    let Some(win) = dom::window() else {
        return;
    };
    let cb = tick_cb.borrow();
    let Some(closure) = cb.as_ref() else {
        return;
    };
    if let Ok(id) = win.request_animation_frame(closure.as_ref().unchecked_ref()) {
        s.scheduled = true;
        s.raf_id = Some(id);
    }
}

fn wire_pointer(
    listeners: &mut Vec<EventHandle>,
    target: web::EventTarget,
    state: &Rc<RefCell<LoopState>>,
    to_pos: impl Fn(&web::MouseEvent) -> Vec2 + Clone + 'static,
) {
    let mut wire = |tgt: &web::EventTarget, name: &'static str, kind: u8| {
        let state = state.clone();
        let to_pos = to_pos.clone();
        listeners.push(EventHandle::listen_passive(tgt, name, move |ev| {
            let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let pos = to_pos(mouse);
            let mut s = state.borrow_mut();
            let now_ms = s.now_ms;
            match kind {
                0 => s.effect.pointer_move(pos, now_ms),
                1 => s.effect.pointer_down(pos, now_ms),
                _ => s.effect.pointer_up(pos, now_ms),
            }
        }));
    };
    wire(&target, "pointermove", 0);
    wire(&target, "pointerdown", 1);
    // Releases are captured on the window so a drag ending off-surface
    // still terminates.
    if let Some(win) = dom::window() {
        let tgt: &web::EventTarget = win.as_ref();
        wire(tgt, "pointerup", 2);
    }
}
