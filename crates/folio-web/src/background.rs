//! Ambient particle background on a 2D canvas.
//!
//! The field simulation lives in the core crate; this component sizes the
//! backing store, feeds pointer samples in, and projects the particle
//! snapshot as linked dots each frame. If no 2D context can be acquired
//! the component mounts nothing. Capability absence, not an error.

use crate::dom;
use crate::runtime::{EffectRuntime, PointerWiring, RuntimeOptions, SurfaceEffect};
use folio_core::color::{self, Rgba};
use folio_core::{FieldConfig, ParticleField, PointerTracker, SurfaceBounds};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

const DEFAULT_ACCENT: Rgba = Rgba::opaque(0x60, 0xa5, 0xfa);
const DEFAULT_BG: Rgba = Rgba::opaque(0x06, 0x10, 0x25);

struct ParticleBackground {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: ParticleField,
    tracker: PointerTracker,
    bounds: SurfaceBounds,
    accent: Rgba,
    bg: Rgba,
}

/// Mounts the particle background on `#ambient-canvas`, if present.
pub fn mount(seed: u64) -> Option<EffectRuntime> {
    let document = dom::document()?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("ambient-canvas")?
        .dyn_into()
        .ok()?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()?;

    let bounds = dom::sync_canvas_backing_size(&canvas);
    let accent = canvas
        .get_attribute("data-accent")
        .map(|s| color::parse_or(&s, DEFAULT_ACCENT))
        .unwrap_or(DEFAULT_ACCENT);
    let bg = canvas
        .get_attribute("data-bg")
        .map(|s| color::parse_or(&s, DEFAULT_BG))
        .unwrap_or(DEFAULT_BG);

    let effect = ParticleBackground {
        ctx,
        field: ParticleField::new(bounds, FieldConfig::default(), seed),
        tracker: PointerTracker::new(),
        bounds,
        accent,
        bg,
        canvas: canvas.clone(),
    };
    EffectRuntime::launch(
        canvas.into(),
        Box::new(effect),
        RuntimeOptions {
            pointer: PointerWiring::Surface,
            observe_visibility: true,
            track_resize: true,
        },
    )
}

impl SurfaceEffect for ParticleBackground {
    fn tick(&mut self, dt_ms: f64, now_ms: f64) {
        self.field.tick(dt_ms, now_ms);
    }

    fn render(&mut self) {
        let ctx = &self.ctx;
        let (w, h) = (self.bounds.width as f64, self.bounds.height as f64);
        let dpr = self.bounds.dpr as f64;
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(&self.bg.to_css());
        ctx.fill_rect(0.0, 0.0, w, h);

        let particles = self.field.particles();

        // Links first, so dots draw on top.
        ctx.set_line_width(0.8);
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let (a, b) = (&particles[i], &particles[j]);
                if let Some(alpha) = self.field.link_alpha(a.pos, b.pos) {
                    ctx.begin_path();
                    ctx.move_to(a.pos.x as f64, a.pos.y as f64);
                    ctx.line_to(b.pos.x as f64, b.pos.y as f64);
                    ctx.set_stroke_style_str(&self.accent.with_alpha(alpha).to_css());
                    ctx.stroke();
                }
            }
        }

        for p in particles {
            let (x, y) = (p.pos.x as f64, p.pos.y as f64);
            let halo = (p.size * 4.0) as f64;
            if let Ok(grad) = ctx.create_radial_gradient(x, y, 0.0, x, y, halo) {
                let core = self
                    .accent
                    .lighten(20 + (p.hue_shift * 0.2) as i16)
                    .to_css();
                let _ = grad.add_color_stop(0.0, &core);
                let _ = grad.add_color_stop(0.6, &self.accent.with_alpha(0.65).to_css());
                let _ = grad.add_color_stop(1.0, "rgba(0,0,0,0)");
                ctx.set_fill_style_canvas_gradient(&grad);
            } else {
                ctx.set_fill_style_str(&self.accent.to_css());
            }
            ctx.begin_path();
            let _ = ctx.arc(x, y, p.size as f64, 0.0, TAU);
            ctx.fill();
        }
    }

    fn pointer_move(&mut self, pos: Vec2, now_ms: f64) {
        self.tracker.sample(pos, now_ms);
        self.field
            .pointer_moved(pos, self.tracker.pulse_gain(), now_ms);
    }

    fn pointer_down(&mut self, pos: Vec2, now_ms: f64) {
        self.field.pointer_pressed(pos, now_ms);
    }

    fn resize(&mut self, _bounds: SurfaceBounds) {
        // Re-measure through the canvas so the backing store follows.
        self.bounds = dom::sync_canvas_backing_size(&self.canvas);
        self.field.resize(self.bounds);
    }
}
