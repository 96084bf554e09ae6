//! Hero-section 3D background component.
//!
//! Wires the core scene to the instanced WebGPU renderer. GPU setup is
//! async; until the device arrives (or if it never does) the effect ticks
//! but renders nothing. The canvas starts transparent and fades in once
//! the intro reports completion.

use crate::boot::BootState;
use crate::dom;
use crate::render::GpuState;
use crate::runtime::{EffectRuntime, PointerWiring, RuntimeOptions, SurfaceEffect};
use folio_core::color::{self, Rgba};
use folio_core::{Camera, HeroInstance, HeroPalette, HeroScene, SurfaceBounds};
use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct HeroBackground {
    canvas: web::HtmlCanvasElement,
    scene: HeroScene,
    gpu: Rc<RefCell<Option<GpuState>>>,
    bounds: SurfaceBounds,
    instances: Vec<HeroInstance>,
}

/// Mounts the hero background on `#hero-canvas`, if present.
pub fn mount(boot: &BootState, seed: u64) -> Option<EffectRuntime> {
    let document = dom::document()?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("hero-canvas")?
        .dyn_into()
        .ok()?;

    let bounds = dom::sync_canvas_backing_size(&canvas);
    let palette = read_palette(&canvas);

    // Hidden until the intro is out of the way, then a CSS fade.
    let style = canvas.style();
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transition", "opacity 0.7s ease-out");
    {
        let canvas = canvas.clone();
        boot.on_intro_finished(move || {
            let _ = canvas.style().set_property("opacity", "1");
        });
    }

    let gpu: Rc<RefCell<Option<GpuState>>> = Rc::new(RefCell::new(None));
    {
        let gpu = gpu.clone();
        let canvas = canvas.clone();
        spawn_local(async move {
            match GpuState::new(&canvas).await {
                Ok(state) => *gpu.borrow_mut() = Some(state),
                // Capability absence: the hero stays blank.
                Err(e) => log::warn!("hero renderer unavailable: {e:?}"),
            }
        });
    }

    let effect = HeroBackground {
        scene: HeroScene::new(palette, seed),
        gpu,
        bounds,
        instances: Vec::new(),
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

fn read_palette(canvas: &web::HtmlCanvasElement) -> HeroPalette {
    let defaults = HeroPalette::default();
    let read = |name: &str, fallback: Vec3| -> Vec3 {
        match dom::css_var(canvas, name) {
            Some(raw) => {
                let rgba = color::parse_or(&raw, to_rgba(fallback));
                Vec3::from_slice(&rgba.to_linear_f32()[..3])
            }
            None => fallback,
        }
    };
    HeroPalette {
        accent: read("--accent", defaults.accent),
        accent2: read("--accent2", defaults.accent2),
        accent3: read("--accent3", defaults.accent3),
    }
}

fn to_rgba(v: Vec3) -> Rgba {
    Rgba::opaque(
        (v.x * 255.0) as u8,
        (v.y * 255.0) as u8,
        (v.z * 255.0) as u8,
    )
}

impl HeroBackground {
    fn camera(&self) -> Camera {
        let aspect = self.bounds.width / self.bounds.height.max(1.0);
        Camera::hero(aspect)
    }
}

impl SurfaceEffect for HeroBackground {
    fn tick(&mut self, dt_ms: f64, _now_ms: f64) {
        self.scene.tick((dt_ms / 1000.0) as f32);
    }

    fn render(&mut self) {
        let mut gpu = self.gpu.borrow_mut();
        let Some(gpu) = gpu.as_mut() else {
            return;
        };
        self.scene.instances(&mut self.instances);
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        if let Err(e) = gpu.render(self.camera().view_proj(), &self.instances) {
            log::error!("hero render error: {e:?}");
        }
    }

    fn pointer_down(&mut self, pos: Vec2, _now_ms: f64) {
        let camera = self.camera();
        self.scene
            .press(&camera, pos, self.bounds.width, self.bounds.height);
    }

    fn resize(&mut self, _bounds: SurfaceBounds) {
        self.bounds = dom::sync_canvas_backing_size(&self.canvas);
    }
}
