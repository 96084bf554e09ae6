//! Skills playground component: physics-driven skill cards.
//!
//! The rigid-body world lives in the core crate; this component creates one
//! absolutely-positioned card node per skill, arms the entry cascade when
//! the container scrolls into view, and maps pointer drag/throw gestures
//! onto the simulation.

use crate::dom;
use crate::runtime::{EffectRuntime, PointerWiring, RuntimeOptions, SurfaceEffect};
use folio_core::constants::CARD_SIZE;
use folio_core::{CardState, PlaygroundConfig, SkillsWorld};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Skill labels with their badge colors.
const SKILLS: &[(&str, &str)] = &[
    ("HTML", "#e44d26"),
    ("CSS", "#2965f1"),
    ("JavaScript", "#facc15"),
    ("TypeScript", "#3178c6"),
    ("React", "#61dafb"),
    ("Next.js", "#7c3aed"),
    ("Tailwind CSS", "#38bdf8"),
    ("Framer Motion", "#8b5cf6"),
    ("Node.js", "#22c55e"),
    ("Express.js", "#6b7280"),
    ("REST APIs", "#0ea5e9"),
    ("NextAuth.js", "#fbbf24"),
    ("JWT", "#f97316"),
    ("MongoDB", "#10b981"),
    ("Mongoose", "#059669"),
    ("PostgreSQL", "#336791"),
    ("Prisma", "#0c344b"),
    ("SaaS Architecture", "#38bdf8"),
    ("Razorpay", "#0ea5e9"),
    ("Webhooks", "#14b8a6"),
    ("Git", "#ef4444"),
    ("GitHub", "#181717"),
    ("Postman", "#ff6c37"),
    ("Axios", "#4aa3ff"),
    ("Python", "#3776ab"),
    ("Java", "#b07219"),
];

struct DragSample {
    pos: Vec2,
    at_ms: f64,
}

struct PlaygroundEffect {
    container: web::Element,
    world: SkillsWorld,
    nodes: Vec<web::HtmlElement>,
    states: Vec<CardState>,
    pending_start: bool,
    revealed: bool,
    last_sample: Option<DragSample>,
}

/// Mounts the playground on `#skills-playground`, if present. Under
/// reduced motion no cards are created at all.
pub fn mount(seed: u64) -> Option<EffectRuntime> {
    if dom::prefers_reduced_motion() {
        return None;
    }
    let document = dom::document()?;
    let container = document.get_element_by_id("skills-playground")?;
    let rect = container.get_bounding_client_rect();
    let (width, height) = (rect.width() as f32, rect.height() as f32);

    let world = SkillsWorld::new(PlaygroundConfig {
        card_count: SKILLS.len(),
        width: width.max(1.0),
        height: height.max(1.0),
        seed,
    });

    let mut nodes = Vec::with_capacity(SKILLS.len());
    for &(label, color) in SKILLS {
        if let Some(node) = make_card(&document, &container, label, color) {
            nodes.push(node);
        }
    }

    let effect = PlaygroundEffect {
        container: container.clone(),
        world,
        nodes,
        states: Vec::new(),
        pending_start: false,
        revealed: false,
        last_sample: None,
    };
    EffectRuntime::launch(
        container,
        Box::new(effect),
        RuntimeOptions {
            pointer: PointerWiring::Surface,
            observe_visibility: true,
            track_resize: true,
        },
    )
}

fn make_card(
    document: &web::Document,
    container: &web::Element,
    label: &str,
    color: &str,
) -> Option<web::HtmlElement> {
    let el: web::HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    el.set_text_content(Some(label));
    let _ = el.set_attribute("role", "button");
    let _ = el.set_attribute("aria-label", label);
    let _ = el.set_attribute(
        "style",
        &format!(
            "position:absolute;left:0;top:0;width:{CARD_SIZE}px;height:{CARD_SIZE}px;\
             display:flex;align-items:center;justify-content:center;text-align:center;\
             border-radius:8px;font-weight:800;user-select:none;touch-action:none;\
             will-change:transform;opacity:0;transition:opacity 0.3s ease-out;\
             transform:translate3d(-9999px,-9999px,0);background:{color};"
        ),
    );
    let _ = container.append_child(&el);
    Some(el)
}

impl SurfaceEffect for PlaygroundEffect {
    fn tick(&mut self, dt_ms: f64, now_ms: f64) {
        if self.pending_start && !self.world.started() {
            self.world.start(now_ms);
        }
        self.world.tick((dt_ms / 1000.0) as f32, now_ms);
    }

    fn render(&mut self) {
        if !self.world.started() {
            return;
        }
        if !self.revealed {
            for node in &self.nodes {
                let _ = node.style().set_property("opacity", "1");
            }
            self.revealed = true;
        }
        self.world.card_states(&mut self.states);
        let half = CARD_SIZE / 2.0;
        for (node, state) in self.nodes.iter().zip(&self.states) {
            let _ = node.style().set_property(
                "transform",
                &format!(
                    "translate3d({}px, {}px, 0) rotate({}rad)",
                    state.x - half,
                    state.y - half,
                    state.angle
                ),
            );
        }
    }

    fn pointer_down(&mut self, pos: Vec2, now_ms: f64) {
        if let Some(index) = self.world.card_at(pos.x, pos.y) {
            self.world.begin_drag(index, pos.x, pos.y);
            self.last_sample = Some(DragSample { pos, at_ms: now_ms });
        }
    }

    fn pointer_move(&mut self, pos: Vec2, now_ms: f64) {
        if self.world.dragging().is_some() {
            self.world.drag_to(pos.x, pos.y);
            self.last_sample = Some(DragSample { pos, at_ms: now_ms });
        }
    }

    fn pointer_up(&mut self, pos: Vec2, now_ms: f64) {
        if self.world.dragging().is_none() {
            return;
        }
        // Release velocity from the displacement since the last sample.
        let (vx, vy) = match &self.last_sample {
            Some(sample) => {
                let dt = (now_ms - sample.at_ms).max(8.0) as f32;
                ((pos.x - sample.pos.x) / dt, (pos.y - sample.pos.y) / dt)
            }
            None => (0.0, 0.0),
        };
        self.world.end_drag(vx, vy);
        self.last_sample = None;
    }

    fn resize(&mut self, _bounds: folio_core::SurfaceBounds) {
        let rect = self.container.get_bounding_client_rect();
        self.world
            .resize(rect.width() as f32, rect.height() as f32);
    }

    fn visibility_changed(&mut self, visible: bool) {
        if visible {
            self.pending_start = true;
        }
    }
}
