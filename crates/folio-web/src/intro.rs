//! Staged intro overlay.
//!
//! Projects the core intro state machine onto a full-viewport overlay:
//! greeting words cycle, a curtain covers then reveals, and on completion
//! document scrolling is restored, the boot state flips, and the overlay
//! unmounts itself. Document scrolling is suspended for the duration with
//! scrollbar-width compensation so the page does not shift.

use crate::boot::BootState;
use crate::dom;
use crate::runtime::{EffectRuntime, PointerWiring, RuntimeOptions, SurfaceEffect};
use folio_core::{IntroConfig, IntroEvent, IntroPhase, IntroSequence};
use wasm_bindgen::JsCast;
use web_sys as web;

const BODY_STYLE_KEYS: [&str; 7] = [
    "position",
    "top",
    "left",
    "right",
    "width",
    "overflow",
    "padding-right",
];

struct ScrollLock {
    saved: Vec<(String, String)>,
    scroll_y: f64,
}

impl ScrollLock {
    /// Freezes document scrolling, keeping the visual offset, before the
    /// overlay's first paint.
    fn engage(body: &web::HtmlElement) -> Option<Self> {
        let win = dom::window()?;
        let document = dom::document()?;
        let scroll_y = win.page_y_offset().unwrap_or(0.0);

        let style = body.style();
        let saved = BODY_STYLE_KEYS
            .iter()
            .map(|k| ((*k).to_string(), style.get_property_value(k).unwrap_or_default()))
            .collect();

        // Compensate for the vanishing scrollbar.
        let inner = win.inner_width().ok()?.as_f64().unwrap_or(0.0);
        let client = document
            .document_element()
            .map(|root| root.client_width() as f64)
            .unwrap_or(inner);
        let scrollbar = inner - client;
        if scrollbar > 0.0 {
            let _ = style.set_property("padding-right", &format!("{scrollbar}px"));
        }

        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("top", &format!("-{}px", scroll_y.round()));
        let _ = style.set_property("left", "0");
        let _ = style.set_property("right", "0");
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("overflow", "hidden");

        Some(Self { saved, scroll_y })
    }

    /// Restores the saved inline styles and the prior scroll offset.
    fn release(self, body: &web::HtmlElement) {
        let style = body.style();
        for (key, value) in &self.saved {
            if value.is_empty() {
                let _ = style.remove_property(key);
            } else {
                let _ = style.set_property(key, value);
            }
        }
        if let Some(win) = dom::window() {
            win.scroll_to_with_x_and_y(0.0, self.scroll_y);
        }
    }
}

struct IntroOverlay {
    sequence: IntroSequence,
    overlay: web::Element,
    word_el: web::Element,
    curtain: web::HtmlElement,
    backdrop: web::HtmlElement,
    boot: BootState,
    lock: Option<ScrollLock>,
    done: bool,
}

/// Runs the intro once per page load; a remount after completion (root
/// class present) skips straight to done. Under reduced motion the intro
/// is skipped entirely and downstream entrances begin immediately.
pub fn mount(boot: &BootState) -> Option<EffectRuntime> {
    if boot.intro_done() || dom::prefers_reduced_motion() {
        boot.mark_intro_finished();
        return None;
    }
    let document = dom::document()?;
    let body = document.body()?;

    let overlay = document.create_element("div").ok()?;
    let _ = overlay.set_attribute("id", "intro-splash");
    let _ = overlay.set_attribute("aria-hidden", "true");
    let _ = overlay.set_attribute(
        "style",
        "position:fixed;inset:0;z-index:2147483000;overflow:hidden;",
    );

    let backdrop: web::HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    let _ = backdrop.set_attribute(
        "style",
        "position:absolute;inset:0;background:#04130c;display:flex;\
         align-items:center;justify-content:center;",
    );
    let word_el = document.create_element("div").ok()?;
    let _ = word_el.set_attribute(
        "style",
        "color:#d9ffe9;font-size:3rem;font-weight:700;letter-spacing:0.04em;",
    );
    let _ = backdrop.append_child(&word_el);
    let _ = overlay.append_child(&backdrop);

    let curtain: web::HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    let _ = curtain.set_attribute(
        "style",
        "position:absolute;inset:0;background:#0b3d2e;\
         transform:translateY(100%);will-change:transform;",
    );
    let _ = overlay.append_child(&curtain);
    let _ = body.append_child(&overlay);

    let sequence = IntroSequence::new(IntroConfig::default());
    word_el.set_text_content(Some(sequence.current_word()));

    let lock = ScrollLock::engage(&body);

    let effect = IntroOverlay {
        sequence,
        overlay: overlay.clone(),
        word_el,
        curtain,
        backdrop,
        boot: boot.clone(),
        lock,
        done: false,
    };
    let runtime = EffectRuntime::launch(
        overlay,
        Box::new(effect),
        RuntimeOptions {
            pointer: PointerWiring::None,
            // The overlay covers the viewport; no visibility gating, and
            // its geometry is static.
            observe_visibility: false,
            track_resize: false,
        },
    );
    if runtime.is_none() {
        // Reduced-motion raced the check above; clean up and skip.
        boot.mark_intro_finished();
    }
    runtime
}

impl IntroOverlay {
    fn finish(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        if let Some(body) = dom::document().and_then(|d| d.body()) {
            if let Some(lock) = self.lock.take() {
                lock.release(&body);
            }
        }
        self.boot.mark_intro_finished();
        self.overlay.remove();
    }
}

impl SurfaceEffect for IntroOverlay {
    fn tick(&mut self, dt_ms: f64, _now_ms: f64) {
        for event in self.sequence.tick(dt_ms) {
            match event {
                IntroEvent::WordChanged(_) => {
                    self.word_el
                        .set_text_content(Some(self.sequence.current_word()));
                }
                IntroEvent::CoverStarted => {
                    let _ = self.backdrop.style().set_property("opacity", "0.35");
                    let style = self.curtain.style();
                    let _ = style.set_property(
                        "transition",
                        &format!("transform {}ms ease-in", self.sequence.cover_ms()),
                    );
                    let _ = style.set_property("transform", "translateY(0)");
                }
                IntroEvent::RevealStarted => {
                    let style = self.curtain.style();
                    let _ = style.set_property(
                        "transition",
                        &format!("transform {}ms ease-out", self.sequence.reveal_ms()),
                    );
                    let _ = style.set_property("transform", "translateY(-100%)");
                }
                IntroEvent::Finished => self.finish(),
            }
        }
    }

    fn render(&mut self) {}

    fn finished(&self) -> bool {
        self.sequence.phase() == IntroPhase::Done
    }
}

/// The overlay restores scrolling even if torn down mid-sequence.
impl Drop for IntroOverlay {
    fn drop(&mut self) {
        if !self.done {
            self.finish();
        }
    }
}
