#![cfg(target_arch = "wasm32")]

//! WASM entry point for the portfolio front-end.
//!
//! Each component mounts against an optional DOM anchor and is skipped
//! silently when its anchor is absent:
//!
//! - `#hero-canvas`: instanced WebGPU hero background
//! - `#ambient-canvas`: 2D particle background
//! - `#skills-playground`: physics skill cards
//! - `#contact-form` (+ fields): mail-relay contact form
//! - `[data-header]` / `[data-nav-link]`: navigation wiring
//! - the intro overlay and cursor trail create their own nodes
//!
//! All mounted components live in a page-lifetime registry; dropping it
//! (or any single component) cancels frames and detaches listeners.

mod background;
mod boot;
mod contact;
mod cursor;
mod dom;
mod hero;
mod intro;
mod navbar;
mod playground;
mod render;
mod runtime;

use boot::BootState;
use runtime::EffectRuntime;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

struct App {
    _intro: Option<EffectRuntime>,
    _hero: Option<EffectRuntime>,
    _background: Option<EffectRuntime>,
    _playground: Option<EffectRuntime>,
    _cursor: Option<cursor::CursorTrailComponent>,
    _navbar: Option<navbar::Navbar>,
    _contact: Option<contact::ContactForm>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    match init() {
        Ok(app) => {
            APP.with(|slot| *slot.borrow_mut() = Some(app));
            Ok(())
        }
        Err(e) => {
            log::error!("init error: {e:?}");
            // Visual components are non-essential; never fail the page.
            Ok(())
        }
    }
}

fn init() -> anyhow::Result<App> {
    let _window = dom::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let _document = dom::document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let boot = BootState::attach();
    let seed = js_sys::Date::now() as u64;

    // The intro mounts first so its scroll lock lands before first paint of
    // the sections below it.
    let intro = intro::mount(&boot);

    Ok(App {
        _intro: intro,
        _hero: hero::mount(&boot, seed ^ 0x9e37_79b9),
        _background: background::mount(seed ^ 0x7f4a_7c15),
        _playground: playground::mount(seed ^ 0x85eb_ca6b),
        _cursor: cursor::mount(),
        _navbar: navbar::mount(),
        _contact: contact::mount(),
    })
}
