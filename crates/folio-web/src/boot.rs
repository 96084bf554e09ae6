//! Shared boot state.
//!
//! The intro's completion used to be ambient document state; here it is an
//! explicit object handed to every component that cares. The documented
//! external signals (the `intro-done` root class and the one-shot
//! `intro:finished` window event) are still emitted for outside consumers
//! (styling, third-party embeds), but no internal component reads them
//! back.

use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub const INTRO_DONE_CLASS: &str = "intro-done";
pub const INTRO_FINISHED_EVENT: &str = "intro:finished";

struct BootInner {
    intro_done: bool,
    waiters: Vec<Box<dyn FnOnce()>>,
}

/// Write-once, read-many: the intro marks itself finished exactly once and
/// every subscriber runs exactly once, immediately if already finished.
#[derive(Clone)]
pub struct BootState {
    inner: Rc<RefCell<BootInner>>,
}

impl BootState {
    /// Picks up prior completion from the root class, so a client-side
    /// remount does not replay the intro.
    pub fn attach() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BootInner {
                intro_done: dom::root_has_class(INTRO_DONE_CLASS),
                waiters: Vec::new(),
            })),
        }
    }

    pub fn intro_done(&self) -> bool {
        self.inner.borrow().intro_done
    }

    /// Runs `hook` when the intro finishes; immediately if it already has.
    pub fn on_intro_finished(&self, hook: impl FnOnce() + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.intro_done {
                inner.waiters.push(Box::new(hook));
                return;
            }
        }
        hook();
    }

    /// Marks completion: flips the flag, emits the external signals, and
    /// drains subscribers. Later calls are no-ops.
    pub fn mark_intro_finished(&self) {
        let waiters = {
            let mut inner = self.inner.borrow_mut();
            if inner.intro_done {
                return;
            }
            inner.intro_done = true;
            std::mem::take(&mut inner.waiters)
        };

        dom::root_add_class(INTRO_DONE_CLASS);
        if let Some(win) = dom::window() {
            if let Ok(ev) = web::Event::new(INTRO_FINISHED_EVENT) {
                let _ = win.dispatch_event(&ev);
            }
        }
        for hook in waiters {
            hook();
        }
    }
}
