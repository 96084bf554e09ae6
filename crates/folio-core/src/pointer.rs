//! Pointer state shared by the pointer-reactive effects.

use crate::constants::{
    POINTER_PULSE_GAIN, POINTER_PULSE_SCALE_MAX, POINTER_PULSE_SCALE_MIN, POINTER_SPEED_BLEND,
    POINTER_SPEED_MAX,
};
use glam::Vec2;

/// Last-known pointer position plus a smoothed speed estimate.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pos: Vec2,
    last_ms: f64,
    speed: f32,
    inside: bool,
    primed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one pointer sample; returns the smoothed speed in px/ms.
    pub fn sample(&mut self, pos: Vec2, now_ms: f64) -> f32 {
        if self.primed {
            let dt = (now_ms - self.last_ms).max(1.0) as f32;
            let instantaneous = ((pos - self.pos).length() / dt).min(POINTER_SPEED_MAX);
            self.speed += (instantaneous - self.speed) * POINTER_SPEED_BLEND;
        } else {
            self.primed = true;
        }
        self.pos = pos;
        self.last_ms = now_ms;
        self.inside = true;
        self.speed
    }

    pub fn leave(&mut self) {
        self.inside = false;
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn inside(&self) -> bool {
        self.inside
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Pulse-strength multiplier for the current speed: slow drifts produce
    /// gentle pulses, fast flicks stronger ones.
    pub fn pulse_gain(&self) -> f32 {
        (POINTER_PULSE_SCALE_MIN + self.speed * POINTER_PULSE_GAIN)
            .clamp(POINTER_PULSE_SCALE_MIN, POINTER_PULSE_SCALE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_estimate_rises_with_motion_and_is_clamped() {
        let mut t = PointerTracker::new();
        t.sample(Vec2::ZERO, 0.0);
        for i in 1..50 {
            // 100 px per 10 ms: well over the clamp.
            t.sample(Vec2::new(i as f32 * 100.0, 0.0), i as f64 * 10.0);
        }
        assert!(t.speed() <= POINTER_SPEED_MAX);
        assert!(t.speed() > 1.0);
        assert_eq!(t.pulse_gain(), POINTER_PULSE_SCALE_MAX);
    }

    #[test]
    fn first_sample_does_not_register_a_teleport() {
        let mut t = PointerTracker::new();
        let speed = t.sample(Vec2::new(5000.0, 5000.0), 0.0);
        assert_eq!(speed, 0.0);
    }
}
