//! Pointer disturbances.
//!
//! Every qualifying pointer event appends a pulse; a bounded queue keeps the
//! most recent ones. Within a frame, expired pulses are pruned before any
//! influence is applied; a pulse past its life never touches a velocity in
//! the following frame.

use crate::constants::{
    PULSE_LIFE_MS, PULSE_QUEUE_CAP, PULSE_STRONG_LIFE_MS, PULSE_STRONG_RADIUS_SCALE,
    PULSE_STRONG_STRENGTH_SCALE,
};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug)]
pub struct Pulse {
    pub origin: Vec2,
    pub created_ms: f64,
    pub life_ms: f64,
    pub strong: bool,
    /// Strength multiplier derived from pointer speed at creation.
    pub gain: f32,
}

impl Pulse {
    pub fn moved(origin: Vec2, now_ms: f64, gain: f32) -> Self {
        Self {
            origin,
            created_ms: now_ms,
            life_ms: PULSE_LIFE_MS,
            strong: false,
            gain,
        }
    }

    pub fn pressed(origin: Vec2, now_ms: f64) -> Self {
        Self {
            origin,
            created_ms: now_ms,
            life_ms: PULSE_STRONG_LIFE_MS,
            strong: true,
            gain: 1.0,
        }
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.created_ms > self.life_ms
    }

    /// Fraction of life remaining, 1 at creation to 0 at expiry.
    pub fn remaining(&self, now_ms: f64) -> f32 {
        (1.0 - (now_ms - self.created_ms) / self.life_ms).clamp(0.0, 1.0) as f32
    }

    /// Velocity contribution for an entity at `pos`: radial push away from
    /// the origin with linear distance falloff, scaled by strength and by
    /// remaining age.
    pub fn influence(&self, pos: Vec2, radius: f32, strength: f32, now_ms: f64) -> Vec2 {
        let radius = radius * if self.strong { PULSE_STRONG_RADIUS_SCALE } else { 1.0 };
        let delta = pos - self.origin;
        let dist = delta.length();
        if dist >= radius {
            return Vec2::ZERO;
        }
        let fall = 1.0 - dist / radius;
        let strength = strength
            * if self.strong { PULSE_STRONG_STRENGTH_SCALE } else { 1.0 }
            * self.gain
            * fall
            * self.remaining(now_ms);
        if dist > f32::EPSILON {
            delta / dist * strength
        } else {
            // Entity exactly on the origin: push it somewhere deterministic.
            Vec2::new(strength, 0.0)
        }
    }
}

/// Bounded rolling window of pulses; pushing past the cap evicts the oldest.
#[derive(Default)]
pub struct PulseQueue {
    pulses: SmallVec<[Pulse; PULSE_QUEUE_CAP]>,
}

impl PulseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pulse: Pulse) {
        if self.pulses.len() >= PULSE_QUEUE_CAP {
            self.pulses.remove(0);
        }
        self.pulses.push(pulse);
    }

    /// Drops expired pulses. Must run before `iter` is consulted each frame.
    pub fn prune(&mut self, now_ms: f64) {
        self.pulses.retain(|p| !p.expired(now_ms));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pulse> {
        self.pulses.iter()
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    pub fn clear(&mut self) {
        self.pulses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_evicts_oldest_beyond_cap() {
        let mut q = PulseQueue::new();
        for i in 0..(PULSE_QUEUE_CAP + 4) {
            q.push(Pulse::moved(Vec2::new(i as f32, 0.0), i as f64, 1.0));
        }
        assert_eq!(q.len(), PULSE_QUEUE_CAP);
        // The four oldest are gone.
        assert!((q.iter().next().unwrap().origin.x - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn prune_removes_expired_only() {
        let mut q = PulseQueue::new();
        q.push(Pulse::moved(Vec2::ZERO, 0.0, 1.0));
        q.push(Pulse::pressed(Vec2::ZERO, 0.0));
        // Move pulses live 600ms, press pulses 900ms.
        q.prune(700.0);
        assert_eq!(q.len(), 1);
        assert!(q.iter().next().unwrap().strong);
        q.prune(1000.0);
        assert!(q.is_empty());
    }

    #[test]
    fn influence_is_zero_outside_radius_and_decays_with_age() {
        let p = Pulse::pressed(Vec2::ZERO, 0.0);
        let far = p.influence(Vec2::new(1000.0, 0.0), 120.0, 1.2, 10.0);
        assert_eq!(far, Vec2::ZERO);
        let fresh = p.influence(Vec2::new(30.0, 0.0), 120.0, 1.2, 0.0);
        let stale = p.influence(Vec2::new(30.0, 0.0), 120.0, 1.2, 800.0);
        assert!(fresh.length() > stale.length());
        // Push points away from the origin.
        assert!(fresh.x > 0.0);
    }
}
