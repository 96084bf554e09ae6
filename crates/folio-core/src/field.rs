//! The 2D ambient particle field.
//!
//! Entities drift with a deterministic breathing term, get pushed around by
//! pointer pulses, and are pulled weakly back toward the surface center.
//! The per-frame order is contractual: prune pulses, apply forces,
//! integrate, confine, damp-and-clamp. Rendering consumes the particle
//! slice as a plain snapshot; nothing here draws.

use crate::constants::*;
use crate::pulse::{Pulse, PulseQueue};
use crate::surface::{BoundaryPolicy, SurfaceBounds};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Additive lighten offset for the dot highlight.
    pub hue_shift: f32,
    phase: f32,
    drift: f32,
}

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub max_particles: usize,
    pub density_per_px2: f32,
    pub particle_size: f32,
    pub link_distance: f32,
    pub pulse_radius: f32,
    pub pulse_strength: f32,
    pub damping: f32,
    pub max_speed: f32,
    pub center_pull: f32,
    pub boundary: BoundaryPolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: FIELD_MAX_PARTICLES,
            density_per_px2: FIELD_DENSITY_PER_PX2,
            particle_size: FIELD_PARTICLE_SIZE,
            link_distance: FIELD_LINK_DISTANCE,
            pulse_radius: PULSE_RADIUS,
            pulse_strength: PULSE_STRENGTH,
            damping: FIELD_DAMPING,
            max_speed: FIELD_MAX_SPEED,
            center_pull: FIELD_CENTER_PULL,
            boundary: BoundaryPolicy::Wrap {
                margin: FIELD_WRAP_MARGIN,
            },
        }
    }
}

pub struct ParticleField {
    bounds: SurfaceBounds,
    config: FieldConfig,
    particles: Vec<Particle>,
    pulses: PulseQueue,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(bounds: SurfaceBounds, config: FieldConfig, seed: u64) -> Self {
        let mut field = Self {
            bounds,
            config,
            particles: Vec::new(),
            pulses: PulseQueue::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        field.populate();
        field
    }

    /// Particle count derived from surface area, clamped into
    /// `[FIELD_MIN_PARTICLES, max_particles]`.
    pub fn target_count(&self) -> usize {
        let computed = (self.bounds.area() * self.config.density_per_px2).round() as usize;
        computed
            .max(FIELD_MIN_PARTICLES)
            .min(self.config.max_particles)
    }

    fn populate(&mut self) {
        let count = self.target_count();
        let (w, h) = (self.bounds.width.max(1.0), self.bounds.height.max(1.0));
        let size = self.config.particle_size;
        self.particles.clear();
        for _ in 0..count {
            let speed = self.rng.gen_range(0.1..0.7);
            self.particles.push(Particle {
                pos: Vec2::new(self.rng.gen_range(0.0..w), self.rng.gen_range(0.0..h)),
                vel: Vec2::new(
                    self.rng.gen_range(-speed..speed),
                    self.rng.gen_range(-speed..speed),
                ),
                size: self.rng.gen_range(size * 0.6..size * 1.6),
                hue_shift: self.rng.gen_range(-20.0..20.0),
                phase: self.rng.gen_range(0.0..std::f32::consts::TAU),
                drift: self.rng.gen_range(0.0004..0.0012),
            });
        }
    }

    /// Replaces the population for a new surface size. Density is
    /// area-derived, so the old layout is fully discarded.
    pub fn resize(&mut self, bounds: SurfaceBounds) {
        self.bounds = bounds;
        self.populate();
    }

    pub fn pointer_moved(&mut self, pos: Vec2, gain: f32, now_ms: f64) {
        self.pulses.push(Pulse::moved(pos, now_ms, gain));
    }

    pub fn pointer_pressed(&mut self, pos: Vec2, now_ms: f64) {
        self.pulses.push(Pulse::pressed(pos, now_ms));
    }

    pub fn tick(&mut self, dt_ms: f64, now_ms: f64) {
        let dt_ms = dt_ms.clamp(0.0, DT_CLAMP_MS);
        let step = (dt_ms / DT_REF_MS) as f32;
        let dt = dt_ms as f32;
        let center = self.bounds.center();
        let cfg = &self.config;

        // 1. prune, so expired pulses never reach the apply stage
        self.pulses.prune(now_ms);

        for p in &mut self.particles {
            // 2a. ambient breathing drift
            p.phase += p.drift * dt;
            p.vel.x += p.phase.cos() * FIELD_BREATHING_ACCEL * dt;
            p.vel.y += p.phase.sin() * FIELD_BREATHING_ACCEL * dt;

            // 2b. pulse influence
            for pulse in self.pulses.iter() {
                p.vel += pulse.influence(p.pos, cfg.pulse_radius, cfg.pulse_strength, now_ms)
                    * step;
            }

            // 2c. weak recentering against long-term drift
            p.vel += (center - p.pos) * cfg.center_pull * dt;

            // 3. integrate
            p.pos += p.vel * step;

            // 4. confine
            p.pos = cfg.boundary.confine(p.pos, &self.bounds);

            // 5. damp, then clamp component-wise
            p.vel *= cfg.damping;
            p.vel.x = p.vel.x.clamp(-cfg.max_speed, cfg.max_speed);
            p.vel.y = p.vel.y.clamp(-cfg.max_speed, cfg.max_speed);
        }
    }

    /// Plain per-frame snapshot; the renderer projects this.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Link alpha for a particle pair, `None` past the link distance.
    pub fn link_alpha(&self, a: Vec2, b: Vec2) -> Option<f32> {
        let dist = (a - b).length();
        if dist < self.config.link_distance {
            Some(0.45 * (1.0 - dist / self.config.link_distance))
        } else {
            None
        }
    }
}
