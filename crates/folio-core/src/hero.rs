//! The hero-section 3D scene: a few feature shapes drifting inside a
//! bounded cube, tumbling slowly, cycling emissive colors, and reacting to
//! pointer presses with an impulse along the pick ray.
//!
//! The scene holds no GPU state. Each tick produces packed instances for
//! the renderer's instanced draw.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::prelude::*;

/// Right-handed perspective camera; shared between rendering and picking.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn hero(aspect: f32) -> Self {
        Self {
            eye: Vec3::from(HERO_CAMERA_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: HERO_CAMERA_FOVY_DEG.to_radians(),
            znear: HERO_CAMERA_ZNEAR,
            zfar: HERO_CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Unprojects a surface-pixel position into a world-space ray.
pub fn screen_to_world_ray(camera: &Camera, surface: Vec2, width: f32, height: f32) -> (Vec3, Vec3) {
    let ndc_x = (2.0 * surface.x / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * surface.y / height.max(1.0));
    let inv = camera.view_proj().inverse();
    let p_near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p0 = p_near.truncate() / p_near.w;
    let p1 = p_far.truncate() / p_far.w;
    (p0, (p1 - p0).normalize())
}

/// Distance along the ray to the first intersection, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeRole {
    Cube,
    Prism,
    Sphere,
    Accent,
}

#[derive(Clone, Copy, Debug)]
pub struct HeroPalette {
    pub accent: Vec3,
    pub accent2: Vec3,
    pub accent3: Vec3,
}

impl Default for HeroPalette {
    fn default() -> Self {
        Self {
            accent: Vec3::new(0.212, 0.941, 0.839),  // #36f0d6
            accent2: Vec3::new(1.0, 0.4, 0.8),       // #ff66cc
            accent3: Vec3::new(1.0, 0.82, 0.4),      // #ffd166
        }
    }
}

impl HeroPalette {
    fn colors(&self) -> [Vec3; 3] {
        [self.accent, self.accent2, self.accent3]
    }
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub role: ShapeRole,
    pub pos: Vec3,
    pub vel: Vec3,
    pub rot_x: f32,
    pub rot_y: f32,
    pub scale: f32,
    color: Vec3,
    target: Vec3,
    lerp: f32,
    pulse: f32,
    last_flip_sign: f32,
}

/// Packed per-instance data for the instanced quad draw. Layout must match
/// the vertex attributes declared by the renderer.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HeroInstance {
    pub pos: [f32; 3],
    pub scale: f32,
    pub color: [f32; 4],
    pub emissive: f32,
}

pub struct HeroScene {
    shapes: Vec<Shape>,
    palette: HeroPalette,
    time: f32,
    noise_offset: f32,
    rng: StdRng,
}

impl HeroScene {
    pub fn new(palette: HeroPalette, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut shapes = vec![
            Shape::feature(ShapeRole::Cube, Vec3::new(-6.0, 0.0, 0.0),
                Vec3::new(0.01, 0.003, 0.007), HERO_FEATURE_SIZE, palette.accent),
            Shape::feature(ShapeRole::Prism, Vec3::new(4.0, -1.0, 2.0),
                Vec3::new(-0.006, 0.004, -0.004), HERO_FEATURE_SIZE * 0.8, palette.accent2),
            Shape::feature(ShapeRole::Sphere, Vec3::new(0.0, 3.2, -2.5),
                Vec3::new(0.006, -0.006, 0.005), HERO_FEATURE_SIZE * 0.46, palette.accent3),
        ];
        for i in 0..HERO_ACCENT_COUNT {
            let color = if i % 2 == 0 { palette.accent } else { palette.accent2 };
            shapes.push(Shape::feature(
                ShapeRole::Accent,
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 14.0,
                    (rng.gen::<f32>() - 0.5) * 6.0,
                    (rng.gen::<f32>() - 0.5) * 6.0,
                ),
                Vec3::ZERO,
                0.12 + rng.gen::<f32>() * 0.12,
                color,
            ));
        }
        let noise_offset = rng.gen::<f32>() * 1000.0;
        Self {
            shapes,
            palette,
            time: 0.0,
            noise_offset,
            rng,
        }
    }

    pub fn tick(&mut self, dt_sec: f32) {
        let dt = dt_sec.clamp(0.0, 0.1);
        self.time += dt;
        let t = self.time;
        let noise = self.noise_offset;
        let palette = self.palette;
        for (idx, shape) in self.shapes.iter_mut().enumerate() {
            if shape.role == ShapeRole::Accent {
                continue;
            }
            let i = idx as f32;
            shape.vel.x += (t * (0.12 + i * 0.02) + i * 0.7 + noise).sin() * 0.0022;
            shape.vel.y += (t * (0.10 + i * 0.015) + i * 0.6 + noise * 0.4).cos() * 0.0019;
            shape.vel.z += (t * (0.095 + i * 0.01) + i * 0.5 + noise * 0.28).sin() * 0.0019;
            shape.vel *= HERO_DAMPING;
            shape.pos += shape.vel * (dt * HERO_SPEED_SCALE);
            shape.rot_x += 0.02 * dt * (0.5 + i * 0.03);
            shape.rot_y += 0.018 * dt * (0.5 + i * 0.03);
            shape.wrap();
            shape.advance_color(dt, &palette, &mut self.rng);
        }
    }

    /// A pointer press casts a ray into the scene; the nearest feature shape
    /// hit receives an impulse along the ray direction.
    pub fn press(&mut self, camera: &Camera, surface: Vec2, width: f32, height: f32) -> bool {
        let (origin, dir) = screen_to_world_ray(camera, surface, width, height);
        let mut best: Option<(usize, f32)> = None;
        for (i, shape) in self.shapes.iter().enumerate() {
            if shape.role == ShapeRole::Accent {
                continue;
            }
            let radius = shape.scale.max(HERO_PICK_RADIUS);
            if let Some(t) = ray_sphere(origin, dir, shape.pos, radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        if let Some((i, _)) = best {
            let magnitude = HERO_IMPULSE_BASE + self.rng.gen::<f32>() * HERO_IMPULSE_SPREAD;
            self.shapes[i].vel += dir * magnitude;
            self.shapes[i].pulse = 1.4;
            true
        } else {
            false
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Packed instances for the renderer, one quad per shape.
    pub fn instances(&self, out: &mut Vec<HeroInstance>) {
        out.clear();
        for shape in &self.shapes {
            out.push(HeroInstance {
                pos: shape.pos.to_array(),
                scale: shape.scale,
                color: Vec4::from((shape.color, 1.0)).to_array(),
                emissive: HERO_EMISSIVE_BASE + shape.pulse * HERO_EMISSIVE_PULSE_SPAN,
            });
        }
    }
}

impl Shape {
    fn feature(role: ShapeRole, pos: Vec3, vel: Vec3, scale: f32, color: Vec3) -> Self {
        Self {
            role,
            pos,
            vel,
            rot_x: 0.0,
            rot_y: 0.0,
            scale,
            color,
            target: color,
            lerp: 1.0,
            pulse: 0.0,
            last_flip_sign: 0.0,
        }
    }

    fn wrap(&mut self) {
        let b = HERO_BOUNDS;
        let off = HERO_WRAP_MARGIN;
        for axis in 0..3 {
            let v = self.pos[axis];
            if v < -b {
                self.pos[axis] = b - off;
            } else if v > b {
                self.pos[axis] = -b + off;
            }
        }
    }

    /// When the tumble's yaw sign flips, pick a new palette target and lerp
    /// toward it while an emissive pulse decays.
    fn advance_color(&mut self, dt: f32, palette: &HeroPalette, rng: &mut StdRng) {
        let sign = if self.rot_y >= 0.0 { 1.0 } else { -1.0 };
        if sign != self.last_flip_sign && self.last_flip_sign != 0.0 {
            self.target = pick_next_color(self.color, palette, rng);
            self.lerp = 0.0;
            self.pulse = 1.4;
        }
        self.last_flip_sign = sign;

        if self.lerp < 1.0 {
            self.lerp = (self.lerp + dt * HERO_COLOR_LERP_PER_SEC).min(1.0);
            self.color = self.color.lerp(self.target, self.lerp);
        }
        if self.pulse > 0.0 {
            self.pulse = (self.pulse - dt * HERO_PULSE_DECAY_PER_SEC).max(0.0);
        }
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn pulse(&self) -> f32 {
        self.pulse
    }
}

fn pick_next_color(current: Vec3, palette: &HeroPalette, rng: &mut StdRng) -> Vec3 {
    let choices: Vec<Vec3> = palette
        .colors()
        .into_iter()
        .filter(|c| (*c - current).length_squared() > 1e-6)
        .collect();
    if choices.is_empty() {
        palette.accent
    } else {
        choices[rng.gen_range(0..choices.len())]
    }
}
