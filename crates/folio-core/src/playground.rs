//! Physics-driven skills showcase.
//!
//! Each skill card is a rigid cuboid in a Rapier world bounded by solid
//! walls. Cards spawn above the visible surface at mutually non-overlapping
//! positions and fall in as a staggered cascade once the container becomes
//! visible. A dragged card is pinned to the pointer as a kinematic body;
//! release restores dynamics and imparts a throw velocity.

use crate::constants::*;
use rand::prelude::*;
use rapier2d::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct PlaygroundConfig {
    pub card_count: usize,
    pub width: f32,
    pub height: f32,
    pub seed: u64,
}

/// Projection data for one card: center position and display tilt.
#[derive(Clone, Copy, Debug)]
pub struct CardState {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

struct DragState {
    index: usize,
}

struct Walls {
    floor: RigidBodyHandle,
    left: RigidBodyHandle,
    right: RigidBodyHandle,
    ceiling: RigidBodyHandle,
}

pub struct SkillsWorld {
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    gravity: Vec2,

    cards: Vec<RigidBodyHandle>,
    walls: Walls,
    drag: Option<DragState>,

    width: f32,
    height: f32,
    half: f32,

    started_at_ms: Option<f64>,
    kicks_sent: usize,
    rotations_unlocked: bool,
    accumulator: f32,
    rng: StdRng,
}

/// Non-overlapping spawn positions above the surface: rejection sampling
/// with a bounded attempt budget, falling back to a deterministic grid.
pub fn spawn_positions(
    count: usize,
    width: f32,
    half: f32,
    min_spacing: f32,
    rng: &mut StdRng,
) -> Vec<(f32, f32)> {
    let mut positions: Vec<(f32, f32)> = Vec::with_capacity(count);
    let span = (width - half * 2.0).max(1.0);
    let mut attempts = 0;
    while positions.len() < count && attempts < SPAWN_MAX_ATTEMPTS {
        attempts += 1;
        let x = half + rng.gen::<f32>() * span;
        let y = SPAWN_BAND_BOTTOM - rng.gen::<f32>() * (SPAWN_BAND_BOTTOM - SPAWN_BAND_TOP).abs();
        let ok = positions
            .iter()
            .all(|&(px, py)| ((px - x).powi(2) + (py - y).powi(2)).sqrt() >= min_spacing);
        if ok {
            positions.push((x, y));
        }
    }
    if positions.len() < count {
        // Narrow surfaces can exhaust the budget; lay out a jittered grid.
        positions.clear();
        let cols = ((count as f32).sqrt().ceil() as usize).max(3);
        let block = min_spacing;
        let col_gap = ((width - 120.0) / cols as f32 - block).max(12.0);
        let start_x = 60.0 + half;
        let mut row = 0;
        while positions.len() < count {
            for col in 0..cols {
                if positions.len() >= count {
                    break;
                }
                let jitter = (rng.gen::<f32>() - 0.5) * 8.0;
                let x = (start_x + col as f32 * (block + col_gap) + jitter)
                    .clamp(half, (width - half).max(half));
                let y = -260.0 - row as f32 * (block + 18.0) - rng.gen::<f32>() * 20.0;
                positions.push((x, y));
            }
            row += 1;
        }
    }
    positions
}

impl SkillsWorld {
    pub fn new(config: PlaygroundConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let half = CARD_SIZE / 2.0;
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        let walls = build_walls(&mut bodies, &mut colliders, config.width, config.height);

        let spawns = spawn_positions(
            config.card_count,
            config.width,
            half,
            CARD_MIN_SPACING,
            &mut rng,
        );
        let mut cards = Vec::with_capacity(config.card_count);
        for &(x, y) in &spawns {
            let angle = (rng.gen::<f32>() - 0.5) * 0.06;
            let body = RigidBodyBuilder::new(RigidBodyType::Dynamic)
                .translation(Vec2::new(x, y))
                .rotation(angle)
                .linear_damping(CARD_LINEAR_DAMPING)
                .lock_rotations()
                .build();
            let handle = bodies.insert(body);
            let collider = ColliderBuilder::cuboid(half, half)
                .restitution(CARD_RESTITUTION)
                .friction(CARD_FRICTION)
                .density(CARD_DENSITY)
                .build();
            colliders.insert_with_parent(collider, handle, &mut bodies);
            cards.push(handle);
        }

        Self {
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            gravity: Vec2::new(0.0, PLAYGROUND_GRAVITY),
            cards,
            walls,
            drag: None,
            width: config.width,
            height: config.height,
            half,
            started_at_ms: None,
            kicks_sent: 0,
            rotations_unlocked: false,
            accumulator: 0.0,
            rng,
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn started(&self) -> bool {
        self.started_at_ms.is_some()
    }

    /// Arms the cascade; idempotent.
    pub fn start(&mut self, now_ms: f64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }
    }

    pub fn tick(&mut self, dt_sec: f32, now_ms: f64) {
        let Some(start_ms) = self.started_at_ms else {
            return;
        };

        // Drain due cascade kicks, one per card, staggered.
        while self.kicks_sent < self.cards.len() {
            let due = start_ms + self.kicks_sent as f64 * CASCADE_STAGGER_MS;
            if now_ms < due {
                break;
            }
            let handle = self.cards[self.kicks_sent];
            if let Some(body) = self.bodies.get_mut(handle) {
                let vx = (self.rng.gen::<f32>() - 0.5) * CASCADE_VX_JITTER;
                let vy = CASCADE_BASE_VY + self.rng.gen::<f32>() * CASCADE_VY_JITTER;
                body.set_linvel(Vec2::new(vx, vy), true);
            }
            self.kicks_sent += 1;
        }

        if !self.rotations_unlocked && now_ms - start_ms >= ROTATION_UNLOCK_MS {
            self.unlock_rotations();
        }

        self.accumulator += dt_sec.max(0.0).min(PHYSICS_BACKLOG_CAP);
        let fixed_dt = self.params.dt;
        while self.accumulator >= fixed_dt {
            self.pipeline.step(
                self.gravity,
                &self.params,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd,
                &(),
                &(),
            );
            self.accumulator -= fixed_dt;
        }
    }

    fn unlock_rotations(&mut self) {
        for &handle in &self.cards {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.lock_rotations(false, true);
                body.set_angular_damping(CARD_ANGULAR_DAMPING);
            }
        }
        self.rotations_unlocked = true;
    }

    /// Pins a card to the pointer; physics integration is suspended for it
    /// until release.
    pub fn begin_drag(&mut self, index: usize, x: f32, y: f32) {
        let Some(&handle) = self.cards.get(index) else {
            return;
        };
        let (cx, cy) = self.clamp_into_surface(x, y);
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_body_type(RigidBodyType::KinematicPositionBased, true);
            body.set_next_kinematic_position(Pose::new(Vec2::new(cx, cy), 0.0));
            self.drag = Some(DragState { index });
        }
    }

    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some(drag) = &self.drag else {
            return;
        };
        let index = drag.index;
        let (cx, cy) = clamp_into(x, y, self.half, self.width, self.height);
        if let Some(body) = self.bodies.get_mut(self.cards[index]) {
            body.set_next_kinematic_position(Pose::new(Vec2::new(cx, cy), 0.0));
        }
    }

    /// Releases the dragged card, restoring dynamics and imparting a throw
    /// velocity derived from recent pointer displacement over time (px/ms).
    pub fn end_drag(&mut self, vel_x_px_ms: f32, vel_y_px_ms: f32) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(self.cards[drag.index]) {
            body.set_body_type(RigidBodyType::Dynamic, true);
            let vx = (vel_x_px_ms * 1000.0 * THROW_GAIN).clamp(-THROW_MAX_X, THROW_MAX_X);
            let vy = (vel_y_px_ms * 1000.0 * THROW_GAIN).clamp(-THROW_MAX_UP, THROW_MAX_DOWN);
            body.set_linvel(Vec2::new(vx, vy), true);
            body.set_angvel((self.rng.gen::<f32>() - 0.5) * 0.05, true);
        }
    }

    pub fn dragging(&self) -> Option<usize> {
        self.drag.as_ref().map(|d| d.index)
    }

    fn clamp_into_surface(&self, x: f32, y: f32) -> (f32, f32) {
        clamp_into(x, y, self.half, self.width, self.height)
    }

    /// Moves the walls to a new surface size and re-seats escaped cards.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        let (w, h) = (self.width, self.height);
        let set = |bodies: &mut RigidBodySet, handle: RigidBodyHandle, x: f32, y: f32| {
            if let Some(body) = bodies.get_mut(handle) {
                body.set_translation(Vec2::new(x, y), true);
            }
        };
        set(&mut self.bodies, self.walls.floor, w / 2.0, h + 140.0);
        set(&mut self.bodies, self.walls.left, -160.0, h / 2.0);
        set(&mut self.bodies, self.walls.right, w + 160.0, h / 2.0);
        set(&mut self.bodies, self.walls.ceiling, w / 2.0, -1600.0);

        let half = self.half;
        for &handle in &self.cards {
            if let Some(body) = self.bodies.get_mut(handle) {
                let pos = body.translation();
                if pos.x < half {
                    body.set_translation(Vec2::new(half + 12.0, pos.y), true);
                } else if pos.x > w - half {
                    body.set_translation(Vec2::new(w - half - 12.0, pos.y), true);
                }
                if pos.y > h + 400.0 {
                    let x = self.rng.gen::<f32>() * w;
                    let y = -80.0 - self.rng.gen::<f32>() * 160.0;
                    body.set_translation(Vec2::new(x, y), true);
                    body.set_linvel(Vec2::new(0.0, 0.0), true);
                }
            }
        }
    }

    /// Per-card projection snapshot: centers clamped into the surface,
    /// tilt clamped to the display range.
    pub fn card_states(&self, out: &mut Vec<CardState>) {
        out.clear();
        for &handle in &self.cards {
            let Some(body) = self.bodies.get(handle) else {
                continue;
            };
            let pos = body.translation();
            let mut angle = body.rotation().angle();
            if angle.abs() > CARD_ANGLE_DISPLAY_CLAMP {
                angle = CARD_ANGLE_OVERFLOW_SNAP * angle.signum();
            }
            let (x, y) = clamp_into(pos.x, pos.y, self.half, self.width, self.height);
            out.push(CardState { x, y, angle });
        }
    }

    /// Topmost card under a surface point, if any. Tilt is small by
    /// construction, so an axis-aligned box test is sufficient for picking.
    pub fn card_at(&self, x: f32, y: f32) -> Option<usize> {
        let half = self.half;
        self.cards
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &handle)| {
                self.bodies.get(handle).is_some_and(|body| {
                    let pos = body.translation();
                    (pos.x - x).abs() <= half && (pos.y - y).abs() <= half
                })
            })
            .map(|(i, _)| i)
    }

    /// True once every card's speed is below `eps` px/s.
    pub fn settled(&self, eps: f32) -> bool {
        self.cards.iter().all(|&h| {
            self.bodies
                .get(h)
                .map(|b| b.linvel().length() < eps)
                .unwrap_or(true)
        })
    }

    /// Lowest card-bottom edge, for floor-overlap checks.
    pub fn lowest_edge(&self) -> f32 {
        self.cards
            .iter()
            .filter_map(|&h| self.bodies.get(h))
            .map(|b| b.translation().y + self.half)
            .fold(f32::MIN, f32::max)
    }
}

fn clamp_into(x: f32, y: f32, half: f32, width: f32, height: f32) -> (f32, f32) {
    let cx = if width <= half * 2.0 {
        width * 0.5
    } else {
        x.clamp(half, width - half)
    };
    let cy = if height <= half * 2.0 {
        height * 0.5
    } else {
        y.clamp(half, height - half)
    };
    (
        if cx.is_finite() { cx } else { width * 0.5 },
        if cy.is_finite() { cy } else { height * 0.5 },
    )
}

fn build_walls(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    width: f32,
    height: f32,
) -> Walls {
    let mut wall = |x: f32, y: f32, hx: f32, hy: f32| {
        let body = RigidBodyBuilder::new(RigidBodyType::Fixed)
            .translation(Vec2::new(x, y))
            .build();
        let handle = bodies.insert(body);
        let collider = ColliderBuilder::cuboid(hx, hy).build();
        colliders.insert_with_parent(collider, handle, &mut *bodies);
        handle
    };
    Walls {
        floor: wall(width / 2.0, height + 140.0, (width + 600.0) / 2.0, 130.0),
        left: wall(-160.0, height / 2.0, 160.0, (height + 600.0) / 2.0),
        right: wall(width + 160.0, height / 2.0, 160.0, (height + 600.0) / 2.0),
        ceiling: wall(width / 2.0, -1600.0, (width + 600.0) / 2.0, 130.0),
    }
}
