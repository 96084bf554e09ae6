//! Simulation tuning constants.
//!
//! These express intended behavior (time constants, clamp limits, falloff
//! radii) and keep magic numbers out of the update loops.

// ---------------- Particle field ----------------

/// Reference frame duration; velocities are tuned in px-per-16ms-frame.
pub const DT_REF_MS: f64 = 16.0;
/// Largest frame delta fed into the field, in ms. Tab switches produce huge
/// deltas; integrating them verbatim teleports particles.
pub const DT_CLAMP_MS: f64 = 40.0;

pub const FIELD_DENSITY_PER_PX2: f32 = 0.00007;
pub const FIELD_MIN_PARTICLES: usize = 18;
pub const FIELD_MAX_PARTICLES: usize = 120;
pub const FIELD_PARTICLE_SIZE: f32 = 2.2;
pub const FIELD_LINK_DISTANCE: f32 = 110.0;
pub const FIELD_DAMPING: f32 = 0.985;
pub const FIELD_MAX_SPEED: f32 = 2.6;
pub const FIELD_CENTER_PULL: f32 = 0.000_008;
pub const FIELD_BREATHING_ACCEL: f32 = 0.0005;
pub const FIELD_WRAP_MARGIN: f32 = 10.0;

// ---------------- Pulses ----------------

pub const PULSE_RADIUS: f32 = 120.0;
pub const PULSE_STRENGTH: f32 = 1.2;
pub const PULSE_LIFE_MS: f64 = 600.0;
pub const PULSE_STRONG_LIFE_MS: f64 = 900.0;
pub const PULSE_STRONG_RADIUS_SCALE: f32 = 1.25;
pub const PULSE_STRONG_STRENGTH_SCALE: f32 = 1.6;
/// Rolling window of concurrent pulses; oldest evicted first.
pub const PULSE_QUEUE_CAP: usize = 12;

// ---------------- Pointer ----------------

/// Pointer speed clamp, px per ms.
pub const POINTER_SPEED_MAX: f32 = 10.0;
/// Exponential blend factor for the speed estimate.
pub const POINTER_SPEED_BLEND: f32 = 0.3;
/// Maps pointer speed to a pulse-strength multiplier.
pub const POINTER_PULSE_GAIN: f32 = 0.5;
pub const POINTER_PULSE_SCALE_MIN: f32 = 0.6;
pub const POINTER_PULSE_SCALE_MAX: f32 = 1.6;

// ---------------- Hero scene ----------------

pub const HERO_BOUNDS: f32 = 18.0;
pub const HERO_WRAP_MARGIN: f32 = 1.0;
pub const HERO_DAMPING: f32 = 0.9945;
pub const HERO_SPEED_SCALE: f32 = 2.6;
pub const HERO_FEATURE_SIZE: f32 = 3.2;
pub const HERO_ACCENT_COUNT: usize = 5;
pub const HERO_IMPULSE_BASE: f32 = 2.8;
pub const HERO_IMPULSE_SPREAD: f32 = 2.2;
pub const HERO_COLOR_LERP_PER_SEC: f32 = 2.6;
pub const HERO_PULSE_DECAY_PER_SEC: f32 = 1.8;
pub const HERO_EMISSIVE_BASE: f32 = 0.45;
pub const HERO_EMISSIVE_PULSE_SPAN: f32 = 0.9;

// Camera placement for the hero scene; picking shares these values.
pub const HERO_CAMERA_EYE: [f32; 3] = [0.0, 4.0, 18.0];
pub const HERO_CAMERA_FOVY_DEG: f32 = 50.0;
pub const HERO_CAMERA_ZNEAR: f32 = 0.1;
pub const HERO_CAMERA_ZFAR: f32 = 2000.0;
pub const HERO_PICK_RADIUS: f32 = 2.0;

// ---------------- Cursor trail ----------------

pub const TRAIL_SNAP_DIST: f32 = 220.0;
pub const TRAIL_LERP_BASE: f32 = 0.28;
pub const TRAIL_LERP_EXTRA_MAX: f32 = 0.7;
pub const TRAIL_LERP_DIST_DIV: f32 = 400.0;
pub const TRAIL_GLOW_EASE: f32 = 0.14;
pub const TRAIL_FADE_MS: f64 = 500.0;
pub const TRAIL_OPACITY_STEP: f32 = 0.06;
/// Nodes still projected while a scroll is in flight.
pub const TRAIL_SCROLL_NODE_LIMIT: usize = 3;
pub const SCROLL_DEBOUNCE_MS: i32 = 120;

pub const TRAIL_BIG_COUNT: usize = 4;
pub const TRAIL_SMALL_COUNT: usize = 6;
pub const TRAIL_TINY_COUNT: usize = 8;
pub const TRAIL_BIG_SPACING: f32 = 0.14;
pub const TRAIL_SMALL_SPACING: f32 = 0.18;
pub const TRAIL_TINY_SPACING: f32 = 0.22;

// ---------------- Skills playground ----------------

/// Card side length in CSS px.
pub const CARD_SIZE: f32 = 120.0;
/// Minimum center distance between spawn positions.
pub const CARD_MIN_SPACING: f32 = CARD_SIZE + 8.0;
/// Downward gravity in px/s^2 (the original tuned 1.12 g in its engine's
/// per-tick units; converted here to wall-clock units).
pub const PLAYGROUND_GRAVITY: f32 = 1100.0;
pub const CARD_RESTITUTION: f32 = 0.16;
pub const CARD_FRICTION: f32 = 0.62;
pub const CARD_LINEAR_DAMPING: f32 = 1.5;
/// Large-but-finite resistance once rotation unlocks, so cards tilt without
/// tumbling.
pub const CARD_ANGULAR_DAMPING: f32 = 12.0;
pub const CARD_DENSITY: f32 = 0.0036;

pub const SPAWN_BAND_TOP: f32 = -900.0;
pub const SPAWN_BAND_BOTTOM: f32 = -220.0;
pub const SPAWN_MAX_ATTEMPTS: usize = 2500;

/// Per-card delay in the entry cascade, ms.
pub const CASCADE_STAGGER_MS: f64 = 22.0;
/// Entry velocity at the start of the cascade, px/s.
pub const CASCADE_BASE_VY: f32 = 120.0;
pub const CASCADE_VY_JITTER: f32 = 12.0;
pub const CASCADE_VX_JITTER: f32 = 8.0;
/// Rotation stays locked this long after the cascade starts, ms.
pub const ROTATION_UNLOCK_MS: f64 = 700.0;

/// Throw velocity clamps, px/s.
pub const THROW_MAX_X: f32 = 540.0;
pub const THROW_MAX_UP: f32 = 540.0;
pub const THROW_MAX_DOWN: f32 = 1080.0;
/// Scales raw pointer px/ms displacement into a release velocity.
pub const THROW_GAIN: f32 = 0.64;

/// Display clamp for card tilt, radians.
pub const CARD_ANGLE_DISPLAY_CLAMP: f32 = 0.7;
pub const CARD_ANGLE_OVERFLOW_SNAP: f32 = 0.12;

/// Physics backlog cap, seconds; prevents a stalled tab from spiraling.
pub const PHYSICS_BACKLOG_CAP: f32 = 0.25;

// ---------------- Intro sequence ----------------

pub const INTRO_CYCLE_MS: f64 = 110.0;
pub const INTRO_MIN_WORDS: u32 = 6;
pub const INTRO_COVER_MS: f64 = 300.0;
pub const INTRO_REVEAL_MS: f64 = 500.0;
/// Small settle pad after each curtain transition.
pub const INTRO_SETTLE_MS: f64 = 20.0;

// ---------------- Navigation ----------------

pub const NAV_RETRY_TRIES: u32 = 6;
pub const NAV_RETRY_INITIAL_MS: f64 = 120.0;
pub const NAV_RETRY_GROWTH: f64 = 1.4;
pub const NAV_RETRY_MAX_MS: f64 = 800.0;
pub const NAV_DEFAULT_EXTRA_OFFSET: f32 = 100.0;
/// The scroll-spy probe sits this fraction of the viewport below the header.
pub const NAV_PROBE_FRACTION: f32 = 0.28;
