// Host-side tests for the ambient particle field: velocity clamping,
// pulse ordering, and boundary behavior.

use folio_core::constants::{FIELD_MAX_SPEED, PULSE_LIFE_MS};
use folio_core::field::{FieldConfig, ParticleField};
use folio_core::surface::{BoundaryPolicy, SurfaceBounds};
use glam::Vec2;

fn make_field() -> ParticleField {
    ParticleField::new(
        SurfaceBounds::new(800.0, 600.0, 1.0),
        FieldConfig::default(),
        42,
    )
}

#[test]
fn particle_count_is_area_derived_and_clamped() {
    let small = ParticleField::new(
        SurfaceBounds::new(100.0, 100.0, 1.0),
        FieldConfig::default(),
        1,
    );
    assert_eq!(small.particles().len(), 18); // floor

    let large = ParticleField::new(
        SurfaceBounds::new(4000.0, 4000.0, 1.0),
        FieldConfig::default(),
        1,
    );
    assert_eq!(large.particles().len(), 120); // cap
}

#[test]
fn velocity_never_exceeds_clamp_under_pulse_storms() {
    let mut field = make_field();
    let mut now = 0.0;
    for i in 0..600 {
        // Continuous strong pulses stacked on every frame.
        field.pointer_pressed(Vec2::new(400.0, 300.0), now);
        field.pointer_moved(Vec2::new(390.0 + (i % 20) as f32, 300.0), 1.6, now);
        let dt = if i % 3 == 0 { 8.0 } else { 33.0 }; // variable refresh
        field.tick(dt, now);
        now += dt;
        for p in field.particles() {
            assert!(
                p.vel.x.abs() <= FIELD_MAX_SPEED + 1e-4,
                "vx {} exceeded clamp at frame {i}",
                p.vel.x
            );
            assert!(p.vel.y.abs() <= FIELD_MAX_SPEED + 1e-4);
        }
    }
}

#[test]
fn expired_pulses_do_not_influence_the_next_frame() {
    // Two identical fields; one receives a pulse that expires before the
    // measured frame. If pruning runs before application, the late field
    // must match a field that never saw the pulse.
    let mut with_pulse = make_field();
    let mut without = make_field();

    with_pulse.pointer_pressed(Vec2::new(400.0, 300.0), 0.0);
    let after_expiry = PULSE_LIFE_MS + 400.0; // past even the strong life

    with_pulse.tick(16.0, after_expiry + 16.0);
    without.tick(16.0, after_expiry + 16.0);

    for (a, b) in with_pulse.particles().iter().zip(without.particles()) {
        assert_eq!(a.vel, b.vel);
        assert_eq!(a.pos, b.pos);
    }
}

#[test]
fn live_pulses_do_influence_particles() {
    let mut with_pulse = make_field();
    let mut without = make_field();
    with_pulse.pointer_pressed(Vec2::new(400.0, 300.0), 0.0);
    with_pulse.tick(16.0, 8.0);
    without.tick(16.0, 8.0);
    let moved = with_pulse
        .particles()
        .iter()
        .zip(without.particles())
        .any(|(a, b)| a.vel != b.vel);
    assert!(moved, "a live pulse should perturb at least one particle");
}

#[test]
fn toroidal_wrap_preserves_velocity() {
    let bounds = SurfaceBounds::new(200.0, 200.0, 1.0);
    let policy = BoundaryPolicy::Wrap { margin: 10.0 };
    let wrapped = policy.confine(Vec2::new(215.0, 100.0), &bounds);
    assert_eq!(wrapped, Vec2::new(-10.0, 100.0));
    // confine never touches velocity by construction; integration test of
    // the full loop: run a field long enough for wraps to occur and check
    // positions stay within the margin band.
    let mut field = make_field();
    let mut now = 0.0;
    for _ in 0..2000 {
        field.tick(16.0, now);
        now += 16.0;
    }
    for p in field.particles() {
        assert!(p.pos.x >= -10.0 && p.pos.x <= 810.0);
        assert!(p.pos.y >= -10.0 && p.pos.y <= 610.0);
        assert!(p.pos.is_finite());
    }
}

#[test]
fn shrinking_below_particle_size_stays_finite() {
    let mut field = make_field();
    field.resize(SurfaceBounds::new(1.0, 600.0, 2.0));
    let mut now = 0.0;
    for _ in 0..100 {
        field.tick(16.0, now);
        now += 16.0;
    }
    for p in field.particles() {
        assert!(p.pos.is_finite(), "position must never go NaN on resize");
    }
}

#[test]
fn resize_discards_the_previous_population() {
    let mut field = make_field();
    let before = field.particles().len();
    field.resize(SurfaceBounds::new(300.0, 200.0, 1.0));
    let after = field.particles().len();
    assert!(after < before);
    for p in field.particles() {
        assert!(p.pos.x <= 300.0 && p.pos.y <= 200.0);
    }
}

#[test]
fn link_alpha_fades_with_distance() {
    let field = make_field();
    let close = field.link_alpha(Vec2::ZERO, Vec2::new(10.0, 0.0)).unwrap();
    let far = field.link_alpha(Vec2::ZERO, Vec2::new(100.0, 0.0)).unwrap();
    assert!(close > far);
    assert!(field.link_alpha(Vec2::ZERO, Vec2::new(200.0, 0.0)).is_none());
}
