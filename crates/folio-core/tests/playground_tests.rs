// Host-side tests for the physics showcase: spawn layout, the entry
// cascade, settling, and drag/throw transitions.

use folio_core::constants::{CARD_MIN_SPACING, CARD_SIZE};
use folio_core::playground::{spawn_positions, PlaygroundConfig, SkillsWorld};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_world() -> SkillsWorld {
    SkillsWorld::new(PlaygroundConfig {
        card_count: 12,
        width: 1000.0,
        height: 600.0,
        seed: 7,
    })
}

/// Steps the world in 16ms frames for `seconds` of simulated time.
fn run(world: &mut SkillsWorld, seconds: f32, start_ms: f64) -> f64 {
    let mut now = start_ms;
    let frames = (seconds * 62.5) as usize;
    for _ in 0..frames {
        world.tick(0.016, now);
        now += 16.0;
    }
    now
}

#[test]
fn spawn_positions_respect_min_spacing() {
    let mut rng = StdRng::seed_from_u64(3);
    let positions = spawn_positions(14, 1400.0, CARD_SIZE / 2.0, CARD_MIN_SPACING, &mut rng);
    assert_eq!(positions.len(), 14);
    for (i, a) in positions.iter().enumerate() {
        // all above the visible band
        assert!(a.1 < 0.0);
        for b in positions.iter().skip(i + 1) {
            let dist = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
            assert!(
                dist >= CARD_MIN_SPACING - 1e-3,
                "cards {i} spawn too close: {dist}"
            );
        }
    }
}

#[test]
fn narrow_surfaces_fall_back_to_a_grid() {
    let mut rng = StdRng::seed_from_u64(3);
    // 26 cards cannot be rejection-sampled into a 200px-wide band.
    let positions = spawn_positions(26, 200.0, CARD_SIZE / 2.0, CARD_MIN_SPACING, &mut rng);
    assert_eq!(positions.len(), 26, "grid fallback must place every card");
    for &(x, y) in &positions {
        assert!(x.is_finite() && y.is_finite());
        assert!(y < 0.0);
    }
}

#[test]
fn nothing_moves_until_the_surface_becomes_visible() {
    let mut world = make_world();
    let mut states = Vec::new();
    world.card_states(&mut states);
    let before: Vec<(f32, f32)> = states.iter().map(|s| (s.x, s.y)).collect();
    run(&mut world, 2.0, 0.0);
    world.card_states(&mut states);
    let after: Vec<(f32, f32)> = states.iter().map(|s| (s.x, s.y)).collect();
    assert_eq!(before, after, "physics must not run before start()");
}

#[test]
fn cascade_settles_within_bounded_time_above_the_floor() {
    let mut world = make_world();
    world.start(0.0);
    run(&mut world, 20.0, 0.0);
    assert!(
        world.settled(8.0),
        "cards should come to rest within 20 simulated seconds"
    );
    // No card's bottom edge may pass the floor line.
    assert!(
        world.lowest_edge() <= 600.0 + 12.0,
        "card penetrated the floor: {}",
        world.lowest_edge()
    );
    // And every projected center sits inside the surface.
    let mut states = Vec::new();
    world.card_states(&mut states);
    for s in &states {
        assert!(s.x >= CARD_SIZE / 2.0 - 1e-3 && s.x <= 1000.0 - CARD_SIZE / 2.0 + 1e-3);
        assert!(s.y <= 600.0 - CARD_SIZE / 2.0 + 1e-3);
        assert!(s.angle.abs() <= 0.71);
    }
}

#[test]
fn dragged_card_pins_to_the_pointer_and_throws_on_release() {
    let mut world = make_world();
    world.start(0.0);
    let now = run(&mut world, 12.0, 0.0);

    world.begin_drag(0, 500.0, 300.0);
    assert_eq!(world.dragging(), Some(0));
    // While dragged the card ignores gravity and tracks the pointer.
    world.drag_to(480.0, 250.0);
    let now = {
        let mut n = now;
        for _ in 0..30 {
            world.tick(0.016, n);
            n += 16.0;
        }
        n
    };
    let mut states = Vec::new();
    world.card_states(&mut states);
    assert!((states[0].x - 480.0).abs() < 2.0);
    assert!((states[0].y - 250.0).abs() < 2.0);

    // Release with a leftward flick; the card must move left afterwards.
    world.end_drag(-0.8, 0.1);
    assert_eq!(world.dragging(), None);
    let mut n = now;
    for _ in 0..10 {
        world.tick(0.016, n);
        n += 16.0;
    }
    world.card_states(&mut states);
    assert!(states[0].x < 478.0, "thrown card should drift left");
}

#[test]
fn drag_positions_clamp_inside_the_surface() {
    let mut world = make_world();
    world.start(0.0);
    run(&mut world, 12.0, 0.0);
    world.begin_drag(1, -5000.0, 9000.0);
    let mut states = Vec::new();
    let mut n = 200_000.0;
    for _ in 0..5 {
        world.tick(0.016, n);
        n += 16.0;
    }
    world.card_states(&mut states);
    let s = &states[1];
    assert!(s.x >= CARD_SIZE / 2.0 && s.x <= 1000.0 - CARD_SIZE / 2.0);
    assert!(s.y >= CARD_SIZE / 2.0 && s.y <= 600.0 - CARD_SIZE / 2.0);
}

#[test]
fn resize_reseats_escaped_cards() {
    let mut world = make_world();
    world.start(0.0);
    run(&mut world, 12.0, 0.0);
    // Shrink hard; every card must end up inside the new surface after
    // settling again.
    world.resize(400.0, 500.0);
    run(&mut world, 10.0, 400_000.0);
    let mut states = Vec::new();
    world.card_states(&mut states);
    for s in &states {
        assert!(s.x.is_finite() && s.y.is_finite());
        assert!(s.x >= 0.0 && s.x <= 400.0);
        assert!(s.y <= 500.0);
    }
}
