// Host-side tests for the hero scene: picking math, bounded drift, and
// instance packing.

use folio_core::hero::{ray_sphere, screen_to_world_ray, Camera, HeroPalette, HeroScene};
use folio_core::constants::{HERO_BOUNDS, HERO_WRAP_MARGIN};
use glam::{Vec2, Vec3};

#[test]
fn ray_sphere_intersection_basic() {
    let origin = Vec3::ZERO;
    let dir = Vec3::new(0.0, 0.0, 1.0);
    let t = ray_sphere(origin, dir, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(t.is_some());
    let t = t.unwrap();
    assert!(t > 0.0 && t < 10.0);
}

#[test]
fn ray_sphere_intersection_miss() {
    let origin = Vec3::ZERO;
    let dir = Vec3::new(1.0, 0.0, 0.0);
    assert!(ray_sphere(origin, dir, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_sphere_behind_origin_is_rejected() {
    let origin = Vec3::ZERO;
    let dir = Vec3::new(0.0, 0.0, 1.0);
    assert!(ray_sphere(origin, dir, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
}

#[test]
fn screen_center_ray_points_at_the_scene() {
    let camera = Camera::hero(16.0 / 9.0);
    let (origin, dir) = screen_to_world_ray(&camera, Vec2::new(640.0, 360.0), 1280.0, 720.0);
    assert!((origin - camera.eye).length() < 1.0);
    // The center ray heads from the eye toward the look target.
    let toward = (camera.target - camera.eye).normalize();
    assert!(dir.dot(toward) > 0.99);
}

#[test]
fn shapes_stay_inside_the_wrap_band() {
    let mut scene = HeroScene::new(HeroPalette::default(), 9);
    for _ in 0..5000 {
        scene.tick(1.0 / 60.0);
    }
    let limit = HERO_BOUNDS + HERO_WRAP_MARGIN;
    for shape in scene.shapes() {
        for axis in 0..3 {
            assert!(
                shape.pos[axis].abs() <= limit,
                "axis {axis} escaped: {}",
                shape.pos[axis]
            );
            assert!(shape.pos[axis].is_finite());
        }
    }
}

#[test]
fn press_on_a_shape_changes_its_velocity() {
    let mut scene = HeroScene::new(HeroPalette::default(), 9);
    let camera = Camera::hero(16.0 / 9.0);
    // Project the cube's center to screen space, then press there.
    let cube = scene.shapes()[0].pos;
    let clip = camera.view_proj() * cube.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    let sx = (ndc.x + 1.0) * 0.5 * 1280.0;
    let sy = (1.0 - ndc.y) * 0.5 * 720.0;

    let before = scene.shapes()[0].vel;
    let hit = scene.press(&camera, Vec2::new(sx, sy), 1280.0, 720.0);
    assert!(hit, "projected center press should hit the cube");
    assert!((scene.shapes()[0].vel - before).length() > 0.5);
}

#[test]
fn press_on_empty_space_hits_nothing() {
    let mut scene = HeroScene::new(HeroPalette::default(), 9);
    let camera = Camera::hero(16.0 / 9.0);
    assert!(!scene.press(&camera, Vec2::new(2.0, 2.0), 1280.0, 720.0));
}

#[test]
fn instances_pack_one_entry_per_shape() {
    let mut scene = HeroScene::new(HeroPalette::default(), 9);
    scene.tick(1.0 / 60.0);
    let mut out = Vec::new();
    scene.instances(&mut out);
    assert_eq!(out.len(), scene.shapes().len());
    for inst in &out {
        assert!(inst.scale > 0.0);
        assert!(inst.color.iter().all(|c| c.is_finite()));
        assert!(inst.emissive >= 0.0);
    }
}
