use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;

use super::*;

#[test]
fn segments_are_evenly_spaced() {
    let positions: Vec<Vec3> = segment_positions().collect();
    assert_eq!(positions.len(), SEGMENT_COUNT);
    for pair in positions.windows(2) {
        assert!((pair[0].distance(pair[1]) - SEGMENT_SPACING).abs() < 1e-5);
    }
}

#[test]
fn spawn_worm_links_consecutive_segments() {
    let mut world = World::new();
    world.init_resource::<Assets<Mesh>>();
    world.init_resource::<Assets<StandardMaterial>>();

    run_system_once(&mut world, super::spawn_worm);

    let segments = world.query::<&WormSegment>().iter(&world).count();
    let links = world.query::<&DistanceJoint>().iter(&world).count();
    assert_eq!(segments, SEGMENT_COUNT);
    assert_eq!(links, SEGMENT_COUNT - 1);
}

#[test]
fn pull_velocity_points_at_anchor_and_is_capped() {
    let near = pull_velocity(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0));
    assert!(near.x > 0.0 && near.y == 0.0 && near.z == 0.0);

    let far = pull_velocity(Vec3::ZERO, Vec3::new(0.0, 100.0, 0.0));
    assert!((far.length() - GRAB_MAX_SPEED).abs() < 1e-3);
}

#[test]
fn only_the_grabbed_segment_is_pulled() {
    let mut world = World::new();
    let held = world
        .spawn((WormSegment { index: 0 }, Position(Vec3::ZERO), LinearVelocity::ZERO))
        .id();
    let other = world
        .spawn((WormSegment { index: 1 }, Position(Vec3::X), LinearVelocity::ZERO))
        .id();
    world.insert_resource(WormGrab { segment: Some(held), anchor: Vec3::new(0.0, 1.0, 0.0) });

    run_system_once(&mut world, super::pull_grabbed);

    assert!(world.get::<LinearVelocity>(held).unwrap().0.y > 0.0);
    assert_eq!(world.get::<LinearVelocity>(other).unwrap().0, Vec3::ZERO);
}

#[test]
fn releasing_the_button_drops_the_segment() {
    let mut world = World::new();
    let held = world.spawn(WormSegment { index: 3 }).id();
    world.insert_resource(WormGrab { segment: Some(held), anchor: Vec3::ZERO });

    let mut buttons = ButtonInput::<MouseButton>::default();
    buttons.press(MouseButton::Left);
    buttons.clear();
    buttons.release(MouseButton::Left);
    world.insert_resource(buttons);

    run_system_once(&mut world, super::release_segment);

    assert_eq!(world.resource::<WormGrab>().segment, None);
}
