//! Corner resolution demo
//!
//! Launches a box diagonally into a convex corner and traces the resolved
//! trajectory, showing the axis-separated integration clamping the body
//! against both walls without tunneling.

use collision2d::prelude::*;

fn main() {
    collision2d::foundation::logging::init();
    log::info!("Creating corner resolution demo...");

    let mut engine = PhysicsEngine::new(
        PhysicsConfig::default().with_update_rates(60.0, 60.0),
    )
    .expect("valid physics config");

    let spawn_static = |engine: &mut PhysicsEngine, center: Vec2, w: f32, h: f32, owner: u64| {
        let collider = engine
            .add_collider(ColliderData::new(
                Shape::rectangle(center, w, h),
                "terrain",
                OwnerId(owner),
            ))
            .expect("static collider");
        let transform = engine.transforms_mut().insert(center);
        engine
            .add_rigid_body(RigidBodyData::new(transform, vec![collider]).as_static())
            .expect("static body");
    };

    // A wall to the right and a floor below form a corner at (9, -5).
    spawn_static(&mut engine, Vec2::new(10.0, 0.0), 2.0, 20.0, 0);
    spawn_static(&mut engine, Vec2::new(0.0, -6.0), 20.0, 2.0, 1);

    let start = Vec2::new(0.0, 0.0);
    let collider = engine
        .add_collider(ColliderData::new(
            Shape::rectangle(start, 2.0, 2.0),
            "crate",
            OwnerId(2),
        ))
        .expect("mover collider");
    let transform = engine.transforms_mut().insert(start);
    let body = engine
        .add_rigid_body(
            RigidBodyData::new(transform, vec![collider]).with_velocity(Vec2::new(12.0, -8.0)),
        )
        .expect("mover body");

    for frame in 0..90 {
        engine.advance(1.0 / 60.0);

        let position = engine.transforms().position(transform).unwrap();
        let velocity = engine.rigid_bodies().body(body).unwrap().velocity;
        if frame % 10 == 0 || velocity == Vec2::zeros() {
            log::info!(
                "frame {frame:3}: position ({:.2}, {:.2}), velocity ({:.2}, {:.2})",
                position.x,
                position.y,
                velocity.x,
                velocity.y
            );
        }
        if velocity == Vec2::zeros() {
            log::info!("came to rest in the corner after {frame} frames");
            break;
        }
    }

    let final_position = engine.transforms().position(transform).unwrap();
    assert!(final_position.x <= 8.0 + 1e-3, "tunneled through the wall");
    assert!(final_position.y >= -4.0 - 1e-3, "tunneled through the floor");
    log::info!("clamped outside both walls at ({:.2}, {:.2})", final_position.x, final_position.y);
}
