//! Falling boxes demo
//!
//! Drops a handful of randomly scattered boxes onto a static floor and logs
//! their resting positions. Demonstrates engine construction, collider and
//! rigid-body registration, and the fixed-step frame loop.

use collision2d::prelude::*;
use rand::Rng;

const FRAMES: usize = 600;
const BOX_COUNT: u64 = 8;

fn main() {
    collision2d::foundation::logging::init();
    log::info!("Creating falling boxes sandbox...");

    let config = PhysicsConfig::default()
        .with_world_bounds(Rect::new(Vec2::new(-60.0, -10.0), Vec2::new(60.0, 80.0)))
        .with_update_rates(60.0, 120.0);
    let mut engine = PhysicsEngine::new(config).expect("valid physics config");

    // Static floor.
    let floor_shape = Shape::rectangle(Vec2::new(0.0, 0.0), 100.0, 4.0);
    let floor = engine
        .add_collider(ColliderData::new(floor_shape, "terrain", OwnerId(0)))
        .expect("floor collider");
    let floor_transform = engine.transforms_mut().insert(Vec2::new(0.0, 0.0));
    engine
        .add_rigid_body(RigidBodyData::new(floor_transform, vec![floor]).as_static())
        .expect("floor body");

    // Scattered falling boxes.
    let mut rng = rand::thread_rng();
    let mut tracked = Vec::new();
    for owner in 1..=BOX_COUNT {
        let center = Vec2::new(
            rng.gen_range(-40.0_f32..40.0),
            rng.gen_range(20.0_f32..60.0),
        );
        let size = rng.gen_range(1.0_f32..3.0);

        let collider = engine
            .add_collider(ColliderData::new(
                Shape::rectangle(center, size, size),
                "crate",
                OwnerId(owner),
            ))
            .expect("box collider");
        let transform = engine.transforms_mut().insert(center);
        let body = engine
            .add_rigid_body(
                RigidBodyData::new(transform, vec![collider]).with_gravity(9.8),
            )
            .expect("box body");
        tracked.push((owner, body, transform));
    }

    log::info!("Simulating {} frames at 60 Hz...", FRAMES);
    let mut timer = Timer::new();
    for frame in 0..FRAMES {
        engine.advance(1.0 / 60.0);

        if frame % 120 == 0 {
            for (owner, _, transform) in &tracked {
                let position = engine.transforms().position(*transform).unwrap();
                log::debug!("frame {frame}: box {owner} at ({:.2}, {:.2})", position.x, position.y);
            }
        }
    }
    timer.update();

    log::info!(
        "Done in {:.1} ms of wall time; final state:",
        timer.delta_time() * 1000.0
    );
    for (owner, body, transform) in &tracked {
        let position = engine.transforms().position(*transform).unwrap();
        let velocity = engine.rigid_bodies().body(*body).unwrap().velocity;
        log::info!(
            "box {owner}: position ({:.2}, {:.2}), velocity ({:.2}, {:.2})",
            position.x,
            position.y,
            velocity.x,
            velocity.y
        );
    }
}
