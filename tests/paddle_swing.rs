//! Full table stepped through Rapier: held keys swing the paddles up against
//! their top stoppers, released keys bring them back to rest.
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::*;
use flipper_field::gameplay::paddle::PivotPin;
use flipper_field::physics::PhysicsSetupPlugin;
use flipper_field::{
    InputState, Marble, Paddle, PinballConfig, PinballScenePlugin, PlayfieldFrame, Side,
};

const SETTLE_FRAMES: usize = 120;
const HOLD_FRAMES: usize = 30;
const RELEASE_FRAMES: usize = 90;

fn stepped_table() -> App {
    let cfg = PinballConfig::default();
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));
    app.add_plugins(PhysicsSetupPlugin {
        pixels_per_meter: cfg.physics.pixels_per_meter,
        debug_render: false,
    });
    app.insert_resource(cfg);
    app.add_plugins(PinballScenePlugin);
    app.update();

    // Keep the launched marble from knocking the paddles mid-measurement.
    let mut marbles = app.world_mut().query_filtered::<Entity, With<Marble>>();
    let ids: Vec<Entity> = marbles.iter(app.world()).collect();
    for e in ids {
        app.world_mut().despawn(e);
    }
    app
}

/// Rotation toward the top stopper: counter-clockwise for the left paddle,
/// clockwise for the right one (world y up).
fn raise(side: Side, tf: &Transform) -> f32 {
    let (_, _, angle) = tf.rotation.to_euler(EulerRot::XYZ);
    match side {
        Side::Left => angle,
        Side::Right => -angle,
    }
}

fn raises(app: &mut App) -> [f32; 2] {
    let mut q = app.world_mut().query::<(&Paddle, &Transform)>();
    let mut out = [0.0; 2];
    for (paddle, tf) in q.iter(app.world()) {
        let i = match paddle.side {
            Side::Left => 0,
            Side::Right => 1,
        };
        out[i] = raise(paddle.side, tf);
    }
    out
}

fn run(app: &mut App, frames: usize) -> [f32; 2] {
    let mut peak = [f32::MIN; 2];
    for _ in 0..frames {
        app.update();
        let now = raises(app);
        for i in 0..2 {
            peak[i] = peak[i].max(now[i]);
        }
    }
    peak
}

fn set_held(app: &mut App, held: bool) {
    let mut input = app.world_mut().resource_mut::<InputState>();
    input.left_paddle_up = held;
    input.right_paddle_up = held;
}

#[test]
fn held_keys_swing_both_paddles_and_release_returns_them() {
    let mut app = stepped_table();
    run(&mut app, SETTLE_FRAMES);
    let rest = raises(&mut app);

    set_held(&mut app, true);
    let peak = run(&mut app, HOLD_FRAMES);
    for (i, side) in ["left", "right"].iter().enumerate() {
        let swing = peak[i] - rest[i];
        assert!(
            swing > 0.3,
            "{side} paddle barely moved while held: rest {:.3}, peak {:.3}",
            rest[i],
            peak[i]
        );
    }

    set_held(&mut app, false);
    run(&mut app, RELEASE_FRAMES);
    let back = raises(&mut app);
    for (i, side) in ["left", "right"].iter().enumerate() {
        assert!(
            (back[i] - rest[i]).abs() < 0.15,
            "{side} paddle did not fall back: rest {:.3}, now {:.3}",
            rest[i],
            back[i]
        );
    }
}

#[test]
fn pivot_stays_on_its_hinge_through_a_swing() {
    let mut app = stepped_table();
    run(&mut app, SETTLE_FRAMES);
    set_held(&mut app, true);
    run(&mut app, HOLD_FRAMES);

    let frame = *app.world().resource::<PlayfieldFrame>();
    let mut q = app.world_mut().query::<(&Paddle, &Transform, &PivotPin)>();
    for (paddle, tf, pin) in q.iter(app.world()) {
        let pivot = tf.translation.truncate()
            + (tf.rotation * frame.offset_to_world(pin.offset).extend(0.0)).truncate();
        let hinge = frame.to_world(pin.hinge);
        assert!(
            pivot.distance(hinge) < 2.0,
            "{:?} pivot drifted to {pivot:?}, hinge {hinge:?}",
            paddle.side
        );
    }
}

#[test]
fn resting_paddles_do_not_sleep() {
    let mut app = stepped_table();
    run(&mut app, SETTLE_FRAMES);
    let mut q = app.world_mut().query_filtered::<&Sleeping, With<Paddle>>();
    assert_eq!(q.iter(app.world()).count(), 2);
    assert!(q.iter(app.world()).all(|s| !s.sleeping));
}
