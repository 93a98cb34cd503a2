use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::Draggable;
use crate::core::config::{DragConfig, PinballConfig};
use crate::core::system::system_order::PrePhysicsSet;

/// Pointer grab of any `Draggable` body (marble or paddle).
pub struct MouseDragPlugin;

impl Plugin for MouseDragPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveDrag::default()).add_systems(
            Update,
            (begin_or_end_drag, apply_drag_force.in_set(PrePhysicsSet)).chain(),
        );
    }
}

#[derive(Resource, Default, Debug)]
pub struct ActiveDrag {
    pub entity: Option<Entity>,
    pub last_pos: Option<Vec2>,
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

fn primary_pointer_world_pos(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter().next() {
        return cursor_world_pos(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    cursor_world_pos(camera_q, cursor)
}

/// Closest candidate within `grab_radius` of the pointer.
pub fn nearest_grabbable(
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
    pointer: Vec2,
    grab_radius: f32,
) -> Option<Entity> {
    let r2 = grab_radius * grab_radius;
    candidates
        .into_iter()
        .map(|(e, pos)| (e, pos.distance_squared(pointer)))
        .filter(|(_, d2)| *d2 <= r2)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e)
}

/// Velocity after one frame of pulling toward the pointer.
pub fn pulled_velocity(
    linvel: Vec2,
    pos: Vec2,
    pointer: Vec2,
    cfg: &DragConfig,
    dt: f32,
) -> Vec2 {
    let to_pointer = pointer - pos;
    let dist = to_pointer.length();
    if dist < 1e-3 {
        return linvel;
    }
    let mut v = linvel + to_pointer / dist * cfg.pull_strength * dt;
    if cfg.max_speed > 0.0 {
        let speed = v.length();
        if speed > cfg.max_speed {
            v *= cfg.max_speed / speed;
        }
    }
    v * 0.98
}

fn begin_or_end_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut active: ResMut<ActiveDrag>,
    q: Query<(Entity, &Transform), With<Draggable>>,
    cfg: Res<PinballConfig>,
) {
    if !cfg.drag.enabled {
        return;
    }
    let released =
        buttons.just_released(MouseButton::Left) || touches.iter_just_released().next().is_some();
    if released && active.entity.is_some() {
        debug!(target = "input", "drag released");
        active.entity = None;
        active.last_pos = None;
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };
    if active.entity.is_none()
        && (buttons.just_pressed(MouseButton::Left) || touches.iter_just_pressed().next().is_some())
    {
        let candidates = q.iter().map(|(e, tf)| (e, tf.translation.truncate()));
        if let Some(e) = nearest_grabbable(candidates, world_pos, cfg.drag.grab_radius) {
            debug!(target = "input", ?e, "drag started");
            active.entity = Some(e);
        }
    }
    if active.entity.is_some() {
        active.last_pos = Some(world_pos);
    }
}

fn apply_drag_force(
    time: Res<Time>,
    mut active: ResMut<ActiveDrag>,
    mut q: Query<(&Transform, &mut Velocity), With<Draggable>>,
    cfg: Res<PinballConfig>,
) {
    if !cfg.drag.enabled {
        return;
    }
    let (Some(entity), Some(pointer)) = (active.entity, active.last_pos) else {
        return;
    };
    match q.get_mut(entity) {
        Ok((tf, mut vel)) => {
            vel.linvel = pulled_velocity(
                vel.linvel,
                tf.translation.truncate(),
                pointer,
                &cfg.drag,
                time.delta_secs(),
            );
        }
        // Grabbed body drained or despawned mid-drag.
        Err(_) => {
            active.entity = None;
            active.last_pos = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grabs_closest_body_inside_radius() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let outside = world.spawn_empty().id();
        let picked = nearest_grabbable(
            [
                (far, Vec2::new(20.0, 0.0)),
                (near, Vec2::new(5.0, 0.0)),
                (outside, Vec2::new(100.0, 0.0)),
            ],
            Vec2::ZERO,
            30.0,
        );
        assert_eq!(picked, Some(near));
        assert_eq!(
            nearest_grabbable([(outside, Vec2::new(100.0, 0.0))], Vec2::ZERO, 30.0),
            None
        );
    }

    #[test]
    fn pull_is_capped_and_damped() {
        let cfg = DragConfig::default();
        let v = pulled_velocity(Vec2::ZERO, Vec2::ZERO, Vec2::new(100.0, 0.0), &cfg, 1.0);
        assert!((v.length() - cfg.max_speed * 0.98).abs() < 1e-2);
        assert!(v.x > 0.0 && v.y.abs() < 1e-6);
        let still = pulled_velocity(Vec2::ONE, Vec2::ZERO, Vec2::ZERO, &cfg, 1.0);
        assert_eq!(still, Vec2::ONE);
    }
}
