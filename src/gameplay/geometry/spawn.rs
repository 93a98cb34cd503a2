//! Realise `BodySpec` descriptions as Rapier bodies.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::StaticObstacle;
use crate::core::coords::PlayfieldFrame;
use crate::rendering::visuals::{BodyVisual, VisualShape};

use super::shapes::{BodySpec, ShapeSpec};

/// Rounded rectangle collider; the rounding radius is clamped so thin walls keep a core.
pub fn chamfered_cuboid(width: f32, height: f32, chamfer: f32) -> Collider {
    let hx = width * 0.5;
    let hy = height * 0.5;
    let r = chamfer.min(hx.min(hy) * 0.9).max(0.0);
    if r <= f32::EPSILON {
        Collider::cuboid(hx, hy)
    } else {
        Collider::round_cuboid(hx - r, hy - r, r)
    }
}

/// Convex hull whose rounded border stays inside the authored outline.
pub fn chamfered_hull(points: &[Vec2], chamfer: f32) -> Option<Collider> {
    if chamfer <= f32::EPSILON {
        return Collider::convex_hull(points);
    }
    let centre = points.iter().copied().sum::<Vec2>() / points.len().max(1) as f32;
    let inset: Vec<Vec2> = points
        .iter()
        .map(|p| {
            let to_centre = centre - *p;
            let d = to_centre.length();
            let step = chamfer.min(d * 0.5);
            if d > f32::EPSILON {
                *p + to_centre / d * step
            } else {
                *p
            }
        })
        .collect();
    let max_radius = inset
        .iter()
        .map(|p| p.distance(centre))
        .fold(f32::INFINITY, f32::min);
    Collider::round_convex_hull(&inset, chamfer.min(max_radius))
}

/// Rings (world-oriented, body-local) -> one decomposed polygon collider.
pub fn polygon_collider(rings: &[Vec<Vec2>]) -> Option<Collider> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for ring in rings.iter().filter(|r| r.len() >= 3) {
        let base = vertices.len() as u32;
        let n = ring.len() as u32;
        vertices.extend_from_slice(ring);
        indices.extend((0..n).map(|i| [base + i, base + (i + 1) % n]));
    }
    if vertices.is_empty() {
        return None;
    }
    Some(Collider::convex_decomposition(&vertices, &indices))
}

/// World-space collider + visual for a shape description.
pub fn collider_and_visual(shape: &ShapeSpec, frame: &PlayfieldFrame) -> Option<(Collider, VisualShape)> {
    match shape {
        ShapeSpec::Rect {
            width,
            height,
            chamfer,
        } => Some((
            chamfered_cuboid(*width, *height, *chamfer),
            VisualShape::Rect {
                size: Vec2::new(*width, *height),
            },
        )),
        ShapeSpec::Circle { radius } => {
            Some((Collider::ball(*radius), VisualShape::Circle { radius: *radius }))
        }
        ShapeSpec::Polygon { rings } => {
            let world_rings: Vec<Vec<Vec2>> = rings
                .iter()
                .map(|ring| ring.iter().map(|v| frame.offset_to_world(*v)).collect())
                .collect();
            let collider = polygon_collider(&world_rings)?;
            Some((collider, VisualShape::Rings(world_rings)))
        }
    }
}

pub fn spawn_static_body(
    commands: &mut Commands,
    spec: &BodySpec,
    frame: &PlayfieldFrame,
) -> Option<Entity> {
    let Some((collider, visual)) = collider_and_visual(&spec.shape, frame) else {
        warn!(
            target = "scene",
            "skipping {} at {:?}: shape produced no collider",
            spec.label,
            spec.position
        );
        return None;
    };
    let transform = Transform::from_translation(frame.translation(spec.position, 0.0))
        .with_rotation(Quat::from_rotation_z(frame.angle_to_world(spec.angle)));

    let mut entity = commands.spawn((
        Name::new(spec.label.tag()),
        spec.label,
        StaticObstacle,
        transform,
        RigidBody::Fixed,
        collider,
    ));
    if let Some(coefficient) = spec.restitution {
        entity.insert(Restitution {
            coefficient,
            combine_rule: CoefficientCombineRule::Max,
        });
    }
    if spec.sensor {
        entity.insert((Sensor, ActiveEvents::COLLISION_EVENTS));
    }
    if spec.fill.visible {
        entity.insert(BodyVisual {
            shape: visual,
            color: spec.fill.color,
        });
    }
    Some(entity.id())
}
