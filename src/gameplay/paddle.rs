//! Flippers: a visible chamfered wedge fused with a hidden brick into one
//! dynamic compound body, pinned to a fixed anchor at its initial centroid,
//! plus the four stoppers bounding its swing.
//!
//! The pin is a zero-length rigid hinge: the body-local pivot offset is held
//! on the anchor point, so the paddle can only rotate. The body is spawned
//! already resting on its hinge (centroid - offset).
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{
    BodyLabel, Draggable, Paddle, PaddleAnchor, Side, Stopper, StopperPosition,
};
use crate::core::config::PinballConfig;
use crate::core::coords::PlayfieldFrame;
use crate::gameplay::geometry::path::{ring_centroid, signed_area};
use crate::gameplay::geometry::shapes::{rotate_points, trapezoid_vertices};
use crate::gameplay::geometry::spawn::chamfered_hull;
use crate::physics::attraction::Attractor;
use crate::physics::groups::SharedGroup;
use crate::rendering::visuals::{BodyVisual, VisualShape};

pub const PADDLE_FILL: Color = Color::srgb(0.529, 0.808, 0.922); // skyblue

pub const WEDGE_WIDTH: f32 = 20.0;
pub const WEDGE_HEIGHT: f32 = 88.0;
pub const WEDGE_SLOPE: f32 = 0.33;
/// Left-side rotation; the right side mirrors it.
pub const WEDGE_ANGLE: f32 = 1.57;
pub const BRICK_SIZE: f32 = 40.0;
/// Left-side body-local pivot point; the right side mirrors x.
pub const PIVOT_OFFSET: Vec2 = Vec2::new(-32.0, -8.0);

const PADDLE_TOP: f32 = 512.0;
const BRICK_TOP: f32 = 524.0;

/// Playfield description of one flipper before it becomes a body.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddleBlueprint {
    pub side: Side,
    pub wedge_center: Vec2,
    pub wedge_angle: f32,
    pub brick_center: Vec2,
    pub brick_size: Vec2,
    pub pivot_offset: Vec2,
}

impl PaddleBlueprint {
    pub fn for_side(side: Side) -> Self {
        let x = match side {
            Side::Left => 134.0,
            Side::Right => 304.0,
        };
        Self {
            side,
            wedge_center: Vec2::new(x, PADDLE_TOP),
            wedge_angle: side.mirror(WEDGE_ANGLE),
            brick_center: Vec2::new(x, BRICK_TOP),
            brick_size: Vec2::splat(BRICK_SIZE),
            pivot_offset: Vec2::new(side.mirror(PIVOT_OFFSET.x), PIVOT_OFFSET.y),
        }
    }

    /// Wedge outline in absolute playfield coordinates.
    pub fn wedge_outline(&self) -> Vec<Vec2> {
        let local = trapezoid_vertices(WEDGE_WIDTH, WEDGE_HEIGHT, WEDGE_SLOPE);
        rotate_points(&local, self.wedge_angle)
            .into_iter()
            .map(|v| v + self.wedge_center)
            .collect()
    }

    /// Area-weighted centroid of wedge and brick: the compound body's position.
    pub fn centroid(&self) -> Vec2 {
        let wedge = self.wedge_outline();
        let wedge_area = signed_area(&wedge).abs();
        let brick_area = self.brick_size.x * self.brick_size.y;
        (ring_centroid(&wedge) * wedge_area + self.brick_center * brick_area)
            / (wedge_area + brick_area)
    }

    /// Where the compound sits once its pivot rests on the hinge.
    pub fn rest_position(&self) -> Vec2 {
        self.centroid() - self.pivot_offset
    }
}

/// Hinge of a paddle in playfield terms.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PivotPin {
    /// Fixed world point (the compound's initial centroid).
    pub hinge: Vec2,
    /// Body-local offset held on the hinge.
    pub offset: Vec2,
}

fn compound_collider(
    bp: &PaddleBlueprint,
    centroid: Vec2,
    chamfer: f32,
    frame: &PlayfieldFrame,
) -> (Collider, Vec<Vec2>) {
    let wedge_local: Vec<Vec2> = bp
        .wedge_outline()
        .into_iter()
        .map(|v| frame.offset_to_world(v - centroid))
        .collect();
    let brick_offset = frame.offset_to_world(bp.brick_center - centroid);
    let half = bp.brick_size * 0.5;
    let mut parts = vec![(brick_offset, 0.0, Collider::cuboid(half.x, half.y))];
    match chamfered_hull(&wedge_local, chamfer) {
        Some(wedge) => parts.push((Vec2::ZERO, 0.0, wedge)),
        None => warn!(
            target = "scene",
            side = bp.side.as_str(),
            "paddle wedge hull failed; compound keeps only the brick"
        ),
    }
    (Collider::compound(parts), wedge_local)
}

/// Spawn the compound flipper pinned to its fixed anchor. Returns the paddle entity.
pub fn spawn_paddle(
    commands: &mut Commands,
    bp: &PaddleBlueprint,
    cfg: &PinballConfig,
    frame: &PlayfieldFrame,
) -> Entity {
    let centroid = bp.centroid();
    let (collider, wedge_local) =
        compound_collider(bp, centroid, cfg.paddle.chamfer_radius, frame);

    let anchor = commands
        .spawn((
            Name::new(format!("{}PaddleAnchor", bp.side.as_str())),
            PaddleAnchor { side: bp.side },
            Transform::from_translation(frame.translation(centroid, 0.5)),
            RigidBody::Fixed,
        ))
        .id();

    let pin = RevoluteJointBuilder::new()
        .local_anchor1(Vec2::ZERO)
        .local_anchor2(frame.offset_to_world(bp.pivot_offset))
        .build();
    let damping = cfg.physics.air_damping;

    let label = BodyLabel::PaddleComp(bp.side);
    let paddle = commands
        .spawn((
            Name::new(label.tag()),
            label,
            Paddle { side: bp.side },
            Draggable,
            Transform::from_translation(frame.translation(bp.rest_position(), 0.5)),
            (
                RigidBody::Dynamic,
                collider,
                ColliderMassProperties::Density(cfg.physics.density),
                Friction::coefficient(cfg.paddle.friction),
                Damping {
                    linear_damping: damping,
                    angular_damping: damping,
                },
                // Held keys must act on a paddle resting on its stopper.
                Sleeping::disabled(),
                ExternalForce::default(),
                Velocity::zero(),
                ImpulseJoint::new(anchor, pin),
            ),
            PivotPin {
                hinge: centroid,
                offset: bp.pivot_offset,
            },
            BodyVisual {
                shape: VisualShape::Rings(vec![wedge_local]),
                color: PADDLE_FILL,
            },
        ))
        .id();
    debug!(target = "scene", ?paddle, hinge = ?centroid, "{label} pinned");
    paddle
}

/// Stopper placements in playfield coordinates.
pub const STOPPERS: [(Side, StopperPosition, Vec2); 4] = [
    (Side::Left, StopperPosition::Top, Vec2::new(170.0, 460.0)),
    (Side::Left, StopperPosition::Bottom, Vec2::new(136.0, 580.0)),
    (Side::Right, StopperPosition::Top, Vec2::new(280.0, 460.0)),
    (Side::Right, StopperPosition::Bottom, Vec2::new(300.0, 580.0)),
];

/// Invisible static stop in the shared group. Bottom stoppers also attract.
pub fn spawn_stopper(
    commands: &mut Commands,
    side: Side,
    position: StopperPosition,
    at: Vec2,
    cfg: &PinballConfig,
    frame: &PlayfieldFrame,
    group: &SharedGroup,
) -> Entity {
    let label = BodyLabel::Stopper(side, position);
    let mut entity = commands.spawn((
        Name::new(label.tag()),
        label,
        Stopper { side, position },
        Transform::from_translation(frame.translation(at, 0.0)),
        RigidBody::Fixed,
        Collider::ball(cfg.stopper.radius),
        group.member(),
    ));
    if position == StopperPosition::Bottom {
        entity.insert(Attractor { side });
    }
    entity.id()
}
