use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{BodyLabel, Draggable, Marble};
use crate::core::config::{MarbleConfig, PinballConfig};
use crate::core::coords::PlayfieldFrame;
use crate::physics::groups::SharedGroup;
use crate::rendering::visuals::{BodyVisual, VisualShape};

pub const MARBLE_FILL: Color = Color::srgb(0.2, 0.8, 0.35);

/// Launch parameters in playfield terms, kept on the marble for inspection.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MarbleLaunch {
    pub position: Vec2,
    /// Units per step, y down.
    pub velocity: Vec2,
    pub radius: f32,
}

impl MarbleLaunch {
    pub fn from_config(cfg: &MarbleConfig) -> Self {
        Self {
            position: cfg.spawn.into(),
            velocity: cfg.launch_velocity.into(),
            radius: cfg.radius,
        }
    }
}

/// Spawn one marble at the plunger lane with its upward launch velocity.
pub fn spawn_marble(
    commands: &mut Commands,
    cfg: &PinballConfig,
    frame: &PlayfieldFrame,
    group: &SharedGroup,
) -> Entity {
    let launch = MarbleLaunch::from_config(&cfg.marble);
    commands
        .spawn((
            Name::new(BodyLabel::Marble.tag()),
            BodyLabel::Marble,
            Marble,
            Draggable,
            launch,
            Transform::from_translation(frame.translation(launch.position, 1.0)),
            (
                RigidBody::Dynamic,
                Collider::ball(launch.radius),
                ColliderMassProperties::Density(cfg.physics.density),
                Damping {
                    linear_damping: cfg.physics.air_damping,
                    angular_damping: cfg.physics.air_damping,
                },
                group.member(),
                Restitution {
                    coefficient: cfg.marble.restitution,
                    combine_rule: CoefficientCombineRule::Max,
                },
                Friction::coefficient(cfg.marble.friction),
                Velocity::linear(frame.velocity_to_world(launch.velocity)),
                Ccd::enabled(),
                ActiveEvents::COLLISION_EVENTS,
            ),
            BodyVisual {
                shape: VisualShape::Circle {
                    radius: launch.radius,
                },
                color: MARBLE_FILL,
            },
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_launch_matches_plunger_lane() {
        let launch = MarbleLaunch::from_config(&MarbleConfig::default());
        assert_eq!(launch.position, Vec2::new(464.0, 500.0));
        assert_eq!(launch.velocity, Vec2::new(0.0, -22.0));
        assert_eq!(launch.radius, 10.0);
    }

    #[test]
    fn spawned_marble_moves_up_the_table() {
        let mut world = World::new();
        let cfg = PinballConfig::default();
        let frame = PlayfieldFrame::default();
        let group = SharedGroup::default();
        let mut queue = bevy::ecs::world::CommandQueue::default();
        let e = {
            let mut commands = Commands::new(&mut queue, &world);
            spawn_marble(&mut commands, &cfg, &frame, &group)
        };
        queue.apply(&mut world);

        let tf = world.get::<Transform>(e).unwrap();
        assert_eq!(tf.translation.truncate(), Vec2::new(214.0, -180.0));
        let vel = world.get::<Velocity>(e).unwrap();
        assert_eq!(vel.linvel, Vec2::new(0.0, 22.0 * 60.0));
        let damping = world.get::<Damping>(e).unwrap();
        assert_eq!(damping.linear_damping, cfg.physics.air_damping);
        assert!(matches!(
            world.get::<ColliderMassProperties>(e),
            Some(ColliderMassProperties::Density(d)) if *d == cfg.physics.density
        ));
        let groups = world.get::<CollisionGroups>(e).unwrap();
        assert_eq!(groups.memberships, group.member().memberships);
        assert_eq!(groups.filters, group.member().filters);
    }
}
