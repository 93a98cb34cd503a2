//! Drain handling: whatever touches a reset strip is removed and a fresh
//! marble is launched from the plunger lane.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::BodyLabel;
use crate::core::config::PinballConfig;
use crate::core::coords::PlayfieldFrame;
use crate::gameplay::marble::spawn_marble;

use super::groups::SharedGroup;

/// Bodies to remove for one contact start, one entry per reset-labelled side.
///
/// Either side of the pair may be the strip; if both were, both are removed
/// and two marbles follow.
pub fn drained_bodies(a: Entity, b: Entity, is_reset: impl Fn(Entity) -> bool) -> Vec<Entity> {
    let mut out = Vec::with_capacity(2);
    if is_reset(a) {
        out.push(b);
    }
    if is_reset(b) {
        out.push(a);
    }
    out
}

pub fn handle_reset_contacts(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    labels: Query<&BodyLabel>,
    cfg: Res<PinballConfig>,
    frame: Res<PlayfieldFrame>,
    group: Res<SharedGroup>,
) {
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _) = *ev else {
            continue;
        };
        let is_reset = |e: Entity| labels.get(e).is_ok_and(BodyLabel::is_reset);
        for drained in drained_bodies(a, b, is_reset) {
            let label = labels.get(drained).map(|l| l.tag()).unwrap_or("unlabelled");
            debug!(target = "reset", ?drained, label, "body reached reset strip");
            if let Ok(mut body) = commands.get_entity(drained) {
                body.try_despawn();
            }
            let marble = spawn_marble(&mut commands, &cfg, &frame, &group);
            info!(target = "reset", ?marble, "marble relaunched");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::Marble;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    #[test]
    fn only_the_non_reset_side_is_drained() {
        let mut world = World::new();
        let strip = world.spawn_empty().id();
        let ball = world.spawn_empty().id();
        let is_reset = |e: Entity| e == strip;
        assert_eq!(drained_bodies(strip, ball, is_reset), vec![ball]);
        assert_eq!(drained_bodies(ball, strip, is_reset), vec![ball]);
        assert!(drained_bodies(ball, ball, is_reset).is_empty());
    }

    fn reset_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<CollisionEvent>();
        app.insert_resource(PinballConfig::default());
        app.insert_resource(PlayfieldFrame::default());
        app.init_resource::<SharedGroup>();
        app.add_systems(Update, handle_reset_contacts);
        app
    }

    #[test]
    fn contact_with_reset_replaces_marble() {
        let mut app = reset_app();
        let strip = app.world_mut().spawn(BodyLabel::Reset).id();
        let old = app.world_mut().spawn((BodyLabel::Marble, Marble)).id();
        app.world_mut().send_event(CollisionEvent::Started(
            old,
            strip,
            CollisionEventFlags::SENSOR,
        ));
        app.update();

        assert!(app.world().get_entity(old).is_err());
        assert!(app.world().get_entity(strip).is_ok());
        let mut q = app.world_mut().query_filtered::<Entity, With<Marble>>();
        assert_eq!(q.iter(app.world()).count(), 1);
    }

    #[test]
    fn stopped_and_unrelated_contacts_are_ignored() {
        let mut app = reset_app();
        let strip = app.world_mut().spawn(BodyLabel::Reset).id();
        let wall = app.world_mut().spawn(BodyLabel::Obstacle).id();
        let ball = app.world_mut().spawn((BodyLabel::Marble, Marble)).id();
        app.world_mut().send_event(CollisionEvent::Stopped(
            ball,
            strip,
            CollisionEventFlags::SENSOR,
        ));
        app.world_mut().send_event(CollisionEvent::Started(
            ball,
            wall,
            CollisionEventFlags::empty(),
        ));
        app.update();

        assert!(app.world().get_entity(ball).is_ok());
        let mut q = app.world_mut().query_filtered::<Entity, With<Marble>>();
        assert_eq!(q.iter(app.world()).count(), 1);
    }
}
