use bevy::prelude::*;

use crate::app::bootstrap::PinballScenePlugin;
use crate::core::config::PinballConfig;
use crate::gameplay::geometry::svg::SvgObstaclePlugin;
use crate::interaction::input::MouseDragPlugin;
use crate::interaction::session::AutoClosePlugin;
use crate::physics::rapier::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::visuals::BodyVisualsPlugin;

/// Everything the windowed game needs on top of `DefaultPlugins`.
pub struct PinballGamePlugin;

impl Plugin for PinballGamePlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<PinballConfig>()
            .cloned()
            .unwrap_or_default();
        app.add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin::from_config(&cfg),
            PinballScenePlugin,
            SvgObstaclePlugin,
            BodyVisualsPlugin,
            MouseDragPlugin,
            AutoClosePlugin,
        ));
    }
}
