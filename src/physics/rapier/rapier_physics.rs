use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::PinballConfig;

/// Wraps Rapier with the table's scale and gravity.
pub struct PhysicsSetupPlugin {
    pub pixels_per_meter: f32,
    pub debug_render: bool,
}

impl PhysicsSetupPlugin {
    pub fn from_config(cfg: &PinballConfig) -> Self {
        Self {
            pixels_per_meter: cfg.physics.pixels_per_meter,
            debug_render: cfg.physics.rapier_debug,
        }
    }
}

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            self.pixels_per_meter,
        ))
        .add_systems(Update, configure_gravity);
        #[cfg(feature = "debug")]
        if self.debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

/// The default context is created by Rapier's own startup; gravity is applied
/// as soon as it appears (before the first step in `PostUpdate`).
fn configure_gravity(
    mut contexts: Query<&mut RapierConfiguration, Added<RapierConfiguration>>,
    cfg: Res<PinballConfig>,
) {
    for mut rapier_cfg in &mut contexts {
        rapier_cfg.gravity = Vect::new(0.0, cfg.physics.gravity_y);
        info!(
            target = "scene",
            gravity_y = cfg.physics.gravity_y,
            "physics context configured"
        );
    }
}
