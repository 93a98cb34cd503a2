//! One-time scene assembly and the per-frame gameplay wiring.
//!
//! Startup order (chained): config report -> static geometry -> stoppers and
//! paddles -> first marble. Camera and physics context come from their own
//! plugins; the shared collision group exists before any body is spawned.
use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::core::components::Side;
use crate::core::config::PinballConfig;
use crate::core::coords::PlayfieldFrame;
use crate::core::system::system_order::{InputSet, LifecycleSet, PrePhysicsSet};
use crate::gameplay::geometry::spawn::spawn_static_body;
use crate::gameplay::layout::classic_layout;
use crate::gameplay::marble::spawn_marble;
use crate::gameplay::paddle::{spawn_paddle, spawn_stopper, PaddleBlueprint, STOPPERS};
use crate::interaction::input::PaddleInputPlugin;
use crate::physics::attraction::apply_stopper_attraction;
use crate::physics::groups::SharedGroup;
use crate::physics::reset::handle_reset_contacts;

/// Outcome of loading the config files, logged once at startup.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub struct PinballScenePlugin;

impl Plugin for PinballScenePlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<PinballConfig>()
            .cloned()
            .unwrap_or_default();
        app.insert_resource(PlayfieldFrame::new(
            cfg.window.width,
            cfg.window.height,
            cfg.marble.steps_per_second,
        ))
        .insert_resource(cfg)
        .init_resource::<SharedGroup>()
        .init_resource::<ConfigReport>()
        .add_event::<CollisionEvent>()
        .configure_sets(
            Update,
            (
                InputSet,
                PrePhysicsSet.after(InputSet),
                LifecycleSet.after(PrePhysicsSet),
            ),
        )
        .add_plugins(PaddleInputPlugin)
        .add_systems(
            Startup,
            (
                log_config_report,
                spawn_static_geometry,
                spawn_paddles,
                spawn_initial_marble,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                apply_stopper_attraction.in_set(PrePhysicsSet),
                handle_reset_contacts.in_set(LifecycleSet),
            ),
        );
    }
}

fn log_config_report(report: Res<ConfigReport>) {
    if !report.used.is_empty() {
        info!(target = "config", "config layers: {}", report.used.join(", "));
    }
    for e in &report.errors {
        warn!(target = "config", "CONFIG ERROR: {e}");
    }
    for w in &report.warnings {
        warn!(target = "config", "CONFIG WARNING: {w}");
    }
}

fn spawn_static_geometry(
    mut commands: Commands,
    cfg: Res<PinballConfig>,
    frame: Res<PlayfieldFrame>,
) {
    let layout = match classic_layout(&cfg) {
        Ok(layout) => layout,
        Err(e) => {
            error!(target = "scene", "table layout rejected: {e}");
            return;
        }
    };
    let spawned = layout
        .bodies
        .iter()
        .filter_map(|spec| spawn_static_body(&mut commands, spec, &frame))
        .count();
    for req in layout.svg_obstacles {
        commands.spawn((Name::new(format!("svg:{}", req.name)), req));
    }
    info!(
        target = "scene",
        bodies = spawned,
        "static geometry spawned"
    );
}

fn spawn_paddles(
    mut commands: Commands,
    cfg: Res<PinballConfig>,
    frame: Res<PlayfieldFrame>,
    group: Res<SharedGroup>,
) {
    for (side, position, at) in STOPPERS {
        spawn_stopper(&mut commands, side, position, at, &cfg, &frame, &group);
    }
    for side in Side::BOTH {
        spawn_paddle(&mut commands, &PaddleBlueprint::for_side(side), &cfg, &frame);
    }
    info!(target = "scene", "paddles and stoppers spawned");
}

fn spawn_initial_marble(
    mut commands: Commands,
    cfg: Res<PinballConfig>,
    frame: Res<PlayfieldFrame>,
    group: Res<SharedGroup>,
) {
    let marble = spawn_marble(&mut commands, &cfg, &frame, &group);
    info!(target = "scene", ?marble, "first marble launched");
}
