use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use std::path::PathBuf;

use crate::core::system::system_order::InputSet;

use super::bindings::{parse_bindings_toml, KeyBindings};
use super::tracker::{track_paddle_keys, InputState};

pub const DEFAULT_INPUT_PATH: &str = "assets/config/input.toml";

/// Overrides where the bindings file is read from (set by the binary's `--input`).
#[derive(Resource, Debug, Clone)]
pub struct InputConfigPath(pub PathBuf);

pub struct PaddleInputPlugin;

impl Plugin for PaddleInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .add_event::<KeyboardInput>()
            .add_systems(PreStartup, load_key_bindings)
            .add_systems(Update, track_paddle_keys.in_set(InputSet));
    }
}

fn load_key_bindings(
    mut commands: Commands,
    existing: Option<Res<KeyBindings>>,
    path_override: Option<Res<InputConfigPath>>,
) {
    if existing.is_some() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    let raw: String = {
        let _ = path_override;
        include_str!("../../../assets/config/input.toml").to_string()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let raw: String = {
        let path = path_override
            .map(|p| p.0.clone())
            .or_else(|| std::env::var("INPUT_CONFIG_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));
        std::fs::read_to_string(&path).unwrap_or_else(|e| {
            warn!(target = "input", "{}: {e}; using default bindings", path.display());
            String::new()
        })
    };
    let parsed = parse_bindings_toml(&raw);
    for e in &parsed.errors {
        warn!(target = "input", "INPUT BINDINGS: {e}");
    }
    info!(
        target = "input",
        left = %parsed.bindings.left,
        right = %parsed.bindings.right,
        unmapped_press_clears = parsed.bindings.unmapped_press_clears,
        "paddle bindings loaded"
    );
    commands.insert_resource(parsed.bindings);
}
