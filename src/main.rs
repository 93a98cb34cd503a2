use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use flipper_field::{ConfigReport, InputConfigPath, PinballConfig, PinballGamePlugin};

#[derive(Parser, Debug)]
#[command(name = "flipper_field", about = "2D pinball playfield on Bevy + Rapier")]
struct Args {
    /// RON config layer; repeat to stack files, later ones override earlier keys.
    #[arg(long = "config", value_name = "PATH", default_value = "assets/config/pinball.ron")]
    config: Vec<PathBuf>,
    /// Paddle key bindings (TOML).
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Exit after this many seconds (0 runs indefinitely).
    #[arg(long, value_name = "SECS")]
    auto_close: Option<f32>,
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(args: &Args) -> (PinballConfig, ConfigReport) {
    let (cfg, used, errors) = PinballConfig::load_layered(&args.config);
    (
        cfg,
        ConfigReport {
            used,
            errors,
            warnings: Vec::new(),
        },
    )
}

#[cfg(target_arch = "wasm32")]
fn load_config(_args: &Args) -> (PinballConfig, ConfigReport) {
    let raw = include_str!("../assets/config/pinball.ron");
    match PinballConfig::from_ron_str(raw) {
        Ok(cfg) => (
            cfg,
            ConfigReport {
                used: vec!["embedded pinball.ron".into()],
                ..Default::default()
            },
        ),
        Err(e) => (
            PinballConfig::default(),
            ConfigReport {
                errors: vec![e],
                ..Default::default()
            },
        ),
    }
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let args = Args::parse();
    let (mut cfg, mut report) = load_config(&args);
    if let Some(secs) = args.auto_close {
        if secs < 0.0 || !secs.is_finite() {
            bail!("--auto-close expects a non-negative number of seconds, got {secs}");
        }
        cfg.window.auto_close = secs;
    }
    report.warnings = cfg.validate();

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(report)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }));
    if let Some(path) = args.input {
        app.insert_resource(InputConfigPath(path));
    }
    app.add_plugins(PinballGamePlugin);

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("app exited with code {code}"),
    }
}
