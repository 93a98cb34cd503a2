use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}
impl Vec2Def {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 640.0,
            title: "Flipper Field".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub pixels_per_meter: f32,
    /// World-space gravity (y up), units per second squared.
    pub gravity_y: f32,
    /// Collider density of dynamic bodies (marble, paddles), mass per square unit.
    pub density: f32,
    /// Linear and angular damping of dynamic bodies, per second.
    /// 0.6 is an air friction of 0.01 per step at 60 steps per second.
    pub air_damping: f32,
    pub rapier_debug: bool,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 100.0,
            gravity_y: -1000.0,
            density: 0.001,
            air_damping: 0.6,
            rapier_debug: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MarbleConfig {
    pub radius: f32,
    /// Playfield position (y down).
    pub spawn: Vec2Def,
    /// Playfield velocity in units per step (y down, negative = up the table).
    pub launch_velocity: Vec2Def,
    pub steps_per_second: f32,
    pub restitution: f32,
    pub friction: f32,
}
impl Default for MarbleConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            spawn: Vec2Def::new(464.0, 500.0),
            launch_velocity: Vec2Def::new(0.0, -22.0),
            steps_per_second: 60.0,
            restitution: 0.0,
            friction: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BumperConfig {
    pub radius: f32,
    /// Super-elastic restitution applied after the bumper is built.
    pub restitution: f32,
}
impl Default for BumperConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            restitution: 1.5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StopperConfig {
    pub radius: f32,
    pub coefficient: f32,
    /// Gain while the side's key is held.
    pub held_gain: f32,
    /// Gain after release; weaker than `held_gain` so the paddle settles without overshoot.
    pub released_gain: f32,
    /// Converts the attraction law's per-step units into Rapier force units:
    /// (milliseconds per step)^2 * (steps per second)^2 = 1e6 at any step rate.
    pub force_scale: f32,
}
impl Default for StopperConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            coefficient: 0.002,
            held_gain: -1.0,
            released_gain: 0.5,
            force_scale: 1_000_000.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaddleConfig {
    pub chamfer_radius: f32,
    /// Collider friction against walls and stoppers.
    pub friction: f32,
}
impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            chamfer_radius: 8.0,
            friction: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SvgConfig {
    pub enabled: bool,
    /// Maximum distance between a curve and its flattened outline.
    pub tolerance: f32,
}
impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    pub enabled: bool,
    pub grab_radius: f32,
    pub pull_strength: f32,
    pub max_speed: f32,
}
impl Default for DragConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grab_radius: 30.0,
            pull_strength: 4000.0,
            max_speed: 1500.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PinballConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub marble: MarbleConfig,
    pub bumper: BumperConfig,
    pub stopper: StopperConfig,
    pub paddle: PaddleConfig,
    pub svg: SvgConfig,
    pub drag: DragConfig,
}

impl PinballConfig {
    pub fn from_ron_str(data: &str) -> Result<Self, String> {
        ron::from_str(data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_ron_str(&data)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merge several RON files (later maps override earlier ones key by key).
    /// Returns the config, the paths actually used, and any read/parse errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<PinballConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (Self::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.physics.gravity_y > 0.0 {
            w.push(format!(
                "physics.gravity_y is positive ({}); marbles will fall up the table",
                self.physics.gravity_y
            ));
        }
        if self.marble.radius <= 0.0 {
            w.push("marble.radius must be > 0".into());
        }
        if self.marble.steps_per_second <= 0.0 {
            w.push("marble.steps_per_second must be > 0".into());
        }
        let spawn = self.marble.spawn;
        if spawn.x < 0.0
            || spawn.y < 0.0
            || spawn.x > self.window.width
            || spawn.y > self.window.height
        {
            w.push(format!(
                "marble.spawn ({}, {}) lies outside the {}x{} table",
                spawn.x, spawn.y, self.window.width, self.window.height
            ));
        }
        if self.bumper.restitution <= 1.0 {
            w.push(format!(
                "bumper.restitution {} <= 1; bumpers will not add energy",
                self.bumper.restitution
            ));
        }
        if self.bumper.radius <= 0.0 {
            w.push("bumper.radius must be > 0".into());
        }
        if self.stopper.radius <= 0.0 {
            w.push("stopper.radius must be > 0".into());
        }
        if self.stopper.held_gain >= 0.0 {
            w.push(format!(
                "stopper.held_gain {} should be negative (pushes the paddle up)",
                self.stopper.held_gain
            ));
        }
        if self.stopper.released_gain <= 0.0 {
            w.push(format!(
                "stopper.released_gain {} should be positive (returns the paddle)",
                self.stopper.released_gain
            ));
        }
        if self.stopper.released_gain.abs() > self.stopper.held_gain.abs() {
            w.push(format!(
                "stopper.released_gain {} stronger than held_gain {}; paddle may overshoot on release",
                self.stopper.released_gain, self.stopper.held_gain
            ));
        }
        if self.physics.density <= 0.0 {
            w.push("physics.density must be > 0".into());
        }
        if self.physics.air_damping < 0.0 {
            w.push("physics.air_damping must be >= 0".into());
        }
        if self.stopper.force_scale <= 0.0 {
            w.push("stopper.force_scale must be > 0".into());
        }
        if self.svg.enabled && self.svg.tolerance <= 0.0 {
            w.push("svg.tolerance must be > 0".into());
        }
        if self.drag.enabled && self.drag.grab_radius <= 0.0 {
            w.push("drag.grab_radius must be > 0".into());
        }
        w
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        let warnings = PinballConfig::default().validate();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn tame_bumper_is_flagged() {
        let mut cfg = PinballConfig::default();
        cfg.bumper.restitution = 0.8;
        assert!(cfg
            .validate()
            .iter()
            .any(|w| w.contains("bumper.restitution")));
    }

    #[test]
    fn overlay_merges_nested_maps_key_by_key() {
        let mut base: ron::value::Value =
            ron::from_str("(bumper: (radius: 18.0, restitution: 1.4), drag: (enabled: false))")
                .unwrap();
        let overlay: ron::value::Value =
            ron::from_str("(bumper: (restitution: 1.8), svg: (enabled: false))").unwrap();
        merge_value(&mut base, overlay);
        let cfg: PinballConfig = base.into_rust().unwrap();
        assert_eq!(cfg.bumper.radius, 18.0);
        assert_eq!(cfg.bumper.restitution, 1.8);
        assert!(!cfg.drag.enabled);
        assert!(!cfg.svg.enabled);
    }

    #[test]
    fn force_scale_matches_per_step_units() {
        let cfg = PinballConfig::default();
        let ms_per_step = 1000.0 / cfg.marble.steps_per_second;
        let expected = ms_per_step * ms_per_step * cfg.marble.steps_per_second.powi(2);
        assert!((cfg.stopper.force_scale - expected).abs() < 1.0);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg: PinballConfig = ron::from_str("(stopper: (coefficient: 0.004))").unwrap();
        assert_eq!(cfg.stopper.coefficient, 0.004);
        assert_eq!(cfg.stopper.radius, 20.0);
        assert_eq!(cfg.marble, MarbleConfig::default());
    }
}
