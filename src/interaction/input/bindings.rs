//! Paddle key bindings (`assets/config/input.toml`).
//!
//! ```toml
//! [paddles]
//! left = "a"
//! right = "d"
//! unmapped_press_clears = true
//! ```
use bevy::prelude::*;

use crate::core::components::Side;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Logical key names, stored lowercase.
    pub left: String,
    pub right: String,
    /// Pressing a key that is not a side's binding clears that side's flag.
    pub unmapped_press_clears: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "a".into(),
            right: "d".into(),
            unmapped_press_clears: true,
        }
    }
}

impl KeyBindings {
    pub fn key(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Case-insensitive comparison against the side's binding.
    pub fn matches(&self, side: Side, key: &str) -> bool {
        key.to_lowercase() == self.key(side)
    }
}

#[derive(Debug, Default)]
pub struct ParsedBindings {
    pub bindings: KeyBindings,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct PaddlesToml {
    left: Option<String>,
    right: Option<String>,
    unmapped_press_clears: Option<bool>,
}

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    paddles: Option<PaddlesToml>,
}

/// Missing keys keep their defaults; problems are collected, never fatal.
pub fn parse_bindings_toml(raw: &str) -> ParsedBindings {
    let mut result = ParsedBindings::default();
    let root: RootToml = match toml::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            result.errors.push(format!("Top-level parse: {e}"));
            return result;
        }
    };
    let Some(p) = root.paddles else {
        return result;
    };
    for (side, key) in [(Side::Left, p.left), (Side::Right, p.right)] {
        let Some(key) = key else { continue };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            result
                .errors
                .push(format!("paddles.{} is empty; keeping default", side.as_str()));
            continue;
        }
        match side {
            Side::Left => result.bindings.left = key,
            Side::Right => result.bindings.right = key,
        }
    }
    if let Some(clears) = p.unmapped_press_clears {
        result.bindings.unmapped_press_clears = clears;
    }
    if result.bindings.left == result.bindings.right {
        result.errors.push(format!(
            "left and right paddles share key '{}'",
            result.bindings.left
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let parsed = parse_bindings_toml("");
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.bindings, KeyBindings::default());
    }

    #[test]
    fn keys_are_normalised_to_lowercase() {
        let parsed = parse_bindings_toml("[paddles]\nleft = \"Z\"\nunmapped_press_clears = false\n");
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.bindings.left, "z");
        assert_eq!(parsed.bindings.right, "d");
        assert!(!parsed.bindings.unmapped_press_clears);
        assert!(parsed.bindings.matches(Side::Left, "Z"));
    }

    #[test]
    fn shared_key_and_bad_toml_are_reported() {
        let shared = parse_bindings_toml("[paddles]\nleft = \"d\"\n");
        assert_eq!(shared.errors.len(), 1);
        let broken = parse_bindings_toml("[paddles\nleft = ");
        assert!(broken.errors[0].starts_with("Top-level parse"));
        assert_eq!(broken.bindings, KeyBindings::default());
    }
}
