//! Central system ordering labels to make the update sequence explicit.
//! Stages (high-level):
//! 1. Input (key flags folded into `InputState`)
//! 2. PrePhysics (stopper attraction, drag pulls, written before Rapier steps)
//! 3. Rapier (handled by plugin, `PostUpdate`)
//! 4. Lifecycle (reset contacts despawn + respawn marbles)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSet; // keyboard events -> InputState

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // forces applied before physics simulation step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct LifecycleSet; // collision-driven spawn / despawn
