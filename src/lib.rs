pub mod app;
pub mod core;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::{ConfigReport, PinballGamePlugin, PinballScenePlugin};
pub use crate::core::components::{BodyLabel, Marble, Paddle, Side, Stopper, StopperPosition};
pub use crate::core::config::{config::WindowConfig, PinballConfig};
pub use crate::core::coords::PlayfieldFrame;
pub use crate::interaction::input::{InputConfigPath, InputState, KeyBindings};
