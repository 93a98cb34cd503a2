pub mod bootstrap;
pub mod game;

pub use bootstrap::{ConfigReport, PinballScenePlugin};
pub use game::PinballGamePlugin;
