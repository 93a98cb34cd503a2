pub mod geometry;
pub mod layout;
pub mod marble;
pub mod paddle;

pub use layout::{classic_layout, PlayfieldLayout};
pub use marble::spawn_marble;
pub use paddle::{spawn_paddle, spawn_stopper, PaddleBlueprint};
