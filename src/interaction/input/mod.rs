pub mod bindings;
pub mod input_interaction;
pub mod plugin;
pub mod tracker;

pub use bindings::KeyBindings;
pub use input_interaction::{ActiveDrag, MouseDragPlugin};
pub use plugin::{InputConfigPath, PaddleInputPlugin};
pub use tracker::{key_name, track_paddle_keys, InputState};
