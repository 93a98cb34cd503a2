pub mod camera;
pub mod visuals;

pub use camera::CameraPlugin;
pub use visuals::{BodyVisual, BodyVisualsPlugin, VisualShape};
