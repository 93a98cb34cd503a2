pub mod config;

pub use config::{
    BumperConfig, DragConfig, MarbleConfig, PaddleConfig, PhysicsConfig, PinballConfig,
    StopperConfig, SvgConfig, Vec2Def, WindowConfig,
};
