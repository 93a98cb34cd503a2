pub mod system_order;

pub use system_order::{InputSet, LifecycleSet, PrePhysicsSet};
