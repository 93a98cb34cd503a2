pub mod attraction;
pub mod groups;
pub mod rapier;
pub mod reset;

pub use attraction::{apply_stopper_attraction, AttractionLaw, Attractor};
pub use groups::SharedGroup;
pub use rapier::PhysicsSetupPlugin;
pub use reset::handle_reset_contacts;
