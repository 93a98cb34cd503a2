pub mod components;
pub mod config;
pub mod coords;
pub mod system;
