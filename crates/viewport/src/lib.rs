pub mod config;
pub mod controller;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod transform;
pub mod view;

pub use engine::*;
