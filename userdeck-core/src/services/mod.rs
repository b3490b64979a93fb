//! Service layer - orchestration
//!
//! The view controller coordinates the ports and the local state
//! containers; rendering turns its state into text.

mod outcome;
pub mod render;
mod view_controller;

pub use outcome::ActionOutcome;
pub use render::RenderedView;
pub use view_controller::{StartupReport, ViewController};
