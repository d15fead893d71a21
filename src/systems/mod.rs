//! Application systems
//!
//! Window, simulation and rendering, kept apart from the event loop in main.rs.

mod render;
mod simulation;
mod window;

pub use render::{clear_color, RenderError, RenderSystem, ResourcePlan};
pub use simulation::{SimulationResult, SimulationSystem, MAX_FRAME_TIME};
pub use window::{format_title, WindowError, WindowSystem};
