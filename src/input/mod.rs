//! Input handling module
//!
//! Maps window-level keys to application actions. Orbit and camera speed
//! keys go to `sol3d_input::OrbitController` instead.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
