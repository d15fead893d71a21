//! sol3d - a textured Sun/Earth/Moon orrery
//!
//! The application pieces live here so integration tests can reach them;
//! `main.rs` only runs the event loop.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
