//! Orbit Input Handling
//!
//! This crate turns key presses into orbit and camera speed changes.

mod orbit_controller;

pub use orbit_controller::{
    OrbitController, OrbitControl, CameraSpinControl, OrbitTarget, CameraAxis,
    SpeedCommand, SpeedLimits,
    MIN_ROTATION_SPEED, MAX_ROTATION_SPEED, SPEED_STEP, CAMERA_ROTATION_SPEED,
};
