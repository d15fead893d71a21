//! Simulation system
//!
//! Manages the animation loop:
//! - Delta time calculation
//! - Queued speed changes from the orbit keys
//! - Advancing orbits, spins and the camera

use std::time::Instant;
use sol3d_core::OrbitalSystem;
use sol3d_input::OrbitController;
use sol3d_render::Camera;

/// Longest frame time fed into the simulation, in seconds
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Result of a simulation update
pub struct SimulationResult {
    /// Whether any speed command was applied this frame
    pub speeds_changed: bool,
    /// Reference frames the simulation advanced by
    pub step: f32,
}

/// Manages the animation loop
///
/// Speeds are radians per reference frame, so a frame of `dt` seconds
/// advances everything by `dt * reference_rate` steps.
pub struct SimulationSystem {
    last_frame: Instant,
    reference_rate: f32,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(reference_rate: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            reference_rate,
        }
    }

    /// Run one simulation frame using the time since the previous one
    pub fn update(
        &mut self,
        system: &mut OrbitalSystem,
        camera: &mut Camera,
        controller: &mut OrbitController,
    ) -> SimulationResult {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt, system, camera, controller)
    }

    /// Run one simulation frame of `dt` seconds
    pub fn advance(
        &self,
        dt: f32,
        system: &mut OrbitalSystem,
        camera: &mut Camera,
        controller: &mut OrbitController,
    ) -> SimulationResult {
        // 1. Apply key presses queued since the last frame
        let speeds_changed = controller.pending_count() > 0;
        controller.update(system, camera);

        // 2. Advance orbits and camera
        let step = self.step_for(dt);
        system.update(step);
        camera.update(step);

        SimulationResult { speeds_changed, step }
    }

    /// Reference frames covered by `dt` seconds, after capping long frames
    pub fn step_for(&self, dt: f32) -> f32 {
        dt.clamp(0.0, MAX_FRAME_TIME) * self.reference_rate
    }

    /// Forget the time spent paused so the next frame does not jump
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(60.0)
    }
}
