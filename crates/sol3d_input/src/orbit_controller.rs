//! Orbit controller for keyboard-adjustable orbit and camera speeds
//!
//! Controls:
//! - A/S: Decrease/increase the primary body's orbit speed
//! - Z/X: Decrease/increase the secondary body's orbit speed
//! - Space: Pause/resume both orbits
//! - J/K: Toggle camera rotation about the X axis
//! - L: Toggle camera rotation about the Z axis

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Slowest non-zero orbit speed reachable with the decrease keys
pub const MIN_ROTATION_SPEED: f32 = 0.01;
/// Fastest orbit speed reachable with the increase keys
pub const MAX_ROTATION_SPEED: f32 = 0.1;
/// Amount a single key press changes an orbit speed by
pub const SPEED_STEP: f32 = 0.01;
/// Camera rotation speed used when a camera axis is toggled on
pub const CAMERA_ROTATION_SPEED: f32 = 0.03;

/// Which orbiting body a speed command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitTarget {
    /// The planet (Earth in the default scene)
    Primary,
    /// The satellite (Moon in the default scene)
    Secondary,
}

/// Axis the camera can spin around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAxis {
    X,
    Z,
}

/// A queued speed change, applied on the next [`OrbitController::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedCommand {
    Decrease(OrbitTarget),
    Increase(OrbitTarget),
    TogglePause,
    ToggleCamera(CameraAxis),
}

/// Speed bounds for the orbit keys
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            min: MIN_ROTATION_SPEED,
            max: MAX_ROTATION_SPEED,
            step: SPEED_STEP,
        }
    }
}

impl SpeedLimits {
    /// Slow down by one step, never dropping below `min`.
    ///
    /// Speeds at or below `min` (including a paused 0.0) are left alone.
    pub fn decrease(&self, speed: f32) -> f32 {
        if speed > self.min {
            (speed - self.step).max(self.min)
        } else {
            speed
        }
    }

    /// Speed up by one step, never exceeding `max`.
    ///
    /// A paused (0.0) speed restarts at `min`.
    pub fn increase(&self, speed: f32) -> f32 {
        if speed == 0.0 {
            return self.min;
        }
        if speed < self.max {
            (speed + self.step).min(self.max)
        } else {
            speed
        }
    }

    /// Pause a moving orbit, or restart a paused one at `min`
    pub fn toggle_pause(&self, speed: f32) -> f32 {
        if speed != 0.0 {
            0.0
        } else {
            self.min
        }
    }
}

/// Trait for anything whose orbit speeds can be driven by the controller
pub trait OrbitControl {
    /// Current orbit speed of the target, or `None` if nothing is bound to it
    fn orbit_speed(&self, target: OrbitTarget) -> Option<f32>;
    fn set_orbit_speed(&mut self, target: OrbitTarget, speed: f32);
}

/// Trait for a camera that spins at a constant rate around fixed axes
pub trait CameraSpinControl {
    fn rotation_speed(&self, axis: CameraAxis) -> f32;
    fn set_rotation_speed(&mut self, axis: CameraAxis, speed: f32);
}

/// Keyboard controller for orbit and camera speeds
pub struct OrbitController {
    pending: Vec<SpeedCommand>,

    // Configuration
    pub limits: SpeedLimits,
    pub camera_rotation_speed: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            limits: SpeedLimits::default(),
            camera_rotation_speed: CAMERA_ROTATION_SPEED,
        }
    }

    /// Map a key to its speed command, if it has one
    pub fn command_for_key(key: KeyCode) -> Option<SpeedCommand> {
        match key {
            KeyCode::KeyA => Some(SpeedCommand::Decrease(OrbitTarget::Primary)),
            KeyCode::KeyS => Some(SpeedCommand::Increase(OrbitTarget::Primary)),
            KeyCode::KeyZ => Some(SpeedCommand::Decrease(OrbitTarget::Secondary)),
            KeyCode::KeyX => Some(SpeedCommand::Increase(OrbitTarget::Secondary)),
            KeyCode::Space => Some(SpeedCommand::TogglePause),
            KeyCode::KeyJ | KeyCode::KeyK => Some(SpeedCommand::ToggleCamera(CameraAxis::X)),
            KeyCode::KeyL => Some(SpeedCommand::ToggleCamera(CameraAxis::Z)),
            _ => None,
        }
    }

    /// Process keyboard input
    ///
    /// Only presses queue a command; releases are ignored. Returns true if
    /// the key is one of the orbit/camera keys.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        match Self::command_for_key(key) {
            Some(command) => {
                if state == ElementState::Pressed {
                    self.pending.push(command);
                }
                true
            }
            None => false,
        }
    }

    /// Number of commands waiting for the next update
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Apply all queued commands in the order they were pressed
    pub fn update<O: OrbitControl, C: CameraSpinControl>(&mut self, orbits: &mut O, camera: &mut C) {
        for command in self.pending.drain(..) {
            match command {
                SpeedCommand::Decrease(target) => {
                    if let Some(speed) = orbits.orbit_speed(target) {
                        let new_speed = self.limits.decrease(speed);
                        orbits.set_orbit_speed(target, new_speed);
                        log::debug!("{:?} orbit speed {:.2} -> {:.2}", target, speed, new_speed);
                    }
                }
                SpeedCommand::Increase(target) => {
                    if let Some(speed) = orbits.orbit_speed(target) {
                        let new_speed = self.limits.increase(speed);
                        orbits.set_orbit_speed(target, new_speed);
                        log::debug!("{:?} orbit speed {:.2} -> {:.2}", target, speed, new_speed);
                    }
                }
                SpeedCommand::TogglePause => {
                    for target in [OrbitTarget::Primary, OrbitTarget::Secondary] {
                        if let Some(speed) = orbits.orbit_speed(target) {
                            orbits.set_orbit_speed(target, self.limits.toggle_pause(speed));
                        }
                    }
                }
                SpeedCommand::ToggleCamera(axis) => {
                    let new_speed = if camera.rotation_speed(axis) > 0.0 {
                        0.0
                    } else {
                        self.camera_rotation_speed
                    };
                    camera.set_rotation_speed(axis, new_speed);
                    log::debug!("Camera {:?} rotation speed set to {:.2}", axis, new_speed);
                }
            }
        }
    }

    /// Builder: set speed limits
    pub fn with_limits(mut self, limits: SpeedLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Builder: set the camera rotation speed used when toggling an axis on
    pub fn with_camera_rotation_speed(mut self, speed: f32) -> Self {
        self.camera_rotation_speed = speed;
        self
    }
}
