//! Input mapping from raw events to application actions
//!
//! Speed keys (A/S, Z/X, Space, J/K/L) are NOT mapped here - they go directly
//! to the OrbitController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by window-level keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Q or Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Put the camera back at its starting angles (R key)
    ResetView,
}

/// Maps raw key events to application actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and for keys the orbit controller handles
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::KeyQ | KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyR => Some(InputAction::ResetView),
            _ => None,
        }
    }
}
