//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Show the current orbit speeds in the title bar
    pub fn update_title(&self, speeds: &[(&str, Option<f32>)]) {
        self.window.set_title(&format_title(&self.base_title, speeds));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn format_speed(speed: Option<f32>) -> String {
    match speed {
        Some(s) if s == 0.0 => "paused".to_string(),
        Some(s) => format!("{:.2}", s),
        None => "-".to_string(),
    }
}

/// Title text: base title followed by each named orbit speed
pub fn format_title(base: &str, speeds: &[(&str, Option<f32>)]) -> String {
    let parts: Vec<String> = speeds
        .iter()
        .map(|(name, speed)| format!("{}: {}", name, format_speed(*speed)))
        .collect();
    format!("{} - {}", base, parts.join(", "))
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Window creation failed: {0}")]
    CreationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_shows_speeds() {
        let title = format_title("sol3d", &[("Earth", Some(0.02)), ("Moon", Some(0.05))]);
        assert_eq!(title, "sol3d - Earth: 0.02, Moon: 0.05");
    }

    #[test]
    fn test_title_paused_and_unbound() {
        let title = format_title("sol3d", &[("Earth", Some(0.0)), ("Moon", None)]);
        assert_eq!(title, "sol3d - Earth: paused, Moon: -");
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
