use std::time::Duration;

use crate::geometry::Rgba;

/// Tunables for the window, the camera and the frame loop.
#[derive(Debug, Clone)]
pub struct Settings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Perspective strength. Larger values flatten the projection.
    pub fov: f32,
    /// World units travelled per frame for each held movement key.
    pub move_speed: f32,
    /// Radians turned per frame for each held rotation key.
    pub rot_speed: f32,
    /// Fixed sleep after every presented frame.
    pub frame_delay: Duration,
    pub background: Rgba,
    pub edge_color: Rgba,
}

impl Settings {
    /// Pixel coordinate of the optical axis.
    pub fn screen_center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "3D Cube Perspective Projection".to_string(),
            width: 1280,
            height: 720,
            fov: 500.0,
            move_speed: 16.0,
            rot_speed: 0.05,
            frame_delay: Duration::from_millis(16),
            background: Rgba::rgb(0, 0, 0),
            edge_color: Rgba::rgb(0, 128, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_center_is_middle_of_window() {
        let settings = Settings::default();
        assert_eq!(settings.screen_center(), (640, 360));
    }
}
