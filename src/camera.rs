use std::fmt;

use cgmath::Point3;

use crate::input::{ControlKey, KeyState};

/// Fly-through camera pose. There is no roll axis.
///
/// Angles are in radians and are never wrapped; they are only consumed through
/// `sin`/`cos`, so unbounded accumulation is harmless over an interactive session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: f32,   // about the vertical axis, left/right
    pub pitch: f32, // about the horizontal axis, up/down
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camera: ({}, {}, {})  Yaw: {}  Pitch: {}",
            self.position.x, self.position.y, self.position.z, self.yaw, self.pitch
        )
    }
}

/// Turns held keys into per-frame camera deltas.
///
/// Movement is a fixed step per frame, not scaled by elapsed time, and
/// simultaneous keys add up without normalization.
pub struct CameraController {
    speed: f32,
    rot_speed: f32,
}

impl CameraController {
    pub fn new(speed: f32, rot_speed: f32) -> Self {
        Self { speed, rot_speed }
    }

    pub fn update_camera(&self, keys: &KeyState, camera: &mut Camera) {
        if keys.is_held(ControlKey::YawLeft) {
            camera.yaw -= self.rot_speed;
        }
        if keys.is_held(ControlKey::YawRight) {
            camera.yaw += self.rot_speed;
        }
        if keys.is_held(ControlKey::PitchUp) {
            camera.pitch -= self.rot_speed;
        }
        if keys.is_held(ControlKey::PitchDown) {
            camera.pitch += self.rot_speed;
        }

        // translation follows the yaw just applied; pitch never tilts the movement plane
        let (sin_yaw, cos_yaw) = camera.yaw.sin_cos();
        let speed = self.speed;

        if keys.is_held(ControlKey::StrafeLeft) {
            camera.position.x -= speed * cos_yaw;
            camera.position.z += speed * sin_yaw;
        }
        if keys.is_held(ControlKey::StrafeRight) {
            camera.position.x += speed * cos_yaw;
            camera.position.z -= speed * sin_yaw;
        }
        if keys.is_held(ControlKey::Forward) {
            camera.position.x += speed * sin_yaw;
            camera.position.z += speed * cos_yaw;
        }
        if keys.is_held(ControlKey::Back) {
            camera.position.x -= speed * sin_yaw;
            camera.position.z -= speed * cos_yaw;
        }
        if keys.is_held(ControlKey::Ascend) {
            camera.position.y -= speed;
        }
        if keys.is_held(ControlKey::Descend) {
            camera.position.y += speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[ControlKey]) -> KeyState {
        let mut state = KeyState::default();
        for key in keys {
            state.set(*key, true);
        }
        state
    }

    fn controller() -> CameraController {
        CameraController::new(16.0, 0.05)
    }

    #[test]
    fn no_keys_leaves_camera_untouched() {
        let mut camera = Camera::default();
        controller().update_camera(&KeyState::default(), &mut camera);
        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn forward_moves_along_z_when_unrotated() {
        let mut camera = Camera::default();
        let keys = held(&[ControlKey::Forward]);
        for _ in 0..10 {
            controller().update_camera(&keys, &mut camera);
        }
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 160.0));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn strafing_and_vertical_moves_are_axis_aligned_when_unrotated() {
        let mut camera = Camera::default();
        controller().update_camera(&held(&[ControlKey::StrafeRight, ControlKey::Ascend]), &mut camera);
        assert_eq!(camera.position, Point3::new(16.0, -16.0, 0.0));

        controller().update_camera(&held(&[ControlKey::StrafeLeft, ControlKey::Descend]), &mut camera);
        controller().update_camera(&held(&[ControlKey::Descend]), &mut camera);
        assert_eq!(camera.position, Point3::new(0.0, 16.0, 0.0));
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let mut camera = Camera::default();
        let keys = held(&[
            ControlKey::Forward,
            ControlKey::Back,
            ControlKey::YawLeft,
            ControlKey::YawRight,
        ]);
        controller().update_camera(&keys, &mut camera);
        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let mut camera = Camera::default();
        controller().update_camera(&held(&[ControlKey::Forward, ControlKey::StrafeRight]), &mut camera);
        let distance = (camera.position.x.powi(2) + camera.position.z.powi(2)).sqrt();
        assert!((distance - 16.0 * 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn yaw_and_forward_change_in_the_same_frame() {
        let mut camera = Camera::default();
        controller().update_camera(&held(&[ControlKey::YawLeft, ControlKey::Forward]), &mut camera);
        assert!((camera.yaw + 0.05).abs() < 1e-6);
        assert!((camera.position.x - 16.0 * (-0.05f32).sin()).abs() < 1e-4);
        assert!((camera.position.z - 16.0 * (-0.05f32).cos()).abs() < 1e-4);
        assert_eq!(camera.position.y, 0.0);
    }

    #[test]
    fn pitch_does_not_affect_movement() {
        let mut camera = Camera::default();
        let keys = held(&[ControlKey::PitchDown]);
        for _ in 0..20 {
            controller().update_camera(&keys, &mut camera);
        }
        assert!((camera.pitch - 1.0).abs() < 1e-5);

        controller().update_camera(&held(&[ControlKey::Forward]), &mut camera);
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 16.0));
    }

    #[test]
    fn snapshot_line_lists_position_and_angles() {
        let camera = Camera {
            position: Point3::new(1.0, -2.0, 3.5),
            yaw: 0.5,
            pitch: -0.25,
        };
        assert_eq!(
            camera.to_string(),
            "Camera: (1, -2, 3.5)  Yaw: 0.5  Pitch: -0.25"
        );
    }
}
