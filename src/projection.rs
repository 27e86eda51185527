//! Manual perspective projection from world space to window pixels.
//!
//! The camera transform is applied as two plain rotations (yaw about the
//! vertical axis, then pitch about the horizontal axis) followed by a divide
//! by `depth + fov`. There is no near plane: points behind the camera still
//! project, usually to mirrored or very distant pixels, and are drawn anyway.

use cgmath::{Point2, Point3};

use crate::camera::Camera;
use crate::geometry::ScreenPoint;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projector {
    /// Pixel the optical axis passes through.
    pub center: Point2<f32>,
    pub fov: f32,
}

impl Projector {
    pub fn new(center: (i32, i32), fov: f32) -> Self {
        Self {
            center: Point2::new(center.0 as f32, center.1 as f32),
            fov,
        }
    }

    /// Sub-pixel screen position of `point` seen from `camera`.
    ///
    /// The divisor `depth + fov` is not guarded. When it is exactly zero the
    /// result is infinite or NaN, which [`Projector::project`] then saturates.
    pub fn project_precise(&self, point: Point3<f32>, camera: &Camera) -> Point2<f32> {
        let relative = point - camera.position;
        let (x, y, z) = (relative.x, relative.y, relative.z);

        let (sin_yaw, cos_yaw) = camera.yaw.sin_cos();
        let xz = x * cos_yaw - z * sin_yaw;
        let zz = x * sin_yaw + z * cos_yaw;

        let (sin_pitch, cos_pitch) = camera.pitch.sin_cos();
        let yz = y * cos_pitch - zz * sin_pitch;
        let zz2 = y * sin_pitch + zz * cos_pitch;

        let factor = self.fov / (zz2 + self.fov);
        Point2::new(self.center.x + xz * factor, self.center.y + yz * factor)
    }

    /// Pixel position of `point`, truncated toward zero.
    ///
    /// Out of range values saturate at `i32::MIN`/`i32::MAX` and NaN becomes 0.
    pub fn project(&self, point: Point3<f32>, camera: &Camera) -> ScreenPoint {
        let precise = self.project_precise(point, camera);
        ScreenPoint::new(precise.x as i32, precise.y as i32)
    }
}
