// transform.rs — 环境整体变换（绕 -Z 旋转 + Z 方向偏移）

use glam::{DMat4, DQuat, DVec3};
use serde::Serialize;

/// Axis the environment is rotated around.
pub const ROTATION_AXIS: DVec3 = DVec3::NEG_Z;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentTransform {
    /// Radians around [`ROTATION_AXIS`].
    pub angle: f64,
    pub translation: DVec3,
}

impl Default for EnvironmentTransform {
    fn default() -> Self {
        Self {
            angle: 0.0,
            translation: DVec3::ZERO,
        }
    }
}

impl EnvironmentTransform {
    pub fn new(rotation_deg: f64, z_offset: f64) -> Self {
        Self {
            angle: rotation_deg.to_radians(),
            translation: DVec3::new(0.0, 0.0, z_offset),
        }
    }

    pub fn rotation(&self) -> DQuat {
        DQuat::from_axis_angle(ROTATION_AXIS, self.angle)
    }

    pub fn matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation(), self.translation)
    }
}
