use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Projection};

/// Projection selector for [`CameraOptions`].
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Perspective projection using `fovy`.
    #[default]
    Perspective,
    /// Orthographic projection using `orthographic_size`.
    Orthographic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters.
pub struct CameraOptions {
    /// Perspective or orthographic.
    #[schemars(title = "Projection")]
    pub projection: ProjectionMode,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Orthographic half-height in world units.
    #[schemars(title = "Orthographic Size", range(min = 0.1, max = 100.0), extend("step" = 0.1))]
    pub orthographic_size: f32,
    /// Viewport aspect ratio (width / height).
    #[schemars(skip)]
    pub aspect: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl CameraOptions {
    /// The configured projection.
    pub fn projection(&self) -> Projection {
        match self.projection {
            ProjectionMode::Perspective => {
                Projection::Perspective { fovy: self.fovy }
            }
            ProjectionMode::Orthographic => Projection::Orthographic {
                size: self.orthographic_size,
            },
        }
    }

    /// Camera at `eye` looking toward `look_at`, with world `+Y` as up.
    pub fn build_camera(&self, eye: Vec3, look_at: Vec3) -> Camera {
        Camera {
            aspect: self.aspect,
            znear: self.znear,
            zfar: self.zfar,
            ..Camera::looking_at(eye, look_at, Vec3::Y, self.projection())
        }
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Perspective,
            fovy: 60.0,
            orthographic_size: 5.0,
            aspect: 16.0 / 9.0,
            znear: 0.3,
            zfar: 1000.0,
        }
    }
}
