use glam::{Mat3, Mat4, Quat, Vec3};

use super::frustum::{Frustum, Plane};

/// How the camera projects the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Half-height of the view volume in world units.
        size: f32,
    },
}

impl Projection {
    /// Whether this is an orthographic projection.
    pub fn is_orthographic(&self) -> bool {
        matches!(self, Self::Orthographic { .. })
    }

    /// Orthographic half-height, `None` for perspective cameras.
    pub fn orthographic_size(&self) -> Option<f32> {
        match self {
            Self::Orthographic { size } => Some(*size),
            Self::Perspective { .. } => None,
        }
    }
}

/// Camera position plus its orthonormal basis in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// View direction.
    pub forward: Vec3,
    /// Screen-right direction.
    pub right: Vec3,
    /// Screen-up direction.
    pub up: Vec3,
}

impl CameraPose {
    /// Pose from a position and an orientation, with the right-handed
    /// convention: forward is `-Z`, right is `+X`, up is `+Y` in camera space.
    pub fn from_orientation(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            forward: orientation * Vec3::NEG_Z,
            right: orientation * Vec3::X,
            up: orientation * Vec3::Y,
        }
    }

    /// Same basis, different position.
    #[must_use]
    pub fn at(&self, position: Vec3) -> Self {
        Self { position, ..*self }
    }

    /// Coordinates of `point` along (right, up, forward) relative to the eye.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        let offset = point - self.position;
        Vec3::new(
            offset.dot(self.right),
            offset.dot(self.up),
            offset.dot(self.forward),
        )
    }
}

/// Camera defined by eye position, orientation, and projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub position: Vec3,
    /// Rotation from camera space to world space.
    pub orientation: Quat,
    /// Perspective or orthographic projection.
    pub projection: Projection,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera at `eye` looking toward `target`, keeping `up` as close to
    /// screen-up as the view direction allows.
    pub fn looking_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        projection: Projection,
    ) -> Self {
        let forward = (target - eye).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(up).normalize_or(Vec3::X);
        let up = right.cross(forward);
        let orientation =
            Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
        Self {
            position: eye,
            orientation,
            projection,
            aspect: 16.0 / 9.0,
            znear: 0.3,
            zfar: 1000.0,
        }
    }

    /// Current pose (position and basis vectors).
    pub fn pose(&self) -> CameraPose {
        CameraPose::from_orientation(self.position, self.orientation)
    }

    /// Build the view matrix.
    pub fn build_view(&self) -> Mat4 {
        let pose = self.pose();
        Mat4::look_to_rh(pose.position, pose.forward, pose.up)
    }

    /// Build the projection matrix ([0,1] depth range).
    pub fn build_projection(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fovy } => Mat4::perspective_rh(
                fovy.to_radians(),
                self.aspect,
                self.znear,
                self.zfar,
            ),
            Projection::Orthographic { size } => {
                let half_width = size * self.aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -size,
                    size,
                    self.znear,
                    self.zfar,
                )
            }
        }
    }

    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Current view frustum.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(self.build_matrix())
    }
}

/// The camera capabilities framing needs from its host.
///
/// Implemented by [`Camera`]; engines with their own camera type implement
/// it to be driven by a [`FramingSession`](crate::framing::FramingSession).
pub trait CameraRig {
    /// Current position and basis.
    fn pose(&self) -> CameraPose;
    /// Current projection.
    fn projection(&self) -> Projection;
    /// Viewport aspect ratio (width / height).
    fn aspect_ratio(&self) -> f32;
    /// Near clip distance.
    fn near_clip(&self) -> f32;
    /// The four side planes (left, right, bottom, top) of the current view
    /// volume, normals pointing inward.
    fn frustum_planes(&self) -> [Plane; 4];
    /// Move the eye without changing orientation.
    fn set_position(&mut self, position: Vec3);
    /// Change the orthographic half-height. Ignored by perspective cameras.
    fn set_orthographic_size(&mut self, size: f32);
    /// Change the far clip distance.
    fn set_far_clip(&mut self, far: f32);

    /// Whether the camera projects orthographically.
    fn is_orthographic(&self) -> bool {
        self.projection().is_orthographic()
    }

    /// Orthographic half-height, `None` for perspective cameras.
    fn orthographic_size(&self) -> Option<f32> {
        self.projection().orthographic_size()
    }
}

impl CameraRig for Camera {
    fn pose(&self) -> CameraPose {
        Self::pose(self)
    }

    fn projection(&self) -> Projection {
        self.projection
    }

    fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    fn near_clip(&self) -> f32 {
        self.znear
    }

    fn frustum_planes(&self) -> [Plane; 4] {
        self.frustum().side_planes()
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_orthographic_size(&mut self, size: f32) {
        if let Projection::Orthographic { size: current } = &mut self.projection
        {
            *current = size;
        }
    }

    fn set_far_clip(&mut self, far: f32) {
        self.zfar = far;
    }
}
