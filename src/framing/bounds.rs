//! Bounding volumes of framing targets.

use glam::Vec3;

use crate::error::FramingError;

/// The eight world-space corners of a target's bounding box.
pub type BoundingCorners = [Vec3; 8];

/// Axis-aligned bounding box in world coordinates.
///
/// `min` is component-wise less than or equal to `max`; the constructor
/// reorders components to keep it that way.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Box spanning the two given corners.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centered at `center` with the given half-extents.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    /// Smallest box containing all `points`, `None` if there are none.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        }))
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corners, in the order min, max, then the six mixed ones.
    pub fn corners(&self) -> BoundingCorners {
        let (lo, hi) = (self.min, self.max);
        [
            lo,
            hi,
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
        ]
    }
}

/// Anything that can be framed: it reports an axis-aligned world extent.
pub trait Framable {
    /// World-space bounds, or `None` if the object has nothing to render.
    fn world_bounds(&self) -> Option<Aabb>;

    /// Name used in diagnostics.
    fn label(&self) -> String {
        String::from("<unnamed>")
    }
}

impl Framable for Aabb {
    fn world_bounds(&self) -> Option<Aabb> {
        Some(*self)
    }
}

impl<T: Framable + ?Sized> Framable for &T {
    fn world_bounds(&self) -> Option<Aabb> {
        (**self).world_bounds()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Bounding-box corners of a target.
///
/// A zero-size box still yields eight (identical) corners; only a target
/// with no extent at all is an error, so the caller can skip or abort.
pub fn extract<T: Framable + ?Sized>(
    target: &T,
) -> Result<BoundingCorners, FramingError> {
    target
        .world_bounds()
        .map(|bounds| bounds.corners())
        .ok_or_else(|| FramingError::NoExtent(target.label()))
}
