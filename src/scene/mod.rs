//! Minimal scene: flat storage of tagged objects with world bounds.
//!
//! Stands in for an engine's scene graph. Framing only needs one query from
//! it, [`TargetSource::find_targets`], which returns every object carrying a
//! given tag.

mod entity;

pub use entity::SceneObject;

use crate::framing::{Aabb, Framable};

/// Anything that can hand out the current set of framable objects.
pub trait TargetSource {
    /// Handle type returned for each target.
    type Target: Framable;

    /// Every object currently carrying `tag`.
    fn find_targets(&self, tag: &str) -> Vec<Self::Target>;
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The scene. Owns all objects in a flat list.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Objects in insertion order.
    objects: Vec<SceneObject>,
    next_object_id: u32,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its ID.
    pub fn add(
        &mut self,
        name: &str,
        tag: &str,
        bounds: Option<Aabb>,
    ) -> u32 {
        let id = self.next_object_id;
        self.next_object_id += 1;
        self.objects.push(SceneObject {
            id,
            name: name.to_owned(),
            tag: tag.to_owned(),
            visible: true,
            bounds,
        });
        id
    }

    /// Remove an object by ID, returning it if present.
    pub fn remove(&mut self, id: u32) -> Option<SceneObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(idx))
    }

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: u32) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Mutable lookup by ID.
    pub fn object_mut(&mut self, id: u32) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Union of the bounds of every visible object carrying `tag`.
    #[must_use]
    pub fn tagged_bounds(&self, tag: &str) -> Option<Aabb> {
        let corners: Vec<_> = self
            .find_targets(tag)
            .iter()
            .filter_map(Framable::world_bounds)
            .flat_map(|b| [b.min(), b.max()])
            .collect();
        Aabb::from_points(&corners)
    }
}

impl TargetSource for Scene {
    type Target = SceneObject;

    /// Visible objects carrying `tag`, in insertion order.
    fn find_targets(&self, tag: &str) -> Vec<SceneObject> {
        self.objects
            .iter()
            .filter(|o| o.visible && o.has_tag(tag))
            .cloned()
            .collect()
    }
}
