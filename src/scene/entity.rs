use crate::framing::{Aabb, Framable};

// ---------------------------------------------------------------------------
// SceneObject
// ---------------------------------------------------------------------------

/// A scene object with a tag and optional world-space bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Scene-unique identifier.
    pub id: u32,
    /// Human-readable name.
    pub name: String,
    /// Tag used to select groups of objects (e.g. framing targets).
    pub tag: String,
    /// Whether this object is visible in the scene.
    pub visible: bool,
    /// World-space bounds; `None` for objects with nothing to render.
    pub bounds: Option<Aabb>,
}

impl SceneObject {
    /// Whether the object carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

impl Framable for SceneObject {
    fn world_bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
