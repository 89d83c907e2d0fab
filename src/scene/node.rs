use crate::scene::NodeKey;
use crate::scene::material::Material;
use crate::scene::transform::Transform;

/// Renderable part of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub primitive_count: usize,
    /// Absent when the asset declares geometry without any shading.
    pub material: Option<Material>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, material: Option<Material>) -> Self {
        Self {
            name: name.into(),
            primitive_count: 1,
            material,
        }
    }
}

/// A scene graph node: hierarchy, transform and an optional mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// A node is patchable when it is a mesh carrying a material.
    #[inline]
    #[must_use]
    pub fn is_shaded_mesh(&self) -> bool {
        self.mesh.as_ref().is_some_and(|m| m.material.is_some())
    }
}
