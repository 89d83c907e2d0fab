use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

use crate::scene::TextureKey;

static NEXT_MATERIAL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a material's GPU-side resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u64);

impl MaterialId {
    fn next() -> Self {
        Self(NEXT_MATERIAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Metallic-roughness surface description.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    id: MaterialId,
    pub name: String,
    pub color: Vec3,
    pub metalness: f32,
    pub roughness: f32,
    /// Colour map; rendered with flat shading until the texture is ready.
    pub map: Option<TextureKey>,
    version: u64,
}

impl Material {
    #[must_use]
    pub fn standard(color: Vec3, metalness: f32, roughness: f32) -> Self {
        Self {
            id: MaterialId::next(),
            name: String::from("MeshStandardMaterial"),
            color,
            metalness,
            roughness,
            map: None,
            version: 0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> MaterialId {
        self.id
    }

    /// Marks the material for re-upload.
    #[inline]
    pub fn needs_update(&mut self) {
        self.version += 1;
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(Vec3::ONE, 0.0, 1.0)
    }
}
