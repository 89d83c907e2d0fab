//! Scene Data Module
//!
//! Plain data making up one 3D viewport:
//! - [`SceneGraph`]: node hierarchy and textures of a loaded model
//! - [`Node`] / [`Mesh`]: hierarchy entries, optionally renderable
//! - [`Transform`]: position, rotation, scale
//! - [`Camera`]: perspective projection
//! - [`Light`]: point and directional lights
//! - [`Material`] / [`Texture`]: surface shading

pub mod camera;
pub mod graph;
pub mod light;
pub mod material;
pub mod node;
pub mod texture;
pub mod transform;

pub use camera::Camera;
pub use graph::SceneGraph;
pub use light::{Light, LightKind, LightSpec};
pub use material::{Material, MaterialId};
pub use node::{Mesh, Node};
pub use texture::{Texture, TextureImage};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct TextureKey;
}
