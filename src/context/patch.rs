//! Material patching of loaded models.

use crate::context::config::MaterialStrategy;
use crate::core::hex_color;
use crate::scene::{Material, SceneGraph, Texture, TextureKey};

/// What a patch pass did.
#[derive(Debug, Default)]
pub struct PatchOutcome {
    /// Mesh materials rewritten.
    pub patched: usize,
    /// Materials replaced; their backend resources must be released.
    pub disposed: Vec<Material>,
    /// Texture created for an overlay, with the source to load it from.
    pub texture: Option<(TextureKey, String)>,
}

/// Rewrites every reachable mesh material according to `strategy`.
///
/// Nodes without a mesh, and meshes without a material, are left untouched.
/// An overlay creates one shared texture; its pixels are loaded separately
/// and the meshes render with their base colour until then.
pub fn patch(graph: &mut SceneGraph, strategy: &MaterialStrategy) -> PatchOutcome {
    let mut outcome = PatchOutcome::default();
    if matches!(strategy, MaterialStrategy::Keep) {
        return outcome;
    }

    for key in graph.traverse() {
        let shaded = graph.get_node(key).is_some_and(|n| n.is_shaded_mesh());
        if !shaded {
            continue;
        }

        match strategy {
            MaterialStrategy::Keep => {}
            MaterialStrategy::TextureOverlay { source } => {
                let texture = match &outcome.texture {
                    Some((texture, _)) => *texture,
                    None => {
                        let texture = graph.add_texture(Texture::new(source.clone()));
                        outcome.texture = Some((texture, source.clone()));
                        texture
                    }
                };
                if let Some(material) = material_mut(graph, key) {
                    material.map = Some(texture);
                    material.needs_update();
                    outcome.patched += 1;
                }
            }
            MaterialStrategy::Replace {
                color,
                metalness,
                roughness,
            } => {
                if let Some(material) = material_mut(graph, key) {
                    let replacement = Material::standard(hex_color(*color), *metalness, *roughness)
                        .with_name(material.name.clone());
                    outcome.disposed.push(std::mem::replace(material, replacement));
                    outcome.patched += 1;
                }
            }
        }
    }

    log::debug!("patched {} mesh materials", outcome.patched);
    outcome
}

fn material_mut(graph: &mut SceneGraph, key: crate::scene::NodeKey) -> Option<&mut Material> {
    graph.get_node_mut(key)?.mesh.as_mut()?.material.as_mut()
}
