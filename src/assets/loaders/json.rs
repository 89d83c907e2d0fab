//! JSON scene description format.
//!
//! A compact text stand-in for binary scene files, used by demos and tests.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "name": "body", "mesh": { "material": { "color": 16711680 } } },
//!     { "name": "rotor", "parent": 0, "position": [0, 1, 0] }
//!   ],
//!   "clips": [
//!     { "name": "spin", "tracks": [
//!       { "node": "rotor", "target": "scale", "times": [0, 1], "values": [1,1,1, 2,2,2] }
//!     ] }
//!   ]
//! }
//! ```

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use crate::assets::loaders::{AssetParser, LoadedAsset};
use crate::core::hex_color;
use crate::errors::{Result, ScrollyError};
use crate::scene::{Material, Mesh, Node, SceneGraph, Transform};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDesc {
    #[serde(default = "white")]
    pub color: u32,
    #[serde(default)]
    pub metalness: f32,
    #[serde(default = "one")]
    pub roughness: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshDesc {
    #[serde(default)]
    pub material: Option<MaterialDesc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    /// Index of the parent in `nodes`; must precede this node.
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub position: [f32; 3],
    /// Quaternion `[x, y, z, w]`.
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub mesh: Option<MeshDesc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDesc {
    pub node: String,
    pub target: TargetPath,
    pub times: Vec<f32>,
    /// Flattened keyframe values: 3 per key for translation/scale, 4 for rotation.
    pub values: Vec<f32>,
    #[serde(default)]
    pub interpolation: InterpolationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipDesc {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<TrackDesc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDesc {
    #[serde(default)]
    pub nodes: Vec<NodeDesc>,
    #[serde(default)]
    pub clips: Vec<ClipDesc>,
}

fn white() -> u32 {
    0xffffff
}

fn one() -> f32 {
    1.0
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl SceneDesc {
    /// Builds the scene graph under a synthetic `scene_root` node.
    pub fn build(&self, uri: &str) -> Result<LoadedAsset> {
        let mut graph = SceneGraph::new();
        let root = graph.add_node(Node::new("scene_root"));

        let mut keys = Vec::with_capacity(self.nodes.len());
        for (index, desc) in self.nodes.iter().enumerate() {
            let parent = match desc.parent {
                None => root,
                Some(p) if p < index => keys[p],
                Some(p) => {
                    return Err(ScrollyError::asset_load(
                        uri,
                        format!("node `{}` references parent {p} before it is declared", desc.name),
                    ));
                }
            };

            let mut node = Node::new(desc.name.clone()).with_transform(Transform {
                position: Vec3::from_array(desc.position),
                rotation: Quat::from_array(desc.rotation).normalize(),
                scale: Vec3::from_array(desc.scale),
            });
            if let Some(mesh) = &desc.mesh {
                let material = mesh.material.as_ref().map(|m| {
                    Material::standard(hex_color(m.color), m.metalness, m.roughness)
                });
                node = node.with_mesh(Mesh::new(desc.name.clone(), material));
            }
            keys.push(graph.add_to_parent(node, parent));
        }

        let clips = self
            .clips
            .iter()
            .map(|clip| build_clip(uri, clip))
            .collect::<Result<Vec<_>>>()?;

        Ok(LoadedAsset { graph, root, clips })
    }
}

fn build_clip(uri: &str, clip: &ClipDesc) -> Result<AnimationClip> {
    let mut tracks = Vec::with_capacity(clip.tracks.len());
    for desc in &clip.tracks {
        let width = match desc.target {
            TargetPath::Rotation => 4,
            TargetPath::Translation | TargetPath::Scale => 3,
        };
        let stride = match desc.interpolation {
            InterpolationMode::CubicSpline => width * 3,
            _ => width,
        };
        if desc.values.len() != desc.times.len() * stride {
            return Err(ScrollyError::asset_load(
                uri,
                format!(
                    "clip `{}` track for `{}`: expected {} values, got {}",
                    clip.name,
                    desc.node,
                    desc.times.len() * stride,
                    desc.values.len()
                ),
            ));
        }

        let data = match desc.target {
            TargetPath::Rotation => TrackData::Quaternion(KeyframeTrack::new(
                desc.times.clone(),
                desc.values
                    .chunks_exact(4)
                    .map(|q| Quat::from_xyzw(q[0], q[1], q[2], q[3]))
                    .collect(),
                desc.interpolation,
            )),
            TargetPath::Translation | TargetPath::Scale => TrackData::Vector3(KeyframeTrack::new(
                desc.times.clone(),
                desc.values
                    .chunks_exact(3)
                    .map(|v| Vec3::new(v[0], v[1], v[2]))
                    .collect(),
                desc.interpolation,
            )),
        };

        tracks.push(Track {
            meta: TrackMeta {
                node_name: desc.node.clone(),
                target: desc.target,
            },
            data,
        });
    }
    Ok(AnimationClip::new(clip.name.clone(), tracks))
}

/// Parses [`SceneDesc`] JSON.
#[derive(Debug, Default)]
pub struct JsonSceneParser;

impl AssetParser for JsonSceneParser {
    fn name(&self) -> &'static str {
        "json-scene"
    }

    fn parse(&self, uri: &str, bytes: &[u8]) -> Result<LoadedAsset> {
        let desc: SceneDesc = serde_json::from_slice(bytes)?;
        desc.build(uri)
    }
}
