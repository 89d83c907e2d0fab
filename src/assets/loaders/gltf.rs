//! glTF 2.0 / GLB parser.
//!
//! Reads the node hierarchy, mesh materials (metallic-roughness factors of
//! the first primitive) and translation/rotation/scale animation channels.
//! Geometry buffers stay with the rendering collaborator.

use glam::{Quat, Vec3};
use gltf::animation::util::ReadOutputs;

use crate::animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use crate::assets::loaders::{AssetParser, LoadedAsset};
use crate::errors::Result;
use crate::scene::{Material, Mesh, Node, NodeKey, SceneGraph};

#[derive(Debug, Default)]
pub struct GltfParser;

impl AssetParser for GltfParser {
    fn name(&self) -> &'static str {
        "gltf"
    }

    fn parse(&self, uri: &str, bytes: &[u8]) -> Result<LoadedAsset> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;

        let mut graph = SceneGraph::new();
        let root = graph.add_node(Node::new("gltf_root"));

        // Create every node first so hierarchy links can reference any index.
        let mut mapping: Vec<NodeKey> = Vec::with_capacity(document.nodes().count());
        for node in document.nodes() {
            mapping.push(graph.add_node(create_node(&node)));
        }

        for node in document.nodes() {
            for child in node.children() {
                graph.attach(mapping[child.index()], mapping[node.index()]);
            }
        }

        if let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) {
            for node in scene.nodes() {
                graph.attach(mapping[node.index()], root);
            }
        }
        // Nodes outside the displayed scene are not part of the model.
        graph.root_nodes.retain(|&key| key == root);

        let clips = load_animations(&document, &buffers);
        log::debug!(
            "{uri}: parsed {} nodes, {} clips",
            mapping.len(),
            clips.len()
        );

        Ok(LoadedAsset { graph, root, clips })
    }
}

fn create_node(node: &gltf::Node<'_>) -> Node {
    let name = node
        .name()
        .map_or_else(|| format!("Node_{}", node.index()), str::to_string);

    let mut engine_node = Node::new(name);
    let (t, r, s) = node.transform().decomposed();
    engine_node.transform.position = Vec3::from_array(t);
    engine_node.transform.rotation = Quat::from_array(r);
    engine_node.transform.scale = Vec3::from_array(s);

    if let Some(mesh) = node.mesh() {
        let material = mesh.primitives().next().map(|primitive| {
            let gltf_mat = primitive.material();
            let pbr = gltf_mat.pbr_metallic_roughness();
            let [r, g, b, _a] = pbr.base_color_factor();
            Material::standard(Vec3::new(r, g, b), pbr.metallic_factor(), pbr.roughness_factor())
                .with_name(gltf_mat.name().unwrap_or("default"))
        });
        let mesh_name = mesh
            .name()
            .map_or_else(|| format!("Mesh_{}", mesh.index()), str::to_string);
        let mut engine_mesh = Mesh::new(mesh_name, material);
        engine_mesh.primitive_count = mesh.primitives().count();
        engine_node.mesh = Some(engine_mesh);
    }

    engine_node
}

fn load_animations(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Vec<AnimationClip> {
    let mut animations = Vec::new();

    for anim in document.animations() {
        let mut tracks = Vec::new();

        for channel in anim.channels() {
            let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
            let gltf_node = channel.target().node();
            let node_name = gltf_node
                .name()
                .map_or_else(|| format!("Node_{}", gltf_node.index()), str::to_string);

            let Some(inputs) = reader.read_inputs() else {
                continue;
            };
            let times: Vec<f32> = inputs.collect();

            let interpolation = match channel.sampler().interpolation() {
                gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
                gltf::animation::Interpolation::Step => InterpolationMode::Step,
                gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
            };

            let (target, data) = match reader.read_outputs() {
                Some(ReadOutputs::Translations(iter)) => (
                    TargetPath::Translation,
                    TrackData::Vector3(KeyframeTrack::new(
                        times,
                        iter.map(Vec3::from_array).collect(),
                        interpolation,
                    )),
                ),
                Some(ReadOutputs::Rotations(iter)) => (
                    TargetPath::Rotation,
                    TrackData::Quaternion(KeyframeTrack::new(
                        times,
                        iter.into_f32().map(Quat::from_array).collect(),
                        interpolation,
                    )),
                ),
                Some(ReadOutputs::Scales(iter)) => (
                    TargetPath::Scale,
                    TrackData::Vector3(KeyframeTrack::new(
                        times,
                        iter.map(Vec3::from_array).collect(),
                        interpolation,
                    )),
                ),
                // Morph target weights are not played back.
                _ => continue,
            };

            tracks.push(Track {
                meta: TrackMeta { node_name, target },
                data,
            });
        }

        animations.push(AnimationClip::new(anim.name().unwrap_or("anim"), tracks));
    }

    animations
}
