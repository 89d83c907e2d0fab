use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeKey, SceneGraph};

pub struct Binder;

impl Binder {
    /// Resolves each track of `clip` to a node below `root` by name.
    /// Tracks naming unknown nodes are dropped.
    #[must_use]
    pub fn bind(graph: &SceneGraph, root: NodeKey, clip: &AnimationClip) -> Vec<PropertyBinding> {
        clip.tracks
            .iter()
            .enumerate()
            .filter_map(|(track_index, track)| {
                let node = graph.find_by_name(root, &track.meta.node_name);
                if node.is_none() {
                    log::trace!(
                        "clip `{}`: no node named `{}`",
                        clip.name,
                        track.meta.node_name
                    );
                }
                node.map(|node| PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                })
            })
            .collect()
    }
}
