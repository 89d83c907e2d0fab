use std::sync::Arc;

use crate::animation::action::AnimationAction;
use crate::animation::binder::Binder;
use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, TrackData};
use crate::scene::{NodeKey, SceneGraph};

/// Animation player: a set of clip actions bound to one model.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Binds every clip to the graph below `root` and starts it looping.
    #[must_use]
    pub fn with_clips(graph: &SceneGraph, root: NodeKey, clips: Vec<AnimationClip>) -> Self {
        let mut mixer = Self::new();
        for clip in clips {
            let bindings = Binder::bind(graph, root, &clip);
            let mut action = AnimationAction::new(Arc::new(clip));
            action.bindings = bindings;
            mixer.add_action(action);
        }
        mixer
    }

    pub fn add_action(&mut self, action: AnimationAction) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&AnimationAction> {
        self.actions.iter().find(|a| a.clip().name == name)
    }

    /// Advances every action by `dt` seconds and writes sampled values into
    /// the bound nodes.
    pub fn update(&mut self, dt: f32, graph: &mut SceneGraph) {
        let dt = dt.max(0.0);

        for action in &mut self.actions {
            action.update(dt);

            // Finished and paused actions keep holding their pose.
            if !action.enabled || action.weight <= 0.0 {
                continue;
            }

            let clip = Arc::clone(action.clip());
            let time = action.time();

            for binding in &action.bindings {
                let Some(track) = clip.tracks.get(binding.track_index) else {
                    continue;
                };
                let Some(cursor) = action.track_cursors.get_mut(binding.track_index) else {
                    continue;
                };
                let Some(node) = graph.get_node_mut(binding.node) else {
                    continue;
                };

                match (&track.data, binding.target) {
                    (TrackData::Vector3(t), TargetPath::Translation) => {
                        if let Some(val) = t.sample_with_cursor(time, cursor) {
                            node.transform.position = val;
                        }
                    }
                    (TrackData::Vector3(t), TargetPath::Scale) => {
                        if let Some(val) = t.sample_with_cursor(time, cursor) {
                            node.transform.scale = val;
                        }
                    }
                    (TrackData::Quaternion(t), TargetPath::Rotation) => {
                        if let Some(val) = t.sample_with_cursor(time, cursor) {
                            node.transform.rotation = val;
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
