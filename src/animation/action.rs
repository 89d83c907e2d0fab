use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::animation::tracks::KeyframeCursor;

/// What happens when the playhead runs past either end of the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Hold the end pose and finish.
    Once,
    #[default]
    Loop,
    /// Play forward, then backward, then forward again.
    PingPong,
}

/// Playback state of one clip inside an [`AnimationMixer`].
///
/// The action tracks an unfolded playhead; the time the tracks are sampled
/// at is derived from it through the loop mode, so reflections and wraps
/// never feed back into the next advance.
///
/// [`AnimationMixer`]: crate::animation::AnimationMixer
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,
    playhead: f32,
    finished: bool,

    pub speed: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    pub bindings: Vec<PropertyBinding>,
    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    /// A looping action that starts playing right away.
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let cursors = vec![KeyframeCursor::default(); clip.tracks.len()];
        Self {
            clip,
            playhead: 0.0,
            finished: false,
            speed: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
            bindings: Vec::new(),
            track_cursors: cursors,
        }
    }

    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Whether [`update`](Self::update) still moves the playhead.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.enabled && !self.paused && !self.finished && self.weight > 0.0
    }

    /// A `Once` action that reached either end of its clip.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Clip-local time the tracks are sampled at, in `[0, duration]`.
    #[must_use]
    pub fn time(&self) -> f32 {
        let duration = self.clip.duration;
        if duration <= 0.0 {
            return 0.0;
        }
        match self.loop_mode {
            LoopMode::Once => self.playhead.clamp(0.0, duration),
            LoopMode::Loop => self.playhead.rem_euclid(duration),
            LoopMode::PingPong => {
                let phase = self.playhead.rem_euclid(duration * 2.0);
                if phase > duration {
                    duration * 2.0 - phase
                } else {
                    phase
                }
            }
        }
    }

    /// Rewinds to the start and clears the finished flag.
    pub fn reset(&mut self) {
        self.playhead = 0.0;
        self.finished = false;
        self.track_cursors.fill(KeyframeCursor::default());
    }

    /// Advances the playhead by `dt` seconds scaled by `speed`.
    pub fn update(&mut self, dt: f32) {
        let duration = self.clip.duration;
        if !self.is_running() || duration <= 0.0 {
            return;
        }

        self.playhead += dt * self.speed;

        match self.loop_mode {
            LoopMode::Once => {
                if !(0.0..duration).contains(&self.playhead) {
                    self.playhead = self.playhead.clamp(0.0, duration);
                    self.finished = true;
                }
            }
            // Keep the playhead within one period so it never loses precision.
            LoopMode::Loop => self.playhead = self.playhead.rem_euclid(duration),
            LoopMode::PingPong => self.playhead = self.playhead.rem_euclid(duration * 2.0),
        }
    }
}
