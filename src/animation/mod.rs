//! Animation Module
//!
//! Clip playback for loaded models and easing curves for scroll-driven tweens.
//!
//! - [`AnimationMixer`]: the per-scene animation player
//! - [`AnimationAction`]: playback state of one clip
//! - [`AnimationClip`] / [`KeyframeTrack`]: keyframed node properties
//! - [`Ease`]: curves shared with the scroll timeline engine

mod values;
pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod ease;
pub mod mixer;
pub mod tracks;

pub use action::{AnimationAction, LoopMode};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use ease::Ease;
pub use mixer::AnimationMixer;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
