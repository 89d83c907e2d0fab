//! Scroll Module
//!
//! - [`SmoothScroll`]: eased scroll position driven by raw input
//! - [`TimelineEngine`]: maps that position onto registered [`ScrollTimeline`]s
//! - [`AnimationScheduler`]: turns timeline progress into property writes
//! - [`Anchor`] / [`TriggerRegion`]: `"top center"` style boundaries

pub mod anchor;
pub mod engine;
pub mod scheduler;
pub mod smooth;
pub mod timeline;
pub mod trigger;

pub use anchor::{Anchor, Offset};
pub use engine::{TimelineEngine, TimelineKey};
pub use scheduler::{AnimationScheduler, ScheduleHandle, StepConfig, StepKind, StepScheduler};
pub use smooth::{ScrollEvent, ScrollListener, SmoothScroll, SmoothScrollConfig};
pub use timeline::{CompletionAction, Scrub, ScrollTimeline, TimelineConfig, TimelineState};
pub use trigger::{ScrollRange, TriggerRegion};
