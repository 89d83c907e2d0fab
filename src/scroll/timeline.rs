//! Scroll-bound timelines.

use serde::{Deserialize, Serialize};

use crate::animation::Ease;
use crate::scroll::anchor::{Anchor, Offset};
use crate::scroll::scheduler::{ScheduleHandle, StepConfig};
use crate::scroll::trigger::{ScrollRange, TriggerRegion};

/// How applied progress follows scroll progress.
///
/// In configuration this is written as `true` (exact) or a number of
/// seconds (smoothed). Every timeline is scroll-scrubbed, so `false` is
/// rejected rather than read as "not scrubbed".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ScrubRepr", into = "ScrubRepr")]
pub enum Scrub {
    /// Applied progress equals scroll progress.
    #[default]
    Exact,
    /// Applied progress closes half the remaining gap every `n` seconds.
    /// A half-life that is not a positive finite number behaves as `Exact`.
    Smooth(f32),
}

impl Scrub {
    /// Smoothing half-life in seconds, or `None` when progress snaps.
    #[must_use]
    pub fn half_life(self) -> Option<f32> {
        match self {
            Self::Smooth(s) if s.is_finite() && s > 0.0 => Some(s),
            _ => None,
        }
    }

    /// Collapses a degenerate half-life to `Exact`.
    #[must_use]
    pub fn normalized(self) -> Self {
        self.half_life().map_or(Self::Exact, Self::Smooth)
    }
}

/// `true` or a number of seconds, as written in configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum ScrubRepr {
    Flag(bool),
    Seconds(f32),
}

impl TryFrom<ScrubRepr> for Scrub {
    type Error = String;

    fn try_from(repr: ScrubRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            ScrubRepr::Flag(true) => Ok(Self::Exact),
            ScrubRepr::Flag(false) => {
                Err("`scrub: false` is not supported; timelines always follow the scroll".to_string())
            }
            ScrubRepr::Seconds(s) => Ok(Self::Smooth(s).normalized()),
        }
    }
}

impl From<Scrub> for ScrubRepr {
    fn from(scrub: Scrub) -> Self {
        match scrub {
            Scrub::Exact => Self::Flag(true),
            Scrub::Smooth(s) => Self::Seconds(s),
        }
    }
}

/// One-shot side effect of reaching the end of a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompletionAction {
    /// Animate the page scroll so `section` (an element id) is at the top.
    ScrollTo {
        section: String,
        #[serde(default = "default_scroll_duration")]
        duration: f32,
        #[serde(default)]
        ease: Ease,
    },
}

fn default_scroll_duration() -> f32 {
    0.5
}

/// Declarative description of a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub name: String,
    pub trigger: String,
    #[serde(default = "default_start")]
    pub start: Anchor,
    #[serde(default = "default_end")]
    pub end: Anchor,
    #[serde(default)]
    pub scrub: Scrub,
    /// Log the resolved start/end offsets whenever they are computed.
    #[serde(default)]
    pub markers: bool,
    pub steps: Vec<StepConfig>,
    #[serde(default)]
    pub on_complete: Option<CompletionAction>,
}

/// `"top bottom"`: the trigger's top enters the viewport.
fn default_start() -> Anchor {
    Anchor::new(Offset::Fraction(0.0), Offset::Fraction(1.0))
}

/// `"bottom top"`: the trigger's bottom leaves the viewport.
fn default_end() -> Anchor {
    Anchor::new(Offset::Fraction(1.0), Offset::Fraction(0.0))
}

impl TimelineConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, trigger: impl Into<String>, start: Anchor, end: Anchor) -> Self {
        Self {
            name: name.into(),
            trigger: trigger.into(),
            start,
            end,
            scrub: Scrub::Exact,
            markers: false,
            steps: Vec::new(),
            on_complete: None,
        }
    }

    #[must_use]
    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    #[must_use]
    pub fn markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn step(mut self, step: StepConfig) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn on_complete(mut self, action: CompletionAction) -> Self {
        self.on_complete = Some(action);
        self
    }

    #[must_use]
    pub fn region(&self) -> TriggerRegion {
        TriggerRegion {
            trigger: self.trigger.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    Idle,
    Scrubbing,
    Completed,
}

/// Runtime state of a registered timeline.
#[derive(Debug)]
pub struct ScrollTimeline {
    config: TimelineConfig,
    pub(crate) handle: ScheduleHandle,
    range: Option<ScrollRange>,
    applied: f32,
    state: TimelineState,
    primed: bool,
}

/// Gap below which smoothed progress snaps to its target.
const SNAP: f32 = 1e-4;

impl ScrollTimeline {
    pub(crate) fn new(config: TimelineConfig, handle: ScheduleHandle) -> Self {
        Self {
            config,
            handle,
            range: None,
            applied: 0.0,
            state: TimelineState::Idle,
            primed: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Progress currently applied to the targets.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.applied
    }

    #[must_use]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    #[must_use]
    pub fn range(&self) -> Option<ScrollRange> {
        self.range
    }

    pub(crate) fn set_range(&mut self, range: Option<ScrollRange>) {
        if self.config.markers {
            match range {
                Some(r) => log::info!(
                    "[{}] start {} at {:.1}, end {} at {:.1}",
                    self.config.name,
                    self.config.start,
                    r.start,
                    self.config.end,
                    r.end
                ),
                None => log::info!("[{}] trigger `{}` not on page", self.config.name, self.config.trigger),
            }
        }
        self.range = range;
    }

    /// Advances applied progress for the given scroll position. Returns the
    /// completion action when this tick crosses forward into completion.
    ///
    /// The first evaluation only establishes state: a page that opens with a
    /// timeline already complete does not fire its action.
    pub(crate) fn advance(&mut self, scroll: f32, dt: f32) -> Option<CompletionAction> {
        let range = self.range?;
        let raw = range.progress(scroll);

        let next = match self.config.scrub.half_life() {
            Some(half_life) if self.primed => {
                let alpha = 1.0 - 0.5_f32.powf(dt.max(0.0) / half_life);
                let stepped = self.applied + (raw - self.applied) * alpha;
                if (raw - stepped).abs() < SNAP { raw } else { stepped }
            }
            _ => raw,
        }
        .clamp(0.0, 1.0);

        let previous = self.state;
        self.applied = next;
        self.state = if next >= 1.0 {
            TimelineState::Completed
        } else if next <= 0.0 {
            TimelineState::Idle
        } else {
            TimelineState::Scrubbing
        };

        let was_primed = std::mem::replace(&mut self.primed, true);
        if !was_primed || previous == TimelineState::Completed || self.state != TimelineState::Completed {
            return None;
        }

        log::debug!("[{}] completed", self.config.name);
        self.config.on_complete.clone()
    }
}
