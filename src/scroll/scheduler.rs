//! Interpolation of timeline steps.
//!
//! The engine decides *how far* a timeline has progressed; an
//! [`AnimationScheduler`] decides what every target property looks like at
//! that progress.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use crate::animation::Ease;
use crate::dom::{Property, PropertyTarget};

new_key_type! {
    pub struct ScheduleHandle;
}

/// Direction of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Animate from the current value to the given one.
    #[default]
    To,
    /// Animate from the given value back to the current one.
    From,
}

/// One step of a timeline: the target state of some element properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    pub targets: Vec<String>,
    #[serde(default)]
    pub kind: StepKind,
    pub values: BTreeMap<Property, f32>,
    /// Relative share of the timeline. Steps default to equal shares.
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub ease: Ease,
}

fn default_weight() -> f32 {
    1.0
}

impl StepConfig {
    #[must_use]
    pub fn animate_to(
        target: impl Into<String>,
        values: impl IntoIterator<Item = (Property, f32)>,
    ) -> Self {
        Self {
            targets: vec![target.into()],
            kind: StepKind::To,
            values: values.into_iter().collect(),
            weight: 1.0,
            ease: Ease::Linear,
        }
    }

    #[must_use]
    pub fn animate_from(
        target: impl Into<String>,
        values: impl IntoIterator<Item = (Property, f32)>,
    ) -> Self {
        Self {
            kind: StepKind::From,
            ..Self::animate_to(target, values)
        }
    }

    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Every `(selector, property)` pair this step writes.
    pub fn writes(&self) -> impl Iterator<Item = (&str, Property)> + '_ {
        self.targets
            .iter()
            .flat_map(|t| self.values.keys().map(move |&p| (t.as_str(), p)))
    }
}

/// Turns step lists into property writes at a given progress.
pub trait AnimationScheduler {
    /// Plans `steps`, reading current property values from `target` as the
    /// baseline.
    fn schedule(&mut self, steps: &[StepConfig], target: &dyn PropertyTarget) -> ScheduleHandle;

    /// Applies the planned state at `progress` (clamped to [0, 1]).
    fn seek(&mut self, handle: ScheduleHandle, progress: f32, target: &mut dyn PropertyTarget);
}

#[derive(Debug, Clone)]
struct Tween {
    selector: String,
    property: Property,
    from: f32,
    to: f32,
    window: (f32, f32),
    ease: Ease,
    /// Earliest tween on its property; owns the value before its window.
    leads: bool,
}

impl Tween {
    fn local_progress(&self, progress: f32) -> f32 {
        let (start, end) = self.window;
        if end > start {
            ((progress - start) / (end - start)).clamp(0.0, 1.0)
        } else if progress >= end {
            1.0
        } else {
            0.0
        }
    }
}

/// Default scheduler: steps laid end to end across [0, 1] by weight.
#[derive(Debug, Default)]
pub struct StepScheduler {
    plans: SlotMap<ScheduleHandle, Vec<Tween>>,
}

impl StepScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationScheduler for StepScheduler {
    fn schedule(&mut self, steps: &[StepConfig], target: &dyn PropertyTarget) -> ScheduleHandle {
        let total: f32 = steps.iter().map(|s| s.weight.max(0.0)).sum();
        let equal = total <= 0.0;
        let share = |step: &StepConfig| {
            if equal {
                1.0 / steps.len() as f32
            } else {
                step.weight.max(0.0) / total
            }
        };

        let mut current: FxHashMap<(&str, Property), f32> = FxHashMap::default();
        let mut tweens = Vec::new();
        let mut cursor = 0.0_f32;

        for step in steps {
            let window = (cursor, (cursor + share(step)).min(1.0));
            cursor = window.1;

            for (selector, property) in step.writes() {
                let Some(&value) = step.values.get(&property) else {
                    continue;
                };
                let leads = !current.contains_key(&(selector, property));
                let now = *current
                    .entry((selector, property))
                    .or_insert_with(|| target.get(selector, property));

                let (from, to) = match step.kind {
                    StepKind::To => {
                        current.insert((selector, property), value);
                        (now, value)
                    }
                    StepKind::From => (value, now),
                };

                tweens.push(Tween {
                    selector: selector.to_string(),
                    property,
                    from,
                    to,
                    window,
                    ease: step.ease,
                    leads,
                });
            }
        }

        self.plans.insert(tweens)
    }

    fn seek(&mut self, handle: ScheduleHandle, progress: f32, target: &mut dyn PropertyTarget) {
        let Some(tweens) = self.plans.get(handle) else {
            return;
        };
        let progress = progress.clamp(0.0, 1.0);

        // Tweens are stored in step order, so a later tween that has started
        // overwrites the end value its predecessor left behind.
        for tween in tweens {
            let local = tween.local_progress(progress);
            if tween.leads || local > 0.0 {
                let t = tween.ease.apply(local);
                target.set(
                    &tween.selector,
                    tween.property,
                    tween.from + (tween.to - tween.from) * t,
                );
            }
        }
    }
}
