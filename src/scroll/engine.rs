use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::dom::{Layout, Property, PropertyTarget};
use crate::errors::{Result, ScrollyError};
use crate::scroll::scheduler::{AnimationScheduler, StepScheduler};
use crate::scroll::timeline::{CompletionAction, ScrollTimeline, TimelineConfig};

new_key_type! {
    pub struct TimelineKey;
}

/// Owns every registered timeline and scrubs them against one scroll
/// position per tick.
///
/// Each `(selector, property)` pair may be written by one timeline only, so
/// timelines never fight over a value.
#[derive(Debug)]
pub struct TimelineEngine<A: AnimationScheduler = StepScheduler> {
    scheduler: A,
    timelines: SlotMap<TimelineKey, ScrollTimeline>,
    order: Vec<TimelineKey>,
    owners: FxHashMap<(String, Property), TimelineKey>,
}

impl TimelineEngine<StepScheduler> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_scheduler(StepScheduler::new())
    }
}

impl Default for TimelineEngine<StepScheduler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AnimationScheduler> TimelineEngine<A> {
    #[must_use]
    pub fn with_scheduler(scheduler: A) -> Self {
        Self {
            scheduler,
            timelines: SlotMap::with_key(),
            order: Vec::new(),
            owners: FxHashMap::default(),
        }
    }

    /// Registers a timeline. Baselines are read from `target` now; trigger
    /// offsets are resolved from `layout` now and on every [`refresh`].
    ///
    /// [`refresh`]: Self::refresh
    pub fn register(
        &mut self,
        config: TimelineConfig,
        layout: &dyn Layout,
        target: &dyn PropertyTarget,
    ) -> Result<TimelineKey> {
        for step in &config.steps {
            for (selector, property) in step.writes() {
                if let Some(owner) = self.owners.get(&(selector.to_string(), property)) {
                    return Err(ScrollyError::PropertyConflict {
                        selector: selector.to_string(),
                        property,
                        owner: self.timelines[*owner].name().to_string(),
                    });
                }
            }
        }

        for selector in config.steps.iter().flat_map(|s| &s.targets) {
            if layout.element_rect(selector).is_none() {
                log::warn!("[{}] target `{selector}` not found on page", config.name);
            }
        }

        let handle = self.scheduler.schedule(&config.steps, target);
        let range = config.region().resolve(layout);
        if range.is_none() {
            log::warn!("[{}] trigger `{}` not found; timeline stays idle", config.name, config.trigger);
        }

        let writes: Vec<(String, Property)> = config
            .steps
            .iter()
            .flat_map(|s| s.writes().map(|(sel, p)| (sel.to_string(), p)))
            .collect();

        let mut timeline = ScrollTimeline::new(config, handle);
        timeline.set_range(range);
        let key = self.timelines.insert(timeline);
        self.order.push(key);
        for write in writes {
            self.owners.insert(write, key);
        }
        Ok(key)
    }

    /// Re-resolves every trigger region, e.g. after a resize.
    pub fn refresh(&mut self, layout: &dyn Layout) {
        for &key in &self.order {
            if let Some(timeline) = self.timelines.get_mut(key) {
                let range = timeline.config().region().resolve(layout);
                timeline.set_range(range);
            }
        }
    }

    /// Scrubs all timelines to `scroll` and returns the completion actions
    /// fired by this tick, in registration order.
    pub fn update(&mut self, scroll: f32, dt: f32, target: &mut dyn PropertyTarget) -> Vec<CompletionAction> {
        let mut fired = Vec::new();
        for &key in &self.order {
            let Some(timeline) = self.timelines.get_mut(key) else {
                continue;
            };
            if timeline.range().is_none() {
                continue;
            }
            if let Some(action) = timeline.advance(scroll, dt) {
                fired.push(action);
            }
            self.scheduler.seek(timeline.handle, timeline.progress(), target);
        }
        fired
    }

    #[must_use]
    pub fn get(&self, key: TimelineKey) -> Option<&ScrollTimeline> {
        self.timelines.get(key)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ScrollTimeline> {
        self.order
            .iter()
            .filter_map(|&k| self.timelines.get(k))
            .find(|t| t.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScrollTimeline> {
        self.order.iter().filter_map(|&k| self.timelines.get(k))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
