//! Smooth scroll driver.
//!
//! Raw wheel input moves a *target* offset; every display refresh the
//! *animated* offset eases toward it. Programmatic scrolls run as fixed
//! duration tweens and are never fed back as input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animation::Ease;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Fraction of the remaining distance covered per 60 Hz frame.
    pub lerp: f32,
    pub wheel_multiplier: f32,
    /// Whether user input cancels a running programmatic scroll.
    pub interruptible: bool,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            lerp: 0.1,
            wheel_multiplier: 1.0,
            interruptible: false,
        }
    }
}

/// Emitted whenever the animated offset moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub scroll: f32,
    pub limit: f32,
    /// Offset change since the previous event.
    pub velocity: f32,
    /// `1` down, `-1` up.
    pub direction: i8,
    /// `scroll / limit`, or 0 on a page that cannot scroll.
    pub progress: f32,
}

#[derive(Debug, Clone, Copy)]
struct ScrollTween {
    from: f32,
    to: f32,
    duration: f32,
    ease: Ease,
    elapsed: f32,
}

/// Below this distance the animated offset snaps to the target.
const SETTLE: f32 = 0.01;

pub type ScrollListener = Box<dyn FnMut(&ScrollEvent)>;

pub struct SmoothScroll {
    config: SmoothScrollConfig,
    animated: f32,
    target: f32,
    limit: f32,
    direction: i8,
    last_time_ms: Option<f64>,
    tween: Option<ScrollTween>,
    listeners: Vec<ScrollListener>,
}

impl fmt::Debug for SmoothScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmoothScroll")
            .field("animated", &self.animated)
            .field("target", &self.target)
            .field("limit", &self.limit)
            .field("tween", &self.tween)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl SmoothScroll {
    #[must_use]
    pub fn new(config: SmoothScrollConfig) -> Self {
        Self {
            config,
            animated: 0.0,
            target: 0.0,
            limit: 0.0,
            direction: 0,
            last_time_ms: None,
            tween: None,
            listeners: Vec::new(),
        }
    }

    /// Eased scroll offset; what everything scroll-bound should read.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.animated
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[must_use]
    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// True while a programmatic scroll is running.
    #[must_use]
    pub fn is_scrolling_to(&self) -> bool {
        self.tween.is_some()
    }

    pub fn on_scroll(&mut self, listener: impl FnMut(&ScrollEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Maximum offset, normally document height minus viewport height.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.animated = self.animated.clamp(0.0, self.limit);
        if let Some(tween) = &mut self.tween {
            tween.to = tween.to.clamp(0.0, self.limit);
        }
    }

    /// Raw user input in pixels.
    pub fn on_wheel(&mut self, delta: f32) {
        if self.tween.is_some() {
            if !self.config.interruptible {
                return;
            }
            log::debug!("programmatic scroll interrupted by input");
            self.tween = None;
            self.target = self.animated;
        }
        self.target = (self.target + delta * self.config.wheel_multiplier).clamp(0.0, self.limit);
    }

    /// Starts a programmatic scroll. A non-positive duration jumps.
    pub fn scroll_to(&mut self, target: f32, duration: f32, ease: Ease) {
        let to = target.clamp(0.0, self.limit);
        if duration <= 0.0 {
            self.tween = None;
            self.target = to;
            self.animated = to;
            return;
        }
        self.tween = Some(ScrollTween {
            from: self.animated,
            to,
            duration,
            ease,
            elapsed: 0.0,
        });
    }

    /// Advances easing to `time_ms` (a display-refresh timestamp). Must be
    /// called every frame; nothing moves otherwise.
    pub fn raf(&mut self, time_ms: f64) -> Option<ScrollEvent> {
        let dt = self
            .last_time_ms
            .map_or(0.0, |last| ((time_ms - last) / 1000.0).max(0.0) as f32);
        self.last_time_ms = Some(time_ms);

        let previous = self.animated;
        if let Some(tween) = &mut self.tween {
            tween.elapsed += dt;
            let t = (tween.elapsed / tween.duration).min(1.0);
            self.animated = tween.from + (tween.to - tween.from) * tween.ease.apply(t);
            self.target = self.animated;
            if t >= 1.0 {
                self.animated = tween.to;
                self.target = tween.to;
                self.tween = None;
            }
        } else {
            let alpha = 1.0 - (-self.config.lerp * 60.0 * dt).exp();
            self.animated += (self.target - self.animated) * alpha;
            if (self.target - self.animated).abs() < SETTLE {
                self.animated = self.target;
            }
        }

        let velocity = self.animated - previous;
        if velocity == 0.0 {
            return None;
        }
        self.direction = if velocity > 0.0 { 1 } else { -1 };

        let event = ScrollEvent {
            scroll: self.animated,
            limit: self.limit,
            velocity,
            direction: self.direction,
            progress: if self.limit > 0.0 { self.animated / self.limit } else { 0.0 },
        };
        log::debug!("{event:?}");
        for listener in &mut self.listeners {
            listener(&event);
        }
        Some(event)
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(SmoothScrollConfig::default())
    }
}
