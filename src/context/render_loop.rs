use glam::Vec3;

use crate::context::config::RenderMode;
use crate::render::RenderSurface;

/// Frame-driving discipline of one scene.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderLoop {
    /// Ticks whenever the surface's own frame callback is running.
    SelfPaced,
    /// Ticks only when the previous frame scheduled another one.
    ExternallyPaced { spin: Vec3, scheduled: bool },
}

impl RenderLoop {
    #[must_use]
    pub fn from_mode(mode: &RenderMode) -> Self {
        match mode {
            RenderMode::SelfPaced => Self::SelfPaced,
            RenderMode::ExternallyPaced { spin } => Self::ExternallyPaced {
                spin: Vec3::from_array(*spin),
                scheduled: false,
            },
        }
    }

    /// Starts the loop. Idempotent.
    pub fn start(&mut self, surface: &mut dyn RenderSurface) {
        match self {
            Self::SelfPaced => surface.set_animation_loop(true),
            Self::ExternallyPaced { scheduled, .. } => *scheduled = true,
        }
    }

    /// Consumes the pending tick, if any.
    pub fn take_tick(&mut self, surface: &dyn RenderSurface) -> bool {
        match self {
            Self::SelfPaced => surface.animation_loop_active(),
            Self::ExternallyPaced { scheduled, .. } => std::mem::take(scheduled),
        }
    }

    /// Called at the end of a drawn frame; an externally paced loop requests
    /// its next frame here.
    pub fn finish_tick(&mut self) {
        if let Self::ExternallyPaced { scheduled, .. } = self {
            *scheduled = true;
        }
    }

    /// Per-frame idle rotation applied to the model.
    #[must_use]
    pub fn spin(&self) -> Option<Vec3> {
        match self {
            Self::SelfPaced => None,
            Self::ExternallyPaced { spin, .. } => Some(*spin),
        }
    }
}
