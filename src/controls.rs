//! Orbit camera controller with angular limits.
//!
//! The camera orbits a target on a sphere. Polar angle `phi` is measured from
//! +Y, azimuth `theta` around +Y starting at +Z. User input accumulates into a
//! pending delta which [`OrbitControls::update`] applies (optionally damped)
//! and then clamps, so the camera never leaves the configured ranges.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::Transform;

/// Declarative controller limits, as written in scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsSpec {
    pub enable_zoom: bool,
    pub min_polar_angle: Option<f32>,
    pub max_polar_angle: Option<f32>,
    pub min_azimuth_angle: Option<f32>,
    pub max_azimuth_angle: Option<f32>,
    pub enable_damping: bool,
}

impl Default for ControlsSpec {
    fn default() -> Self {
        Self {
            enable_zoom: true,
            min_polar_angle: None,
            max_polar_angle: None,
            min_azimuth_angle: None,
            max_azimuth_angle: None,
            enable_damping: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub enable_zoom: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_azimuth_angle: f32,
    pub max_azimuth_angle: f32,

    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
    zoom_delta: f32,
}

const EPS: f32 = 0.0001;

impl OrbitControls {
    /// Orbit around `target` starting from the camera's current position.
    #[must_use]
    pub fn new(camera_position: Vec3, target: Vec3) -> Self {
        let offset = camera_position - target;
        let radius = offset.length().max(EPS);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            damping_factor: 0.05,
            enable_damping: false,
            enable_zoom: true,
            min_distance: 0.0,
            max_distance: f32::INFINITY,

            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,

            target,
            radius,
            theta,
            phi,

            rotate_delta: Vec2::ZERO,
            zoom_delta: 0.0,
        }
    }

    /// Applies declared limits. The current angles are clamped immediately.
    #[must_use]
    pub fn with_spec(mut self, spec: &ControlsSpec) -> Self {
        self.enable_zoom = spec.enable_zoom;
        self.enable_damping = spec.enable_damping;
        if let Some(v) = spec.min_polar_angle {
            self.min_polar_angle = v;
        }
        if let Some(v) = spec.max_polar_angle {
            self.max_polar_angle = v;
        }
        if let Some(v) = spec.min_azimuth_angle {
            self.min_azimuth_angle = v;
        }
        if let Some(v) = spec.max_azimuth_angle {
            self.max_azimuth_angle = v;
        }
        self.clamp_angles();
        self
    }

    /// Queues a rotation in radians. Out-of-range requests are clamped on the
    /// next update, never rejected.
    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        self.rotate_delta += Vec2::new(d_azimuth, d_polar) * self.rotate_speed;
    }

    /// Queues a dolly step; positive values move closer. Ignored while zoom is
    /// disabled.
    pub fn zoom(&mut self, steps: f32) {
        if self.enable_zoom {
            self.zoom_delta += steps;
        }
    }

    /// Whether rotate or zoom input is waiting for the next update.
    #[must_use]
    pub fn has_pending_input(&self) -> bool {
        self.rotate_delta != Vec2::ZERO || self.zoom_delta != 0.0
    }

    /// Applies pending input and writes the resulting camera placement.
    pub fn update(&mut self, transform: &mut Transform, dt: f32) {
        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt.max(0.0) * target_fps);
            let applied = self.rotate_delta * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        if self.zoom_delta != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(self.zoom_delta.abs());
            if self.zoom_delta > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance.max(EPS), self.max_distance);
            self.zoom_delta = 0.0;
        }

        self.clamp_angles();

        transform.position = self.target + self.offset();
        transform.look_at(self.target, Vec3::Y);
    }

    fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }

    fn clamp_angles(&mut self) {
        let min_phi = self.min_polar_angle.max(EPS);
        let max_phi = self.max_polar_angle.min(PI - EPS).max(min_phi);
        self.phi = self.phi.clamp(min_phi, max_phi);

        if self.min_azimuth_angle.is_finite() || self.max_azimuth_angle.is_finite() {
            let max_theta = self.max_azimuth_angle.max(self.min_azimuth_angle);
            self.theta = self.theta.clamp(self.min_azimuth_angle, max_theta);
        }
    }
}
