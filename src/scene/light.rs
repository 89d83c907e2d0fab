use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::hex_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Point,
    Directional,
}

/// Declarative light description, as found in a scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub kind: LightKind,
    /// `0xRRGGBB`
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

impl LightSpec {
    #[must_use]
    pub fn point(color: u32, intensity: f32, position: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Point,
            color,
            intensity,
            position,
        }
    }

    #[must_use]
    pub fn directional(color: u32, intensity: f32, position: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            intensity,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

impl From<&LightSpec> for Light {
    fn from(spec: &LightSpec) -> Self {
        Self {
            kind: spec.kind,
            color: hex_color(spec.color),
            intensity: spec.intensity,
            position: Vec3::from_array(spec.position),
        }
    }
}
