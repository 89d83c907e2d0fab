use serde::{Deserialize, Serialize};

use crate::controls::ControlsSpec;
use crate::scene::LightSpec;

/// Perspective camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpec {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: Option<[f32; 3]>,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 5.0],
            look_at: None,
        }
    }
}

impl CameraSpec {
    #[must_use]
    pub fn new(fov: f32, position: [f32; 3]) -> Self {
        Self {
            fov,
            position,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn looking_at(mut self, target: [f32; 3]) -> Self {
        self.look_at = Some(target);
        self
    }
}

/// How mesh materials of a freshly loaded model are rewritten.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialStrategy {
    /// Use the materials as authored.
    #[default]
    Keep,
    /// Assign a colour map loaded from `source` to every mesh material.
    TextureOverlay { source: String },
    /// Dispose every mesh material and substitute a flat one.
    Replace {
        color: u32,
        metalness: f32,
        roughness: f32,
    },
}

/// Who drives a scene's frames.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderMode {
    /// The surface runs its own frame callback.
    #[default]
    SelfPaced,
    /// Frames are rescheduled explicitly each tick, and the model spins by
    /// `spin` (XYZ Euler radians) per frame.
    ExternallyPaced {
        #[serde(default)]
        spin: [f32; 3],
    },
}

/// Lighting change applied once, `delay_secs` after page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredLighting {
    pub delay_secs: f64,
    #[serde(default)]
    pub clear_color: Option<u32>,
    #[serde(default)]
    pub lights: Vec<LightSpec>,
}

/// Everything needed to construct one scene context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    /// Id of the canvas-like render surface element.
    pub surface_id: String,
    /// Id of the element the surface is sized against.
    pub container_id: String,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub camera: CameraSpec,
    #[serde(default)]
    pub lights: Vec<LightSpec>,
    #[serde(default)]
    pub clear_color: u32,
    #[serde(default)]
    pub controls: Option<ControlsSpec>,
    #[serde(default)]
    pub material_strategy: MaterialStrategy,
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default)]
    pub deferred_lighting: Option<DeferredLighting>,
}

impl SceneConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, surface_id: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surface_id: surface_id.into(),
            container_id: container_id.into(),
            asset: None,
            camera: CameraSpec::default(),
            lights: Vec::new(),
            clear_color: 0x000000,
            controls: None,
            material_strategy: MaterialStrategy::Keep,
            render_mode: RenderMode::SelfPaced,
            deferred_lighting: None,
        }
    }
}
