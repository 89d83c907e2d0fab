use serde::{Deserialize, Serialize};

use crate::context::SceneConfig;
use crate::errors::Result;
use crate::scroll::{SmoothScrollConfig, TimelineConfig};

/// Declarative description of a whole page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub scenes: Vec<SceneConfig>,
    pub timelines: Vec<TimelineConfig>,
    pub smooth_scroll: SmoothScrollConfig,
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
