//! Asset format parsers.
//!
//! A parser turns fetched bytes into a [`LoadedAsset`]: a scene graph with a
//! single root node plus the motion clips bundled with it.

#[cfg(feature = "gltf")]
pub mod gltf;
pub mod image;
pub mod json;

#[cfg(feature = "gltf")]
pub use self::gltf::GltfParser;
pub use self::image::decode_texture;
pub use self::json::{JsonSceneParser, SceneDesc};

use crate::animation::AnimationClip;
use crate::errors::{Result, ScrollyError};
use crate::scene::{NodeKey, SceneGraph};

/// A successfully loaded asset.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub graph: SceneGraph,
    /// Root every clip is bound against.
    pub root: NodeKey,
    pub clips: Vec<AnimationClip>,
}

pub trait AssetParser {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    fn parse(&self, uri: &str, bytes: &[u8]) -> Result<LoadedAsset>;
}

/// Dispatches on the URI extension: `.glb`/`.gltf` to glTF, `.json` to the
/// JSON scene description format.
#[derive(Debug, Default)]
pub struct ExtensionParser;

impl AssetParser for ExtensionParser {
    fn name(&self) -> &'static str {
        "by-extension"
    }

    fn parse(&self, uri: &str, bytes: &[u8]) -> Result<LoadedAsset> {
        let path = uri.split(['?', '#']).next().unwrap_or(uri);
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => JsonSceneParser.parse(uri, bytes),
            "glb" | "gltf" => {
                #[cfg(feature = "gltf")]
                {
                    GltfParser.parse(uri, bytes)
                }
                #[cfg(not(feature = "gltf"))]
                {
                    Err(ScrollyError::FeatureNotEnabled(
                        "glTF support requires the `gltf` feature".to_string(),
                    ))
                }
            }
            _ => Err(ScrollyError::asset_load(
                uri,
                format!("no parser for extension `{ext}`"),
            )),
        }
    }
}
