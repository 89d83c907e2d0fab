//! Asset Module
//!
//! - [`AssetLoader`]: issues loads and pumps them cooperatively
//! - [`LoadRequest`]: per-load state (`pending → loaded | failed`) and progress
//! - [`AssetReaderVariant`]: byte sources (file, memory, HTTP)
//! - [`loaders`]: glTF/GLB and JSON scene parsers, texture decoding

pub mod io;
pub mod loader;
pub mod loaders;

pub use io::{AssetReaderVariant, FileAssetReader, MemoryAssetReader};
#[cfg(feature = "http")]
pub use io::HttpAssetReader;
pub use loader::{AssetLoader, LoadRequest, LoadStatus};
pub use loaders::{AssetParser, ExtensionParser, JsonSceneParser, LoadedAsset, SceneDesc};
#[cfg(feature = "gltf")]
pub use loaders::GltfParser;
