#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! # Scrolly
//!
//! Orchestrates several independently rendered 3D scenes embedded in one
//! long-scrolling page and choreographs their cameras, materials and
//! element transforms against an eased scroll position.
//!
//! The crate owns the orchestration only. Rendering, page layout and asset
//! transport are collaborators behind traits ([`RenderSurface`], [`Layout`],
//! [`AssetReader`](assets::AssetReaderVariant)), with headless in-crate
//! implementations for tests and demos.
//!
//! ```rust,ignore
//! use scrolly::{Page, page::portfolio};
//!
//! let mut page = Page::from_config(portfolio(), layout, loader, |cfg| {
//!     HeadlessSurface::new(&cfg.surface_id, 4)
//! });
//! page.on_load(0.0);
//! page.frame(16.0);
//! ```

pub mod animation;
pub mod assets;
pub mod context;
pub mod controls;
pub mod core;
pub mod dom;
pub mod errors;
pub mod page;
pub mod render;
pub mod scene;
pub mod scroll;
pub mod viewport;

pub use animation::{AnimationAction, AnimationClip, AnimationMixer, Ease, LoopMode};
pub use assets::{AssetLoader, AssetReaderVariant, LoadRequest, LoadStatus, LoadedAsset};
pub use context::{MaterialStrategy, RenderMode, SceneConfig, SceneContext};
pub use controls::OrbitControls;
pub use dom::{Layout, Property, PropertyTarget, StaticLayout, StyleStore};
pub use errors::{Result, ScrollyError};
pub use page::{Page, PageConfig};
pub use render::{HeadlessSurface, RenderSurface};
pub use scene::{Camera, Light, Material, Node, SceneGraph, Transform};
pub use scroll::{
    AnimationScheduler, CompletionAction, Scrub, ScrollTimeline, SmoothScroll, StepScheduler,
    TimelineConfig, TimelineEngine,
};
pub use viewport::Viewport;
