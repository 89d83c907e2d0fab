//! Render surface abstraction.
//!
//! A [`RenderSurface`] is the drawing backend bound to one canvas-like
//! element. The orchestration hands it a [`FrameView`] per frame and never
//! inspects pixels. [`HeadlessSurface`] records what it was asked to draw.

mod headless;

pub use headless::{FrameRecord, HeadlessSurface};

use glam::Vec3;

use crate::core::Size;
use crate::scene::{Camera, Light, Material, SceneGraph};

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    pub lights: &'a [Light],
    /// `None` until the scene's asset has loaded, or forever after a failure.
    pub model: Option<&'a SceneGraph>,
    pub clear_color: Vec3,
}

pub trait RenderSurface {
    /// Identifier of the surface element.
    fn id(&self) -> &str;

    fn size(&self) -> Size;

    fn set_size(&mut self, size: Size);

    fn set_clear_color(&mut self, color: Vec3);

    /// Highest texture anisotropy the backend supports.
    fn max_anisotropy(&self) -> u16;

    /// Starts or stops the backend's own frame callback.
    fn set_animation_loop(&mut self, active: bool);

    fn animation_loop_active(&self) -> bool;

    fn draw(&mut self, frame: &FrameView<'_>);

    /// Releases backend resources held for a material that was replaced.
    fn dispose_material(&mut self, material: &Material);
}
