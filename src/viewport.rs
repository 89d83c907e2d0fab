//! Viewport binding: keeps a render surface and camera sized to a container.

use crate::core::Size;
use crate::dom::Layout;
use crate::errors::{Result, ScrollyError};
use crate::render::RenderSurface;
use crate::scene::Camera;

/// Associates a render surface with the element it is measured against.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    container_id: String,
    size: Size,
}

impl Viewport {
    /// Measures `container_id` once. Fails when the container is missing.
    pub fn bind(container_id: impl Into<String>, layout: &dyn Layout) -> Result<Self> {
        let container_id = container_id.into();
        let rect = layout.element_by_id(&container_id).ok_or_else(|| {
            ScrollyError::RenderSurfaceUnavailable {
                id: container_id.clone(),
            }
        })?;
        Ok(Self {
            container_id,
            size: rect.size(),
        })
    }

    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Last measured container size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Re-measures the container and pushes the result into the surface size
    /// and the camera aspect.
    ///
    /// Safe to call any number of times; each call leaves surface and camera
    /// matching the latest measurement. A container that has disappeared keeps
    /// the previous size.
    pub fn sync(&mut self, layout: &dyn Layout, surface: &mut dyn RenderSurface, camera: &mut Camera) {
        match layout.element_by_id(&self.container_id) {
            Some(rect) => self.size = rect.size(),
            None => log::warn!(
                "container `{}` vanished; keeping {}x{}",
                self.container_id,
                self.size.width,
                self.size.height
            ),
        }
        surface.set_size(self.size);
        camera.set_aspect(self.size.aspect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::dom::StaticLayout;
    use crate::render::HeadlessSurface;

    #[test]
    fn missing_container_is_unavailable() {
        let layout = StaticLayout::new(Size::new(800.0, 600.0));
        let err = Viewport::bind("c1", &layout).unwrap_err();
        assert!(matches!(err, ScrollyError::RenderSurfaceUnavailable { .. }));
    }

    #[test]
    fn sync_tracks_latest_measurement() {
        let mut layout = StaticLayout::new(Size::new(800.0, 600.0))
            .with_element("#p1", Rect::new(0.0, 0.0, 800.0, 600.0));
        let mut viewport = Viewport::bind("p1", &layout).unwrap();
        let mut surface = HeadlessSurface::new("c1", 8);
        let mut camera = Camera::new_perspective(45.0, 1.0, 0.1, 1000.0);

        viewport.sync(&layout, &mut surface, &mut camera);
        layout.set_element("#p1", Rect::new(0.0, 0.0, 400.0, 400.0));
        viewport.sync(&layout, &mut surface, &mut camera);
        viewport.sync(&layout, &mut surface, &mut camera);

        assert_eq!(surface.size(), Size::new(400.0, 400.0));
        assert!((camera.aspect - 1.0).abs() < 1e-6);
    }
}
