use glam::{Quat, Vec3};

use crate::core::Size;
use crate::render::{FrameView, RenderSurface};
use crate::scene::{Material, MaterialId};

/// Summary of one drawn frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub index: u64,
    pub size: Size,
    pub aspect: f32,
    pub clear_color: Vec3,
    pub light_count: usize,
    pub model_loaded: bool,
    pub mesh_count: usize,
    /// Rotation of the model's first root, if a model is present.
    pub model_rotation: Option<Quat>,
    /// Meshes whose material references a texture.
    pub textured_meshes: usize,
}

/// Backend that draws nothing and remembers everything.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    id: String,
    size: Size,
    clear_color: Vec3,
    max_anisotropy: u16,
    animation_loop: bool,
    frame_count: u64,
    last_frame: Option<FrameRecord>,
    disposed: Vec<MaterialId>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(id: impl Into<String>, max_anisotropy: u16) -> Self {
        Self {
            id: id.into(),
            size: Size::default(),
            clear_color: Vec3::ZERO,
            max_anisotropy,
            animation_loop: false,
            frame_count: 0,
            last_frame: None,
            disposed: Vec::new(),
        }
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn clear_color(&self) -> Vec3 {
        self.clear_color
    }

    #[must_use]
    pub fn disposed_materials(&self) -> &[MaterialId] {
        &self.disposed
    }
}

impl RenderSurface for HeadlessSurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn set_clear_color(&mut self, color: Vec3) {
        self.clear_color = color;
    }

    fn max_anisotropy(&self) -> u16 {
        self.max_anisotropy
    }

    fn set_animation_loop(&mut self, active: bool) {
        self.animation_loop = active;
    }

    fn animation_loop_active(&self) -> bool {
        self.animation_loop
    }

    fn draw(&mut self, frame: &FrameView<'_>) {
        self.frame_count += 1;

        let (mesh_count, model_rotation, textured_meshes) = match frame.model {
            Some(graph) => {
                let keys = graph.traverse();
                let textured = keys
                    .iter()
                    .filter_map(|&k| graph.get_node(k))
                    .filter_map(|n| n.mesh.as_ref()?.material.as_ref())
                    .filter(|m| m.map.is_some())
                    .count();
                let rotation = graph
                    .root_nodes
                    .first()
                    .and_then(|&k| graph.get_node(k))
                    .map(|n| n.transform.rotation);
                (graph.mesh_count(), rotation, textured)
            }
            None => (0, None, 0),
        };

        self.last_frame = Some(FrameRecord {
            index: self.frame_count,
            size: self.size,
            aspect: frame.camera.aspect,
            clear_color: frame.clear_color,
            light_count: frame.lights.len(),
            model_loaded: frame.model.is_some(),
            mesh_count,
            model_rotation,
            textured_meshes,
        });
    }

    fn dispose_material(&mut self, material: &Material) {
        log::trace!("{}: disposing material {:?}", self.id, material.id());
        self.disposed.push(material.id());
    }
}
