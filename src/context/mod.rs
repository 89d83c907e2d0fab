//! Scene Context Module
//!
//! A [`SceneContext`] is one independently rendered 3D viewport: camera,
//! lights, render surface, optional orbit controls and, once its asset has
//! loaded, a model and an animation player.
//!
//! # Lifecycle
//!
//! 1. [`SceneContext::new`] binds the surface to its container and starts
//!    the render loop. The scene draws (empty) from the first frame.
//! 2. [`SceneContext::begin_load`] issues the asset load.
//! 3. [`SceneContext::poll_loads`] observes completion: the model is patched,
//!    then attached, then given a player if it carries clips. A failed load
//!    leaves the scene empty for good.
//! 4. [`SceneContext::render_frame`] runs once per display refresh.

pub mod config;
pub mod patch;
pub mod render_loop;

pub use config::{CameraSpec, DeferredLighting, MaterialStrategy, RenderMode, SceneConfig};
pub use patch::{PatchOutcome, patch};
pub use render_loop::RenderLoop;

use glam::Vec3;

use crate::animation::AnimationMixer;
use crate::assets::{AssetLoader, LoadRequest, LoadStatus, LoadedAsset};
use crate::controls::OrbitControls;
use crate::core::{FrameClock, OneShotTimer, hex_color};
use crate::dom::Layout;
use crate::errors::{Result, ScrollyError};
use crate::render::{FrameView, RenderSurface};
use crate::scene::{Camera, Light, NodeKey, SceneGraph, TextureImage, TextureKey};
use crate::viewport::Viewport;

pub struct SceneContext<S: RenderSurface> {
    config: SceneConfig,
    surface: S,
    viewport: Viewport,
    camera: Camera,
    lights: Vec<Light>,
    clear_color: Vec3,
    controls: Option<OrbitControls>,

    model: Option<SceneGraph>,
    model_root: Option<NodeKey>,
    player: Option<AnimationMixer>,
    load_status: Option<LoadStatus>,

    asset_request: Option<LoadRequest<LoadedAsset>>,
    texture_request: Option<(TextureKey, LoadRequest<TextureImage>)>,

    render_loop: RenderLoop,
    clock: FrameClock,
    deferred: OneShotTimer,
}

impl<S: RenderSurface> SceneContext<S> {
    /// Builds the scene and starts its render loop.
    ///
    /// Fails with [`ScrollyError::RenderSurfaceUnavailable`] when either the
    /// surface element or its container is not on the page.
    pub fn new(config: SceneConfig, mut surface: S, layout: &dyn Layout) -> Result<Self> {
        if layout.element_by_id(&config.surface_id).is_none() {
            return Err(ScrollyError::RenderSurfaceUnavailable {
                id: config.surface_id.clone(),
            });
        }
        let mut viewport = Viewport::bind(config.container_id.clone(), layout)?;

        let spec = &config.camera;
        let mut camera = Camera::new_perspective(spec.fov, viewport.size().aspect(), spec.near, spec.far);
        camera.transform.position = Vec3::from_array(spec.position);
        let target = spec.look_at.map(Vec3::from_array);
        if let Some(target) = target {
            camera.look_at(target);
        }

        let controls = config.controls.as_ref().map(|c| {
            OrbitControls::new(camera.transform.position, target.unwrap_or(Vec3::ZERO)).with_spec(c)
        });

        let clear_color = hex_color(config.clear_color);
        surface.set_clear_color(clear_color);
        viewport.sync(layout, &mut surface, &mut camera);

        let mut render_loop = RenderLoop::from_mode(&config.render_mode);
        render_loop.start(&mut surface);

        log::info!(
            "[{}] scene ready on `{}` ({}x{})",
            config.name,
            config.surface_id,
            viewport.size().width,
            viewport.size().height
        );

        Ok(Self {
            lights: config.lights.iter().map(Light::from).collect(),
            config,
            surface,
            viewport,
            camera,
            clear_color,
            controls,
            model: None,
            model_root: None,
            player: None,
            load_status: None,
            asset_request: None,
            texture_request: None,
            render_loop,
            clock: FrameClock::new(),
            deferred: OneShotTimer::new(),
        })
    }

    /// Issues the asset load, if the scene has one and it was not issued yet.
    pub fn begin_load(&mut self, loader: &AssetLoader) {
        if self.load_status.is_some() {
            return;
        }
        if let Some(url) = &self.config.asset {
            log::info!("[{}] loading {url}", self.config.name);
            self.asset_request = Some(loader.load_asset(url));
            self.load_status = Some(LoadStatus::Pending);
        }
    }

    /// Observes finished loads. Call once per frame after pumping `loader`.
    pub fn poll_loads(&mut self, loader: &AssetLoader) {
        if let Some(result) = self.asset_request.as_mut().and_then(LoadRequest::poll) {
            self.asset_request = None;
            match result {
                Ok(asset) => self.install(asset, loader),
                Err(e) => {
                    log::error!("[{}] {e}", self.config.name);
                    self.load_status = Some(LoadStatus::Failed);
                }
            }
        }

        if let Some((texture, request)) = &mut self.texture_request {
            let texture = *texture;
            if let Some(result) = request.poll() {
                self.texture_request = None;
                match result {
                    Ok(image) => self.apply_texture(texture, image),
                    Err(e) => log::error!("[{}] {e}", self.config.name),
                }
            }
        }
    }

    fn install(&mut self, asset: LoadedAsset, loader: &AssetLoader) {
        let LoadedAsset {
            mut graph,
            root,
            clips,
        } = asset;

        let outcome = patch(&mut graph, &self.config.material_strategy);
        for material in &outcome.disposed {
            self.surface.dispose_material(material);
        }
        if let Some((texture, source)) = outcome.texture {
            self.texture_request = Some((texture, loader.load_texture(&source)));
        }

        if !clips.is_empty() {
            self.player = Some(AnimationMixer::with_clips(&graph, root, clips));
        }
        log::info!(
            "[{}] model attached: {} meshes, {} clips",
            self.config.name,
            graph.mesh_count(),
            self.player.as_ref().map_or(0, |p| p.actions().len())
        );
        self.model_root = Some(root);
        self.model = Some(graph);
        self.load_status = Some(LoadStatus::Loaded);
    }

    fn apply_texture(&mut self, key: TextureKey, image: TextureImage) {
        let Some(model) = &mut self.model else {
            return;
        };
        let Some(texture) = model.textures.get_mut(key) else {
            return;
        };
        texture.apply_image(image, self.surface.max_anisotropy());
        log::debug!(
            "[{}] texture {} ready, anisotropy {}",
            self.config.name,
            texture.source,
            texture.anisotropy
        );

        for node in model.nodes.values_mut() {
            if let Some(material) = node.mesh.as_mut().and_then(|m| m.material.as_mut())
                && material.map == Some(key)
            {
                material.needs_update();
            }
        }
    }

    /// Re-measures the container. Safe to call on every resize event.
    pub fn on_resize(&mut self, layout: &dyn Layout) {
        self.viewport.sync(layout, &mut self.surface, &mut self.camera);
    }

    /// Starts the deferred lighting countdown, if configured.
    pub fn arm_deferred(&mut self, now_secs: f64) {
        if let Some(deferred) = &self.config.deferred_lighting {
            self.deferred.arm(now_secs, deferred.delay_secs);
        }
    }

    /// Applies deferred lighting once its delay has elapsed.
    pub fn poll_deferred(&mut self, now_secs: f64) {
        if !self.deferred.poll(now_secs) {
            return;
        }
        let Some(deferred) = &self.config.deferred_lighting else {
            return;
        };
        if let Some(color) = deferred.clear_color {
            self.clear_color = hex_color(color);
            self.surface.set_clear_color(self.clear_color);
        }
        self.lights.extend(deferred.lights.iter().map(Light::from));
        log::info!("[{}] deferred lighting applied", self.config.name);
    }

    /// Runs one tick of the render loop. Returns whether a frame was drawn.
    ///
    /// Works with or without a model and with any number of clips.
    pub fn render_frame(&mut self, now_secs: f64) -> bool {
        if !self.render_loop.take_tick(&self.surface) {
            return false;
        }
        let dt = self.clock.delta(now_secs);

        if let Some(controls) = &mut self.controls {
            let paced = matches!(self.render_loop, RenderLoop::ExternallyPaced { .. });
            if paced || controls.has_pending_input() {
                controls.update(&mut self.camera.transform, dt);
            }
        }

        if let (Some(model), Some(root)) = (&mut self.model, self.model_root) {
            if let Some(spin) = self.render_loop.spin()
                && let Some(node) = model.get_node_mut(root)
            {
                node.transform.rotate_euler(spin);
            }
            if let Some(player) = &mut self.player {
                player.update(dt, model);
            }
        }

        let frame = FrameView {
            camera: &self.camera,
            lights: &self.lights,
            model: self.model.as_ref(),
            clear_color: self.clear_color,
        };
        self.surface.draw(&frame);
        self.render_loop.finish_tick();
        true
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    #[must_use]
    pub fn clear_color(&self) -> Vec3 {
        self.clear_color
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut()
    }

    #[must_use]
    pub fn model(&self) -> Option<&SceneGraph> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn player(&self) -> Option<&AnimationMixer> {
        self.player.as_ref()
    }

    /// `None` for a scene without an asset or before [`begin_load`].
    ///
    /// [`begin_load`]: Self::begin_load
    #[must_use]
    pub fn load_status(&self) -> Option<LoadStatus> {
        self.load_status
    }

    /// Fraction of the asset received so far.
    #[must_use]
    pub fn load_progress(&self) -> f32 {
        match (&self.asset_request, self.load_status) {
            (Some(request), _) => request.progress(),
            (None, Some(LoadStatus::Loaded)) => 1.0,
            _ => 0.0,
        }
    }
}
