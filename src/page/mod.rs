//! Page Module
//!
//! [`Page`] owns everything on one long-scrolling page: the scene contexts,
//! the scroll timelines, the smooth scroll driver and the asset loader.
//! The host forwards window events and calls [`Page::frame`] once per
//! display refresh.
//!
//! Components fail independently. A scene whose surface is missing, a
//! timeline that conflicts with another, or an asset that fails to load is
//! logged and left out; everything else keeps running.

pub mod config;
pub mod portfolio;

pub use config::PageConfig;
pub use portfolio::portfolio;

use slotmap::{SlotMap, new_key_type};

use crate::assets::AssetLoader;
use crate::context::{SceneConfig, SceneContext};
use crate::core::FrameClock;
use crate::dom::{Layout, StyleStore};
use crate::errors::Result;
use crate::render::RenderSurface;
use crate::scroll::{
    CompletionAction, SmoothScroll, SmoothScrollConfig, TimelineConfig, TimelineEngine, TimelineKey,
};

new_key_type! {
    pub struct SceneKey;
}

pub struct Page<S: RenderSurface, L: Layout> {
    layout: L,
    styles: StyleStore,
    scenes: SlotMap<SceneKey, SceneContext<S>>,
    scene_order: Vec<SceneKey>,
    timelines: TimelineEngine,
    scroll: SmoothScroll,
    loader: AssetLoader,
    clock: FrameClock,
}

impl<S: RenderSurface, L: Layout> Page<S, L> {
    #[must_use]
    pub fn new(layout: L, loader: AssetLoader, smooth_scroll: SmoothScrollConfig) -> Self {
        let mut page = Self {
            layout,
            styles: StyleStore::new(),
            scenes: SlotMap::with_key(),
            scene_order: Vec::new(),
            timelines: TimelineEngine::new(),
            scroll: SmoothScroll::new(smooth_scroll),
            loader,
            clock: FrameClock::new(),
        };
        page.sync_scroll_limit();
        page
    }

    /// Builds a page from configuration. `make_surface` creates the render
    /// surface for each scene.
    pub fn from_config(
        config: PageConfig,
        layout: L,
        loader: AssetLoader,
        mut make_surface: impl FnMut(&SceneConfig) -> S,
    ) -> Self {
        let mut page = Self::new(layout, loader, config.smooth_scroll);
        for scene in config.scenes {
            let surface = make_surface(&scene);
            let name = scene.name.clone();
            if let Err(e) = page.add_scene(scene, surface) {
                log::error!("[{name}] scene skipped: {e}");
            }
        }
        for timeline in config.timelines {
            let name = timeline.name.clone();
            if let Err(e) = page.add_timeline(timeline) {
                log::error!("[{name}] timeline skipped: {e}");
            }
        }
        page
    }

    /// Constructs a scene context and starts loading its asset.
    pub fn add_scene(&mut self, config: SceneConfig, surface: S) -> Result<SceneKey> {
        let mut scene = SceneContext::new(config, surface, &self.layout)?;
        scene.begin_load(&self.loader);
        let key = self.scenes.insert(scene);
        self.scene_order.push(key);
        Ok(key)
    }

    pub fn add_timeline(&mut self, config: TimelineConfig) -> Result<TimelineKey> {
        self.timelines.register(config, &self.layout, &self.styles)
    }

    /// Page `load` event: arms one-shot effects such as deferred lighting.
    pub fn on_load(&mut self, time_ms: f64) {
        let now = time_ms / 1000.0;
        for &key in &self.scene_order {
            if let Some(scene) = self.scenes.get_mut(key) {
                scene.arm_deferred(now);
            }
        }
    }

    /// Window resize: re-measures every scene and timeline. Idempotent.
    pub fn resize(&mut self) {
        self.sync_scroll_limit();
        self.timelines.refresh(&self.layout);
        for &key in &self.scene_order {
            if let Some(scene) = self.scenes.get_mut(key) {
                scene.on_resize(&self.layout);
            }
        }
    }

    /// Raw wheel or touch input in pixels.
    pub fn on_wheel(&mut self, delta: f32) {
        self.scroll.on_wheel(delta);
    }

    /// One display refresh at timestamp `time_ms`.
    pub fn frame(&mut self, time_ms: f64) {
        let now = time_ms / 1000.0;
        let dt = self.clock.delta(now);

        self.loader.pump();
        self.scroll.raf(time_ms);

        let fired = self.timelines.update(self.scroll.scroll(), dt, &mut self.styles);
        for action in fired {
            self.complete(action);
        }

        for &key in &self.scene_order {
            if let Some(scene) = self.scenes.get_mut(key) {
                scene.poll_loads(&self.loader);
                scene.poll_deferred(now);
                scene.render_frame(now);
            }
        }
    }

    fn complete(&mut self, action: CompletionAction) {
        match action {
            CompletionAction::ScrollTo {
                section,
                duration,
                ease,
            } => match self.layout.element_by_id(&section) {
                Some(rect) => {
                    log::debug!("scrolling to #{section} at {}", rect.top);
                    self.scroll.scroll_to(rect.top, duration, ease);
                }
                None => log::warn!("scroll target #{section} not found"),
            },
        }
    }

    fn sync_scroll_limit(&mut self) {
        let limit = self.layout.document_height() - self.layout.viewport().height;
        self.scroll.set_limit(limit);
    }

    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Mutable layout access; call [`Page::resize`] afterwards.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    #[must_use]
    pub fn styles(&self) -> &StyleStore {
        &self.styles
    }

    #[must_use]
    pub fn timelines(&self) -> &TimelineEngine {
        &self.timelines
    }

    #[must_use]
    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut SmoothScroll {
        &mut self.scroll
    }

    #[must_use]
    pub fn scene(&self, key: SceneKey) -> Option<&SceneContext<S>> {
        self.scenes.get(key)
    }

    pub fn scene_mut(&mut self, key: SceneKey) -> Option<&mut SceneContext<S>> {
        self.scenes.get_mut(key)
    }

    #[must_use]
    pub fn scene_by_name(&self, name: &str) -> Option<&SceneContext<S>> {
        self.scenes().find(|s| s.name() == name)
    }

    pub fn scenes(&self) -> impl Iterator<Item = &SceneContext<S>> {
        self.scene_order.iter().filter_map(|&k| self.scenes.get(k))
    }
}
