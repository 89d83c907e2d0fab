//! The three-scene portfolio page.

use std::f32::consts::PI;

use crate::animation::Ease;
use crate::context::{CameraSpec, DeferredLighting, MaterialStrategy, RenderMode, SceneConfig};
use crate::controls::ControlsSpec;
use crate::core::{Rect, Size};
use crate::dom::{Property, StaticLayout};
use crate::page::PageConfig;
use crate::scene::LightSpec;
use crate::scroll::{Anchor, CompletionAction, Scrub, StepConfig, TimelineConfig};

const BACKDROP: u32 = 0x11_10_10;

const TOP_CENTER: Anchor = Anchor::fractions(0.0, 0.5);
const CENTER_CENTER: Anchor = Anchor::fractions(0.5, 0.5);
const BOTTOM_CENTER: Anchor = Anchor::fractions(1.0, 0.5);
const QUARTER_CENTER: Anchor = Anchor::fractions(0.25, 0.5);

fn scroll_to(section: &str) -> CompletionAction {
    CompletionAction::ScrollTo {
        section: section.to_string(),
        duration: 0.5,
        ease: Ease::Power2InOut,
    }
}

fn no_zoom() -> ControlsSpec {
    ControlsSpec {
        enable_zoom: false,
        ..ControlsSpec::default()
    }
}

#[must_use]
pub fn scenes() -> Vec<SceneConfig> {
    let hero = SceneConfig {
        asset: Some("/spidey.glb".into()),
        camera: CameraSpec::new(45.0, [0.0, -15.0, 20.0]).looking_at([0.0, 0.0, 0.0]),
        clear_color: 0x000000,
        controls: Some(ControlsSpec {
            min_polar_angle: Some(PI / 2.0),
            max_polar_angle: Some(3.0 * PI / 5.0),
            min_azimuth_angle: Some(-PI / 4.0),
            max_azimuth_angle: Some(PI / 4.0),
            ..no_zoom()
        }),
        material_strategy: MaterialStrategy::TextureOverlay {
            source: "/spidey.glb".into(),
        },
        render_mode: RenderMode::SelfPaced,
        deferred_lighting: Some(DeferredLighting {
            delay_secs: 2.0,
            clear_color: Some(BACKDROP),
            lights: vec![LightSpec::point(0xff0000, 1000.0, [2.5, 2.5, 2.5])],
        }),
        ..SceneConfig::new("hero", "c1", "p1")
    };

    let skills = SceneConfig {
        asset: Some("/final.glb".into()),
        camera: CameraSpec::new(75.0, [0.0, 150.0, 5.0]),
        lights: vec![LightSpec::directional(0xffffff, 1000.0, [100.0, 10.0, 10.0])],
        clear_color: BACKDROP,
        controls: Some(no_zoom()),
        material_strategy: MaterialStrategy::Replace {
            color: 0x0000ff,
            metalness: 1.0,
            roughness: 0.0,
        },
        render_mode: RenderMode::ExternallyPaced {
            spin: [0.0, 0.0, 0.005],
        },
        ..SceneConfig::new("skills", "c2", "c2")
    };

    let drone = SceneConfig {
        asset: Some("/newdrone.glb".into()),
        camera: CameraSpec::new(45.0, [2.0, -1.0, 2.0]).looking_at([0.0, 0.0, 0.0]),
        lights: vec![LightSpec::point(0xffffff, 1000.0, [2.5, 2.5, 2.5])],
        clear_color: BACKDROP,
        controls: Some(no_zoom()),
        material_strategy: MaterialStrategy::TextureOverlay {
            source: "/newdrone.glb".into(),
        },
        render_mode: RenderMode::SelfPaced,
        ..SceneConfig::new("drone", "c3", "p3")
    };

    vec![hero, skills, drone]
}

#[must_use]
pub fn timelines() -> Vec<TimelineConfig> {
    let zoom = Scrub::Smooth(0.7);

    vec![
        TimelineConfig::new("intro", "#p1-h #p1-a", TOP_CENTER, BOTTOM_CENTER)
            .markers(true)
            .step(StepConfig::animate_to("#p1-h", [(Property::X, 670.0), (Property::Y, -300.0)]))
            .step(StepConfig::animate_to("#p1-a", [(Property::X, -620.0), (Property::Y, -400.0)])),
        TimelineConfig::new("zoom-hero", "#p1 div", CENTER_CENTER, BOTTOM_CENTER)
            .scrub(zoom)
            .step(StepConfig::animate_to("#c1", [(Property::Scale, 6.0)]))
            .on_complete(scroll_to("p2")),
        TimelineConfig::new("zoom-skills", "#c2", CENTER_CENTER, BOTTOM_CENTER)
            .scrub(zoom)
            .step(StepConfig::animate_to("#c2", [(Property::Scale, 10.0)]))
            .on_complete(scroll_to("p3")),
        TimelineConfig::new("zoom-drone", "#p3", QUARTER_CENTER, CENTER_CENTER)
            .scrub(zoom)
            .step(StepConfig::animate_from("#c3", [(Property::Scale, 0.3)])),
        TimelineConfig::new("skills-slide", "#p2", TOP_CENTER, CENTER_CENTER)
            .step(StepConfig::animate_to("#d1 h1", [(Property::X, 670.0)]))
            .step(StepConfig::animate_to("#merged-skills", [(Property::X, 670.0)]))
            .step(StepConfig::animate_to("#d2", [(Property::X, -670.0)])),
    ]
}

/// Canonical configuration of the portfolio page.
#[must_use]
pub fn portfolio() -> PageConfig {
    PageConfig {
        scenes: scenes(),
        timelines: timelines(),
        ..PageConfig::default()
    }
}

/// A plausible box model for the portfolio page: three full-height sections
/// stacked vertically, canvases filling their sections.
#[must_use]
pub fn reference_layout(viewport: Size) -> StaticLayout {
    let (w, h) = (viewport.width, viewport.height);
    let section = |index: f32| Rect::new(0.0, index * h, w, h);

    StaticLayout::new(viewport)
        .with_element("#p1", section(0.0))
        .with_element("#c1", section(0.0))
        .with_element("#p1 div", Rect::new(0.0, 0.25 * h, w, 0.5 * h))
        .with_element("#p1-h", Rect::new(0.1 * w, 0.3 * h, 0.4 * w, 0.1 * h))
        .with_element("#p1-a", Rect::new(0.1 * w, 0.45 * h, 0.4 * w, 0.2 * h))
        .with_element("#p1-h #p1-a", Rect::new(0.1 * w, 0.3 * h, 0.4 * w, 0.35 * h))
        .with_element("#p2", section(1.0))
        .with_element("#c2", section(1.0))
        .with_element("#d1 h1", Rect::new(0.05 * w, 1.2 * h, 0.3 * w, 0.1 * h))
        .with_element("#merged-skills", Rect::new(0.05 * w, 1.4 * h, 0.3 * w, 0.3 * h))
        .with_element("#d2", Rect::new(0.65 * w, 1.2 * h, 0.3 * w, 0.5 * h))
        .with_element("#p3", section(2.0))
        .with_element("#c3", section(2.0))
}
