//! Scene Context Tests
//!
//! Tests for:
//! - Construction against the page layout (missing surface / container)
//! - Render loops with and without a model, and after a failed load
//! - Material patching (texture overlay, replacement, untouched nodes)
//! - Resize handling
//! - Deferred lighting and the externally paced idle spin
//! - Orbit control limits

use std::f32::consts::PI;

use glam::Vec3;

use scrolly::assets::{AssetLoader, LoadStatus, MemoryAssetReader, SceneDesc};
use scrolly::context::{
    CameraSpec, DeferredLighting, MaterialStrategy, RenderMode, SceneConfig, SceneContext, patch,
};
use scrolly::controls::{ControlsSpec, OrbitControls};
use scrolly::core::{Rect, Size, hex_color};
use scrolly::dom::StaticLayout;
use scrolly::errors::ScrollyError;
use scrolly::render::{HeadlessSurface, RenderSurface};
use scrolly::scene::{LightSpec, Transform};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

const MODEL: &str = r#"{
    "nodes": [
        { "name": "body", "mesh": { "material": { "color": 16711680, "roughness": 0.5 } } },
        { "name": "bare", "parent": 0, "mesh": {} },
        { "name": "empty", "parent": 0, "position": [1, 2, 3] },
        { "name": "wing", "parent": 0, "mesh": { "material": {} } }
    ],
    "clips": [
        { "name": "flap", "tracks": [
            { "node": "wing", "target": "translation", "times": [0, 1], "values": [0,0,0, 0,4,0] }
        ] }
    ]
}"#;

fn layout() -> StaticLayout {
    StaticLayout::new(Size::new(1200.0, 800.0))
        .with_element("#c1", Rect::new(0.0, 0.0, 1200.0, 800.0))
        .with_element("#p1", Rect::new(0.0, 0.0, 1200.0, 800.0))
}

fn config(asset: &str) -> SceneConfig {
    SceneConfig {
        asset: Some(asset.to_string()),
        camera: CameraSpec::new(45.0, [0.0, 0.0, 10.0]).looking_at([0.0, 0.0, 0.0]),
        lights: vec![LightSpec::point(0xffffff, 1000.0, [2.5, 2.5, 2.5])],
        ..SceneConfig::new("test", "c1", "p1")
    }
}

fn loader_with_model() -> AssetLoader {
    let reader = MemoryAssetReader::new();
    reader.insert("/model.json", MODEL.as_bytes().to_vec());
    reader.insert_failure("/broken.json", "404");
    reader.insert("/skin.png", png_bytes());
    AssetLoader::new(reader)
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn loaded_scene(config: SceneConfig, loader: &mut AssetLoader) -> SceneContext<HeadlessSurface> {
    let layout = layout();
    let mut scene = SceneContext::new(config, HeadlessSurface::new("c1", 16), &layout).unwrap();
    scene.begin_load(loader);
    loader.pump();
    scene.poll_loads(loader);
    scene
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn missing_surface_is_unavailable() {
    let layout = StaticLayout::new(Size::new(800.0, 600.0))
        .with_element("#p1", Rect::new(0.0, 0.0, 800.0, 600.0));
    let result = SceneContext::new(config("/model.json"), HeadlessSurface::new("c1", 1), &layout);
    assert!(matches!(result, Err(ScrollyError::RenderSurfaceUnavailable { id }) if id == "c1"));
}

#[test]
fn missing_container_is_unavailable() {
    let layout = StaticLayout::new(Size::new(800.0, 600.0))
        .with_element("#c1", Rect::new(0.0, 0.0, 800.0, 600.0));
    let result = SceneContext::new(config("/model.json"), HeadlessSurface::new("c1", 1), &layout);
    assert!(matches!(result, Err(ScrollyError::RenderSurfaceUnavailable { id }) if id == "p1"));
}

#[test]
fn construction_sizes_surface_and_camera() {
    let scene = SceneContext::new(config("/model.json"), HeadlessSurface::new("c1", 1), &layout()).unwrap();
    assert_eq!(scene.surface().size(), Size::new(1200.0, 800.0));
    assert!(approx(scene.camera().aspect, 1.5));
    assert_eq!(scene.lights().len(), 1);
    assert!(scene.surface().animation_loop_active());
}

// ============================================================================
// Render loop
// ============================================================================

#[test]
fn renders_empty_scene_before_load() {
    let layout = layout();
    let mut scene = SceneContext::new(config("/model.json"), HeadlessSurface::new("c1", 1), &layout).unwrap();
    for i in 0..5 {
        assert!(scene.render_frame(f64::from(i) / 60.0));
    }
    let frame = scene.surface().last_frame().unwrap();
    assert_eq!(frame.index, 5);
    assert!(!frame.model_loaded);
    assert!(scene.player().is_none());
}

#[test]
fn failed_load_keeps_rendering_empty_frames() {
    let mut loader = loader_with_model();
    let mut scene = loaded_scene(config("/broken.json"), &mut loader);

    assert_eq!(scene.load_status(), Some(LoadStatus::Failed));
    for i in 0..10 {
        loader.pump();
        scene.poll_loads(&loader);
        assert!(scene.render_frame(f64::from(i) / 60.0));
    }
    assert!(scene.model().is_none());
    assert!(!scene.surface().last_frame().unwrap().model_loaded);
}

#[test]
fn loaded_model_gets_a_playing_player() {
    let mut loader = loader_with_model();
    let mut scene = loaded_scene(config("/model.json"), &mut loader);

    assert_eq!(scene.load_status(), Some(LoadStatus::Loaded));
    assert_eq!(scene.player().unwrap().actions().len(), 1);

    scene.render_frame(0.0);
    scene.render_frame(0.5);

    let model = scene.model().unwrap();
    let root = model.root_nodes[0];
    let wing = model.find_by_name(root, "wing").unwrap();
    let y = model.get_node(wing).unwrap().transform.position.y;
    assert!(approx(y, 2.0), "wing at {y}");
}

#[test]
fn scene_without_asset_never_loads() {
    let layout = layout();
    let mut loader = loader_with_model();
    let mut cfg = config("/model.json");
    cfg.asset = None;
    let mut scene = SceneContext::new(cfg, HeadlessSurface::new("c1", 1), &layout).unwrap();
    scene.begin_load(&loader);
    loader.pump();
    scene.poll_loads(&loader);
    assert_eq!(scene.load_status(), None);
    assert!(scene.render_frame(0.0));
}

#[test]
fn self_paced_loop_stops_with_the_surface() {
    let layout = layout();
    let mut scene = SceneContext::new(config("/model.json"), HeadlessSurface::new("c1", 1), &layout).unwrap();
    scene.surface_mut().set_animation_loop(false);
    assert!(!scene.render_frame(0.0));
    assert_eq!(scene.surface().frame_count(), 0);
}

#[test]
fn externally_paced_loop_spins_the_model() {
    let mut loader = loader_with_model();
    let cfg = SceneConfig {
        render_mode: RenderMode::ExternallyPaced {
            spin: [0.0, 0.0, 0.005],
        },
        ..config("/model.json")
    };
    let mut scene = loaded_scene(cfg, &mut loader);

    for i in 0..100 {
        assert!(scene.render_frame(f64::from(i) / 60.0));
    }

    let model = scene.model().unwrap();
    let root = model.get_node(model.root_nodes[0]).unwrap();
    let mut expected = Transform::new();
    expected.set_rotation_euler(0.0, 0.0, 0.5);
    assert!(root.transform.rotation.angle_between(expected.rotation) < 1e-3);
}

// ============================================================================
// Material patching
// ============================================================================

#[test]
fn patch_leaves_non_mesh_and_materialless_nodes_untouched() {
    let desc: SceneDesc = serde_json::from_str(MODEL).unwrap();
    let mut asset = desc.build("model.json").unwrap();
    let before = asset.graph.clone();

    let outcome = patch(
        &mut asset.graph,
        &MaterialStrategy::Replace {
            color: 0x0000ff,
            metalness: 1.0,
            roughness: 0.0,
        },
    );
    assert_eq!(outcome.patched, 2);

    for name in ["scene_root", "bare", "empty"] {
        let key = before.find_by_name(asset.root, name).unwrap();
        assert_eq!(before.get_node(key), asset.graph.get_node(key), "{name} changed");
    }
}

#[test]
fn replacement_disposes_old_materials() {
    let mut loader = loader_with_model();
    let cfg = SceneConfig {
        material_strategy: MaterialStrategy::Replace {
            color: 0x0000ff,
            metalness: 1.0,
            roughness: 0.0,
        },
        ..config("/model.json")
    };
    let scene = loaded_scene(cfg, &mut loader);

    assert_eq!(scene.surface().disposed_materials().len(), 2);
    let model = scene.model().unwrap();
    let body = model.find_by_name(model.root_nodes[0], "body").unwrap();
    let material = model.get_node(body).unwrap().mesh.as_ref().unwrap().material.as_ref().unwrap();
    assert_eq!(material.color, hex_color(0x0000ff));
    assert!(approx(material.metalness, 1.0));
    assert!(approx(material.roughness, 0.0));
    assert!(!scene.surface().disposed_materials().contains(&material.id()));
}

#[test]
fn texture_overlay_arrives_after_the_model() {
    let layout = layout();
    let reader = MemoryAssetReader::new();
    reader.insert("/model.json", MODEL.as_bytes().to_vec());
    let gate = reader.insert_gated("/skin.png", png_bytes());
    let mut loader = AssetLoader::new(reader);

    let cfg = SceneConfig {
        material_strategy: MaterialStrategy::TextureOverlay {
            source: "/skin.png".into(),
        },
        ..config("/model.json")
    };
    let mut scene = SceneContext::new(cfg, HeadlessSurface::new("c1", 16), &layout).unwrap();
    scene.begin_load(&loader);
    loader.pump();
    scene.poll_loads(&loader);

    // Visible with base shading while the texture is still in flight.
    scene.render_frame(0.0);
    let frame = scene.surface().last_frame().unwrap();
    assert!(frame.model_loaded);
    assert_eq!(frame.textured_meshes, 2);
    let model = scene.model().unwrap();
    let texture = model.textures.values().next().unwrap();
    assert!(!texture.is_ready());

    gate.send(()).unwrap();
    loader.pump();
    scene.poll_loads(&loader);

    let texture = scene.model().unwrap().textures.values().next().unwrap();
    assert!(texture.is_ready());
    assert_eq!(texture.anisotropy, 16);
    assert_eq!(scene.model().unwrap().textures.len(), 1);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_storm_settles_on_final_measurement() {
    let mut layout = layout();
    let mut scene = SceneContext::new(config("/model.json"), HeadlessSurface::new("c1", 1), &layout).unwrap();

    for (w, h) in [(300.0, 900.0), (1920.0, 1080.0), (10.0, 0.0), (640.0, 480.0)] {
        layout.set_element("#p1", Rect::new(0.0, 0.0, w, h));
        scene.on_resize(&layout);
        scene.on_resize(&layout);
    }

    assert_eq!(scene.surface().size(), Size::new(640.0, 480.0));
    assert!(approx(scene.camera().aspect, 640.0 / 480.0));
}

// ============================================================================
// Deferred lighting
// ============================================================================

#[test]
fn deferred_lighting_applies_once() {
    let layout = layout();
    let cfg = SceneConfig {
        lights: Vec::new(),
        deferred_lighting: Some(DeferredLighting {
            delay_secs: 2.0,
            clear_color: Some(0x111010),
            lights: vec![LightSpec::point(0xff0000, 1000.0, [2.5, 2.5, 2.5])],
        }),
        ..config("/model.json")
    };
    let mut scene = SceneContext::new(cfg, HeadlessSurface::new("c1", 1), &layout).unwrap();
    scene.arm_deferred(1.0);

    scene.poll_deferred(2.5);
    assert!(scene.lights().is_empty());
    assert_eq!(scene.clear_color(), Vec3::ZERO);

    scene.poll_deferred(3.0);
    scene.poll_deferred(4.0);
    assert_eq!(scene.lights().len(), 1);
    assert_eq!(scene.clear_color(), hex_color(0x111010));
    assert_eq!(scene.surface().clear_color(), hex_color(0x111010));
}

#[test]
fn deferred_lighting_without_arming_never_fires() {
    let layout = layout();
    let cfg = SceneConfig {
        lights: Vec::new(),
        deferred_lighting: Some(DeferredLighting {
            delay_secs: 0.0,
            clear_color: None,
            lights: vec![LightSpec::point(0xff0000, 1.0, [0.0; 3])],
        }),
        ..config("/model.json")
    };
    let mut scene = SceneContext::new(cfg, HeadlessSurface::new("c1", 1), &layout).unwrap();
    scene.poll_deferred(100.0);
    assert!(scene.lights().is_empty());
}

// ============================================================================
// Orbit controls
// ============================================================================

fn hero_limits() -> ControlsSpec {
    ControlsSpec {
        enable_zoom: false,
        min_polar_angle: Some(PI / 2.0),
        max_polar_angle: Some(3.0 * PI / 5.0),
        min_azimuth_angle: Some(-PI / 4.0),
        max_azimuth_angle: Some(PI / 4.0),
        ..ControlsSpec::default()
    }
}

#[test]
fn controls_clamp_out_of_range_rotation() {
    let mut controls = OrbitControls::new(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO).with_spec(&hero_limits());
    let mut transform = Transform::new();

    controls.rotate(10.0, -10.0);
    controls.update(&mut transform, 1.0 / 60.0);

    assert!(approx(controls.theta, PI / 4.0));
    assert!(approx(controls.phi, PI / 2.0));
    assert!(approx(transform.position.length(), 20.0));
}

#[test]
fn controls_clamp_initial_position() {
    // (0, -15, 20) sits below the allowed polar window.
    let controls = OrbitControls::new(Vec3::new(0.0, -15.0, 20.0), Vec3::ZERO).with_spec(&hero_limits());
    assert!(approx(controls.phi, 3.0 * PI / 5.0));
}

#[test]
fn disabled_zoom_ignores_input() {
    let mut controls = OrbitControls::new(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO).with_spec(&hero_limits());
    let mut transform = Transform::new();
    controls.zoom(5.0);
    assert!(!controls.has_pending_input());
    controls.update(&mut transform, 1.0 / 60.0);
    assert!(approx(controls.radius, 20.0));
}

#[test]
fn zoom_moves_closer_when_enabled() {
    let mut controls = OrbitControls::new(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
    let mut transform = Transform::new();
    controls.zoom(1.0);
    controls.update(&mut transform, 1.0 / 60.0);
    assert!(controls.radius < 20.0);
}
