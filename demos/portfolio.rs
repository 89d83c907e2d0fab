//! Portfolio Page Example
//!
//! Drives the three-scene portfolio page headlessly: a simulated reader
//! scrolls down the page while the scenes load, render and zoom.
//!
//! Usage:
//! - `cargo run --example portfolio` uses built-in placeholder models
//! - `cargo run --example portfolio -- ./public` loads the real `.glb`
//!   files from a directory (or an `http(s)://` base with the `http` feature)
//!
//! Set `RUST_LOG=debug` to see scroll events and load progress.

use scrolly::assets::{AssetLoader, AssetReaderVariant, JsonSceneParser, MemoryAssetReader};
use scrolly::core::{Size, Timer};
use scrolly::dom::{Property, PropertyTarget};
use scrolly::page::portfolio::{portfolio, reference_layout};
use scrolly::{HeadlessSurface, Page};

const PLACEHOLDER: &str = r#"{
    "nodes": [
        { "name": "body", "mesh": { "material": { "color": 13421772, "roughness": 0.4 } } },
        { "name": "rotor", "parent": 0, "position": [0, 1, 0], "mesh": { "material": {} } }
    ],
    "clips": [
        { "name": "hover", "tracks": [
            { "node": "rotor", "target": "translation", "times": [0, 1, 2],
              "values": [0,1,0, 0,1.2,0, 0,1,0] }
        ] }
    ]
}"#;

fn loader() -> anyhow::Result<AssetLoader> {
    if let Some(source) = std::env::args().nth(1) {
        return Ok(AssetLoader::new(AssetReaderVariant::from_source(&source)?));
    }
    let reader = MemoryAssetReader::new();
    for path in ["/spidey.glb", "/final.glb", "/newdrone.glb"] {
        reader.insert(path, PLACEHOLDER.as_bytes().to_vec());
    }
    Ok(AssetLoader::new(reader).with_parser(JsonSceneParser))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let viewport = Size::new(1280.0, 800.0);
    let mut page = Page::from_config(portfolio(), reference_layout(viewport), loader()?, |scene| {
        HeadlessSurface::new(scene.surface_id.clone(), 16)
    });

    let mut timer = Timer::new();
    page.on_load(timer.timestamp_ms());

    // Ten seconds at 60 Hz, one wheel notch every half second.
    let frame = std::time::Duration::from_millis(16);
    for i in 0..600 {
        timer.tick();
        if i % 30 == 0 {
            page.on_wheel(120.0);
        }
        page.frame(timer.timestamp_ms());

        if i % 60 == 0 {
            let styles = page.styles();
            println!(
                "t={:>5.1}s scroll={:>7.1} c1.scale={:.2} c2.scale={:.2} p1-h.x={:.0}",
                timer.elapsed.as_secs_f32(),
                page.scroll().scroll(),
                styles.get("#c1", Property::Scale),
                styles.get("#c2", Property::Scale),
                styles.get("#p1-h", Property::X),
            );
        }
        std::thread::sleep(frame);
    }

    for scene in page.scenes() {
        let frames = scene.surface().frame_count();
        println!(
            "{:<7} frames={frames:<4} model={} status={:?}",
            scene.name(),
            scene.model().is_some(),
            scene.load_status()
        );
    }
    for timeline in page.timelines().iter() {
        println!("{:<13} progress={:.2} {:?}", timeline.name(), timeline.progress(), timeline.state());
    }
    Ok(())
}
