//! Animation Player Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step interpolation and clamping
//! - AnimationAction loop modes (Once, Loop, PingPong)
//! - AnimationMixer binding and per-frame updates on a scene graph
//! - Ease curves used by scroll timelines

use std::sync::Arc;

use glam::{Quat, Vec3};

use scrolly::animation::{
    AnimationAction, AnimationClip, AnimationMixer, Ease, InterpolationMode, KeyframeCursor,
    KeyframeTrack, LoopMode, TargetPath, Track, TrackData, TrackMeta,
};
use scrolly::assets::SceneDesc;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn translation_clip(name: &str, node: &str, duration: f32) -> AnimationClip {
    AnimationClip::new(
        name,
        vec![Track {
            meta: TrackMeta {
                node_name: node.to_string(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, duration],
                vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
                InterpolationMode::Linear,
            )),
        }],
    )
}

// ============================================================================
// KeyframeTrack
// ============================================================================

#[test]
fn track_linear_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0)],
        InterpolationMode::Linear,
    );
    let val = track.sample(0.5).unwrap();
    assert!(approx_vec3(val, Vec3::new(0.0, 5.0, 0.0)), "got {val}");
}

#[test]
fn track_clamps_outside_range() {
    let track = KeyframeTrack::new(
        vec![1.0, 2.0],
        vec![Vec3::ONE, Vec3::splat(3.0)],
        InterpolationMode::Linear,
    );
    assert!(approx_vec3(track.sample(0.0).unwrap(), Vec3::ONE));
    assert!(approx_vec3(track.sample(9.0).unwrap(), Vec3::splat(3.0)));
}

#[test]
fn track_step_holds_previous_key() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::ONE],
        InterpolationMode::Step,
    );
    assert!(approx_vec3(track.sample(0.99).unwrap(), Vec3::ZERO));
    assert!(approx_vec3(track.sample(1.0).unwrap(), Vec3::ONE));
}

#[test]
fn track_cursor_handles_reverse_playback() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        (0..7).map(|i| Vec3::splat(i as f32)).collect(),
        InterpolationMode::Linear,
    );
    let mut cursor = KeyframeCursor::default();
    assert!(approx_vec3(track.sample_with_cursor(5.5, &mut cursor).unwrap(), Vec3::splat(5.5)));
    assert!(approx_vec3(track.sample_with_cursor(0.5, &mut cursor).unwrap(), Vec3::splat(0.5)));
}

#[test]
fn empty_track_samples_nothing() {
    let track: KeyframeTrack<Quat> = KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    assert!(track.sample(0.0).is_none());
}

// ============================================================================
// AnimationAction
// ============================================================================

#[test]
fn clip_duration_is_last_keyframe() {
    let clip = translation_clip("walk", "body", 2.5);
    assert!(approx(clip.duration, 2.5));
}

#[test]
fn action_loops_by_default() {
    let mut action = AnimationAction::new(Arc::new(translation_clip("walk", "body", 2.0)));
    assert_eq!(action.loop_mode, LoopMode::Loop);
    action.update(2.5);
    assert!(approx(action.time(), 0.5));
    assert!(action.is_running());
}

#[test]
fn action_loop_wraps_across_many_updates() {
    let mut action = AnimationAction::new(Arc::new(translation_clip("walk", "body", 2.0)));
    let mut times = Vec::new();
    for _ in 0..6 {
        action.update(0.75);
        times.push(action.time());
    }
    let expected = [0.75, 1.5, 0.25, 1.0, 1.75, 0.5];
    for (got, want) in times.iter().zip(expected) {
        assert!(approx(*got, want), "{times:?}");
    }
}

#[test]
fn action_once_stops_at_end() {
    let mut action = AnimationAction::new(Arc::new(translation_clip("walk", "body", 2.0)))
        .with_loop_mode(LoopMode::Once);
    action.update(3.0);
    assert!(approx(action.time(), 2.0));
    assert!(action.is_finished());
    assert!(!action.is_running());

    action.update(1.0);
    assert!(approx(action.time(), 2.0));

    action.reset();
    assert!(approx(action.time(), 0.0));
    assert!(action.is_running());
}

#[test]
fn action_ping_pong_reflects() {
    let mut action = AnimationAction::new(Arc::new(translation_clip("walk", "body", 2.0)))
        .with_loop_mode(LoopMode::PingPong);
    action.update(3.0);
    assert!(approx(action.time(), 1.0));
}

#[test]
fn action_ping_pong_keeps_bouncing_across_updates() {
    let mut action = AnimationAction::new(Arc::new(translation_clip("walk", "body", 2.0)))
        .with_loop_mode(LoopMode::PingPong);
    let mut times = Vec::new();
    for _ in 0..10 {
        action.update(0.5);
        times.push(action.time());
    }
    let expected = [0.5, 1.0, 1.5, 2.0, 1.5, 1.0, 0.5, 0.0, 0.5, 1.0];
    for (got, want) in times.iter().zip(expected) {
        assert!(approx(*got, want), "{times:?}");
    }
}

#[test]
fn action_paused_holds_time() {
    let mut action = AnimationAction::new(Arc::new(translation_clip("walk", "body", 2.0)));
    action.update(0.5);
    action.paused = true;
    action.update(1.0);
    assert!(approx(action.time(), 0.5));
}

// ============================================================================
// AnimationMixer
// ============================================================================

fn rig() -> scrolly::LoadedAsset {
    let desc: SceneDesc = serde_json::from_str(
        r#"{
            "nodes": [
                { "name": "body", "mesh": { "material": {} } },
                { "name": "rotor", "parent": 0 }
            ]
        }"#,
    )
    .unwrap();
    desc.build("rig.json").unwrap()
}

#[test]
fn mixer_drives_bound_nodes() {
    let mut asset = rig();
    let clips = vec![translation_clip("slide", "rotor", 1.0)];
    let mut mixer = AnimationMixer::with_clips(&asset.graph, asset.root, clips);

    mixer.update(0.25, &mut asset.graph);

    let rotor = asset.graph.find_by_name(asset.root, "rotor").unwrap();
    let pos = asset.graph.get_node(rotor).unwrap().transform.position;
    assert!(approx_vec3(pos, Vec3::new(2.5, 0.0, 0.0)), "got {pos}");
}

#[test]
fn mixer_ignores_tracks_for_missing_nodes() {
    let mut asset = rig();
    let before = asset.graph.clone();
    let clips = vec![translation_clip("ghost", "nobody", 1.0)];
    let mut mixer = AnimationMixer::with_clips(&asset.graph, asset.root, clips);

    mixer.update(0.5, &mut asset.graph);

    assert!(mixer.action("ghost").unwrap().bindings.is_empty());
    for key in before.traverse() {
        assert_eq!(before.get_node(key), asset.graph.get_node(key));
    }
}

#[test]
fn mixer_negative_delta_is_a_no_op() {
    let mut asset = rig();
    let mut mixer =
        AnimationMixer::with_clips(&asset.graph, asset.root, vec![translation_clip("s", "rotor", 1.0)]);
    mixer.update(0.5, &mut asset.graph);
    mixer.update(-10.0, &mut asset.graph);
    assert!(approx(mixer.actions()[0].time(), 0.5));
}

#[test]
fn mixer_plays_many_clips() {
    let mut asset = rig();
    let clips = vec![
        translation_clip("a", "rotor", 1.0),
        translation_clip("b", "body", 2.0),
    ];
    let mut mixer = AnimationMixer::with_clips(&asset.graph, asset.root, clips);
    mixer.update(1.0, &mut asset.graph);

    let body = asset.graph.find_by_name(asset.root, "body").unwrap();
    let pos = asset.graph.get_node(body).unwrap().transform.position;
    assert!(approx_vec3(pos, Vec3::new(5.0, 0.0, 0.0)));
    assert_eq!(mixer.actions().len(), 2);
}

// ============================================================================
// Ease
// ============================================================================

#[test]
fn ease_names_parse_from_config() {
    let eases: Vec<Ease> = serde_json::from_str(r#"["none", "linear", "power1.out", "power2.inOut"]"#).unwrap();
    assert_eq!(eases, vec![Ease::Linear, Ease::Linear, Ease::Power1Out, Ease::Power2InOut]);
}

#[test]
fn ease_is_monotonic() {
    for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2InOut] {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = ease.apply(i as f32 / 100.0);
            assert!(v >= last - EPSILON, "{ease:?} at {i}");
            last = v;
        }
    }
}
