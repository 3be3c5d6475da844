//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation and validation
//! - KeyframeCursor cached lookup and binary search fallback
//! - AnimationAction play/stop/reset and loop modes
//! - AnimationClip duration and track naming
//! - AnimationMixer applying poses to a scene

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{Quat, Vec3};

use avatar_viewer::animation::{
    AnimationAction, AnimationClip, AnimationMixer, Interpolatable, InterpolationMode,
    KeyframeCursor, KeyframeTrack, LoopMode, TargetPath, Track, TrackData, TrackMeta,
    sanitize_node_name,
};
use avatar_viewer::scene::{Node, Scene};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeTrack: Linear / Step Interpolation
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_clamps_outside_range() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![10.0_f32, 20.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor).unwrap(), 10.0));
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor).unwrap(), 20.0));
    assert!(approx(track.sample(0.0).unwrap(), 10.0));
    assert!(approx(track.sample(9.0).unwrap(), 20.0));
}

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.99, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor).unwrap(), 100.0));
    assert!(approx(track.sample_with_cursor(1.5, &mut cursor).unwrap(), 100.0));
    assert!(approx(track.sample(2.0).unwrap(), 200.0));
}

#[test]
fn track_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI);
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let val = track.sample(0.5).unwrap();
    let angle = val.angle_between(q0.slerp(q1, 0.5));
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
}

#[test]
fn track_cubic_f32_endpoints() {
    // values = [in_tangent0, value0, out_tangent0, in_tangent1, value1, out_tangent1]
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 0.0, 1.0, 1.0, 10.0, 0.0],
        InterpolationMode::CubicSpline,
    );

    assert!(approx(track.sample(0.0).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 10.0));
}

#[test]
fn track_empty_samples_none() {
    let track = KeyframeTrack::<f32>::new(Vec::new(), Vec::new(), InterpolationMode::Linear);
    let mut cursor = KeyframeCursor::default();
    assert!(track.sample(0.0).is_none());
    assert!(track.sample_with_cursor(0.0, &mut cursor).is_none());
}

#[test]
fn track_try_new_rejects_malformed_input() {
    assert!(KeyframeTrack::<f32>::try_new(Vec::new(), Vec::new(), InterpolationMode::Linear).is_err());
    assert!(KeyframeTrack::try_new(vec![1.0, 0.0], vec![0.0_f32, 1.0], InterpolationMode::Linear).is_err());
    assert!(KeyframeTrack::try_new(vec![0.0, 1.0], vec![0.0_f32], InterpolationMode::Linear).is_err());
    assert!(KeyframeTrack::try_new(vec![0.0, 1.0], vec![0.0_f32, 1.0], InterpolationMode::CubicSpline).is_err());
    assert!(KeyframeTrack::try_new(vec![0.0, 1.0], vec![0.0_f32, 1.0], InterpolationMode::Step).is_ok());
}

// ============================================================================
// KeyframeCursor
// ============================================================================

#[test]
fn cursor_matches_stateless_sample() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    for i in 0..=40 {
        let t = i as f32 * 0.1;
        let with_cursor = track.sample_with_cursor(t, &mut cursor).unwrap();
        let stateless = track.sample(t).unwrap();
        assert!(approx(with_cursor, stateless), "t={t}: {with_cursor} != {stateless}");
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        vec![0.0_f32, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(6.5, &mut cursor).unwrap(), 65.0));
    assert_eq!(cursor.last_index, 6);

    // Loop wrap: far behind the cursor
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor).unwrap(), 5.0));
    assert_eq!(cursor.last_index, 0);
}

#[test]
fn cursor_single_keyframe() {
    let track = KeyframeTrack::new(vec![0.0], vec![42.0_f32], InterpolationMode::Linear);
    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor).unwrap(), 42.0));
}

// ============================================================================
// Interpolatable
// ============================================================================

#[test]
fn interpolatable_vec3_linear() {
    let result = Vec3::interpolate_linear(Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0), 0.5);
    assert!(approx(result.x, 5.0));
    assert!(approx(result.y, 10.0));
    assert!(approx(result.z, 15.0));
}

#[test]
fn interpolatable_quat_linear_is_slerp() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(FRAC_PI_2);
    let result = Quat::interpolate_linear(a, b, 0.5);
    assert!(result.angle_between(a.slerp(b, 0.5)) < 1e-4);
}

// ============================================================================
// AnimationAction
// ============================================================================

fn make_simple_clip(duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "test",
        vec![Track::rotation(
            "Hips",
            KeyframeTrack::new(
                vec![0.0, duration],
                vec![Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_2)],
                InterpolationMode::Linear,
            ),
        )],
    ))
}

#[test]
fn action_starts_stopped_at_zero() {
    let action = AnimationAction::new(make_simple_clip(2.0));
    assert!(!action.is_running());
    assert!(approx(action.time(), 0.0));
    assert_eq!(action.loop_mode, LoopMode::Loop);
}

#[test]
fn action_stopped_does_not_advance() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.update(1.0);
    assert!(approx(action.time(), 0.0));
}

#[test]
fn action_play_stop_reset() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.play();
    action.update(0.75);
    assert!(action.is_running());
    assert!(approx(action.time(), 0.75));

    action.reset();
    assert!(action.is_running(), "reset keeps the running state");
    assert!(approx(action.time(), 0.0));

    action.update(0.5);
    action.stop();
    assert!(!action.is_running());
    assert!(approx(action.time(), 0.0));
}

#[test]
fn action_loop_wraps() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.play();
    action.update(2.5);
    assert!(approx(action.time(), 0.5), "got {}", action.time());
    assert!(action.is_running());
}

#[test]
fn action_once_clamps_and_stops() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::Once;
    action.play();
    action.update(3.0);
    assert!(approx(action.time(), 2.0));
    assert!(!action.is_running());
}

#[test]
fn action_ping_pong_reflects() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.loop_mode = LoopMode::PingPong;
    action.play();
    action.update(2.5);
    assert!(approx(action.time(), 1.5), "got {}", action.time());
}

#[test]
fn action_time_scale() {
    let mut action = AnimationAction::new(make_simple_clip(4.0));
    action.time_scale = 2.0;
    action.play();
    action.update(1.0);
    assert!(approx(action.time(), 2.0));
}

#[test]
fn action_accumulates_irregular_deltas_without_drift() {
    let mut action = AnimationAction::new(make_simple_clip(2.0));
    action.play();
    for dt in [0.0, 0.016, 0.033] {
        action.update(dt);
    }
    assert!(approx(action.time(), 0.049), "got {}", action.time());
}

// ============================================================================
// AnimationClip & Track Naming
// ============================================================================

#[test]
fn clip_auto_duration() {
    let clip = AnimationClip::new(
        "test",
        vec![
            Track::position(
                "a",
                KeyframeTrack::new(vec![0.0, 1.5], vec![Vec3::ZERO, Vec3::X], InterpolationMode::Linear),
            ),
            Track::rotation(
                "b",
                KeyframeTrack::new(
                    vec![0.0, 3.0],
                    vec![Quat::IDENTITY, Quat::from_rotation_y(1.0)],
                    InterpolationMode::Linear,
                ),
            ),
        ],
    );
    assert!(approx(clip.duration, 3.0));
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("empty", vec![]);
    assert!(approx(clip.duration, 0.0));
}

#[test]
fn track_names_use_property_suffix() {
    let keys = KeyframeTrack::new(vec![0.0], vec![Vec3::ONE], InterpolationMode::Linear);
    assert_eq!(Track::position("Hips", keys.clone()).name(), "Hips.position");
    assert_eq!(Track::scale("Hips", keys).name(), "Hips.scale");

    let rot = KeyframeTrack::new(vec![0.0], vec![Quat::IDENTITY], InterpolationMode::Linear);
    assert_eq!(Track::rotation("mixamorigHips", rot).name(), "mixamorigHips.quaternion");
}

#[test]
fn track_constructors_pair_value_kind_with_property() {
    let keys = KeyframeTrack::new(vec![0.0], vec![Vec3::ONE], InterpolationMode::Linear);
    let rot = KeyframeTrack::new(vec![0.0], vec![Quat::IDENTITY], InterpolationMode::Linear);
    let tracks = [
        Track::position("Hips", keys.clone()),
        Track::scale("Hips", keys),
        Track::rotation("Hips", rot),
    ];

    for track in &tracks {
        let consistent = match track.data() {
            TrackData::Quaternion(_) => track.target() == TargetPath::Rotation,
            TrackData::Vector3(_) => track.target() != TargetPath::Rotation,
        };
        assert!(consistent, "{} carries the wrong value kind", track.name());
        assert_eq!(track.data().value_arity(), track.target().arity());
        assert_eq!(track.meta().target, track.target());
    }
}

#[test]
fn track_meta_parse() {
    let meta = TrackMeta::parse("mixamorigLeftArm.quaternion").unwrap();
    assert_eq!(meta.node_name, "mixamorigLeftArm");
    assert_eq!(meta.target, TargetPath::Rotation);

    assert_eq!(TrackMeta::parse("Hips.position").unwrap().target, TargetPath::Translation);
    assert!(TrackMeta::parse("Hips").is_err());
    assert!(TrackMeta::parse("Hips.morphTargetInfluences").is_err());
}

#[test]
fn sanitize_strips_reserved_characters() {
    assert_eq!(sanitize_node_name("mixamorig:Hips"), "mixamorigHips");
    assert_eq!(sanitize_node_name("Left Hand.001"), "Left_Hand001");
    assert_eq!(sanitize_node_name("Spine"), "Spine");
}

// ============================================================================
// AnimationMixer
// ============================================================================

#[test]
fn mixer_applies_running_action_to_bound_node() {
    let mut scene = Scene::new("avatar");
    let hips = scene.add_node(Node::new("Hips"), None);

    let mut mixer = AnimationMixer::new();
    let handle = mixer.clip_action(make_simple_clip(2.0), &scene);
    assert_eq!(mixer.action(handle).unwrap().bindings.len(), 1);

    // Stopped: no influence
    mixer.update(1.0, &mut scene);
    assert_eq!(scene.get_node(hips).unwrap().transform.rotation, Quat::IDENTITY);

    mixer.action_mut(handle).unwrap().play();
    mixer.update(2.0 - 1e-4, &mut scene);
    let rotation = scene.get_node(hips).unwrap().transform.rotation;
    assert!(rotation.angle_between(Quat::from_rotation_y(FRAC_PI_2)) < 1e-2);
    assert_eq!(mixer.running_count(), 1);
}

#[test]
fn mixer_zero_delta_keeps_pose() {
    let mut scene = Scene::new("avatar");
    let hips = scene.add_node(Node::new("Hips"), None);

    let mut mixer = AnimationMixer::new();
    let handle = mixer.clip_action(make_simple_clip(2.0), &scene);
    mixer.action_mut(handle).unwrap().play();

    mixer.update(0.5, &mut scene);
    let before = scene.get_node(hips).unwrap().transform.rotation;
    mixer.update(0.0, &mut scene);
    let after = scene.get_node(hips).unwrap().transform.rotation;
    assert_eq!(before, after);
}

#[test]
fn mixer_uncache_and_stop_all() {
    let scene = Scene::new("avatar");
    let mut mixer = AnimationMixer::new();
    let a = mixer.clip_action(make_simple_clip(1.0), &scene);
    let b = mixer.clip_action(make_simple_clip(1.0), &scene);
    mixer.action_mut(a).unwrap().play();
    mixer.action_mut(b).unwrap().play();

    mixer.stop_all_actions();
    assert_eq!(mixer.running_count(), 0);

    assert!(mixer.uncache_action(a).is_some());
    assert!(mixer.action(a).is_none());
    assert_eq!(mixer.len(), 1);
}
