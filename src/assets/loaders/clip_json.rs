//! three.js `AnimationClip` JSON.
//!
//! Accepts either a single clip object or an object carrying an
//! `animations` array (the first clip is used):
//!
//! ```json
//! {
//!   "name": "walking",
//!   "duration": 1.2,
//!   "tracks": [
//!     { "name": "mixamorigHips.quaternion", "type": "quaternion",
//!       "times": [0, 1.2], "values": [0, 0, 0, 1, 0, 0.7071, 0, 0.7071] }
//!   ]
//! }
//! ```
//!
//! Values are flattened; their count must be `times.len() * arity`.
//! A negative or missing duration is derived from the tracks.

use glam::{Quat, Vec3};
use serde::Deserialize;

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackMeta};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::errors::{Result, ViewerError};

const INTERPOLATE_DISCRETE: u32 = 2300;
const INTERPOLATE_LINEAR: u32 = 2301;
const INTERPOLATE_SMOOTH: u32 = 2302;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClipDocument {
    Collection { animations: Vec<ClipJson> },
    Single(ClipJson),
}

#[derive(Debug, Deserialize)]
struct ClipJson {
    #[serde(default)]
    name: String,
    #[serde(default = "unknown_duration")]
    duration: f32,
    tracks: Vec<TrackJson>,
}

fn unknown_duration() -> f32 {
    -1.0
}

#[derive(Debug, Deserialize)]
struct TrackJson {
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    times: Vec<f32>,
    values: Vec<f32>,
    #[serde(default)]
    interpolation: Option<u32>,
}

/// Decodes the first clip of a three.js clip JSON document.
pub fn load_first_animation_from_slice(bytes: &[u8]) -> Result<AnimationClip> {
    let clip = match serde_json::from_slice::<ClipDocument>(bytes)? {
        ClipDocument::Single(clip) => clip,
        ClipDocument::Collection { animations } => animations
            .into_iter()
            .next()
            .ok_or_else(|| ViewerError::AnimationNotFound("'animations' array is empty".into()))?,
    };

    let tracks = clip
        .tracks
        .into_iter()
        .map(decode_track)
        .collect::<Result<Vec<_>>>()?;

    Ok(if clip.duration < 0.0 {
        AnimationClip::new(clip.name, tracks)
    } else {
        AnimationClip::with_duration(clip.name, clip.duration, tracks)
    })
}

fn decode_track(track: TrackJson) -> Result<Track> {
    let meta = TrackMeta::parse(&track.name)?;

    let expected_kind = match meta.target {
        TargetPath::Rotation => "quaternion",
        TargetPath::Translation | TargetPath::Scale => "vector",
    };
    if let Some(kind) = track.kind.as_deref()
        && kind != expected_kind
    {
        return Err(ViewerError::InvalidTrack(format!(
            "track '{}' has type '{kind}', expected '{expected_kind}'",
            track.name
        )));
    }

    let interpolation = match track.interpolation {
        None | Some(INTERPOLATE_LINEAR) => InterpolationMode::Linear,
        Some(INTERPOLATE_DISCRETE) => InterpolationMode::Step,
        Some(INTERPOLATE_SMOOTH) => {
            log::debug!("Track '{}': smooth interpolation sampled linearly", track.name);
            InterpolationMode::Linear
        }
        Some(other) => {
            return Err(ViewerError::InvalidTrack(format!(
                "track '{}' has unknown interpolation {other}",
                track.name
            )));
        }
    };

    let arity = meta.target.arity();
    if track.values.len() != track.times.len() * arity {
        return Err(ViewerError::InvalidTrack(format!(
            "track '{}' has {} values for {} keyframes (arity {arity})",
            track.name,
            track.values.len(),
            track.times.len()
        )));
    }

    let TrackMeta { node_name, target } = meta;
    Ok(match target {
        TargetPath::Rotation => {
            let values: Vec<Quat> = track.values.chunks_exact(4).map(Quat::from_slice).collect();
            Track::rotation(node_name, KeyframeTrack::try_new(track.times, values, interpolation)?)
        }
        TargetPath::Translation => {
            let values: Vec<Vec3> = track.values.chunks_exact(3).map(Vec3::from_slice).collect();
            Track::position(node_name, KeyframeTrack::try_new(track.times, values, interpolation)?)
        }
        TargetPath::Scale => {
            let values: Vec<Vec3> = track.values.chunks_exact(3).map(Vec3::from_slice).collect();
            Track::scale(node_name, KeyframeTrack::try_new(track.times, values, interpolation)?)
        }
    })
}
