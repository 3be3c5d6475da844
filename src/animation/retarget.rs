//! Clip Retargeting
//!
//! Rewrites clips authored against a foreign skeleton so their bone names
//! match the avatar skeleton.
//!
//! Only two rules apply:
//! - position and scale tracks are dropped (source and target proportions
//!   differ);
//! - the fixed source-skeleton prefix is stripped from every bone name
//!   (`mixamorigHips.quaternion` becomes `Hips.quaternion`).
//!
//! Keyframes are shared with the source clip, not resampled. Bone hierarchy,
//! scale compensation and IK are out of scope.

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackMeta};

/// Bone-name namespace used by Mixamo-exported skeletons.
pub const MIXAMO_BONE_PREFIX: &str = "mixamorig";

/// Retargets a Mixamo clip onto the avatar skeleton.
#[must_use]
pub fn retarget(source: &AnimationClip) -> AnimationClip {
    retarget_with_prefix(source, MIXAMO_BONE_PREFIX)
}

/// Retargets `source` by keeping its rotation tracks and stripping `prefix`
/// from their bone names.
///
/// Name and duration are preserved, as is the relative order of the kept
/// tracks. A bone name without the prefix is kept as is. The result may have
/// no tracks at all; flagging that is up to the caller.
#[must_use]
pub fn retarget_with_prefix(source: &AnimationClip, prefix: &str) -> AnimationClip {
    let tracks = source
        .tracks
        .iter()
        .filter(|track| track.meta.target == TargetPath::Rotation)
        .map(|track| {
            let node_name = track.meta.node_name.as_str();
            Track {
                meta: TrackMeta {
                    node_name: node_name.strip_prefix(prefix).unwrap_or(node_name).to_string(),
                    target: track.meta.target,
                },
                data: track.data.clone(),
            }
        })
        .collect();

    AnimationClip::with_duration(source.name.clone(), source.duration, tracks)
}
