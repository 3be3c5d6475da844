use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;
use crate::errors::{Result, ViewerError};

/// Which bone and which property a track animates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

impl TrackMeta {
    /// Parses a `<bone>.<property>` track name. The last `.` separates the
    /// property, so the bone part may itself contain dots.
    pub fn parse(track_name: &str) -> Result<Self> {
        let (node_name, property) = track_name.rsplit_once('.').ok_or_else(|| {
            ViewerError::InvalidTrack(format!("track name '{track_name}' has no property"))
        })?;

        Ok(Self {
            node_name: node_name.to_string(),
            target: property.parse()?,
        })
    }

    #[must_use]
    pub fn track_name(&self) -> String {
        format!("{}.{}", self.node_name, self.target)
    }
}

/// Keyframe payload, tagged by value kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn times(&self) -> &[f32] {
        match self {
            TrackData::Vector3(t) => &t.times,
            TrackData::Quaternion(t) => &t.times,
        }
    }

    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times().last().copied().unwrap_or(0.0)
    }

    /// Number of scalars per keyframe value.
    #[must_use]
    pub const fn value_arity(&self) -> usize {
        match self {
            TrackData::Vector3(_) => 3,
            TrackData::Quaternion(_) => 4,
        }
    }
}

/// One animated channel: metadata plus keyframes.
///
/// The constructors keep the value kind in agreement with the target
/// property (quaternions for rotation, vectors for position and scale).
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub(crate) meta: TrackMeta,
    pub(crate) data: TrackData,
}

impl Track {
    #[must_use]
    pub fn position(node_name: impl Into<String>, keys: KeyframeTrack<Vec3>) -> Self {
        Self::vector(node_name, TargetPath::Translation, keys)
    }

    #[must_use]
    pub fn scale(node_name: impl Into<String>, keys: KeyframeTrack<Vec3>) -> Self {
        Self::vector(node_name, TargetPath::Scale, keys)
    }

    #[must_use]
    pub fn rotation(node_name: impl Into<String>, keys: KeyframeTrack<Quat>) -> Self {
        Self {
            meta: TrackMeta {
                node_name: node_name.into(),
                target: TargetPath::Rotation,
            },
            data: TrackData::Quaternion(keys),
        }
    }

    fn vector(node_name: impl Into<String>, target: TargetPath, keys: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta {
                node_name: node_name.into(),
                target,
            },
            data: TrackData::Vector3(keys),
        }
    }

    #[inline]
    #[must_use]
    pub fn meta(&self) -> &TrackMeta {
        &self.meta
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &TrackData {
        &self.data
    }

    /// Full track name, e.g. `mixamorigHips.quaternion`.
    #[must_use]
    pub fn name(&self) -> String {
        self.meta.track_name()
    }

    #[inline]
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.meta.node_name
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> TargetPath {
        self.meta.target
    }
}

/// A named, time-bounded, ordered collection of tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a clip whose duration is the latest keyframe over all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);

        Self::with_duration(name, duration, tracks)
    }

    #[must_use]
    pub fn with_duration(name: impl Into<String>, duration: f32, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    #[must_use]
    pub fn track_names(&self) -> Vec<String> {
        self.tracks.iter().map(Track::name).collect()
    }
}
