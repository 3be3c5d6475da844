use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::{
    binding::PropertyBinding,
    clip::{AnimationClip, TrackData},
    tracks::KeyframeCursor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    Once,
    #[default]
    Loop,
    PingPong,
}

/// A clip bound to one mixer and one skeleton.
///
/// An action only influences the skeleton while it is running. Newly created
/// actions are stopped at frame zero.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    time: f32,
    running: bool,

    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            running: false,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Local playback position in seconds.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Whether the action currently influences the skeleton.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts (or resumes) playback from the current time.
    pub fn play(&mut self) {
        self.running = true;
    }

    /// Halts playback immediately, without fade-out, and rewinds.
    pub fn stop(&mut self) {
        self.running = false;
        self.rewind();
    }

    /// Rewinds to the first frame without changing the running state.
    pub fn reset(&mut self) {
        self.rewind();
    }

    fn rewind(&mut self) {
        self.time = 0.0;
        self.track_cursors.fill(KeyframeCursor::default());
    }

    /// Advances local time by `dt` seconds. Stopped actions do not move.
    pub fn update(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.running = false;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.running = false;
                }
            }
            LoopMode::Loop => {
                self.time = self.time.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let cycle = duration * 2.0;
                let t = self.time.rem_euclid(cycle);
                self.time = if t > duration { cycle - t } else { t };
            }
        }
    }

    /// Gets the value of the specified track at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;

        match &track.data {
            TrackData::Vector3(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => {
                t.sample_with_cursor(self.time, cursor).map(TrackValue::Quaternion)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}
