use std::sync::Arc;

use crate::animation::values::Interpolatable;
use crate::errors::{Result, ViewerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// How far the cursor scans around its cached index before giving up and
/// falling back to a binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Cached keyframe index so sequential playback samples in O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Time/value samples for one animated channel.
///
/// Buffers are reference counted: cloning a track (for example when a clip is
/// retargeted) shares the samples instead of copying them.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Arc<[f32]>,
    /// For CubicSpline the layout is `[in_tangent, value, out_tangent]` per key.
    pub values: Arc<[T]>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(
        times: impl Into<Arc<[f32]>>,
        values: impl Into<Arc<[T]>>,
        interpolation: InterpolationMode,
    ) -> Self {
        Self {
            times: times.into(),
            values: values.into(),
            interpolation,
        }
    }

    /// Builds a track after checking that it can be sampled: at least one key,
    /// non-decreasing times and a value count matching the interpolation mode.
    pub fn try_new(
        times: impl Into<Arc<[f32]>>,
        values: impl Into<Arc<[T]>>,
        interpolation: InterpolationMode,
    ) -> Result<Self> {
        let track = Self::new(times, values, interpolation);

        if track.times.is_empty() {
            return Err(ViewerError::InvalidTrack("track has no keyframes".into()));
        }
        if track.times.windows(2).any(|w| w[1] < w[0]) {
            return Err(ViewerError::InvalidTrack(
                "keyframe times are not sorted".into(),
            ));
        }
        let expected = match interpolation {
            InterpolationMode::CubicSpline => track.times.len() * 3,
            _ => track.times.len(),
        };
        if track.values.len() != expected {
            return Err(ViewerError::InvalidTrack(format!(
                "expected {expected} values for {} keyframes, got {}",
                track.times.len(),
                track.values.len()
            )));
        }

        Ok(track)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe, or zero for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stateless sampling via binary search. Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        let next_idx = self.times.partition_point(|&t| t <= time);
        Some(self.sample_at_frame(next_idx.saturating_sub(1), time))
    }

    /// Sampling with a cursor; the cursor is updated to the located frame.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        match len {
            0 => return None,
            1 => return Some(*self.value_at(0)),
            _ => {}
        }

        let index = self
            .scan_near(cursor.last_index.min(len - 1), time)
            .unwrap_or_else(|| self.times.partition_point(|&t| t <= time).saturating_sub(1));

        cursor.last_index = index;
        Some(self.sample_at_frame(index, time))
    }

    /// Looks for the frame containing `time` within a few keys of `start`.
    fn scan_near(&self, start: usize, time: f32) -> Option<usize> {
        let last = self.times.len() - 1;

        if time >= self.times[start] {
            // Forward playback
            for idx in start..=(start + MAX_SCAN_OFFSET).min(last) {
                if idx == last || time < self.times[idx + 1] {
                    return Some(idx);
                }
            }
            None
        } else {
            // Reverse playback or loop wrap
            (start.saturating_sub(MAX_SCAN_OFFSET)..start)
                .rev()
                .find(|&idx| time >= self.times[idx])
        }
    }

    fn value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            return *self.value_at(len - 1);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next_idx] - t0;
        let t = if dt > 1e-6 { ((time - t0) / dt).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => *self.value_at(index),
            InterpolationMode::Linear => {
                T::interpolate_linear(*self.value_at(index), *self.value_at(next_idx), t)
            }
            InterpolationMode::CubicSpline => {
                let base0 = index * 3;
                let base1 = next_idx * 3;
                T::interpolate_cubic(
                    self.values[base0 + 1],
                    self.values[base0 + 2],
                    self.values[base1],
                    self.values[base1 + 1],
                    t,
                    dt,
                )
            }
        }
    }
}
