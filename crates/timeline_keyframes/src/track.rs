// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tracks.
//!
//! A track owns one keyframe collection that is always sorted ascending by
//! time with no two keyframes sharing a time. Every mutating method restores
//! that invariant before returning.

use crate::config::SplineMode;
use crate::keyframe::{sanitize_time, InterpolationMode, Keyframe, KeyframeId, KeyframePatch};
use crate::value::KeyframeValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// One animated property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Property key, opaque to the engine
    pub property: String,
    /// Keyframes, ascending and time-unique
    keyframes: Vec<Keyframe>,
    /// Disabled tracks always evaluate to the default value
    pub is_enabled: bool,
    /// Value used when the track has no keyframes or is disabled
    pub default_value: KeyframeValue,
}

impl Track {
    /// Create an empty, enabled track
    pub fn new(property: impl Into<String>, default_value: KeyframeValue) -> Self {
        Self {
            id: TrackId::new(),
            property: property.into(),
            keyframes: Vec::new(),
            is_enabled: true,
            default_value,
        }
    }

    /// Insert a keyframe, replacing any keyframe at exactly the same time
    pub fn insert_keyframe(&mut self, mut keyframe: Keyframe) -> &Keyframe {
        keyframe.time = sanitize_time(keyframe.time);
        let idx = match self.search(keyframe.time) {
            Ok(idx) => {
                tracing::trace!("Replacing keyframe at {}", keyframe.time);
                self.keyframes[idx] = keyframe;
                idx
            }
            Err(idx) => {
                self.keyframes.insert(idx, keyframe);
                idx
            }
        };
        &self.keyframes[idx]
    }

    /// Remove a keyframe
    pub fn remove_keyframe(&mut self, keyframe_id: KeyframeId) -> Option<Keyframe> {
        let idx = self.index_of(keyframe_id)?;
        Some(self.keyframes.remove(idx))
    }

    /// Apply a partial update to a keyframe.
    ///
    /// A time change moves the keyframe to its sorted position; any other
    /// keyframe already at the new time is replaced by it.
    pub fn update_keyframe(
        &mut self,
        keyframe_id: KeyframeId,
        patch: &KeyframePatch,
    ) -> Option<&Keyframe> {
        let idx = self.index_of(keyframe_id)?;

        let Some(time) = patch.time else {
            patch.apply_fields(&mut self.keyframes[idx]);
            return Some(&self.keyframes[idx]);
        };

        let mut keyframe = self.keyframes.remove(idx);
        patch.apply_fields(&mut keyframe);
        keyframe.time = time;
        Some(self.insert_keyframe(keyframe))
    }

    /// Binary search for an exact time
    fn search(&self, time: f64) -> Result<usize, usize> {
        self.keyframes.binary_search_by(|k| k.time.total_cmp(&time))
    }

    fn index_of(&self, keyframe_id: KeyframeId) -> Option<usize> {
        self.keyframes.iter().position(|k| k.id == keyframe_id)
    }

    /// Get keyframe by ID
    pub fn keyframe(&self, keyframe_id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id == keyframe_id)
    }

    /// Get the keyframe at exactly `time`
    pub fn keyframe_at(&self, time: f64) -> Option<&Keyframe> {
        self.search(sanitize_time(time))
            .ok()
            .map(|idx| &self.keyframes[idx])
    }

    /// Get nearest keyframe to time
    pub fn nearest_keyframe(&self, time: f64) -> Option<&Keyframe> {
        self.keyframes
            .iter()
            .min_by(|a, b| (a.time - time).abs().total_cmp(&(b.time - time).abs()))
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Get keyframe count
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Get the duration (time of last keyframe)
    pub fn duration(&self) -> f64 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    /// Get keyframes with `start <= time <= end`, ascending
    pub fn keyframes_in_range(&self, start: f64, end: f64) -> Vec<&Keyframe> {
        self.keyframes
            .iter()
            .filter(|k| k.time >= start && k.time <= end)
            .collect()
    }

    /// Index of the first keyframe later than `time`.
    ///
    /// Selects the same pair as a forward scan: prev is the last keyframe at
    /// or before `time`, next the first keyframe after it.
    fn next_index(&self, time: f64) -> usize {
        self.keyframes.partition_point(|k| k.time <= time)
    }

    /// Evaluate the track value at a given time
    pub fn evaluate(&self, time: f64, spline_mode: SplineMode) -> KeyframeValue {
        if !self.is_enabled || self.keyframes.is_empty() {
            return self.default_value;
        }

        let next = self.next_index(time);
        if next == 0 {
            return self.keyframes[0].value;
        }
        if next == self.keyframes.len() {
            return self.keyframes[next - 1].value;
        }

        let prev_idx = next - 1;
        let prev = &self.keyframes[prev_idx];
        let next_kf = &self.keyframes[next];

        let span = next_kf.time - prev.time;
        let progress = if span == 0.0 {
            0.0
        } else {
            (time - prev.time) / span
        };
        let eased = prev.easing.apply(progress);

        let blended = match prev.interpolation {
            InterpolationMode::Step | InterpolationMode::Hold => Some(prev.value),
            InterpolationMode::Linear => prev.value.lerp(&next_kf.value, eased),
            InterpolationMode::Bezier => match prev.valid_bezier_controls() {
                Some(controls) => prev
                    .value
                    .lerp(&next_kf.value, controls.blend_factor(eased)),
                None => prev.value.lerp(&next_kf.value, eased),
            },
            InterpolationMode::Spline => match spline_mode {
                SplineMode::Linear => prev.value.lerp(&next_kf.value, eased),
                SplineMode::CatmullRom => {
                    let before = &self.keyframes[prev_idx.saturating_sub(1)];
                    let after = self.keyframes.get(next + 1).unwrap_or(next_kf);
                    KeyframeValue::catmull_rom(
                        &before.value,
                        &prev.value,
                        &next_kf.value,
                        &after.value,
                        eased,
                    )
                }
            },
        };

        blended.unwrap_or_else(|| {
            tracing::warn!(
                "Track '{}': cannot blend {} into {}, holding previous value",
                self.property,
                prev.value.type_name(),
                next_kf.value.type_name()
            );
            prev.value
        })
    }

    /// Check the ordering invariant
    pub fn is_sorted_unique(&self) -> bool {
        self.keyframes.windows(2).all(|w| w[0].time < w[1].time)
    }
}
