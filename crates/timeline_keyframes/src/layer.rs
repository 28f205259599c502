// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layer grouping for tracks.

use crate::track::TrackId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub Uuid);

impl LayerId {
    /// Create a new random layer ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Named time window grouping tracks.
///
/// Holds track IDs only. The referenced tracks may have been removed since;
/// readers must skip IDs that no longer resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationLayer {
    /// Unique layer ID
    pub id: LayerId,
    /// Display name
    pub name: String,
    /// Grouped tracks, no duplicates
    pub track_ids: Vec<TrackId>,
    /// Window start
    pub start_time: f64,
    /// Window length
    pub duration: f64,
    /// Whether the layer is enabled
    pub is_enabled: bool,
}

impl AnimationLayer {
    /// Create an empty, enabled layer
    pub fn new(name: impl Into<String>, start_time: f64, duration: f64) -> Self {
        Self {
            id: LayerId::new(),
            name: name.into(),
            track_ids: Vec::new(),
            start_time,
            duration,
            is_enabled: true,
        }
    }

    /// Add a track reference; returns `false` if it was already present
    pub fn add_track(&mut self, track_id: TrackId) -> bool {
        if self.track_ids.contains(&track_id) {
            return false;
        }
        self.track_ids.push(track_id);
        true
    }

    /// Remove a track reference
    pub fn remove_track(&mut self, track_id: TrackId) -> bool {
        let before = self.track_ids.len();
        self.track_ids.retain(|id| *id != track_id);
        self.track_ids.len() != before
    }

    /// Whether the layer references a track
    pub fn contains_track(&self, track_id: TrackId) -> bool {
        self.track_ids.contains(&track_id)
    }

    /// End of the layer window
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Whether `time` falls inside the window (inclusive)
    pub fn contains_time(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_track_is_idempotent() {
        let mut layer = AnimationLayer::new("Intro", 0.0, 2.0);
        let track = TrackId::new();
        assert!(layer.add_track(track));
        assert!(!layer.add_track(track));
        assert_eq!(layer.track_ids, vec![track]);

        assert!(layer.remove_track(track));
        assert!(!layer.remove_track(track));
        assert!(!layer.contains_track(track));
    }

    #[test]
    fn test_time_window() {
        let layer = AnimationLayer::new("Outro", 5.0, 2.5);
        assert_eq!(layer.end_time(), 7.5);
        assert!(layer.contains_time(5.0));
        assert!(layer.contains_time(7.5));
        assert!(!layer.contains_time(4.99));
    }

    #[test]
    fn test_layer_json_shape() {
        let layer = AnimationLayer::new("Intro", 1.0, 3.0);
        let json = serde_json::to_value(&layer).unwrap();
        for key in ["id", "name", "trackIds", "startTime", "duration", "isEnabled"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
