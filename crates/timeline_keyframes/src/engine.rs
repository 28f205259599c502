// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation engine owning every track and layer.
//!
//! Lookups never fail loudly: unknown IDs yield `None`, `false` or an empty
//! collection so callers can probe cheaply from a render loop.

use crate::config::EngineConfig;
use crate::easing::{self, Easing};
use crate::keyframe::{Keyframe, KeyframeId, KeyframeOptions, KeyframePatch};
use crate::layer::{AnimationLayer, LayerId};
use crate::snapshot::{AnimationSnapshot, SnapshotError};
use crate::track::{Track, TrackId};
use crate::value::KeyframeValue;
use indexmap::IndexMap;

/// Keyframe animation engine
#[derive(Debug, Clone, Default)]
pub struct AnimationEngine {
    /// Tracks in creation order
    tracks: IndexMap<TrackId, Track>,
    /// Layers in creation order
    layers: IndexMap<LayerId, AnimationLayer>,
    config: EngineConfig,
}

impl AnimationEngine {
    /// Create an empty engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration; existing keyframes are unchanged
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    // Tracks

    /// Create an empty, enabled track
    pub fn create_track(
        &mut self,
        property: impl Into<String>,
        default_value: KeyframeValue,
    ) -> &Track {
        let track = Track::new(property, default_value);
        tracing::debug!("Created track {:?} for '{}'", track.id, track.property);
        self.tracks.entry(track.id).or_insert(track)
    }

    /// Remove a track; layers keep their (now stale) references
    pub fn remove_track(&mut self, track_id: TrackId) -> Option<Track> {
        let removed = self.tracks.shift_remove(&track_id);
        if removed.is_some() {
            tracing::debug!("Removed track {:?}", track_id);
        }
        removed
    }

    /// Get a track
    pub fn get_track(&self, track_id: TrackId) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    /// Get all tracks in creation order
    pub fn get_all_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Get track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Find the first track animating `property`
    pub fn find_track_by_property(&self, property: &str) -> Option<&Track> {
        self.tracks.values().find(|t| t.property == property)
    }

    /// Enable or disable a track
    pub fn set_track_enabled(&mut self, track_id: TrackId, enabled: bool) -> bool {
        match self.tracks.get_mut(&track_id) {
            Some(track) => {
                track.is_enabled = enabled;
                true
            }
            None => false,
        }
    }

    // Keyframes

    /// Add a keyframe, replacing any keyframe at exactly the same time
    pub fn add_keyframe(
        &mut self,
        track_id: TrackId,
        time: f64,
        value: KeyframeValue,
        options: KeyframeOptions,
    ) -> Option<&Keyframe> {
        let mut keyframe = Keyframe::new(time, value)
            .with_easing(options.easing.unwrap_or(self.config.default_easing))
            .with_interpolation(
                options
                    .interpolation
                    .unwrap_or(self.config.default_interpolation),
            );
        keyframe.bezier_controls = options.bezier_controls;

        let track = self.tracks.get_mut(&track_id)?;
        tracing::trace!("Adding keyframe at {} to track {:?}", keyframe.time, track_id);
        Some(track.insert_keyframe(keyframe))
    }

    /// Remove a keyframe; returns whether it existed
    pub fn remove_keyframe(&mut self, track_id: TrackId, keyframe_id: KeyframeId) -> bool {
        self.tracks
            .get_mut(&track_id)
            .and_then(|track| track.remove_keyframe(keyframe_id))
            .is_some()
    }

    /// Apply a partial update to a keyframe
    pub fn update_keyframe(
        &mut self,
        track_id: TrackId,
        keyframe_id: KeyframeId,
        patch: KeyframePatch,
    ) -> Option<&Keyframe> {
        self.tracks
            .get_mut(&track_id)?
            .update_keyframe(keyframe_id, &patch)
    }

    // Evaluation

    /// Value of a track at `time`, `None` for an unknown track
    pub fn get_value(&self, track_id: TrackId, time: f64) -> Option<KeyframeValue> {
        self.tracks
            .get(&track_id)
            .map(|track| track.evaluate(time, self.config.spline_mode))
    }

    /// Evaluate every enabled track at `time`
    pub fn evaluate_all(&self, time: f64) -> Vec<(TrackId, KeyframeValue)> {
        self.tracks
            .values()
            .filter(|track| track.is_enabled)
            .map(|track| (track.id, track.evaluate(time, self.config.spline_mode)))
            .collect()
    }

    /// Latest keyframe time across all tracks
    pub fn content_duration(&self) -> f64 {
        self.tracks
            .values()
            .map(Track::duration)
            .fold(0.0, f64::max)
    }

    /// Names of every available easing
    pub fn get_easing_functions(&self) -> Vec<&'static str> {
        easing::easing_functions()
    }

    /// Sample an easing curve for preview, `None` for unknown names
    pub fn preview_easing(&self, name: &str, steps: usize) -> Option<Vec<f64>> {
        easing::preview_easing(name, steps)
    }

    /// Easing used for keyframes added without one
    pub fn default_easing(&self) -> Easing {
        self.config.default_easing
    }

    // Layers

    /// Create an empty, enabled layer
    pub fn create_layer(
        &mut self,
        name: impl Into<String>,
        start_time: f64,
        duration: f64,
    ) -> &AnimationLayer {
        let layer = AnimationLayer::new(name, start_time, duration);
        tracing::debug!("Created layer {:?} '{}'", layer.id, layer.name);
        self.layers.entry(layer.id).or_insert(layer)
    }

    /// Remove a layer; its tracks are untouched
    pub fn remove_layer(&mut self, layer_id: LayerId) -> Option<AnimationLayer> {
        self.layers.shift_remove(&layer_id)
    }

    /// Get a layer
    pub fn get_layer(&self, layer_id: LayerId) -> Option<&AnimationLayer> {
        self.layers.get(&layer_id)
    }

    /// Get all layers in creation order
    pub fn get_all_layers(&self) -> impl Iterator<Item = &AnimationLayer> {
        self.layers.values()
    }

    /// Add a track to a layer.
    ///
    /// Returns `false` without effect when either ID is unknown; adding a
    /// track that is already present succeeds without duplicating it.
    pub fn add_track_to_layer(&mut self, layer_id: LayerId, track_id: TrackId) -> bool {
        if !self.tracks.contains_key(&track_id) {
            return false;
        }
        let Some(layer) = self.layers.get_mut(&layer_id) else {
            return false;
        };
        layer.add_track(track_id);
        true
    }

    /// Remove a track reference from a layer
    pub fn remove_track_from_layer(&mut self, layer_id: LayerId, track_id: TrackId) -> bool {
        self.layers
            .get_mut(&layer_id)
            .is_some_and(|layer| layer.remove_track(track_id))
    }

    /// Enable or disable a layer
    pub fn set_layer_enabled(&mut self, layer_id: LayerId, enabled: bool) -> bool {
        match self.layers.get_mut(&layer_id) {
            Some(layer) => {
                layer.is_enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Tracks of a layer that still exist
    pub fn tracks_in_layer(&self, layer_id: LayerId) -> Vec<&Track> {
        self.layers
            .get(&layer_id)
            .map(|layer| {
                layer
                    .track_ids
                    .iter()
                    .filter_map(|id| self.tracks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    // Range and clipboard

    /// Keyframes with `start <= time <= end`, ascending
    pub fn get_keyframes_in_range(&self, track_id: TrackId, start: f64, end: f64) -> Vec<&Keyframe> {
        self.tracks
            .get(&track_id)
            .map(|track| track.keyframes_in_range(start, end))
            .unwrap_or_default()
    }

    /// Clone the given keyframes with fresh IDs, in time order
    pub fn copy_keyframes(&self, track_id: TrackId, keyframe_ids: &[KeyframeId]) -> Vec<Keyframe> {
        let Some(track) = self.tracks.get(&track_id) else {
            return Vec::new();
        };
        track
            .keyframes()
            .iter()
            .filter(|k| keyframe_ids.contains(&k.id))
            .map(Keyframe::duplicate)
            .collect()
    }

    /// Insert clones of `keyframes` shifted by `time_offset`.
    ///
    /// Each pasted keyframe gets a fresh ID and replaces whatever sits at its
    /// target time. Returns the IDs of the pasted keyframes that remain once
    /// every paste has been applied.
    pub fn paste_keyframes(
        &mut self,
        track_id: TrackId,
        keyframes: &[Keyframe],
        time_offset: f64,
    ) -> Vec<KeyframeId> {
        let Some(track) = self.tracks.get_mut(&track_id) else {
            return Vec::new();
        };

        let mut pasted = Vec::with_capacity(keyframes.len());
        for source in keyframes {
            let mut keyframe = source.duplicate();
            keyframe.time = source.time + time_offset;
            pasted.push(track.insert_keyframe(keyframe).id);
        }
        pasted.retain(|id| track.keyframe(*id).is_some());

        tracing::debug!(
            "Pasted {} keyframes into track {:?} at offset {}",
            pasted.len(),
            track_id,
            time_offset
        );
        pasted
    }

    // Serialization

    /// Snapshot of every track and layer
    pub fn to_json(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            tracks: self.tracks.values().cloned().collect(),
            layers: self.layers.values().cloned().collect(),
        }
    }

    /// Replace all state with a snapshot, keeping its IDs.
    ///
    /// The snapshot is trusted as-is; validating its shape is up to the
    /// caller.
    pub fn from_json(&mut self, snapshot: AnimationSnapshot) {
        self.clear();
        tracing::debug!(
            "Restoring {} tracks and {} layers",
            snapshot.tracks.len(),
            snapshot.layers.len()
        );
        self.tracks = snapshot
            .tracks
            .into_iter()
            .map(|track| (track.id, track))
            .collect();
        self.layers = snapshot
            .layers
            .into_iter()
            .map(|layer| (layer.id, layer))
            .collect();
    }

    /// Serialize all state to a JSON string
    pub fn to_json_string(&self) -> Result<String, SnapshotError> {
        self.to_json().to_json_string()
    }

    /// Replace all state from a JSON string; state is untouched on error
    pub fn from_json_str(&mut self, json: &str) -> Result<(), SnapshotError> {
        let snapshot = AnimationSnapshot::from_json_str(json)?;
        self.from_json(snapshot);
        Ok(())
    }

    /// Remove every track and layer
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.layers.clear();
    }
}
