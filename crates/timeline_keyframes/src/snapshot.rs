// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serializable snapshot of the engine's tracks and layers.

use crate::layer::AnimationLayer;
use crate::track::Track;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors reading or writing a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Full track and layer graph.
///
/// JSON shape:
///
/// ```json
/// { "tracks": [{ "id", "property", "keyframes": [...], "isEnabled", "defaultValue" }],
///   "layers": [{ "id", "name", "trackIds", "startTime", "duration", "isEnabled" }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationSnapshot {
    /// Tracks with embedded keyframes
    pub tracks: Vec<Track>,
    /// Layers referencing tracks by ID
    pub layers: Vec<AnimationLayer>,
}

impl AnimationSnapshot {
    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Save snapshot to file
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_json_string()?)?;
        tracing::info!("Saved animation snapshot to {:?}", path);
        Ok(())
    }

    /// Load snapshot from file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&contents)?;
        tracing::info!(
            "Loaded animation snapshot from {:?} ({} tracks, {} layers)",
            path,
            snapshot.tracks.len(),
            snapshot.layers.len()
        );
        Ok(snapshot)
    }
}
