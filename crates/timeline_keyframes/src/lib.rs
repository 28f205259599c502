// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe animation engine.
//!
//! This crate animates named properties over time:
//! - Scalar, 2D/3D vector and RGBA color values
//! - Per-segment easing from a fixed catalogue
//! - Linear, bezier, step, hold and spline interpolation
//! - Layers grouping tracks into named time windows
//! - Copy/paste of keyframe selections
//!
//! ## Architecture
//!
//! The engine is built on:
//! - Tracks holding keyframes sorted by time, one keyframe per instant
//! - A single [`AnimationEngine`] arena owning every track and layer
//! - JSON snapshots for persistence and RON for engine configuration
//!
//! Time is an abstract non-negative unit; the engine never assumes
//! milliseconds or frames.

pub mod config;
pub mod easing;
pub mod engine;
pub mod keyframe;
pub mod layer;
pub mod snapshot;
pub mod track;
pub mod value;

pub use config::{ConfigError, EngineConfig, SplineMode, CONFIG_FORMAT_VERSION};
pub use easing::{easing_functions, preview_easing, Easing, UnknownEasing};
pub use engine::AnimationEngine;
pub use keyframe::{
    BezierControls, InterpolationMode, Keyframe, KeyframeId, KeyframeOptions, KeyframePatch,
};
pub use layer::{AnimationLayer, LayerId};
pub use snapshot::{AnimationSnapshot, SnapshotError};
pub use track::{Track, TrackId};
pub use value::{Color, Interpolation, KeyframeValue, Vec2, Vec3};
