// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions.

use crate::easing::Easing;
use crate::value::{Interpolation, KeyframeValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub Uuid);

impl KeyframeId {
    /// Create a new random keyframe ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

/// How a keyframe blends toward the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Componentwise linear blend
    #[default]
    Linear,
    /// Linear blend shaped by the keyframe's bezier controls
    Bezier,
    /// Hold the value until the next keyframe
    Step,
    /// Same as `Step`
    Hold,
    /// Smooth curve through neighbouring keyframes
    Spline,
}

/// Control points of a unit cubic bezier running from (0, 0) to (1, 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierControls {
    /// First control point X
    pub cp1x: f64,
    /// First control point Y
    pub cp1y: f64,
    /// Second control point X
    pub cp2x: f64,
    /// Second control point Y
    pub cp2y: f64,
}

impl BezierControls {
    /// Create bezier controls
    pub const fn new(cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64) -> Self {
        Self {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
        }
    }

    /// All four control values are finite
    pub fn is_valid(&self) -> bool {
        [self.cp1x, self.cp1y, self.cp2x, self.cp2y]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Blend factor for an eased progress value.
    ///
    /// The curve's x component is evaluated at `eased` and its y component at
    /// that result. This is not the inverse solve used by CSS timing curves;
    /// stored animations depend on this exact shape.
    pub fn blend_factor(&self, eased: f64) -> f64 {
        let bezier_t = Interpolation::bezier(0.0, self.cp1x, self.cp2x, 1.0, eased);
        Interpolation::bezier(0.0, self.cp1y, self.cp2y, 1.0, bezier_t)
    }
}

/// A keyframe in a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Unique keyframe ID
    pub id: KeyframeId,
    /// Position on the timeline, never negative
    pub time: f64,
    /// Value at this keyframe
    pub value: KeyframeValue,
    /// Easing applied to progress toward the next keyframe
    pub easing: Easing,
    /// Interpolation mode to the next keyframe
    pub interpolation: InterpolationMode,
    /// Control points for bezier interpolation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bezier_controls: Option<BezierControls>,
}

impl Keyframe {
    /// Create a linear keyframe
    pub fn new(time: f64, value: KeyframeValue) -> Self {
        Self {
            id: KeyframeId::new(),
            time: sanitize_time(time),
            value,
            easing: Easing::Linear,
            interpolation: InterpolationMode::Linear,
            bezier_controls: None,
        }
    }

    /// Set easing
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set interpolation mode
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Set bezier controls
    pub fn with_bezier_controls(mut self, controls: BezierControls) -> Self {
        self.bezier_controls = Some(controls);
        self
    }

    /// Clone with a freshly generated ID
    pub fn duplicate(&self) -> Self {
        Self {
            id: KeyframeId::new(),
            ..self.clone()
        }
    }

    /// Bezier controls usable for evaluation
    pub fn valid_bezier_controls(&self) -> Option<&BezierControls> {
        self.bezier_controls.as_ref().filter(|c| c.is_valid())
    }
}

/// Optional settings for a new keyframe
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyframeOptions {
    /// Easing, engine default when `None`
    pub easing: Option<Easing>,
    /// Interpolation mode, engine default when `None`
    pub interpolation: Option<InterpolationMode>,
    /// Bezier controls
    pub bezier_controls: Option<BezierControls>,
}

impl KeyframeOptions {
    /// Set easing
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Set interpolation mode
    pub fn interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = Some(mode);
        self
    }

    /// Use bezier interpolation with the given controls
    pub fn bezier(mut self, controls: BezierControls) -> Self {
        self.interpolation = Some(InterpolationMode::Bezier);
        self.bezier_controls = Some(controls);
        self
    }
}

/// Partial update of a keyframe; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyframePatch {
    /// New time
    pub time: Option<f64>,
    /// New value
    pub value: Option<KeyframeValue>,
    /// New easing
    pub easing: Option<Easing>,
    /// New interpolation mode
    pub interpolation: Option<InterpolationMode>,
    /// New bezier controls; `Some(None)` clears them
    pub bezier_controls: Option<Option<BezierControls>>,
}

impl KeyframePatch {
    /// Patch the time
    pub fn time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    /// Patch the value
    pub fn value(mut self, value: impl Into<KeyframeValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Patch the easing
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Patch the interpolation mode
    pub fn interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = Some(mode);
        self
    }

    /// Patch the bezier controls
    pub fn bezier_controls(mut self, controls: Option<BezierControls>) -> Self {
        self.bezier_controls = Some(controls);
        self
    }

    /// Apply every field except `time`
    pub(crate) fn apply_fields(&self, keyframe: &mut Keyframe) {
        if let Some(value) = self.value {
            keyframe.value = value;
        }
        if let Some(easing) = self.easing {
            keyframe.easing = easing;
        }
        if let Some(mode) = self.interpolation {
            keyframe.interpolation = mode;
        }
        if let Some(controls) = self.bezier_controls {
            keyframe.bezier_controls = controls;
        }
    }
}

/// Clamp a time to the non-negative range; NaN maps to zero
pub(crate) fn sanitize_time(time: f64) -> f64 {
    if time > 0.0 {
        time
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyframe_defaults() {
        let kf = Keyframe::new(2.0, KeyframeValue::Scalar(1.0));
        assert_eq!(kf.easing, Easing::Linear);
        assert_eq!(kf.interpolation, InterpolationMode::Linear);
        assert!(kf.bezier_controls.is_none());
    }

    #[test]
    fn test_negative_and_nan_times_clamp_to_zero() {
        assert_eq!(Keyframe::new(-5.0, KeyframeValue::Scalar(0.0)).time, 0.0);
        assert_eq!(Keyframe::new(f64::NAN, KeyframeValue::Scalar(0.0)).time, 0.0);
        assert!(sanitize_time(-0.0).is_sign_positive());
    }

    #[test]
    fn test_duplicate_gets_new_id() {
        let kf = Keyframe::new(1.0, KeyframeValue::Scalar(3.0)).with_easing(Easing::EaseInQuad);
        let copy = kf.duplicate();
        assert_ne!(copy.id, kf.id);
        assert_eq!(copy.time, kf.time);
        assert_eq!(copy.easing, kf.easing);
    }

    #[test]
    fn test_bezier_blend_factor() {
        let linear = BezierControls::new(0.0, 0.0, 1.0, 1.0);
        assert!((linear.blend_factor(0.0)).abs() < 1e-12);
        assert!((linear.blend_factor(1.0) - 1.0).abs() < 1e-12);

        let ease = BezierControls::new(0.42, 0.0, 0.58, 1.0);
        // x(0.25) = 0.2255625, then y of that parameter
        let bezier_t = Interpolation::bezier(0.0, 0.42, 0.58, 1.0, 0.25);
        let expected = Interpolation::bezier(0.0, 0.0, 1.0, 1.0, bezier_t);
        assert!((ease.blend_factor(0.25) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_controls_are_filtered() {
        let kf = Keyframe::new(0.0, KeyframeValue::Scalar(0.0))
            .with_bezier_controls(BezierControls::new(f64::NAN, 0.0, 1.0, 1.0));
        assert!(kf.valid_bezier_controls().is_none());
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut kf = Keyframe::new(0.0, KeyframeValue::Scalar(0.0))
            .with_bezier_controls(BezierControls::new(0.1, 0.2, 0.3, 0.4));
        KeyframePatch::default()
            .value(5.0)
            .bezier_controls(None)
            .apply_fields(&mut kf);
        assert_eq!(kf.value, KeyframeValue::Scalar(5.0));
        assert_eq!(kf.easing, Easing::Linear);
        assert!(kf.bezier_controls.is_none());
    }

    #[test]
    fn test_keyframe_json_shape() {
        let kf = Keyframe::new(1.5, KeyframeValue::Scalar(2.0))
            .with_interpolation(InterpolationMode::Hold);
        let json = serde_json::to_value(&kf).unwrap();
        assert_eq!(json["time"], serde_json::json!(1.5));
        assert_eq!(json["easing"], serde_json::json!("linear"));
        assert_eq!(json["interpolation"], serde_json::json!("hold"));
        assert!(json.get("bezierControls").is_none());
    }
}
