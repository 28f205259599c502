// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing catalogue.
//!
//! Every easing is a pure `[0, 1] -> [0, 1]` remapping of segment progress.
//! Back and elastic curves overshoot the unit range between the endpoints;
//! the endpoints themselves are always exact.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

const BACK_C1: f64 = 1.70158;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f64 = (2.0 * PI) / 4.5;
const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;

/// Named easing function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[allow(missing_docs)]
pub enum Easing {
    /// Identity
    #[default]
    Linear,
    /// CSS-style ease-in (cubic)
    EaseIn,
    /// CSS-style ease-out (cubic)
    EaseOut,
    /// CSS-style ease-in-out (cubic)
    EaseInOut,
    /// Holds 0 until progress reaches 1
    Step,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

impl Easing {
    /// Every easing in catalogue order
    pub const ALL: [Easing; 35] = [
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Step,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInQuart,
        Self::EaseOutQuart,
        Self::EaseInOutQuart,
        Self::EaseInQuint,
        Self::EaseOutQuint,
        Self::EaseInOutQuint,
        Self::EaseInSine,
        Self::EaseOutSine,
        Self::EaseInOutSine,
        Self::EaseInExpo,
        Self::EaseOutExpo,
        Self::EaseInOutExpo,
        Self::EaseInCirc,
        Self::EaseOutCirc,
        Self::EaseInOutCirc,
        Self::EaseInBack,
        Self::EaseOutBack,
        Self::EaseInOutBack,
        Self::EaseInElastic,
        Self::EaseOutElastic,
        Self::EaseInOutElastic,
        Self::EaseInBounce,
        Self::EaseOutBounce,
        Self::EaseInOutBounce,
    ];

    /// Catalogue name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Step => "step",
            Self::EaseInQuad => "ease-in-quad",
            Self::EaseOutQuad => "ease-out-quad",
            Self::EaseInOutQuad => "ease-in-out-quad",
            Self::EaseInCubic => "ease-in-cubic",
            Self::EaseOutCubic => "ease-out-cubic",
            Self::EaseInOutCubic => "ease-in-out-cubic",
            Self::EaseInQuart => "ease-in-quart",
            Self::EaseOutQuart => "ease-out-quart",
            Self::EaseInOutQuart => "ease-in-out-quart",
            Self::EaseInQuint => "ease-in-quint",
            Self::EaseOutQuint => "ease-out-quint",
            Self::EaseInOutQuint => "ease-in-out-quint",
            Self::EaseInSine => "ease-in-sine",
            Self::EaseOutSine => "ease-out-sine",
            Self::EaseInOutSine => "ease-in-out-sine",
            Self::EaseInExpo => "ease-in-expo",
            Self::EaseOutExpo => "ease-out-expo",
            Self::EaseInOutExpo => "ease-in-out-expo",
            Self::EaseInCirc => "ease-in-circ",
            Self::EaseOutCirc => "ease-out-circ",
            Self::EaseInOutCirc => "ease-in-out-circ",
            Self::EaseInBack => "ease-in-back",
            Self::EaseOutBack => "ease-out-back",
            Self::EaseInOutBack => "ease-in-out-back",
            Self::EaseInElastic => "ease-in-elastic",
            Self::EaseOutElastic => "ease-out-elastic",
            Self::EaseInOutElastic => "ease-in-out-elastic",
            Self::EaseInBounce => "ease-in-bounce",
            Self::EaseOutBounce => "ease-out-bounce",
            Self::EaseInOutBounce => "ease-in-out-bounce",
        }
    }

    /// Apply the easing to a progress value, clamped to `[0, 1]`
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Step => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutQuad => in_out_power(t, 2),
            Self::EaseIn | Self::EaseInCubic => t * t * t,
            Self::EaseOut | Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut | Self::EaseInOutCubic => in_out_power(t, 3),
            Self::EaseInQuart => t.powi(4),
            Self::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Self::EaseInOutQuart => in_out_power(t, 4),
            Self::EaseInQuint => t.powi(5),
            Self::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Self::EaseInOutQuint => in_out_power(t, 5),
            Self::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Self::EaseOutSine => (t * PI / 2.0).sin(),
            Self::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::EaseInExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::EaseInOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::EaseOutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::EaseInOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Self::EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Self::EaseOutBack => {
                1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
            }
            Self::EaseInOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2)
                        + 2.0)
                        / 2.0
                }
            }
            Self::EaseInElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Self::EaseOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            Self::EaseInOutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                } else {
                    (2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin())
                        / 2.0
                        + 1.0
                }
            }
            Self::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Self::EaseOutBounce => bounce_out(t),
            Self::EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    /// Sample `steps + 1` points uniformly over `t = 0..=1`
    pub fn preview(self, steps: usize) -> Vec<f64> {
        if steps == 0 {
            return vec![self.apply(0.0)];
        }
        (0..=steps)
            .map(|i| self.apply(i as f64 / steps as f64))
            .collect()
    }
}

/// Shared in-out shape of the polynomial families
fn in_out_power(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn bounce_out(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown easing name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown easing: {0}")]
pub struct UnknownEasing(pub String);

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|easing| easing.name() == s)
            .ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.name().to_string()
    }
}

impl TryFrom<String> for Easing {
    type Error = UnknownEasing;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Names of every easing in the catalogue
pub fn easing_functions() -> Vec<&'static str> {
    Easing::ALL.iter().map(Easing::name).collect()
}

/// Sample the named easing for a curve preview, `None` for unknown names
pub fn preview_easing(name: &str, steps: usize) -> Option<Vec<f64>> {
    name.parse::<Easing>().ok().map(|easing| easing.preview(steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_catalogue_is_complete() {
        let names = easing_functions();
        assert!(names.len() >= 31);
        assert_eq!(names.len(), Easing::ALL.len());

        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());

        for name in names {
            assert_eq!(name.parse::<Easing>().unwrap().name(), name);
        }
    }

    #[test]
    fn test_endpoints_are_exact() {
        for easing in Easing::ALL {
            if easing != Easing::Step {
                assert!(easing.apply(0.0).abs() < EPS, "{easing} at 0");
            }
            assert!((easing.apply(1.0) - 1.0).abs() < EPS, "{easing} at 1");
        }
    }

    #[test]
    fn test_in_out_families_are_symmetric_at_midpoint() {
        for easing in Easing::ALL.iter().filter(|e| e.name().contains("in-out")) {
            assert!(
                (easing.apply(0.5) - 0.5).abs() < 1e-6,
                "{easing} at 0.5 = {}",
                easing.apply(0.5)
            );
        }
    }

    #[test]
    fn test_closed_forms() {
        assert!((Easing::EaseInQuad.apply(0.5) - 0.25).abs() < EPS);
        assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < EPS);
        assert!((Easing::EaseInCubic.apply(0.5) - 0.125).abs() < EPS);
        assert!((Easing::EaseInQuint.apply(0.5) - 0.03125).abs() < EPS);
        assert!((Easing::EaseInOutQuart.apply(0.25) - 8.0 * 0.25f64.powi(4)).abs() < EPS);
        assert!((Easing::EaseInSine.apply(0.5) - (1.0 - (PI / 4.0).cos())).abs() < EPS);
        assert!((Easing::EaseInExpo.apply(0.5) - 2f64.powf(-5.0)).abs() < EPS);
        assert!((Easing::EaseOutBounce.apply(0.2) - BOUNCE_N1 * 0.04).abs() < EPS);
        // Back overshoots below zero early in the segment
        assert!(Easing::EaseInBack.apply(0.2) < 0.0);
        // Elastic out overshoots above one
        assert!(Easing::EaseOutElastic.apply(0.1) > 1.0);
    }

    #[test]
    fn test_step_holds_until_end() {
        assert_eq!(Easing::Step.apply(0.0), 0.0);
        assert_eq!(Easing::Step.apply(0.999), 0.0);
        assert_eq!(Easing::Step.apply(1.0), 1.0);
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_linear_preview() {
        let samples = preview_easing("linear", 10).unwrap();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[10], 1.0);
        assert!((samples[5] - 0.5).abs() < 1e-9);
        assert!(samples.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_ease_in_out_preview() {
        let samples = preview_easing("ease-in-out", 20).unwrap();
        assert_eq!(samples.len(), 21);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[20], 1.0);
        assert!((samples[10] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_preview_edge_cases() {
        assert_eq!(preview_easing("nope", 10), None);
        assert_eq!(Easing::EaseOutQuad.preview(0), vec![0.0]);
    }

    #[test]
    fn test_serde_uses_catalogue_names() {
        let json = serde_json::to_string(&Easing::EaseInOutBack).unwrap();
        assert_eq!(json, "\"ease-in-out-back\"");
        let parsed: Easing = serde_json::from_str("\"ease-out-elastic\"").unwrap();
        assert_eq!(parsed, Easing::EaseOutElastic);
        assert!(serde_json::from_str::<Easing>("\"wobble\"").is_err());
    }
}
