// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animatable values and their interpolators.
//!
//! A keyframe carries exactly one [`KeyframeValue`] variant. Blending always
//! matches on the variant pair; mismatched pairs produce `None` instead of a
//! guessed result.

use serde::{Deserialize, Serialize};

/// 2D vector value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Create a 2D vector
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 3D vector value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// Create a 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Color value with optional alpha
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f64,
    /// Green
    pub g: f64,
    /// Blue
    pub b: f64,
    /// Alpha, treated as opaque when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    /// Color without alpha
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Color with alpha
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Alpha with the opaque default applied
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }
}

/// Value stored in a keyframe
///
/// Serialized in the plain shapes `number`, `{x, y}`, `{x, y, z}` and
/// `{r, g, b, a?}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyframeValue {
    /// Single number
    Scalar(f64),
    /// Color (RGB with optional alpha)
    Color(Color),
    /// 3D vector
    Vector3(Vec3),
    /// 2D vector
    Vector2(Vec2),
}

impl KeyframeValue {
    /// Variant name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Vector2(_) => "vector2",
            Self::Vector3(_) => "vector3",
            Self::Color(_) => "color",
        }
    }

    /// Whether both values are the same variant
    pub fn same_variant(&self, other: &KeyframeValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Componentwise linear blend, `None` for mismatched variants
    pub fn lerp(&self, other: &KeyframeValue, t: f64) -> Option<KeyframeValue> {
        Self::combine([self, other], |[a, b]| Interpolation::lerp(a, b, t))
    }

    /// Componentwise uniform Catmull-Rom between `p1` and `p2`
    pub fn catmull_rom(
        p0: &KeyframeValue,
        p1: &KeyframeValue,
        p2: &KeyframeValue,
        p3: &KeyframeValue,
        t: f64,
    ) -> Option<KeyframeValue> {
        Self::combine([p0, p1, p2, p3], |[a, b, c, d]| {
            Interpolation::catmull_rom(a, b, c, d, t)
        })
    }

    /// Apply `f` to the matching components of same-variant values.
    ///
    /// Colors blend alpha too; a missing alpha counts as 1, and the result
    /// only omits alpha when every input omits it.
    fn combine<const N: usize>(
        values: [&KeyframeValue; N],
        f: impl Fn([f64; N]) -> f64,
    ) -> Option<KeyframeValue> {
        let value = match values[0] {
            Self::Scalar(_) => Self::Scalar(f(gather(values, Self::as_scalar)?)),
            Self::Vector2(_) => Self::Vector2(Vec2 {
                x: f(gather(values, |v| v.as_vec2().map(|p| p.x))?),
                y: f(gather(values, |v| v.as_vec2().map(|p| p.y))?),
            }),
            Self::Vector3(_) => Self::Vector3(Vec3 {
                x: f(gather(values, |v| v.as_vec3().map(|p| p.x))?),
                y: f(gather(values, |v| v.as_vec3().map(|p| p.y))?),
                z: f(gather(values, |v| v.as_vec3().map(|p| p.z))?),
            }),
            Self::Color(_) => {
                let colors = gather_colors(values)?;
                let channel = |pick: fn(&Color) -> f64| f(colors.map(|c| pick(&c)));
                Self::Color(Color {
                    r: channel(|c| c.r),
                    g: channel(|c| c.g),
                    b: channel(|c| c.b),
                    a: if colors.iter().all(|c| c.a.is_none()) {
                        None
                    } else {
                        Some(channel(Color::alpha))
                    },
                })
            }
        };
        Some(value)
    }

    /// Get as scalar if possible
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as 2D vector if possible
    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vector2(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as 3D vector if possible
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vector3(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as color if possible
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(v) => Some(*v),
            _ => None,
        }
    }
}

fn gather<const N: usize>(
    values: [&KeyframeValue; N],
    field: impl Fn(&KeyframeValue) -> Option<f64>,
) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = field(value)?;
    }
    Some(out)
}

fn gather_colors<const N: usize>(values: [&KeyframeValue; N]) -> Option<[Color; N]> {
    let mut out = [Color::default(); N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value.as_color()?;
    }
    Some(out)
}

impl From<f64> for KeyframeValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec2> for KeyframeValue {
    fn from(value: Vec2) -> Self {
        Self::Vector2(value)
    }
}

impl From<Vec3> for KeyframeValue {
    fn from(value: Vec3) -> Self {
        Self::Vector3(value)
    }
}

impl From<Color> for KeyframeValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// Scalar curve utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }

    /// One-dimensional cubic bezier through `p0..p3`
    pub fn bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        p0 * mt3 + 3.0 * p1 * mt2 * t + 3.0 * p2 * mt * t2 + p3 * t3
    }

    /// Hermite spline between `p0` and `p1` with tangents `m0`, `m1`
    pub fn hermite(p0: f64, m0: f64, p1: f64, m1: f64, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * p0 + h10 * m0 + h01 * p1 + h11 * m1
    }

    /// Uniform Catmull-Rom segment from `p1` to `p2`
    pub fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
        Self::hermite(p1, (p2 - p0) * 0.5, p2, (p3 - p1) * 0.5, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_scalar_lerp() {
        let v = KeyframeValue::Scalar(0.0)
            .lerp(&KeyframeValue::Scalar(10.0), 0.25)
            .unwrap();
        assert_eq!(v, KeyframeValue::Scalar(2.5));
    }

    #[test]
    fn test_vector_lerp_is_componentwise() {
        let a = KeyframeValue::from(Vec2::new(0.0, 0.0));
        let b = KeyframeValue::from(Vec2::new(100.0, 200.0));
        assert_eq!(a.lerp(&b, 0.5), Some(Vec2::new(50.0, 100.0).into()));

        let a = KeyframeValue::from(Vec3::new(1.0, 2.0, 3.0));
        let b = KeyframeValue::from(Vec3::new(3.0, 6.0, 9.0));
        assert_eq!(a.lerp(&b, 0.5), Some(Vec3::new(2.0, 4.0, 6.0).into()));
    }

    #[test]
    fn test_color_lerp_defaults_missing_alpha() {
        let a = KeyframeValue::from(Color::rgb(0.0, 0.0, 0.0));
        let b = KeyframeValue::from(Color::rgb(255.0, 128.0, 64.0));
        let mid = a.lerp(&b, 0.5).unwrap().as_color().unwrap();
        assert!(approx(mid.r, 127.5));
        assert!(approx(mid.g, 64.0));
        assert!(approx(mid.b, 32.0));
        assert_eq!(mid.a, None);

        let c = KeyframeValue::from(Color::rgba(0.0, 0.0, 0.0, 0.0));
        let mid = c.lerp(&b, 0.5).unwrap().as_color().unwrap();
        assert_eq!(mid.a, Some(0.5));
    }

    #[test]
    fn test_mismatched_variants_do_not_blend() {
        let a = KeyframeValue::Scalar(1.0);
        let b = KeyframeValue::from(Vec2::new(1.0, 2.0));
        assert!(!a.same_variant(&b));
        assert_eq!(a.lerp(&b, 0.5), None);
        assert_eq!(b.lerp(&a, 0.5), None);
    }

    #[test]
    fn test_catmull_rom_hits_segment_ends() {
        let p = [0.0, 1.0, 3.0, 4.0].map(KeyframeValue::Scalar);
        let start = KeyframeValue::catmull_rom(&p[0], &p[1], &p[2], &p[3], 0.0).unwrap();
        let end = KeyframeValue::catmull_rom(&p[0], &p[1], &p[2], &p[3], 1.0).unwrap();
        assert!(approx(start.as_scalar().unwrap(), 1.0));
        assert!(approx(end.as_scalar().unwrap(), 3.0));

        // Collinear, evenly spaced points reduce to a straight line
        let q = [0.0, 1.0, 2.0, 3.0].map(KeyframeValue::Scalar);
        let mid = KeyframeValue::catmull_rom(&q[0], &q[1], &q[2], &q[3], 0.5).unwrap();
        assert!(approx(mid.as_scalar().unwrap(), 1.5));
    }

    #[test]
    fn test_bezier_endpoints() {
        assert!(approx(Interpolation::bezier(0.0, 0.42, 0.58, 1.0, 0.0), 0.0));
        assert!(approx(Interpolation::bezier(0.0, 0.42, 0.58, 1.0, 1.0), 1.0));
        assert!(approx(Interpolation::bezier(0.0, 0.42, 0.58, 1.0, 0.5), 0.5));
    }

    #[test]
    fn test_value_json_shapes() {
        let cases = [
            (KeyframeValue::Scalar(0.5), serde_json::json!(0.5)),
            (Vec2::new(1.0, 2.0).into(), serde_json::json!({"x": 1.0, "y": 2.0})),
            (
                Vec3::new(1.0, 2.0, 3.0).into(),
                serde_json::json!({"x": 1.0, "y": 2.0, "z": 3.0}),
            ),
            (
                Color::rgb(1.0, 2.0, 3.0).into(),
                serde_json::json!({"r": 1.0, "g": 2.0, "b": 3.0}),
            ),
            (
                Color::rgba(1.0, 2.0, 3.0, 0.5).into(),
                serde_json::json!({"r": 1.0, "g": 2.0, "b": 3.0, "a": 0.5}),
            ),
        ];

        for (value, json) in cases {
            assert_eq!(serde_json::to_value(value).unwrap(), json);
            let parsed: KeyframeValue = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, value);
        }
    }
}
