//! Easing curves
//!
//! Every curve maps progress in `[0, 1]` to eased progress. Inputs outside the
//! range are clamped first. The `powerN` family follows the usual naming:
//! `power1` is quadratic, `power2` cubic, `power3` quartic.

use crate::error::{AnimationError, Result};

/// An easing curve
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    /// No easing
    #[default]
    Linear,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    /// Exponential ease-out that reaches 1.0 exactly at t = 1
    ExpoOut,
    /// Exponential smooth-scroll curve: `min(1, 1.001 - 2^(-10t))`.
    ///
    /// Slightly above zero at t = 0 so a freshly started scroll always moves.
    SmoothScroll,
    /// Caller-provided curve
    Custom(fn(f32) -> f32),
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Custom(a), Easing::Custom(b)) => *a as usize == *b as usize,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Easing {
    /// Apply the curve to `t`
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::Power1In => ease_in(t, 2),
            Easing::Power1Out => ease_out(t, 2),
            Easing::Power1InOut => ease_in_out(t, 2),
            Easing::Power2In => ease_in(t, 3),
            Easing::Power2Out => ease_out(t, 3),
            Easing::Power2InOut => ease_in_out(t, 3),
            Easing::Power3In => ease_in(t, 4),
            Easing::Power3Out => ease_out(t, 4),
            Easing::Power3InOut => ease_in_out(t, 4),
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::SmoothScroll => (1.001 - 2f32.powf(-10.0 * t)).min(1.0),
            Easing::Custom(f) => f(t),
        }
    }

    /// Parse a curve name such as `"power2.out"`, `"none"` or `"expo.out"`
    pub fn from_name(name: &str) -> Result<Self> {
        let easing = match name.trim().to_ascii_lowercase().as_str() {
            "none" | "linear" => Easing::Linear,
            "power1.in" => Easing::Power1In,
            "power1" | "power1.out" => Easing::Power1Out,
            "power1.inout" => Easing::Power1InOut,
            "power2.in" => Easing::Power2In,
            "power2" | "power2.out" => Easing::Power2Out,
            "power2.inout" => Easing::Power2InOut,
            "power3.in" => Easing::Power3In,
            "power3" | "power3.out" => Easing::Power3Out,
            "power3.inout" => Easing::Power3InOut,
            "expo" | "expo.out" => Easing::ExpoOut,
            "smooth" | "smooth-scroll" => Easing::SmoothScroll,
            other => return Err(AnimationError::UnknownEasing(other.to_string())),
        };
        Ok(easing)
    }
}

fn ease_in(t: f32, power: i32) -> f32 {
    t.powi(power)
}

fn ease_out(t: f32, power: i32) -> f32 {
    1.0 - (1.0 - t).powi(power)
}

fn ease_in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        ease_in(t * 2.0, power) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0, power) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 11] = [
        Easing::Linear,
        Easing::Power1In,
        Easing::Power1Out,
        Easing::Power1InOut,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::Power2InOut,
        Easing::Power3In,
        Easing::Power3Out,
        Easing::Power3InOut,
        Easing::ExpoOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in CURVES {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in CURVES {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{:?} decreased at {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_smooth_scroll_curve() {
        let e = Easing::SmoothScroll;
        assert!((e.apply(0.0) - 0.001).abs() < 1e-6);
        assert_eq!(e.apply(1.0), 1.0);
        assert!(e.apply(0.5) > 0.9);
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::Power2Out.apply(-1.0), 0.0);
        assert_eq!(Easing::Power2Out.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Easing::from_name("power2.out").unwrap(), Easing::Power2Out);
        assert_eq!(Easing::from_name("none").unwrap(), Easing::Linear);
        assert!(Easing::from_name("bounce.wobble").is_err());
    }
}
