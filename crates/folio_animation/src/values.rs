//! Animatable value types

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for folio_core::Style {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        folio_core::Style {
            opacity: Interpolate::lerp(&self.opacity, &other.opacity, t),
            x: Interpolate::lerp(&self.x, &other.x, t),
            y: Interpolate::lerp(&self.y, &other.y, t),
            scale: Interpolate::lerp(&self.scale, &other.scale, t),
            rotate: Interpolate::lerp(&self.rotate, &other.rotate, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.opacity.approx_eq(&other.opacity, epsilon)
            && self.x.approx_eq(&other.x, epsilon)
            && self.y.approx_eq(&other.y, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
            && self.rotate.approx_eq(&other.rotate, epsilon)
    }
}
