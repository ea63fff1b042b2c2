//! Closed numeric intervals and the clamp-then-interpolate mapping law.
//!
//! Both the price → frequency mapping and the value → loudness-axis
//! normalization are the same operation with different endpoints:
//! clamp the input into a source [`Span`], then interpolate linearly into
//! a target [`Span`]. Keeping it in one place keeps the two paths identical.

use crate::dsp::{clamp, lerp};

/// A closed interval `[min, max]`.
///
/// A span is only meaningful when [`Span::is_valid`] holds; callers validate
/// once at setup time and the per-frame path assumes validity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    /// The bipolar unit interval `[-1, 1]`.
    pub const BIPOLAR: Span = Span { min: -1.0, max: 1.0 };

    /// The unipolar unit interval `[0, 1]`.
    pub const UNIT: Span = Span { min: 0.0, max: 1.0 };

    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Both endpoints finite, strictly ordered, and a finite width apart.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max && self.width().is_finite()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        clamp(x, self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }

    /// Clamp `x` into the span and return its position in `[0, 1]`.
    #[inline]
    pub fn normalize(&self, x: f32) -> f32 {
        (self.clamp(x) - self.min) / self.width()
    }

    /// Clamp `x` into `self`, then interpolate linearly into `to`.
    ///
    /// Monotonically non-decreasing in `x` and bounded to `[to.min, to.max]`.
    #[inline]
    pub fn map_clamped(&self, x: f32, to: Span) -> f32 {
        clamp(lerp(to.min, to.max, self.normalize(x)), to.min, to.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: Span = Span::new(10.0, 100.0);
    const FREQ: Span = Span::new(200.0, 1000.0);

    #[test]
    fn validity() {
        assert!(PRICE.is_valid());
        assert!(!Span::new(5.0, 5.0).is_valid());
        assert!(!Span::new(6.0, 5.0).is_valid());
        assert!(!Span::new(f32::NAN, 5.0).is_valid());
        assert!(!Span::new(0.0, f32::INFINITY).is_valid());
        // Finite endpoints whose distance overflows.
        assert!(!Span::new(-3.0e38, 3.0e38).is_valid());
        assert!(Span::new(-1.0e38, 1.0e38).is_valid());
    }

    #[test]
    fn nan_input_maps_to_target_minimum() {
        assert_eq!(PRICE.map_clamped(f32::NAN, FREQ), 200.0);
        assert_eq!(PRICE.normalize(f32::NAN), 0.0);
    }

    #[test]
    fn midpoint_maps_to_midpoint() {
        assert_eq!(PRICE.map_clamped(55.0, FREQ), 600.0);
        assert_eq!(PRICE.map_clamped(55.0, Span::BIPOLAR), 0.0);
    }

    #[test]
    fn out_of_domain_clamps_to_boundary() {
        assert_eq!(PRICE.map_clamped(-1_000.0, FREQ), 200.0);
        assert_eq!(PRICE.map_clamped(9.999, FREQ), PRICE.map_clamped(10.0, FREQ));
        assert_eq!(PRICE.map_clamped(1.0e9, FREQ), 1000.0);
        assert_eq!(PRICE.map_clamped(100.001, FREQ), PRICE.map_clamped(100.0, FREQ));
    }

    #[test]
    fn mapping_is_monotone_and_bounded() {
        let mut prev = f32::NEG_INFINITY;
        let mut p = -50.0;
        while p <= 150.0 {
            let f = PRICE.map_clamped(p, FREQ);
            assert!(f >= prev, "p={p} f={f} prev={prev}");
            assert!(FREQ.contains(f), "p={p} f={f}");
            prev = f;
            p += 0.37;
        }
    }

    #[test]
    fn normalize_is_unit_bounded() {
        assert_eq!(PRICE.normalize(10.0), 0.0);
        assert_eq!(PRICE.normalize(100.0), 1.0);
        assert!(Span::UNIT.contains(PRICE.normalize(42.0)));
    }
}
