//! Generic math helpers shared by the mapper and the playback engine.
//!
//! Design goals:
//! - `no_std` ready (guarded by the crate feature `no-std`)
//! - Math backend selection that works in both `std` and `no_std` contexts
//! - Side-effect free helpers that are easy to test
//!
//! Conventions:
//! - All functions are `#[inline]`; they sit on the per-frame path.
//! - Argument and return domains are documented per function.

use core::f32::consts::PI;

use cfg_if::cfg_if;

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // libm (C math) in no_std
    if #[cfg(feature = "no-std")] {
        #[inline] fn m_sin(x: f32) -> f32 { libm::sinf(x) }
        #[inline] fn m_cos(x: f32) -> f32 { libm::cosf(x) }
        #[inline] fn m_round(x: f32) -> f32 { libm::roundf(x) }
    // std backend
    } else {
        #[inline] fn m_sin(x: f32) -> f32 { x.sin() }
        #[inline] fn m_cos(x: f32) -> f32 { x.cos() }
        #[inline] fn m_round(x: f32) -> f32 { x.round() }
    }
}

// --------------------------------- Constants -------------------------------------

/// 2π, one full oscillator cycle in radians.
pub const TAU: f32 = 2.0 * PI;

// --------------------------------- Utilities -------------------------------------

/// Clamp `x` into `[lo, hi]`. Expects `lo <= hi`. NaN maps to `lo`.
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x >= lo { if x > hi { hi } else { x } } else { lo }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * (PI / 180.0)
}

/// Sine through the selected math backend.
#[inline]
pub fn sin(x: f32) -> f32 {
    m_sin(x)
}

/// Cosine through the selected math backend.
#[inline]
pub fn cos(x: f32) -> f32 {
    m_cos(x)
}

/// Round half away from zero through the selected math backend.
#[inline]
pub fn round(x: f32) -> f32 {
    m_round(x)
}

// --------------------------------- Tests (std only) ------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(-3.0, -1.0, 1.0), -1.0);
        assert_eq!(clamp(3.0, -1.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, -1.0, 1.0), 0.25);
    }

    #[test]
    fn clamp_sends_nan_to_lower_bound() {
        assert_eq!(clamp(f32::NAN, -1.0, 1.0), -1.0);
        assert_eq!(clamp(f32::INFINITY, -1.0, 1.0), 1.0);
        assert_eq!(clamp(f32::NEG_INFINITY, -1.0, 1.0), -1.0);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(200.0, 1000.0, 0.0), 200.0);
        assert_eq!(lerp(200.0, 1000.0, 1.0), 1000.0);
        assert_eq!(lerp(200.0, 1000.0, 0.5), 600.0);
    }

    #[test]
    fn deg_to_rad_quarter_turn() {
        assert!((deg_to_rad(90.0) - PI * 0.5).abs() < 1e-6);
        assert!((deg_to_rad(360.0) - TAU).abs() < 1e-6);
    }

    #[test]
    fn backend_trig_is_sane() {
        assert!(sin(0.0).abs() < 1e-7);
        assert!((sin(PI * 0.5) - 1.0).abs() < 1e-6);
        assert!((cos(0.0) - 1.0).abs() < 1e-7);
        assert_eq!(round(22_049.6), 22_050.0);
        assert_eq!(round(11_025.0), 11_025.0);
    }
}
