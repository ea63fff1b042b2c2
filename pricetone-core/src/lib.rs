#![cfg_attr(not(feature = "std"), no_std)]
//! Pricetone Core — no_std-ready numeric helpers shared by the sonification engine.
//!
//! Features
//! - `std`    : (default) use the Rust standard library
//! - `no-std` : build with `#![no_std]` and use the `libm` math backend
//! - `serde`  : derive `Serialize`/`Deserialize` for [`Span`]
//!
//! Modules
//! - [`dsp`]  : math backend, constants, clamp/lerp/angle helpers
//! - [`span`] : closed value intervals and the clamp-then-interpolate mapping law
//!
//! Design
//! - No heap allocations; every helper is a pure function or a `Copy` value
//! - Safe to call from a real-time audio callback

pub mod dsp;
pub mod span;

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::dsp::{clamp, cos, deg_to_rad, lerp, sin, TAU};
    pub use crate::span::Span;
}

#[cfg(test)]
mod smoke {

    #[test]
    fn prelude_exists() {
        use crate::prelude::*;
        let price = Span::new(10.0, 100.0);
        let freq = Span::new(200.0, 1000.0);
        assert!(price.is_valid());
        let _ = price.map_clamped(55.0, freq);
        let _ = clamp(sin(TAU * 0.25), -1.0, 1.0);
    }
}
