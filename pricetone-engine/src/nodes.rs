//! Building blocks (nodes) for the playback voice.
//!
//! These are zero-allocation, per-sample components designed for realtime use.
//! Everything here is `Copy` and cheap to move; no locks, no heap.
//!
//! Contents:
//! - `SineOsc`   : sine oscillator with a phase accumulator in `[0, 2π)`
//! - `LinearPan` : linear stereo pan law scaled by a loudness coefficient
//! - `StepClock` : counts audio samples and reports data-step boundaries
//!
//! Notes:
//! - Frequency is **Hz**; methods expect the current **sample rate** when stepping.

use pricetone_core::dsp::{sin, TAU};

/// Free-running sine oscillator.
///
/// The phase is kept in radians and renormalized into `[0, 2π)` after every
/// step with a single subtraction. That is exact as long as the per-sample
/// increment stays below one cycle, which config validation guarantees by
/// capping frequencies below Nyquist.
#[derive(Copy, Clone, Debug, Default)]
pub struct SineOsc {
    phase: f32, // radians, [0, 2π)
}

impl SineOsc {
    #[inline] pub fn new() -> Self { Self { phase: 0.0 } }

    /// Current phase in radians.
    #[inline] pub fn phase(&self) -> f32 { self.phase }

    /// Return `sin(phase)`, then advance by `2π·freq/sr`.
    #[inline]
    pub fn next(&mut self, freq_hz: f32, sr: f32) -> f32 {
        let s = sin(self.phase);
        self.phase += TAU * freq_hz / sr;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        s
    }
}

/// Linear pan law (not constant-power).
#[derive(Copy, Clone, Debug)]
pub struct LinearPan;
impl LinearPan {
    /// Place mono sample `s` at `pan` in `[-1, 1]` with loudness `vol` in `[0, 1]`,
    /// returning `(left, right)`. Centre pan at full volume halves each side.
    #[inline]
    pub fn apply(s: f32, pan: f32, vol: f32) -> (f32, f32) {
        (s * (1.0 - pan) * 0.5 * vol, s * (1.0 + pan) * 0.5 * vol)
    }
}

/// Counts synthesized samples; every `samples_per_step` ticks is one data step.
///
/// Decouples how long each data point sounds from the driver's buffer size.
#[derive(Copy, Clone, Debug)]
pub struct StepClock {
    samples_per_step: u32,
    since_step: u32, // [0, samples_per_step)
}

impl StepClock {
    #[inline]
    pub fn new(samples_per_step: u32) -> Self {
        Self { samples_per_step: samples_per_step.max(1), since_step: 0 }
    }

    #[inline] pub fn samples_per_step(&self) -> u32 { self.samples_per_step }
    #[inline] pub fn since_step(&self) -> u32 { self.since_step }

    /// Count one sample. Returns `true` exactly when the counter reaches
    /// `samples_per_step`, after which it restarts from zero.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.since_step += 1;
        if self.since_step >= self.samples_per_step {
            self.since_step = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc_starts_at_zero_phase() {
        let mut osc = SineOsc::new();
        assert_eq!(osc.next(440.0, 44_100.0), 0.0);
        assert!(osc.phase() > 0.0);
    }

    #[test]
    fn osc_phase_stays_wrapped_over_long_runs() {
        let mut osc = SineOsc::new();
        for i in 0..10_000_000u32 {
            // Sweep the whole default frequency range.
            let f = 200.0 + (i % 801) as f32;
            let s = osc.next(f, 44_100.0);
            assert!((-1.0..=1.0).contains(&s));
            let p = osc.phase();
            assert!((0.0..TAU).contains(&p), "frame {i}: phase {p}");
        }
    }

    #[test]
    fn osc_completes_cycles_at_expected_rate() {
        // 441 Hz at 44.1 kHz is exactly 100 samples per cycle.
        let mut osc = SineOsc::new();
        let mut wraps = 0;
        let mut prev = osc.phase();
        for _ in 0..44_100 {
            osc.next(441.0, 44_100.0);
            if osc.phase() < prev {
                wraps += 1;
            }
            prev = osc.phase();
        }
        assert!((440..=441).contains(&wraps), "wraps={wraps}");
    }

    #[test]
    fn centre_pan_splits_evenly() {
        assert_eq!(LinearPan::apply(1.0, 0.0, 1.0), (0.5, 0.5));
        assert_eq!(LinearPan::apply(1.0, -1.0, 1.0), (1.0, 0.0));
        assert_eq!(LinearPan::apply(1.0, 1.0, 1.0), (0.0, 1.0));
        assert_eq!(LinearPan::apply(1.0, 0.0, 0.0), (0.0, 0.0));
        let (l, r) = LinearPan::apply(-1.0, 0.5, 0.5);
        assert!((l + 0.125).abs() < 1e-7 && (r + 0.375).abs() < 1e-7);
    }

    #[test]
    fn step_clock_fires_on_exact_boundary() {
        let mut clock = StepClock::new(4);
        let fired: Vec<bool> = (0..9).map(|_| clock.tick()).collect();
        assert_eq!(fired, [false, false, false, true, false, false, false, true, false]);
        assert_eq!(clock.since_step(), 1);
    }

    #[test]
    fn step_clock_never_zero_length() {
        let mut clock = StepClock::new(0);
        assert_eq!(clock.samples_per_step(), 1);
        assert!(clock.tick());
        assert!(clock.tick());
    }
}
