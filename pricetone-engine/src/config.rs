//! Playback configuration and its setup-time validation.
//!
//! Every field has a default, so a partial TOML document (or no document at
//! all) yields a usable config. [`PlaybackConfig::validate`] must pass before
//! a [`PlaybackEngine`](crate::playback::PlaybackEngine) is built; nothing on
//! the render path re-checks these invariants.

use pricetone_core::dsp::round;
use pricetone_core::span::Span;

use crate::error::ConfigError;
use crate::spatial::{Layout, SpatialMapper};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_FRAMES_PER_INVOCATION: u32 = 256;
pub const DEFAULT_STEP_SECS: f32 = 0.25;
pub const DEFAULT_PRICE_DOMAIN: Span = Span::new(10.0, 100.0);
pub const DEFAULT_FREQ_RANGE: Span = Span::new(200.0, 1000.0);

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PlaybackConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Frames the driver requests per callback.
    pub frames_per_invocation: u32,
    /// Horizontal placement policy for the spatial mapper.
    pub layout: Layout,
    /// Prices are clamped into this domain before the frequency mapping.
    pub price_domain: Span,
    /// Output frequency range in Hz.
    pub freq_range: Span,
    /// Real time spent on each data point, in seconds.
    pub step_duration_secs: f32,
    /// Values are clamped into this domain before the loudness mapping.
    pub value_domain: Span,
    /// Radius used by the angular layouts.
    pub radius: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            frames_per_invocation: DEFAULT_FRAMES_PER_INVOCATION,
            layout: Layout::Linear,
            price_domain: DEFAULT_PRICE_DOMAIN,
            freq_range: DEFAULT_FREQ_RANGE,
            step_duration_secs: DEFAULT_STEP_SECS,
            value_domain: DEFAULT_PRICE_DOMAIN,
            radius: 1.0,
        }
    }
}

impl PlaybackConfig {
    /// Audio samples synthesized per data point: `round(sample_rate * step)`.
    #[inline]
    pub fn samples_per_step(&self) -> u32 {
        let n = round(self.sample_rate as f32 * self.step_duration_secs);
        if n.is_finite() && n > 0.0 { n as u32 } else { 0 }
    }

    #[inline]
    pub fn nyquist_hz(&self) -> f32 {
        self.sample_rate as f32 * 0.5
    }

    /// The spatial mapper described by this config.
    #[inline]
    pub fn mapper(&self) -> SpatialMapper {
        SpatialMapper::new(self.layout, self.value_domain, self.radius)
    }

    /// Reject degenerate configurations before streaming starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.frames_per_invocation == 0 {
            return Err(ConfigError::InvalidFramesPerInvocation(self.frames_per_invocation));
        }

        let step = self.step_duration_secs;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidStepDuration(step));
        }
        if self.samples_per_step() == 0 {
            return Err(ConfigError::StepTooShort { step_secs: step, sample_rate: self.sample_rate });
        }

        if !self.price_domain.is_valid() {
            let Span { min, max } = self.price_domain;
            return Err(ConfigError::DegeneratePriceDomain { min, max });
        }

        if !self.freq_range.is_valid() {
            let Span { min, max } = self.freq_range;
            return Err(ConfigError::DegenerateFrequencyRange { min, max });
        }
        if self.freq_range.min < 0.0 {
            return Err(ConfigError::NegativeFrequency(self.freq_range.min));
        }
        // Keeps the per-frame phase increment below π, which the oscillator's
        // single-subtraction wrap relies on.
        let nyquist_hz = self.nyquist_hz();
        if self.freq_range.max >= nyquist_hz {
            return Err(ConfigError::AboveNyquist { max_hz: self.freq_range.max, nyquist_hz });
        }

        if !self.value_domain.is_valid() {
            let Span { min, max } = self.value_domain;
            return Err(ConfigError::DegenerateValueDomain { min, max });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if let Layout::Angular { fov_degrees } = self.layout {
            if !(fov_degrees > 0.0 && fov_degrees <= 360.0) {
                return Err(ConfigError::InvalidFieldOfView(fov_degrees));
            }
        }
        Ok(())
    }
}
