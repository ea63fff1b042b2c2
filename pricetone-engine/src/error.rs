//! Setup-time error types.

use thiserror::Error;

/// Errors rejected while validating a [`PlaybackConfig`](crate::config::PlaybackConfig).
///
/// These are only ever produced before streaming starts; the render path has
/// no failure modes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate must be positive.
    #[error("invalid sample rate {0}: must be > 0")]
    InvalidSampleRate(u32),

    /// Each driver invocation must request at least one frame.
    #[error("invalid frames per invocation {0}: must be > 0")]
    InvalidFramesPerInvocation(u32),

    /// Step duration must be a positive, finite number of seconds.
    #[error("invalid step duration {0}s: must be finite and > 0")]
    InvalidStepDuration(f32),

    /// The step duration rounds to zero audio samples at this sample rate.
    #[error("step duration {step_secs}s is shorter than one sample at {sample_rate} Hz")]
    StepTooShort { step_secs: f32, sample_rate: u32 },

    /// Price domain is empty, inverted, or not finite.
    #[error("degenerate price domain [{min}, {max}]: need finite min < max")]
    DegeneratePriceDomain { min: f32, max: f32 },

    /// Frequency range is empty, inverted, or not finite.
    #[error("degenerate frequency range [{min}, {max}] Hz: need finite min < max")]
    DegenerateFrequencyRange { min: f32, max: f32 },

    /// Frequencies cannot be negative.
    #[error("negative minimum frequency {0} Hz")]
    NegativeFrequency(f32),

    /// Mapped frequencies must stay below the Nyquist limit.
    #[error("maximum frequency {max_hz} Hz is at or above Nyquist ({nyquist_hz} Hz)")]
    AboveNyquist { max_hz: f32, nyquist_hz: f32 },

    /// Spatial value domain is empty, inverted, or not finite.
    #[error("degenerate value domain [{min}, {max}]: need finite min < max")]
    DegenerateValueDomain { min: f32, max: f32 },

    /// Layout radius must be a positive, finite number.
    #[error("invalid layout radius {0}: must be finite and > 0")]
    InvalidRadius(f32),

    /// Angular field of view must lie in `(0, 360]` degrees.
    #[error("invalid field of view {0} degrees: must be in (0, 360]")]
    InvalidFieldOfView(f32),

    /// A series value is NaN or infinite.
    #[error("sample {index} has non-finite value {value}")]
    NonFiniteValue { index: usize, value: f32 },

    /// A layout name that is not one of `linear`, `full-circle`, `angular:<deg>`.
    #[error("unknown layout `{0}` (expected linear, full-circle or angular:<degrees>)")]
    UnknownLayout(String),
}
