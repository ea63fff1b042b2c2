//! Playback engine: the stateful realtime synthesizer.
//!
//! A [`PlaybackEngine`] owns one session: the read-only sample series, the
//! spatial points precomputed from it, and the mutable [`PlaybackState`].
//! The driver calls [`PlaybackEngine::render`] once per hardware buffer.
//!
//! Per frame, while data remains:
//! 1. look up the current sample and its spatial point,
//! 2. map the price to a frequency (clamp, then interpolate),
//! 3. take `sin(phase)` and place it with the linear pan law,
//! 4. advance the oscillator and the step clock; a full step moves the cursor.
//!
//! Everything is sized in [`PlaybackEngine::new`]; rendering never allocates,
//! locks, or logs, and sessions share no state with each other.

use log::{info, warn};
use pricetone_core::span::Span;

use crate::config::PlaybackConfig;
use crate::error::ConfigError;
use crate::graph::{render_interleaved, FrameSource, StreamStatus};
use crate::nodes::{LinearPan, SineOsc, StepClock};
use crate::series::Sample;
use crate::spatial::SpatialPoint;

/// Map a price to an oscillator frequency in Hz.
///
/// The price is clamped into `price_domain` and interpolated linearly into
/// `freq_range`; the result is non-decreasing in `price` and bounded.
#[inline]
pub fn price_to_frequency(price: f32, price_domain: Span, freq_range: Span) -> f32 {
    price_domain.map_clamped(price, freq_range)
}

/// Mutable playback position, written only by the render path.
///
/// `cursor` never decreases and `finished` never reverts.
#[derive(Copy, Clone, Debug)]
pub struct PlaybackState {
    cursor: usize,
    osc: SineOsc,
    clock: StepClock,
    finished: bool,
}

impl PlaybackState {
    fn new(samples_per_step: u32) -> Self {
        Self {
            cursor: 0,
            osc: SineOsc::new(),
            clock: StepClock::new(samples_per_step),
            finished: false,
        }
    }

    /// Index of the data point currently driving synthesis, in `[0, N]`.
    #[inline] pub fn cursor(&self) -> usize { self.cursor }

    /// Oscillator phase in radians, always in `[0, 2π)`.
    #[inline] pub fn phase(&self) -> f32 { self.osc.phase() }

    /// Samples synthesized since the cursor last moved.
    #[inline] pub fn samples_since_step(&self) -> u32 { self.clock.since_step() }

    #[inline] pub fn is_finished(&self) -> bool { self.finished }
}

/// One sonification session over a fixed series.
#[derive(Clone, Debug)]
pub struct PlaybackEngine {
    samples: Box<[Sample]>,
    points: Box<[SpatialPoint]>,
    price_domain: Span,
    freq_range: Span,
    sample_rate: f32,
    frames_per_invocation: u32,
    state: PlaybackState,
}

impl PlaybackEngine {
    /// Validate `config` and the series values, place the series, and build a session ready to render.
    ///
    /// All setup work happens here, before the first audio invocation.
    pub fn new(samples: Vec<Sample>, config: &PlaybackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some((index, s)) = samples.iter().enumerate().find(|(_, s)| !s.value.is_finite()) {
            return Err(ConfigError::NonFiniteValue { index, value: s.value });
        }

        let points = config.mapper().map(&samples);
        let samples_per_step = config.samples_per_step();

        if samples.is_empty() {
            warn!("empty series: playback completes immediately");
        }

        let engine = Self {
            samples: samples.into_boxed_slice(),
            points: points.into_boxed_slice(),
            price_domain: config.price_domain,
            freq_range: config.freq_range,
            sample_rate: config.sample_rate as f32,
            frames_per_invocation: config.frames_per_invocation,
            state: PlaybackState::new(samples_per_step),
        };
        info!(
            "session ready: {} points, {} layout, {} samples/step @ {} Hz (~{:.2}s)",
            engine.samples.len(),
            config.layout,
            samples_per_step,
            config.sample_rate,
            engine.duration_secs(),
        );
        Ok(engine)
    }

    /// Build a session straight from a plain slice of values.
    pub fn from_values(values: &[f32], config: &PlaybackConfig) -> Result<Self, ConfigError> {
        Self::new(Sample::series(values), config)
    }

    /// Fill one driver buffer of interleaved stereo frames (`out.len() / 2` frames).
    #[inline]
    pub fn render(&mut self, out: &mut [f32]) -> StreamStatus {
        render_interleaved(self, out)
    }

    #[inline]
    pub fn price_to_frequency(&self, price: f32) -> f32 {
        price_to_frequency(price, self.price_domain, self.freq_range)
    }

    #[inline] pub fn state(&self) -> &PlaybackState { &self.state }
    #[inline] pub fn samples(&self) -> &[Sample] { &self.samples }
    #[inline] pub fn points(&self) -> &[SpatialPoint] { &self.points }
    #[inline] pub fn sample_rate(&self) -> f32 { self.sample_rate }
    #[inline] pub fn samples_per_step(&self) -> u32 { self.state.clock.samples_per_step() }
    #[inline] pub fn frames_per_invocation(&self) -> u32 { self.frames_per_invocation }

    /// Total audible length in frames: `N · samples_per_step`.
    #[inline]
    pub fn total_frames(&self) -> u64 {
        self.samples.len() as u64 * u64::from(self.samples_per_step())
    }

    /// Total audible length in seconds.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.total_frames() as f64 / f64::from(self.sample_rate)
    }
}

impl FrameSource for PlaybackEngine {
    #[inline]
    fn next_frame(&mut self) -> Option<(f32, f32)> {
        if self.state.finished {
            return None;
        }
        let cursor = self.state.cursor;
        let (Some(sample), Some(point)) = (self.samples.get(cursor), self.points.get(cursor)) else {
            self.state.finished = true;
            return None;
        };

        let freq = price_to_frequency(sample.value, self.price_domain, self.freq_range);
        let s = self.state.osc.next(freq, self.sample_rate);
        let frame = LinearPan::apply(s, point.pan(), point.volume());

        if self.state.clock.tick() {
            self.state.cursor += 1;
        }
        Some(frame)
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.state.finished
    }
}
