//! Pricetone Engine — price-series sonification for realtime audio hosts.
//!
//! Crate layout:
//! - [`series`]   : input `Sample`s
//! - [`spatial`]  : `SpatialMapper`, `Layout` policies and `SpatialPoint`s
//! - [`config`]   : `PlaybackConfig` and setup-time validation
//! - [`error`]    : `ConfigError`
//! - [`nodes`]    : oscillator, pan law and step clock
//! - [`graph`]    : `FrameSource` trait and the interleaved render loop
//! - [`playback`] : `PlaybackEngine`, the per-buffer synthesizer
//!
//! The engine deliberately avoids heap allocations in the audio thread.
//! The series and its spatial points are built once, before streaming, and
//! only read afterwards; each `PlaybackEngine` owns its own state.

pub mod config;
pub mod error;
pub mod graph;
pub mod nodes;
pub mod playback;
pub mod series;
pub mod spatial;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use config::PlaybackConfig;
pub use error::ConfigError;
pub use graph::{render_interleaved, FrameSource, StreamStatus};
pub use nodes::{LinearPan, SineOsc, StepClock};
pub use playback::{price_to_frequency, PlaybackEngine, PlaybackState};
pub use pricetone_core::span::Span;
pub use series::Sample;
pub use spatial::{Layout, SpatialMapper, SpatialPoint};
