//! C ABI wrapper for the pricetone playback engine.
//!
//! Lets a host that owns the audio callback (PortAudio, JACK, a game engine)
//! drive a session one buffer at a time.
//!
//! ABI notes
//! - All functions are `extern "C"` and `#[no_mangle]`.
//! - Opaque handle type: `PricetoneEngine` (heap-allocated; you own/delete it).
//! - Render path writes interleaved stereo: frame `i` at `out[2i]`, `out[2i+1]`.
//!
//! Threading
//! - Create the engine before starting the stream; afterwards call
//!   `pricetone_render_interleaved_f32` from the audio thread only.

use log::error;
use pricetone_engine::{Layout, PlaybackConfig, PlaybackEngine, Span, StreamStatus};

pub const PRICETONE_LAYOUT_LINEAR: u32 = 0;
pub const PRICETONE_LAYOUT_ANGULAR: u32 = 1;
pub const PRICETONE_LAYOUT_FULL_CIRCLE: u32 = 2;

pub const PRICETONE_CONTINUE: i32 = 0;
pub const PRICETONE_COMPLETE: i32 = 1;
pub const PRICETONE_ERROR: i32 = -1;

/// Flat, C-compatible mirror of [`PlaybackConfig`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PricetoneConfig {
    pub sample_rate: u32,
    pub frames_per_invocation: u32,
    pub layout: u32,
    pub fov_degrees: f32,
    pub price_min: f32,
    pub price_max: f32,
    pub freq_min: f32,
    pub freq_max: f32,
    pub step_duration_secs: f32,
    pub value_min: f32,
    pub value_max: f32,
    pub radius: f32,
}

impl From<&PlaybackConfig> for PricetoneConfig {
    fn from(c: &PlaybackConfig) -> Self {
        let (layout, fov_degrees) = match c.layout {
            Layout::Linear => (PRICETONE_LAYOUT_LINEAR, 0.0),
            Layout::Angular { fov_degrees } => (PRICETONE_LAYOUT_ANGULAR, fov_degrees),
            Layout::FullCircle => (PRICETONE_LAYOUT_FULL_CIRCLE, 0.0),
        };
        Self {
            sample_rate: c.sample_rate,
            frames_per_invocation: c.frames_per_invocation,
            layout,
            fov_degrees,
            price_min: c.price_domain.min,
            price_max: c.price_domain.max,
            freq_min: c.freq_range.min,
            freq_max: c.freq_range.max,
            step_duration_secs: c.step_duration_secs,
            value_min: c.value_domain.min,
            value_max: c.value_domain.max,
            radius: c.radius,
        }
    }
}

impl PricetoneConfig {
    /// `None` for an unknown layout tag; everything else is checked by the engine.
    fn to_engine(&self) -> Option<PlaybackConfig> {
        let layout = match self.layout {
            PRICETONE_LAYOUT_LINEAR => Layout::Linear,
            PRICETONE_LAYOUT_ANGULAR => Layout::Angular { fov_degrees: self.fov_degrees },
            PRICETONE_LAYOUT_FULL_CIRCLE => Layout::FullCircle,
            _ => return None,
        };
        Some(PlaybackConfig {
            sample_rate: self.sample_rate,
            frames_per_invocation: self.frames_per_invocation,
            layout,
            price_domain: Span::new(self.price_min, self.price_max),
            freq_range: Span::new(self.freq_min, self.freq_max),
            step_duration_secs: self.step_duration_secs,
            value_domain: Span::new(self.value_min, self.value_max),
            radius: self.radius,
        })
    }
}

/// Opaque engine wrapper we hand to C.
pub struct PricetoneEngine {
    inner: PlaybackEngine,
}

// --- Creation / destruction -------------------------------------------------------

/// Defaults: 44.1 kHz, 256 frames, linear layout, prices 10..100 → 200..1000 Hz,
/// quarter-second steps.
#[no_mangle]
pub extern "C" fn pricetone_default_config() -> PricetoneConfig {
    PricetoneConfig::from(&PlaybackConfig::default())
}

/// Create a session over a copy of `values[0..len]`.
/// `config` may be null for defaults. Returns null if the config is rejected.
#[no_mangle]
pub extern "C" fn pricetone_create(
    values: *const f32,
    len: usize,
    config: *const PricetoneConfig,
) -> *mut PricetoneEngine {
    if values.is_null() && len > 0 {
        return std::ptr::null_mut();
    }
    let values: &[f32] = if len == 0 { &[] } else { unsafe { std::slice::from_raw_parts(values, len) } };

    let cfg = if config.is_null() {
        PlaybackConfig::default()
    } else {
        let raw = unsafe { &*config };
        match raw.to_engine() {
            Some(cfg) => cfg,
            None => {
                error!("pricetone_create: unknown layout tag {}", raw.layout);
                return std::ptr::null_mut();
            }
        }
    };

    match PlaybackEngine::from_values(values, &cfg) {
        Ok(inner) => Box::into_raw(Box::new(PricetoneEngine { inner })),
        Err(e) => {
            error!("pricetone_create: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Destroy an engine previously returned by `pricetone_create`.
#[no_mangle]
pub extern "C" fn pricetone_destroy(engine: *mut PricetoneEngine) {
    if !engine.is_null() {
        unsafe { drop(Box::from_raw(engine)); }
    }
}

// --- Rendering -------------------------------------------------------------------

/// Render `frames` interleaved stereo frames (`2 * frames` floats) into `out`.
///
/// Returns `PRICETONE_COMPLETE` once the series is exhausted (the buffer is
/// then silent from that point on), `PRICETONE_CONTINUE` otherwise, and
/// `PRICETONE_ERROR` for null pointers.
#[no_mangle]
pub extern "C" fn pricetone_render_interleaved_f32(
    engine: *mut PricetoneEngine,
    out: *mut f32,
    frames: u32,
) -> i32 {
    if engine.is_null() {
        return PRICETONE_ERROR;
    }
    let e = unsafe { &mut *engine };
    if frames == 0 {
        return status_code(e.inner.render(&mut []));
    }
    if out.is_null() {
        return PRICETONE_ERROR;
    }
    let out = unsafe { std::slice::from_raw_parts_mut(out, 2 * frames as usize) };
    status_code(e.inner.render(out))
}

fn status_code(status: StreamStatus) -> i32 {
    match status {
        StreamStatus::Continue => PRICETONE_CONTINUE,
        StreamStatus::Complete => PRICETONE_COMPLETE,
    }
}

// --- Inspection ------------------------------------------------------------------

/// Index of the data point currently sounding (equals the series length once done).
#[no_mangle]
pub extern "C" fn pricetone_cursor(engine: *const PricetoneEngine) -> usize {
    if engine.is_null() { return 0; }
    let e = unsafe { &*engine };
    e.inner.state().cursor()
}

#[no_mangle]
pub extern "C" fn pricetone_is_finished(engine: *const PricetoneEngine) -> bool {
    if engine.is_null() { return true; }
    let e = unsafe { &*engine };
    e.inner.state().is_finished()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn default_config_round_trips_into_engine_config() {
        let c = pricetone_default_config();
        assert_eq!(c.layout, PRICETONE_LAYOUT_LINEAR);
        assert_eq!(c.to_engine(), Some(PlaybackConfig::default()));
    }

    #[test]
    fn plays_through_to_completion() {
        let values = [20.0f32, 80.0];
        let mut cfg = pricetone_default_config();
        cfg.step_duration_secs = 0.01;
        cfg.layout = PRICETONE_LAYOUT_ANGULAR;
        cfg.fov_degrees = 90.0;

        let e = pricetone_create(values.as_ptr(), values.len(), &cfg);
        assert!(!e.is_null());

        let mut out = vec![0.0f32; 2 * 256];
        let mut status = PRICETONE_CONTINUE;
        let mut calls = 0;
        while status == PRICETONE_CONTINUE {
            status = pricetone_render_interleaved_f32(e, out.as_mut_ptr(), 256);
            calls += 1;
            assert!(calls < 100, "never completed");
        }
        assert_eq!(status, PRICETONE_COMPLETE);
        assert_eq!(pricetone_cursor(e), 2);
        assert!(pricetone_is_finished(e));

        assert_eq!(pricetone_render_interleaved_f32(e, out.as_mut_ptr(), 256), PRICETONE_COMPLETE);
        assert!(out.iter().all(|&s| s == 0.0));
        pricetone_destroy(e);
    }

    #[test]
    fn empty_series_with_null_values_is_allowed() {
        let e = pricetone_create(ptr::null(), 0, ptr::null());
        assert!(!e.is_null());
        let mut out = [1.0f32; 8];
        assert_eq!(pricetone_render_interleaved_f32(e, out.as_mut_ptr(), 4), PRICETONE_COMPLETE);
        assert_eq!(out, [0.0; 8]);
        pricetone_destroy(e);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(pricetone_create(ptr::null(), 3, ptr::null()).is_null());

        let mut cfg = pricetone_default_config();
        cfg.layout = 9;
        assert!(pricetone_create([50.0f32].as_ptr(), 1, &cfg).is_null());

        let mut cfg = pricetone_default_config();
        cfg.freq_max = 30_000.0;
        assert!(pricetone_create([50.0f32].as_ptr(), 1, &cfg).is_null());

        assert_eq!(pricetone_render_interleaved_f32(ptr::null_mut(), ptr::null_mut(), 16), PRICETONE_ERROR);
        let e = pricetone_create([50.0f32].as_ptr(), 1, ptr::null());
        assert_eq!(pricetone_render_interleaved_f32(e, ptr::null_mut(), 16), PRICETONE_ERROR);
        assert_eq!(pricetone_render_interleaved_f32(e, ptr::null_mut(), 0), PRICETONE_CONTINUE);
        pricetone_destroy(e);
        pricetone_destroy(ptr::null_mut());
    }
}
