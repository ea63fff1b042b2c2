//! Spatial mapper: places every sample of a series in 3D space.
//!
//! The horizontal placement policy is a small tagged variant ([`Layout`]);
//! value normalization is shared by every layout so there is exactly one
//! place where clamping happens.
//!
//! Axes
//! - `x` : horizontal position, drives stereo pan
//! - `y` : normalized value in `[-1, 1]`, drives loudness
//! - `z` : depth; computed by the angular layouts, unused by the audio path

use core::fmt;
use core::str::FromStr;

use log::debug;
use pricetone_core::dsp::{cos, deg_to_rad, sin, TAU};
use pricetone_core::prelude::Span;

use crate::error::ConfigError;
use crate::series::Sample;

/// Where a sample sits in space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpatialPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SpatialPoint {
    /// Stereo pan in `[-1, 1]` (-1 = hard left).
    #[inline]
    pub fn pan(&self) -> f32 {
        Span::BIPOLAR.clamp(self.x)
    }

    /// Loudness coefficient in `[0, 1]`.
    #[inline]
    pub fn volume(&self) -> f32 {
        Span::UNIT.clamp((self.y + 1.0) * 0.5)
    }
}

/// Horizontal placement policy.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "kebab-case"))]
pub enum Layout {
    /// `x` spread uniformly across `[-1, 1]` by normalized index.
    #[default]
    Linear,
    /// Index swept across a field of view centred straight ahead:
    /// `x = r·sin(angle)`, `z = r·cos(angle)`.
    Angular { fov_degrees: f32 },
    /// Index swept uniformly around the listener:
    /// `x = r·cos(angle)`, `z = r·sin(angle)`.
    FullCircle,
}

impl Layout {
    /// Horizontal placement `(x, z)` of the `index`-th of `len` samples.
    ///
    /// A single-sample series sits at the centre, `(0, 0)`, in every layout.
    pub fn place(&self, index: usize, len: usize, radius: f32) -> (f32, f32) {
        if len <= 1 {
            return (0.0, 0.0);
        }
        match *self {
            Layout::Linear => {
                let t = index as f32 / (len - 1) as f32;
                (2.0 * t - 1.0, 0.0)
            }
            Layout::Angular { fov_degrees } => {
                let t = index as f32 / (len - 1) as f32;
                let angle = (t - 0.5) * deg_to_rad(fov_degrees);
                (radius * sin(angle), radius * cos(angle))
            }
            Layout::FullCircle => {
                // i/len, not i/(len-1): the last point must not land on the first.
                let angle = TAU * index as f32 / len as f32;
                (radius * cos(angle), radius * sin(angle))
            }
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Linear => f.write_str("linear"),
            Layout::Angular { fov_degrees } => write!(f, "angular:{fov_degrees}"),
            Layout::FullCircle => f.write_str("full-circle"),
        }
    }
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "linear" => return Ok(Layout::Linear),
            "full-circle" | "fullcircle" | "circle" => return Ok(Layout::FullCircle),
            "angular" => return Ok(Layout::Angular { fov_degrees: 180.0 }),
            _ => {}
        }
        if let Some(rest) = lower.strip_prefix("angular:") {
            if let Ok(fov_degrees) = rest.parse::<f32>() {
                return Ok(Layout::Angular { fov_degrees });
            }
        }
        Err(ConfigError::UnknownLayout(s.to_string()))
    }
}

/// Produces one [`SpatialPoint`] per [`Sample`], in order.
///
/// Stateless between calls and deterministic: the same series and mapper
/// always yield the same points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialMapper {
    pub layout: Layout,
    pub value_domain: Span,
    pub radius: f32,
}

impl SpatialMapper {
    #[inline]
    pub fn new(layout: Layout, value_domain: Span, radius: f32) -> Self {
        Self { layout, value_domain, radius }
    }

    /// Loudness-axis coordinate: the clamped value interpolated into `[-1, 1]`.
    #[inline]
    pub fn normalize_value(&self, value: f32) -> f32 {
        self.value_domain.map_clamped(value, Span::BIPOLAR)
    }

    /// Place the whole series. Output length always equals input length.
    pub fn map(&self, samples: &[Sample]) -> Vec<SpatialPoint> {
        let len = samples.len();
        debug!("mapping {len} samples with {} layout (radius {})", self.layout, self.radius);

        samples
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let (x, z) = self.layout.place(i, len, self.radius);
                SpatialPoint { x, y: self.normalize_value(s.value), z }
            })
            .collect()
    }
}
