//! Gauge geometry for the AQI dial.
//!
//! The dial spans 180° over the 0-500 scale. Its background is a conic gradient
//! with one stop per band, derived from the band table.

use serde::Serialize;

use crate::bands::{bands, classify, AqiLevel, AQI_MAX};
use crate::error::AqiResult;

/// Needle sweep of the full scale, in degrees
pub const GAUGE_SWEEP_DEG: f64 = 180.0;

/// Everything a renderer needs to draw the dial
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    /// Value as shown on the dial (truncated to an integer)
    pub display_value: u16,
    pub rotation_deg: f64,
    pub level: AqiLevel,
    pub label: &'static str,
    pub color: &'static str,
}

impl Gauge {
    /// Build the dial for a predicted value.
    ///
    /// The value is truncated first, then classified; out-of-range values fail
    /// like [`classify`] does.
    pub fn from_value(value: f64) -> AqiResult<Self> {
        let band = classify(value)?;
        let shown = value.trunc();

        Ok(Self {
            display_value: shown as u16,
            rotation_deg: shown / AQI_MAX * GAUGE_SWEEP_DEG,
            level: band.level,
            label: band.name,
            color: band.color,
        })
    }
}

/// One conic-gradient segment, in percent of the full scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: &'static str,
    pub start_pct: f64,
    pub end_pct: f64,
}

/// Gradient segments: each band runs from the previous band's upper bound to its own
pub fn gradient_stops() -> Vec<GradientStop> {
    let mut start = 0.0;
    bands()
        .iter()
        .map(|band| {
            let end = f64::from(band.upper_bound) / AQI_MAX * 100.0;
            let stop = GradientStop {
                color: band.color,
                start_pct: start,
                end_pct: end,
            };
            start = end;
            stop
        })
        .collect()
}
