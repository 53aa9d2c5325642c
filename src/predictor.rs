//! AQI Predictor - heuristic AQI estimate from pollutant and weather readings
//!
//! This is a fixed weighted sum plus one normal noise draw, not a fitted model:
//!
//! ```text
//! raw = SO2*2 + CO*10 + NO*0.5 + NO2*1.5 + O3*0.8
//!     + (30 - temperature)*0.5 + humidity*0.1 + wind_speed*(-2)
//!     + N(50, 10)
//! ```
//!
//! The result is clamped to [0, 500]. Prediction never fails; range checking of
//! inputs belongs to the caller.

use rayon::prelude::*;
use serde::Serialize;

use crate::bands::{classify, AqiBand, AQI_MAX, AQI_MIN};
use crate::config::{NoiseParams, PredictorConfig};
use crate::error::AqiResult;
use crate::noise::{GaussianNoise, NoiseSource, ThreadNoise};
use crate::reading::PollutantReading;

/// Temperature at which the temperature term vanishes (°C)
pub const REFERENCE_TEMPERATURE: f64 = 30.0;

/// Deterministic part of the prediction (weighted sum, no noise, no clamp)
pub fn heuristic_sum(reading: &PollutantReading) -> f64 {
    (reading.so2 * 2.0)
        + (reading.co * 10.0)
        + (reading.no * 0.5)
        + (reading.no2 * 1.5)
        + (reading.o3 * 0.8)
        + ((REFERENCE_TEMPERATURE - reading.temperature) * 0.5)
        + (reading.humidity * 0.1)
        + (reading.wind_speed * -2.0)
}

/// Clamp a raw score into [0, 500]. NaN maps to 0.
pub fn clamp_aqi(raw: f64) -> f64 {
    // f64::max ignores a NaN operand, f64::clamp would propagate it
    raw.max(AQI_MIN).min(AQI_MAX)
}

/// Predict AQI with N(50, 10) noise from `noise`
pub fn predict<N: NoiseSource + ?Sized>(reading: &PollutantReading, noise: &mut N) -> f64 {
    predict_with(reading, noise, &NoiseParams::default())
}

/// Predict AQI with an explicit noise distribution. Draws exactly one sample.
pub fn predict_with<N: NoiseSource + ?Sized>(
    reading: &PollutantReading,
    noise: &mut N,
    params: &NoiseParams,
) -> f64 {
    let sum = heuristic_sum(reading);
    let draw = noise.sample_normal(params.mean, params.std_dev);
    let value = clamp_aqi(sum + draw);

    tracing::debug!("Predicted AQI {:.2} (sum {:.3}, noise {:.3})", value, sum, draw);
    value
}

/// A prediction together with its severity band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub value: f64,
    /// Value as displayed (truncated); always inside `band`
    pub display_value: u16,
    pub band: &'static AqiBand,
}

impl Prediction {
    /// Classify a predicted value
    pub fn from_value(value: f64) -> AqiResult<Self> {
        let band = classify(value)?;
        Ok(Self {
            value,
            display_value: value.trunc() as u16,
            band,
        })
    }
}

/// Predictor bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct AqiPredictor {
    config: PredictorConfig,
}

impl AqiPredictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn predict<N: NoiseSource + ?Sized>(&self, reading: &PollutantReading, noise: &mut N) -> f64 {
        predict_with(reading, noise, &self.config.noise)
    }

    /// Predict and classify in one step (the form submission path)
    pub fn predict_classified<N: NoiseSource + ?Sized>(
        &self,
        reading: &PollutantReading,
        noise: &mut N,
    ) -> AqiResult<Prediction> {
        Prediction::from_value(self.predict(reading, noise))
    }

    /// Noise source for this configuration: seeded when a seed is set,
    /// otherwise the thread-local RNG.
    pub fn noise_source(&self) -> Box<dyn NoiseSource> {
        match self.config.seed {
            Some(seed) => Box::new(GaussianNoise::seeded(seed)),
            None => Box::new(ThreadNoise::thread_local()),
        }
    }

    /// Predict a batch of readings in parallel.
    ///
    /// Reading `i` draws from stream `i` of `master_seed`, so the output does not
    /// depend on thread count or scheduling.
    pub fn predict_batch(
        &self,
        readings: &[PollutantReading],
        master_seed: u64,
    ) -> AqiResult<Vec<Prediction>> {
        tracing::info!("Predicting {} readings in parallel (seed {})", readings.len(), master_seed);

        readings
            .par_iter()
            .enumerate()
            .map(|(i, reading)| {
                let mut noise = GaussianNoise::stream(master_seed, i as u64);
                Prediction::from_value(self.predict(reading, &mut noise))
            })
            .collect()
    }
}
