//! AQI Vision core
//!
//! Classification and simulated prediction behind the AQI Vision dashboard:
//! - `bands`: AQI value → severity band and display color
//! - `predictor`: pollutant/weather reading → simulated AQI (heuristic + noise)
//! - `noise`: injectable noise sources (seeded, thread-local, fixed)
//! - `reading`: prediction inputs with slider ranges and defaults
//! - `gauge` / `meter`: derived display values for the dial and pollutant bars
//! - `config`: JSON/env configuration of the predictor
//!
//! Rendering is left to the caller.

pub mod bands;
pub mod config;
pub mod error;
pub mod gauge;
pub mod meter;
pub mod noise;
pub mod predictor;
pub mod reading;

// Re-export commonly used types
pub use bands::{bands, classify, AqiBand, AqiLevel, AQI_MAX, AQI_MIN};
pub use config::{NoiseParams, PredictorConfig};
pub use error::{AqiError, AqiResult};
pub use gauge::{gradient_stops, Gauge, GradientStop};
pub use meter::{meters, MeterLevel, PollutantMeter};
pub use noise::{FixedNoise, GaussianNoise, NoiseSource, ThreadNoise, ZeroNoise};
pub use predictor::{heuristic_sum, predict, predict_with, AqiPredictor, Prediction};
pub use reading::{InputRange, PollutantReading, ReadingInput};
