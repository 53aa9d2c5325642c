//! Pollutant and weather readings fed to the AQI predictor.
//!
//! Each input carries the slider metadata of the prediction form (label, unit,
//! range, default). The predictor itself never enforces the ranges; clamping is
//! the caller's job via [`PollutantReading::clamped_to_inputs`].

use serde::{Deserialize, Serialize};

/// Inclusive valid range of a single input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp into the range. NaN clamps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Named prediction form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingInput {
    So2,
    Co,
    No,
    No2,
    O3,
    Temperature,
    Humidity,
    WindSpeed,
}

impl ReadingInput {
    pub const ALL: [ReadingInput; 8] = [
        ReadingInput::So2,
        ReadingInput::Co,
        ReadingInput::No,
        ReadingInput::No2,
        ReadingInput::O3,
        ReadingInput::Temperature,
        ReadingInput::Humidity,
        ReadingInput::WindSpeed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReadingInput::So2 => "SO₂",
            ReadingInput::Co => "CO",
            ReadingInput::No => "NO",
            ReadingInput::No2 => "NO₂",
            ReadingInput::O3 => "O₃",
            ReadingInput::Temperature => "Temperature",
            ReadingInput::Humidity => "Humidity",
            ReadingInput::WindSpeed => "Wind Speed",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ReadingInput::Co => "ppm",
            ReadingInput::So2 | ReadingInput::No | ReadingInput::No2 | ReadingInput::O3 => "ppb",
            ReadingInput::Temperature => "°C",
            ReadingInput::Humidity => "%",
            ReadingInput::WindSpeed => "m/s",
        }
    }

    /// Slider bounds on the prediction form
    pub fn range(self) -> InputRange {
        match self {
            ReadingInput::So2 | ReadingInput::No | ReadingInput::No2 => InputRange::new(0.0, 50.0),
            ReadingInput::Co => InputRange::new(0.0, 10.0),
            ReadingInput::O3 | ReadingInput::Humidity => InputRange::new(0.0, 100.0),
            ReadingInput::Temperature => InputRange::new(-10.0, 40.0),
            ReadingInput::WindSpeed => InputRange::new(0.0, 20.0),
        }
    }

    /// Initial slider position
    pub fn default_value(self) -> f64 {
        match self {
            ReadingInput::So2 => 2.02,
            ReadingInput::Co => 0.06,
            ReadingInput::No => 8.93,
            ReadingInput::No2 => 17.84,
            ReadingInput::O3 => 26.07,
            ReadingInput::Temperature => 28.7,
            ReadingInput::Humidity => 80.27,
            ReadingInput::WindSpeed => 0.33,
        }
    }
}

/// One set of prediction inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub so2: f64,
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl Default for PollutantReading {
    fn default() -> Self {
        Self::from_fn(ReadingInput::default_value)
    }
}

impl PollutantReading {
    /// Build a reading by evaluating `f` for every input
    pub fn from_fn(mut f: impl FnMut(ReadingInput) -> f64) -> Self {
        Self {
            so2: f(ReadingInput::So2),
            co: f(ReadingInput::Co),
            no: f(ReadingInput::No),
            no2: f(ReadingInput::No2),
            o3: f(ReadingInput::O3),
            temperature: f(ReadingInput::Temperature),
            humidity: f(ReadingInput::Humidity),
            wind_speed: f(ReadingInput::WindSpeed),
        }
    }

    pub fn get(&self, input: ReadingInput) -> f64 {
        match input {
            ReadingInput::So2 => self.so2,
            ReadingInput::Co => self.co,
            ReadingInput::No => self.no,
            ReadingInput::No2 => self.no2,
            ReadingInput::O3 => self.o3,
            ReadingInput::Temperature => self.temperature,
            ReadingInput::Humidity => self.humidity,
            ReadingInput::WindSpeed => self.wind_speed,
        }
    }

    pub fn set(&mut self, input: ReadingInput, value: f64) {
        let slot = match input {
            ReadingInput::So2 => &mut self.so2,
            ReadingInput::Co => &mut self.co,
            ReadingInput::No => &mut self.no,
            ReadingInput::No2 => &mut self.no2,
            ReadingInput::O3 => &mut self.o3,
            ReadingInput::Temperature => &mut self.temperature,
            ReadingInput::Humidity => &mut self.humidity,
            ReadingInput::WindSpeed => &mut self.wind_speed,
        };
        *slot = value;
    }

    /// Every input at its slider maximum
    pub fn at_upper_bounds() -> Self {
        Self::from_fn(|input| input.range().max)
    }

    /// Every input at its slider minimum
    pub fn at_lower_bounds() -> Self {
        Self::from_fn(|input| input.range().min)
    }

    /// Copy with every input clamped to its slider range
    pub fn clamped_to_inputs(&self) -> Self {
        Self::from_fn(|input| input.range().clamp(self.get(input)))
    }

    /// Inputs currently outside their slider range
    pub fn out_of_range_inputs(&self) -> Vec<ReadingInput> {
        ReadingInput::ALL
            .into_iter()
            .filter(|&input| !input.range().contains(self.get(input)))
            .collect()
    }
}
