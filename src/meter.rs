//! Pollutant level meters
//!
//! Each tracked pollutant is shown as a bar filled to its share of a fixed safe
//! limit. This is a separate rule from the AQI bands:
//! - percent = min(100, value / safe_limit × 100)
//! - below 50% → green, below 75% → orange, otherwise red

use serde::Serialize;

use crate::reading::{PollutantReading, ReadingInput};

/// Pollutants with a meter, in display order
pub const METERED: [ReadingInput; 4] = [
    ReadingInput::So2,
    ReadingInput::Co,
    ReadingInput::No2,
    ReadingInput::O3,
];

/// Safe limit for a metered pollutant (same unit as the reading)
pub fn safe_limit(input: ReadingInput) -> Option<f64> {
    match input {
        ReadingInput::So2 => Some(20.0),
        ReadingInput::Co => Some(4.0),
        ReadingInput::No2 => Some(40.0),
        ReadingInput::O3 => Some(50.0),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterLevel {
    Low,
    Elevated,
    High,
}

impl MeterLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 50.0 {
            MeterLevel::Low
        } else if percent < 75.0 {
            MeterLevel::Elevated
        } else {
            MeterLevel::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MeterLevel::Low => "#00E400",
            MeterLevel::Elevated => "#FF7E00",
            MeterLevel::High => "#FF0000",
        }
    }
}

/// Fill percentage of a bar, capped at 100
pub fn safe_percent(value: f64, limit: f64) -> f64 {
    (value / limit * 100.0).min(100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantMeter {
    pub input: ReadingInput,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub percent: f64,
    pub level: MeterLevel,
    pub color: &'static str,
}

impl PollutantMeter {
    /// Meter for one pollutant; `None` if it has no safe limit
    pub fn new(input: ReadingInput, value: f64) -> Option<Self> {
        let limit = safe_limit(input)?;
        let percent = safe_percent(value, limit);
        let level = MeterLevel::from_percent(percent);

        Some(Self {
            input,
            label: input.label(),
            unit: input.unit(),
            value,
            percent,
            level,
            color: level.color(),
        })
    }
}

/// Meters for every metered pollutant of a reading
pub fn meters(reading: &PollutantReading) -> Vec<PollutantMeter> {
    METERED
        .iter()
        .filter_map(|&input| PollutantMeter::new(input, reading.get(input)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dashboard_defaults() {
        let meters = meters(&PollutantReading::default());
        assert_eq!(meters.len(), 4);

        // SO2 2.02 / 20 -> 10.1%
        assert_eq!(meters[0].input, ReadingInput::So2);
        assert_relative_eq!(meters[0].percent, 10.1, epsilon = 1e-9);
        assert_eq!(meters[0].level, MeterLevel::Low);

        // CO 0.06 / 4 -> 1.5%
        assert_eq!(meters[1].unit, "ppm");
        assert_relative_eq!(meters[1].percent, 1.5, epsilon = 1e-9);

        // NO2 17.84 / 40 -> 44.6%
        assert_relative_eq!(meters[2].percent, 44.6, epsilon = 1e-9);
        assert_eq!(meters[2].color, "#00E400");

        // O3 26.07 / 50 -> 52.14%
        assert_relative_eq!(meters[3].percent, 52.14, epsilon = 1e-9);
        assert_eq!(meters[3].level, MeterLevel::Elevated);
        assert_eq!(meters[3].color, "#FF7E00");
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(MeterLevel::from_percent(49.99), MeterLevel::Low);
        assert_eq!(MeterLevel::from_percent(50.0), MeterLevel::Elevated);
        assert_eq!(MeterLevel::from_percent(74.99), MeterLevel::Elevated);
        assert_eq!(MeterLevel::from_percent(75.0), MeterLevel::High);
    }

    #[test]
    fn test_percent_capped() {
        assert_eq!(safe_percent(80.0, 20.0), 100.0);
        let meter = PollutantMeter::new(ReadingInput::Co, 9.0).unwrap();
        assert_eq!(meter.percent, 100.0);
        assert_eq!(meter.level, MeterLevel::High);
        assert_eq!(meter.color, "#FF0000");
    }

    #[test]
    fn test_unmetered_inputs() {
        assert!(PollutantMeter::new(ReadingInput::No, 5.0).is_none());
        assert!(PollutantMeter::new(ReadingInput::Humidity, 50.0).is_none());
        assert!(safe_limit(ReadingInput::Temperature).is_none());
    }
}
