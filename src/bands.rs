//! AQI Severity Bands
//!
//! Maps an AQI value (0-500 scale) to its severity band and display color.
//!
//! Band table (US EPA categories):
//! - Good: 0-50 (#00E400)
//! - Moderate: 51-100 (#FFFF00)
//! - Unhealthy for Sensitive Groups: 101-150 (#FF7E00)
//! - Unhealthy: 151-200 (#FF0000)
//! - Very Unhealthy: 201-300 (#8F3F97)
//! - Hazardous: 301-500 (#7E0023)

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, AqiResult};

/// Lowest classifiable AQI value.
pub const AQI_MIN: f64 = 0.0;

/// Highest classifiable AQI value.
pub const AQI_MAX: f64 = 500.0;

/// Severity level, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    pub fn name(self) -> &'static str {
        band_for_level(self).name
    }
}

/// A single AQI band with inclusive integer bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiBand {
    pub level: AqiLevel,
    pub name: &'static str,
    pub lower_bound: u16,
    pub upper_bound: u16,
    pub color: &'static str,
}

impl AqiBand {
    /// Inclusive membership test on `[lower_bound, upper_bound]`.
    ///
    /// Fractional values between two bands (e.g. 50.5) are contained by neither;
    /// [`classify`] assigns them to the lower band. Test the truncated value to
    /// agree with `classify`.
    pub fn contains(&self, value: f64) -> bool {
        f64::from(self.lower_bound) <= value && value <= f64::from(self.upper_bound)
    }
}

// ============================================================================
// EMBEDDED BAND TABLE
// Ascending by lower_bound; each upper_bound + 1 == next lower_bound.
// ============================================================================

static AQI_BANDS: &[AqiBand] = &[
    AqiBand { level: AqiLevel::Good, name: "Good", lower_bound: 0, upper_bound: 50, color: "#00E400" },
    AqiBand { level: AqiLevel::Moderate, name: "Moderate", lower_bound: 51, upper_bound: 100, color: "#FFFF00" },
    AqiBand { level: AqiLevel::UnhealthyForSensitiveGroups, name: "Unhealthy for Sensitive Groups", lower_bound: 101, upper_bound: 150, color: "#FF7E00" },
    AqiBand { level: AqiLevel::Unhealthy, name: "Unhealthy", lower_bound: 151, upper_bound: 200, color: "#FF0000" },
    AqiBand { level: AqiLevel::VeryUnhealthy, name: "Very Unhealthy", lower_bound: 201, upper_bound: 300, color: "#8F3F97" },
    AqiBand { level: AqiLevel::Hazardous, name: "Hazardous", lower_bound: 301, upper_bound: 500, color: "#7E0023" },
];

/// All bands, ordered by increasing severity
pub fn bands() -> &'static [AqiBand] {
    AQI_BANDS
}

/// Band for a severity level
pub fn band_for_level(level: AqiLevel) -> &'static AqiBand {
    // Table order matches enum declaration order
    &AQI_BANDS[level as usize]
}

/// Classify an AQI value into its severity band.
///
/// Integer values map to the band whose inclusive range contains them. A fractional
/// value between two bands (e.g. 50.5) falls into the lower one, i.e. the band with
/// the greatest `lower_bound <= value`.
///
/// # Errors
/// `AqiError::OutOfRange` for NaN or any value outside [0, 500].
pub fn classify(value: f64) -> AqiResult<&'static AqiBand> {
    if !(AQI_MIN..=AQI_MAX).contains(&value) {
        return Err(AqiError::out_of_range(value));
    }

    // Number of bands starting at or below the value; >= 1 since the first starts at 0
    let idx = AQI_BANDS.partition_point(|band| f64::from(band.lower_bound) <= value);
    Ok(&AQI_BANDS[idx - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_count() {
        assert_eq!(bands().len(), 6);
    }

    /// Bands tile 0-500 with no gaps
    #[test]
    fn test_bands_contiguous() {
        assert_eq!(AQI_BANDS[0].lower_bound, 0);
        assert_eq!(AQI_BANDS.last().unwrap().upper_bound, 500);

        for pair in AQI_BANDS.windows(2) {
            assert!(pair[0].lower_bound <= pair[0].upper_bound);
            assert_eq!(
                pair[0].upper_bound + 1,
                pair[1].lower_bound,
                "gap between {} and {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_every_integer_has_exactly_one_band() {
        for v in 0..=500u16 {
            let value = f64::from(v);
            let matching = AQI_BANDS.iter().filter(|b| b.contains(value)).count();
            assert_eq!(matching, 1, "value {} matched {} bands", v, matching);

            let band = classify(value).unwrap();
            assert!(band.contains(value), "{} not in {}", v, band.name);
        }
    }

    #[test]
    fn test_levels_ordered_by_severity() {
        for pair in AQI_BANDS.windows(2) {
            assert!(pair[0].level < pair[1].level);
        }
        for band in bands() {
            assert_eq!(band_for_level(band.level), band);
            assert_eq!(band.level.name(), band.name);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(0.0).unwrap().name, "Good");
        assert_eq!(classify(50.0).unwrap().name, "Good");
        assert_eq!(classify(51.0).unwrap().name, "Moderate");
        assert_eq!(classify(100.0).unwrap().name, "Moderate");
        assert_eq!(classify(101.0).unwrap().name, "Unhealthy for Sensitive Groups");
        assert_eq!(classify(150.0).unwrap().name, "Unhealthy for Sensitive Groups");
        assert_eq!(classify(151.0).unwrap().name, "Unhealthy");
        assert_eq!(classify(200.0).unwrap().name, "Unhealthy");
        assert_eq!(classify(201.0).unwrap().name, "Very Unhealthy");
        assert_eq!(classify(300.0).unwrap().name, "Very Unhealthy");
        assert_eq!(classify(301.0).unwrap().name, "Hazardous");
        assert_eq!(classify(500.0).unwrap().name, "Hazardous");
    }

    #[test]
    fn test_moderate_color() {
        let band = classify(52.0).unwrap();
        assert_eq!(band.name, "Moderate");
        assert_eq!(band.color, "#FFFF00");
        assert_eq!(band.level, AqiLevel::Moderate);
    }

    #[test]
    fn test_fractional_values_fall_into_lower_band() {
        assert_eq!(classify(50.5).unwrap().level, AqiLevel::Good);
        assert_eq!(classify(50.999).unwrap().level, AqiLevel::Good);
        assert_eq!(classify(300.2).unwrap().level, AqiLevel::VeryUnhealthy);
        assert_eq!(classify(499.9).unwrap().level, AqiLevel::Hazardous);
    }

    #[test]
    fn test_out_of_range() {
        for value in [-1.0, 501.0, -0.001, 500.001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = classify(value);
            assert!(
                matches!(result, Err(AqiError::OutOfRange { .. })),
                "{} should be out of range",
                value
            );
        }
    }
}
