//! Hansons Method race paces
//!
//! An empirical model: training zones are fixed multiples of the race pace and
//! other distances follow Riegel's power law. Weather, when supplied, inflates
//! the input time before anything else is derived.

pub mod equivalents;
pub mod paces;
pub mod weather;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distances::hansons_label;
use crate::error::{ensure_distance, ensure_time, Result};
use crate::format::format_time;
use crate::models::EquivalentPerformance;
use crate::units::{pace_per_unit, DistanceUnit};

pub use paces::{HansonsTrainingPace, HansonsZone};
pub use weather::WeatherConditions;

/// The (possibly weather-adjusted) input race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HansonsRaceInfo {
    pub label: String,
    pub distance_meters: f64,
    pub time_seconds: f64,
    pub pace_per_km: f64,
    pub pace_per_mile: f64,
}

impl HansonsRaceInfo {
    pub fn formatted_time(&self) -> String {
        format_time(self.time_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HansonsResult {
    pub race_info: HansonsRaceInfo,
    pub training_paces: Vec<HansonsTrainingPace>,
    pub equivalent_performances: Vec<EquivalentPerformance>,
    pub weather_adjusted: bool,
}

impl HansonsResult {
    pub fn pace_for(&self, zone: HansonsZone) -> Option<&HansonsTrainingPace> {
        self.training_paces.iter().find(|pace| pace.zone == zone)
    }
}

/// Hansons engine
pub struct HansonsCalculator;

impl HansonsCalculator {
    /// Training paces and equivalent performances for one race.
    pub fn calculate_hansons_paces(
        distance_meters: f64,
        time_seconds: f64,
        weather: Option<&WeatherConditions>,
    ) -> Result<HansonsResult> {
        ensure_distance(distance_meters)?;
        ensure_time(time_seconds)?;

        let adjusted_time = match weather {
            Some(conditions) => Self::apply_weather_adjustment(time_seconds, conditions),
            None => time_seconds,
        };

        debug!(
            distance_meters,
            time_seconds,
            adjusted_time,
            weather_adjusted = weather.is_some(),
            "Calculating Hansons paces"
        );

        let race_info = HansonsRaceInfo {
            label: hansons_label(distance_meters),
            distance_meters,
            time_seconds: adjusted_time,
            pace_per_km: pace_per_unit(adjusted_time, distance_meters, DistanceUnit::Kilometers),
            pace_per_mile: pace_per_unit(adjusted_time, distance_meters, DistanceUnit::Miles),
        };

        Ok(HansonsResult {
            race_info,
            training_paces: Self::derive_training_paces(adjusted_time, distance_meters)?,
            equivalent_performances: Self::derive_equivalent_performances(
                adjusted_time,
                distance_meters,
            )?,
            weather_adjusted: weather.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{TemperatureUnit, WindUnit};

    #[test]
    fn test_ten_k_without_weather() {
        let result = HansonsCalculator::calculate_hansons_paces(10000.0, 2400.0, None).unwrap();

        assert!(!result.weather_adjusted);
        assert_eq!(result.race_info.label, "10K");
        assert_eq!(result.race_info.time_seconds, 2400.0);
        assert_eq!(result.race_info.formatted_time(), "40:00");
        assert_eq!(result.training_paces.len(), 10);
        assert_eq!(result.equivalent_performances.len(), 18);

        let tempo = result.pace_for(HansonsZone::MarathonTempo).unwrap();
        assert_eq!(tempo.per_km.fast, result.race_info.pace_per_km);
        assert_eq!(tempo.per_km.fast, 240.0);
    }

    #[test]
    fn test_weather_inflates_everything() {
        let weather = WeatherConditions::new(60.0, TemperatureUnit::Fahrenheit, 50.0, 0.0, WindUnit::Mph);
        let result =
            HansonsCalculator::calculate_hansons_paces(10000.0, 2400.0, Some(&weather)).unwrap();

        assert!(result.weather_adjusted);
        assert!((result.race_info.time_seconds - 2520.0).abs() < 1e-9);
        let tempo = result.pace_for(HansonsZone::MarathonTempo).unwrap();
        assert!((tempo.per_km.fast - 252.0).abs() < 1e-9);
    }

    #[test]
    fn test_unlisted_distance_label() {
        let result = HansonsCalculator::calculate_hansons_paces(7000.0, 1800.0, None).unwrap();
        assert_eq!(result.race_info.label, "7.000km");
        assert_eq!(result.equivalent_performances.len(), 19);

        let result = HansonsCalculator::calculate_hansons_paces(800.0, 150.0, None).unwrap();
        assert_eq!(result.race_info.label, "800m");
    }

    #[test]
    fn test_rejects_invalid_input() {
        let err = HansonsCalculator::calculate_hansons_paces(0.0, 2400.0, None).unwrap_err();
        assert_eq!(err.kind(), Some("invalid_distance"));

        let err = HansonsCalculator::calculate_hansons_paces(10000.0, 0.0, None).unwrap_err();
        assert_eq!(err.kind(), Some("invalid_time"));
    }
}
