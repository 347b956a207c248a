//! Race-day weather inflation of a finish time
//!
//! Each factor contributes an independent fraction of the time; the sum is
//! capped at [`MAX_WEATHER_ADJUSTMENT`] and applied once, multiplicatively.
//! The cap is a plausibility bound, not a fitted value.

use serde::{Deserialize, Serialize};

use super::HansonsCalculator;
use crate::units::{TemperatureUnit, WindUnit};

/// Above this temperature (°F) every degree costs [`HEAT_FRACTION_PER_DEGREE`]
pub const HEAT_THRESHOLD_F: f64 = 50.0;
pub const HEAT_FRACTION_PER_DEGREE: f64 = 0.005;

/// Below this temperature (°F) every degree costs [`COLD_FRACTION_PER_DEGREE`]
pub const COLD_THRESHOLD_F: f64 = 32.0;
pub const COLD_FRACTION_PER_DEGREE: f64 = 0.003;

/// Relative humidity (%) above which each point costs [`HUMIDITY_FRACTION_PER_POINT`]
pub const HUMIDITY_THRESHOLD: f64 = 60.0;
pub const HUMIDITY_FRACTION_PER_POINT: f64 = 0.002;

pub const WIND_FRACTION_PER_MPH: f64 = 0.01;

/// Upper bound on the combined adjustment
pub const MAX_WEATHER_ADJUSTMENT: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub temperature: f64,
    pub temperature_unit: TemperatureUnit,
    /// Relative humidity in percent
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_unit: WindUnit,
}

impl Default for WeatherConditions {
    /// Neutral conditions: no adjustment
    fn default() -> Self {
        Self {
            temperature: HEAT_THRESHOLD_F,
            temperature_unit: TemperatureUnit::Fahrenheit,
            humidity: HUMIDITY_THRESHOLD,
            wind_speed: 0.0,
            wind_unit: WindUnit::Mph,
        }
    }
}

impl WeatherConditions {
    pub fn new(
        temperature: f64,
        temperature_unit: TemperatureUnit,
        humidity: f64,
        wind_speed: f64,
        wind_unit: WindUnit,
    ) -> Self {
        Self {
            temperature,
            temperature_unit,
            humidity,
            wind_speed,
            wind_unit,
        }
    }

    /// Combined fraction of time lost, before the cap
    pub fn uncapped_adjustment(&self) -> f64 {
        let fahrenheit = self.temperature_unit.to_fahrenheit(self.temperature);
        let mut adjustment = 0.0;

        if fahrenheit > HEAT_THRESHOLD_F {
            adjustment += (fahrenheit - HEAT_THRESHOLD_F) * HEAT_FRACTION_PER_DEGREE;
        } else if fahrenheit < COLD_THRESHOLD_F {
            adjustment += (COLD_THRESHOLD_F - fahrenheit) * COLD_FRACTION_PER_DEGREE;
        }

        if self.humidity > HUMIDITY_THRESHOLD {
            adjustment += (self.humidity - HUMIDITY_THRESHOLD) * HUMIDITY_FRACTION_PER_POINT;
        }

        adjustment += self.wind_unit.to_mph(self.wind_speed) * WIND_FRACTION_PER_MPH;
        adjustment
    }

    /// Fraction of time lost, capped
    pub fn adjustment(&self) -> f64 {
        self.uncapped_adjustment().min(MAX_WEATHER_ADJUSTMENT)
    }
}

impl HansonsCalculator {
    /// Inflate `base_seconds` for the given conditions
    pub fn apply_weather_adjustment(base_seconds: f64, weather: &WeatherConditions) -> f64 {
        base_seconds * (1.0 + weather.adjustment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_neutral_conditions() {
        let weather = WeatherConditions::default();
        assert_close(weather.adjustment(), 0.0);
        assert_close(HansonsCalculator::apply_weather_adjustment(2400.0, &weather), 2400.0);
    }

    #[test]
    fn test_warm_day() {
        let weather = WeatherConditions::new(60.0, TemperatureUnit::Fahrenheit, 50.0, 0.0, WindUnit::Mph);
        assert_close(weather.adjustment(), 0.05);
        assert_close(HansonsCalculator::apply_weather_adjustment(2400.0, &weather), 2520.0);
    }

    #[test]
    fn test_cold_day() {
        let weather = WeatherConditions::new(20.0, TemperatureUnit::Fahrenheit, 40.0, 0.0, WindUnit::Mph);
        assert_close(weather.adjustment(), 0.036);
    }

    #[test]
    fn test_metric_inputs() {
        // 25 °C = 77 °F
        let weather = WeatherConditions::new(25.0, TemperatureUnit::Celsius, 0.0, 0.0, WindUnit::Kmh);
        assert_close(weather.adjustment(), 0.135);

        let windy = WeatherConditions::new(40.0, TemperatureUnit::Fahrenheit, 0.0, 10.0, WindUnit::Kmh);
        assert_close(windy.adjustment(), 0.0621371);
    }

    #[test]
    fn test_adjustment_is_capped() {
        let weather = WeatherConditions::new(90.0, TemperatureUnit::Fahrenheit, 70.0, 5.0, WindUnit::Mph);
        assert_close(weather.uncapped_adjustment(), 0.27);
        assert_close(weather.adjustment(), MAX_WEATHER_ADJUSTMENT);
        assert_close(HansonsCalculator::apply_weather_adjustment(1000.0, &weather), 1200.0);
    }
}
