//! Temperature and altitude adjustment of a race performance
//!
//! The model only ever penalizes: the combined effect is floored at zero, and
//! "slower"/"faster" are symmetric offsets of that effect from the original
//! time. Both the floor and the coefficients are heuristics carried over from
//! the published calculator, not validated physiology.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::VdotCalculator;
use crate::error::{ensure_distance, ensure_time, Result};
use crate::units::{seconds_to_minutes, AltitudeUnit, TemperatureUnit, METERS_PER_KILOMETER};

/// Temperature with no effect on performance
pub const NEUTRAL_TEMPERATURE_CELSIUS: f64 = 15.0;

/// Seconds lost per minute of racing for each °C above neutral
pub const TEMPERATURE_SECONDS_PER_MINUTE_PER_DEGREE: f64 = 0.16667;

/// Percent of race time lost per meter of altitude
pub const ALTITUDE_PERCENT_PER_METER: f64 = 0.004;

/// Altitude percent offset; the altitude term is negative below 750 m
pub const ALTITUDE_PERCENT_OFFSET: f64 = 3.0;

/// Which derived value the caller wants to foreground
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// What the conditions cost: the slower time and its VDOT
    #[default]
    Effect,
    /// The performance converted to neutral conditions: the faster time
    Conversion,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "effect" => Ok(DisplayMode::Effect),
            "conversion" => Ok(DisplayMode::Conversion),
            _ => Err(format!("Invalid display mode: {}", s)),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Effect => write!(f, "effect"),
            DisplayMode::Conversion => write!(f, "conversion"),
        }
    }
}

/// Optional race-day conditions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConditions {
    pub temperature: Option<f64>,
    pub temperature_unit: TemperatureUnit,
    pub altitude: Option<f64>,
    pub altitude_unit: AltitudeUnit,
    pub display_mode: DisplayMode,
}

impl EnvironmentConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f64, unit: TemperatureUnit) -> Self {
        self.temperature = Some(temperature);
        self.temperature_unit = unit;
        self
    }

    pub fn with_altitude(mut self, altitude: f64, unit: AltitudeUnit) -> Self {
        self.altitude = Some(altitude);
        self.altitude_unit = unit;
        self
    }

    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    /// No temperature and no altitude supplied
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.altitude.is_none()
    }
}

/// Performance adjusted for environmental conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalAdjustment {
    pub original_vdot: f64,
    pub slower_vdot: f64,
    /// `None` when the effect consumes the whole original time
    pub faster_vdot: Option<f64>,
    pub slower_time: f64,
    pub faster_time: f64,
    pub effect_seconds: f64,
    pub pace_diff_per_km: f64,
    pub display_mode: DisplayMode,
    pub conditions: EnvironmentConditions,
}

impl EnvironmentalAdjustment {
    /// VDOT selected by the display mode
    pub fn presented_vdot(&self) -> Option<f64> {
        match self.display_mode {
            DisplayMode::Effect => Some(self.slower_vdot),
            DisplayMode::Conversion => self.faster_vdot,
        }
    }

    /// Time selected by the display mode
    pub fn presented_time(&self) -> f64 {
        match self.display_mode {
            DisplayMode::Effect => self.slower_time,
            DisplayMode::Conversion => self.faster_time,
        }
    }
}

impl VdotCalculator {
    /// Seconds added by racing at `temperature`; negative below 15 °C
    pub fn temperature_effect(temperature: f64, unit: TemperatureUnit, time_seconds: f64) -> f64 {
        let celsius = unit.to_celsius(temperature);
        (celsius - NEUTRAL_TEMPERATURE_CELSIUS)
            * TEMPERATURE_SECONDS_PER_MINUTE_PER_DEGREE
            * seconds_to_minutes(time_seconds)
    }

    /// Seconds added by racing at `altitude`; negative below 750 m
    pub fn altitude_effect(altitude: f64, unit: AltitudeUnit, time_seconds: f64) -> f64 {
        let meters = unit.to_meters(altitude);
        (meters * ALTITUDE_PERCENT_PER_METER - ALTITUDE_PERCENT_OFFSET) / 100.0 * time_seconds
    }

    /// Adjust a performance for temperature and/or altitude.
    ///
    /// Returns `Ok(None)` when neither is supplied. The requested effects are
    /// summed and floored at zero; `slower_time = t + effect`,
    /// `faster_time = max(t - effect, 0)`, and VDOT is re-derived at both.
    pub fn adjust_for_environment(
        distance_meters: f64,
        time_seconds: f64,
        conditions: &EnvironmentConditions,
    ) -> Result<Option<EnvironmentalAdjustment>> {
        ensure_distance(distance_meters)?;
        ensure_time(time_seconds)?;

        if conditions.is_empty() {
            return Ok(None);
        }

        let original_vdot = Self::raw_vdot(distance_meters, time_seconds);

        let mut effect_seconds = 0.0;
        if let Some(temperature) = conditions.temperature {
            effect_seconds +=
                Self::temperature_effect(temperature, conditions.temperature_unit, time_seconds);
        }
        if let Some(altitude) = conditions.altitude {
            effect_seconds += Self::altitude_effect(altitude, conditions.altitude_unit, time_seconds);
        }
        let effect_seconds = effect_seconds.max(0.0);

        let slower_time = time_seconds + effect_seconds;
        let faster_time = (time_seconds - effect_seconds).max(0.0);

        let slower_vdot = Self::raw_vdot(distance_meters, slower_time);
        let faster_vdot = (faster_time > 0.0).then(|| Self::raw_vdot(distance_meters, faster_time));

        let pace_diff_per_km = effect_seconds / (distance_meters / METERS_PER_KILOMETER);

        debug!(
            distance_meters,
            time_seconds,
            effect_seconds,
            display_mode = %conditions.display_mode,
            "Applied environmental adjustment"
        );

        Ok(Some(EnvironmentalAdjustment {
            original_vdot,
            slower_vdot,
            faster_vdot,
            slower_time,
            faster_time,
            effect_seconds,
            pace_diff_per_km,
            display_mode: conditions.display_mode,
            conditions: *conditions,
        }))
    }
}
