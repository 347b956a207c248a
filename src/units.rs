//! Unit tags and conversion helpers
//!
//! Every calculation takes meters and seconds internally. Units that arrive from
//! callers (temperature, altitude, wind, pace distance) are always tagged
//! explicitly, never inferred.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// Meters in one kilometer
pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Meters in one foot
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Miles per hour in one kilometer per hour
pub const MPH_PER_KMH: f64 = 0.621371;

/// Preferred display system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Distance unit paces are shown in
    pub fn pace_unit(&self) -> DistanceUnit {
        match self {
            Units::Metric => DistanceUnit::Kilometers,
            Units::Imperial => DistanceUnit::Miles,
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "km" => Ok(Units::Metric),
            "imperial" | "mi" => Ok(Units::Imperial),
            _ => Err(format!("Invalid units: {}", s)),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Metric => write!(f, "metric"),
            Units::Imperial => write!(f, "imperial"),
        }
    }
}

/// Distance unit for paces and distance input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    /// Length of one unit in meters
    pub fn meters(&self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => METERS_PER_KILOMETER,
            DistanceUnit::Miles => METERS_PER_MILE,
        }
    }

    /// Suffix used in pace strings
    pub fn pace_suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "/m",
            DistanceUnit::Kilometers => "/km",
            DistanceUnit::Miles => "/mi",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(DistanceUnit::Meters),
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Kilometers),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            _ => Err(format!("Invalid distance unit: {}", s)),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Meters => write!(f, "m"),
            DistanceUnit::Kilometers => write!(f, "km"),
            DistanceUnit::Miles => write!(f, "mi"),
        }
    }
}

/// Temperature scale of a supplied reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Celsius => value,
        }
    }

    pub fn to_fahrenheit(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => value,
            TemperatureUnit::Celsius => value * 9.0 / 5.0 + 32.0,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f" | "fahrenheit" | "imperial" => Ok(TemperatureUnit::Fahrenheit),
            "c" | "celsius" | "metric" => Ok(TemperatureUnit::Celsius),
            _ => Err(format!("Invalid temperature unit: {}", s)),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Fahrenheit => write!(f, "°F"),
            TemperatureUnit::Celsius => write!(f, "°C"),
        }
    }
}

/// Altitude unit of a supplied elevation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltitudeUnit {
    #[default]
    Feet,
    Meters,
}

impl AltitudeUnit {
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            AltitudeUnit::Feet => value * METERS_PER_FOOT,
            AltitudeUnit::Meters => value,
        }
    }
}

impl FromStr for AltitudeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ft" | "feet" | "imperial" => Ok(AltitudeUnit::Feet),
            "m" | "meters" | "metric" => Ok(AltitudeUnit::Meters),
            _ => Err(format!("Invalid altitude unit: {}", s)),
        }
    }
}

impl fmt::Display for AltitudeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltitudeUnit::Feet => write!(f, "ft"),
            AltitudeUnit::Meters => write!(f, "m"),
        }
    }
}

/// Wind speed unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    Mph,
    Kmh,
}

impl WindUnit {
    pub fn to_mph(&self, value: f64) -> f64 {
        match self {
            WindUnit::Mph => value,
            WindUnit::Kmh => value * MPH_PER_KMH,
        }
    }
}

impl FromStr for WindUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('/', "").as_str() {
            "mph" | "imperial" => Ok(WindUnit::Mph),
            "kmh" | "kph" | "metric" => Ok(WindUnit::Kmh),
            _ => Err(format!("Invalid wind unit: {}", s)),
        }
    }
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindUnit::Mph => write!(f, "mph"),
            WindUnit::Kmh => write!(f, "km/h"),
        }
    }
}

pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

pub fn minutes_to_seconds(minutes: f64) -> f64 {
    minutes * SECONDS_PER_MINUTE
}

/// Convert a per-kilometer pace to a per-mile pace
pub fn per_km_to_per_mile(seconds_per_km: f64) -> f64 {
    seconds_per_km * METERS_PER_MILE / METERS_PER_KILOMETER
}

/// Seconds per `unit` for a time over a distance
pub fn pace_per_unit(time_seconds: f64, distance_meters: f64, unit: DistanceUnit) -> f64 {
    time_seconds / (distance_meters / unit.meters())
}

/// Distance covered in `time_seconds` at `pace_seconds` per `pace_unit`
pub fn distance_from_time_and_pace(time_seconds: f64, pace_seconds: f64, pace_unit: DistanceUnit) -> f64 {
    pace_unit.meters() * time_seconds / pace_seconds
}
