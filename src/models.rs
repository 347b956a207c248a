use serde::{Deserialize, Serialize};

use crate::error::{ensure_distance, ensure_time, Result};
use crate::format::{format_pace, format_pace_range, format_time};
use crate::units::{pace_per_unit, DistanceUnit};

/// A single race effort: distance covered and elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInput {
    /// Distance in meters
    pub distance_meters: f64,

    /// Elapsed time in seconds
    pub time_seconds: f64,
}

impl PerformanceInput {
    /// Validate and build a performance; both values must be positive.
    pub fn new(distance_meters: f64, time_seconds: f64) -> Result<Self> {
        ensure_distance(distance_meters)?;
        ensure_time(time_seconds)?;
        Ok(Self {
            distance_meters,
            time_seconds,
        })
    }

    pub fn pace(&self, unit: DistanceUnit) -> f64 {
        pace_per_unit(self.time_seconds, self.distance_meters, unit)
    }
}

/// Pace band for a training zone, in seconds per `unit`.
///
/// `slow` is always the larger number. Single-value zones have `slow == fast`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    pub slow: f64,
    pub fast: f64,
    pub unit: DistanceUnit,
}

impl PaceRange {
    pub fn new(slow: f64, fast: f64, unit: DistanceUnit) -> Self {
        Self { slow, fast, unit }
    }

    pub fn single(pace: f64, unit: DistanceUnit) -> Self {
        Self {
            slow: pace,
            fast: pace,
            unit,
        }
    }

    pub fn is_single(&self) -> bool {
        self.slow == self.fast
    }

    /// Human-readable band, `fast - slow` or a single pace
    pub fn display(&self) -> String {
        format_pace_range(self.fast, self.slow, self.unit)
    }
}

/// Predicted (or actual) result at a reference distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalentPerformance {
    pub label: String,
    pub distance_meters: f64,
    pub time_seconds: f64,
    pub pace_per_km: f64,
    pub pace_per_mile: f64,
}

impl EquivalentPerformance {
    pub fn new(label: impl Into<String>, distance_meters: f64, time_seconds: f64) -> Self {
        Self {
            label: label.into(),
            distance_meters,
            time_seconds,
            pace_per_km: pace_per_unit(time_seconds, distance_meters, DistanceUnit::Kilometers),
            pace_per_mile: pace_per_unit(time_seconds, distance_meters, DistanceUnit::Miles),
        }
    }

    pub fn formatted_time(&self) -> String {
        format_time(self.time_seconds)
    }

    pub fn formatted_pace(&self, unit: DistanceUnit) -> String {
        match unit {
            DistanceUnit::Miles => format_pace(self.pace_per_mile, unit),
            _ => format_pace(self.pace_per_km, DistanceUnit::Kilometers),
        }
    }
}

/// Split paces of the input performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePaceBreakdown {
    pub label: String,
    pub distance_meters: f64,
    pub total_time: f64,
    pub pace_per_km: f64,
    pub pace_per_mile: f64,
    pub pace_per_800m: f64,
    pub pace_per_400m: f64,
}

impl RacePaceBreakdown {
    pub fn new(label: impl Into<String>, distance_meters: f64, time_seconds: f64) -> Self {
        Self {
            label: label.into(),
            distance_meters,
            total_time: time_seconds,
            pace_per_km: pace_per_unit(time_seconds, distance_meters, DistanceUnit::Kilometers),
            pace_per_mile: pace_per_unit(time_seconds, distance_meters, DistanceUnit::Miles),
            pace_per_800m: time_seconds / (distance_meters / 800.0),
            pace_per_400m: time_seconds / (distance_meters / 400.0),
        }
    }
}
