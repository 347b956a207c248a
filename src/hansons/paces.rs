//! Hansons training zones as fixed multiples of the base race pace

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::HansonsCalculator;
use crate::error::{self, ensure_distance, ensure_time};
use crate::models::PaceRange;
use crate::units::{per_km_to_per_mile, DistanceUnit, METERS_PER_KILOMETER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HansonsZone {
    Easy,
    Moderate,
    LongRuns,
    Speed,
    Vo2max,
    Threshold,
    Strength,
    HalfMarathonTempo,
    MarathonTempo,
    Strides,
}

impl HansonsZone {
    /// All zones in display order
    pub const ALL: [HansonsZone; 10] = [
        HansonsZone::Easy,
        HansonsZone::Moderate,
        HansonsZone::LongRuns,
        HansonsZone::Speed,
        HansonsZone::Vo2max,
        HansonsZone::Threshold,
        HansonsZone::Strength,
        HansonsZone::HalfMarathonTempo,
        HansonsZone::MarathonTempo,
        HansonsZone::Strides,
    ];

    /// Stable machine key
    pub fn key(&self) -> &'static str {
        match self {
            HansonsZone::Easy => "easy",
            HansonsZone::Moderate => "moderate",
            HansonsZone::LongRuns => "long_runs",
            HansonsZone::Speed => "speed",
            HansonsZone::Vo2max => "vo2max",
            HansonsZone::Threshold => "threshold",
            HansonsZone::Strength => "strength",
            HansonsZone::HalfMarathonTempo => "half_marathon_tempo",
            HansonsZone::MarathonTempo => "marathon_tempo",
            HansonsZone::Strides => "strides",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HansonsZone::Easy => "Easy",
            HansonsZone::Moderate => "Moderate",
            HansonsZone::LongRuns => "Long Runs",
            HansonsZone::Speed => "Speed Workouts",
            HansonsZone::Vo2max => "VO₂max Workouts",
            HansonsZone::Threshold => "Lactate Threshold",
            HansonsZone::Strength => "Strength Workouts",
            HansonsZone::HalfMarathonTempo => "Half Mar Tempos",
            HansonsZone::MarathonTempo => "Marathon Tempos",
            HansonsZone::Strides => "Strides",
        }
    }

    /// Multipliers of the base pace as `(fast, slow)`; equal for single-value zones
    pub fn multipliers(&self) -> (f64, f64) {
        match self {
            HansonsZone::Easy => (1.15, 1.25),
            HansonsZone::Moderate => (1.08, 1.15),
            HansonsZone::LongRuns => (1.10, 1.20),
            HansonsZone::Speed => (0.85, 0.95),
            HansonsZone::Vo2max => (0.90, 0.98),
            HansonsZone::Threshold => (0.95, 1.05),
            HansonsZone::Strength => (0.85, 0.85),
            HansonsZone::HalfMarathonTempo => (1.05, 1.05),
            HansonsZone::MarathonTempo => (1.00, 1.00),
            HansonsZone::Strides => (0.65, 0.75),
        }
    }

    pub fn is_range(&self) -> bool {
        let (fast, slow) = self.multipliers();
        fast != slow
    }
}

impl FromStr for HansonsZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase().replace(['-', ' '], "_");
        HansonsZone::ALL
            .into_iter()
            .find(|zone| zone.key() == key)
            .ok_or_else(|| format!("Invalid Hansons zone: {}", s))
    }
}

impl fmt::Display for HansonsZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One Hansons zone in both pace units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HansonsTrainingPace {
    pub zone: HansonsZone,
    pub per_km: PaceRange,
    pub per_mile: PaceRange,
    pub is_range: bool,
}

impl HansonsTrainingPace {
    pub fn pace(&self, unit: DistanceUnit) -> &PaceRange {
        match unit {
            DistanceUnit::Miles => &self.per_mile,
            _ => &self.per_km,
        }
    }
}

impl HansonsCalculator {
    /// The ten zones derived from `time_seconds` over `distance_meters`
    pub fn derive_training_paces(
        time_seconds: f64,
        distance_meters: f64,
    ) -> error::Result<Vec<HansonsTrainingPace>> {
        ensure_distance(distance_meters)?;
        ensure_time(time_seconds)?;

        let base_per_km = time_seconds / (distance_meters / METERS_PER_KILOMETER);
        let base_per_mile = per_km_to_per_mile(base_per_km);

        Ok(HansonsZone::ALL
            .iter()
            .map(|&zone| {
                let (fast, slow) = zone.multipliers();
                HansonsTrainingPace {
                    zone,
                    per_km: PaceRange::new(
                        base_per_km * slow,
                        base_per_km * fast,
                        DistanceUnit::Kilometers,
                    ),
                    per_mile: PaceRange::new(
                        base_per_mile * slow,
                        base_per_mile * fast,
                        DistanceUnit::Miles,
                    ),
                    is_range: zone.is_range(),
                }
            })
            .collect())
    }
}
