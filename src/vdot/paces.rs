//! Training paces at fixed fractions of VDOT
//!
//! | Zone       | %VDOT  | Slow-runner handling (VDOT < 39)      |
//! |------------|--------|---------------------------------------|
//! | Easy       | 62-70% | slow-runner VDOT                      |
//! | Marathon   | 84%    | none                                  |
//! | Threshold  | 88%    | average of VDOT and slow-runner VDOT  |
//! | Interval   | 97.5%  | slow-runner VDOT                      |
//! | Repetition | Interval - 6 s per 400 m                        |
//! | Fast Reps  | Repetition - 4 s per 200 m                      |

use serde::{Deserialize, Serialize};

use super::VdotCalculator;
use crate::error::Result;
use crate::models::PaceRange;
use crate::units::DistanceUnit;

pub const EASY_SLOW_EFFORT: f64 = 0.62;
pub const EASY_FAST_EFFORT: f64 = 0.70;
pub const MARATHON_EFFORT: f64 = 0.84;
pub const THRESHOLD_EFFORT: f64 = 0.88;
pub const INTERVAL_EFFORT: f64 = 0.975;

const REPETITION_SECONDS_PER_400M: f64 = 6.0;
const FAST_REPETITION_SECONDS_PER_200M: f64 = 4.0;

/// Daniels training zones for one VDOT, paces in seconds per unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPaceSet {
    pub easy: PaceRange,
    pub marathon: PaceRange,
    pub threshold: PaceRange,
    pub interval: PaceRange,
    pub repetition: PaceRange,
    pub fast_repetition: PaceRange,
}

impl TrainingPaceSet {
    /// Zones in display order with their names
    pub fn zones(&self) -> [(&'static str, &PaceRange); 6] {
        [
            ("Easy", &self.easy),
            ("Marathon", &self.marathon),
            ("Threshold", &self.threshold),
            ("Interval", &self.interval),
            ("Repetition", &self.repetition),
            ("Fast Reps", &self.fast_repetition),
        ]
    }
}

impl VdotCalculator {
    /// Training paces per kilometer
    pub fn build_training_paces(vdot: f64) -> Result<TrainingPaceSet> {
        Self::training_paces_per(vdot, DistanceUnit::Kilometers)
    }

    /// Training paces per `unit`; repetition offsets scale with the unit length
    pub fn training_paces_per(vdot: f64, unit: DistanceUnit) -> Result<TrainingPaceSet> {
        Self::validate_vdot(vdot)?;
        let meters = unit.meters();

        let repetition = Self::repetition_pace(vdot, meters);
        let fast_repetition = Self::fast_repetition_pace(vdot, meters);

        Ok(TrainingPaceSet {
            easy: PaceRange::new(
                Self::easy_pace(vdot, meters, true),
                Self::easy_pace(vdot, meters, false),
                unit,
            ),
            marathon: PaceRange::single(Self::marathon_pace(vdot, meters), unit),
            threshold: PaceRange::single(Self::threshold_pace(vdot, meters), unit),
            interval: PaceRange::single(Self::interval_pace(vdot, meters), unit),
            repetition: PaceRange::single(repetition, unit),
            fast_repetition: PaceRange::single(fast_repetition, unit),
        })
    }

    /// Easy running, 62% (slow bound) or 70% (fast bound) of VDOT
    pub fn easy_pace(vdot: f64, distance_meters: f64, slow_bound: bool) -> f64 {
        let effective = if Self::is_slow_vdot(vdot) {
            Self::slow_runner_vdot(vdot)
        } else {
            vdot
        };
        let effort = if slow_bound {
            EASY_SLOW_EFFORT
        } else {
            EASY_FAST_EFFORT
        };
        Self::effort_pace(effective, distance_meters, effort)
    }

    pub fn marathon_pace(vdot: f64, distance_meters: f64) -> f64 {
        Self::effort_pace(vdot, distance_meters, MARATHON_EFFORT)
    }

    pub fn threshold_pace(vdot: f64, distance_meters: f64) -> f64 {
        let effective = if Self::is_slow_vdot(vdot) {
            (vdot + Self::slow_runner_vdot(vdot)) / 2.0
        } else {
            vdot
        };
        Self::effort_pace(effective, distance_meters, THRESHOLD_EFFORT)
    }

    pub fn interval_pace(vdot: f64, distance_meters: f64) -> f64 {
        let effective = if Self::is_slow_vdot(vdot) {
            Self::slow_runner_vdot(vdot)
        } else {
            vdot
        };
        Self::effort_pace(effective, distance_meters, INTERVAL_EFFORT)
    }

    pub fn repetition_pace(vdot: f64, distance_meters: f64) -> f64 {
        Self::interval_pace(vdot, distance_meters)
            - distance_meters / 400.0 * REPETITION_SECONDS_PER_400M
    }

    pub fn fast_repetition_pace(vdot: f64, distance_meters: f64) -> f64 {
        Self::repetition_pace(vdot, distance_meters)
            - distance_meters / 200.0 * FAST_REPETITION_SECONDS_PER_200M
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} ± {}, got {}",
            expected,
            tolerance,
            actual
        );
    }

    #[test]
    fn test_paces_for_vdot_50_runner() {
        let vdot = VdotCalculator::estimate_vdot(5000.0, 1200.0).unwrap();
        let paces = VdotCalculator::build_training_paces(vdot).unwrap();

        assert_close(paces.easy.slow, 339.44, 0.01);
        assert_close(paces.easy.fast, 308.15, 0.01);
        assert_close(paces.marathon.fast, 266.02, 0.01);
        assert_close(paces.threshold.fast, 256.17, 0.01);
        assert_close(paces.interval.fast, 235.68, 0.01);
        assert_close(paces.repetition.fast, 220.68, 0.01);
        assert_close(paces.fast_repetition.fast, 200.68, 0.01);
        assert_eq!(paces.easy.unit, DistanceUnit::Kilometers);
    }

    #[test]
    fn test_repetition_offsets_per_km() {
        let paces = VdotCalculator::build_training_paces(55.0).unwrap();
        assert_close(paces.interval.fast - paces.repetition.fast, 15.0, 1e-9);
        assert_close(paces.repetition.fast - paces.fast_repetition.fast, 20.0, 1e-9);
    }

    #[test]
    fn test_slow_runner_adjustment() {
        let paces = VdotCalculator::build_training_paces(30.0).unwrap();
        assert_close(paces.easy.slow, 466.22, 0.01);
        assert_close(paces.marathon.fast, 397.97, 0.01);
        assert_close(paces.threshold.fast, 369.55, 0.01);
        assert_close(paces.interval.fast, 328.54, 0.01);

        // Without the adjustment the interval pace would be far slower
        assert!(paces.interval.fast < VdotCalculator::effort_pace(30.0, 1000.0, INTERVAL_EFFORT));
    }

    #[test]
    fn test_single_value_zones() {
        let paces = VdotCalculator::build_training_paces(45.0).unwrap();
        assert!(!paces.easy.is_single());
        assert!(paces.marathon.is_single());
        assert!(paces.fast_repetition.is_single());
        assert_eq!(paces.zones().len(), 6);
    }

    #[test]
    fn test_per_mile_paces() {
        let paces = VdotCalculator::training_paces_per(49.806, DistanceUnit::Miles).unwrap();
        assert_close(paces.easy.slow, 546.27, 0.05);
        assert_close(paces.repetition.fast, 355.15, 0.05);
        assert_eq!(paces.threshold.unit, DistanceUnit::Miles);
    }

    #[test]
    fn test_rejects_out_of_range_vdot() {
        assert!(VdotCalculator::build_training_paces(0.0).is_err());
        assert!(VdotCalculator::build_training_paces(100.0).is_err());
    }
}
