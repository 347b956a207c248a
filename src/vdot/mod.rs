//! Jack Daniels' VDOT model
//!
//! Estimates aerobic fitness (VDOT) from a single race and projects it onto
//! other distances and training intensities. All coefficients come from
//! Daniels & Gilbert's oxygen-cost and drop-dead curves as published in
//! *Daniels' Running Formula*; they are reproduced verbatim, not refitted.
//!
//! Units: the formulas work in meters and minutes; every public function
//! takes and returns meters and seconds.

pub mod environment;
pub mod equivalents;
pub mod paces;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distances::vdot_label;
use crate::error::{ensure_distance, ensure_time, CalculationError, Result};
use crate::models::{EquivalentPerformance, RacePaceBreakdown};
use crate::units::{minutes_to_seconds, seconds_to_minutes};

pub use environment::{DisplayMode, EnvironmentConditions, EnvironmentalAdjustment};
pub use paces::TrainingPaceSet;

// Oxygen cost of running (ml/kg/min) at velocity v (m/min):
// VO2 = -4.60 + 0.182258·v + 0.000104·v²  (Daniels' Running Formula)
pub const VO2_INTERCEPT: f64 = -4.6;
pub const VO2_LINEAR: f64 = 0.182258;
pub const VO2_QUADRATIC: f64 = 0.000104;

// Fraction of VO2max sustainable for t minutes (drop-dead curve):
// 0.8 + 0.298956·e^(-0.193261·t) + 0.189439·e^(-0.012778·t)
pub const FATIGUE_BASE: f64 = 0.8;
pub const FATIGUE_FAST_AMPLITUDE: f64 = 0.298956;
pub const FATIGUE_FAST_RATE: f64 = 0.193261;
pub const FATIGUE_SLOW_AMPLITUDE: f64 = 0.189439;
pub const FATIGUE_SLOW_RATE: f64 = 0.012778;

// Velocity (m/min) at a given VDOT, the inverse of the oxygen-cost curve:
// v = 29.54 + 5.000663·vdot - 0.007546·vdot²
pub const VELOCITY_INTERCEPT: f64 = 29.54;
pub const VELOCITY_LINEAR: f64 = 5.000663;
pub const VELOCITY_QUADRATIC: f64 = -0.007546;

// The reference race-time solver uses rounded forms of two coefficients.
// Kept as-is so predictions match the published calculator.
const NEWTON_VELOCITY_QUADRATIC: f64 = -0.0075;
const NEWTON_FAST_RATE: f64 = 0.19326;
const NEWTON_ITERATIONS: usize = 3;

/// Distances below this are corrected for anaerobic contribution
pub const SHORT_DISTANCE_LIMIT_METERS: f64 = 1200.0;
const MIDDLE_DISTANCE_LIMIT_METERS: f64 = 800.0;
const SHORT_DISTANCE_BASIS_METERS: f64 = 1600.0;

/// Below this VDOT the fast training zones use the slow-runner adjustment
pub const SLOW_VDOT_LIMIT: f64 = 39.0;

/// Exclusive upper bound of the supported VDOT range
pub const MAX_VDOT: f64 = 100.0;

/// Complete VDOT calculation for one performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdotResult {
    pub vdot: f64,
    pub training_paces: TrainingPaceSet,
    pub equivalent_performances: Vec<EquivalentPerformance>,
    pub race_pace_breakdown: RacePaceBreakdown,
}

/// VDOT engine
pub struct VdotCalculator;

impl VdotCalculator {
    /// Validate a performance, derive its VDOT and build every table from it.
    ///
    /// Fails with `invalid_distance`/`invalid_time` for non-positive input, and
    /// with `vdot_too_low`/`vdot_too_high` when the result leaves (0, 100).
    pub fn calculate_vdot(distance_meters: f64, time_seconds: f64) -> Result<VdotResult> {
        let vdot = Self::estimate_vdot(distance_meters, time_seconds)?;
        Self::validate_vdot(vdot)?;

        debug!(distance_meters, time_seconds, vdot, "Estimated VDOT");

        let training_paces = Self::build_training_paces(vdot)?;
        let equivalent_performances =
            Self::build_equivalent_table(vdot, distance_meters, time_seconds)?;
        let race_pace_breakdown = Self::race_pace_breakdown(distance_meters, time_seconds)?;

        Ok(VdotResult {
            vdot,
            training_paces,
            equivalent_performances,
            race_pace_breakdown,
        })
    }

    /// Estimate VDOT from a race performance.
    ///
    /// The result is not range-checked; see [`VdotCalculator::validate_vdot`].
    pub fn estimate_vdot(distance_meters: f64, time_seconds: f64) -> Result<f64> {
        ensure_distance(distance_meters)?;
        ensure_time(time_seconds)?;
        Ok(Self::raw_vdot(distance_meters, time_seconds))
    }

    /// Accept VDOT values strictly between 0 and 100.
    pub fn validate_vdot(vdot: f64) -> std::result::Result<f64, CalculationError> {
        if vdot.is_nan() || vdot <= 0.0 {
            Err(CalculationError::VdotTooLow { vdot })
        } else if vdot >= MAX_VDOT {
            Err(CalculationError::VdotTooHigh { vdot })
        } else {
            Ok(vdot)
        }
    }

    /// Predict the race time (seconds) at `target_distance_meters` for a VDOT.
    ///
    /// There is no closed form, so the drop-dead/oxygen-cost system is solved
    /// with a fixed three-step Newton iteration from `distance / (4·vdot)`
    /// minutes. Distances under 1200 m are solved on the 1600 m basis and scaled
    /// back by the same ratio [`VdotCalculator::estimate_vdot`] applies, which
    /// makes the round trip approximate in that range.
    pub fn predict_time(vdot: f64, target_distance_meters: f64) -> Result<f64> {
        Self::validate_vdot(vdot)?;
        ensure_distance(target_distance_meters)?;
        Ok(Self::raw_predicted_time(vdot, target_distance_meters))
    }

    /// Velocity in meters per minute sustainable at `vdot`
    pub fn velocity_from_vdot(vdot: f64) -> f64 {
        VELOCITY_INTERCEPT + VELOCITY_LINEAR * vdot + VELOCITY_QUADRATIC * vdot.powi(2)
    }

    /// Time in seconds to cover `distance_meters` at `effort_fraction` of `vdot`
    pub fn effort_pace(vdot: f64, distance_meters: f64, effort_fraction: f64) -> f64 {
        let velocity = Self::velocity_from_vdot(vdot * effort_fraction);
        minutes_to_seconds(distance_meters / velocity)
    }

    /// Split paces (per km, mile, 800 m, 400 m) of the input performance
    pub fn race_pace_breakdown(distance_meters: f64, time_seconds: f64) -> Result<RacePaceBreakdown> {
        ensure_distance(distance_meters)?;
        ensure_time(time_seconds)?;
        Ok(RacePaceBreakdown::new(
            vdot_label(distance_meters),
            distance_meters,
            time_seconds,
        ))
    }

    /// Slow-runner VDOT used by the fast training zones below [`SLOW_VDOT_LIMIT`]
    pub fn slow_runner_vdot(vdot: f64) -> f64 {
        vdot * 2.0 / 3.0 + 13.0
    }

    pub fn is_slow_vdot(vdot: f64) -> bool {
        vdot < SLOW_VDOT_LIMIT
    }

    /// Oxygen cost (ml/kg/min) at `velocity` m/min
    pub fn vo2_from_velocity(velocity: f64) -> f64 {
        VO2_INTERCEPT + VO2_LINEAR * velocity + VO2_QUADRATIC * velocity.powi(2)
    }

    /// Fraction of VO2max sustainable for `time_minutes`
    pub fn fatigue_factor(time_minutes: f64) -> f64 {
        FATIGUE_BASE
            + FATIGUE_FAST_AMPLITUDE * (-FATIGUE_FAST_RATE * time_minutes).exp()
            + FATIGUE_SLOW_AMPLITUDE * (-FATIGUE_SLOW_RATE * time_minutes).exp()
    }

    pub(crate) fn raw_vdot(distance_meters: f64, time_seconds: f64) -> f64 {
        let time_minutes = seconds_to_minutes(time_seconds);
        let speed = Self::speed_parameter(distance_meters, time_minutes);
        Self::vo2_from_velocity(speed) / Self::fatigue_factor(time_minutes)
    }

    /// Speed (m/min) fed into the oxygen-cost curve. Under 1200 m the time is
    /// first stretched to a 1600 m equivalent.
    fn speed_parameter(distance_meters: f64, time_minutes: f64) -> f64 {
        if distance_meters >= SHORT_DISTANCE_LIMIT_METERS {
            distance_meters / time_minutes
        } else {
            SHORT_DISTANCE_BASIS_METERS / (time_minutes * Self::short_distance_ratio(distance_meters))
        }
    }

    /// Ratio of 1600 m-equivalent time to actual time for short distances
    fn short_distance_ratio(distance_meters: f64) -> f64 {
        if distance_meters > MIDDLE_DISTANCE_LIMIT_METERS {
            let ratio = SHORT_DISTANCE_BASIS_METERS / distance_meters;
            let extra = (SHORT_DISTANCE_BASIS_METERS - distance_meters) / MIDDLE_DISTANCE_LIMIT_METERS;
            ratio + 0.1 * extra
        } else {
            (MIDDLE_DISTANCE_LIMIT_METERS / distance_meters) * 2.1
        }
    }

    pub(crate) fn raw_predicted_time(vdot: f64, target_distance_meters: f64) -> f64 {
        if target_distance_meters < SHORT_DISTANCE_LIMIT_METERS {
            let basis_minutes = Self::solve_race_minutes(vdot, SHORT_DISTANCE_BASIS_METERS);
            let ratio = Self::short_distance_ratio(target_distance_meters);
            return minutes_to_seconds(basis_minutes / ratio);
        }

        minutes_to_seconds(Self::solve_race_minutes(vdot, target_distance_meters))
    }

    /// Newton's method on t - d / v(vdot · fatigue(t)) = 0, in minutes
    fn solve_race_minutes(vdot: f64, distance_meters: f64) -> f64 {
        let mut time_minutes = distance_meters / (4.0 * vdot);

        for _ in 0..NEWTON_ITERATIONS {
            let fast_decay = (-FATIGUE_FAST_RATE * time_minutes).exp();
            let slow_decay = (-FATIGUE_SLOW_RATE * time_minutes).exp();
            let fatigue = FATIGUE_FAST_AMPLITUDE * fast_decay
                + FATIGUE_SLOW_AMPLITUDE * slow_decay
                + FATIGUE_BASE;

            let sustained = vdot * fatigue;
            let velocity = NEWTON_VELOCITY_QUADRATIC * sustained.powi(2)
                + VELOCITY_LINEAR * sustained
                + VELOCITY_INTERCEPT;

            // -d(fatigue)/dt, then the chain rule through the velocity curve
            let fatigue_slope = FATIGUE_FAST_AMPLITUDE * fast_decay * NEWTON_FAST_RATE
                + FATIGUE_SLOW_AMPLITUDE * slow_decay * FATIGUE_SLOW_RATE;
            let derivative = fatigue_slope * vdot * VELOCITY_LINEAR
                + fatigue * fatigue_slope * vdot * VELOCITY_QUADRATIC * 3.0;

            let factor = distance_meters * derivative / velocity.powi(2) + 1.0;
            time_minutes -= (time_minutes - distance_meters / velocity) / factor;
        }

        time_minutes
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
    fn test_vdot_20_minute_5k() {
        let vdot = VdotCalculator::estimate_vdot(5000.0, 1200.0).unwrap();
        assert_close(vdot, 49.81, 0.01);
    }

    #[test]
    fn test_vdot_reference_performances() {
        assert_close(VdotCalculator::estimate_vdot(10000.0, 2400.0).unwrap(), 51.94, 0.01);
        assert_close(VdotCalculator::estimate_vdot(42195.0, 10800.0).unwrap(), 53.53, 0.01);
        assert_close(VdotCalculator::estimate_vdot(3000.0, 600.0).unwrap(), 58.85, 0.01);
    }

    #[test]
    fn test_short_distance_correction() {
        // 800 m and below stretch time by (800/d)·2.1 onto a 1600 m basis
        assert_close(VdotCalculator::estimate_vdot(800.0, 120.0).unwrap(), 67.29, 0.01);
        // (800, 1200) blends toward 1600 m
        assert_close(VdotCalculator::estimate_vdot(1000.0, 170.0).unwrap(), 59.42, 0.01);
        assert_close(VdotCalculator::short_distance_ratio(800.0), 2.1, 1e-12);
        assert_close(VdotCalculator::short_distance_ratio(800.0001), 2.1, 1e-4);
    }

    #[test]
    fn test_estimate_rejects_invalid_input() {
        let err = VdotCalculator::estimate_vdot(0.0, 1200.0).unwrap_err();
        assert_eq!(err.kind(), Some("invalid_distance"));

        let err = VdotCalculator::estimate_vdot(5000.0, 0.0).unwrap_err();
        assert_eq!(err.kind(), Some("invalid_time"));
    }

    #[test]
    fn test_calculate_vdot_range_checks() {
        // 10:00 5K is beyond the model
        let err = VdotCalculator::calculate_vdot(5000.0, 600.0).unwrap_err();
        assert_eq!(err.kind(), Some("vdot_too_high"));

        // Ten hours for 5K drives VO2 negative
        let err = VdotCalculator::calculate_vdot(5000.0, 36000.0).unwrap_err();
        assert_eq!(err.kind(), Some("vdot_too_low"));
    }

    #[test]
    fn test_calculate_vdot_result() {
        let result = VdotCalculator::calculate_vdot(5000.0, 1200.0).unwrap();
        assert_close(result.vdot, 49.81, 0.01);
        assert_eq!(result.equivalent_performances.len(), 12);
        assert_eq!(result.race_pace_breakdown.label, "5K");
        assert_close(result.race_pace_breakdown.pace_per_km, 240.0, 1e-9);
    }

    #[test]
    fn test_predict_time_reference_values() {
        let vdot = VdotCalculator::estimate_vdot(5000.0, 1200.0).unwrap();
        assert_close(VdotCalculator::predict_time(vdot, 10000.0).unwrap(), 2488.9, 0.1);
        assert_close(VdotCalculator::predict_time(vdot, 42195.0).unwrap(), 11483.2, 0.1);
        assert_close(VdotCalculator::predict_time(vdot, 1500.0).unwrap(), 325.3, 0.1);
    }

    #[test]
    fn test_predict_time_short_distances() {
        let vdot = VdotCalculator::estimate_vdot(5000.0, 1200.0).unwrap();
        let t800 = VdotCalculator::predict_time(vdot, 800.0).unwrap();
        let t1000 = VdotCalculator::predict_time(vdot, 1000.0).unwrap();
        let t1500 = VdotCalculator::predict_time(vdot, 1500.0).unwrap();

        assert_close(t800, 166.3, 0.1);
        assert!(t800 < t1000 && t1000 < t1500);
    }

    #[test]
    fn test_predict_time_across_short_distance_switch() {
        for vdot in [30.0, 49.81, 70.0, 85.0] {
            let t800 = VdotCalculator::predict_time(vdot, 800.0).unwrap();
            let t1199 = VdotCalculator::predict_time(vdot, 1199.0).unwrap();
            let t1200 = VdotCalculator::predict_time(vdot, 1200.0).unwrap();
            let t1201 = VdotCalculator::predict_time(vdot, 1201.0).unwrap();

            assert!(t800 < t1199, "vdot {vdot}: {t800} vs {t1199}");
            assert!(t1199 < t1200, "vdot {vdot}: {t1199} vs {t1200}");
            assert!(t1200 < t1201, "vdot {vdot}: {t1200} vs {t1201}");
        }

        assert_close(VdotCalculator::predict_time(49.81, 800.0).unwrap(), 166.28, 0.05);
        assert_close(VdotCalculator::predict_time(49.81, 1199.0).unwrap(), 252.21, 0.05);
        assert_close(VdotCalculator::predict_time(49.81, 1200.0).unwrap(), 254.53, 0.05);
    }

    #[test]
    fn test_predict_time_validation() {
        assert!(VdotCalculator::predict_time(0.0, 5000.0).is_err());
        assert!(VdotCalculator::predict_time(120.0, 5000.0).is_err());
        assert!(VdotCalculator::predict_time(50.0, -1.0).is_err());
    }

    #[test]
    fn test_velocity_and_effort() {
        assert_close(VdotCalculator::velocity_from_vdot(0.0), 29.54, 1e-12);
        // 100% effort at VDOT 50 over 1 km
        let velocity = VdotCalculator::velocity_from_vdot(50.0);
        assert_close(
            VdotCalculator::effort_pace(50.0, 1000.0, 1.0),
            1000.0 / velocity * 60.0,
            1e-9,
        );
        assert!(
            VdotCalculator::effort_pace(50.0, 1000.0, 0.7)
                > VdotCalculator::effort_pace(50.0, 1000.0, 0.9)
        );
    }

    #[test]
    fn test_fatigue_factor_decays() {
        assert_close(VdotCalculator::fatigue_factor(0.0), 1.288395, 1e-9);
        assert!(VdotCalculator::fatigue_factor(20.0) > VdotCalculator::fatigue_factor(180.0));
        assert!(VdotCalculator::fatigue_factor(600.0) > FATIGUE_BASE);
        assert!(VdotCalculator::fatigue_factor(10_000.0) >= FATIGUE_BASE);
    }

    #[test]
    fn test_slow_runner_vdot() {
        assert_close(VdotCalculator::slow_runner_vdot(30.0), 33.0, 1e-12);
        assert!(VdotCalculator::is_slow_vdot(38.9));
        assert!(!VdotCalculator::is_slow_vdot(39.0));
    }
}
