use super::HansonsCalculator;
use crate::error::{ensure_distance, ensure_time, Result};
use crate::distances::{HANSONS_EQUIVALENT_DISTANCES, LABEL_TOLERANCE_METERS};
use crate::models::EquivalentPerformance;

/// Riegel endurance exponent
pub const RIEGEL_EXPONENT: f64 = 1.06;

impl HansonsCalculator {
    /// Riegel prediction `T2 = T1 × (D2 / D1)^1.06`
    pub fn riegel_time(time_seconds: f64, distance_meters: f64, target_distance_meters: f64) -> f64 {
        time_seconds * (target_distance_meters / distance_meters).powf(RIEGEL_EXPONENT)
    }

    /// Equivalent performances at the Hansons reference distances, ascending.
    /// The input distance itself is left out.
    pub fn derive_equivalent_performances(
        time_seconds: f64,
        input_distance_meters: f64,
    ) -> Result<Vec<EquivalentPerformance>> {
        ensure_distance(input_distance_meters)?;
        ensure_time(time_seconds)?;

        let mut performances: Vec<EquivalentPerformance> = HANSONS_EQUIVALENT_DISTANCES
            .iter()
            .filter(|race| (race.meters - input_distance_meters).abs() >= LABEL_TOLERANCE_METERS)
            .map(|race| {
                let predicted = Self::riegel_time(time_seconds, input_distance_meters, race.meters);
                EquivalentPerformance::new(race.label, race.meters, predicted)
            })
            .collect();

        performances.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        Ok(performances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_distance_is_excluded() {
        let table = HansonsCalculator::derive_equivalent_performances(2400.0, 10000.0).unwrap();
        assert_eq!(table.len(), 18);
        assert!(table.iter().all(|e| e.label != "10K"));
    }

    #[test]
    fn test_non_table_distance_keeps_all_rows() {
        let table = HansonsCalculator::derive_equivalent_performances(2000.0, 7000.0).unwrap();
        assert_eq!(table.len(), 19);
        assert_eq!(table.first().unwrap().label, "1 Mile");
        assert_eq!(table.last().unwrap().label, "Marathon");
    }

    #[test]
    fn test_riegel_prediction() {
        let table = HansonsCalculator::derive_equivalent_performances(1200.0, 5000.0).unwrap();
        let ten_k = table.iter().find(|e| e.label == "10K").unwrap();
        let expected = 1200.0 * 2.0_f64.powf(1.06);
        assert!((ten_k.time_seconds - expected).abs() < 1e-9);
        assert!((ten_k.pace_per_km - expected / 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_times_increase_with_distance() {
        let table = HansonsCalculator::derive_equivalent_performances(10800.0, 42195.0).unwrap();
        for pair in table.windows(2) {
            assert!(pair[0].distance_meters < pair[1].distance_meters);
            assert!(pair[0].time_seconds < pair[1].time_seconds);
        }
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        let err = HansonsCalculator::derive_equivalent_performances(2400.0, -10.0).unwrap_err();
        assert_eq!(err.kind(), Some("invalid_distance"));
        let err = HansonsCalculator::derive_equivalent_performances(0.0, 10000.0).unwrap_err();
        assert_eq!(err.kind(), Some("invalid_time"));
    }
}
