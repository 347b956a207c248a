use super::VdotCalculator;
use crate::distances::VDOT_RACE_DISTANCES;
use crate::error::{ensure_distance, ensure_time, Result};
use crate::models::EquivalentPerformance;

/// Distances within this of the input race reuse the input time
pub const INPUT_MATCH_TOLERANCE_METERS: f64 = 5.0;

impl VdotCalculator {
    /// Equivalent performances at the twelve VDOT reference distances, in table
    /// order. The row matching the input distance carries the input time
    /// unchanged; every other row is predicted from `vdot`.
    pub fn build_equivalent_table(
        vdot: f64,
        input_distance_meters: f64,
        input_time_seconds: f64,
    ) -> Result<Vec<EquivalentPerformance>> {
        Self::validate_vdot(vdot)?;
        ensure_distance(input_distance_meters)?;
        ensure_time(input_time_seconds)?;

        let table = VDOT_RACE_DISTANCES
            .iter()
            .map(|race| {
                let is_input =
                    (race.meters - input_distance_meters).abs() < INPUT_MATCH_TOLERANCE_METERS;
                let time = if is_input {
                    input_time_seconds
                } else {
                    Self::raw_predicted_time(vdot, race.meters)
                };
                EquivalentPerformance::new(race.label, race.meters, time)
            })
            .collect();

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape_and_order() {
        let vdot = VdotCalculator::estimate_vdot(5000.0, 1200.0).unwrap();
        let table = VdotCalculator::build_equivalent_table(vdot, 5000.0, 1200.0).unwrap();

        assert_eq!(table.len(), 12);
        let labels: Vec<&str> = table.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Marathon", "Half-Marathon", "15K", "10K", "5K", "3Mi", "2Mi", "3200m", "3K",
                "1Mi", "1600m", "1500m"
            ]
        );
    }

    #[test]
    fn test_input_row_keeps_original_time() {
        let vdot = VdotCalculator::estimate_vdot(5000.0, 1200.0).unwrap();
        let table = VdotCalculator::build_equivalent_table(vdot, 5003.0, 1200.0).unwrap();

        let five_k = table.iter().find(|e| e.label == "5K").unwrap();
        assert_eq!(five_k.time_seconds, 1200.0);
        assert!((five_k.pace_per_km - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_input_rows_are_predicted() {
        let vdot = VdotCalculator::estimate_vdot(5000.0, 1200.0).unwrap();
        let table = VdotCalculator::build_equivalent_table(vdot, 5000.0, 1200.0).unwrap();

        let ten_k = table.iter().find(|e| e.label == "10K").unwrap();
        let predicted = VdotCalculator::predict_time(vdot, 10000.0).unwrap();
        assert_eq!(ten_k.time_seconds, predicted);

        // 1600 m and 1 mile are 9.3 m apart, so neither is treated as the input
        let mile = table.iter().find(|e| e.label == "1Mi").unwrap();
        let metric_mile = table.iter().find(|e| e.label == "1600m").unwrap();
        assert!(mile.time_seconds > metric_mile.time_seconds);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(VdotCalculator::build_equivalent_table(0.0, 5000.0, 1200.0).is_err());
        assert!(VdotCalculator::build_equivalent_table(50.0, 0.0, 1200.0).is_err());
        assert!(VdotCalculator::build_equivalent_table(50.0, 5000.0, 0.0).is_err());
    }
}
