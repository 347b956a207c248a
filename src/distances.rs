//! Standard race distances
//!
//! The two engines project onto different reference tables: the VDOT table keeps
//! its published order (longest first), the Hansons table is ascending.

use crate::error::{Result, RunCalcError};
use crate::units::{DistanceUnit, METERS_PER_MILE};
use serde::Serialize;

/// A named reference distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaceDistance {
    pub label: &'static str,
    pub meters: f64,
}

const fn race(label: &'static str, meters: f64) -> RaceDistance {
    RaceDistance { label, meters }
}

pub const MARATHON_METERS: f64 = 42195.0;
pub const HALF_MARATHON_METERS: f64 = 21097.5;

/// Distances of the VDOT equivalent-performance table, in table order
pub const VDOT_RACE_DISTANCES: [RaceDistance; 12] = [
    race("Marathon", MARATHON_METERS),
    race("Half-Marathon", HALF_MARATHON_METERS),
    race("15K", 15000.0),
    race("10K", 10000.0),
    race("5K", 5000.0),
    race("3Mi", 3.0 * METERS_PER_MILE),
    race("2Mi", 2.0 * METERS_PER_MILE),
    race("3200m", 3200.0),
    race("3K", 3000.0),
    race("1Mi", METERS_PER_MILE),
    race("1600m", 1600.0),
    race("1500m", 1500.0),
];

/// Distances of the Hansons equivalent-performance table, ascending
pub const HANSONS_EQUIVALENT_DISTANCES: [RaceDistance; 19] = [
    race("1 Mile", METERS_PER_MILE),
    race("3K", 3000.0),
    race("2 Miles", 2.0 * METERS_PER_MILE),
    race("4K", 4000.0),
    race("3 Miles", 3.0 * METERS_PER_MILE),
    race("5K", 5000.0),
    race("6K", 6000.0),
    race("4 Miles", 4.0 * METERS_PER_MILE),
    race("8K", 8000.0),
    race("5 Miles", 5.0 * METERS_PER_MILE),
    race("10K", 10000.0),
    race("12K", 12000.0),
    race("15K", 15000.0),
    race("10 Miles", 10.0 * METERS_PER_MILE),
    race("20K", 20000.0),
    race("Half Marathon", HALF_MARATHON_METERS),
    race("25K", 25000.0),
    race("30K", 30000.0),
    race("Marathon", MARATHON_METERS),
];

/// Tolerance used when matching a distance to a table label
pub const LABEL_TOLERANCE_METERS: f64 = 1.0;

/// First entry of `table` within [`LABEL_TOLERANCE_METERS`] of `meters`
pub fn find_distance(table: &[RaceDistance], meters: f64) -> Option<&RaceDistance> {
    table
        .iter()
        .find(|race| (race.meters - meters).abs() < LABEL_TOLERANCE_METERS)
}

/// Label for a VDOT-table distance, or the distance in kilometers
pub fn vdot_label(meters: f64) -> String {
    match find_distance(&VDOT_RACE_DISTANCES, meters) {
        Some(race) => race.label.to_string(),
        None => format!("{:.3}km", meters / 1000.0),
    }
}

/// Label for a Hansons-table distance, or kilometers/meters for other distances
pub fn hansons_label(meters: f64) -> String {
    match find_distance(&HANSONS_EQUIVALENT_DISTANCES, meters) {
        Some(race) => race.label.to_string(),
        None if meters >= 1000.0 => format!("{:.3}km", meters / 1000.0),
        None => format!("{:.0}m", meters),
    }
}

/// Parse a race name (`5k`, `half`, `marathon`, `1mi`, `3200m`) or a number with
/// an optional `m`, `km` or `mi` suffix into meters.
pub fn parse_distance(input: &str) -> Result<f64> {
    let normalized = input.trim().to_lowercase().replace([' ', '_'], "");

    let named = match normalized.as_str() {
        "marathon" | "full" | "mar" => Some(MARATHON_METERS),
        "half" | "halfmarathon" | "half-marathon" | "hm" => Some(HALF_MARATHON_METERS),
        _ => None,
    };
    if let Some(meters) = named {
        return Ok(meters);
    }

    let split = normalized
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(normalized.len());
    let (number, suffix) = normalized.split_at(split);

    let value: f64 = number.parse().map_err(|_| {
        RunCalcError::Validation(format!("distance '{}' is not a race name or a number", input))
    })?;

    let unit = match suffix {
        "" | "m" => DistanceUnit::Meters,
        "k" | "km" => DistanceUnit::Kilometers,
        "mi" | "mile" | "miles" => DistanceUnit::Miles,
        other => {
            return Err(RunCalcError::Validation(format!(
                "unknown distance unit '{}' in '{}'",
                other, input
            )))
        }
    };

    Ok(value * unit.meters())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables() {
        assert_eq!(VDOT_RACE_DISTANCES.len(), 12);
        assert_eq!(HANSONS_EQUIVALENT_DISTANCES.len(), 19);
        assert!(HANSONS_EQUIVALENT_DISTANCES
            .windows(2)
            .all(|pair| pair[0].meters < pair[1].meters));
        assert_eq!(VDOT_RACE_DISTANCES[0].label, "Marathon");
        assert_eq!(VDOT_RACE_DISTANCES[11].label, "1500m");
    }

    #[test]
    fn test_labels() {
        assert_eq!(vdot_label(5000.0), "5K");
        assert_eq!(vdot_label(5000.5), "5K");
        assert_eq!(vdot_label(7000.0), "7.000km");
        assert_eq!(hansons_label(21097.49), "Half Marathon");
        assert_eq!(hansons_label(16093.0), "10 Miles");
        assert_eq!(hansons_label(7500.0), "7.500km");
        assert_eq!(hansons_label(800.0), "800m");
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance("marathon").unwrap(), 42195.0);
        assert_eq!(parse_distance("Half").unwrap(), 21097.5);
        assert_eq!(parse_distance("5k").unwrap(), 5000.0);
        assert_eq!(parse_distance("10K").unwrap(), 10000.0);
        assert_eq!(parse_distance("3200m").unwrap(), 3200.0);
        assert_eq!(parse_distance("1mi").unwrap(), METERS_PER_MILE);
        assert_eq!(parse_distance("1500").unwrap(), 1500.0);
        assert!((parse_distance("3.1 mi").unwrap() - 3.1 * METERS_PER_MILE).abs() < 1e-9);
        assert!(parse_distance("far").is_err());
        assert!(parse_distance("5 parsecs").is_err());
    }
}
