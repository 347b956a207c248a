//! Time and pace formatting helpers

use crate::error::{Result, RunCalcError};
use crate::units::DistanceUnit;

/// Format seconds as `H:MM:SS`, or `M:SS` under an hour. Fractions are truncated.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format seconds with tenths, e.g. `6:51.9` or `1:02:03.4`.
pub fn format_time_with_decimal(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--.-".to_string();
    }

    // Round once to tenths so 59.96 becomes 1:00.0 rather than 0:60.0
    let tenths = (seconds * 10.0).round() as u64;
    let total = tenths / 10;
    let fraction = tenths % 10;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{}", hours, minutes, secs, fraction)
    } else {
        format!("{}:{:02}.{}", minutes, secs, fraction)
    }
}

/// Format a pace in seconds per `unit`, e.g. `4:00/km`. Paces of an hour or
/// more per unit roll over into hours.
pub fn format_pace(seconds_per_unit: f64, unit: DistanceUnit) -> String {
    if !seconds_per_unit.is_finite() || seconds_per_unit < 0.0 {
        return format!("--:--{}", unit.pace_suffix());
    }

    let total = seconds_per_unit.floor() as u64;
    let minutes = total / 60;
    let secs = total % 60;

    if minutes >= 60 {
        format!(
            "{}:{:02}:{:02}{}",
            minutes / 60,
            minutes % 60,
            secs,
            unit.pace_suffix()
        )
    } else {
        format!("{}:{:02}{}", minutes, secs, unit.pace_suffix())
    }
}

/// Format a pace range as `fast - slow`.
pub fn format_pace_range(fast: f64, slow: f64, unit: DistanceUnit) -> String {
    if (fast - slow).abs() < f64::EPSILON {
        return format_pace(fast, unit);
    }
    let fast = format_pace(fast, unit);
    let slow = format_pace(slow, unit);
    // Suffix only once: "4:36 - 5:00/km"
    let fast = fast.trim_end_matches(unit.pace_suffix());
    format!("{} - {}", fast, slow)
}

/// Parse `H:MM:SS`, `MM:SS` or plain seconds. The last component may carry a
/// fraction (`2:45.5`).
pub fn parse_time(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RunCalcError::Validation("empty time".to_string()));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() > 3 {
        return Err(RunCalcError::Validation(format!(
            "time '{}' has too many components",
            input
        )));
    }

    let mut total = 0.0;
    for (index, part) in parts.iter().enumerate() {
        let is_last = index == parts.len() - 1;
        let value: f64 = part.trim().parse().map_err(|_| {
            RunCalcError::Validation(format!("time '{}' is not H:MM:SS, MM:SS or seconds", input))
        })?;

        if value < 0.0 || (!is_last && value.fract() != 0.0) {
            return Err(RunCalcError::Validation(format!("time '{}' is malformed", input)));
        }
        // Every component after the first is bounded by its parent unit
        if index > 0 && value >= 60.0 {
            return Err(RunCalcError::Validation(format!(
                "time '{}' has a component of 60 or more",
                input
            )));
        }
        total = total * 60.0 + value;
    }

    Ok(total)
}
