//! Goal times for fixed percentage improvements on a race result
//!
//! Arithmetic is done in `Decimal`, so whole-second inputs give exact times.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, Result, RunCalcError};
use crate::format::format_time;

/// Improvement steps in percent
pub const IMPROVEMENT_PERCENTAGES: [u32; 7] = [1, 2, 3, 4, 5, 7, 10];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementEntry {
    pub percentage: u32,
    pub improved_time_seconds: Decimal,
    pub improved_time_formatted: String,
    pub time_saved_seconds: Decimal,
    pub time_saved_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementResult {
    pub original_time_seconds: Decimal,
    pub original_time_formatted: String,
    pub improvements: Vec<ImprovementEntry>,
}

impl ImprovementResult {
    pub fn entry(&self, percentage: u32) -> Option<&ImprovementEntry> {
        self.improvements.iter().find(|e| e.percentage == percentage)
    }
}

pub struct ImprovementCalculator;

impl ImprovementCalculator {
    /// Improvement table for a time given as hours, minutes and seconds.
    ///
    /// Only the total is validated; it must be positive.
    pub fn calculate_improvement(
        hours: Decimal,
        minutes: Decimal,
        seconds: Decimal,
    ) -> Result<ImprovementResult> {
        let original = hours * dec!(3600) + minutes * dec!(60) + seconds;
        Self::from_seconds(original)
    }

    /// Improvement table for a time in seconds
    pub fn from_seconds(original: Decimal) -> Result<ImprovementResult> {
        if original <= Decimal::ZERO {
            return Err(CalculationError::InvalidTime {
                time: original.to_f64().unwrap_or_default(),
            }
            .into());
        }

        let improvements = IMPROVEMENT_PERCENTAGES
            .iter()
            .map(|&percentage| {
                let improved = Self::improved_time(original, percentage);
                let saved = original - improved;
                ImprovementEntry {
                    percentage,
                    improved_time_seconds: improved,
                    improved_time_formatted: format_decimal_time(improved),
                    time_saved_seconds: saved,
                    time_saved_formatted: format_decimal_time(saved),
                }
            })
            .collect();

        Ok(ImprovementResult {
            original_time_seconds: original,
            original_time_formatted: format_decimal_time(original),
            improvements,
        })
    }

    /// Convenience entry point for callers holding `f64` seconds
    pub fn from_seconds_f64(seconds: f64) -> Result<ImprovementResult> {
        let original = Decimal::from_f64(seconds).ok_or_else(|| {
            RunCalcError::Validation(format!("time {} cannot be represented exactly", seconds))
        })?;
        Self::from_seconds(original)
    }

    /// `original × (1 − percentage / 100)`
    pub fn improved_time(original: Decimal, percentage: u32) -> Decimal {
        original * (dec!(100) - Decimal::from(percentage)) / dec!(100)
    }
}

fn format_decimal_time(seconds: Decimal) -> String {
    format_time(seconds.floor().to_f64().unwrap_or_default())
}
