// Library interface for RunCalc
// Integration tests and benchmarks use the engines through this crate root

pub mod config;
pub mod distances;
pub mod error;
pub mod format;
pub mod hansons;
pub mod improvement;
pub mod logging;
pub mod models;
pub mod units;
pub mod vdot;

// Re-export commonly used types for convenience
pub use models::*;
pub use error::{CalculationError, ErrorSeverity, Result, RunCalcError};
pub use hansons::{HansonsCalculator, HansonsResult, HansonsZone, WeatherConditions};
pub use improvement::{ImprovementCalculator, ImprovementResult};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use units::{AltitudeUnit, DistanceUnit, TemperatureUnit, Units, WindUnit};
pub use vdot::{
    DisplayMode, EnvironmentConditions, EnvironmentalAdjustment, TrainingPaceSet, VdotCalculator,
    VdotResult,
};
