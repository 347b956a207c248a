use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use runcalc::config::{AppConfig, OutputFormat};
use runcalc::distances::parse_distance;
use runcalc::format::{format_pace, format_time, format_time_with_decimal, parse_time};
use runcalc::hansons::{HansonsCalculator, HansonsResult, WeatherConditions};
use runcalc::improvement::{ImprovementCalculator, ImprovementResult};
use runcalc::logging::init_logging;
use runcalc::units::{AltitudeUnit, DistanceUnit, TemperatureUnit, Units, WindUnit};
use runcalc::vdot::{
    DisplayMode, EnvironmentConditions, EnvironmentalAdjustment, VdotCalculator, VdotResult,
};
use runcalc::{ErrorSeverity, RunCalcError};

/// RunCalc - Running Performance Calculator
///
/// Estimates VDOT from a race, derives Daniels and Hansons training paces,
/// predicts equivalent race times and adjusts for race-day conditions.
#[derive(Parser)]
#[command(name = "runcalc")]
#[command(version)]
#[command(about = "Running performance calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// VDOT, training paces and equivalent performances for a race
    Vdot {
        /// Race distance (5k, half, marathon, 1mi, 3200m, 12.5km, ...)
        #[arg(short, long)]
        distance: String,

        /// Finish time (H:MM:SS, MM:SS or seconds)
        #[arg(short, long)]
        time: String,

        /// Race-day temperature
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<f64>,

        /// Temperature unit (f, c)
        #[arg(long)]
        temp_unit: Option<TemperatureUnit>,

        /// Race altitude
        #[arg(long)]
        altitude: Option<f64>,

        /// Altitude unit (ft, m)
        #[arg(long)]
        alt_unit: Option<AltitudeUnit>,

        /// Adjustment to foreground (effect, conversion)
        #[arg(long)]
        display_mode: Option<DisplayMode>,

        /// Pace units (metric, imperial)
        #[arg(short, long)]
        units: Option<Units>,
    },

    /// Predict a race time from a VDOT
    Predict {
        /// VDOT score
        #[arg(long)]
        vdot: f64,

        /// Target distance
        #[arg(short, long)]
        distance: String,
    },

    /// Hansons training paces and Riegel equivalents for a race
    Hansons {
        /// Race distance
        #[arg(short, long)]
        distance: String,

        /// Finish time (H:MM:SS, MM:SS or seconds)
        #[arg(short, long)]
        time: String,

        /// Race-day temperature
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<f64>,

        /// Temperature unit (f, c)
        #[arg(long)]
        temp_unit: Option<TemperatureUnit>,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: Option<f64>,

        /// Wind speed
        #[arg(long)]
        wind: Option<f64>,

        /// Wind unit (mph, kmh)
        #[arg(long)]
        wind_unit: Option<WindUnit>,
    },

    /// Goal times for 1-10% improvements
    Improve {
        /// Current time (H:MM:SS, MM:SS or seconds)
        #[arg(short, long)]
        time: String,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (KEY=VALUE)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

#[derive(Tabled)]
struct PaceRow {
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Pace")]
    pace: String,
}

#[derive(Tabled)]
struct HansonsRow {
    #[tabled(rename = "Workout")]
    workout: String,
    #[tabled(rename = "Per km")]
    per_km: String,
    #[tabled(rename = "Per mile")]
    per_mile: String,
}

#[derive(Tabled)]
struct EquivalentRow {
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Pace")]
    pace: String,
}

#[derive(Tabled)]
struct ImprovementRow {
    #[tabled(rename = "Improvement")]
    percentage: String,
    #[tabled(rename = "Goal time")]
    improved: String,
    #[tabled(rename = "Time saved")]
    saved: String,
}

#[derive(Tabled)]
struct ValueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Serialize)]
struct VdotReport<'a> {
    #[serde(flatten)]
    result: &'a VdotResult,
    environmental_adjustment: Option<&'a EnvironmentalAdjustment>,
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

/// Log a library error at its severity and turn it into a user-facing error
fn report(err: RunCalcError) -> anyhow::Error {
    match err.severity() {
        ErrorSeverity::Warning => tracing::warn!(kind = ?err.kind(), "{}", err),
        ErrorSeverity::Error => tracing::error!(kind = ?err.kind(), "{}", err),
    }
    anyhow::anyhow!(err.user_message())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref());

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.more_verbose(cli.verbose);
    init_logging(&log_config)?;

    let output = if cli.json {
        OutputFormat::Json
    } else {
        config.settings.output
    };

    match cli.command {
        Commands::Vdot {
            distance,
            time,
            temperature,
            temp_unit,
            altitude,
            alt_unit,
            display_mode,
            units,
        } => {
            let distance = parse_distance(&distance).map_err(report)?;
            let time = parse_time(&time).map_err(report)?;

            let conditions = EnvironmentConditions {
                temperature,
                temperature_unit: temp_unit.unwrap_or(config.settings.temperature_unit),
                altitude,
                altitude_unit: alt_unit.unwrap_or(config.settings.altitude_unit),
                display_mode: display_mode.unwrap_or(config.settings.display_mode),
            };

            let result = VdotCalculator::calculate_vdot(distance, time).map_err(report)?;
            let adjustment = VdotCalculator::adjust_for_environment(distance, time, &conditions)
                .map_err(report)?;

            match output {
                OutputFormat::Json => print_json(&VdotReport {
                    result: &result,
                    environmental_adjustment: adjustment.as_ref(),
                })?,
                OutputFormat::Table => {
                    let unit = units.unwrap_or(config.settings.units).pace_unit();
                    print_vdot(&result, unit).map_err(report)?;
                    if let Some(adjustment) = &adjustment {
                        print_adjustment(adjustment);
                    }
                }
            }
        }

        Commands::Predict { vdot, distance } => {
            let distance = parse_distance(&distance).map_err(report)?;
            let seconds = VdotCalculator::predict_time(vdot, distance).map_err(report)?;

            match output {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "vdot": vdot,
                    "distance_meters": distance,
                    "time_seconds": seconds,
                }))?,
                OutputFormat::Table => {
                    let unit = config.settings.units.pace_unit();
                    println!(
                        "{} {} ({})",
                        "Predicted time:".blue().bold(),
                        format_time_with_decimal(seconds).bold(),
                        format_pace(seconds / (distance / unit.meters()), unit)
                    );
                }
            }
        }

        Commands::Hansons {
            distance,
            time,
            temperature,
            temp_unit,
            humidity,
            wind,
            wind_unit,
        } => {
            let distance = parse_distance(&distance).map_err(report)?;
            let time = parse_time(&time).map_err(report)?;

            let weather = if temperature.is_some() || humidity.is_some() || wind.is_some() {
                let neutral = WeatherConditions::default();
                Some(WeatherConditions::new(
                    temperature.unwrap_or(neutral.temperature),
                    match temperature {
                        Some(_) => temp_unit.unwrap_or(config.settings.temperature_unit),
                        None => neutral.temperature_unit,
                    },
                    humidity.unwrap_or(neutral.humidity),
                    wind.unwrap_or(neutral.wind_speed),
                    wind_unit.unwrap_or(config.settings.wind_unit),
                ))
            } else {
                None
            };

            let result = HansonsCalculator::calculate_hansons_paces(distance, time, weather.as_ref())
                .map_err(report)?;

            match output {
                OutputFormat::Json => print_json(&result)?,
                OutputFormat::Table => print_hansons(&result, config.settings.units.pace_unit()),
            }
        }

        Commands::Improve { time } => {
            let seconds = parse_time(&time).map_err(report)?;
            let result = ImprovementCalculator::from_seconds_f64(seconds).map_err(report)?;

            match output {
                OutputFormat::Json => print_json(&result)?,
                OutputFormat::Table => print_improvement(&result),
            }
        }

        Commands::Config { list, set, get } => {
            let config_path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            if let Some(key_value) = set {
                let Some((key, value)) = key_value.split_once('=') else {
                    bail!("expected KEY=VALUE, got '{}'", key_value);
                };
                config
                    .set_value(key.trim(), value.trim())
                    .map_err(report)?;
                config.save_to_file(&config_path)?;
                println!(
                    "{} {} = {}",
                    "✓".green(),
                    key.trim(),
                    config.get_value(key.trim()).map_err(report)?
                );
            } else if let Some(key) = get {
                println!("{}", config.get_value(&key).map_err(report)?);
            } else if list || output == OutputFormat::Table {
                println!("{} {}", "Config file:".dimmed(), config_path.display());
                let rows = config
                    .entries()
                    .into_iter()
                    .map(|(key, value)| ValueRow {
                        key: key.to_string(),
                        value,
                    })
                    .collect();
                println!("{}", table(rows));
            } else {
                print_json(&config)?;
            }
        }
    }

    Ok(())
}

fn print_vdot(result: &VdotResult, unit: DistanceUnit) -> runcalc::Result<()> {
    let breakdown = &result.race_pace_breakdown;

    println!("{}", "Race".green().bold());
    let race_rows = vec![
        ValueRow {
            key: "Distance".to_string(),
            value: breakdown.label.clone(),
        },
        ValueRow {
            key: "Time".to_string(),
            value: format_time(breakdown.total_time),
        },
        ValueRow {
            key: "Pace".to_string(),
            value: format!(
                "{}  {}",
                format_pace(breakdown.pace_per_km, DistanceUnit::Kilometers),
                format_pace(breakdown.pace_per_mile, DistanceUnit::Miles)
            ),
        },
        ValueRow {
            key: "800m / 400m".to_string(),
            value: format!(
                "{} / {}",
                format_time_with_decimal(breakdown.pace_per_800m),
                format_time_with_decimal(breakdown.pace_per_400m)
            ),
        },
    ];
    println!("{}", table(race_rows));

    println!("\n{} {:.1}", "VDOT:".blue().bold(), result.vdot);

    println!("\n{}", "Training paces".green().bold());
    let paces = VdotCalculator::training_paces_per(result.vdot, unit)?;
    let pace_rows = paces
        .zones()
        .iter()
        .map(|(name, range)| PaceRow {
            zone: name.to_string(),
            pace: range.display(),
        })
        .collect();
    println!("{}", table(pace_rows));

    println!("\n{}", "Equivalent performances".green().bold());
    let equivalent_rows = result
        .equivalent_performances
        .iter()
        .map(|e| EquivalentRow {
            distance: e.label.clone(),
            time: e.formatted_time(),
            pace: e.formatted_pace(unit),
        })
        .collect();
    println!("{}", table(equivalent_rows));

    Ok(())
}

fn print_adjustment(adjustment: &EnvironmentalAdjustment) {
    println!(
        "\n{} ({})",
        "Environmental adjustment".yellow().bold(),
        adjustment.display_mode
    );

    let conditions = &adjustment.conditions;
    let mut rows = Vec::new();
    if let Some(temperature) = conditions.temperature {
        rows.push(ValueRow {
            key: "Temperature".to_string(),
            value: format!("{}{}", temperature, conditions.temperature_unit),
        });
    }
    if let Some(altitude) = conditions.altitude {
        rows.push(ValueRow {
            key: "Altitude".to_string(),
            value: format!("{} {}", altitude, conditions.altitude_unit),
        });
    }
    rows.push(ValueRow {
        key: "Effect".to_string(),
        value: format!(
            "{} ({}/km)",
            format_time_with_decimal(adjustment.effect_seconds),
            format_time_with_decimal(adjustment.pace_diff_per_km)
        ),
    });
    rows.push(ValueRow {
        key: "Adjusted time".to_string(),
        value: format_time(adjustment.presented_time()),
    });
    rows.push(ValueRow {
        key: "Adjusted VDOT".to_string(),
        value: adjustment
            .presented_vdot()
            .map(|vdot| format!("{:.1}", vdot))
            .unwrap_or_else(|| "--".to_string()),
    });
    println!("{}", table(rows));
}

fn print_hansons(result: &HansonsResult, unit: DistanceUnit) {
    let race = &result.race_info;
    let suffix = if result.weather_adjusted {
        " (weather adjusted)".yellow().to_string()
    } else {
        String::new()
    };
    println!(
        "{} {} in {}{}",
        "Race:".green().bold(),
        race.label,
        race.formatted_time(),
        suffix
    );

    println!("\n{}", "Training paces".green().bold());
    let rows = result
        .training_paces
        .iter()
        .map(|pace| HansonsRow {
            workout: pace.zone.name().to_string(),
            per_km: pace.per_km.display(),
            per_mile: pace.per_mile.display(),
        })
        .collect();
    println!("{}", table(rows));

    println!("\n{}", "Equivalent performances".green().bold());
    let rows = result
        .equivalent_performances
        .iter()
        .map(|e| EquivalentRow {
            distance: e.label.clone(),
            time: e.formatted_time(),
            pace: e.formatted_pace(unit),
        })
        .collect();
    println!("{}", table(rows));
}

fn print_improvement(result: &ImprovementResult) {
    println!(
        "{} {}",
        "Current time:".green().bold(),
        result.original_time_formatted
    );
    let rows = result
        .improvements
        .iter()
        .map(|entry| ImprovementRow {
            percentage: format!("{}%", entry.percentage),
            improved: entry.improved_time_formatted.clone(),
            saved: entry.time_saved_formatted.clone(),
        })
        .collect();
    println!("{}", table(rows));
}
