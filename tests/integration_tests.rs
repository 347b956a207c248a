//! Integration tests for the public calculator API
//!
//! End-to-end scenarios through the crate root: parse user input, run an
//! engine, inspect the structured result.

use rust_decimal_macros::dec;
use runcalc::config::AppConfig;
use runcalc::distances::parse_distance;
use runcalc::format::{format_time, parse_time};
use runcalc::{
    DistanceUnit, EnvironmentConditions, HansonsCalculator, HansonsZone, ImprovementCalculator,
    TemperatureUnit, VdotCalculator, WeatherConditions, WindUnit,
};
use tempfile::tempdir;

#[test]
fn test_twenty_minute_5k_vdot() {
    let distance = parse_distance("5k").unwrap();
    let time = parse_time("20:00").unwrap();

    let result = VdotCalculator::calculate_vdot(distance, time).unwrap();

    assert!((result.vdot - 49.81).abs() < 0.01, "vdot = {}", result.vdot);
    assert_eq!(result.race_pace_breakdown.label, "5K");

    let five_k = result
        .equivalent_performances
        .iter()
        .find(|e| e.label == "5K")
        .unwrap();
    assert_eq!(five_k.time_seconds, 1200.0);
    assert_eq!(five_k.formatted_time(), "20:00");
}

#[test]
fn test_marathon_equivalent_10k_is_faster_per_km() {
    let result = VdotCalculator::calculate_vdot(42195.0, 10800.0).unwrap();

    let marathon = result
        .equivalent_performances
        .iter()
        .find(|e| e.label == "Marathon")
        .unwrap();
    let ten_k = result
        .equivalent_performances
        .iter()
        .find(|e| e.label == "10K")
        .unwrap();

    assert_eq!(marathon.time_seconds, 10800.0);
    assert!((ten_k.time_seconds - 2339.4).abs() < 0.5);
    assert!(ten_k.pace_per_km < marathon.pace_per_km - 15.0);
}

#[test]
fn test_training_paces_are_ordered() {
    let result = VdotCalculator::calculate_vdot(10000.0, 2700.0).unwrap();
    let paces = &result.training_paces;

    assert!(paces.easy.slow >= paces.easy.fast);
    assert!(paces.marathon.fast < paces.easy.fast);
    assert!(paces.threshold.fast < paces.marathon.fast);
    assert!(paces.interval.fast < paces.threshold.fast);
    assert!(paces.repetition.fast < paces.interval.fast);
    assert!(paces.fast_repetition.fast < paces.repetition.fast);
}

#[test]
fn test_hansons_marathon_tempo_is_race_pace() {
    let result = HansonsCalculator::calculate_hansons_paces(10000.0, 2400.0, None).unwrap();

    let tempo = result.pace_for(HansonsZone::MarathonTempo).unwrap();
    assert_eq!(tempo.per_km.fast, 240.0);
    assert_eq!(tempo.per_km.slow, 240.0);
    assert_eq!(tempo.pace(DistanceUnit::Kilometers).display(), "4:00/km");
    assert!(!result.weather_adjusted);

    let labels: Vec<&str> = result
        .equivalent_performances
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(labels.first(), Some(&"1 Mile"));
    assert_eq!(labels.last(), Some(&"Marathon"));
    assert!(!labels.contains(&"10K"));
}

#[test]
fn test_hansons_weather_cap() {
    let weather = WeatherConditions::new(90.0, TemperatureUnit::Fahrenheit, 70.0, 5.0, WindUnit::Mph);
    let result =
        HansonsCalculator::calculate_hansons_paces(42195.0, 10800.0, Some(&weather)).unwrap();

    assert!(result.weather_adjusted);
    assert!((result.race_info.time_seconds - 12960.0).abs() < 1e-6);
    assert_eq!(result.race_info.formatted_time(), "3:36:00");
}

#[test]
fn test_improvement_ten_percent() {
    let result = ImprovementCalculator::calculate_improvement(dec!(0), dec!(20), dec!(0)).unwrap();

    let ten = result.entry(10).unwrap();
    assert_eq!(ten.improved_time_seconds, dec!(1080));
    assert_eq!(ten.time_saved_seconds, dec!(120));
    assert_eq!(ten.improved_time_formatted, "18:00");
    assert_eq!(ten.time_saved_formatted, "2:00");
    assert_eq!(result.improvements.len(), 7);
}

#[test]
fn test_hot_hour_effort() {
    let conditions =
        EnvironmentConditions::new().with_temperature(90.0, TemperatureUnit::Fahrenheit);
    let adjustment = VdotCalculator::adjust_for_environment(10000.0, 3600.0, &conditions)
        .unwrap()
        .unwrap();

    assert!(adjustment.slower_time > 3600.0);
    assert!(adjustment.faster_time < 3600.0);
    assert!(adjustment.faster_time >= 0.0);
    assert!(adjustment.faster_vdot.is_some());
    assert_eq!(format_time(adjustment.slower_time), "1:02:52");
}

#[test]
fn test_error_tags_across_engines() {
    let err = VdotCalculator::calculate_vdot(-5.0, 1200.0).unwrap_err();
    assert_eq!(err.kind(), Some("invalid_distance"));
    assert!(!err.is_retryable());

    let err = HansonsCalculator::calculate_hansons_paces(5000.0, 0.0, None).unwrap_err();
    assert_eq!(err.kind(), Some("invalid_time"));

    let err = VdotCalculator::calculate_vdot(5000.0, 600.0).unwrap_err();
    assert_eq!(err.kind(), Some("vdot_too_high"));

    let err = parse_time("20:75").unwrap_err();
    assert_eq!(err.kind(), None);
}

#[test]
fn test_config_round_trip_through_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.set_value("settings.units", "imperial").unwrap();
    config.set_value("settings.output", "json").unwrap();
    config.save_to_file(&path).unwrap();

    let loaded = AppConfig::load_or_default(Some(path.as_path()));
    assert_eq!(loaded.get_value("settings.units").unwrap(), "imperial");
    assert_eq!(loaded.get_value("settings.output").unwrap(), "json");
}
