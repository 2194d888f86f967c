//! Shared fixtures for the per-format integration tests.
//!
//! Every format carries the same elements, so one set of expectations checks
//! them all.

#![allow(dead_code)]

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use confpath::{
    get_duration, get_durations, get_time, get_times, join_path, Bind, Config, ConfigAccessor,
    DEFAULT_ARRAY_DELIMITER,
};

pub const STRING_VALUE: &str = "value";
pub const BOOL_VALUE: bool = true;
pub const FLOAT_VALUE: f64 = 1.234_56;
pub const INT_VALUE: i64 = 123_456;

pub const STRING_VALUES: [&str; 3] = ["value1", "value2", "value3"];
pub const BOOL_VALUES: [bool; 3] = [true, false, true];
pub const FLOAT_VALUES: [f64; 3] = [1.23, 4.56, 7.89];
pub const INT_VALUES: [i64; 3] = [123, 456, 789];

pub const TIME_VALUE: &str = "2006-01-02T15:04:05+07:00";
pub const TIME_VALUES: [&str; 3] = [
    "2006-01-02T15:04:05+07:00",
    "2015-01-02T01:15:45Z",
    "1999-12-31T23:59:59+00:00",
];

/// Names of every element in the fixtures.
pub const ELEMENTS: [&str; 12] = [
    "stringElement",
    "boolElement",
    "floatElement",
    "intElement",
    "stringElements",
    "boolElements",
    "floatElements",
    "intElements",
    "durationElement",
    "timeElement",
    "durationElements",
    "timeElements",
];

pub fn duration_value() -> Duration {
    // 2h45m5s150ms
    Duration::from_millis(9_905_150)
}

pub fn duration_values() -> Vec<Duration> {
    vec![
        Duration::from_secs(3600),
        Duration::from_millis(4_530_450),
        Duration::from_millis(1750),
    ]
}

pub fn time_value() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(TIME_VALUE).unwrap()
}

pub fn time_values() -> Vec<DateTime<FixedOffset>> {
    TIME_VALUES
        .iter()
        .map(|value| DateTime::parse_from_rfc3339(value).unwrap())
        .collect()
}

pub fn assert_float(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

pub fn assert_floats(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (actual, expected) in actual.iter().zip(expected) {
        assert_float(*actual, *expected);
    }
}

/// A struct holding every fixture element.
#[derive(Debug, Default, Clone, PartialEq, Bind)]
pub struct ConfigData {
    #[config(name = "stringElement")]
    pub string_element: String,
    #[config(name = "boolElement")]
    pub bool_element: bool,
    #[config(name = "floatElement")]
    pub float_element: f64,
    #[config(name = "intElement")]
    pub int_element: i64,
    #[config(name = "stringElements")]
    pub string_elements: Vec<String>,
    #[config(name = "boolElements")]
    pub bool_elements: Vec<bool>,
    #[config(name = "floatElements")]
    pub float_elements: Vec<f64>,
    #[config(name = "intElements")]
    pub int_elements: Vec<i64>,
    #[config(name = "durationElement")]
    pub duration_element: Duration,
    #[config(name = "timeElement")]
    pub time_element: DateTime<FixedOffset>,
    #[config(name = "durationElements")]
    pub duration_elements: Vec<Duration>,
    #[config(name = "timeElements")]
    pub time_elements: Vec<DateTime<FixedOffset>>,
}

impl ConfigData {
    pub fn check(&self) {
        assert_eq!(self.string_element, STRING_VALUE);
        assert_eq!(self.bool_element, BOOL_VALUE);
        assert_float(self.float_element, FLOAT_VALUE);
        assert_eq!(self.int_element, INT_VALUE);
        assert_eq!(self.string_elements, STRING_VALUES);
        assert_eq!(self.bool_elements, BOOL_VALUES);
        assert_floats(&self.float_elements, &FLOAT_VALUES);
        assert_eq!(self.int_elements, INT_VALUES);
        assert_eq!(self.duration_element, duration_value());
        assert_eq!(self.time_element, time_value());
        assert_eq!(self.duration_elements, duration_values());
        assert_eq!(self.time_elements, time_values());
    }
}

/// Reads every fixture element below `prefix` through the typed getters.
pub fn check_elements<C: ConfigAccessor + ?Sized>(config: &C, prefix: &str) {
    for element in ELEMENTS {
        check_element(config, &join_path([prefix, element]), element);
    }
}

/// Reads the fixture element `element` at `path`.
pub fn check_element<C: ConfigAccessor + ?Sized>(config: &C, path: &str, element: &str) {
    let delim = DEFAULT_ARRAY_DELIMITER;
    match element {
        "stringElement" => assert_eq!(config.get_string(path).unwrap(), STRING_VALUE),
        "boolElement" => assert_eq!(config.get_bool(path).unwrap(), BOOL_VALUE),
        "floatElement" => assert_float(config.get_float(path).unwrap(), FLOAT_VALUE),
        "intElement" => assert_eq!(config.get_int(path).unwrap(), INT_VALUE),
        "stringElements" => assert_eq!(config.get_strings(path, delim).unwrap(), STRING_VALUES),
        "boolElements" => assert_eq!(config.get_bools(path, delim).unwrap(), BOOL_VALUES),
        "floatElements" => assert_floats(&config.get_floats(path, delim).unwrap(), &FLOAT_VALUES),
        "intElements" => assert_eq!(config.get_ints(path, delim).unwrap(), INT_VALUES),
        "durationElement" => assert_eq!(get_duration(config, path).unwrap(), duration_value()),
        "timeElement" => assert_eq!(get_time(config, path).unwrap(), time_value()),
        "durationElements" => {
            assert_eq!(get_durations(config, path, delim).unwrap(), duration_values());
        }
        "timeElements" => assert_eq!(get_times(config, path, delim).unwrap(), time_values()),
        other => panic!("unknown element {other}"),
    }
}

/// Asserts that every typed getter fails at `path`.
pub fn check_absent<C: ConfigAccessor + ?Sized>(config: &C, path: &str) {
    let delim = DEFAULT_ARRAY_DELIMITER;
    assert!(config.get_string(path).is_err(), "string at {path:?}");
    assert!(config.get_bool(path).is_err(), "bool at {path:?}");
    assert!(config.get_float(path).is_err(), "float at {path:?}");
    assert!(config.get_int(path).is_err(), "int at {path:?}");
    assert!(config.get_strings(path, delim).is_err(), "strings at {path:?}");
    assert!(config.get_bools(path, delim).is_err(), "bools at {path:?}");
    assert!(config.get_floats(path, delim).is_err(), "floats at {path:?}");
    assert!(config.get_ints(path, delim).is_err(), "ints at {path:?}");
    assert!(get_duration(config, path).is_err(), "duration at {path:?}");
    assert!(get_time(config, path).is_err(), "time at {path:?}");
}

/// Asserts that every typed getter reports `NotFound` at `path`.
pub fn check_not_found<C: ConfigAccessor + ?Sized>(config: &C, path: &str) {
    let delim = DEFAULT_ARRAY_DELIMITER;
    assert!(config.get_string(path).unwrap_err().is_not_found());
    assert!(config.get_bool(path).unwrap_err().is_not_found());
    assert!(config.get_float(path).unwrap_err().is_not_found());
    assert!(config.get_int(path).unwrap_err().is_not_found());
    assert!(config.get_strings(path, delim).unwrap_err().is_not_found());
    assert!(config.get_bools(path, delim).unwrap_err().is_not_found());
    assert!(config.get_floats(path, delim).unwrap_err().is_not_found());
    assert!(config.get_ints(path, delim).unwrap_err().is_not_found());
}

/// Binds a [`ConfigData`] at `path`, strictly.
pub fn load_data(config: &Config, path: &str) -> ConfigData {
    let mut data = ConfigData::default();
    confpath::load_value(config, path, &mut data).unwrap();
    data
}

/// Indents every line of `text` by `width` spaces.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
