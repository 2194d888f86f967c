//! Typed reads built on the string getters.
//!
//! These work with any [`ConfigAccessor`] and parse the strings found at a
//! path: durations in humantime notation (`"1m 30s"`), timestamps in RFC 3339
//! or a strftime-style format, and any [`Loadable`] type.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::accessor::ConfigAccessor;
use crate::bind::Loadable;
use crate::error::Result;

/// Hands the string at `path` to `grabber`.
pub fn grab_string_value<C, F>(config: &C, path: &str, mut grabber: F) -> Result<()>
where
    C: ConfigAccessor + ?Sized,
    F: FnMut(&str) -> Result<()>,
{
    let value = config.get_string(path)?;
    grabber(&value)
}

/// Hands every string of the array at `path` to `grabber`, after announcing
/// the element count to `creator`. Stops at the first grabber error.
pub fn grab_string_values<C, S, F>(
    config: &C,
    path: &str,
    delim: &str,
    mut creator: S,
    mut grabber: F,
) -> Result<()>
where
    C: ConfigAccessor + ?Sized,
    S: FnMut(usize),
    F: FnMut(&str) -> Result<()>,
{
    let values = config.get_strings(path, delim)?;
    creator(values.len());
    values.iter().try_for_each(|value| grabber(value))
}

/// Reads a [`Loadable`] value.
pub fn get_loadable<T, C>(config: &C, path: &str) -> Result<T>
where
    T: Loadable,
    C: ConfigAccessor + ?Sized,
{
    T::load_from_config(&config.get_string(path)?)
}

/// Reads an array of [`Loadable`] values.
pub fn get_loadables<T, C>(config: &C, path: &str, delim: &str) -> Result<Vec<T>>
where
    T: Loadable,
    C: ConfigAccessor + ?Sized,
{
    config
        .get_strings(path, delim)?
        .iter()
        .map(|data| T::load_from_config(data))
        .collect()
}

/// Reads a duration such as `"15s"` or `"1h 30m"`.
pub fn get_duration<C: ConfigAccessor + ?Sized>(config: &C, path: &str) -> Result<Duration> {
    get_loadable(config, path)
}

/// Reads an array of durations.
pub fn get_durations<C: ConfigAccessor + ?Sized>(
    config: &C,
    path: &str,
    delim: &str,
) -> Result<Vec<Duration>> {
    get_loadables(config, path, delim)
}

/// Reads an RFC 3339 timestamp.
pub fn get_time<C: ConfigAccessor + ?Sized>(config: &C, path: &str) -> Result<DateTime<FixedOffset>> {
    get_loadable(config, path)
}

/// Reads an array of RFC 3339 timestamps.
pub fn get_times<C: ConfigAccessor + ?Sized>(
    config: &C,
    path: &str,
    delim: &str,
) -> Result<Vec<DateTime<FixedOffset>>> {
    get_loadables(config, path, delim)
}

/// Reads a timestamp written in a `chrono` strftime `format`.
///
/// Formats without an offset are read as UTC; date-only formats as midnight
/// UTC.
///
/// # Example
///
/// ```
/// use confpath::{create_config_from_str, get_time_format};
///
/// # fn main() -> confpath::Result<()> {
/// let config = create_config_from_str(r#"{"day": "02.01.2016"}"#, "json")?;
/// let day = get_time_format(&config, "/day", "%d.%m.%Y")?;
/// assert_eq!(day.to_rfc3339(), "2016-01-02T00:00:00+00:00");
/// # Ok(())
/// # }
/// ```
pub fn get_time_format<C: ConfigAccessor + ?Sized>(
    config: &C,
    path: &str,
    format: &str,
) -> Result<DateTime<FixedOffset>> {
    parse_time(&config.get_string(path)?, format)
}

/// Reads an array of timestamps written in a `chrono` strftime `format`.
pub fn get_times_format<C: ConfigAccessor + ?Sized>(
    config: &C,
    path: &str,
    format: &str,
    delim: &str,
) -> Result<Vec<DateTime<FixedOffset>>> {
    config
        .get_strings(path, delim)?
        .iter()
        .map(|data| parse_time(data, format))
        .collect()
}

fn parse_time(data: &str, format: &str) -> Result<DateTime<FixedOffset>> {
    let error = match DateTime::parse_from_str(data, format) {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };
    if let Ok(value) = NaiveDateTime::parse_from_str(data, format) {
        return Ok(value.and_utc().fixed_offset());
    }
    if let Some(value) = NaiveDate::parse_from_str(data, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(value.and_utc().fixed_offset());
    }
    Err(error.into())
}
