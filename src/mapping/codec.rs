// src/mapping/codec.rs
//
// Value codec between entity fields and SQLite storage classes.
//
// Dates and times travel as fixed-pattern text so the store file stays
// interoperable with the existing kiosk data: 'yyyy-MM-dd' for calendar
// dates and 'HH:mm:ss' for times of day.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::{Row, ToSql};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed date `{0}`, expected yyyy-MM-dd")]
    MalformedDate(String),

    #[error("malformed time `{0}`, expected HH:mm:ss")]
    MalformedTime(String),
}

/// One storable value. The enum is closed: a field type outside this
/// set cannot be mapped at all, so unsupported types are unrepresentable
/// instead of failing at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            SqlValue::Null => Value::Null,
            SqlValue::Int(v) => Value::Integer(*v),
            SqlValue::Real(v) => Value::Real(*v),
            SqlValue::Text(v) => Value::Text(v.clone()),
            SqlValue::Bool(v) => Value::Integer(i64::from(*v)),
            SqlValue::Date(v) => Value::Text(format_date(*v)),
            SqlValue::Time(v) => Value::Text(format_time(*v)),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn parse_date(text: &str) -> Result<NaiveDate, CodecError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CodecError::MalformedDate(text.to_string()))
}

pub fn parse_time(text: &str) -> Result<NaiveTime, CodecError> {
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|_| CodecError::MalformedTime(text.to_string()))
}

/// Read a date column, surfacing malformed stored text as a conversion
/// failure so the row mapper stays `query_map`-compatible.
pub fn decode_date(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    parse_date(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Read a time-of-day column, same error contract as [`decode_date`].
pub fn decode_time(row: &Row, idx: usize) -> rusqlite::Result<NaiveTime> {
    let text: String = row.get(idx)?;
    parse_time(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_uses_fixed_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
        assert_eq!(parse_date("2024-03-07").unwrap(), date);
    }

    #[test]
    fn time_uses_fixed_pattern() {
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_time(time), "09:05:00");
        assert_eq!(parse_time("09:05:00").unwrap(), time);
    }

    #[test]
    fn malformed_date_is_a_codec_error() {
        assert_eq!(
            parse_date("07/03/2024"),
            Err(CodecError::MalformedDate("07/03/2024".to_string()))
        );
    }

    #[test]
    fn malformed_time_is_a_codec_error() {
        assert_eq!(
            parse_time("9am"),
            Err(CodecError::MalformedTime("9am".to_string()))
        );
    }

    #[test]
    fn bool_encodes_as_integer() {
        let out = SqlValue::Bool(true).to_sql().unwrap();
        assert_eq!(out, ToSqlOutput::Owned(Value::Integer(1)));
    }

    #[test]
    fn none_encodes_as_null() {
        let value: SqlValue = Option::<i64>::None.into();
        assert_eq!(value, SqlValue::Null);
    }
}
