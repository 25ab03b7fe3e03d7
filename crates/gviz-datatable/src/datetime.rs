//! Date/datetime cell values and the chart date literal.
//!
//! The consuming chart library expects date cells as the literal text
//! `Date(year,month,day,hour,minute,second)` with a zero-based month,
//! matching its client-side date constructor (table schema 0.6). Components
//! are tracked individually so partial dates (year or year-month precision)
//! render the literal `null` in unset positions.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{DatatableError, Result};

/// Date-time layouts tried in order by the best-effort parse.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Date-only layouts tried after the date-time layouts.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y"];

/// A date/datetime value with component-level precision.
///
/// `month` and `day` are calendar values (1-based); the literal rendering
/// shifts the month to zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateValue {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
}

impl DateValue {
    /// Construct from explicit components. Unset components render as
    /// `null` in the literal.
    pub fn new(
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
        hour: Option<u32>,
        minute: Option<u32>,
        second: Option<u32>,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Parse a raw date string.
    ///
    /// With an explicit `format` (a chrono format string configured on the
    /// table) only that layout is accepted, first as a date-time and then as
    /// a bare date. Without one, a best-effort ladder is tried: RFC 3339,
    /// common date-time and date layouts, then partial `YYYY-MM` / `YYYY`.
    /// Empty input and exhausted strategies fail with `InvalidDate`.
    pub fn parse(raw: &str, format: Option<&str>) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DatatableError::invalid_date(raw, "empty date string"));
        }
        match format {
            Some(format) => Self::parse_with_format(trimmed, format),
            None => Self::parse_inferred(trimmed),
        }
    }

    fn parse_with_format(raw: &str, format: &str) -> Result<Self> {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime.into());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date.into());
        }
        Err(DatatableError::invalid_date(
            raw,
            format!("does not match the configured format '{format}'"),
        ))
    }

    fn parse_inferred(raw: &str) -> Result<Self> {
        if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
            return Ok(datetime.naive_local().into());
        }
        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(datetime.into());
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Ok(date.into());
            }
        }
        if let Some(partial) = Self::parse_partial_iso(raw) {
            return Ok(partial);
        }
        Err(DatatableError::invalid_date(
            raw,
            "no supported date format matched",
        ))
    }

    /// Year (`2014`) and year-month (`2014-03`) precision.
    fn parse_partial_iso(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(3, '-');
        let year = parts.next()?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = year.parse().ok()?;
        let month = parts.next();
        if parts.next().is_some() {
            return None;
        }
        match month {
            None => Some(Self::new(Some(year), None, None, None, None, None)),
            Some(month) => {
                let month: u32 = month.parse().ok()?;
                if (1..=12).contains(&month) {
                    Some(Self::new(Some(year), Some(month), None, None, None, None))
                } else {
                    None
                }
            }
        }
    }

    /// Render the chart date literal, e.g. `Date(2014,2,5,0,0,0)`.
    ///
    /// The month is shifted to zero-based; unset components render as
    /// `null` in their position.
    pub fn to_literal(&self) -> String {
        let parts = [
            self.year.map(i64::from),
            self.month.map(|month| i64::from(month.saturating_sub(1))),
            self.day.map(i64::from),
            self.hour.map(i64::from),
            self.minute.map(i64::from),
            self.second.map(i64::from),
        ];
        let rendered: Vec<String> = parts
            .iter()
            .map(|part| match part {
                Some(value) => value.to_string(),
                None => String::from("null"),
            })
            .collect();
        format!("Date({})", rendered.join(","))
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        // A bare date is midnight, matching the parse behavior of the
        // consuming library's date constructor.
        Self::new(
            Some(date.year()),
            Some(date.month()),
            Some(date.day()),
            Some(0),
            Some(0),
            Some(0),
        )
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::new(
            Some(datetime.year()),
            Some(datetime.month()),
            Some(datetime.day()),
            Some(datetime.hour()),
            Some(datetime.minute()),
            Some(datetime.second()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_zero_based_month() {
        let date = DateValue::parse("2014-03-05", None).unwrap();
        assert_eq!(date.to_literal(), "Date(2014,2,5,0,0,0)");
    }

    #[test]
    fn literal_renders_null_for_unset_components() {
        let date = DateValue::new(Some(2014), Some(3), None, None, None, None);
        assert_eq!(date.to_literal(), "Date(2014,2,null,null,null,null)");
    }

    #[test]
    fn parses_datetime_layouts() {
        let date = DateValue::parse("2014-03-05 12:34:56", None).unwrap();
        assert_eq!(date.to_literal(), "Date(2014,2,5,12,34,56)");

        let date = DateValue::parse("2014-03-05T12:34:56", None).unwrap();
        assert_eq!(date.to_literal(), "Date(2014,2,5,12,34,56)");
    }

    #[test]
    fn parses_rfc3339_wall_clock() {
        let date = DateValue::parse("2014-03-05T12:34:56+02:00", None).unwrap();
        assert_eq!(date.to_literal(), "Date(2014,2,5,12,34,56)");
    }

    #[test]
    fn parses_partial_precision() {
        assert_eq!(
            DateValue::parse("2014", None).unwrap().to_literal(),
            "Date(2014,null,null,null,null,null)"
        );
        assert_eq!(
            DateValue::parse("2014-03", None).unwrap().to_literal(),
            "Date(2014,2,null,null,null,null)"
        );
    }

    #[test]
    fn explicit_format_is_exclusive() {
        let date = DateValue::parse("05.03.2014", Some("%d.%m.%Y")).unwrap();
        assert_eq!(date.to_literal(), "Date(2014,2,5,0,0,0)");

        let err = DateValue::parse("2014-03-05", Some("%d.%m.%Y")).unwrap_err();
        assert!(matches!(err, DatatableError::InvalidDate { .. }));
    }

    #[test]
    fn empty_and_garbage_fail() {
        assert!(matches!(
            DateValue::parse("", None).unwrap_err(),
            DatatableError::InvalidDate { .. }
        ));
        assert!(matches!(
            DateValue::parse("  ", None).unwrap_err(),
            DatatableError::InvalidDate { .. }
        ));
        assert!(DateValue::parse("not a date", None).is_err());
        assert!(DateValue::parse("2014-13", None).is_err());
    }

    #[test]
    fn from_chrono_values() {
        let date: DateValue = NaiveDate::from_ymd_opt(2013, 10, 2).unwrap().into();
        assert_eq!(date.to_literal(), "Date(2013,9,2,0,0,0)");

        let datetime: DateValue = NaiveDate::from_ymd_opt(2013, 10, 2)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap()
            .into();
        assert_eq!(datetime.to_literal(), "Date(2013,9,2,12,34,56)");
    }
}
