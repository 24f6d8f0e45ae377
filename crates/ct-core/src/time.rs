//! CF time axis decoding
//!
//! Gridded climate files index time as a numeric offset from an epoch,
//! described by a `units` attribute such as `"days since 1850-01-01"`
//! and an optional `calendar` attribute. This module decodes those
//! offsets to (year, month) pairs for the calendars that monthly model
//! output actually uses: the standard (proleptic Gregorian) calendar,
//! the 365-day `noleap` calendar, and the 360-day calendar.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{DataError, Result};

/// Cumulative day-of-year offsets for a 365-day year
const NOLEAP_MONTH_STARTS: [i64; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

/// CF calendar variants supported by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    /// Standard / Gregorian / proleptic Gregorian
    Standard,
    /// 365-day calendar with no leap years
    NoLeap,
    /// 360-day calendar, twelve 30-day months
    Day360,
}

impl Calendar {
    /// Parse a CF `calendar` attribute value; `None` means standard
    pub fn parse(attr: Option<&str>) -> Result<Self> {
        match attr.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("standard") | Some("gregorian") | Some("proleptic_gregorian") => {
                Ok(Calendar::Standard)
            }
            Some("noleap") | Some("365_day") => Ok(Calendar::NoLeap),
            Some("360_day") => Ok(Calendar::Day360),
            Some(other) => Err(DataError::TimeDecode(format!(
                "unsupported calendar '{other}'"
            ))),
        }
    }
}

/// Time offset unit from the CF `units` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Seconds,
    Hours,
    Days,
}

impl TimeUnit {
    fn to_days(self, value: f64) -> i64 {
        let days = match self {
            TimeUnit::Seconds => value / 86_400.0,
            TimeUnit::Hours => value / 24.0,
            TimeUnit::Days => value,
        };
        days.floor() as i64
    }
}

/// Decoder for a CF-described time axis
#[derive(Debug, Clone)]
pub struct CfTime {
    unit: TimeUnit,
    epoch_year: i32,
    epoch_month: u32,
    epoch_day: u32,
    calendar: Calendar,
}

impl CfTime {
    /// Build a decoder from the time variable's `units` and `calendar` attributes
    ///
    /// Accepts units of the form `"<unit> since YYYY-MM-DD[ hh:mm:ss]"`.
    pub fn parse(units: &str, calendar: Option<&str>) -> Result<Self> {
        let mut parts = units.split_whitespace();

        let unit = match parts.next().map(|u| u.to_ascii_lowercase()).as_deref() {
            Some("seconds") | Some("second") | Some("s") => TimeUnit::Seconds,
            Some("hours") | Some("hour") | Some("h") => TimeUnit::Hours,
            Some("days") | Some("day") | Some("d") => TimeUnit::Days,
            _ => {
                return Err(DataError::TimeDecode(format!(
                    "unsupported time units '{units}'"
                )))
            }
        };

        if parts.next() != Some("since") {
            return Err(DataError::TimeDecode(format!(
                "time units '{units}' missing 'since <epoch>'"
            )));
        }

        let date = parts.next().ok_or_else(|| {
            DataError::TimeDecode(format!("time units '{units}' missing epoch date"))
        })?;

        let mut fields = date.split('-');
        let epoch_year = parse_field(fields.next(), units)?;
        let epoch_month = parse_field::<u32>(fields.next(), units)?;
        let epoch_day = parse_field::<u32>(fields.next(), units)?;

        if !(1..=12).contains(&epoch_month) || !(1..=31).contains(&epoch_day) {
            return Err(DataError::TimeDecode(format!(
                "epoch date out of range in '{units}'"
            )));
        }

        Ok(Self {
            unit,
            epoch_year,
            epoch_month,
            epoch_day,
            calendar: Calendar::parse(calendar)?,
        })
    }

    /// Calendar this decoder operates in
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Decode one numeric offset to a (year, month) pair
    pub fn decode(&self, value: f64) -> Result<(i32, u32)> {
        if !value.is_finite() {
            return Err(DataError::TimeDecode(format!(
                "non-finite time value {value}"
            )));
        }

        let days = self.unit.to_days(value);

        match self.calendar {
            Calendar::Standard => self.decode_standard(days),
            Calendar::NoLeap => Ok(self.decode_noleap(days)),
            Calendar::Day360 => Ok(self.decode_360(days)),
        }
    }

    fn decode_standard(&self, days: i64) -> Result<(i32, u32)> {
        let epoch = NaiveDate::from_ymd_opt(self.epoch_year, self.epoch_month, self.epoch_day)
            .ok_or_else(|| {
                DataError::TimeDecode(format!(
                    "invalid epoch {:04}-{:02}-{:02}",
                    self.epoch_year, self.epoch_month, self.epoch_day
                ))
            })?;

        let date = if days >= 0 {
            epoch.checked_add_days(Days::new(days as u64))
        } else {
            epoch.checked_sub_days(Days::new(days.unsigned_abs()))
        }
        .ok_or_else(|| DataError::TimeDecode(format!("time offset {days} days out of range")))?;

        Ok((date.year(), date.month()))
    }

    fn decode_noleap(&self, days: i64) -> (i32, u32) {
        let epoch_doy = NOLEAP_MONTH_STARTS[self.epoch_month as usize - 1] + self.epoch_day as i64
            - 1;
        let total = self.epoch_year as i64 * 365 + epoch_doy + days;

        let year = total.div_euclid(365);
        let doy = total.rem_euclid(365);
        let month = NOLEAP_MONTH_STARTS
            .iter()
            .rposition(|&start| start <= doy)
            .unwrap_or(0) as u32
            + 1;

        (year as i32, month)
    }

    fn decode_360(&self, days: i64) -> (i32, u32) {
        let epoch_doy = (self.epoch_month as i64 - 1) * 30 + self.epoch_day as i64 - 1;
        let total = self.epoch_year as i64 * 360 + epoch_doy + days;

        let year = total.div_euclid(360);
        let month = (total.rem_euclid(360) / 30) as u32 + 1;

        (year as i32, month)
    }
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, units: &str) -> Result<T> {
    field
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| DataError::TimeDecode(format!("malformed epoch date in '{units}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_days_since_epoch() {
        let cf = CfTime::parse("days since 1850-01-01", None).unwrap();
        assert_eq!(cf.calendar(), Calendar::Standard);
        assert_eq!(cf.decode(0.0).unwrap(), (1850, 1));
        assert_eq!(cf.decode(31.0).unwrap(), (1850, 2));
        assert_eq!(cf.decode(365.0).unwrap(), (1851, 1));
    }

    #[test]
    fn parses_epoch_with_time_of_day() {
        let cf = CfTime::parse("hours since 2000-03-01 00:00:00", None).unwrap();
        assert_eq!(cf.decode(0.0).unwrap(), (2000, 3));
        assert_eq!(cf.decode(24.0 * 31.0).unwrap(), (2000, 4));
    }

    #[test]
    fn standard_calendar_honors_leap_years() {
        // 2000 is a leap year: Jan (31) + Feb (29) days reach March 1st.
        let cf = CfTime::parse("days since 2000-01-01", Some("standard")).unwrap();
        assert_eq!(cf.decode(59.0).unwrap(), (2000, 2));
        assert_eq!(cf.decode(60.0).unwrap(), (2000, 3));
    }

    #[test]
    fn noleap_calendar_skips_leap_days() {
        let cf = CfTime::parse("days since 2000-01-01", Some("noleap")).unwrap();
        assert_eq!(cf.decode(0.0).unwrap(), (2000, 1));
        assert_eq!(cf.decode(59.0).unwrap(), (2000, 3));
        assert_eq!(cf.decode(365.0).unwrap(), (2001, 1));
        assert_eq!(cf.decode(365.0 * 10.0 + 90.0).unwrap(), (2010, 4));
    }

    #[test]
    fn day360_calendar_uses_thirty_day_months() {
        let cf = CfTime::parse("days since 1990-01-01", Some("360_day")).unwrap();
        assert_eq!(cf.decode(0.0).unwrap(), (1990, 1));
        assert_eq!(cf.decode(30.0).unwrap(), (1990, 2));
        assert_eq!(cf.decode(360.0).unwrap(), (1991, 1));
        assert_eq!(cf.decode(90.0 + 360.0 * 5.0).unwrap(), (1995, 4));
    }

    #[test]
    fn negative_offsets_decode_before_epoch() {
        let cf = CfTime::parse("days since 2000-01-01", None).unwrap();
        assert_eq!(cf.decode(-1.0).unwrap(), (1999, 12));

        let cf = CfTime::parse("days since 2000-01-01", Some("noleap")).unwrap();
        assert_eq!(cf.decode(-1.0).unwrap(), (1999, 12));
    }

    #[test]
    fn rejects_unknown_units_and_calendar() {
        assert!(CfTime::parse("fortnights since 2000-01-01", None).is_err());
        assert!(CfTime::parse("days after 2000-01-01", None).is_err());
        assert!(CfTime::parse("days since 2000-13-01", None).is_err());
        assert!(CfTime::parse("days since 2000-01-01", Some("julian")).is_err());
    }
}
