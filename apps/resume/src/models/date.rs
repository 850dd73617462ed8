use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ValidationError;

/// Month granularity date, written `MM/YYYY`.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a MM/YYYY date")]
pub struct InvalidMonthYear(pub String);

impl MonthYear {
    /// 01/1000, the earliest representable month.
    pub const MIN: MonthYear = MonthYear {
        year: 1000,
        month: 1,
    };

    /// 12/9999, the latest representable month.
    pub const MAX: MonthYear = MonthYear {
        year: 9999,
        month: 12,
    };

    /// Returns `None` unless `month` is 1-12 and `year` has four digits.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if !(Self::MIN.year..=Self::MAX.year).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// Months since 01/0000.
    fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Saturates at [`MonthYear::MIN`] and [`MonthYear::MAX`].
    fn from_ordinal(ordinal: i64) -> Self {
        let ordinal = ordinal.clamp(Self::MIN.ordinal(), Self::MAX.ordinal());
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Month of `date`, clamped to the four-digit year range.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_ordinal(i64::from(date.year()) * 12 + i64::from(date.month0()))
    }

    /// Shifts by a signed number of months, saturating at the year range.
    pub fn offset_months(self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal().saturating_add(months))
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for MonthYear {
    type Err = InvalidMonthYear;

    /// Strict: two-digit month, slash, four-digit year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthYear(s.to_string());
        let (month, year) = s.split_once('/').ok_or_else(invalid)?;
        if month.len() != 2
            || year.len() != 4
            || !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        MonthYear::new(month, year).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MonthYear {
    type Error = InvalidMonthYear;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthYear> for String {
    fn from(value: MonthYear) -> Self {
        value.to_string()
    }
}

/// Inclusive month window used to filter roles at export time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: MonthYear,
    end: MonthYear,
}

impl DateRange {
    pub fn new(start: MonthYear, end: MonthYear) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `months` most recent months ending with the month of `today`.
    pub fn trailing_months(months: u32, today: NaiveDate) -> Self {
        let end = MonthYear::from_date(today);
        let span = i64::from(months.saturating_sub(1));
        Self {
            start: end.offset_months(-span),
            end,
        }
    }

    pub fn start(&self) -> MonthYear {
        self.start
    }

    pub fn end(&self) -> MonthYear {
        self.end
    }

    pub fn contains(&self, month: MonthYear) -> bool {
        self.start <= month && month <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn my(month: u32, year: i32) -> MonthYear {
        MonthYear::new(month, year).unwrap()
    }

    #[rstest]
    #[case("01/2019", 1, 2019)]
    #[case("12/1999", 12, 1999)]
    #[case("06/2024", 6, 2024)]
    fn test_parses_canonical_form(#[case] input: &str, #[case] month: u32, #[case] year: i32) {
        let parsed: MonthYear = input.parse().unwrap();
        assert_eq!(parsed, my(month, year));
        assert_eq!(parsed.to_string(), input);
    }

    #[rstest]
    #[case("1/2019")]
    #[case("13/2019")]
    #[case("00/2019")]
    #[case("01/19")]
    #[case("2019-01")]
    #[case("01/2019 ")]
    #[case("ab/cdef")]
    #[case("")]
    fn test_rejects_non_canonical_form(#[case] input: &str) {
        assert!(input.parse::<MonthYear>().is_err(), "'{input}' should be rejected");
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(my(12, 2019) < my(1, 2020));
        assert!(my(2, 2020) > my(1, 2020));
    }

    #[test]
    fn test_offset_months_crosses_year_boundary() {
        assert_eq!(my(1, 2020).offset_months(-1), my(12, 2019));
        assert_eq!(my(11, 2020).offset_months(3), my(2, 2021));
        assert_eq!(my(5, 2020).offset_months(-24), my(5, 2018));
    }

    #[test]
    fn test_serde_uses_month_year_string() {
        let json = serde_json::to_string(&my(3, 2021)).unwrap();
        assert_eq!(json, r#""03/2021""#);
        let back: MonthYear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, my(3, 2021));
        assert!(serde_json::from_str::<MonthYear>(r#""3/2021""#).is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(my(6, 2022), my(1, 2022)).unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
    }

    #[test]
    fn test_single_month_range_contains_its_month() {
        let range = DateRange::new(my(6, 2020), my(6, 2020)).unwrap();
        assert!(range.contains(my(6, 2020)));
        assert!(!range.contains(my(7, 2020)));
    }

    #[test]
    fn test_trailing_months_ends_this_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let range = DateRange::trailing_months(12, today);
        assert_eq!(range.start(), my(4, 2023));
        assert_eq!(range.end(), my(3, 2024));

        let single = DateRange::trailing_months(0, today);
        assert_eq!(single.start(), single.end());
    }

    #[test]
    fn test_huge_trailing_window_stops_at_earliest_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let range = DateRange::trailing_months(4_000_000_000, today);
        assert_eq!(range.start(), MonthYear::MIN);
        assert_eq!(range.start().year(), 1000);
        assert_eq!(range.end(), my(3, 2024));
    }

    #[rstest]
    #[case(my(6, 2020), -100_000, MonthYear::MIN)]
    #[case(my(6, 2020), 100_000, MonthYear::MAX)]
    #[case(my(6, 2020), i64::MIN, MonthYear::MIN)]
    #[case(my(6, 2020), i64::MAX, MonthYear::MAX)]
    #[case(my(12, 9999), 1, MonthYear::MAX)]
    fn test_offset_months_saturates(
        #[case] from: MonthYear,
        #[case] months: i64,
        #[case] expected: MonthYear,
    ) {
        let shifted = from.offset_months(months);
        assert_eq!(shifted, expected);
        assert_eq!(
            MonthYear::new(shifted.month(), shifted.year()),
            Some(shifted),
            "shifted value must stay constructible"
        );
    }

    #[test]
    fn test_from_date_clamps_out_of_range_years() {
        let far = NaiveDate::from_ymd_opt(20_000, 7, 1).unwrap();
        assert_eq!(MonthYear::from_date(far), MonthYear::MAX);
        let early = NaiveDate::from_ymd_opt(500, 7, 1).unwrap();
        assert_eq!(MonthYear::from_date(early), MonthYear::MIN);
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let month = MonthYear::from_date(today);
        assert_eq!((month.month(), month.year()), (3, 2024));
    }
}
