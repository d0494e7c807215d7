use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single row from the owner registry.
///
/// The three columns the join cares about are lifted into named fields; every
/// other column is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerRecord {
    pub registration_id: Option<String>,
    pub boat_name: Option<String>,
    pub owner_name: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl OwnerRecord {
    /// Look up an unmapped column by its header name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.extra.get(column).map(String::as_str)
    }
}

/// A single trip from the history file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub registration_id: String,
    /// Raw date as written in the file (dd/mm/yyyy).
    pub trip_date: String,
    pub month: u32,
    pub year: i32,
}

impl TripRecord {
    /// Build a trip, deriving month and year from a `dd/mm/yyyy` date with
    /// the default `/` separator.
    pub fn new(registration_id: impl Into<String>, trip_date: impl Into<String>) -> Self {
        Self::with_separator(registration_id, trip_date, '/')
    }

    pub fn with_separator(
        registration_id: impl Into<String>,
        trip_date: impl Into<String>,
        separator: char,
    ) -> Self {
        let trip_date = trip_date.into();
        let (month, year) = month_year(&trip_date, separator);
        Self {
            registration_id: registration_id.into(),
            trip_date,
            month,
            year,
        }
    }
}

/// Extract (month, year) from a day-first date. Missing or non-numeric parts
/// are 0.
pub fn month_year(date: &str, separator: char) -> (u32, i32) {
    let mut parts = date.split(separator).skip(1);
    let month = parts.next().and_then(leading_int).unwrap_or(0);
    let year = parts.next().and_then(leading_int).unwrap_or(0);
    (month.max(0) as u32, year as i32)
}

/// Lenient integer parse: optional sign then the leading run of digits.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    // Clamp so the later narrowing casts stay meaningful.
    let value = value.min(i32::MAX as i64);
    Some(if negative { -value } else { value })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A trip joined with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    /// Position in the merge pass that produced this record.
    pub id: usize,
    pub boat_name: String,
    pub registration_id: String,
    pub trip_date: String,
    pub owner_name: String,
    pub month: u32,
    pub year: i32,
}

impl MergedRecord {
    /// First day of the trip's month, if (year, month) is a real calendar month.
    pub fn comparison_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OwnerFilter {
    #[default]
    All,
    Named(String),
}

impl OwnerFilter {
    /// `"all"` selects every owner, anything else is an exact owner name.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl std::fmt::Display for OwnerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub owner: OwnerFilter,
    pub text: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterState {
    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-indexed.
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_derives_month_and_year() {
        let trip = TripRecord::new("123-456", "01/01/2024");
        assert_eq!(trip.month, 1);
        assert_eq!(trip.year, 2024);
        assert_eq!(trip.trip_date, "01/01/2024");
    }

    #[test]
    fn trip_date_parts_default_to_zero() {
        assert_eq!(month_year("", '/'), (0, 0));
        assert_eq!(month_year("15", '/'), (0, 0));
        assert_eq!(month_year("15/xx/2023", '/'), (0, 2023));
        assert_eq!(month_year("15/03", '/'), (3, 0));
    }

    #[test]
    fn trip_date_parts_are_lenient() {
        // Trailing garbage after the digits is ignored, like a lenient parseInt.
        assert_eq!(month_year("07/ 08 /2022 10:00", '/'), (8, 2022));
        assert_eq!(month_year("07-08-2022", '-'), (8, 2022));
    }

    #[test]
    fn comparison_date_rejects_month_zero() {
        let rec = MergedRecord {
            id: 0,
            boat_name: "B".into(),
            registration_id: "R".into(),
            trip_date: "".into(),
            owner_name: "O".into(),
            month: 0,
            year: 0,
        };
        assert!(rec.comparison_date().is_none());
    }

    #[test]
    fn owner_filter_parse() {
        assert_eq!(OwnerFilter::parse("all"), OwnerFilter::All);
        assert_eq!(
            OwnerFilter::parse("Jean Dupont"),
            OwnerFilter::Named("Jean Dupont".into())
        );
        // Case-sensitive sentinel.
        assert_eq!(OwnerFilter::parse("All"), OwnerFilter::Named("All".into()));
    }

    #[test]
    fn owner_extra_lookup() {
        let mut owner = OwnerRecord::default();
        owner.extra.insert("port".into(), "Brest".into());
        assert_eq!(owner.get("port"), Some("Brest"));
        assert_eq!(owner.get("missing"), None);
    }
}
