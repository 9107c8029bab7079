use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Formats accepted for an expense date: what a date input produces, and the US style used by
/// spreadsheets.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// The date of an expense as entered, along with its parsed calendar date if it has one.
///
/// Dates compare chronologically. Text that is not a date sorts before every real date, and such
/// entries compare among themselves by their text.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ExpenseDate {
    text: String,
    date: Option<NaiveDate>,
}

impl ExpenseDate {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let date = parse_date(&text);
        Self { text, date }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Chronological comparison.
    pub fn cmp_chrono(&self, other: &ExpenseDate) -> Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => self.text.cmp(&other.text),
        }
    }
}

/// Parses a date in one of the accepted formats.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(value: NaiveDate) -> Self {
        Self {
            text: value.format("%Y-%m-%d").to_string(),
            date: Some(value),
        }
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ExpenseDate::new(s))
    }
}
