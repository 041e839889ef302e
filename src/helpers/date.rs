//! Date helper functions

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use chrono_tz::Tz;
use thiserror::Error;

use crate::i18n::Locale;

/// Placeholder rendered when a post has no usable publication date
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// Date parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date: {0:?}")]
    Invalid(String),
}

/// Formats content API dates for display
///
/// # Examples
/// ```ignore
/// let formatter = DateFormatter::default();
/// formatter.format("2023-03-15", false)?;          // -> "15 Mar 2023"
/// formatter.format("2023-03-15T14:05:00", true)?;  // -> "15 Mar 2023 at 14:05"
/// ```
#[derive(Debug, Clone)]
pub struct DateFormatter {
    locale: Locale,
    timezone: Tz,
    placeholder: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(Locale::En, Tz::UTC)
    }
}

impl DateFormatter {
    pub fn new(locale: Locale, timezone: Tz) -> Self {
        Self {
            locale,
            timezone,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Format a date as `DD Mon YYYY`, or `DD Mon YYYY at HH:mm` when `with_time` is set
    pub fn format(&self, date: &str, with_time: bool) -> Result<String, DateError> {
        let local = parse_date(date, self.timezone)?;
        Ok(self.render(&local, with_time))
    }

    /// Display string for a post's publication date
    ///
    /// Missing or unparseable dates become the placeholder.
    pub fn display(&self, date: Option<&str>) -> String {
        match date {
            None => self.placeholder.clone(),
            Some(raw) => self.format(raw, false).unwrap_or_else(|e| {
                tracing::warn!("{}, rendering placeholder", e);
                self.placeholder.clone()
            }),
        }
    }

    fn render(&self, date: &NaiveDateTime, with_time: bool) -> String {
        let mut out = format!(
            "{:02} {} {:04}",
            date.day(),
            self.locale.month_abbrev(date.month()),
            date.year()
        );
        if with_time {
            out.push_str(&format!(
                " {} {:02}:{:02}",
                self.locale.at_word(),
                date.hour(),
                date.minute()
            ));
        }
        out
    }
}

/// Parse a date string into wall-clock time in `timezone`
///
/// Inputs carrying an offset are converted; naive inputs are taken as already local.
pub fn parse_date(date: &str, timezone: Tz) -> Result<NaiveDateTime, DateError> {
    let s = date.trim();
    if s.is_empty() {
        return Err(DateError::Invalid(date.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&timezone).naive_local());
    }

    // Prismic style offsets have no colon: 2021-03-15T19:25:28+0000
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&timezone).naive_local());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Ok(naive);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| DateError::Invalid(date.to_string()))
}
