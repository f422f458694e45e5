//! Mapping between calendar dates and entry file names.

use crate::constants::{FORMAT_PROBE_DATE, LOOKBACK_DAYS};
use crate::errors::ConfigError;
use chrono::format::{Item, StrftimeItems};
use chrono::{Days, Locale, NaiveDate};
use std::fmt::Write as _;

/// Renders and parses entry file names with a strftime-style format.
///
/// # Examples
///
/// ```
/// use diary::journal_core::EntryNaming;
/// use chrono::NaiveDate;
///
/// let naming = EntryNaming::new("%Y/%m/%d.md").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
///
/// assert_eq!(naming.date_to_file_name(date), "2024/03/05.md");
/// assert_eq!(naming.file_name_to_date("2024/03/05.md"), Some(date));
/// assert_eq!(naming.file_name_to_date("notes.md"), None);
/// ```
#[derive(Debug, Clone)]
pub struct EntryNaming {
    format: String,
    locale: Option<Locale>,
}

impl EntryNaming {
    /// Validates `format` by rendering a probe date with it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` for an empty format and
    /// `ConfigError::InvalidFileFormat` when the format has unknown specifiers
    /// or needs more than a date (a time of day, a time zone).
    pub fn new(format: &str) -> Result<Self, ConfigError> {
        if format.is_empty() {
            return Err(ConfigError::MissingSetting("file_format"));
        }

        let invalid = |reason: &str| ConfigError::InvalidFileFormat {
            format: format.to_string(),
            reason: reason.to_string(),
        };

        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid("unknown or incomplete % specifier"));
        }

        let mut rendered = String::new();
        write!(rendered, "{}", probe_date().format(format))
            .map_err(|_| invalid("entries are named by date only, without time or time zone"))?;

        Ok(Self {
            format: format.to_string(),
            locale: None,
        })
    }

    /// Renders month and weekday names in `locale`.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Renders `date` as an entry file name.
    pub fn date_to_file_name(&self, date: NaiveDate) -> String {
        match self.locale {
            Some(locale) => date.format_localized(&self.format, locale).to_string(),
            None => date.format(&self.format).to_string(),
        }
    }

    /// Parses an entry file name back into its date.
    ///
    /// Names that do not conform to the format yield `None`.
    pub fn file_name_to_date(&self, name: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(name, &self.format).ok()
    }

    /// Whether every date can be recovered from its file name.
    ///
    /// False for formats that leave out the year, month or day, or that spell
    /// names in a locale the parser cannot read back.
    pub fn round_trips(&self) -> bool {
        let probe = probe_date();
        self.file_name_to_date(&self.date_to_file_name(probe)) == Some(probe)
    }

    /// Finds the closest date before `end` whose entry exists.
    ///
    /// Tries `end - 1` through `end - LOOKBACK_DAYS` in that order and stops at
    /// the first date for which `exists` accepts the rendered file name.
    pub fn find_previous_entry_date<F>(&self, end: NaiveDate, mut exists: F) -> Option<NaiveDate>
    where
        F: FnMut(&str) -> bool,
    {
        (1..=LOOKBACK_DAYS)
            .map_while(|offset| end.checked_sub_days(Days::new(offset)))
            .find(|&date| exists(&self.date_to_file_name(date)))
    }
}

fn probe_date() -> NaiveDate {
    let (year, month, day) = FORMAT_PROBE_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
