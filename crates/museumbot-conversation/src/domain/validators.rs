//! Input validation rules.
//!
//! The `is_valid_*` predicates answer yes/no; the `parse_*` companions return
//! the typed value or the [`InputRejection`] that explains the re-prompt.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use super::prompts;
use super::session::TicketCount;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("ISO date pattern is valid")
});

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+").expect("leading integer pattern is valid"));

static COMPACT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})$").expect("compact date pattern is valid")
});

/// Recoverable rejection of a message. The session stays where it is and the
/// user is asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputRejection {
    /// Not a number within the listed venues.
    #[error("invalid venue selection")]
    InvalidSelection,
    /// Malformed, impossible or past date.
    #[error("invalid visit date")]
    InvalidDate,
    /// The availability oracle turned the date down.
    #[error("date not available")]
    DateUnavailable,
    /// Not a number in `[1, 10]`.
    #[error("invalid ticket count")]
    InvalidTicketCount,
    /// Neither `yes` nor `no`.
    #[error("unclear confirmation")]
    UnclearConfirmation,
}

impl InputRejection {
    /// The re-prompt shown for this rejection. Always the same text for the
    /// same rejection.
    #[must_use]
    pub const fn reprompt(self) -> &'static str {
        match self {
            Self::InvalidSelection => prompts::INVALID_SELECTION,
            Self::InvalidDate => prompts::INVALID_DATE,
            Self::DateUnavailable => prompts::DATE_UNAVAILABLE,
            Self::InvalidTicketCount => prompts::INVALID_TICKET_COUNT,
            Self::UnclearConfirmation => prompts::CONFIRMATION_REPROMPT,
        }
    }
}

/// Reads the integer at the start of `text`, ignoring whatever follows it,
/// so `"2 please"` reads as `2`.
fn parse_integer(text: &str) -> Option<i64> {
    LEADING_INTEGER
        .find(text.trim_start())
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Parses a 1-based index into a list of `count` entries.
///
/// # Errors
///
/// Returns `InputRejection::InvalidSelection` when `text` does not start
/// with an integer in `[1, count]`.
pub fn parse_selection(text: &str, count: usize) -> Result<usize, InputRejection> {
    parse_integer(text)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| (1..=count).contains(n))
        .ok_or(InputRejection::InvalidSelection)
}

/// Whether `text` selects one of `count` listed entries.
#[must_use]
pub fn is_valid_selection(text: &str, count: usize) -> bool {
    parse_selection(text, count).is_ok()
}

/// Parses a ticket count.
///
/// # Errors
///
/// Returns `InputRejection::InvalidTicketCount` when `text` does not start
/// with an integer in `[1, 10]`.
pub fn parse_ticket_count(text: &str) -> Result<TicketCount, InputRejection> {
    parse_integer(text)
        .and_then(|n| u8::try_from(n).ok())
        .and_then(TicketCount::new)
        .ok_or(InputRejection::InvalidTicketCount)
}

/// Whether `text` is an acceptable ticket count.
#[must_use]
pub fn is_valid_ticket_count(text: &str) -> bool {
    parse_ticket_count(text).is_ok()
}

/// Rewrites `YYYYMMDD` as `YYYY-MM-DD`; any other text is returned as is.
#[must_use]
pub fn normalize_date_input(text: &str) -> Cow<'_, str> {
    COMPACT_DATE.replace(text, "$1-$2-$3")
}

/// Parses a `YYYY-MM-DD` visit date that is not before `today`.
///
/// The components must name a real calendar day: `2024-02-30` and
/// `2024-13-40` are rejected rather than rolled over.
///
/// # Errors
///
/// Returns `InputRejection::InvalidDate` on a shape mismatch, an impossible
/// day, or a date earlier than `today`.
pub fn parse_date(text: &str, today: NaiveDate) -> Result<NaiveDate, InputRejection> {
    let captures = ISO_DATE.captures(text).ok_or(InputRejection::InvalidDate)?;
    let component = |i: usize| captures[i].parse::<u32>().ok();

    let year = component(1).and_then(|y| i32::try_from(y).ok());
    let date = match (year, component(2), component(3)) {
        (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day),
        _ => None,
    };

    date.filter(|date| *date >= today)
        .ok_or(InputRejection::InvalidDate)
}

/// Whether `text` is a real, non-past `YYYY-MM-DD` date.
#[must_use]
pub fn is_valid_date(text: &str, today: NaiveDate) -> bool {
    parse_date(text, today).is_ok()
}
