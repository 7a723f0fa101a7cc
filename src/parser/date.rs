use super::ParseError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static TIME_OF_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("static regex must compile")
});
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("static regex must compile"));
static NUMERIC_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)[-/]([0-9]+)[-/]([0-9]+)$").expect("static regex must compile")
});

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// The date half of an `ls -l` timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateToken {
    /// `Dec 10`: the year must come from elsewhere
    MonthDay { month: u32, day: u32 },
    /// `2020-01-15`: already complete
    Full(NaiveDate),
}

/// Resolve the two timestamp captures of a listing line into a full timestamp
///
/// `ls` prints `HH:MM` instead of a year for recent files. In that case the
/// year is the one that puts the date at or before `now`: the current year,
/// or the previous one if the current year would place it in the future.
/// A four-digit token is the year itself and yields midnight.
///
/// A `time_or_year` token of any other shape is `NoMatch`. Tokens of an
/// accepted shape that do not name a real date or time are
/// `InvalidTimestamp`.
pub fn resolve_modified_at(
    month_day: &str,
    time_or_year: &str,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, ParseError> {
    if let Some(caps) = TIME_OF_DAY_RE.captures(time_or_year) {
        let time = time_of_day(&caps[1], &caps[2], time_or_year)?;
        let date = match parse_date_token(month_day)? {
            DateToken::Full(date) => date,
            DateToken::MonthDay { month, day } => infer_year(month, day, now, month_day)?,
        };
        return Ok(date.and_time(time));
    }

    if YEAR_RE.is_match(time_or_year) {
        let date = match parse_date_token(month_day)? {
            DateToken::Full(date) => date,
            DateToken::MonthDay { month, day } => {
                let year: i32 = time_or_year
                    .parse()
                    .map_err(|_| ParseError::invalid_timestamp(time_or_year, "bad year"))?;
                NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                    ParseError::invalid_timestamp(
                        format!("{} {}", month_day, time_or_year),
                        "no such calendar date",
                    )
                })?
            }
        };
        return Ok(date.and_time(NaiveTime::MIN));
    }

    trace!(time_or_year, "unrecognized time/year token");
    Err(ParseError::NoMatch)
}

fn time_of_day(hour: &str, minute: &str, raw: &str) -> Result<NaiveTime, ParseError> {
    let hour: u32 = hour
        .parse()
        .map_err(|_| ParseError::invalid_timestamp(raw, "bad hour"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| ParseError::invalid_timestamp(raw, "bad minute"))?;

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| ParseError::invalid_timestamp(raw, "no such time of day"))
}

/// Pick the year for a year-less `Mon DD` so the date is not in the future
///
/// The candidate is compared at midnight. A `Feb 29` that does not exist in
/// the current year can only be from an earlier one.
fn infer_year(
    month: u32,
    day: u32,
    now: NaiveDateTime,
    raw: &str,
) -> Result<NaiveDate, ParseError> {
    let this_year = now.year();
    let year = match NaiveDate::from_ymd_opt(this_year, month, day) {
        Some(candidate) if candidate.and_time(NaiveTime::MIN) > now => this_year - 1,
        Some(_) => this_year,
        None => this_year - 1,
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::invalid_timestamp(raw, "no such calendar date"))
}

fn parse_date_token(token: &str) -> Result<DateToken, ParseError> {
    if let Some(caps) = NUMERIC_DATE_RE.captures(token) {
        return numeric_date(&caps[1], &caps[2], &caps[3], token).map(DateToken::Full);
    }

    let mut words = token.split_whitespace();
    let (first, second) = match (words.next(), words.next(), words.next()) {
        (Some(first), Some(second), None) => (first, second),
        _ => return Err(ParseError::invalid_timestamp(token, "expected month and day")),
    };

    // `Dec 10` is the norm; some localized servers print `10 Dec`
    let (month, day) = match (month_number(first), month_number(second)) {
        (Some(month), None) => (month, second),
        (None, Some(month)) => (month, first),
        _ => return Err(ParseError::invalid_timestamp(token, "unknown month")),
    };
    let day: u32 = day
        .parse()
        .map_err(|_| ParseError::invalid_timestamp(token, "bad day of month"))?;

    // Validate against a leap year so Feb 29 survives until the year is known
    if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
        return Err(ParseError::invalid_timestamp(token, "no such calendar date"));
    }

    Ok(DateToken::MonthDay { month, day })
}

/// `YYYY-MM-DD` when the first field has four digits, else `MM-DD-YY[YY]`
fn numeric_date(a: &str, b: &str, c: &str, raw: &str) -> Result<NaiveDate, ParseError> {
    let bad = || ParseError::invalid_timestamp(raw, "bad numeric date");
    let (year, month, day) = if a.len() == 4 {
        (a, b, c)
    } else {
        (c, a, b)
    };

    let mut year: i32 = year.parse().map_err(|_| bad())?;
    let month: u32 = month.parse().map_err(|_| bad())?;
    let day: u32 = day.parse().map_err(|_| bad())?;

    if year < 100 {
        year += if year < 70 { 2000 } else { 1900 };
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::invalid_timestamp(raw, "no such calendar date"))
}

/// English month name or its three-letter prefix, any case
fn month_number(word: &str) -> Option<u32> {
    let word = word.to_ascii_lowercase();
    if word.len() < 3 {
        return None;
    }

    MONTHS
        .iter()
        .position(|name| name.starts_with(&word) && (word.len() == 3 || word.len() == name.len()))
        .map(|idx| idx as u32 + 1)
}
