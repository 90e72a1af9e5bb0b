//! Jalali (Solar Hijri) calendar support
//!
//! All user-facing dates are Jalali `YYYY/MM/DD` strings; comparisons and
//! arithmetic happen on proleptic Gregorian [`NaiveDate`]s. Conversion uses the
//! break-table leap rule (Borkowski), which agrees with the astronomical
//! calendar for every year in [`MIN_YEAR`]..=[`MAX_YEAR`].

use chrono::{Datelike, Days, Local, NaiveDate};
use std::fmt;

/// First supported Jalali year
pub const MIN_YEAR: i32 = 1;
/// Last supported Jalali year
pub const MAX_YEAR: i32 = 3177;

/// Jalali years at which the 33-year leap cycle is re-anchored.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

// The leap rule needs a break after the last year, and every year must fit
// chrono's range (NaiveDate::MAX is in year 262142).
const _: () = assert!(MIN_YEAR > BREAKS[0] && MAX_YEAR < BREAKS[BREAKS.len() - 1]);
const _: () = assert!(MAX_YEAR + 622 < 262_142);

/// Days in Farvardin..Shahrivar (6 x 31)
const FIRST_HALF_DAYS: u32 = 186;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// A validated date in the Jalali calendar
///
/// Construction goes through [`JalaliDate::new`], [`JalaliDate::parse`] or
/// [`JalaliDate::from_gregorian`], so every value is a real calendar day.
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
}

/// Leap-cycle facts about one Jalali year
struct YearInfo {
    /// Years since the last leap year; 0 means this year is leap
    leap: i32,
    /// Gregorian year containing Farvardin 1
    gregorian_year: i32,
    /// Day of March on which Farvardin 1 falls
    march_day: u32,
}

fn year_info(year: i32) -> Option<YearInfo> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }

    let gregorian_year = year + 621;
    let mut leap_jalali = -14;
    let mut previous_break = BREAKS[0];
    let mut jump = 0;
    for &next_break in &BREAKS[1..] {
        jump = next_break - previous_break;
        if year < next_break {
            break;
        }
        leap_jalali += jump / 33 * 8 + jump % 33 / 4;
        previous_break = next_break;
    }

    let mut n = year - previous_break;
    leap_jalali += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_jalali += 1;
    }

    let leap_gregorian = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_jalali - leap_gregorian;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(YearInfo {
        leap,
        gregorian_year,
        march_day: u32::try_from(march_day).ok()?,
    })
}

/// Gregorian date of Farvardin 1 of `year`
fn nowruz(year: i32) -> Option<NaiveDate> {
    let info = year_info(year)?;
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march_day)
}

/// Whether `year` has a 30-day Esfand
pub fn is_leap_year(year: i32) -> bool {
    year_info(year).is_some_and(|info| info.leap == 0)
}

/// Number of days in `month` of `year`, or `None` for an invalid year/month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 if is_leap_year(year) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

/// Zero-based day of the year for a valid month/day pair
fn day_of_year(month: u32, day: u32) -> u32 {
    let before = if month <= 7 {
        (month - 1) * 31
    } else {
        FIRST_HALF_DAYS + (month - 7) * 30
    };
    before + day - 1
}

/// Numeric value of an ASCII, Persian or Arabic-Indic digit
fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '\u{06F0}'..='\u{06F9}' => Some(c as u32 - 0x06F0),
        '\u{0660}'..='\u{0669}' => Some(c as u32 - 0x0660),
        _ => None,
    }
}

fn parse_field(field: &str) -> Option<u32> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field.chars().try_fold(0u32, |acc, c| {
        acc.checked_mul(10)?.checked_add(digit_value(c)?)
    })
}

impl JalaliDate {
    /// Build a date, returning `None` unless it names a real Jalali day
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        let length = days_in_month(year, month)?;
        (1..=length)
            .contains(&day)
            .then_some(Self { year, month, day })
    }

    /// Parse a `YYYY/MM/DD` string
    ///
    /// Returns `None` for anything that is not exactly three numeric fields
    /// naming a valid date. Fields may be unpadded and may use Persian digits.
    ///
    /// # Examples
    /// ```
    /// use visit_tracker::jalali::JalaliDate;
    ///
    /// let date = JalaliDate::parse("1403/01/01").unwrap();
    /// assert_eq!(date.to_string(), "1403/01/01");
    /// assert!(JalaliDate::parse("1403/13/01").is_none());
    /// assert!(JalaliDate::parse("").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let mut fields = text.trim().split('/');
        let year = i32::try_from(parse_field(fields.next()?)?).ok()?;
        let month = parse_field(fields.next()?)?;
        let day = parse_field(fields.next()?)?;
        if fields.next().is_some() {
            return None;
        }
        Self::new(year, month, day)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Convert to the equivalent Gregorian date
    pub fn to_gregorian(self) -> NaiveDate {
        // Construction only admits supported years; the const assertions above keep them in chrono's range.
        nowruz(self.year)
            .and_then(|start| {
                start.checked_add_days(Days::new(u64::from(day_of_year(self.month, self.day))))
            })
            .expect("supported Jalali years map inside chrono's date range")
    }

    /// Convert a Gregorian date, returning `None` outside the supported years
    pub fn from_gregorian(date: NaiveDate) -> Option<Self> {
        // Farvardin 1 falls in March, so earlier days belong to the previous Jalali year.
        let year = date.year() - 621;
        let (year, start) = match nowruz(year) {
            Some(start) if date >= start => (year, start),
            _ => (year - 1, nowruz(year - 1)?),
        };

        let offset = u32::try_from(date.signed_duration_since(start).num_days()).ok()?;
        if offset < FIRST_HALF_DAYS {
            return Self::new(year, 1 + offset / 31, offset % 31 + 1);
        }
        // Past Esfand's last day this yields month 13 or Esfand 30 of a common year.
        let offset = offset - FIRST_HALF_DAYS;
        Self::new(year, 7 + offset / 30, offset % 30 + 1)
    }

    /// Today's date on the local clock
    pub fn today() -> Option<Self> {
        Self::from_gregorian(local_date_today())
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Parse a Jalali date string straight to its Gregorian equivalent
pub fn parse_to_gregorian(text: &str) -> Option<NaiveDate> {
    JalaliDate::parse(text).map(JalaliDate::to_gregorian)
}

/// Format a Gregorian date as a Jalali string, or empty when out of range
pub fn format_gregorian(date: NaiveDate) -> String {
    JalaliDate::from_gregorian(date)
        .map(|d| d.to_string())
        .unwrap_or_default()
}
