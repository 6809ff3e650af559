//! Mapping between dates and event file names.
//!
//! An event file is named `YYYY<d>MM<d>DD` where `<d>` is the configured file
//! delimiter. Partial dates encode to a prefix of that layout, so the length
//! of the prefix tells how specific a query is.

use super::date::{Date, PartialDate};

/// Encodes a (possibly partial) date into a file name or file name prefix.
///
/// # Examples
///
/// ```
/// use moo::journal_core::{encode_prefix, PartialDate};
///
/// assert_eq!(encode_prefix(&PartialDate::year(2023), '-'), "2023-");
/// assert_eq!(encode_prefix(&PartialDate::month(2023, 6), '-'), "2023-06-");
/// assert_eq!(encode_prefix(&PartialDate::day(2023, 6, 1), '-'), "2023-06-01");
/// ```
pub fn encode_prefix(date: &PartialDate, file_delim: char) -> String {
    let mut prefix = format!("{:04}{}", date.year, file_delim);
    if let Some(month) = date.month {
        prefix.push_str(&format!("{:02}{}", month, file_delim));
        if let Some(day) = date.day {
            prefix.push_str(&format!("{:02}", day));
        }
    }
    prefix
}

/// Reads up to `width` ASCII digits from the front of `input`.
fn take_number(input: &str, width: usize) -> Option<(i32, &str)> {
    let digits = input
        .bytes()
        .take(width)
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let value = input[..digits].parse().ok()?;
    Some((value, &input[digits..]))
}

/// Decodes the date at the start of a file name.
///
/// Anything after the day is ignored. Decoding stops at the first field that
/// does not match the layout and the remaining fields stay zero, so names of
/// a different shape decode to dates that are never meaningful.
///
/// # Examples
///
/// ```
/// use moo::journal_core::{decode, Date};
///
/// assert_eq!(decode("2023-06-01", '-'), Date::new(2023, 6, 1));
/// assert_eq!(decode("2023-06-01.bak", '-'), Date::new(2023, 6, 1));
/// assert_eq!(decode("2023_06_01", '-'), Date::new(2023, 0, 0));
/// ```
pub fn decode(file_name: &str, file_delim: char) -> Date {
    let mut date = Date::default();

    let Some((year, rest)) = take_number(file_name, 4) else {
        return date;
    };
    date.year = year;

    let Some(rest) = rest.strip_prefix(file_delim) else {
        return date;
    };
    let Some((month, rest)) = take_number(rest, 2) else {
        return date;
    };
    date.month = month;

    let Some(rest) = rest.strip_prefix(file_delim) else {
        return date;
    };
    if let Some((day, _)) = take_number(rest, 2) {
        date.day = day;
    }

    date
}
