//! Field-level formatters for the normalized user view.
//!
//! Every formatter is pure and tolerant of malformed input: on any parse
//! failure it returns the original string unchanged rather than erroring.

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// `MMDDYYYY` to `"October 17, 2002"`. If the month digits fall outside
/// 1-12 the raw 2-digit month token is shown in place of a name. Inputs
/// shorter than 8 characters pass through unchanged.
pub fn date_readable(raw: &str) -> String {
    let Some((month, day, year)) = split_mmddyyyy(raw) else {
        return raw.to_string();
    };
    let (Ok(m), Ok(d)) = (month.parse::<usize>(), day.parse::<u32>()) else {
        return raw.to_string();
    };
    let name = if (1..=12).contains(&m) { MONTH_NAMES[m - 1] } else { month };
    format!("{name} {d}, {year}")
}

/// `MMDDYYYY` to `"YYYY-MM-DD"`. No calendar validation: day 32 formats
/// as-is. Inputs shorter than 8 characters pass through unchanged.
pub fn date_iso(raw: &str) -> String {
    let Some((month, day, year)) = split_mmddyyyy(raw) else {
        return raw.to_string();
    };
    format!("{year}-{month}-{day}")
}

/// AAMVA sex code: `"1"` is Male, `"2"` is Female, anything else passes
/// through after trimming.
pub fn sex(raw: &str) -> String {
    match raw.trim() {
        "1" => "Male".to_string(),
        "2" => "Female".to_string(),
        other => other.to_string(),
    }
}

/// Total-inch height such as `"067 in"` to `5'7"`. Every `"in"` occurrence
/// is removed before parsing; a non-integer remainder passes the original
/// through unchanged.
pub fn height(raw: &str) -> String {
    let inches: i64 = match raw.replace("in", "").trim().parse() {
        Ok(total) => total,
        Err(_) => return raw.to_string(),
    };
    format!("{}'{}\"", inches / 12, inches % 12)
}

/// First 8 characters as (MM, DD, YYYY), or None when the input is too
/// short or the split would not land on character boundaries.
fn split_mmddyyyy(raw: &str) -> Option<(&str, &str, &str)> {
    if raw.len() < 8 {
        return None;
    }
    Some((raw.get(0..2)?, raw.get(2..4)?, raw.get(4..8)?))
}
