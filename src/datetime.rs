//! Date parsing and conversion behind the evaluator's date coercion.
//!
//! Two string shapes are recognized when a date meets an ordering or
//! arithmetic operation. The primary form is ISO-8601 with exactly
//! three fractional digits and a mandatory offset,
//! `2014-06-12T17:30:00.000+02:00`. The fallback is the legacy
//! wall-clock form emitted by older tooling,
//! `Thu Jun 12 17:30:00 CEST 2014`, with English day and month names
//! and a fixed table of zone abbreviations. Anything else is handed
//! back untouched.
//!
//! All instants are milliseconds since the Unix epoch, UTC.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

const MILLIS_PER_DAY: i64 = 86_400_000;

static STANDARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4,})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})\.(\d{3})(Z|[+-]\d{2}:\d{2})$")
        .expect("BUG: invalid STANDARD_RE regex literal")
});

static LEGACY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(Mon|Tue|Wed|Thu|Fri|Sat|Sun) (Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) (\d{1,2}) (\d{1,2}):(\d{2}):(\d{2}) (GMT[+-]\d{2}:\d{2}|[A-Za-z]{1,5}) (\d{4})$",
    )
    .expect("BUG: invalid LEGACY_RE regex literal")
});

/// Normalizes a value to its millisecond instant where possible: a date
/// becomes its milliseconds, numbers pass through, and strings are
/// tried against the primary then the legacy format. Everything else,
/// including unparseable strings, comes back unchanged.
pub fn normalize_to_millis(value: Value) -> Value {
    match value {
        Value::Date(millis) => Value::Integer(millis),
        Value::String(s) => match parse_standard(&s).or_else(|| parse_legacy(&s)) {
            Some(millis) => Value::Integer(millis),
            None => Value::String(s),
        },
        other => other,
    }
}

/// Parses the primary ISO form into epoch milliseconds.
pub fn parse_standard(s: &str) -> Option<i64> {
    let caps = STANDARD_RE.captures(s.trim())?;

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u8 = caps.get(2)?.as_str().parse().ok()?;
    let day: u8 = caps.get(3)?.as_str().parse().ok()?;
    let hour: i64 = caps.get(4)?.as_str().parse().ok()?;
    let minute: i64 = caps.get(5)?.as_str().parse().ok()?;
    let second: i64 = caps.get(6)?.as_str().parse().ok()?;
    let millis: i64 = caps.get(7)?.as_str().parse().ok()?;
    let offset_minutes = parse_offset_minutes(caps.get(8)?.as_str())?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    let days = ymd_to_days(year, month, day);
    Some(
        days * MILLIS_PER_DAY + hour * 3_600_000 + minute * 60_000 + second * 1_000 + millis
            - i64::from(offset_minutes) * 60_000,
    )
}

/// Parses the legacy wall-clock form into epoch milliseconds.
///
/// The hour field runs 0 to 24; 24 means midnight at the end of the
/// named day. The day-of-week token is required but not cross-checked
/// against the date.
pub fn parse_legacy(s: &str) -> Option<i64> {
    let caps = LEGACY_RE.captures(s.trim())?;

    let month = month_number(caps.get(2)?.as_str())?;
    let day: u8 = caps.get(3)?.as_str().parse().ok()?;
    let mut hour: i64 = caps.get(4)?.as_str().parse().ok()?;
    let minute: i64 = caps.get(5)?.as_str().parse().ok()?;
    let second: i64 = caps.get(6)?.as_str().parse().ok()?;
    let zone_minutes = zone_offset_minutes(caps.get(7)?.as_str())?;
    let year: i32 = caps.get(8)?.as_str().parse().ok()?;

    if !(1..=31).contains(&day) || hour > 24 || minute > 59 || second > 59 {
        return None;
    }

    let mut days = ymd_to_days(year, month, day);
    if hour == 24 {
        hour = 0;
        days += 1;
    }

    Some(
        days * MILLIS_PER_DAY + hour * 3_600_000 + minute * 60_000 + second * 1_000
            - i64::from(zone_minutes) * 60_000,
    )
}

/// Renders an instant in the primary form, UTC.
pub fn format_utc(millis: i64) -> String {
    let days = millis.div_euclid(MILLIS_PER_DAY);
    let ms_of_day = millis.rem_euclid(MILLIS_PER_DAY);

    let (year, month, day) = days_to_ymd(days);
    let hour = ms_of_day / 3_600_000;
    let minute = ms_of_day % 3_600_000 / 60_000;
    let second = ms_of_day % 60_000 / 1_000;
    let milli = ms_of_day % 1_000;

    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{milli:03}Z")
}

fn parse_offset_minutes(s: &str) -> Option<i32> {
    if s == "Z" {
        return Some(0);
    }

    let sign = match s.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let hours: i32 = s.get(1..3)?.parse().ok()?;
    let minutes: i32 = s.get(4..6)?.parse().ok()?;

    if hours > 14 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

fn month_number(name: &str) -> Option<u8> {
    let n = match name {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(n)
}

fn zone_offset_minutes(zone: &str) -> Option<i32> {
    if let Some(rest) = zone.strip_prefix("GMT")
        && !rest.is_empty()
    {
        if rest.as_bytes().get(3) != Some(&b':') {
            return None;
        }
        let sign = match rest.as_bytes().first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return None,
        };
        let hours: i32 = rest.get(1..3)?.parse().ok()?;
        let minutes: i32 = rest.get(4..6)?.parse().ok()?;
        if hours > 14 || minutes > 59 {
            return None;
        }
        return Some(sign * (hours * 60 + minutes));
    }

    let minutes = match zone {
        "UT" | "UTC" | "GMT" | "Z" => 0,
        "EST" => -5 * 60,
        "EDT" => -4 * 60,
        "CST" => -6 * 60,
        "CDT" => -5 * 60,
        "MST" => -7 * 60,
        "MDT" => -6 * 60,
        "PST" => -8 * 60,
        "PDT" => -7 * 60,
        "HST" => -10 * 60,
        "AKST" => -9 * 60,
        "AKDT" => -8 * 60,
        "WET" => 0,
        "WEST" => 60,
        "BST" => 60,
        "CET" => 60,
        "CEST" => 2 * 60,
        "EET" => 2 * 60,
        "EEST" => 3 * 60,
        _ => return None,
    };
    Some(minutes)
}

fn ymd_to_days(year: i32, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y / 400 } else { (y - 399) / 400 };
    let yoe = (y - era * 400) as u32;
    let m = month as u32;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as u32 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    i64::from(era) * 146_097 + i64::from(doe) - 719_468
}

fn days_to_ymd(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z / 146_097 } else { (z - 146_096) / 146_097 };
    let doe = (z - era * 146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if m <= 2 { y + 1 } else { y };

    (year as i32, m as u8, d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_YEAR_2014: i64 = 1_388_534_400_000;

    #[test]
    fn parses_standard_utc() {
        assert_eq!(
            parse_standard("2014-01-01T00:00:00.000Z"),
            Some(NEW_YEAR_2014)
        );
    }

    #[test]
    fn parses_standard_with_offset() {
        assert_eq!(
            parse_standard("2014-01-01T01:00:00.000+01:00"),
            Some(NEW_YEAR_2014)
        );
        assert_eq!(
            parse_standard("2013-12-31T19:00:00.000-05:00"),
            Some(NEW_YEAR_2014)
        );
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(parse_standard("2014-13-01T00:00:00.000Z"), None);
        assert_eq!(parse_standard("2014-01-01T25:00:00.000Z"), None);
        assert_eq!(parse_standard("2014-01-01T00:00:00Z"), None);
        assert_eq!(parse_standard("2014-01-01T00:00:00.000"), None);
    }

    #[test]
    fn parses_legacy_zones() {
        assert_eq!(
            parse_legacy("Wed Jan 01 00:00:00 UTC 2014"),
            Some(NEW_YEAR_2014)
        );
        assert_eq!(
            parse_legacy("Tue Dec 31 19:00:00 EST 2013"),
            Some(NEW_YEAR_2014)
        );
        assert_eq!(
            parse_legacy("Wed Jan 01 01:00:00 CET 2014"),
            Some(NEW_YEAR_2014)
        );
        assert_eq!(
            parse_legacy("Wed Jan 01 01:00:00 GMT+01:00 2014"),
            Some(NEW_YEAR_2014)
        );
    }

    #[test]
    fn legacy_hour_24_is_end_of_day() {
        assert_eq!(
            parse_legacy("Wed Jan 01 24:00:00 UTC 2014"),
            Some(NEW_YEAR_2014 + 86_400_000)
        );
    }

    #[test]
    fn unknown_zone_fails() {
        assert_eq!(parse_legacy("Wed Jan 01 00:00:00 XQZ 2014"), None);
    }

    #[test]
    fn formats_round_trip() {
        let formatted = format_utc(NEW_YEAR_2014);
        assert_eq!(formatted, "2014-01-01T00:00:00.000Z");
        assert_eq!(parse_standard(&formatted), Some(NEW_YEAR_2014));

        let before_epoch = -1_234_567;
        assert_eq!(
            parse_standard(&format_utc(before_epoch)),
            Some(before_epoch)
        );
    }

    #[test]
    fn normalizes_values() {
        assert_eq!(
            normalize_to_millis(Value::Date(42)),
            Value::Integer(42)
        );
        assert_eq!(
            normalize_to_millis(Value::String("2014-01-01T00:00:00.000Z".to_string())),
            Value::Integer(NEW_YEAR_2014)
        );
        assert_eq!(
            normalize_to_millis(Value::String("not a date".to_string())),
            Value::String("not a date".to_string())
        );
        assert_eq!(normalize_to_millis(Value::Integer(7)), Value::Integer(7));
    }
}
