//! Date parsing for COLIN payload fields.
use chrono::{NaiveDate, Weekday};
use iso8601::Date;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parses exactly `YYYY-MM-DD`: no sign, padding, or trailing time.
pub fn parse_strict_ymd(value: &str) -> Result<NaiveDate, String> {
    let shaped = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err("expected YYYY-MM-DD".to_string());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| e.to_string())
}

/// Calendar date of an ISO-8601 date or date-time.
///
/// Dates may be extended or basic (`2019-07-01`, `20190701`), week dates
/// (`2019-W27-1`) or ordinal dates (`2019-182`). An optional time follows `T`
/// or a space; it may be hour-only, use `,` or `.` before fractions, and end
/// in `Z` or an offset. The offset never moves the date.
pub fn parse_iso8601_date(value: &str) -> Result<NaiveDate, String> {
    let invalid = || "not an ISO-8601 date or date-time".to_string();

    let (rest, date) = iso8601::parsers::parse_date(value.as_bytes()).map_err(|_| invalid())?;
    if let Some((separator, time)) = rest.split_first() {
        if !matches!(*separator, b'T' | b't' | b' ') || !is_iso8601_time(time) {
            return Err(invalid());
        }
    }

    calendar_date(date).ok_or_else(|| "not a calendar date".to_string())
}

fn is_iso8601_time(time: &[u8]) -> bool {
    if parses_completely(time) {
        return true;
    }

    // Hour-only times (`10`, `10Z`, `10+02:00`) read as minute zero
    match time {
        [h1, h2, tail @ ..]
            if h1.is_ascii_digit()
                && h2.is_ascii_digit()
                && tail.first().map_or(true, |b| matches!(*b, b'Z' | b'+' | b'-')) =>
        {
            let mut padded = vec![*h1, *h2, b'0', b'0'];
            padded.extend_from_slice(tail);
            parses_completely(&padded)
        }
        _ => false,
    }
}

fn parses_completely(time: &[u8]) -> bool {
    matches!(iso8601::parsers::parse_time(time), Ok((rest, _)) if rest.is_empty())
}

fn calendar_date(date: Date) -> Option<NaiveDate> {
    match date {
        Date::YMD { year, month, day } => NaiveDate::from_ymd_opt(year, month, day),
        Date::Week { year, ww, d } => {
            let weekday = *WEEKDAYS.get(d.checked_sub(1)? as usize)?;
            NaiveDate::from_isoywd_opt(year, ww, weekday)
        }
        Date::Ordinal { year, ddd } => NaiveDate::from_yo_opt(year, ddd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn strict_ymd_accepts_plain_dates() {
        assert_eq!(
            parse_strict_ymd("2021-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 15).unwrap()
        );
    }

    #[test]
    fn strict_ymd_rejects_other_shapes() {
        for value in [
            " 2021-03-15",
            "+2021-03-15",
            "2021-03-15 ",
            "2021-3-15",
            "20210315",
            "2021/03/15",
            "2021-03-15T00:00:00",
            "2021-02-30",
        ] {
            assert!(parse_strict_ymd(value).is_err(), "{}", value);
        }
    }

    #[test]
    fn iso8601_dates() {
        for (value, expected) in [
            ("2019-07-01", (2019, 7, 1)),
            ("20190701", (2019, 7, 1)),
            ("2019-W27-1", (2019, 7, 1)),
            ("2019W271", (2019, 7, 1)),
            ("2019-182", (2019, 7, 1)),
        ] {
            let date = parse_iso8601_date(value).unwrap();
            assert_eq!((date.year(), date.month(), date.day()), expected, "{}", value);
        }
    }

    #[test]
    fn iso8601_week_date_uses_calendar_year() {
        // Monday of ISO week 1 of 2020 falls in December 2019
        let date = parse_iso8601_date("2020-W01-1").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 12, 30).unwrap());
    }

    #[test]
    fn iso8601_datetimes() {
        for value in [
            "2019-07-01T10",
            "2019-07-01T10Z",
            "2019-07-01T10:30",
            "2019-07-01T10:30Z",
            "2019-07-01T10:30:00",
            "2019-07-01 10:30:00",
            "2019-07-01T10:30:00.123456",
            "2019-07-01T10:30:00,5",
            "2019-07-01T103000",
            "2019-07-01T10:30:00+00:00",
            "2019-07-01T10:30:00-0800",
            "20190701T103000Z",
        ] {
            let date = parse_iso8601_date(value).unwrap_or_else(|e| panic!("{}: {}", value, e));
            assert_eq!(date, NaiveDate::from_ymd_opt(2019, 7, 1).unwrap(), "{}", value);
        }
    }

    #[test]
    fn iso8601_offset_does_not_move_the_date() {
        let date = parse_iso8601_date("2019-12-31T23:30:00-08:00").unwrap();
        assert_eq!(date.year(), 2019);
    }

    #[test]
    fn iso8601_rejects_garbage() {
        for value in [
            "July 1, 2019",
            "2019-07-01garbage",
            "2019-07-01T",
            "2019-07-01T1",
            "2019-07-01T10:3",
            "2019-02-30",
            "",
        ] {
            assert!(parse_iso8601_date(value).is_err(), "{}", value);
        }
    }
}
