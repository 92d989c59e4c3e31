//! Timestamp heuristics shared by the parsers.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

// Zone-less layouts tried by `parse_flexible_timestamp`, interpreted as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

// Leap year used to read month/day before the real year is applied.
const LEAP_YEAR: i32 = 2000;

/// Parse a BSD syslog timestamp such as `Jun 10 08:30:00` or `Jun  5 08:30:00`.
///
/// The format carries no year, so the current wall-clock year is assumed.
/// Entries logged near a year boundary may therefore be misdated. `Feb 29`
/// in a non-leap year rolls over to `Mar 1`.
pub fn parse_syslog_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let with_year = format!("{LEAP_YEAR} {}", s.trim());
    let parsed = NaiveDateTime::parse_from_str(&with_year, "%Y %b %e %H:%M:%S").ok()?;

    let year = Utc::now().year();
    let date = NaiveDate::from_ymd_opt(year, parsed.month(), parsed.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))?;
    Some(Utc.from_utc_datetime(&date.and_time(parsed.time())))
}

/// Try the known CSV timestamp layouts in order; first match wins.
///
/// Order: RFC 3339, `T`-separated, space-separated, US date, Apache common
/// log, syslog with trailing year, bare date.
pub fn parse_flexible_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%d/%b/%Y:%H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%b %e %H:%M:%S %Y") {
        return Some(Utc.from_utc_datetime(&ndt));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn syslog_uses_current_year() {
        let ts = parse_syslog_timestamp("Jun 10 08:30:00").unwrap();
        assert_eq!(ts.year(), Utc::now().year());
        assert_eq!(ts.month(), 6);
        assert_eq!(ts.day(), 10);
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn syslog_space_padded_day() {
        let ts = parse_syslog_timestamp("Jan  5 12:00:01").unwrap();
        assert_eq!(ts.day(), 5);
        assert_eq!(ts.second(), 1);
    }

    #[test]
    fn syslog_feb_29_follows_current_year() {
        let year = Utc::now().year();
        let ts = parse_syslog_timestamp("Feb 29 23:59:58").unwrap();
        let expected = NaiveDate::from_ymd_opt(year, 2, 29)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).unwrap());
        assert_eq!(ts.date_naive(), expected);
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (23, 59, 58));
    }

    #[test]
    fn syslog_rejects_garbage() {
        assert!(parse_syslog_timestamp("not a time").is_none());
    }

    #[test]
    fn flexible_rfc3339() {
        assert_eq!(
            parse_flexible_timestamp("2025-06-10T08:30:00Z"),
            Some(utc(2025, 6, 10, 8, 30, 0))
        );
        assert_eq!(
            parse_flexible_timestamp("2025-06-10T10:30:00+02:00"),
            Some(utc(2025, 6, 10, 8, 30, 0))
        );
    }

    #[test]
    fn flexible_naive_variants() {
        let expected = Some(utc(2025, 6, 10, 8, 30, 0));
        assert_eq!(parse_flexible_timestamp("2025-06-10T08:30:00"), expected);
        assert_eq!(parse_flexible_timestamp("2025-06-10 08:30:00"), expected);
        assert_eq!(parse_flexible_timestamp("06/10/2025 08:30:00"), expected);
    }

    #[test]
    fn flexible_apache_common_log() {
        assert_eq!(
            parse_flexible_timestamp("10/Jun/2025:10:30:00 +0200"),
            Some(utc(2025, 6, 10, 8, 30, 0))
        );
    }

    #[test]
    fn flexible_syslog_with_year() {
        assert_eq!(
            parse_flexible_timestamp("Jun 10 08:30:00 2025"),
            Some(utc(2025, 6, 10, 8, 30, 0))
        );
    }

    #[test]
    fn flexible_bare_date_is_midnight() {
        assert_eq!(
            parse_flexible_timestamp("2025-06-10"),
            Some(utc(2025, 6, 10, 0, 0, 0))
        );
    }

    #[test]
    fn flexible_unknown_is_none() {
        assert!(parse_flexible_timestamp("yesterday").is_none());
        assert!(parse_flexible_timestamp("").is_none());
    }
}
