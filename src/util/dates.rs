use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Engine timestamp format (always UTC)
pub const ENGINE_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Parse an engine timestamp like `20260206T120000Z`.
pub fn parse_engine_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), ENGINE_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a raw engine date for display in the local timezone.
///
/// Empty or `-` renders as `-`; anything unparsable is returned unchanged.
pub fn format_date(raw: &str, relative: bool) -> String {
    format_date_in(raw, relative, &Local, Local::now().date_naive())
}

/// `format_date` against an explicit timezone and "today".
pub fn format_date_in<Tz: TimeZone>(raw: &str, relative: bool, tz: &Tz, today: NaiveDate) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        return "-".to_string();
    }
    let Some(utc) = parse_engine_date(raw) else {
        return raw.to_string();
    };
    let local = utc.with_timezone(tz);
    if relative {
        format_relative(local.date_naive(), today)
    } else {
        local.format("%a %d-%m-%Y").to_string()
    }
}

/// Human distance from `today` to `date`: "today", "in 3 days", "2 weeks ago"...
pub fn format_relative(date: NaiveDate, today: NaiveDate) -> String {
    let days = (date - today).num_days();
    match days {
        0 => return "today".to_string(),
        1 => return "tomorrow".to_string(),
        -1 => return "yesterday".to_string(),
        _ => {}
    }

    let abs = days.unsigned_abs();
    let (count, unit) = if abs < 7 {
        (abs, "day")
    } else if abs < 30 {
        (abs / 7, "week")
    } else if abs < 365 {
        (abs / 30, "month")
    } else {
        (abs / 365, "year")
    };
    let plural = if count == 1 { "" } else { "s" };

    if days > 0 {
        format!("in {} {}{}", count, unit, plural)
    } else {
        format!("{} {}{} ago", count, unit, plural)
    }
}
