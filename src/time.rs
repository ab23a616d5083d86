//! Clock arithmetic over GTFS `HH:MM[:SS]` time strings.
//!
//! Hours may exceed 23 to mark service continuing past midnight ("25:10" is
//! 1:10 AM on the following day). The raw strings are never normalized; all
//! arithmetic happens on minutes since the service day's midnight.

/// Parses `HH:MM` or `HH:MM:SS` into minutes since midnight of the service
/// day. Hours of 24 and above are accepted; seconds are truncated.
pub fn parse_clock(s: &str) -> Option<u32> {
    let mut parts = s.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Minutes from departure to arrival, wrapping forward by one day when the
/// raw difference is negative.
pub fn duration_minutes(departure: &str, arrival: &str) -> Option<u32> {
    let dep = parse_clock(departure)? as i64;
    let arr = parse_clock(arrival)? as i64;

    let mut minutes = arr - dep;
    if minutes < 0 {
        minutes += 24 * 60;
    }
    Some(minutes as u32)
}

/// Renders a schedule time on a 12-hour clock, marking next-day times with
/// a `(+1)` suffix.
pub fn format_clock(s: &str) -> String {
    let Some(total) = parse_clock(s) else {
        return s.to_string();
    };

    let next_day = total >= 24 * 60;
    let hour = (total / 60) % 24;
    let minute = total % 60;

    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    if next_day {
        format!("{}:{:02} {} (+1)", display_hour, minute, meridiem)
    } else {
        format!("{}:{:02} {}", display_hour, minute, meridiem)
    }
}
