use chrono::{Local, TimeZone};

/// Local wall-clock time (`HH:MM:SS`) of a millisecond timestamp.
///
/// Out-of-range timestamps fall back to the raw number.
pub fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.format("%H:%M:%S").to_string(),
        chrono::LocalResult::None => timestamp_ms.to_string(),
    }
}

/// Time plus milliseconds, used in tooltips where points are 100 ms apart.
pub fn format_time_precise(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S%.3f").to_string(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.format("%H:%M:%S%.3f").to_string(),
        chrono::LocalResult::None => timestamp_ms.to_string(),
    }
}
