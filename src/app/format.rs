//! Human-readable abbreviations for sizes and durations

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

const SI_PREFIXES: [&str; 6] = ["k", "M", "G", "T", "P", "E"];

/// Format a byte count with SI prefixes
///
/// Counts below 1024 are printed as plain bytes, so 1000-1023 stay in bytes
/// even though SI would promote them.
pub fn abbreviate_space(bytes: f64) -> String {
    const UNIT: f64 = 1000.0;

    if bytes < 1024.0 {
        return format!("{} B", bytes.max(0.0) as u64);
    }

    let mut scaled = bytes / UNIT;
    let mut index = 0;
    while scaled >= UNIT && index < SI_PREFIXES.len() - 1 {
        scaled /= UNIT;
        index += 1;
    }
    format!("{:.2} {}B", scaled, SI_PREFIXES[index])
}

/// Format a duration in seconds as a coarse count of its largest unit
///
/// Negative durations are formatted by magnitude with an " in future" suffix.
pub fn abbreviate_time(seconds: f64) -> String {
    let (seconds, postfix) = if seconds < 0.0 {
        (-seconds, " in future")
    } else {
        (seconds, "")
    };

    let plural = |count: f64, unit: &str| {
        let count = count as u64;
        if count == 1 {
            format!("{} {}{}", count, unit, postfix)
        } else {
            format!("{} {}s{}", count, unit, postfix)
        }
    };

    if seconds < 120.0 {
        plural(seconds, "second")
    } else if seconds < 3.0 * HOUR {
        plural(seconds / MINUTE, "minute")
    } else if seconds < 2.0 * DAY {
        plural(seconds / HOUR, "hour")
    } else if seconds < 2.0 * MONTH {
        plural(seconds / DAY, "day")
    } else if seconds < 4.0 * YEAR {
        plural(seconds / MONTH, "month")
    } else {
        plural(seconds / YEAR, "year")
    }
}
