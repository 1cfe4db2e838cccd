//! Display formatting for durations and byte sizes

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a duration in seconds as `M:SS`.
///
/// Minutes are not padded and have no upper bound (`3600.0` is `"60:00"`).
/// Negative, NaN and infinite input render as `"0:00"`.
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{remaining:02}")
}

/// Format a byte count using binary units, e.g. `"1.5 KB"`.
///
/// Picks the largest unit in which the value is at least 1, rounds to two
/// decimals and drops trailing zeros. Sizes beyond the GB range stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024;
        unit += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Round to two decimals (ties away from zero) and strip a trailing `.00` / `0`.
fn trim_decimals(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_basic() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.0), "1:05");
        assert_eq!(format_duration(3599.0), "59:59");
    }

    #[test]
    fn duration_truncates_fractional_seconds() {
        assert_eq!(format_duration(59.999), "0:59");
        assert_eq!(format_duration(61.5), "1:01");
    }

    #[test]
    fn duration_minutes_are_unbounded() {
        assert_eq!(format_duration(3600.0), "60:00");
        assert_eq!(format_duration(6000.0), "100:00");
    }

    #[test]
    fn duration_out_of_domain_is_zero() {
        assert_eq!(format_duration(-5.0), "0:00");
        assert_eq!(format_duration(f64::NAN), "0:00");
        assert_eq!(format_duration(f64::INFINITY), "0:00");
    }

    #[test]
    fn file_size_basic() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
    }

    #[test]
    fn file_size_stays_in_bytes_below_one_kb() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1000), "1000 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn file_size_rounds_to_two_decimals() {
        // 1.234 KB
        assert_eq!(format_file_size(1264), "1.23 KB");
        assert_eq!(format_file_size(16 * 1024 * 1024), "16 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 / 2), "1.5 GB");
    }

    #[test]
    fn file_size_rounds_ties_up() {
        // 1.125 KB, 1.375 KB, 1.125 MB
        assert_eq!(format_file_size(1152), "1.13 KB");
        assert_eq!(format_file_size(1408), "1.38 KB");
        assert_eq!(format_file_size(1179648), "1.13 MB");
    }

    #[test]
    fn file_size_caps_at_gb() {
        let tib = 1024u64.pow(4);
        assert_eq!(format_file_size(tib), "1024 GB");
    }
}
