//! Utility functions for formatting.
//!
//! This module provides the time-code formatting used when seeking with
//! ffmpeg, plus small helpers for log output.

/// Tolerance (in milliseconds) applied before flooring, so that values such
/// as 3725.4 whose binary form sits just below the decimal are not shifted
/// down by a whole millisecond.
const MILLIS_EPSILON: f64 = 1e-6;

/// Largest representable time-code, 99999:59:59.999.
const MAX_TIMECODE_MILLIS: u64 = 359_999_999_999;

/// Formats seconds as an ffmpeg time-code `HH:MM:SS.mmm`.
///
/// Sub-millisecond precision is truncated, never rounded up, so a timestamp
/// can never be pushed past the end of the stream by formatting:
/// 59.9999 -> "00:00:59.999". Negative and non-finite inputs format as zero;
/// anything beyond 99999:59:59.999 is clamped to it.
///
/// # Examples
///
/// ```rust
/// use framegrab_core::utils::format_timecode;
///
/// assert_eq!(format_timecode(3725.4), "01:02:05.400");
/// assert_eq!(format_timecode(0.0), "00:00:00.000");
/// ```
#[must_use]
pub fn format_timecode(seconds: f64) -> String {
    let total_millis = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0 + MILLIS_EPSILON)
            .floor()
            .min(MAX_TIMECODE_MILLIS as f64) as u64
    } else {
        0
    };

    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0), "00:00:00.000");
        assert_eq!(format_timecode(5.0), "00:00:05.000");
        assert_eq!(format_timecode(59.5), "00:00:59.500");
        assert_eq!(format_timecode(60.0), "00:01:00.000");
        assert_eq!(format_timecode(3599.999), "00:59:59.999");
        assert_eq!(format_timecode(3600.0), "01:00:00.000");
        assert_eq!(format_timecode(3725.4), "01:02:05.400");
        assert_eq!(format_timecode(86399.0), "23:59:59.000");
        assert_eq!(format_timecode(360000.25), "100:00:00.250");
    }

    #[test]
    fn test_format_timecode_truncates_sub_millisecond() {
        assert_eq!(format_timecode(59.9999), "00:00:59.999");
        assert_eq!(format_timecode(1.0005), "00:00:01.000");
        assert_eq!(format_timecode(0.0009), "00:00:00.000");
        assert_eq!(format_timecode(0.1), "00:00:00.100");
        assert_eq!(format_timecode(12.345), "00:00:12.345");
    }

    #[test]
    fn test_format_timecode_invalid_inputs() {
        assert_eq!(format_timecode(-1.0), "00:00:00.000");
        assert_eq!(format_timecode(f64::NAN), "00:00:00.000");
    }

    #[test]
    fn test_format_timecode_clamps_huge_values() {
        assert_eq!(format_timecode(1e20), "99999:59:59.999");
        assert_eq!(format_timecode(f64::MAX), "99999:59:59.999");
        assert_eq!(format_timecode(4e8), "99999:59:59.999");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KiB");
        assert_eq!(format_bytes(1536 * 1024), "1.50 MiB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GiB");
    }
}
