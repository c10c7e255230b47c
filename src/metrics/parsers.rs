//! Utility functions for metrics processing

/// Parse a decimal uptime string to seconds
///
/// Anything that is not a plain non-negative integer yields 0.
pub fn parse_uptime_seconds(s: &str) -> i64 {
    s.trim().parse::<u64>().map_or(0, |secs| {
        i64::try_from(secs).unwrap_or(i64::MAX)
    })
}
