use std::time::{SystemTime, UNIX_EPOCH};

/// A trait for time sources that return a millisecond timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. The unit is **milliseconds since the Unix epoch**,
/// matching the timestamp field of a [`Tsid`].
///
/// [`Tsid`]: crate::Tsid
///
/// # Example
///
/// ```
/// use tsid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

/// A wall-clock time source reporting UTC milliseconds since the Unix epoch.
///
/// Queries [`SystemTime::now`] on every call. The system clock may be
/// adjusted externally (NTP, manual changes); the generator tolerates
/// regressions by resetting its counter, at the cost of the monotonic
/// ordering guarantee for IDs spanning the adjustment.
///
/// A clock reading before the Unix epoch is clamped to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnixClock;

impl TimeSource for UnixClock {
    fn current_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}
