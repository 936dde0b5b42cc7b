//! Wall-clock abstraction.
//!
//! Status records carry an `updated_at` timestamp; going through [`Clock`]
//! lets tests pin it.

use std::time::SystemTime;

/// Source of "now" for timestamps written to disk.
///
/// # Example
///
/// ```
/// use show_my_ip::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.unix_seconds() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns whole seconds since the Unix epoch, or 0 for earlier times.
    fn unix_seconds(&self) -> u64 {
        self.now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}

/// Reads [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FixedClock(SystemTime);

    impl Clock for FixedClock {
        fn now(&self) -> SystemTime {
            self.0
        }
    }

    #[test]
    fn system_clock_returns_current_time() {
        let before = SystemTime::now();
        let result = SystemClock.now();
        let after = SystemTime::now();

        assert!(result >= before);
        assert!(result <= after);
    }

    #[test]
    fn unix_seconds_truncates_to_whole_seconds() {
        let clock = FixedClock(SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_999));
        assert_eq!(clock.unix_seconds(), 1_700_000_000);
    }

    #[test]
    fn unix_seconds_before_epoch_is_zero() {
        let clock = FixedClock(SystemTime::UNIX_EPOCH - Duration::from_secs(10));
        assert_eq!(clock.unix_seconds(), 0);
    }

    #[test]
    fn system_clock_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SystemClock>();
    }
}
