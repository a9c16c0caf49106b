//! Modification-time helpers.
//!
//! Both sides of a diff carry modification times as whole seconds since the
//! UNIX epoch. Local filesystems report finer timestamps, so they are floored
//! to the second before comparison.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Convert a [`SystemTime`] to whole seconds since the UNIX epoch.
///
/// Sub-second precision is dropped by flooring, so times before the epoch
/// round towards negative infinity.
pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs() as i64,
        Err(err) => {
            let before = err.duration();
            let secs = before.as_secs() as i64;
            if before.subsec_nanos() > 0 {
                -(secs + 1)
            } else {
                -secs
            }
        }
    }
}

/// Build a [`SystemTime`] from whole seconds since the UNIX epoch.
pub fn system_time_from_unix(secs: i64) -> SystemTime {
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_zero() {
        assert_eq!(unix_seconds(UNIX_EPOCH), 0);
    }

    #[test]
    fn sub_second_precision_is_floored() {
        let t = UNIX_EPOCH + Duration::from_millis(1_691_570_412_999);
        assert_eq!(unix_seconds(t), 1_691_570_412);
    }

    #[test]
    fn pre_epoch_rounds_down() {
        let t = UNIX_EPOCH - Duration::from_millis(1_500);
        assert_eq!(unix_seconds(t), -2);
        let t = UNIX_EPOCH - Duration::from_secs(3);
        assert_eq!(unix_seconds(t), -3);
    }

    #[test]
    fn from_unix_inverts_whole_seconds() {
        for secs in [0, 1, 1_691_570_412, -1, -86_400] {
            assert_eq!(unix_seconds(system_time_from_unix(secs)), secs);
        }
    }
}
