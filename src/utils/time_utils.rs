use chrono::{DateTime, Duration, Local};

use crate::shared::constants;

/// Hands out strictly increasing local timestamps.
///
/// Two calls inside the same microsecond (or a clock step backwards) still
/// produce distinct, ordered stamps.
#[derive(Debug, Default)]
pub struct MonotonicStamp {
    last: Option<DateTime<Local>>,
}

impl MonotonicStamp {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn next(&mut self) -> DateTime<Local> {
        self.next_from(Local::now())
    }

    pub fn next_from(&mut self, now: DateTime<Local>) -> DateTime<Local> {
        let now = truncate_to_micros(now);
        let stamp = match self.last {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

/// `YYYYMMDD_HHMMSS_ffffff`
pub fn snapshot_stamp(at: &DateTime<Local>) -> String {
    at.format(constants::SNAPSHOT_TIMESTAMP_FORMAT).to_string()
}

fn truncate_to_micros(at: DateTime<Local>) -> DateTime<Local> {
    let extra_nanos = at.timestamp_subsec_nanos() % 1_000;
    at - Duration::nanoseconds(extra_nanos as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamp_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + Duration::microseconds(42);
        assert_eq!(snapshot_stamp(&at), "20240309_070501_000042");
    }

    #[test]
    fn test_repeated_instant_is_bumped() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let mut stamps = MonotonicStamp::new();
        let first = stamps.next_from(at);
        let second = stamps.next_from(at);
        let third = stamps.next_from(at - Duration::seconds(5));
        assert!(first < second && second < third);
        assert_eq!(snapshot_stamp(&second), "20240309_070501_000001");
    }
}
