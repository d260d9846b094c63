use chrono::{DateTime, Duration, Utc};

/// Remaining time on a project, derived from its start timestamp and deadline
/// duration. Purely presentational: computing a countdown never changes
/// project status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    Remaining(Duration),
    Expired,
}

impl Countdown {
    pub fn at(started_at: DateTime<Utc>, deadline_hours: u32, now: DateTime<Utc>) -> Self {
        let deadline = started_at + Duration::hours(i64::from(deadline_hours));
        let diff = deadline - now;
        if diff <= Duration::zero() {
            Countdown::Expired
        } else {
            Countdown::Remaining(diff)
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Countdown::Expired => f.write_str("time's up"),
            Countdown::Remaining(diff) => {
                let total = diff.num_seconds();
                let hours = total / 3600;
                let minutes = (total % 3600) / 60;
                let seconds = total % 60;
                write!(f, "{hours}h {minutes}m {seconds}s")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn expires_one_second_past_deadline() {
        let now = start() + Duration::hours(24) + Duration::seconds(1);
        assert!(Countdown::at(start(), 24, now).is_expired());
    }

    #[test]
    fn still_running_one_second_before_deadline() {
        let now = start() + Duration::hours(24) - Duration::seconds(1);
        let countdown = Countdown::at(start(), 24, now);
        assert!(!countdown.is_expired());
        assert_eq!(countdown.to_string(), "0h 0m 1s");
    }

    #[test]
    fn expired_exactly_at_deadline() {
        let now = start() + Duration::hours(24);
        assert!(Countdown::at(start(), 24, now).is_expired());
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        let now = start() + Duration::hours(2) + Duration::minutes(30) + Duration::seconds(15);
        let countdown = Countdown::at(start(), 48, now);
        assert_eq!(countdown.to_string(), "45h 29m 45s");
    }

    #[test]
    fn expired_sentinel_label() {
        assert_eq!(Countdown::Expired.to_string(), "time's up");
    }
}
