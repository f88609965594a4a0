//! Quota entities describing a client's standing within its quota window.

use std::time::Duration;

/// Remaining requests and time until the window resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    pub remaining: i64,
    pub reset_after: Duration,
}

impl QuotaStatus {
    /// Time until reset in whole minutes, truncated.
    pub fn reset_minutes(&self) -> u64 {
        whole_minutes(self.reset_after)
    }
}

/// Outcome of a quota check for one incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The client still has quota left in the current window.
    Allowed(QuotaStatus),

    /// The client has spent its quota; retry after `reset_after`.
    Rejected { reset_after: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Converts a duration to whole minutes, dropping any remainder.
pub fn whole_minutes(duration: Duration) -> u64 {
    duration.as_secs() / 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_minutes_truncates() {
        assert_eq!(whole_minutes(Duration::from_secs(0)), 0);
        assert_eq!(whole_minutes(Duration::from_secs(59)), 0);
        assert_eq!(whole_minutes(Duration::from_secs(60)), 1);
        assert_eq!(whole_minutes(Duration::from_secs(1799)), 29);
        assert_eq!(whole_minutes(Duration::from_secs(1800)), 30);
    }

    #[test]
    fn test_reset_minutes() {
        let status = QuotaStatus {
            remaining: 3,
            reset_after: Duration::from_secs(125),
        };

        assert_eq!(status.reset_minutes(), 2);
    }

    #[test]
    fn test_admission_is_allowed() {
        let allowed = Admission::Allowed(QuotaStatus {
            remaining: 1,
            reset_after: Duration::from_secs(60),
        });
        let rejected = Admission::Rejected {
            reset_after: Duration::from_secs(60),
        };

        assert!(allowed.is_allowed());
        assert!(!rejected.is_allowed());
    }
}
