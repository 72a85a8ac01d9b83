//! Minutes/seconds decomposition of the remaining time

use std::fmt;

use serde::{Deserialize, Serialize};

/// Remaining time split the way the payment screen renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLeft {
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    /// Split a whole-second count into minutes and a sub-minute remainder
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
        }
    }

    /// Recombine into the total number of seconds
    pub fn total_seconds(&self) -> u64 {
        self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_minutes_and_seconds() {
        assert_eq!(
            TimeLeft::from_seconds(125),
            TimeLeft {
                minutes: 2,
                seconds: 5
            }
        );
        assert_eq!(
            TimeLeft::from_seconds(60),
            TimeLeft {
                minutes: 1,
                seconds: 0
            }
        );
        assert_eq!(
            TimeLeft::from_seconds(0),
            TimeLeft {
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn round_trips_total_seconds() {
        for secs in [0, 1, 59, 60, 61, 125, 3599, 3600] {
            assert_eq!(TimeLeft::from_seconds(secs).total_seconds(), secs);
        }
    }

    #[test]
    fn renders_zero_padded_seconds() {
        assert_eq!(TimeLeft::from_seconds(125).to_string(), "2:05");
        assert_eq!(TimeLeft::from_seconds(60).to_string(), "1:00");
        assert_eq!(TimeLeft::from_seconds(9).to_string(), "0:09");
    }
}
