use humantime::format_duration;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    time::Duration,
};

/// Duration parsed from and printed as human readable text, e.g. `1m 30s`.
/// `0`, `none` and `disabled` all mean a zero (disabled) duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HumanDuration {
    duration: Duration,
}

impl HumanDuration {
    pub fn new(duration: Duration) -> HumanDuration {
        HumanDuration { duration }
    }

    pub fn from_millis(millis: u64) -> HumanDuration {
        HumanDuration::new(Duration::from_millis(millis))
    }

    pub fn as_human_time_string(&self) -> String {
        format!("{}", format_duration(self.duration))
    }

    pub fn as_millis(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    pub fn get_duration(&self) -> Duration {
        self.duration
    }

    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }

    /// `None` when the duration is disabled.
    pub fn enabled(&self) -> Option<Duration> {
        if self.is_zero() {
            None
        } else {
            Some(self.duration)
        }
    }
}

impl FromStr for HumanDuration {
    type Err = humantime::DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = &s.trim().to_lowercase();
        if s == "0" || s == "none" || s == "disabled" {
            return Ok(HumanDuration::default());
        }
        Ok(HumanDuration {
            duration: humantime::parse_duration(s)?,
        })
    }
}

impl From<Duration> for HumanDuration {
    fn from(duration: Duration) -> Self {
        HumanDuration { duration }
    }
}

impl Display for HumanDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "none");
        }
        write!(f, "{}", self.as_human_time_string())
    }
}
