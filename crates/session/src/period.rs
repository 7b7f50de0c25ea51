//! Rate-limit periods and human-readable durations.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Time unit for message limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Minute,
    #[default]
    Hour,
    Day,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Minute, Period::Hour, Period::Day];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Minute => "minute",
            Period::Hour => "hour",
            Period::Day => "day",
        }
    }

    /// `count` units of this period.
    pub fn duration(&self, count: i64) -> Duration {
        match self {
            Period::Minute => Duration::minutes(count),
            Period::Hour => Duration::hours(count),
            Period::Day => Duration::days(count),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SessionError::InvalidPeriod(s.to_string()))
    }
}

/// Duration of `count` units of `unit` ("minute", "hour" or "day").
pub fn parse_period(count: i64, unit: &str) -> Result<Duration, SessionError> {
    if count < 0 {
        return Err(SessionError::NegativeCount(count));
    }
    Ok(unit.parse::<Period>()?.duration(count))
}

/// Short human-readable duration: "now", "30 seconds", "42 minutes", "1.5 hours".
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds();
    if seconds <= 0 {
        return "now".to_string();
    }
    if seconds < 60 {
        return format!("{seconds} seconds");
    }
    if seconds < 3600 {
        return format!("{} minutes", seconds / 60);
    }
    let hours = (seconds as f64 / 3600.0 * 10.0).round() / 10.0;
    if hours.fract() == 0.0 {
        format!("{hours:.0} hours")
    } else {
        format!("{hours:.1} hours")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse_period(5, "minute").unwrap(), Duration::minutes(5));
        assert_eq!(parse_period(3, "hour").unwrap(), Duration::hours(3));
        assert_eq!(parse_period(1, "day").unwrap(), Duration::days(1));
    }

    #[test]
    fn test_zero() {
        for unit in ["minute", "hour", "day"] {
            assert_eq!(parse_period(0, unit).unwrap(), Duration::zero());
        }
    }

    #[test]
    fn test_invalid_value() {
        assert!(matches!(parse_period(-5, "minute"), Err(SessionError::NegativeCount(-5))));
    }

    #[test]
    fn test_invalid_period() {
        assert!(matches!(parse_period(1, "month"), Err(SessionError::InvalidPeriod(_))));
    }

    #[test]
    fn test_period_serde_names() {
        let p: Period = serde_json::from_str("\"minute\"").unwrap();
        assert_eq!(p, Period::Minute);
        assert_eq!(serde_json::to_string(&Period::Day).unwrap(), "\"day\"");
        assert_eq!(Period::default(), Period::Hour);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::zero()), "now");
        assert_eq!(format_duration(Duration::seconds(30)), "30 seconds");
        assert_eq!(format_duration(Duration::minutes(42)), "42 minutes");
        assert_eq!(format_duration(Duration::minutes(90)), "1.5 hours");
        assert_eq!(format_duration(Duration::hours(5)), "5 hours");
    }
}
