use std::env;

use chrono::{DateTime, SecondsFormat, Utc};

pub const BUILD_NUMBER_VAR: &str = "BUILD_NUMBER";
pub const DEFAULT_BUILD_NUMBER: &str = "0";

/// Build number and timestamp, captured once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub number: String,
    pub timestamp: DateTime<Utc>,
}

impl BuildInfo {
    pub fn capture() -> Self {
        Self::new(env::var(BUILD_NUMBER_VAR).ok(), Utc::now())
    }

    pub fn new(number: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            number: number.unwrap_or_else(|| DEFAULT_BUILD_NUMBER.to_string()),
            timestamp,
        }
    }

    /// ISO-8601 instant, e.g. `2024-01-10T01:02:03.456Z`.
    pub fn build_date(&self) -> String {
        format_instant(&self.timestamp)
    }
}

/// Fractional seconds are printed only when present, in groups of three digits.
pub fn format_instant(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_build_number_defaults_to_zero() {
        let info = BuildInfo::new(None, Utc::now());
        assert_eq!(info.number, "0");

        let info = BuildInfo::new(Some("17".into()), Utc::now());
        assert_eq!(info.number, "17");
    }

    #[test]
    fn test_build_date_is_iso_instant() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 10, 1, 2, 3).unwrap()
            + chrono::Duration::milliseconds(456);
        let info = BuildInfo::new(None, ts);
        assert_eq!(info.build_date(), "2024-01-10T01:02:03.456Z");

        let whole = Utc.with_ymd_and_hms(2024, 1, 10, 1, 2, 3).unwrap();
        assert_eq!(format_instant(&whole), "2024-01-10T01:02:03Z");
    }
}
