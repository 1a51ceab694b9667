//! Shared status enumerations and date handling
//!
//! Statuses are stored as TEXT in the database and exchanged as
//! SCREAMING_SNAKE_CASE strings over the API. Unknown stored values
//! surface as errors rather than panics.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a remediation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemediationStatus {
    Pending,
    InProgress,
    Completed,
}

impl RemediationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationStatus::Pending => "PENDING",
            RemediationStatus::InProgress => "IN_PROGRESS",
            RemediationStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for RemediationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemediationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(RemediationStatus::Pending),
            "IN_PROGRESS" => Ok(RemediationStatus::InProgress),
            "COMPLETED" => Ok(RemediationStatus::Completed),
            other => Err(Error::InvalidInput(format!(
                "Unknown remediation status: {}",
                other
            ))),
        }
    }
}

/// Aggregate status of a bias test
///
/// Only the transition to `RemediationComplete` is driven by this
/// codebase; the other values are assigned by the evaluation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiasTestStatus {
    Passed,
    Failed,
    RemediationRequired,
    RemediationComplete,
}

impl BiasTestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasTestStatus::Passed => "PASSED",
            BiasTestStatus::Failed => "FAILED",
            BiasTestStatus::RemediationRequired => "REMEDIATION_REQUIRED",
            BiasTestStatus::RemediationComplete => "REMEDIATION_COMPLETE",
        }
    }
}

impl fmt::Display for BiasTestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiasTestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PASSED" => Ok(BiasTestStatus::Passed),
            "FAILED" => Ok(BiasTestStatus::Failed),
            "REMEDIATION_REQUIRED" => Ok(BiasTestStatus::RemediationRequired),
            "REMEDIATION_COMPLETE" => Ok(BiasTestStatus::RemediationComplete),
            other => Err(Error::InvalidInput(format!(
                "Unknown bias test status: {}",
                other
            ))),
        }
    }
}

/// Parse a date supplied by an API caller.
///
/// Accepts plain `YYYY-MM-DD` or a full RFC 3339 timestamp (the date
/// part is taken). Rejected input is an `InvalidInput` error so the
/// caller sees a 400 rather than a failure deep inside a store call.
pub fn parse_external_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    Err(Error::InvalidInput(format!("Unrecognized date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remediation_status_round_trip() {
        for status in [
            RemediationStatus::Pending,
            RemediationStatus::InProgress,
            RemediationStatus::Completed,
        ] {
            let parsed: RemediationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_bias_test_status_round_trip() {
        for status in [
            BiasTestStatus::Passed,
            BiasTestStatus::Failed,
            BiasTestStatus::RemediationRequired,
            BiasTestStatus::RemediationComplete,
        ] {
            let parsed: BiasTestStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("DONE".parse::<RemediationStatus>().is_err());
        assert!("".parse::<BiasTestStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&RemediationStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let parsed: BiasTestStatus = serde_json::from_str("\"REMEDIATION_COMPLETE\"").unwrap();
        assert_eq!(parsed, BiasTestStatus::RemediationComplete);
    }

    #[test]
    fn test_parse_external_date_plain() {
        let date = parse_external_date("2025-11-30").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
    }

    #[test]
    fn test_parse_external_date_rfc3339() {
        let date = parse_external_date("2025-11-30T14:25:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
    }

    #[test]
    fn test_parse_external_date_rejects_garbage() {
        assert!(parse_external_date("next tuesday").is_err());
        assert!(parse_external_date("2025-13-45").is_err());
        assert!(parse_external_date("").is_err());
    }
}
