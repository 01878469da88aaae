//! Session state and visit record models

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Session key holding the visit counter
pub const VISITS_KEY: &str = "visits";
/// Session key holding the last counted visit
pub const LAST_VISIT_KEY: &str = "last_visit";

/// Canonical serialization of session timestamps, e.g. `2024-01-10 10:00:00.000000`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// The fractional part is optional when parsing
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_PARSE_FORMAT).map_err(|e| {
        AppError::MalformedSessionState(format!(
            "{} value {:?} is not a timestamp: {}",
            LAST_VISIT_KEY, value, e
        ))
    })
}

/// Key/value state of one browsing session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionState {
    values: BTreeMap<String, String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SessionState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Visit counter of a session as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitRecord {
    /// Number of distinct days the session has visited on (≥ 1)
    pub visits: i64,
    /// Last counted visit
    pub last_visit: NaiveDateTime,
}

impl VisitRecord {
    /// Read the record held by a session already processed by the tracker
    pub fn from_session(session: &SessionState) -> AppResult<Self> {
        let visits = match session.get(VISITS_KEY) {
            Some(raw) => parse_visits(raw)?,
            None => {
                return Err(AppError::MalformedSessionState(format!(
                    "missing {}",
                    VISITS_KEY
                )))
            }
        };
        let last_visit = match session.get(LAST_VISIT_KEY) {
            Some(raw) => parse_timestamp(raw)?,
            None => {
                return Err(AppError::MalformedSessionState(format!(
                    "missing {}",
                    LAST_VISIT_KEY
                )))
            }
        };
        Ok(Self { visits, last_visit })
    }
}

/// Parse a stored visit counter, which is always at least 1
pub fn parse_visits(value: &str) -> AppResult<i64> {
    let visits = value.trim().parse::<i64>().map_err(|e| {
        AppError::MalformedSessionState(format!(
            "{} value {:?} is not an integer: {}",
            VISITS_KEY, value, e
        ))
    })?;
    if visits < 1 {
        return Err(AppError::MalformedSessionState(format!(
            "{} value {} is below 1",
            VISITS_KEY, visits
        )));
    }
    Ok(visits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(format_timestamp(at(10, 10, 0, 0)), "2024-01-10 10:00:00.000000");
    }

    #[test]
    fn test_parse_timestamp_with_and_without_fraction() {
        assert_eq!(
            parse_timestamp("2024-01-10 10:00:00.123456").unwrap(),
            at(10, 10, 0, 0) + chrono::Duration::microseconds(123_456)
        );
        assert_eq!(parse_timestamp("2024-01-10 10:00:00").unwrap(), at(10, 10, 0, 0));
    }

    #[test]
    fn test_parse_timestamp_malformed() {
        for bad in ["", "yesterday", "2024-13-01 00:00:00", "2024-01-10"] {
            let err = parse_timestamp(bad).unwrap_err();
            assert!(matches!(err, AppError::MalformedSessionState(_)), "{bad}");
        }
    }

    #[test]
    fn test_session_state_serializes_as_map() {
        let state: SessionState = [(VISITS_KEY, "3")].into_iter().collect();
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"visits":"3"}"#);
        let back: SessionState = serde_json::from_str(r#"{"visits":"3"}"#).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_parse_visits_rejects_counts_below_one() {
        assert_eq!(parse_visits(" 4 ").unwrap(), 4);
        for bad in ["0", "-3", "1.5", ""] {
            let err = parse_visits(bad).unwrap_err();
            assert!(matches!(err, AppError::MalformedSessionState(_)), "{bad}");
        }
    }

    #[test]
    fn test_visit_record_requires_both_keys() {
        let state: SessionState = [(VISITS_KEY, "2")].into_iter().collect();
        assert!(VisitRecord::from_session(&state).is_err());
    }
}
