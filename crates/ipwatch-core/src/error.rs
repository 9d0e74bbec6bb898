// ── Core error types ──
//
// A failed monitoring fetch is never fatal at this layer: the wrapper pairs
// it with fallback data. `FetchFailure` records why, classified into a
// `FailureReason` so callers can pick a banner, a retry, or an exit code
// without matching on reqwest internals.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use ipwatch_api::Series;

/// Why a monitoring fetch did not produce live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FailureReason {
    /// No response: connection refused, DNS, TLS handshake, or timeout.
    Unreachable,
    /// The backend answered with a non-2xx status.
    Rejected { status: u16 },
    /// A 2xx response whose body was not valid JSON.
    Malformed,
    /// The request could not be built (bad URL, unusable token).
    Misconfigured,
}

impl FailureReason {
    /// 401 / 403 from the backend.
    pub fn is_auth(self) -> bool {
        matches!(self, Self::Rejected { status: 401 | 403 })
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => f.write_str("backend unreachable"),
            Self::Rejected { status } => write!(f, "rejected with HTTP {status}"),
            Self::Malformed => f.write_str("malformed response"),
            Self::Misconfigured => f.write_str("request misconfigured"),
        }
    }
}

impl From<&ipwatch_api::Error> for FailureReason {
    fn from(err: &ipwatch_api::Error) -> Self {
        use ipwatch_api::Error as ApiError;

        if err.is_malformed() {
            return Self::Malformed;
        }
        if let Some(status) = err.status() {
            return Self::Rejected { status };
        }
        match err {
            ApiError::Transport(_) => Self::Unreachable,
            _ => Self::Misconfigured,
        }
    }
}

/// A monitoring fetch that failed, with the series it was for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {}: {reason} ({message})", .series.label())]
pub struct FetchFailure {
    pub series: Series,
    pub reason: FailureReason,
    /// Rendered transport-level error, for logs and diagnostics.
    pub message: String,
}

impl FetchFailure {
    pub fn new(series: Series, err: &ipwatch_api::Error) -> Self {
        Self {
            series,
            reason: FailureReason::from(err),
            message: err.to_string(),
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Fetch(#[from] FetchFailure),
}

impl From<ipwatch_api::Error> for CoreError {
    fn from(err: ipwatch_api::Error) -> Self {
        CoreError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ipwatch_api::{ChartKind, Error as ApiError};

    use super::*;

    #[test]
    fn status_maps_to_rejected() {
        let err = ApiError::Status {
            status: 401,
            body: "nope".into(),
        };
        let reason = FailureReason::from(&err);
        assert_eq!(reason, FailureReason::Rejected { status: 401 });
        assert!(reason.is_auth());
    }

    #[test]
    fn parse_failure_maps_to_malformed() {
        let err = ApiError::Deserialization {
            message: "EOF while parsing".into(),
            body: "{".into(),
        };
        assert_eq!(FailureReason::from(&err), FailureReason::Malformed);
    }

    #[test]
    fn tls_setup_failure_is_misconfigured_not_malformed() {
        let err = ApiError::Tls("invalid CA cert".into());
        assert!(!err.is_malformed());
        assert_eq!(FailureReason::from(&err), FailureReason::Misconfigured);
    }

    #[test]
    fn bad_token_maps_to_misconfigured() {
        let err = ApiError::InvalidToken {
            message: "invalid header value".into(),
        };
        assert_eq!(FailureReason::from(&err), FailureReason::Misconfigured);
    }

    #[test]
    fn failure_message_names_the_series() {
        let err = ApiError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        let failure = FetchFailure::new(Series::Chart(ChartKind::FilingTrends), &err);
        assert_eq!(
            failure.to_string(),
            "failed to fetch filing trends chart: rejected with HTTP 502 (HTTP 502: bad gateway)"
        );
    }
}
