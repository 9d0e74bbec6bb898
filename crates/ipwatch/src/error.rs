//! CLI error types with miette diagnostics.
//!
//! Maps fetch failures and config errors into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use ipwatch_config::ConfigError;
use ipwatch_core::{CoreError, FailureReason, FetchFailure};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const MALFORMED: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Fetch failures (--strict) ────────────────────────────────────

    #[error("Could not reach the monitoring backend for {series}")]
    #[diagnostic(
        code(ipwatch::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             Details: {message}\n\
             Try: ipwatch --api-url http://localhost:8081 health"
        )
    )]
    ConnectionFailed { series: String, message: String },

    #[error("The backend refused the admin token (HTTP {status}) for {series}")]
    #[diagnostic(
        code(ipwatch::auth_failed),
        help(
            "Store a token with: ipwatch config set-token\n\
             Or set the IPWATCH_TOKEN environment variable."
        )
    )]
    AuthFailed { series: String, status: u16 },

    #[error("The backend rejected the request for {series} (HTTP {status})")]
    #[diagnostic(code(ipwatch::api_error), help("{message}"))]
    ApiError {
        series: String,
        status: u16,
        message: String,
    },

    #[error("The backend sent an unexpected response for {series}")]
    #[diagnostic(
        code(ipwatch::malformed_response),
        help("Check that --api-url points at the patent platform backend.\nDetails: {message}")
    )]
    MalformedResponse { series: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ipwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ipwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ipwatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(ipwatch::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(ipwatch::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(ipwatch::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML: {0}")]
    #[diagnostic(code(ipwatch::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::MalformedResponse { .. } => exit_code::MALFORMED,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<FetchFailure> for CliError {
    fn from(failure: FetchFailure) -> Self {
        let series = failure.series.label();
        match failure.reason {
            FailureReason::Unreachable => CliError::ConnectionFailed {
                series,
                message: failure.message,
            },
            FailureReason::Rejected { status } if failure.reason.is_auth() => {
                CliError::AuthFailed { series, status }
            }
            FailureReason::Rejected { status } => CliError::ApiError {
                series,
                status,
                message: failure.message,
            },
            FailureReason::Malformed => CliError::MalformedResponse {
                series,
                message: failure.message,
            },
            FailureReason::Misconfigured => CliError::Validation {
                field: "request".into(),
                reason: failure.message,
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => CliError::Validation {
                field: "connection".into(),
                reason: message,
            },
            CoreError::Fetch(failure) => failure.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use ipwatch_core::{ChartKind, Series};

    use super::*;

    fn failure(reason: FailureReason) -> FetchFailure {
        FetchFailure {
            series: Series::Chart(ChartKind::GrantRates),
            reason,
            message: "boom".into(),
        }
    }

    #[test]
    fn fetch_failures_map_to_exit_codes() {
        let cases = [
            (FailureReason::Unreachable, exit_code::CONNECTION),
            (FailureReason::Rejected { status: 401 }, exit_code::AUTH),
            (FailureReason::Rejected { status: 403 }, exit_code::AUTH),
            (FailureReason::Rejected { status: 500 }, exit_code::GENERAL),
            (FailureReason::Malformed, exit_code::MALFORMED),
            (FailureReason::Misconfigured, exit_code::USAGE),
        ];
        for (reason, code) in cases {
            assert_eq!(CliError::from(failure(reason)).exit_code(), code, "{reason}");
        }
    }

    #[test]
    fn missing_profile_is_a_usage_error() {
        let err = CliError::from(ConfigError::ProfileNotFound {
            name: "prod".into(),
            available: "lab".into(),
        });
        assert!(matches!(err, CliError::ProfileNotFound { ref name, .. } if name == "prod"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn auth_error_names_the_series() {
        let err = CliError::from(failure(FailureReason::Rejected { status: 401 }));
        assert_eq!(
            err.to_string(),
            "The backend refused the admin token (HTTP 401) for grant rates chart"
        );
    }
}
