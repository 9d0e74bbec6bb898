use thiserror::Error;

/// Top-level error type for the `ipwatch-api` crate.
///
/// Every way a monitoring request can fail lands here: transport, a non-2xx
/// status, a 2xx body that is not valid JSON, or client setup.
/// `ipwatch-core` classifies these into a `FailureReason`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {}", summarize(body))]
    Status { status: u16, body: String },

    /// A 2xx body was not valid JSON. Carries the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Auth ────────────────────────────────────────────────────────
    /// The bearer token could not be encoded as a header value.
    #[error("Invalid bearer token: {message}")]
    InvalidToken { message: String },
}

impl Error {
    /// HTTP status code, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the backend rejected the request's credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns `true` if the response arrived but did not parse.
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::Deserialization { .. } => true,
            Self::Transport(e) => e.is_decode(),
            _ => false,
        }
    }
}

/// First line of a response body, capped so error messages stay readable.
fn summarize(body: &str) -> String {
    const MAX: usize = 120;
    let line = body.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return "<empty body>".into();
    }
    match line.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}…", &line[..idx]),
        None => line.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_classify() {
        let unauthorized = Error::Status {
            status: 401,
            body: String::new(),
        };
        assert!(unauthorized.is_auth_rejected());
        assert!(!unauthorized.is_transient());
        assert_eq!(unauthorized.status(), Some(401));

        let unavailable = Error::Status {
            status: 503,
            body: "down for maintenance".into(),
        };
        assert!(unavailable.is_transient());
        assert_eq!(unavailable.to_string(), "HTTP 503: down for maintenance");
    }

    #[test]
    fn empty_body_is_labelled() {
        let err = Error::Status {
            status: 500,
            body: "\n".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: <empty body>");
    }

    #[test]
    fn deserialization_is_malformed() {
        let err = Error::Deserialization {
            message: "expected value at line 1 column 1".into(),
            body: "{oops".into(),
        };
        assert!(err.is_malformed());
        assert_eq!(err.status(), None);
    }
}
