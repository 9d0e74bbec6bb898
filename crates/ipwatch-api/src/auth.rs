use std::fmt;

use secrecy::SecretString;

/// Storage key the admin bearer token is kept under.
pub const ADMIN_TOKEN_KEY: &str = "adminToken";

/// Supplies the bearer token for outgoing requests.
///
/// The client asks on every request rather than caching, so a token that is
/// rotated or cleared takes effect on the next call. Returning `None` sends
/// the request unauthenticated.
pub trait TokenSource: Send + Sync + fmt::Debug {
    fn bearer_token(&self) -> Option<SecretString>;
}

/// A fixed token (or the explicit absence of one).
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<SecretString>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecretString::from(token.into())))
    }

    /// No credential at all.
    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<SecretString>> for StaticToken {
    fn from(token: Option<SecretString>) -> Self {
        Self(token)
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.0.clone()
    }
}

/// Reads the token from an environment variable at request time.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl TokenSource for EnvToken {
    fn bearer_token(&self) -> Option<SecretString> {
        std::env::var(&self.var)
            .ok()
            .filter(|v| !v.is_empty())
            .map(SecretString::from)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn static_token_round_trips() {
        let source = StaticToken::new("abc123");
        let token = source.bearer_token().unwrap();
        assert_eq!(token.expose_secret(), "abc123");
        assert!(StaticToken::none().bearer_token().is_none());
    }

    #[test]
    fn unset_env_token_is_absent() {
        let source = EnvToken::new("IPWATCH_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert!(source.bearer_token().is_none());
    }
}
