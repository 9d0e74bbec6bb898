//! CLI configuration: thin wrapper around `ipwatch_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --insecure, --timeout).

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use ipwatch_api::{StaticToken, TlsMode, TokenSource};
use ipwatch_core::{DEFAULT_API_URL, MonitorConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ipwatch_config::{
    Config, Profile, clear_token, config_path, load_config, load_config_or_default, save_config,
    store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Load the config file for a command that acts on it.
///
/// A file that exists but does not parse is an error rather than silently
/// replaced by defaults.
pub fn load_from(path: &Path) -> Result<Config, CliError> {
    Ok(ipwatch_config::load_config_from(path)?)
}

/// Build a `MonitorConfig` from the config file, profile, and CLI overrides.
///
/// Without a matching profile the flags stand alone: `--api-url` (default
/// `http://localhost:8081`) and `--token`. Naming a profile explicitly that
/// does not exist is an error.
pub fn resolve_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    resolve_from(&config_path(), global)
}

fn resolve_from(path: &Path, global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let cfg = load_from(path)?;
    let profile_name = active_profile_name(global, &cfg);

    let mut resolved = match cfg.profile(&profile_name) {
        Ok(profile) => {
            ipwatch_config::profile_to_monitor_config(profile, &profile_name, &cfg.defaults)?
        }
        Err(err) if global.profile.is_some() => return Err(err.into()),
        Err(_) => {
            let mut standalone = MonitorConfig::new(parse_url(DEFAULT_API_URL)?);
            standalone.timeout = cfg.defaults.timeout.map(Duration::from_secs);
            if cfg.defaults.insecure {
                standalone.tls = TlsMode::DangerAcceptInvalid;
            }
            standalone
        }
    };

    apply_overrides(&mut resolved, global)?;
    Ok(resolved)
}

/// CLI flags take priority over profile values.
fn apply_overrides(resolved: &mut MonitorConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref url) = global.api_url {
        resolved.url = parse_url(url)?;
    }
    if let Some(ref token) = global.token {
        let token: Arc<dyn TokenSource> = Arc::new(StaticToken::new(token.clone()));
        resolved.token = token;
    }
    if global.insecure {
        resolved.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        resolved.timeout = Some(Duration::from_secs(secs));
    }
    Ok(())
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["ipwatch"];
        argv.extend_from_slice(args);
        argv.push("health");
        Cli::parse_from(argv).global
    }

    #[test]
    fn flags_override_profile() {
        let mut profile = Profile::new("http://profile.example:8081");
        profile.token = Some("from-profile".into());
        profile.timeout = Some(30);
        let mut resolved =
            ipwatch_config::profile_to_monitor_config(&profile, "lab", &Default::default())
                .unwrap();

        let opts = global(&[
            "--api-url",
            "http://flag.example:9000",
            "--token",
            "from-flag",
            "--timeout",
            "4",
            "-k",
        ]);
        apply_overrides(&mut resolved, &opts).unwrap();

        assert_eq!(resolved.url.as_str(), "http://flag.example:9000/");
        assert_eq!(
            resolved
                .token
                .bearer_token()
                .map(|t| t.expose_secret().to_owned())
                .as_deref(),
            Some("from-flag")
        );
        assert_eq!(resolved.timeout, Some(Duration::from_secs(4)));
        assert!(matches!(resolved.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn profile_values_survive_without_flags() {
        let profile = Profile::new("http://profile.example:8081");
        let mut resolved =
            ipwatch_config::profile_to_monitor_config(&profile, "lab", &Default::default())
                .unwrap();

        apply_overrides(&mut resolved, &global(&[])).unwrap();

        assert_eq!(resolved.url.as_str(), "http://profile.example:8081/");
        assert_eq!(resolved.timeout, None);
        assert!(matches!(resolved.tls, TlsMode::System));
    }

    #[test]
    fn malformed_config_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.prod\napi_url = ").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, CliError::Config(_)), "got: {err:?}");
        assert_eq!(err.exit_code(), crate::error::exit_code::GENERAL);

        let err = resolve_from(&path, &global(&[])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)), "got: {err:?}");
    }

    #[test]
    fn missing_file_resolves_to_flags_alone() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_from(
            &dir.path().join("absent.toml"),
            &global(&["--api-url", "http://flag.example:9000"]),
        )
        .unwrap();
        assert_eq!(resolved.url.as_str(), "http://flag.example:9000/");
    }

    #[test]
    fn explicit_unknown_profile_lists_known_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.lab]\napi_url = \"http://lab:8081\"\n").unwrap();

        let err = resolve_from(&path, &global(&["-p", "prod"])).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "lab"),
            "got: {err:?}"
        );
    }

    #[test]
    fn bad_api_url_is_a_usage_error() {
        let mut resolved = MonitorConfig::new(parse_url(DEFAULT_API_URL).unwrap());
        let err = apply_overrides(&mut resolved, &global(&["--api-url", "::nope::"])).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
