//! Config subcommand handlers.

use dialoguer::{Input, Select};

use ipwatch_core::DEFAULT_API_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Copy of `cfg` with plaintext tokens masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(MASK.into());
        }
    }
    cfg
}

/// Read a token from `--token` / `IPWATCH_TOKEN`, else prompt without echo.
fn read_token(global: &GlobalOpts) -> Result<String, CliError> {
    let token = match global.token {
        Some(ref token) => token.clone(),
        None => rpassword::prompt_password("Admin token: ").map_err(prompt_err)?,
    };
    if token.trim().is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "admin token cannot be empty".into(),
        });
    }
    Ok(token.trim().to_owned())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::SetToken { profile } => set_token(profile, global),
        ConfigCommand::ClearToken { profile } => clear(profile, global),
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("ipwatch configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_from(&config_path)?;

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(config::active_profile_name(global, &cfg))
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Backend URL
    let api_url: String = Input::new()
        .with_prompt("Backend URL")
        .default(DEFAULT_API_URL.into())
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .parse::<url::Url>()
                .map(|_| ())
                .map_err(|e| format!("invalid URL: {e}"))
        })
        .interact_text()
        .map_err(prompt_err)?;

    let mut profile = Profile::new(api_url);

    // 3. Admin token
    let token_choices = &[
        "Store in system keyring (recommended)",
        "Read from an environment variable",
        "Save to config file (plaintext)",
        "No token",
    ];
    let token_selection = Select::new()
        .with_prompt("Where should the admin token come from?")
        .items(token_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match token_selection {
        0 => {
            let token = read_token(global)?;
            config::store_token(&profile_name, &token)?;
            eprintln!("   ✓ Admin token stored in system keyring");
        }
        1 => {
            let var: String = Input::new()
                .with_prompt("Environment variable name")
                .default("IPWATCH_ADMIN_TOKEN".into())
                .interact_text()
                .map_err(prompt_err)?;
            profile.token_env = Some(var);
        }
        2 => profile.token = Some(read_token(global)?),
        _ => eprintln!("   Requests will be sent without a token"),
    }

    // 4. Write config
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    let path = config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: ipwatch health --strict");
    Ok(())
}

// ── Show ────────────────────────────────────────────────────────────

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = redacted(&config::load_config_or_default());
    let as_toml = toml::to_string_pretty(&cfg)?;

    let out = output::render_single(&global.output, &cfg, |_| as_toml.clone(), profile_list)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Profile names, one per line, the default marked with `*`.
fn profile_list(cfg: &Config) -> String {
    let default = cfg.default_profile.as_deref().unwrap_or("default");
    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| {
            if name == default {
                format!("{name} *")
            } else {
                name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tokens ──────────────────────────────────────────────────────────

fn set_token(profile: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
    cfg.profile(&profile_name)?;

    let token = read_token(global)?;
    config::store_token(&profile_name, &token)?;

    if !global.quiet {
        eprintln!("✓ Admin token stored in system keyring for profile '{profile_name}'");
    }
    Ok(())
}

fn clear(profile: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

    let removed = config::clear_token(&profile_name)?;
    if !global.quiet {
        if removed {
            eprintln!("✓ Removed stored admin token for profile '{profile_name}'");
        } else {
            eprintln!("No stored admin token for profile '{profile_name}'");
        }
    }
    Ok(())
}
