//! Clap derive structures for the `ipwatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ipwatch -- admin monitoring for the patent platform
#[derive(Debug, Parser)]
#[command(
    name = "ipwatch",
    version,
    about = "Inspect patent-platform monitoring data from the command line",
    long_about = "Query the admin monitoring API of the patent platform.\n\n\
        When the backend is unreachable or refuses a request, ipwatch shows\n\
        locally generated placeholder data and says so on stderr.\n\
        Use --strict to fail instead.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "IPWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL, e.g. http://localhost:8081 (overrides profile)
    #[arg(long, env = "IPWATCH_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Admin bearer token (overrides profile)
    #[arg(
        long,
        env = "IPWATCH_TOKEN",
        global = true,
        hide = true,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "IPWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Fail instead of showing placeholder data when a fetch fails
    #[arg(long, env = "IPWATCH_STRICT", global = true)]
    pub strict: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "IPWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "IPWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one record per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Query Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChartKindArg {
    /// Daily active, new, and returning users for the last week
    UserActivity,
    /// Usage per platform feature
    FeatureUsage,
    /// Session counts per duration bucket
    SessionDuration,
    /// Monthly filings and grants for the last year
    FilingTrends,
    /// Share of filings per technology category
    Categories,
    /// Monthly grant and approval rates for the last year
    GrantRates,
    /// Hourly requests and errors for the last day
    Traffic,
    /// Average response time per API endpoint
    ResponsePerformance,
    /// Average days to grant per technology field
    ProcessingTimes,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimeRangeArg {
    /// Last 7 days
    #[value(name = "7d")]
    Week,
    /// Last 30 days
    #[value(name = "30d")]
    Month,
    /// Last 90 days
    #[value(name = "90d")]
    Quarter,
    /// Last year
    #[value(name = "1y")]
    Year,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    All,
    Ai,
    Biotech,
    Energy,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Backend resource usage and responsiveness
    #[command(alias = "h")]
    Health,

    /// User and session activity totals
    Activity,

    /// Request traffic for the last minute and realtime counters
    Traffic,

    /// Patent filing and grant totals
    Trends,

    /// One dashboard chart series
    Chart(ChartArgs),

    /// Every series in one request
    All(AllArgs),

    /// Poll every series on an interval
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Data commands ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Chart series to fetch
    pub kind: ChartKindArg,
}

/// Filters for the aggregate endpoint.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Time window to aggregate over
    #[arg(long, short = 't')]
    pub time_range: Option<TimeRangeArg>,

    /// Patent technology category
    #[arg(long, short = 'c')]
    pub category: Option<CategoryArg>,
}

#[derive(Debug, Args)]
pub struct AllArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Polling interval (e.g. 5s, 1m, 500ms)
    #[arg(long, short = 'i', default_value = "5s", value_parser = humantime::parse_duration)]
    pub interval: Duration,

    /// Stop after this many updates
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display current configuration (tokens masked)
    Show,

    /// Store the admin token in the system keyring
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Remove the admin token from the system keyring
    ClearToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
