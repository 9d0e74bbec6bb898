//! Command dispatch: bridges CLI args -> monitor calls -> output formatting.

pub mod aggregate;
pub mod chart;
pub mod config_cmd;
pub mod metrics;
pub mod util;

use ipwatch_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Health => metrics::health(monitor, global).await,
        Command::Activity => metrics::activity(monitor, global).await,
        Command::Traffic => metrics::traffic(monitor, global).await,
        Command::Trends => metrics::trends(monitor, global).await,
        Command::Chart(args) => chart::handle(monitor, &args, global).await,
        Command::All(args) => aggregate::all(monitor, &args, global).await,
        Command::Watch(args) => aggregate::watch(monitor, &args, global).await,
        // Handled in main before a monitor is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
