//! Scalar series handlers: health, activity, traffic, trends.

use tabled::Tabled;

use ipwatch_core::{
    ActivityStats, Monitor, PatentTrends, RealtimeStats, SystemHealth, TrafficPoint,
    TrafficSnapshot,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Field};

use super::util;

// ── Field views ─────────────────────────────────────────────────────

pub(super) fn health_fields(h: &SystemHealth) -> Vec<Field> {
    vec![
        Field::new("cpuUsage", "CPU", h.cpu_usage).unit("%"),
        Field::new("memoryUsage", "Memory", h.memory_usage).unit("%"),
        Field::new("diskUsage", "Disk", h.disk_usage).unit("%"),
        Field::new("uptime", "Uptime", &h.uptime),
        Field::new("activeThreads", "Active threads", h.active_threads),
        Field::new("responseTime", "Response time", h.response_time).unit(" ms"),
    ]
}

pub(super) fn activity_fields(a: &ActivityStats) -> Vec<Field> {
    vec![
        Field::new("totalUsers", "Total users", a.total_users),
        Field::new("activeUsers", "Active users", a.active_users),
        Field::new("totalSessions", "Sessions", a.total_sessions),
        Field::new("averageSessionDuration", "Avg session", a.average_session_duration)
            .unit(" min"),
        Field::new("pageViews", "Page views", a.page_views),
        Field::new("uniqueVisitors", "Unique visitors", a.unique_visitors),
    ]
}

pub(super) fn trends_fields(t: &PatentTrends) -> Vec<Field> {
    vec![
        Field::new("totalPatents", "Total patents", t.total_patents),
        Field::new("pendingApplications", "Pending", t.pending_applications),
        Field::new("grantedPatents", "Granted", t.granted_patents),
        Field::new("averageProcessingTime", "Avg processing", t.average_processing_time)
            .unit(" h"),
        Field::new("successRate", "Success rate", t.success_rate).unit("%"),
    ]
}

pub(super) fn realtime_fields(r: &RealtimeStats) -> Vec<Field> {
    vec![
        Field::new("currentUsers", "Current users", r.current_users),
        Field::new("requestsPerSecond", "Requests/s", r.requests_per_second),
        Field::new("activeConnections", "Connections", r.active_connections),
        Field::new("bandwidth", "Bandwidth", r.bandwidth).unit(" MB/s"),
    ]
}

// ── Traffic table ───────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct TrafficRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Requests")]
    requests: u32,
    #[tabled(rename = "Users")]
    users: u32,
    #[tabled(rename = "Errors")]
    errors: u32,
}

impl From<&TrafficPoint> for TrafficRow {
    fn from(p: &TrafficPoint) -> Self {
        Self {
            time: p.time.clone(),
            requests: p.requests,
            users: p.users,
            errors: p.errors,
        }
    }
}

fn traffic_detail(t: &TrafficSnapshot) -> String {
    let rows: Vec<TrafficRow> = t.traffic_data.iter().map(TrafficRow::from).collect();
    format!(
        "{}\n\n{}",
        output::detail_lines(&realtime_fields(&t.realtime_stats)),
        output::render_table(&rows)
    )
}

fn traffic_plain(t: &TrafficSnapshot) -> String {
    t.traffic_data
        .iter()
        .map(|p| format!("{}\t{}\t{}\t{}", p.time, p.requests, p.users, p.errors))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn health(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let health = util::settle(monitor.system_health().await, global)?;
    let out = output::render_single(
        &global.output,
        &health,
        |h| output::detail_lines(&health_fields(h)),
        |h| output::plain_lines(&health_fields(h)),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn activity(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = util::settle(monitor.activity_stats().await, global)?;
    let out = output::render_single(
        &global.output,
        &stats,
        |a| output::detail_lines(&activity_fields(a)),
        |a| output::plain_lines(&activity_fields(a)),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn trends(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let trends = util::settle(monitor.patent_trends().await, global)?;
    let out = output::render_single(
        &global.output,
        &trends,
        |t| output::detail_lines(&trends_fields(t)),
        |t| output::plain_lines(&trends_fields(t)),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn traffic(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let traffic = util::settle(monitor.traffic().await, global)?;
    let out = output::render_single(
        &global.output,
        &traffic,
        |t| traffic_detail(t),
        |t| traffic_plain(t),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
