//! Chart series handler.

use tabled::Tabled;

use ipwatch_core::{
    CategoryShare, Chart, EndpointPerformance, FeatureUsage, FieldProcessingTime,
    FilingTrendPoint, GrantRatePoint, Monitor, Payload, SessionDurationBucket, UserActivityPoint,
};

use crate::cli::{ChartArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::metrics::TrafficRow;
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserActivityRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Active")]
    active: u32,
    #[tabled(rename = "New")]
    new: u32,
    #[tabled(rename = "Returning")]
    returning: u32,
}

impl From<&UserActivityPoint> for UserActivityRow {
    fn from(p: &UserActivityPoint) -> Self {
        Self {
            date: p.date.clone(),
            active: p.active_users,
            new: p.new_users,
            returning: p.returning_users,
        }
    }
}

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "Feature")]
    name: String,
    #[tabled(rename = "Usage")]
    usage: u32,
    #[tabled(rename = "Share")]
    share: String,
}

impl From<&FeatureUsage> for FeatureRow {
    fn from(f: &FeatureUsage) -> Self {
        Self {
            name: f.name.clone(),
            usage: f.usage,
            share: format!("{}%", f.percentage),
        }
    }
}

#[derive(Tabled)]
struct SessionRow {
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Sessions")]
    count: u32,
}

impl From<&SessionDurationBucket> for SessionRow {
    fn from(b: &SessionDurationBucket) -> Self {
        Self {
            duration: b.duration.clone(),
            count: b.count,
        }
    }
}

#[derive(Tabled)]
struct FilingRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Filings")]
    filings: u32,
    #[tabled(rename = "Grants")]
    grants: u32,
}

impl From<&FilingTrendPoint> for FilingRow {
    fn from(p: &FilingTrendPoint) -> Self {
        Self {
            month: p.month.clone(),
            filings: p.filings,
            grants: p.grants,
        }
    }
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Color")]
    color: String,
}

impl From<&CategoryShare> for CategoryRow {
    fn from(c: &CategoryShare) -> Self {
        Self {
            name: c.name.clone(),
            share: format!("{}%", c.value),
            color: c.color.clone(),
        }
    }
}

#[derive(Tabled)]
struct GrantRateRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Grant rate")]
    grant_rate: String,
    #[tabled(rename = "Approval rate")]
    approval_rate: String,
}

impl From<&GrantRatePoint> for GrantRateRow {
    fn from(p: &GrantRatePoint) -> Self {
        Self {
            month: p.month.clone(),
            grant_rate: format!("{}%", p.grant_rate),
            approval_rate: format!("{}%", p.approval_rate),
        }
    }
}

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Avg response")]
    avg_response: String,
    #[tabled(rename = "Requests")]
    requests: u64,
}

impl From<&EndpointPerformance> for EndpointRow {
    fn from(e: &EndpointPerformance) -> Self {
        Self {
            endpoint: e.endpoint.clone(),
            avg_response: format!("{:.1} ms", e.avg_response),
            requests: e.requests,
        }
    }
}

#[derive(Tabled)]
struct ProcessingRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Avg days to grant")]
    avg_days: String,
}

impl From<&FieldProcessingTime> for ProcessingRow {
    fn from(f: &FieldProcessingTime) -> Self {
        Self {
            field: f.field.clone(),
            avg_days: format!("{:.1}", f.avg_days),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// Render one chart series. Structured formats emit the body as received.
pub(super) fn render_chart(format: &OutputFormat, chart: &Payload<Chart>) -> Result<String, CliError> {
    if let Some(out) = output::render_structured(format, chart)? {
        return Ok(out);
    }
    match &**chart {
        Chart::UserActivity(points) => output::render_list(
            format,
            points,
            |p| UserActivityRow::from(p),
            |p| {
                format!(
                    "{}\t{}\t{}\t{}",
                    p.date, p.active_users, p.new_users, p.returning_users
                )
            },
        ),
        Chart::FeatureUsage(features) => output::render_list(
            format,
            features,
            |p| FeatureRow::from(p),
            |f| format!("{}\t{}\t{}", f.name, f.usage, f.percentage),
        ),
        Chart::SessionDuration(buckets) => output::render_list(
            format,
            buckets,
            |p| SessionRow::from(p),
            |b| format!("{}\t{}", b.duration, b.count),
        ),
        Chart::FilingTrends(points) => output::render_list(
            format,
            points,
            |p| FilingRow::from(p),
            |p| format!("{}\t{}\t{}", p.month, p.filings, p.grants),
        ),
        Chart::Categories(shares) => output::render_list(
            format,
            shares,
            |p| CategoryRow::from(p),
            |c| format!("{}\t{}\t{}", c.name, c.value, c.color),
        ),
        Chart::GrantRates(points) => output::render_list(
            format,
            points,
            |p| GrantRateRow::from(p),
            |p| format!("{}\t{}\t{}", p.month, p.grant_rate, p.approval_rate),
        ),
        Chart::Traffic(points) => output::render_list(
            format,
            points,
            |p| TrafficRow::from(p),
            |p| format!("{}\t{}\t{}\t{}", p.time, p.requests, p.users, p.errors),
        ),
        Chart::ResponsePerformance(endpoints) => output::render_list(
            format,
            endpoints,
            |e| EndpointRow::from(e),
            |e| format!("{}\t{}\t{}", e.endpoint, e.avg_response, e.requests),
        ),
        Chart::ProcessingTimes(fields) => output::render_list(
            format,
            fields,
            |f| ProcessingRow::from(f),
            |f| format!("{}\t{}", f.field, f.avg_days),
        ),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(monitor: &Monitor, args: &ChartArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let chart = util::settle(monitor.chart(args.kind.into()).await, global)?;
    let out = render_chart(&global.output, &chart)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
