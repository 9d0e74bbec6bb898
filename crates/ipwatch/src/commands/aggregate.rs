//! Aggregate handlers: one-shot `all` and the polling `watch`.

use chrono::Local;
use futures_util::StreamExt;
use tabled::Tabled;

use ipwatch_core::{ChartKind, MIN_WATCH_INTERVAL, Monitor, MonitoringSnapshot, Payload, Series};

use crate::cli::{AllArgs, GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output::{self, Field};

use super::metrics::{activity_fields, health_fields, realtime_fields, trends_fields};
use super::util;

#[derive(Tabled)]
struct ChartSummaryRow {
    #[tabled(rename = "Chart")]
    chart: String,
    #[tabled(rename = "Points")]
    points: usize,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
}

fn section(title: &str, body: &str) -> String {
    format!("{title}\n{body}")
}

fn snapshot_detail(s: &MonitoringSnapshot) -> String {
    let charts: Vec<ChartSummaryRow> = ChartKind::AGGREGATED
        .into_iter()
        .map(|kind| ChartSummaryRow {
            chart: kind.to_string(),
            points: s.chart_data.chart(kind).map_or(0, |c| c.len()),
            endpoint: Series::Chart(kind).path(),
        })
        .collect();

    [
        section("System health", &output::detail_lines(&health_fields(&s.system_health))),
        section("Activity", &output::detail_lines(&activity_fields(&s.activity_stats))),
        section("Patent trends", &output::detail_lines(&trends_fields(&s.patent_trends))),
        section(
            "Realtime traffic",
            &output::detail_lines(&realtime_fields(&s.traffic_data.realtime_stats)),
        ),
        section("Charts", &output::render_table(&charts)),
    ]
    .join("\n\n")
}

/// `section.key<TAB>value` for every scalar in the snapshot.
fn snapshot_plain(s: &MonitoringSnapshot) -> String {
    let groups: [(&str, Vec<Field>); 4] = [
        ("systemHealth", health_fields(&s.system_health)),
        ("activityStats", activity_fields(&s.activity_stats)),
        ("patentTrends", trends_fields(&s.patent_trends)),
        ("realtimeStats", realtime_fields(&s.traffic_data.realtime_stats)),
    ];
    groups
        .iter()
        .flat_map(|(prefix, fields)| {
            fields
                .iter()
                .map(move |f| format!("{prefix}.{}\t{}", f.key, f.value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Structured formats emit the body as received, extra keys included.
fn render_snapshot(
    format: &OutputFormat,
    snapshot: &Payload<MonitoringSnapshot>,
) -> Result<String, CliError> {
    output::render_single(format, snapshot, |s| snapshot_detail(s), |s| snapshot_plain(s))
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn all(monitor: &Monitor, args: &AllArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let query = util::query(&args.filter);
    let snapshot = util::settle(monitor.all_data_filtered(&query).await, global)?;
    let out = render_snapshot(&global.output, &snapshot)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn watch(monitor: &Monitor, args: &WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.interval < MIN_WATCH_INTERVAL {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: format!(
                "must be at least {}",
                humantime::format_duration(MIN_WATCH_INTERVAL)
            ),
        });
    }

    let query = util::query(&args.filter);
    let updates = monitor.watch(query, args.interval);
    tokio::pin!(updates);

    let mut shown = 0_usize;
    while args.count.is_none_or(|limit| shown < limit) {
        let fetched = tokio::select! {
            next = updates.next() => match next {
                Some(fetched) => fetched,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        };
        shown += 1;

        let snapshot = util::settle(fetched, global)?;
        let body = render_snapshot(&global.output, &snapshot)?;
        let out = match global.output {
            OutputFormat::Table => format!(
                "── {} ──\n{body}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
            OutputFormat::Yaml => format!("---\n{body}"),
            _ => body,
        };
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn summary_lists_the_aggregated_charts() {
        let out = snapshot_detail(&MonitoringSnapshot::default());
        for kind in ChartKind::AGGREGATED {
            assert!(out.contains(&Series::Chart(kind).path()), "missing {kind}");
        }
        assert!(!out.contains("charts/processing-times"));
    }

    #[test]
    fn json_snapshot_is_the_received_body() {
        let raw = json!({
            "systemHealth": {"uptime": "4h"},
            "chartData": {"jurisdictions": [{"name": "EP", "value": 3}]}
        });
        let snapshot = Payload::<MonitoringSnapshot>::from_raw(raw.clone());

        let out = render_snapshot(&OutputFormat::JsonCompact, &snapshot).unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(&out).unwrap(), raw);

        let plain = render_snapshot(&OutputFormat::Plain, &snapshot).unwrap();
        assert!(plain.contains("systemHealth.uptime\t4h"));
    }
}
