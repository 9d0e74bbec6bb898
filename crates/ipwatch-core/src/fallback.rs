//! Synthetic stand-ins for every monitoring series.
//!
//! Each generator builds a fresh payload with the same type the live
//! endpoint's body is decoded into, with values drawn from fixed per-field
//! ranges. They take the random source and the current time as arguments,
//! so a seeded RNG and a pinned clock give reproducible output.
//!
//! Time-series labels walk backward from `now` and come out oldest first.

use chrono::{DateTime, Datelike, Days, Months, TimeDelta, TimeZone};
use rand::Rng;

use ipwatch_api::{
    ActivityStats, CategoryShare, Chart, ChartData, ChartKind, EndpointPerformance, FeatureUsage,
    FieldProcessingTime, FilingTrendPoint, GrantRatePoint, MonitoringSnapshot, PatentTrends,
    RealtimeStats, SessionDurationBucket, SystemHealth, TrafficPoint, TrafficSnapshot,
    UserActivityPoint,
};

/// Seconds of traffic history in a snapshot.
pub const TRAFFIC_WINDOW: i64 = 60;
/// Days in the user-activity chart.
pub const USER_ACTIVITY_DAYS: i64 = 7;
/// Months in the filing-trend and grant-rate charts.
pub const TREND_MONTHS: u32 = 12;
/// Hours in the standalone traffic chart.
pub const TRAFFIC_CHART_HOURS: i64 = 24;
/// Endpoints in the response-performance chart.
pub const PERFORMANCE_ENDPOINTS: u32 = 6;

const UPTIME: &str = "2 days, 14 hours";

/// (name, base usage, usage spread, share of total usage in percent)
const FEATURES: [(&str, u32, u32, u32); 5] = [
    ("IP Search", 500, 1000, 35),
    ("Patent Tracking", 400, 800, 28),
    ("Analytics", 300, 600, 20),
    ("Reports", 200, 400, 12),
    ("Notifications", 100, 200, 5),
];

/// (bucket label, base count, count spread)
const SESSION_BUCKETS: [(&str, u32, u32); 5] = [
    ("0-5 min", 100, 200),
    ("5-15 min", 150, 300),
    ("15-30 min", 125, 250),
    ("30-60 min", 75, 150),
    ("60+ min", 50, 100),
];

/// Technology taxonomy. Weights are fixed and sum to 100.
const CATEGORIES: [(&str, u32, &str); 6] = [
    ("AI & ML", 25, "#3B82F6"),
    ("Biotech", 20, "#10B981"),
    ("Renewable Energy", 18, "#F59E0B"),
    ("Software", 15, "#EF4444"),
    ("Hardware", 12, "#8B5CF6"),
    ("Other", 10, "#6B7280"),
];

// ── Scalar series ────────────────────────────────────────────────────

pub fn system_health<R: Rng + ?Sized>(rng: &mut R) -> SystemHealth {
    SystemHealth {
        cpu_usage: rng.gen_range(0..100),
        memory_usage: rng.gen_range(0..100),
        disk_usage: rng.gen_range(0..100),
        uptime: UPTIME.to_owned(),
        active_threads: rng.gen_range(20..70),
        response_time: rng.gen_range(50..250),
    }
}

pub fn activity_stats<R: Rng + ?Sized>(rng: &mut R) -> ActivityStats {
    ActivityStats {
        total_users: rng.gen_range(5_000..15_000),
        active_users: rng.gen_range(500..1_500),
        total_sessions: rng.gen_range(25_000..75_000),
        average_session_duration: rng.gen_range(10..40),
        page_views: rng.gen_range(50_000..150_000),
        unique_visitors: rng.gen_range(2_500..7_500),
    }
}

pub fn patent_trends<R: Rng + ?Sized>(rng: &mut R) -> PatentTrends {
    PatentTrends {
        total_patents: rng.gen_range(5_000..15_000),
        pending_applications: rng.gen_range(1_000..3_000),
        granted_patents: rng.gen_range(4_000..12_000),
        average_processing_time: rng.gen_range(12..36),
        success_rate: rng.gen_range(70..100),
    }
}

// ── Traffic ──────────────────────────────────────────────────────────

/// One point per second for the last minute, ending at `now`.
pub fn traffic<R, Tz>(rng: &mut R, now: &DateTime<Tz>) -> TrafficSnapshot
where
    R: Rng + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let traffic_data = (0..TRAFFIC_WINDOW)
        .rev()
        .map(|ago| {
            let at = now.clone() - TimeDelta::seconds(ago);
            TrafficPoint {
                time: at.format("%-I:%M:%S %p").to_string(),
                requests: rng.gen_range(5..25),
                users: rng.gen_range(20..70),
                // Errors are rare: one second in ten sees 0-2 of them.
                errors: if rng.gen_bool(0.1) {
                    rng.gen_range(0..3)
                } else {
                    0
                },
            }
        })
        .collect();

    TrafficSnapshot {
        traffic_data,
        realtime_stats: realtime_stats(rng),
    }
}

fn realtime_stats<R: Rng + ?Sized>(rng: &mut R) -> RealtimeStats {
    RealtimeStats {
        current_users: rng.gen_range(50..150),
        requests_per_second: rng.gen_range(5..20),
        active_connections: rng.gen_range(100..300),
        bandwidth: rng.gen_range(20..70),
    }
}

// ── Charts ───────────────────────────────────────────────────────────

/// Daily points for the last week, ending today.
pub fn user_activity<R, Tz>(rng: &mut R, now: &DateTime<Tz>) -> Vec<UserActivityPoint>
where
    R: Rng + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    (0..USER_ACTIVITY_DAYS)
        .rev()
        .map(|ago| {
            let day = now.clone() - TimeDelta::days(ago);
            UserActivityPoint {
                date: day.format("%b %-d").to_string(),
                active_users: rng.gen_range(200..700),
                new_users: rng.gen_range(20..120),
                returning_users: rng.gen_range(150..550),
            }
        })
        .collect()
}

pub fn feature_usage<R: Rng + ?Sized>(rng: &mut R) -> Vec<FeatureUsage> {
    FEATURES
        .iter()
        .map(|&(name, base, spread, percentage)| FeatureUsage {
            name: name.to_owned(),
            usage: base + rng.gen_range(0..spread),
            percentage,
        })
        .collect()
}

pub fn session_duration<R: Rng + ?Sized>(rng: &mut R) -> Vec<SessionDurationBucket> {
    SESSION_BUCKETS
        .iter()
        .map(|&(duration, base, spread)| SessionDurationBucket {
            duration: duration.to_owned(),
            count: base + rng.gen_range(0..spread),
        })
        .collect()
}

/// Monthly filings and grants for the last year, ending this month.
pub fn filing_trends<R, Tz>(rng: &mut R, now: &DateTime<Tz>) -> Vec<FilingTrendPoint>
where
    R: Rng + ?Sized,
    Tz: TimeZone,
{
    month_labels(now)
        .into_iter()
        .map(|month| FilingTrendPoint {
            month,
            filings: rng.gen_range(100..300),
            grants: rng.gen_range(50..200),
        })
        .collect()
}

pub fn categories() -> Vec<CategoryShare> {
    CATEGORIES
        .iter()
        .map(|&(name, value, color)| CategoryShare {
            name: name.to_owned(),
            value,
            color: color.to_owned(),
        })
        .collect()
}

/// Monthly grant and approval rates for the last year, ending this month.
pub fn grant_rates<R, Tz>(rng: &mut R, now: &DateTime<Tz>) -> Vec<GrantRatePoint>
where
    R: Rng + ?Sized,
    Tz: TimeZone,
{
    month_labels(now)
        .into_iter()
        .map(|month| GrantRatePoint {
            month,
            grant_rate: rng.gen_range(70..90),
            approval_rate: rng.gen_range(75..90),
        })
        .collect()
}

/// `Mon YYYY` labels for the last [`TREND_MONTHS`] calendar months.
fn month_labels<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<String> {
    let today = now.date_naive();
    let first_of_month = today - Days::new(u64::from(today.day0()));
    (0..TREND_MONTHS)
        .rev()
        .map(|ago| {
            (first_of_month - Months::new(ago))
                .format("%b %Y")
                .to_string()
        })
        .collect()
}

/// Hourly request counts for the last day, ending at `now`.
pub fn traffic_chart<R, Tz>(rng: &mut R, now: &DateTime<Tz>) -> Vec<TrafficPoint>
where
    R: Rng + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    (0..TRAFFIC_CHART_HOURS)
        .rev()
        .map(|ago| {
            let at = now.clone() - TimeDelta::hours(ago);
            TrafficPoint {
                time: at.format("%I:%M %p").to_string(),
                requests: rng.gen_range(50..150),
                users: 0,
                errors: rng.gen_range(0..10),
            }
        })
        .collect()
}

pub fn response_performance<R: Rng + ?Sized>(rng: &mut R) -> Vec<EndpointPerformance> {
    (1..=PERFORMANCE_ENDPOINTS)
        .map(|n| EndpointPerformance {
            endpoint: format!("/api/endpoint{n}"),
            avg_response: f64::from(rng.gen_range(50_u32..250)),
            requests: rng.gen_range(100..600),
        })
        .collect()
}

/// Average days to grant per technology category, to one decimal place.
pub fn processing_times<R: Rng + ?Sized>(rng: &mut R) -> Vec<FieldProcessingTime> {
    CATEGORIES
        .iter()
        .map(|&(field, _, _)| FieldProcessingTime {
            field: field.to_owned(),
            avg_days: f64::from(rng.gen_range(300_u32..1_200)) / 10.0,
        })
        .collect()
}

/// Fallback for a single chart series.
pub fn chart<R, Tz>(kind: ChartKind, rng: &mut R, now: &DateTime<Tz>) -> Chart
where
    R: Rng + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match kind {
        ChartKind::UserActivity => Chart::UserActivity(user_activity(rng, now)),
        ChartKind::FeatureUsage => Chart::FeatureUsage(feature_usage(rng)),
        ChartKind::SessionDuration => Chart::SessionDuration(session_duration(rng)),
        ChartKind::FilingTrends => Chart::FilingTrends(filing_trends(rng, now)),
        ChartKind::Categories => Chart::Categories(categories()),
        ChartKind::GrantRates => Chart::GrantRates(grant_rates(rng, now)),
        ChartKind::Traffic => Chart::Traffic(traffic_chart(rng, now)),
        ChartKind::ResponsePerformance => Chart::ResponsePerformance(response_performance(rng)),
        ChartKind::ProcessingTimes => Chart::ProcessingTimes(processing_times(rng)),
    }
}

// ── Aggregate ────────────────────────────────────────────────────────

/// The full `/all-data` shape, assembled from the per-series generators.
pub fn snapshot<R, Tz>(rng: &mut R, now: &DateTime<Tz>) -> MonitoringSnapshot
where
    R: Rng + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    MonitoringSnapshot {
        system_health: system_health(rng),
        activity_stats: activity_stats(rng),
        patent_trends: patent_trends(rng),
        traffic_data: traffic(rng, now),
        chart_data: ChartData {
            user_activity: user_activity(rng, now),
            feature_usage: feature_usage(rng),
            session_duration: session_duration(rng),
            filing_trends: filing_trends(rng, now),
            categories: categories(),
            grant_rates: grant_rates(rng, now),
        },
    }
}
