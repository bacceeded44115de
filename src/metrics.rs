// Prometheus metrics for VoteGate monitoring
//
// Exposed on the /metrics HTTP endpoint:
// - Vote traffic (counters for adds, removals, quota rejections)
// - Active votes across all users (gauge)
// - Vote request latencies (histogram)

use lazy_static::lazy_static;
use prometheus::{Encoder, HistogramVec, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

lazy_static! {
    pub static ref REGISTRY: Arc<Registry> = Arc::new(Registry::new());

    // Vote traffic
    pub static ref VOTES_ADDED_TOTAL: IntCounter = IntCounter::new(
        "votes_added_total",
        "Total number of votes recorded since startup"
    ).expect("Failed to create votes added metric");

    pub static ref VOTES_REMOVED_TOTAL: IntCounter = IntCounter::new(
        "votes_removed_total",
        "Total number of votes withdrawn since startup"
    ).expect("Failed to create votes removed metric");

    pub static ref VOTES_REJECTED_TOTAL: IntCounter = IntCounter::new(
        "votes_rejected_total",
        "Total number of vote attempts blocked by a quota"
    ).expect("Failed to create votes rejected metric");

    pub static ref ACTIVE_VOTES: IntGauge = IntGauge::new(
        "active_votes_total",
        "Number of currently active votes across all users"
    ).expect("Failed to create active votes metric");

    // Request metrics
    pub static ref VOTE_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "vote_request_duration_seconds",
            "Duration of vote requests in seconds"
        ),
        &["operation"]
    ).expect("Failed to create vote request duration metric");
}

/// Initialize metrics registry - must be called once at startup
pub fn init() -> prometheus::Result<()> {
    REGISTRY.register(Box::new(VOTES_ADDED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(VOTES_REMOVED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(VOTES_REJECTED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ACTIVE_VOTES.clone()))?;
    REGISTRY.register(Box::new(VOTE_REQUEST_DURATION_SECONDS.clone()))?;
    Ok(())
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to encode metrics: {}", e))?;
    String::from_utf8(buffer).map_err(|e| anyhow::anyhow!("Invalid UTF-8 in metrics: {}", e))
}
