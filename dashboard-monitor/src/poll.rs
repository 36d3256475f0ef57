use smartwaste_rust_common::api::ApiClient;
use smartwaste_rust_common::error::ApiError;
use smartwaste_rust_common::models::{Report, ReportStatus, StatusUpdateAck, SummaryStats};

/// Snapshot produced by one refresh cycle, tagged with the generation that
/// issued it so superseded cycles can be recognized and dropped.
pub struct RefreshResult {
    generation: u64,
    summary: Result<SummaryStats, ApiError>,
    reports: Result<Vec<Report>, ApiError>,
}

/// Last-known-good view of backend state. While a refresh is in flight the
/// previous values stay displayed; a refresh never blanks them.
#[derive(Default)]
pub struct DashboardView {
    pub stats: SummaryStats,
    pub reports: Vec<Report>,
    pub loading: bool,
}

/// Refresh bookkeeping: each cycle gets a monotonically increasing
/// generation, and only the latest issued generation may be applied. Timer
/// ticks and manual refreshes share this path, so a slow older cycle can
/// never overwrite a newer one's result.
#[derive(Default)]
pub struct Reconciler {
    view: DashboardView,
    issued: u64,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.issued += 1;
        self.view.loading = true;
        self.issued
    }

    /// Applies a completed cycle to the view. Both sides are applied
    /// independently: one failing leaves the other's update intact, and the
    /// failed side keeps its last successful values. Returns false when the
    /// result belongs to a superseded generation and was discarded.
    pub fn apply(&mut self, result: RefreshResult) -> bool {
        if result.generation != self.issued {
            tracing::debug!(
                "discarding stale refresh: generation {} superseded by {}",
                result.generation,
                self.issued
            );
            return false;
        }
        self.view.loading = false;
        match result.summary {
            Ok(stats) => self.view.stats = stats,
            Err(e) => tracing::warn!("summary refresh failed, keeping last values: {:#}", e),
        }
        match result.reports {
            Ok(reports) => self.view.reports = reports,
            Err(e) => tracing::warn!("report list refresh failed, keeping last values: {:#}", e),
        }
        true
    }
}

/// One polling cycle: both reads dispatched concurrently and awaited
/// together, so a failure or slow response on one never blocks the other.
pub async fn run_cycle(client: &ApiClient, generation: u64) -> RefreshResult {
    let (summary, reports) = tokio::join!(client.fetch_summary(), client.fetch_reports());
    RefreshResult {
        generation,
        summary,
        reports,
    }
}

/// Requests a status transition, then unconditionally refetches the full
/// view instead of patching the local copy. The backend's next response is
/// the only state ever trusted after a mutation.
pub async fn update_status_and_refetch(
    reconciler: &mut Reconciler,
    client: &ApiClient,
    report_id: &str,
    new_status: ReportStatus,
) -> Result<StatusUpdateAck, ApiError> {
    let ack = client.update_status(report_id, &new_status).await?;
    let generation = reconciler.begin_refresh();
    let result = run_cycle(client, generation).await;
    reconciler.apply(result);
    Ok(ack)
}
