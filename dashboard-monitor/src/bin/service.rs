use anyhow::Result;
use dashboard_monitor::{
    config::Config,
    poll::{run_cycle, Reconciler},
    view,
};
use smartwaste_rust_common::api::ApiClient;
use tokio::{signal, time::sleep};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let cfg = Config::from_env()?;
    tracing::info!(
        "dashboard-monitor starting; api={}, poll={:?}",
        cfg.api_base_url,
        cfg.poll_interval
    );

    let client = ApiClient::new(&cfg.api_base_url)?;
    let mut reconciler = Reconciler::new();

    // First refresh immediately, then on every interval tick. Errors are
    // logged and swallowed; the next tick is the retry mechanism.
    refresh_and_render(&mut reconciler, &client, &cfg).await;
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            _ = sleep(cfg.poll_interval) => {
                refresh_and_render(&mut reconciler, &client, &cfg).await;
            }
        }
    }

    Ok(())
}

async fn refresh_and_render(reconciler: &mut Reconciler, client: &ApiClient, cfg: &Config) {
    let generation = reconciler.begin_refresh();
    let result = run_cycle(client, generation).await;
    if !reconciler.apply(result) {
        return;
    }

    let v = reconciler.view();
    tracing::info!("stats: {}", view::stats_line(&v.stats));

    let center = view::map_center(&v.reports);
    tracing::info!(
        "map center: ({:.4}, {:.4}), {} markers",
        center.0,
        center.1,
        v.reports.len()
    );
    if !cfg.maps_api_key.is_empty() {
        tracing::info!("static map: {}", view::static_map_url(&v.reports, &cfg.maps_api_key));
    }
    for marker in view::markers(&v.reports) {
        tracing::debug!(
            "marker ({:.4}, {:.4}) icon={} {}",
            marker.latitude,
            marker.longitude,
            marker.icon,
            marker.tooltip
        );
    }

    if v.reports.is_empty() {
        tracing::info!("no reports found");
        return;
    }
    for report in v.reports.iter().take(cfg.recent_limit) {
        tracing::info!(
            "{}",
            view::report_line(report, &client.resolve_image_url(&report.image_url))
        );
    }
}
