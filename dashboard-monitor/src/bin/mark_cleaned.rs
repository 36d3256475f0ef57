use anyhow::Result;
use clap::Parser;
use dashboard_monitor::{config::Config, poll, poll::Reconciler, view};
use smartwaste_rust_common::{api::ApiClient, models::ReportStatus};

#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard-mark-cleaned")]
struct Args {
    /// Report id to transition
    report_id: String,

    /// Target status; operators normally only mark pending reports cleaned
    #[arg(long, default_value = "cleaned")]
    status: String,

    /// Override API base URL; if not set, read from the environment
    #[arg(long)]
    api_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = Config::from_env()?;
    let base_url = args.api_base_url.unwrap_or(cfg.api_base_url);
    let client = ApiClient::new(&base_url)?;

    // Transition, then refetch everything; the displayed state below comes
    // from the backend's post-mutation response, never a local patch.
    let mut reconciler = Reconciler::new();
    let ack = poll::update_status_and_refetch(
        &mut reconciler,
        &client,
        &args.report_id,
        ReportStatus::from(args.status),
    )
    .await?;
    tracing::info!(
        "transition ack: status={} message={}",
        ack.status,
        ack.message.unwrap_or_default()
    );

    let v = reconciler.view();
    tracing::info!("stats: {}", view::stats_line(&v.stats));
    match v.reports.iter().find(|r| r.id == args.report_id) {
        Some(report) => tracing::info!(
            "{}",
            view::report_line(report, &client.resolve_image_url(&report.image_url))
        ),
        None => tracing::warn!("report {} not present in refetched list", args.report_id),
    }

    Ok(())
}
