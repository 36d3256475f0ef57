mod capture;
mod discovery;
mod session;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use smartwaste_rust_common::api::ApiClient;

use crate::capture::{CapturedImage, Coordinates};
use crate::session::{CaptureSession, Notice};

/// Candidate hosts tried when no endpoint list is configured.
const DEFAULT_CANDIDATES: &[&str] = &[
    "http://192.168.43.211:8000",
    "http://192.168.1.5:8000",
    "http://192.168.1.10:8000",
    "http://192.168.0.100:8000",
];

const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1000;

#[derive(Deserialize)]
struct Config {
    discovery: DiscoveryConfig,
}

#[derive(Deserialize)]
struct DiscoveryConfig {
    candidates: Vec<String>,
    probe_timeout_ms: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "field-reporter")]
struct Args {
    /// Optional config path carrying the candidate endpoint list
    #[arg(long, default_value = "config.toml")]
    config_path: String,

    /// Candidate base URL, repeatable, tried in order; overrides the config list
    #[arg(long = "candidate")]
    candidates: Vec<String>,

    /// Probe timeout per candidate in milliseconds; overrides the config value
    #[arg(long)]
    probe_timeout_ms: Option<u64>,

    /// Path of the captured photo to submit
    #[arg(long)]
    image: Option<String>,

    /// Device latitude in decimal degrees
    #[arg(long)]
    latitude: Option<f64>,

    /// Device longitude in decimal degrees
    #[arg(long)]
    longitude: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    stderrlog::new()
        .verbosity(log::Level::Info)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
        .unwrap();

    // Read config (optional; CLI flags win)
    let cfg: Option<Config> = match std::fs::read_to_string(&args.config_path) {
        Ok(s) => toml::from_str(&s).ok(),
        Err(_) => None,
    };

    let raw_candidates: Vec<String> = if !args.candidates.is_empty() {
        args.candidates.clone()
    } else if let Some(cfg) = cfg.as_ref() {
        cfg.discovery.candidates.clone()
    } else {
        DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect()
    };
    let candidates = discovery::validate_candidates(raw_candidates);
    anyhow::ensure!(!candidates.is_empty(), "no usable candidate endpoints configured");

    let probe_timeout = Duration::from_millis(
        args.probe_timeout_ms
            .or_else(|| cfg.as_ref().and_then(|c| c.discovery.probe_timeout_ms))
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_MS),
    );

    // Gather the capture parts up front. An unreadable photo blocks the
    // whole flow with an instructive error rather than a late notice.
    let image = match &args.image {
        Some(path) => Some(
            CapturedImage::from_path(path)
                .await
                .with_context(|| format!("cannot read captured image {}", path))?,
        ),
        None => None,
    };
    let location = match (args.latitude, args.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    };
    match &location {
        Some(loc) => log::info!("location: {:.4}, {:.4}", loc.latitude, loc.longitude),
        None => log::info!("Locating..."),
    }

    // Discovery runs once, before anything is submitted. If no candidate
    // answers, the first one stays the default and the upload surfaces the
    // failure.
    let mut client = ApiClient::new(&candidates[0])?;
    let base_url = discovery::discover(&client, &candidates, probe_timeout).await;
    client.set_base_url(&base_url);
    log::info!("using backend {}", client.base_url());

    let mut session = CaptureSession::new();
    if let Some(image) = image {
        session.attach_image(image);
    }
    if let Some(location) = location {
        session.set_location(location);
    }

    let notice = session.upload(&client).await;
    log::info!("{}", notice.message());

    match notice {
        Notice::Submitted { detections } => {
            log::info!("{} detection(s) stored; capture cleared", detections);
        }
        Notice::NothingDetected => {
            log::info!("capture cleared; nothing was reported");
        }
        Notice::MissingInfo => {
            log::warn!("supply --image together with --latitude/--longitude and retry");
            std::process::exit(2);
        }
        Notice::ConnectionFailed => {
            log::warn!("the photo was kept; rerun with the same --image to retry");
            std::process::exit(1);
        }
    }

    Ok(())
}
