use std::future::Future;
use std::time::Duration;

use log::{info, warn};
use smartwaste_rust_common::api::ApiClient;
use url::Url;

/// Drops entries that do not parse as absolute URLs, preserving order. The
/// candidate list is injected configuration, not trusted input.
pub fn validate_candidates(candidates: Vec<String>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| match Url::parse(candidate) {
            Ok(_) => true,
            Err(e) => {
                warn!("skipping invalid candidate endpoint {}: {}", candidate, e);
                false
            }
        })
        .collect()
}

/// Probes candidates in listed order and adopts the first reachable one as
/// the session base URL. Runs once at startup; a network change mid-session
/// requires a restart. `candidates` must be non-empty.
pub async fn discover(client: &ApiClient, candidates: &[String], timeout: Duration) -> String {
    discover_with(candidates, |url| async move {
        client.probe(&url, timeout).await
    })
    .await
}

/// Sequential scan with short-circuit: once a candidate answers, the rest
/// are never probed. When none answer, the first candidate is retained and
/// the failure is deferred to the eventual upload attempt.
pub async fn discover_with<F, Fut>(candidates: &[String], mut probe: F) -> String
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    for candidate in candidates {
        if probe(candidate.clone()).await {
            info!("Server found at: {}", candidate);
            return candidate.clone();
        }
    }
    warn!(
        "no candidate endpoint responded; keeping default {}",
        candidates[0]
    );
    candidates[0].clone()
}
