use std::time::Duration;

use log::debug;
use reqwest::multipart::{Form, Part};

use crate::error::ApiError;
use crate::models::{Report, ReportStatus, StatusUpdateAck, SubmitResponse, SummaryStats};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the waste-detection backend. One instance per process; the
/// base URL is fixed after discovery and only replaced before first use.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("smartwaste-clients/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    /// Image URLs may be absolute or backend-relative (`/uploads/...`).
    pub fn resolve_image_url(&self, image_url: &str) -> String {
        if image_url.starts_with("http") {
            image_url.to_string()
        } else {
            format!("{}{}", self.base_url, image_url)
        }
    }

    pub async fn fetch_summary(&self) -> Result<SummaryStats, ApiError> {
        let url = format!("{}/reports/summary", self.base_url);
        let res = self.http.get(&url).send().await?;
        Ok(check(&url, res)?.json().await?)
    }

    /// Reports newest-first, as the backend sorts them.
    pub async fn fetch_reports(&self) -> Result<Vec<Report>, ApiError> {
        let url = format!("{}/reports/", self.base_url);
        let res = self.http.get(&url).send().await?;
        Ok(check(&url, res)?.json().await?)
    }

    pub async fn update_status(
        &self,
        report_id: &str,
        status: &ReportStatus,
    ) -> Result<StatusUpdateAck, ApiError> {
        let url = format!("{}/reports/{}/status", self.base_url, report_id);
        let res = self
            .http
            .put(&url)
            .query(&[("status", status.as_str())])
            .send()
            .await?;
        Ok(check(&url, res)?.json().await?)
    }

    /// Submits one observation as a multipart form: stringified coordinates
    /// plus the image bytes with their derived filename and MIME type.
    pub async fn submit_report(
        &self,
        latitude: f64,
        longitude: f64,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<SubmitResponse, ApiError> {
        let image = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = Form::new()
            .text("latitude", latitude.to_string())
            .text("longitude", longitude.to_string())
            .part("image", image);

        let url = format!("{}/reports/", self.base_url);
        let res = self.http.post(&url).multipart(form).send().await?;
        Ok(check(&url, res)?.json().await?)
    }

    /// Liveness probe used by server discovery. Reachable means any
    /// response with a non-empty body; errors and timeouts do not count.
    pub async fn probe(&self, url: &str, timeout: Duration) -> bool {
        let reachable = match self.http.get(url).timeout(timeout).send().await {
            Ok(res) => match res.text().await {
                Ok(body) => !body.is_empty(),
                Err(_) => false,
            },
            Err(_) => false,
        };
        debug!("probe {} -> {}", url, reachable);
        reachable
    }
}

fn check(url: &str, res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = res.status();
    if !status.is_success() {
        return Err(ApiError::BadStatus {
            status,
            url: url.to_string(),
        });
    }
    Ok(res)
}
