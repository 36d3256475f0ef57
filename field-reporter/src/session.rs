use log::{error, info};
use smartwaste_rust_common::api::ApiClient;

use crate::capture::{CapturedImage, Coordinates};

/// User-facing result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The backend stored a qualifying detection.
    Submitted { detections: usize },
    /// The backend evaluated the image and found nothing to report. A
    /// normal outcome, not an error.
    NothingDetected,
    /// Image or location missing; no request was made.
    MissingInfo,
    /// Transport or server failure; the capture is kept for retry.
    ConnectionFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Submitted { .. } => "Waste report submitted successfully!",
            Notice::NothingDetected => "No plastic waste detected by the AI.",
            Notice::MissingInfo => "Waiting for location or image...",
            Notice::ConnectionFailed => "Failed to connect to server. Check API_URL and Network.",
        }
    }
}

/// One capture-and-submit round. The session owns the captured image until
/// the backend has either stored it or judged it empty; transport failures
/// keep the capture so the same photo can be retried without recapturing.
#[derive(Default)]
pub struct CaptureSession {
    image: Option<CapturedImage>,
    location: Option<Coordinates>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_image(&mut self, image: CapturedImage) {
        self.image = Some(image);
    }

    pub fn set_location(&mut self, location: Coordinates) {
        self.location = Some(location);
    }

    pub fn has_capture(&self) -> bool {
        self.image.is_some()
    }

    pub fn retake(&mut self) {
        self.image = None;
    }

    /// Submits the staged capture. Preconditions are checked first: with
    /// either part missing, no network call happens at all.
    pub async fn upload(&mut self, client: &ApiClient) -> Notice {
        let (image, location) = match (self.image.as_ref(), self.location.as_ref()) {
            (Some(image), Some(location)) => (image, location),
            _ => return Notice::MissingInfo,
        };

        let sent = client
            .submit_report(
                location.latitude,
                location.longitude,
                &image.upload_name(),
                image.mime(),
                image.bytes().to_vec(),
            )
            .await;

        match sent {
            Ok(res) if res.is_success() => {
                info!(
                    "report stored as {} ({} detections)",
                    res.id.as_deref().unwrap_or("<unknown>"),
                    res.detections.len()
                );
                let detections = res.detections.len();
                self.image = None;
                Notice::Submitted { detections }
            }
            Ok(res) => {
                info!("backend evaluated the image: status={}", res.status);
                self.image = None;
                Notice::NothingDetected
            }
            Err(e) => {
                error!("Upload error: {:#}", e);
                Notice::ConnectionFailed
            }
        }
    }
}
