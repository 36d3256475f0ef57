use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a report. The backend owns the value set; clients
/// only ever request the pending -> cleaned transition, so anything
/// unrecognized lands in `Other` and renders in the not-cleaned bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Pending,
    Cleaned,
    Detected,
    Other(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Cleaned => "cleaned",
            ReportStatus::Detected => "detected",
            ReportStatus::Other(s) => s,
        }
    }

    pub fn is_cleaned(&self) -> bool {
        matches!(self, ReportStatus::Cleaned)
    }
}

impl From<String> for ReportStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => ReportStatus::Pending,
            "cleaned" => ReportStatus::Cleaned,
            "detected" => ReportStatus::Detected,
            _ => ReportStatus::Other(value),
        }
    }
}

impl From<ReportStatus> for String {
    fn from(value: ReportStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted waste observation, as returned by `GET /reports/`.
///
/// The list endpoint names the identifier `_id`; the create ack names it
/// `id`. Identity fields are never mutated client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub confidence_score: f64,
    pub status: ReportStatus,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate counters from `GET /reports/summary`. Recomputed by the
/// backend on every request; clients retain them only for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: u64,
    pub pending: u64,
    pub cleaned: u64,
    pub detected: u64,
    pub today_activity: u64,
}

/// Ack body of `POST /reports/`. The `status` discriminator is an open
/// enumeration: only the exact value `"success"` means a detection was
/// stored, anything else means the image was evaluated and nothing
/// qualified.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub detections: Vec<serde_json::Value>,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Ack body of `PUT /reports/{id}/status`. Informational only; clients
/// refetch instead of applying it.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateAck {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_known_values() {
        for raw in ["pending", "cleaned", "detected"] {
            let status = ReportStatus::from(raw.to_string());
            assert_eq!(status.as_str(), raw);
        }
        assert!(ReportStatus::Cleaned.is_cleaned());
        assert!(!ReportStatus::Pending.is_cleaned());
    }

    #[test]
    fn unknown_status_is_preserved_and_not_cleaned() {
        let status = ReportStatus::from("in_progress".to_string());
        assert_eq!(status, ReportStatus::Other("in_progress".to_string()));
        assert!(!status.is_cleaned());
    }

    #[test]
    fn report_accepts_both_id_spellings() {
        let from_list: Report = serde_json::from_str(
            r#"{
                "_id": "665a1c2f9d3e4b0007a1b2c3",
                "latitude": 12.9716,
                "longitude": 77.5946,
                "image_url": "/uploads/abc.jpg",
                "confidence_score": 0.87,
                "status": "pending",
                "timestamp": "2024-05-04T10:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(from_list.id, "665a1c2f9d3e4b0007a1b2c3");
        assert_eq!(from_list.status, ReportStatus::Pending);

        let from_ack: Report = serde_json::from_str(
            r#"{
                "id": "665a1c2f9d3e4b0007a1b2c3",
                "latitude": 12.9716,
                "longitude": 77.5946,
                "image_url": "/uploads/abc.jpg",
                "confidence_score": 0.87,
                "status": "mystery",
                "timestamp": "2024-05-04T10:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(from_ack.id, from_list.id);
        assert!(!from_ack.status.is_cleaned());
    }

    #[test]
    fn submit_discriminator_fails_safe() {
        let stored: SubmitResponse =
            serde_json::from_str(r#"{"status":"success","id":"abc","detections":[{"confidence":0.9}]}"#)
                .unwrap();
        assert!(stored.is_success());
        assert_eq!(stored.detections.len(), 1);

        for raw in [
            r#"{"status":"no_waste_detected","detections":[]}"#,
            r#"{"status":"Success"}"#,
            r#"{"status":"queued"}"#,
        ] {
            let res: SubmitResponse = serde_json::from_str(raw).unwrap();
            assert!(!res.is_success(), "{raw} must not count as stored");
        }
    }
}
