use chrono::{DateTime, Local};
use smartwaste_rust_common::models::{Report, SummaryStats};

/// Map focal point when no reports exist.
pub const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);

pub const PENDING_MARKER_ICON: &str = "https://maps.google.com/mapfiles/ms/icons/red-dot.png";
pub const CLEANED_MARKER_ICON: &str = "https://maps.google.com/mapfiles/ms/icons/green-dot.png";

/// Focal point of the map: the newest report's position when any exist,
/// else the fixed default. Pure function of the current list, recomputed
/// every render; there is no persisted camera state.
pub fn map_center(reports: &[Report]) -> (f64, f64) {
    reports
        .first()
        .map(|r| (r.latitude, r.longitude))
        .unwrap_or(DEFAULT_CENTER)
}

pub fn confidence_percent(score: f64) -> u32 {
    (score * 100.0).round() as u32
}

/// One map marker per report; icon keyed by status, two visual states.
#[derive(Debug, Clone)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub icon: &'static str,
    pub tooltip: String,
}

pub fn markers(reports: &[Report]) -> Vec<MapMarker> {
    reports
        .iter()
        .map(|r| MapMarker {
            latitude: r.latitude,
            longitude: r.longitude,
            icon: if r.status.is_cleaned() {
                CLEANED_MARKER_ICON
            } else {
                PENDING_MARKER_ICON
            },
            tooltip: format!("Confidence: {}%", confidence_percent(r.confidence_score)),
        })
        .collect()
}

/// Static-map rendition of the marker layer, handed the externally
/// supplied provider credential.
pub fn static_map_url(reports: &[Report], api_key: &str) -> String {
    let (lat, lng) = map_center(reports);
    let mut url = format!(
        "https://maps.googleapis.com/maps/api/staticmap?center={},{}&zoom=10&size=640x400",
        lat, lng
    );
    for report in reports {
        let color = if report.status.is_cleaned() { "green" } else { "red" };
        url.push_str(&format!(
            "&markers=color:{}%7C{},{}",
            color, report.latitude, report.longitude
        ));
    }
    url.push_str(&format!("&key={}", api_key));
    url
}

pub fn stats_line(stats: &SummaryStats) -> String {
    format!(
        "total={} pending={} cleaned={} detected={} today={}",
        stats.total, stats.pending, stats.cleaned, stats.detected, stats.today_activity
    )
}

pub fn short_id(id: &str) -> &str {
    id.get(id.len().saturating_sub(4)..).unwrap_or(id)
}

pub fn report_line(report: &Report, image_url: &str) -> String {
    let ts: DateTime<Local> = report.timestamp.with_timezone(&Local);
    format!(
        "report #{} [{}] {} confidence={}% at ({:.4}, {:.4}) image={}",
        short_id(&report.id),
        report.status.as_str().to_uppercase(),
        ts.format("%Y-%m-%d %H:%M:%S"),
        confidence_percent(report.confidence_score),
        report.latitude,
        report.longitude,
        image_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartwaste_rust_common::models::ReportStatus;

    fn report(id: &str, lat: f64, lon: f64, status: &str, confidence: f64) -> Report {
        Report {
            id: id.to_string(),
            latitude: lat,
            longitude: lon,
            image_url: format!("/uploads/{id}.jpg"),
            confidence_score: confidence,
            status: ReportStatus::from(status.to_string()),
            timestamp: "2024-05-04T10:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn map_center_tracks_newest_report() {
        assert_eq!(map_center(&[]), DEFAULT_CENTER);
        let reports = vec![
            report("r-0002", 19.076, 72.8777, "pending", 0.9),
            report("r-0001", 12.9716, 77.5946, "cleaned", 0.8),
        ];
        assert_eq!(map_center(&reports), (19.076, 72.8777));
    }

    #[test]
    fn confidence_percent_rounds_into_range() {
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(1.0), 100);
        assert_eq!(confidence_percent(0.856), 86);
        assert_eq!(confidence_percent(0.004), 0);
        assert_eq!(confidence_percent(0.005), 1);
        for c in [0.0, 0.1, 0.33, 0.5, 0.77, 0.999, 1.0] {
            let pct = confidence_percent(c);
            assert!(pct <= 100, "confidence {c} produced {pct}");
        }
    }

    #[test]
    fn marker_icon_keyed_by_status() {
        let reports = vec![
            report("a", 1.0, 2.0, "cleaned", 0.5),
            report("b", 3.0, 4.0, "pending", 0.455),
            report("c", 5.0, 6.0, "detected", 0.7),
            report("d", 7.0, 8.0, "weird_future_state", 0.7),
        ];
        let markers = markers(&reports);
        assert_eq!(markers[0].icon, CLEANED_MARKER_ICON);
        assert_eq!(markers[1].icon, PENDING_MARKER_ICON);
        assert_eq!(markers[2].icon, PENDING_MARKER_ICON);
        assert_eq!(markers[3].icon, PENDING_MARKER_ICON);
        assert_eq!(markers[1].tooltip, "Confidence: 46%");
    }

    #[test]
    fn static_map_url_centers_and_keys() {
        let url = static_map_url(&[], "k3y");
        assert!(url.contains("center=20.5937,78.9629"));
        assert!(url.ends_with("&key=k3y"));

        let reports = vec![report("a", 1.5, 2.5, "cleaned", 0.5)];
        let url = static_map_url(&reports, "k3y");
        assert!(url.contains("markers=color:green%7C1.5,2.5"));
    }

    #[test]
    fn report_line_shows_tail_of_id_and_status() {
        let r = report("665a1c2f9d3e4b0007a1b2c3", 12.9716, 77.5946, "pending", 0.87);
        let line = report_line(&r, "http://localhost:8000/uploads/x.jpg");
        assert!(line.contains("#b2c3"));
        assert!(line.contains("[PENDING]"));
        assert!(line.contains("confidence=87%"));
        assert!(line.contains("(12.9716, 77.5946)"));

        assert_eq!(short_id("abc"), "abc");
    }
}
