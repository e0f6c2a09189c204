//! Headless snapshot of what the dashboard would show
//!
//! Runs one fetch through the mock provider, then serializes the settled
//! dataset together with the selected period record and the donut geometry
//! for a given viewport width.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::data::DashboardDataset;
use crate::geometry::{
    compute_label, viewport_metrics, DonutSweep, RadialLabel, RadialLabelRequest, Sector,
    ViewportMetrics,
};
use crate::period::{PeriodKey, PeriodRecord, PeriodSelector, StatusDisplay};
use crate::provider::{DataState, MockDataProvider};

/// One slice of the donut with its optional label
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceSnapshot {
    pub name: &'static str,
    pub sector: Sector,
    /// Absent when the viewport is too narrow for labels
    pub label: Option<RadialLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub has_data: bool,
    pub period: PeriodKey,
    pub period_label: &'static str,
    pub dataset: Option<DashboardDataset>,
    /// Absent in the empty state
    pub record: Option<PeriodRecord>,
    pub metrics: ViewportMetrics,
    pub slices: Vec<SliceSnapshot>,
}

impl Snapshot {
    /// Build from a settled provider state
    pub fn from_state(state: &DataState, period: PeriodKey, viewport_width_px: u32) -> Self {
        let metrics = viewport_metrics(viewport_width_px);
        let record = match PeriodSelector::new(period).display(state.dataset(), state.is_loading) {
            StatusDisplay::Ready(record) => Some(record),
            StatusDisplay::Loading | StatusDisplay::Empty => None,
        };
        let slices = record
            .map(|record| slices(&record, &metrics))
            .unwrap_or_default();

        Snapshot {
            has_data: state.data.is_some(),
            period,
            period_label: period.label(),
            dataset: state.dataset().cloned(),
            record,
            metrics,
            slices,
        }
    }
}

fn slices(record: &PeriodRecord, metrics: &ViewportMetrics) -> Vec<SliceSnapshot> {
    let segments = record.segments();
    let sectors = DonutSweep::default().layout(&segments.map(|s| s.weight));

    segments
        .iter()
        .zip(sectors)
        .map(|(segment, sector)| SliceSnapshot {
            name: segment.name,
            label: compute_label(&RadialLabelRequest {
                center_x: 0.0,
                center_y: 0.0,
                mid_angle_degrees: sector.mid_angle,
                inner_radius: metrics.inner_radius,
                outer_radius: metrics.outer_radius,
                fraction_of_whole: sector.fraction,
                slice_color: segment.color,
                viewport_width_px: metrics.viewport_width_px,
            }),
            sector,
        })
        .collect()
}

/// Fetch once with the given latency and capture the settled state
///
/// Must be called inside a tokio runtime.
pub async fn capture(
    latency: Duration,
    has_data: bool,
    period: PeriodKey,
    viewport_width_px: u32,
) -> Snapshot {
    let mut provider = MockDataProvider::new(latency);
    provider.request(has_data);
    let state = provider.settled().await;
    info!(has_data, period = ?period, viewport_width_px, "Snapshot captured");
    Snapshot::from_state(&state, period, viewport_width_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn settled(has_data: bool) -> DataState {
        DataState {
            data: has_data.then(|| Arc::new(DashboardDataset::fixture())),
            is_loading: false,
        }
    }

    #[test]
    fn test_snapshot_with_data() {
        let snapshot = Snapshot::from_state(&settled(true), PeriodKey::Today, 1280);
        let record = snapshot.record.unwrap();
        assert_eq!(record.total, 16);
        assert_eq!(snapshot.slices.len(), 3);
        assert_eq!(snapshot.slices[0].name, "Hoàn thành");
        let texts: Vec<_> = snapshot
            .slices
            .iter()
            .map(|s| s.label.as_ref().unwrap().text.as_str())
            .collect();
        assert_eq!(texts, ["30%", "40%", "30%"]);
    }

    #[test]
    fn test_snapshot_empty_state() {
        let snapshot = Snapshot::from_state(&settled(false), PeriodKey::ThisYear, 1280);
        assert!(!snapshot.has_data);
        assert!(snapshot.dataset.is_none());
        assert!(snapshot.record.is_none());
        assert!(snapshot.slices.is_empty());
    }

    #[test]
    fn test_narrow_snapshot_has_no_labels() {
        let snapshot = Snapshot::from_state(&settled(true), PeriodKey::ThisMonth, 320);
        assert!(!snapshot.metrics.labels_visible);
        assert!(snapshot.slices.iter().all(|s| s.label.is_none()));
        assert_eq!(snapshot.record.unwrap().total, 120);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = Snapshot::from_state(&settled(true), PeriodKey::ThisQuarter, 1000);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["period"], "thisQuarter");
        assert_eq!(json["periodLabel"], "Quý này");
        assert_eq!(json["record"]["inProgress"], 105);
        assert_eq!(json["metrics"]["labelScale"], 1.1);
        assert_eq!(json["slices"][1]["label"]["color"], "#2563EB");
        assert_eq!(json["dataset"]["productionStatus"]["total"], 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_waits_for_latency() {
        let start = tokio::time::Instant::now();
        let snapshot = capture(Duration::from_millis(800), true, PeriodKey::Today, 1280).await;
        assert!(start.elapsed() >= Duration::from_millis(800));
        assert!(snapshot.has_data);
    }
}
