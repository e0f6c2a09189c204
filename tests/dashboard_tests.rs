// Integration tests for the dashboard library and the snapshot command
// These exercise the public API the way the terminal UI and the CLI use it

#[cfg(test)]
mod dashboard_tests {
    use std::process::Command;
    use std::time::Duration;

    use mrp_dashboard::config::Config;
    use mrp_dashboard::data::DashboardDataset;
    use mrp_dashboard::geometry::{compute_label, DonutSweep, RadialLabelRequest, Rgb};
    use mrp_dashboard::period::{select, PeriodKey, PeriodSelector, StatusDisplay};
    use mrp_dashboard::provider::MockDataProvider;
    use mrp_dashboard::snapshot;
    use tempfile::TempDir;
    use tokio::time::{advance, timeout, Instant};

    const LATENCY: Duration = Duration::from_millis(500);

    fn label_request(fraction: f64, width: u32) -> RadialLabelRequest {
        RadialLabelRequest {
            center_x: 150.0,
            center_y: 130.0,
            mid_angle_degrees: 38.25,
            inner_radius: 60.0,
            outer_radius: 100.0,
            fraction_of_whole: fraction,
            slice_color: Rgb::new(0x10, 0xB9, 0x81),
            viewport_width_px: width,
        }
    }

    // Run the snapshot command and parse its JSON output
    fn run_snapshot(args: &[&str]) -> serde_json::Value {
        let home = TempDir::new().unwrap();
        let output = Command::new(env!("CARGO_BIN_EXE_mrp-dashboard"))
            .arg("snapshot")
            .args(args)
            .env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path())
            .env("RUST_LOG", "error")
            .output()
            .expect("failed to run mrp-dashboard");

        assert!(
            output.status.success(),
            "snapshot failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("snapshot prints JSON")
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_sequence_settles_last_request() {
        mrp_dashboard::logging::init_test();
        let mut provider = MockDataProvider::new(LATENCY);
        let start = Instant::now();

        provider.request(true);
        advance(Duration::from_millis(200)).await;
        let loading = provider.request(false).unwrap();
        assert!(loading.is_loading);
        advance(Duration::from_millis(100)).await;
        provider.request(true);

        let settled = provider.settled().await;
        assert!(!settled.is_loading);
        assert_eq!(settled.dataset(), Some(&DashboardDataset::fixture()));
        // Latency restarts at the last request, 300 ms in
        assert!(start.elapsed() >= Duration::from_millis(800));

        assert!(timeout(Duration::from_secs(2), provider.settled()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_keeps_previous_dataset() {
        let mut provider = MockDataProvider::new(LATENCY);
        provider.request(true);
        provider.settled().await;

        let loading = provider.request(false).unwrap();
        assert!(loading.is_loading);
        assert!(loading.data.is_some());

        let settled = provider.settled().await;
        assert!(settled.data.is_none());
        assert!(!settled.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_panel_follows_provider() {
        let mut provider = MockDataProvider::new(LATENCY);
        let selector = PeriodSelector::new(PeriodKey::Today);

        let loading = provider.request(true).unwrap();
        assert_eq!(
            selector.display(loading.dataset(), loading.is_loading),
            StatusDisplay::Loading
        );

        let settled = provider.settled().await;
        match selector.display(settled.dataset(), settled.is_loading) {
            StatusDisplay::Ready(record) => {
                assert_eq!((record.total, record.completed, record.in_progress, record.planned), (16, 5, 6, 5));
            }
            other => panic!("unexpected display {:?}", other),
        }
    }

    #[test]
    fn test_period_lookup_is_pure() {
        let live = DashboardDataset::fixture().production_status;
        for period in PeriodKey::ALL {
            assert_eq!(select(period, Some(&live)), select(period, Some(&live)));
        }
        assert_eq!(select(PeriodKey::ThisQuarter, Some(&live)).total, 350);
        assert_eq!(select(PeriodKey::Today, None).total, 45);
    }

    #[test]
    fn test_labels_around_the_default_donut() {
        let sectors = DonutSweep::default().layout(&[30.0, 40.0, 30.0]);
        let texts: Vec<String> = sectors
            .iter()
            .map(|s| {
                let mut req = label_request(s.fraction, 1280);
                req.mid_angle_degrees = s.mid_angle;
                compute_label(&req).unwrap().text
            })
            .collect();
        assert_eq!(texts, ["30%", "40%", "30%"]);

        assert!(compute_label(&label_request(0.5, 374)).is_none());
        assert_eq!(compute_label(&label_request(0.5, 375)).unwrap().text, "50%");
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "latency_ms": 50, "period": "thisMonth" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.latency(), Duration::from_millis(50));
        assert_eq!(config.period, PeriodKey::ThisMonth);
        assert!(config.has_data);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_snapshot() {
        let snapshot = snapshot::capture(LATENCY, true, PeriodKey::ThisYear, 900).await;
        let record = snapshot.record.unwrap();
        assert_eq!(record.total, 1200);
        assert_eq!(snapshot.metrics.outer_radius, 90.0);
        let label = snapshot.slices[0].label.as_ref().unwrap();
        assert_eq!(label.text, "60%");
    }

    #[test]
    fn test_snapshot_command() {
        let json = run_snapshot(&["--latency-ms", "0", "--period", "this-quarter", "--width", "1280"]);
        assert_eq!(json["hasData"], true);
        assert_eq!(json["period"], "thisQuarter");
        assert_eq!(json["record"]["total"], 350);
        assert_eq!(json["slices"][0]["label"]["text"], "50%");
    }

    #[test]
    fn test_snapshot_command_empty_state() {
        let json = run_snapshot(&["--latency-ms", "0", "--no-data"]);
        assert_eq!(json["hasData"], false);
        assert!(json["dataset"].is_null());
        assert!(json["record"].is_null());
        assert_eq!(json["slices"].as_array().map(Vec::len), Some(0));
    }
}
