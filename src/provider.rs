//! Mock data provider with simulated fetch latency
//!
//! Every request first emits a loading state that still carries the previous
//! dataset, then settles after the configured latency. A new request for a
//! different `has_data` value drops the pending timer, so a superseded
//! request never settles.

use std::future::pending;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep_until, Instant, Sleep};
use tracing::{debug, info};

use crate::data::DashboardDataset;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// What views receive from the provider
#[derive(Debug, Clone, PartialEq)]
pub struct DataState {
    pub data: Option<Arc<DashboardDataset>>,
    pub is_loading: bool,
}

impl DataState {
    pub fn dataset(&self) -> Option<&DashboardDataset> {
        self.data.as_deref()
    }
}

struct PendingFetch {
    request_id: u64,
    has_data: bool,
    timer: Pin<Box<Sleep>>,
}

pub struct MockDataProvider {
    latency: Duration,
    fixture: Arc<DashboardDataset>,
    current: Option<Arc<DashboardDataset>>,
    is_loading: bool,
    last_request: Option<bool>,
    next_request_id: u64,
    pending: Option<PendingFetch>,
}

impl MockDataProvider {
    pub fn new(latency: Duration) -> Self {
        Self::with_fixture(latency, DashboardDataset::fixture())
    }

    pub fn with_fixture(latency: Duration, fixture: DashboardDataset) -> Self {
        MockDataProvider {
            latency,
            fixture: Arc::new(fixture),
            current: None,
            // Nothing has been fetched yet
            is_loading: true,
            last_request: None,
            next_request_id: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> DataState {
        DataState {
            data: self.current.clone(),
            is_loading: self.is_loading,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest requested `has_data` value
    pub fn has_data(&self) -> Option<bool> {
        self.last_request
    }

    /// Request the dataset, or its absence
    ///
    /// Returns the loading emission, or `None` when `has_data` matches the
    /// latest request and nothing needs to happen.
    pub fn request(&mut self, has_data: bool) -> Option<DataState> {
        if self.last_request == Some(has_data) {
            return None;
        }
        Some(self.start(has_data))
    }

    /// Refetch for the latest `has_data` value even though it did not change
    pub fn reload(&mut self) -> DataState {
        let has_data = self.last_request.unwrap_or(true);
        self.start(has_data)
    }

    fn start(&mut self, has_data: bool) -> DataState {
        if let Some(superseded) = self.pending.take() {
            debug!(
                request_id = superseded.request_id,
                has_data = superseded.has_data,
                "Cancelled pending fetch"
            );
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.last_request = Some(has_data);
        self.is_loading = true;
        self.pending = Some(PendingFetch {
            request_id,
            has_data,
            timer: Box::pin(sleep_until(Instant::now() + self.latency)),
        });

        info!(request_id, has_data, latency_ms = self.latency.as_millis() as u64, "Fetch started");
        self.state()
    }

    /// Wait for the pending fetch to settle
    ///
    /// Never completes while nothing is pending. Cancel safe: dropping the
    /// future keeps the pending fetch armed, so it can sit in a
    /// `tokio::select!` loop next to input handling.
    pub async fn settled(&mut self) -> DataState {
        let Some(fetch) = self.pending.as_mut() else {
            return pending().await;
        };
        fetch.timer.as_mut().await;

        let Some(fetch) = self.pending.take() else {
            return pending().await;
        };
        self.current = if fetch.has_data {
            Some(Arc::clone(&self.fixture))
        } else {
            None
        };
        self.is_loading = false;

        info!(request_id = fetch.request_id, has_data = fetch.has_data, "Fetch settled");
        self.state()
    }
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}
