//! Production planning (MRP) dashboard
//!
//! A mock data provider with simulated latency feeds a terminal dashboard of
//! production KPIs. The donut geometry and period selection are plain
//! functions so they can be used headlessly through [`snapshot`].

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod period;
pub mod provider;
pub mod snapshot;

pub use config::Config;
pub use data::DashboardDataset;
pub use error::{ConfigError, DashboardError, Result};
pub use period::{PeriodKey, PeriodRecord};
pub use provider::{DataState, MockDataProvider};
