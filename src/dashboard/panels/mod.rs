//! Dashboard panels
//!
//! Every panel renders from `&App` and handles its own loading and empty
//! states.

pub mod materials_needed;
pub mod production_chart;
pub mod production_progress;
pub mod production_status;
pub mod stats_cards;
pub mod status_summary;
pub mod top_customers;
