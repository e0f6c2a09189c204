//! Reporting period selector for the production status panel
//!
//! Each period maps to a fixed record of order counts plus three relative
//! slice weights for the donut. Only [`PeriodKey::Today`] reads the live
//! dataset; the other periods are static demo figures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{DashboardDataset, ProductionStatusTotals};
use crate::geometry::Rgb;

/// Closed set of reporting windows
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum PeriodKey {
    #[default]
    Today,
    ThisMonth,
    ThisQuarter,
    ThisYear,
}

impl PeriodKey {
    pub const ALL: [PeriodKey; 4] = [
        PeriodKey::Today,
        PeriodKey::ThisMonth,
        PeriodKey::ThisQuarter,
        PeriodKey::ThisYear,
    ];

    /// Label shown in the period selector
    pub fn label(self) -> &'static str {
        match self {
            PeriodKey::Today => "Hôm nay",
            PeriodKey::ThisMonth => "Tháng này",
            PeriodKey::ThisQuarter => "Quý này",
            PeriodKey::ThisYear => "Năm nay",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PeriodKey::Today => 0,
            PeriodKey::ThisMonth => 1,
            PeriodKey::ThisQuarter => 2,
            PeriodKey::ThisYear => 3,
        }
    }

    /// Period at `index`, falling back to `Today` when out of range
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::ALL.len())
    }

    pub fn previous(self) -> Self {
        Self::from_index((self.index() + Self::ALL.len() - 1) % Self::ALL.len())
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Figures shown for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub planned: u32,
    /// Relative weights for completed / in progress / not completed
    pub slice_weights: [f64; 3],
}

/// One donut segment, before angular layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutSegment {
    pub name: &'static str,
    pub weight: f64,
    pub color: Rgb,
}

pub const COMPLETED_COLOR: Rgb = Rgb::new(0x10, 0xB9, 0x81);
pub const IN_PROGRESS_COLOR: Rgb = Rgb::new(0x25, 0x63, 0xEB);
pub const NOT_COMPLETED_COLOR: Rgb = Rgb::new(0xF9, 0x73, 0x16);

const TODAY_FALLBACK: ProductionStatusTotals = ProductionStatusTotals {
    total: 45,
    completed: 15,
    in_progress: 18,
    planned: 12,
};

impl PeriodRecord {
    const fn fixed(total: u32, completed: u32, in_progress: u32, planned: u32, w: [f64; 3]) -> Self {
        PeriodRecord {
            total,
            completed,
            in_progress,
            planned,
            slice_weights: w,
        }
    }

    pub fn totals(&self) -> ProductionStatusTotals {
        ProductionStatusTotals {
            total: self.total,
            completed: self.completed,
            in_progress: self.in_progress,
            planned: self.planned,
        }
    }

    /// Donut segments in drawing order
    pub fn segments(&self) -> [DonutSegment; 3] {
        [
            DonutSegment {
                name: "Hoàn thành",
                weight: self.slice_weights[0],
                color: COMPLETED_COLOR,
            },
            DonutSegment {
                name: "Đang sản xuất",
                weight: self.slice_weights[1],
                color: IN_PROGRESS_COLOR,
            },
            DonutSegment {
                name: "Chưa hoàn thành",
                weight: self.slice_weights[2],
                color: NOT_COMPLETED_COLOR,
            },
        ]
    }
}

fn or_fallback(live: u32, fallback: u32) -> u32 {
    if live == 0 {
        fallback
    } else {
        live
    }
}

/// Look up the record for `period`
///
/// `Today` takes its counts from `live` when present. A zero live count
/// falls back to the demo constant for that field.
pub fn select(period: PeriodKey, live: Option<&ProductionStatusTotals>) -> PeriodRecord {
    match period {
        PeriodKey::Today => {
            let live = live.copied().unwrap_or_default();
            PeriodRecord::fixed(
                or_fallback(live.total, TODAY_FALLBACK.total),
                or_fallback(live.completed, TODAY_FALLBACK.completed),
                or_fallback(live.in_progress, TODAY_FALLBACK.in_progress),
                or_fallback(live.planned, TODAY_FALLBACK.planned),
                [30.0, 40.0, 30.0],
            )
        }
        PeriodKey::ThisMonth => PeriodRecord::fixed(120, 48, 42, 30, [40.0, 35.0, 25.0]),
        PeriodKey::ThisQuarter => PeriodRecord::fixed(350, 175, 105, 70, [50.0, 30.0, 20.0]),
        PeriodKey::ThisYear => PeriodRecord::fixed(1200, 720, 300, 180, [60.0, 25.0, 15.0]),
    }
}

/// What the production status panel should draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusDisplay {
    Loading,
    Empty,
    Ready(PeriodRecord),
}

/// Selected period state, owned by the dashboard controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodSelector {
    current: PeriodKey,
}

impl PeriodSelector {
    pub fn new(initial: PeriodKey) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> PeriodKey {
        self.current
    }

    /// Switch to `period`, returning its record
    pub fn select(
        &mut self,
        period: PeriodKey,
        live: Option<&ProductionStatusTotals>,
    ) -> PeriodRecord {
        if period != self.current {
            tracing::debug!(from = ?self.current, to = ?period, "Period changed");
        }
        self.current = period;
        select(period, live)
    }

    pub fn record(&self, live: Option<&ProductionStatusTotals>) -> PeriodRecord {
        select(self.current, live)
    }

    /// Derive the panel state from the provider output
    pub fn display(&self, data: Option<&DashboardDataset>, is_loading: bool) -> StatusDisplay {
        if is_loading {
            return StatusDisplay::Loading;
        }
        match data {
            Some(data) => StatusDisplay::Ready(self.record(Some(&data.production_status))),
            None => StatusDisplay::Empty,
        }
    }
}
