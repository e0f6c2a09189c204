//! Dashboard dataset and the canonical mock fixture

use serde::{Deserialize, Serialize};

/// Direction of a KPI change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// One of the "most produced products" KPI cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStat {
    pub id: String,
    pub value: u32,
    pub label: String,
    pub sublabel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// Planned vs actual output for one product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPlanEntry {
    pub category: String,
    pub planned: u32,
    pub actual: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerVolume {
    pub name: String,
    pub value: u32,
}

/// Reported production order counts
///
/// The three breakdown figures are independent reported numbers; they are
/// not required to add up to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionStatusTotals {
    pub total: u32,
    pub completed: u32,
    pub in_progress: u32,
    pub planned: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    pub id: String,
    pub label: String,
    pub value: u32,
    pub total: u32,
    pub amount: String,
    pub percentage: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    pub id: String,
    pub rank: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub unit: String,
    pub quantity: u32,
}

/// Accent color of a status summary counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Amber,
    Blue,
    Green,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusItem {
    pub count: u32,
    pub label: String,
    pub color: StatusColor,
}

/// Full dashboard snapshot. Never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDataset {
    pub top_products: Vec<ProductStat>,
    pub production_plan: Vec<ProductionPlanEntry>,
    pub top_customers: Vec<CustomerVolume>,
    pub production_status: ProductionStatusTotals,
    pub production_progress: Vec<ProgressItem>,
    pub materials_needed: Vec<MaterialItem>,
    pub status_summary: Vec<StatusItem>,
}

fn product(id: &str, value: u32, label: &str, change: f64, trend: Trend) -> ProductStat {
    ProductStat {
        id: id.to_string(),
        value,
        label: label.to_string(),
        sublabel: label.to_string(),
        change: Some(change),
        trend: Some(trend),
    }
}

fn plan(category: &str, planned: u32, actual: u32) -> ProductionPlanEntry {
    ProductionPlanEntry {
        category: category.to_string(),
        planned,
        actual,
        highlight: None,
    }
}

fn customer(name: &str, value: u32) -> CustomerVolume {
    CustomerVolume {
        name: name.to_string(),
        value,
    }
}

fn progress(id: &str, label: &str, value: u32, total: u32, percentage: u16) -> ProgressItem {
    ProgressItem {
        id: id.to_string(),
        label: label.to_string(),
        value,
        total,
        amount: format!("{} cái", value),
        percentage,
    }
}

fn material(rank: u32, name: &str, unit: &str) -> MaterialItem {
    MaterialItem {
        id: rank.to_string(),
        rank,
        name: name.to_string(),
        kind: "Vải".to_string(),
        unit: unit.to_string(),
        quantity: 8,
    }
}

fn status(count: u32, label: &str, color: StatusColor) -> StatusItem {
    StatusItem {
        count,
        label: label.to_string(),
        color,
    }
}

impl DashboardDataset {
    /// The canonical dataset served by the mock provider
    pub fn fixture() -> Self {
        DashboardDataset {
            top_products: vec![
                product("1", 48, "Áo sơ mi dài tay", 8.2, Trend::Up),
                product("2", 18, "Quần tây", 5.0, Trend::Down),
                product("3", 40, "Áo hoodie", 12.0, Trend::Up),
                product("4", 23, "Đầm maxi", 3.5, Trend::Up),
                product("5", 48, "Áo thun cổ tròn", 4.7, Trend::Up),
            ],
            production_plan: vec![
                plan("Hội hàng", 90, 40),
                plan("Áo sơ mi", 80, 65),
                plan("Áo thun polo", 70, 25),
                plan("Quần baggy", 75, 45),
                plan("Quần jogger", 82, 60),
            ],
            top_customers: vec![
                customer("Công ty DH Corp HCM", 3200),
                customer("Công ty Thời Trang AZ", 2800),
                customer("Outlet Launch", 2600),
                customer("Shop thuê tại Greenmart Mall", 2300),
                customer("Shop thời trang Online GYM", 2000),
            ],
            production_status: ProductionStatusTotals {
                total: 16,
                completed: 5,
                in_progress: 6,
                planned: 5,
            },
            production_progress: vec![
                progress("1", "Áo sơ mi dài tay", 123, 246, 50),
                progress("2", "Áo sơ mi cụt tay", 321, 428, 75),
                progress("3", "Quần baggy", 231, 513, 45),
                progress("4", "Quần tây", 999, 1665, 60),
                progress("5", "Đầm maxi", 876, 973, 90),
                progress("6", "Áo hoodie", 765, 5100, 15),
                progress("7", "Áo khoác bomber", 543, 2262, 24),
            ],
            materials_needed: vec![
                material(1, "Chỉ cotton", "Cuộn"),
                material(2, "Vải lụa", "Mét"),
                material(3, "Vải dù", "Mét"),
                material(4, "Vải chống thấm", "Mét"),
                material(5, "Vải dạ", "Mét"),
            ],
            status_summary: vec![
                status(5, "Chưa hoàn thành", StatusColor::Amber),
                status(6, "Đang sản xuất", StatusColor::Blue),
                status(5, "Hoàn thành", StatusColor::Green),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let data = DashboardDataset::fixture();
        assert_eq!(data.top_products.len(), 5);
        assert_eq!(data.production_plan.len(), 5);
        assert_eq!(data.top_customers.len(), 5);
        assert_eq!(data.production_progress.len(), 7);
        assert_eq!(data.materials_needed.len(), 5);
        assert_eq!(data.status_summary.len(), 3);
        assert_eq!(
            data.production_status,
            ProductionStatusTotals {
                total: 16,
                completed: 5,
                in_progress: 6,
                planned: 5
            }
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(DashboardDataset::fixture()).unwrap();
        assert!(json.get("topProducts").is_some());
        assert_eq!(json["productionStatus"]["inProgress"], 6);
        assert_eq!(json["materialsNeeded"][0]["type"], "Vải");
        assert_eq!(json["statusSummary"][1]["color"], "blue");
        assert_eq!(json["topProducts"][1]["trend"], "down");
        assert!(json["productionPlan"][0].get("highlight").is_none());
    }

    #[test]
    fn test_progress_amount_label() {
        let data = DashboardDataset::fixture();
        assert_eq!(data.production_progress[3].amount, "999 cái");
    }
}
