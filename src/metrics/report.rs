use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::model::Money;

/// Which orders a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportWindow {
    /// Orders created since local midnight of the reporting clock.
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "all")]
    AllTime,
}

impl ReportWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportWindow::Today => "today",
            ReportWindow::AllTime => "all",
        }
    }
}

impl Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(ReportWindow::Today),
            "all" => Ok(ReportWindow::AllTime),
            other => Err(format!("unknown report window: {}", other)),
        }
    }
}

/// Local hours shown in an all-time report, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start: u32,
    pub end: u32,
}

impl BusinessHours {
    pub fn contains(&self, hour: u32) -> bool {
        (self.start..=self.end).contains(&hour)
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self { start: 6, end: 21 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub name: String,
    pub count: u64,
    pub revenue: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Coffee,
    Tea,
    Pastry,
    /// Drinks whose name is not on the menu.
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub count: u64,
    pub revenue: Money,
    /// Share of all units sold, whole percent.
    pub pct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierStat {
    pub name: String,
    pub count: u64,
    /// Share of drinks, whole percent.
    pub pct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBucket {
    /// Local hour of day, 0-23.
    pub hour: u32,
    pub label: String,
    pub orders: u64,
    pub revenue: Money,
}

/// `0` is `"12 AM"`, `13` is `"1 PM"`.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

/// Owner dashboard numbers for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub window: ReportWindow,
    pub total_orders: u64,
    pub total_revenue: Money,
    pub avg_order_value: Money,
    /// One decimal place.
    pub avg_items_per_order: f64,
    pub total_items_sold: u64,
    pub status_counts: StatusCounts,
    pub top_items: Vec<RankedItem>,
    pub top_by_revenue: Vec<RankedItem>,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub milk_breakdown: Vec<ModifierStat>,
    pub popular_add_ons: Vec<ModifierStat>,
    pub temp_breakdown: Vec<ModifierStat>,
    pub size_breakdown: Vec<ModifierStat>,
    pub hourly_breakdown: Vec<HourlyBucket>,
    pub peak_hour: Option<HourlyBucket>,
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report ({})", self.window)?;
        writeln!(
            f,
            "  orders {}  revenue {}  avg {}  items/order {:.1}",
            self.total_orders, self.total_revenue, self.avg_order_value, self.avg_items_per_order
        )?;
        writeln!(
            f,
            "  pending {}  in progress {}  completed {}",
            self.status_counts.pending, self.status_counts.in_progress, self.status_counts.completed
        )?;
        for item in &self.top_items {
            writeln!(f, "  {:<24} x{:<4} {}", item.name, item.count, item.revenue)?;
        }
        for category in &self.category_breakdown {
            writeln!(f, "  {:?}: {}%", category.category, category.pct)?;
        }
        match &self.peak_hour {
            Some(peak) => write!(f, "  peak {} ({} orders)", peak.label, peak.orders),
            None => write!(f, "  no peak hour"),
        }
    }
}
