//! Sales analytics over persisted orders.
//!
//! [`aggregate`] filters by window first, then walks the remaining orders once
//! keeping running tallies. Money is summed exactly and only rounded when
//! divided; percentages round to the nearest whole number per facet, so a
//! facet may not sum to exactly 100.

mod report;

pub use report::*;

use chrono::{DateTime, FixedOffset, Timelike};
use std::collections::HashMap;

use crate::model::{DrinkFamily, MenuToken, Money, OrderItem, OrderRecord, OrderStatus};
use crate::pricing::price;

const TOP_N: usize = 5;

/// Running count and revenue per key, remembering first-seen order.
struct Tally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64, Money)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + std::hash::Hash> Tally<K> {
    fn add(&mut self, key: K, count: u64, revenue: Money) {
        let slot = match self.index.get(&key) {
            Some(slot) => *slot,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 0, Money::ZERO));
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[slot];
        entry.1 += count;
        entry.2 += revenue;
    }

    fn bump(&mut self, key: K) {
        self.add(key, 1, Money::ZERO);
    }

    /// Entries sorted by count descending; ties keep first-seen order.
    fn by_count(&self) -> Vec<(K, u64, Money)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    fn by_revenue(&self) -> Vec<(K, u64, Money)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.2.cmp(&a.2));
        sorted
    }
}

/// Nearest whole percent, halves rounding up.
fn percent(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count * 200 + total) / (total * 2)) as u32
}

fn display_name(token: &str) -> String {
    token.replace('_', " ")
}

fn category_of(item: &OrderItem) -> Option<Category> {
    match item {
        OrderItem::Pastry(_) => Some(Category::Pastry),
        OrderItem::Drink(drink) => Some(match drink.name.known().map(|n| n.family()) {
            Some(DrinkFamily::Coffee) => Category::Coffee,
            Some(DrinkFamily::Tea) => Category::Tea,
            None => Category::Other,
        }),
        OrderItem::Unrecognized => None,
    }
}

fn in_window(order: &OrderRecord, window: ReportWindow, clock: &DateTime<FixedOffset>) -> bool {
    match window {
        ReportWindow::AllTime => true,
        ReportWindow::Today => {
            order.created_at.with_timezone(clock.offset()).date_naive() >= clock.date_naive()
        }
    }
}

fn modifier_stats(tally: &Tally<String>, total_drinks: u64) -> Vec<ModifierStat> {
    tally
        .by_count()
        .into_iter()
        .map(|(name, count, _)| ModifierStat {
            name,
            count,
            pct: percent(count, total_drinks),
        })
        .collect()
}

fn ranked(entries: Vec<(String, u64, Money)>) -> Vec<RankedItem> {
    entries
        .into_iter()
        .take(TOP_N)
        .map(|(name, count, revenue)| RankedItem {
            name,
            count,
            revenue,
        })
        .collect()
}

fn count_token<T: crate::model::CatalogEntry>(tally: &mut Tally<String>, token: &Option<MenuToken<T>>) {
    if let Some(token) = token {
        tally.bump(display_name(token.as_str()));
    }
}

/// [`aggregate_with_hours`] with the default business hours.
pub fn aggregate(
    orders: &[OrderRecord],
    window: ReportWindow,
    clock: DateTime<FixedOffset>,
) -> Report {
    aggregate_with_hours(orders, window, clock, BusinessHours::default())
}

/// Builds a [`Report`] for the orders inside `window`.
///
/// `clock` is "now" for the report; its offset defines local midnight and
/// hour of day. In [`ReportWindow::AllTime`] every business hour gets a bucket
/// even when empty, and orders outside business hours get none. In
/// [`ReportWindow::Today`] only hours that had an order are listed.
pub fn aggregate_with_hours(
    orders: &[OrderRecord],
    window: ReportWindow,
    clock: DateTime<FixedOffset>,
    hours: BusinessHours,
) -> Report {
    let filtered: Vec<&OrderRecord> = orders
        .iter()
        .filter(|order| in_window(order, window, &clock))
        .collect();
    let total_orders = filtered.len() as u64;

    let mut status_counts = StatusCounts::default();
    let mut items = Tally::<String>::default();
    let mut categories = Tally::<Category>::default();
    let mut milk = Tally::<String>::default();
    let mut add_ons = Tally::<String>::default();
    let mut temperature = Tally::<String>::default();
    let mut size = Tally::<String>::default();

    let mut total_revenue = Money::ZERO;
    let mut total_items = 0u64;
    let mut total_drinks = 0u64;
    let mut hourly_orders = [0u64; 24];
    let mut hourly_revenue = [Money::ZERO; 24];

    for order in &filtered {
        match order.status {
            OrderStatus::Pending => status_counts.pending += 1,
            OrderStatus::InProgress => status_counts.in_progress += 1,
            OrderStatus::Completed => status_counts.completed += 1,
        }

        let order_revenue: Money = order.payload.items.iter().map(price).sum();
        total_revenue += order_revenue;

        let hour = order.created_at.with_timezone(clock.offset()).hour() as usize;
        hourly_orders[hour] += 1;
        hourly_revenue[hour] += order_revenue;

        for item in &order.payload.items {
            let Some(category) = category_of(item) else {
                continue;
            };
            let units = item.units();
            let line_price = price(item);
            total_items += units;
            items.add(display_name(item.name()), units, line_price);
            categories.add(category, units, line_price);

            if let OrderItem::Drink(drink) = item {
                total_drinks += 1;
                count_token(&mut milk, &drink.milk);
                count_token(&mut temperature, &drink.temperature);
                count_token(&mut size, &drink.size);
                for add_on in &drink.add_ons {
                    add_ons.bump(display_name(add_on.as_str()));
                }
            }
        }
    }

    let avg_items_per_order = if total_orders == 0 {
        0.0
    } else {
        (total_items as f64 / total_orders as f64 * 10.0).round() / 10.0
    };

    let category_breakdown = categories
        .by_count()
        .into_iter()
        .filter(|(_, count, _)| *count > 0)
        .map(|(category, count, revenue)| CategoryBreakdown {
            category,
            count,
            revenue,
            pct: percent(count, total_items),
        })
        .collect();

    let hourly_breakdown: Vec<HourlyBucket> = (0u32..24)
        .filter(|&hour| match window {
            ReportWindow::Today => hourly_orders[hour as usize] > 0,
            ReportWindow::AllTime => hours.contains(hour),
        })
        .map(|hour| HourlyBucket {
            hour,
            label: hour_label(hour),
            orders: hourly_orders[hour as usize],
            revenue: hourly_revenue[hour as usize],
        })
        .collect();

    let peak_hour = hourly_breakdown
        .iter()
        .fold(None::<&HourlyBucket>, |best, bucket| match best {
            Some(best) if best.orders >= bucket.orders => Some(best),
            _ if bucket.orders > 0 => Some(bucket),
            _ => best,
        })
        .cloned();

    Report {
        window,
        total_orders,
        total_revenue,
        avg_order_value: total_revenue.div_round(total_orders),
        avg_items_per_order,
        total_items_sold: total_items,
        status_counts,
        top_items: ranked(items.by_count()),
        top_by_revenue: ranked(items.by_revenue()),
        category_breakdown,
        milk_breakdown: modifier_stats(&milk, total_drinks),
        popular_add_ons: modifier_stats(&add_ons, total_drinks),
        temp_breakdown: modifier_stats(&temperature, total_drinks),
        size_breakdown: modifier_stats(&size, total_drinks),
        hourly_breakdown,
        peak_hour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AddOn, CatalogEntry, DrinkItem, DrinkName, Milk, OrderId, OrderState, PastryItem,
        PastryName, Size, Temperature,
    };
    use chrono::{TimeZone, Utc};

    fn clock() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 14, 18, 0, 0)
            .unwrap()
    }

    fn record(id: u32, hour: u32, day: u32, items: Vec<OrderItem>) -> OrderRecord {
        let at = Utc.with_ymd_and_hms(2026, 3, day, hour, 15, 0).unwrap();
        OrderRecord::new(OrderId(id), OrderState::new(items), at)
    }

    fn latte(size: Size, milk: Milk) -> OrderItem {
        DrinkItem::new(DrinkName::Latte)
            .with_size(size)
            .with_temperature(Temperature::Hot)
            .with_milk(milk)
            .into()
    }

    /// $10.00 and $5.00 orders, four units between them.
    fn sample() -> Vec<OrderRecord> {
        let ten = vec![
            latte(Size::Small, Milk::Whole),
            PastryItem::new(PastryName::BananaBread, 1).into(),
            DrinkItem::new(DrinkName::Americano)
                .with_size(Size::Small)
                .with_temperature(Temperature::Iced)
                .into(),
        ];
        let five = vec![PastryItem::new(PastryName::ChocolateChipCookie, 2).into()];
        vec![record(1, 9, 14, ten), record(2, 12, 14, five)]
    }

    #[test]
    fn test_top_line_numbers() {
        let report = aggregate(&sample(), ReportWindow::AllTime, clock());
        assert_eq!(report.total_orders, 2);
        assert_eq!(report.total_revenue, Money::from_cents(1500));
        assert_eq!(report.avg_order_value, Money::from_cents(750));
        assert_eq!(report.total_items_sold, 5);
        assert_eq!(report.avg_items_per_order, 2.5);
        assert_eq!(report.status_counts.pending, 2);
    }

    #[test]
    fn test_pastry_quantity_counts_as_units() {
        let orders = vec![
            record(1, 8, 14, vec![PastryItem::new(PastryName::PlainCroissant, 3).into()]),
            record(2, 9, 14, vec![latte(Size::Large, Milk::Whole)]),
        ];
        let report = aggregate(&orders, ReportWindow::AllTime, clock());
        assert_eq!(report.total_orders, 2);
        assert_eq!(report.total_items_sold, 4);
        assert_eq!(report.avg_items_per_order, 2.0);
        // 3 x 3.50 + 5.00
        assert_eq!(report.total_revenue, Money::from_cents(1550));
        assert_eq!(report.top_items[0].name, "plain croissant");
        assert_eq!(report.top_items[0].count, 3);
    }

    #[test]
    fn test_empty_input() {
        let report = aggregate(&[], ReportWindow::Today, clock());
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.avg_order_value, Money::ZERO);
        assert_eq!(report.avg_items_per_order, 0.0);
        assert!(report.hourly_breakdown.is_empty());
        assert!(report.peak_hour.is_none());

        let all_time = aggregate(&[], ReportWindow::AllTime, clock());
        assert_eq!(all_time.hourly_breakdown.len(), 16);
        assert!(all_time.peak_hour.is_none());
    }

    #[test]
    fn test_today_window_filters_before_counting() {
        let mut orders = sample();
        orders.push(record(3, 10, 13, vec![latte(Size::Small, Milk::Oat)]));
        let today = aggregate(&orders, ReportWindow::Today, clock());
        assert_eq!(today.total_orders, 2);
        assert!(today.milk_breakdown.iter().all(|m| m.name != "oat"));

        let all = aggregate(&orders, ReportWindow::AllTime, clock());
        assert_eq!(all.total_orders, 3);
    }

    #[test]
    fn test_today_uses_the_clock_offset() {
        // 23:30 UTC on the 13th is already the 14th at UTC+2.
        let late = OrderRecord::new(
            OrderId(9),
            OrderState::new(vec![latte(Size::Small, Milk::Skim)]),
            Utc.with_ymd_and_hms(2026, 3, 13, 23, 30, 0).unwrap(),
        );
        let plus_two = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .unwrap();
        let report = aggregate(std::slice::from_ref(&late), ReportWindow::Today, plus_two);
        assert_eq!(report.total_orders, 1);
        assert_eq!(report.hourly_breakdown[0].hour, 1);
        assert_eq!(report.hourly_breakdown[0].label, "1 AM");

        assert_eq!(aggregate(&[late], ReportWindow::Today, clock()).total_orders, 0);
    }

    #[test]
    fn test_rankings_and_ties() {
        let report = aggregate(&sample(), ReportWindow::AllTime, clock());
        let names: Vec<&str> = report.top_items.iter().map(|i| i.name.as_str()).collect();
        // cookie sold 2; the rest sold 1 each and keep first-seen order
        assert_eq!(names, vec!["chocolate chip cookie", "latte", "banana bread", "americano"]);

        let by_revenue: Vec<&str> = report.top_by_revenue.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(by_revenue[..2], ["chocolate chip cookie", "latte"]);
        assert_eq!(report.top_by_revenue[0].revenue, Money::from_cents(500));
        assert_eq!(report.top_by_revenue[1].revenue, Money::from_cents(400));
    }

    #[test]
    fn test_top_lists_cap_at_five() {
        let items: Vec<OrderItem> = DrinkName::ALL
            .iter()
            .map(|name| DrinkItem::new(*name).into())
            .collect();
        let report = aggregate(&[record(1, 9, 14, items)], ReportWindow::AllTime, clock());
        assert_eq!(report.top_items.len(), 5);
        assert_eq!(report.top_by_revenue.len(), 5);
    }

    #[test]
    fn test_category_mix_counts_units() {
        let report = aggregate(&sample(), ReportWindow::AllTime, clock());
        let mix: Vec<(Category, u64, u32)> = report
            .category_breakdown
            .iter()
            .map(|c| (c.category, c.count, c.pct))
            .collect();
        assert_eq!(
            mix,
            vec![(Category::Pastry, 3, 60), (Category::Coffee, 2, 40)]
        );
    }

    #[test]
    fn test_modifier_percentages_are_of_drinks() {
        let orders = vec![record(
            1,
            9,
            14,
            vec![
                latte(Size::Small, Milk::Oat),
                latte(Size::Large, Milk::Oat),
                DrinkItem::new(DrinkName::ColdBrew)
                    .with_add_on(AddOn::CaramelSyrup)
                    .with_add_on(AddOn::CaramelSyrup)
                    .into(),
                PastryItem::new(PastryName::PlainCroissant, 4).into(),
            ],
        )];
        let report = aggregate(&orders, ReportWindow::AllTime, clock());
        assert_eq!(report.milk_breakdown, vec![ModifierStat { name: "oat".into(), count: 2, pct: 67 }]);
        assert_eq!(report.popular_add_ons[0].name, "caramel syrup");
        assert_eq!(report.popular_add_ons[0].count, 2);
        assert_eq!(report.popular_add_ons[0].pct, 67);
        assert_eq!(report.size_breakdown.len(), 2);
        assert_eq!(report.size_breakdown[0].pct, 33);
    }

    #[test]
    fn test_all_time_hours_and_peak() {
        let mut orders = sample();
        orders.push(record(3, 12, 10, vec![latte(Size::Small, Milk::Skim)]));
        orders.push(record(4, 3, 10, vec![latte(Size::Small, Milk::Skim)]));
        let report = aggregate(&orders, ReportWindow::AllTime, clock());

        assert_eq!(report.hourly_breakdown.first().map(|b| b.hour), Some(6));
        assert_eq!(report.hourly_breakdown.last().map(|b| b.hour), Some(21));
        let peak = report.peak_hour.expect("peak");
        assert_eq!(peak.hour, 12);
        assert_eq!(peak.label, "12 PM");
        assert_eq!(peak.orders, 2);
        // The 3 AM order is counted but has no bucket.
        assert_eq!(report.total_orders, 4);
    }

    #[test]
    fn test_peak_ties_pick_earliest_hour() {
        let report = aggregate(&sample(), ReportWindow::Today, clock());
        let hours: Vec<u32> = report.hourly_breakdown.iter().map(|b| b.hour).collect();
        assert_eq!(hours, vec![9, 12]);
        assert_eq!(report.peak_hour.map(|b| b.hour), Some(9));
    }

    #[test]
    fn test_custom_business_hours() {
        let hours = BusinessHours { start: 7, end: 9 };
        let report = aggregate_with_hours(&sample(), ReportWindow::AllTime, clock(), hours);
        let labels: Vec<&str> = report.hourly_breakdown.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["7 AM", "8 AM", "9 AM"]);
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = aggregate(&sample(), ReportWindow::AllTime, clock());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalRevenue"], 15.0);
        assert_eq!(json["window"], "all");
        assert_eq!(json["statusCounts"]["in_progress"], 0);
    }
}
