use crate::transform::CleanRecord;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Mean weekly sales for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverage {
    pub month: u32,
    /// Rounded to two decimals.
    pub avg_sales: f64,
}

/// Group cleaned rows by `Month` and average `Weekly_Sales`, ascending by month.
///
/// An empty input yields an empty result.
#[instrument(level = "info", skip_all, fields(rows = cleaned.len()))]
pub fn avg_weekly_sales_per_month(cleaned: &[CleanRecord]) -> Vec<MonthlyAverage> {
    let mut groups: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for record in cleaned {
        let (sum, count) = groups.entry(record.month).or_insert((0.0, 0));
        *sum += record.weekly_sales;
        *count += 1;
    }

    let averages: Vec<MonthlyAverage> = groups
        .into_iter()
        .map(|(month, (sum, count))| MonthlyAverage {
            month,
            avg_sales: round_to_cents(sum / count as f64),
        })
        .collect();
    info!(months = averages.len(), "aggregated monthly sales");
    averages
}

/// Round half to even at the second decimal.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
