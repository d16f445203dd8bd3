use chrono::NaiveDate;

/// One projected row of the merged table, before filtering and imputation.
///
/// `Store_ID`, `Dept` and `IsHoliday` may come from the unmatched side of the
/// join, so they stay optional all the way to the output. An empty `Date`
/// cell is `None`; such a row can never reach the cleaned table.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub store_id: Option<i64>,
    pub dept: Option<i64>,
    pub is_holiday: Option<bool>,
    pub weekly_sales: Option<f64>,
    pub cpi: Option<f64>,
    pub unemployment: Option<f64>,
    pub date: Option<NaiveDate>,
}

/// A row that survived the sales threshold, with CPI and unemployment filled.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub store_id: Option<i64>,
    pub dept: Option<i64>,
    pub is_holiday: Option<bool>,
    pub weekly_sales: f64,
    pub cpi: f64,
    pub unemployment: f64,
    /// Calendar month of the original `Date`, 1–12.
    pub month: u32,
}
