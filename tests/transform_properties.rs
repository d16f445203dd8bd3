use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use salesprep::aggregate::{avg_weekly_sales_per_month, round_to_cents};
use salesprep::transform::{clean_records, SalesRecord, CPI_FILL, SALES_THRESHOLD, UNEMPLOYMENT_FILL};
use std::collections::BTreeMap;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn record_strategy() -> impl Strategy<Value = SalesRecord> {
    (
        proptest::option::of(1i64..50),
        proptest::option::of(1i64..100),
        proptest::option::of(any::<bool>()),
        proptest::option::of(-5_000.0f64..60_000.0),
        proptest::option::of(120.0f64..230.0),
        proptest::option::of(3.0f64..15.0),
        proptest::option::weighted(0.9, date_strategy()),
    )
        .prop_map(
            |(store_id, dept, is_holiday, weekly_sales, cpi, unemployment, date)| SalesRecord {
                store_id,
                dept,
                is_holiday,
                weekly_sales,
                cpi,
                unemployment,
                date,
            },
        )
}

proptest! {
    #[test]
    fn cleaned_rows_meet_threshold_and_have_no_gaps(records in proptest::collection::vec(record_strategy(), 0..64)) {
        let cleaned = clean_records(records);
        for row in &cleaned {
            prop_assert!(row.weekly_sales >= SALES_THRESHOLD);
            prop_assert!(!row.cpi.is_nan());
            prop_assert!(!row.unemployment.is_nan());
            prop_assert!((1..=12).contains(&row.month));
        }
    }

    #[test]
    fn kept_rows_match_their_inputs(records in proptest::collection::vec(record_strategy(), 0..64)) {
        let expected: Vec<&SalesRecord> = records
            .iter()
            .filter(|r| matches!(r.weekly_sales, Some(v) if v >= SALES_THRESHOLD))
            .filter(|r| r.date.is_some())
            .collect();
        let cleaned = clean_records(records.clone());
        prop_assert_eq!(cleaned.len(), expected.len());
        for (out, input) in cleaned.iter().zip(expected) {
            prop_assert_eq!(Some(out.month), input.date.map(|d| d.month()));
            prop_assert_eq!(Some(out.weekly_sales), input.weekly_sales);
            prop_assert_eq!(out.cpi, input.cpi.unwrap_or(CPI_FILL));
            prop_assert_eq!(out.unemployment, input.unemployment.unwrap_or(UNEMPLOYMENT_FILL));
            prop_assert_eq!(out.store_id, input.store_id);
        }
    }

    #[test]
    fn aggregate_has_one_row_per_month_with_rounded_mean(records in proptest::collection::vec(record_strategy(), 0..64)) {
        let cleaned = clean_records(records);
        let agg = avg_weekly_sales_per_month(&cleaned);

        let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for row in &cleaned {
            groups.entry(row.month).or_default().push(row.weekly_sales);
        }

        prop_assert_eq!(agg.len(), groups.len());
        for (row, (month, sales)) in agg.iter().zip(&groups) {
            prop_assert_eq!(row.month, *month);
            let mean = sales.iter().sum::<f64>() / sales.len() as f64;
            prop_assert_eq!(row.avg_sales, round_to_cents(mean));
        }
    }
}
