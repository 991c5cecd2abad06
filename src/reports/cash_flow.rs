//! Cash-flow time series
//!
//! Buckets non-transfer transactions by month across an inclusive date
//! range.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{LedgerState, Money, Month};

/// Income and expense for one month bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashFlowPoint {
    pub month: Month,
    pub income: Money,
    pub expense: Money,
}

/// Month buckets between `start` and `end` (both inclusive), oldest first
///
/// Only months holding at least one transaction in range appear. An empty
/// series is returned when `start` is after `end`.
pub fn time_series(state: &LedgerState, start: NaiveDate, end: NaiveDate) -> Vec<CashFlowPoint> {
    let mut buckets: BTreeMap<Month, CashFlowPoint> = BTreeMap::new();

    for txn in state
        .transactions
        .iter()
        .filter(|t| !t.transfer && t.date >= start && t.date <= end)
    {
        let month = Month::of(txn.date);
        let point = buckets.entry(month).or_insert(CashFlowPoint {
            month,
            income: Money::zero(),
            expense: Money::zero(),
        });

        if txn.is_income() {
            point.income += txn.amount;
        } else {
            point.expense += txn.amount;
        }
    }

    buckets.into_values().collect()
}
