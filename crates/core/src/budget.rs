//! Budget aggregation over an expense list.
//!
//! These are pure functions recomputed on every read from the freshly
//! loaded expense rows; no denormalized total is ever persisted, so the
//! numbers are always consistent with the expense list they were derived
//! from. Amounts are plain `f64` currency quantities (no minor-unit
//! precision guarantee).

use serde::Serialize;

/// Sum of all expense amounts.
pub fn total_spent<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().sum()
}

/// Allocated budget minus total spent. Negative means over budget.
pub fn remaining<I>(allocated: f64, amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    allocated - total_spent(amounts)
}

/// Whether the expense list has overrun the allocated budget.
///
/// Over-budget is a display flag only; it never blocks further expense
/// creation.
pub fn is_over_budget<I>(allocated: f64, amounts: I) -> bool
where
    I: IntoIterator<Item = f64>,
{
    remaining(allocated, amounts) < 0.0
}

/// Derived budget figures attached to report and community reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub allocated: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub over_budget: bool,
}

impl BudgetSummary {
    /// Compute all derived figures from an allocated budget and the
    /// current expense amounts.
    pub fn compute<I>(allocated: f64, amounts: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let total_spent = total_spent(amounts);
        let remaining = allocated - total_spent;
        BudgetSummary {
            allocated,
            total_spent,
            remaining,
            over_budget: remaining < 0.0,
        }
    }
}
