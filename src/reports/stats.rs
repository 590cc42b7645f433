//! Period statistics and category aggregation
//!
//! Reduces a transaction list into period totals and per-category sums. All
//! functions here are pure: the same input always yields the same output,
//! including the order of categories.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::models::{Money, Transaction, TransactionType};

/// Aggregated totals for one period
///
/// The balance is always derived from income and expenses, so the fields are
/// private and only set through the constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    income: Money,
    expenses: Money,
    balance: Money,
    transaction_count: usize,
}

impl PeriodStats {
    /// Build stats from totals; the balance is computed
    pub fn new(income: Money, expenses: Money, transaction_count: usize) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
            transaction_count,
        }
    }

    /// Compute stats over a transaction list
    ///
    /// Fails when a total does not fit in [`Money`].
    pub fn from_transactions(transactions: &[Transaction]) -> ReportResult<Self> {
        let (income, expenses) = totals(transactions)?;
        Ok(Self::new(income, expenses, transactions.len()))
    }

    pub fn income(&self) -> Money {
        self.income
    }

    pub fn expenses(&self) -> Money {
        self.expenses
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// Savings rate: share of income left after expenses, 0 without income
    pub fn savings_rate(&self) -> f64 {
        if self.income.is_positive() {
            self.balance.as_major() / self.income.as_major() * 100.0
        } else {
            0.0
        }
    }
}

impl Default for PeriodStats {
    fn default() -> Self {
        Self::new(Money::zero(), Money::zero(), 0)
    }
}

/// Totals of the comparison period (no transaction count)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviousPeriodStats {
    income: Money,
    expenses: Money,
    balance: Money,
}

impl PreviousPeriodStats {
    pub fn new(income: Money, expenses: Money) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    pub fn from_transactions(transactions: &[Transaction]) -> ReportResult<Self> {
        let (income, expenses) = totals(transactions)?;
        Ok(Self::new(income, expenses))
    }

    pub fn income(&self) -> Money {
        self.income
    }

    pub fn expenses(&self) -> Money {
        self.expenses
    }

    pub fn balance(&self) -> Money {
        self.balance
    }
}

impl Default for PreviousPeriodStats {
    fn default() -> Self {
        Self::new(Money::zero(), Money::zero())
    }
}

impl From<&PeriodStats> for PreviousPeriodStats {
    fn from(stats: &PeriodStats) -> Self {
        Self::new(stats.income(), stats.expenses())
    }
}

/// One category's share of a transaction type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
    /// Share of the type's total, 0-100
    pub percentage: f64,
}

/// Per-category sums for one transaction type, largest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub kind: TransactionType,
    pub categories: Vec<CategoryTotal>,
    pub total: Money,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn total_out_of_range(txn: &Transaction) -> ReportError {
    ReportError::input_data(&txn.id, format!("{} total is out of range", txn.kind))
}

/// Sum income and expense amounts
///
/// Both sums and their difference are checked, so the balance derived from
/// them is always representable.
fn totals(transactions: &[Transaction]) -> ReportResult<(Money, Money)> {
    let mut income = Money::zero();
    let mut expenses = Money::zero();
    for txn in transactions {
        let total = match txn.kind {
            TransactionType::Income => &mut income,
            TransactionType::Expense => &mut expenses,
        };
        *total = total
            .checked_add(txn.amount)
            .ok_or_else(|| total_out_of_range(txn))?;
    }

    if income.checked_sub(expenses).is_none() {
        return Err(ReportError::Validation(
            "balance of income and expenses is out of range".into(),
        ));
    }
    Ok((income, expenses))
}

/// Group transactions of one type by category
///
/// Categories are ordered by descending amount; equal amounts keep the order
/// in which the category first appeared.
pub fn aggregate(
    transactions: &[Transaction],
    kind: TransactionType,
) -> ReportResult<CategoryBreakdown> {
    let mut order: Vec<(String, Money)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total = Money::zero();

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        total = total
            .checked_add(txn.amount)
            .ok_or_else(|| total_out_of_range(txn))?;
        match index.get(txn.category.as_str()).copied() {
            // Bounded by `total`, which was checked above
            Some(i) => order[i].1 += txn.amount,
            None => {
                index.insert(txn.category.as_str(), order.len());
                order.push((txn.category.clone(), txn.amount));
            }
        }
    }

    // Vec::sort_by is stable, which gives the first-seen tie-break
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let categories = order
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category,
            amount,
            percentage: percentage_of(amount, total),
        })
        .collect();

    Ok(CategoryBreakdown {
        kind,
        categories,
        total,
    })
}

/// Share of `part` in `total` as a percentage, 0 when the total is 0
pub fn percentage_of(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        0.0
    } else {
        part.cents() as f64 / total.cents() as f64 * 100.0
    }
}

/// Period-over-period change in percent
///
/// When the previous value is zero the change is 100 if the current value is
/// positive and 0 otherwise.
pub fn percentage_change(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        if current.is_positive() {
            100.0
        } else {
            0.0
        }
    } else {
        (current.cents() as f64 - previous.cents() as f64) / previous.cents() as f64 * 100.0
    }
}
