//! Report request
//!
//! The read-only input to the report engine: the period label, current and
//! previous stats, and the transactions of the selected period.

use std::collections::HashSet;

use serde::Serialize;

use super::stats::{aggregate, CategoryBreakdown, PeriodStats, PreviousPeriodStats};
use crate::error::{ReportError, ReportResult};
use crate::models::{PeriodType, ReportPeriod, Transaction, TransactionType};

/// Everything needed to render one report
#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    /// Display string for the period, e.g. "Março 2025"
    pub period_label: String,
    pub current_stats: PeriodStats,
    pub previous_stats: PreviousPeriodStats,
    /// Transactions of the selected period, in display order
    pub transactions: Vec<Transaction>,
    pub period_type: PeriodType,
    /// Selected month, 1-12
    pub selected_month: u32,
    pub selected_year: i32,
}

impl ReportRequest {
    /// Build a request by filtering `transactions` to the period and its
    /// predecessor
    ///
    /// Fails only when the period totals do not fit in a money amount.
    pub fn for_period(period: &ReportPeriod, transactions: &[Transaction]) -> ReportResult<Self> {
        let current: Vec<Transaction> = transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .cloned()
            .collect();
        let previous: Vec<Transaction> = transactions
            .iter()
            .filter(|t| period.previous_contains(t.date))
            .cloned()
            .collect();

        log::debug!(
            "Selected {} transactions for {} ({} in previous period)",
            current.len(),
            period.label(),
            previous.len()
        );

        Ok(Self {
            period_label: period.label(),
            current_stats: PeriodStats::from_transactions(&current)?,
            previous_stats: PreviousPeriodStats::from_transactions(&previous)?,
            transactions: current,
            period_type: period.period_type,
            selected_month: period.month,
            selected_year: period.year,
        })
    }

    /// Check the request before anything is drawn
    ///
    /// Every transaction must be well-formed with a unique id, and the
    /// current stats must match the transactions they summarize.
    pub fn validate(&self) -> ReportResult<()> {
        let mut seen = HashSet::new();
        for txn in &self.transactions {
            txn.validate()?;
            if !seen.insert(txn.id.as_str()) {
                return Err(ReportError::input_data(&txn.id, "duplicate transaction id"));
            }
        }

        let computed = PeriodStats::from_transactions(&self.transactions)?;
        if computed != self.current_stats {
            return Err(ReportError::Validation(format!(
                "current stats do not match transactions: income {} vs {}, expenses {} vs {}, count {} vs {}",
                self.current_stats.income(),
                computed.income(),
                self.current_stats.expenses(),
                computed.expenses(),
                self.current_stats.transaction_count(),
                computed.transaction_count()
            )));
        }

        Ok(())
    }

    /// Expense sums by category, largest first
    pub fn expense_breakdown(&self) -> ReportResult<CategoryBreakdown> {
        aggregate(&self.transactions, TransactionType::Expense)
    }

    /// Income sums by category, largest first
    pub fn income_breakdown(&self) -> ReportResult<CategoryBreakdown> {
        aggregate(&self.transactions, TransactionType::Income)
    }
}
