//! Report period selection
//!
//! Supports month, quarter, year and custom (unbounded) periods, each with a
//! matching "previous period" used for period-over-period comparison.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Kind of period a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    #[default]
    Month,
    Quarter,
    Year,
    Custom,
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Year => write!(f, "year"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown period type '{}'", other)),
        }
    }
}

/// A selected report period
///
/// `month` is 1-based (1 = January). For quarter periods the quarter is the
/// one containing `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub period_type: PeriodType,
    pub month: u32,
    pub year: i32,
}

impl ReportPeriod {
    /// Create a period, rejecting months outside 1-12
    pub fn new(period_type: PeriodType, month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self {
            period_type,
            month,
            year,
        })
    }

    /// A period of the given type around today's date
    pub fn current(period_type: PeriodType) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            period_type,
            month: today.month(),
            year: today.year(),
        }
    }

    /// Quarter number (1-4) containing the selected month
    pub fn quarter(&self) -> u32 {
        (self.month - 1) / 3 + 1
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.period_type {
            PeriodType::Month => date.month() == self.month && date.year() == self.year,
            PeriodType::Quarter => quarter_of(date) == self.quarter() && date.year() == self.year,
            PeriodType::Year => date.year() == self.year,
            PeriodType::Custom => true,
        }
    }

    /// Check if a date falls within the period immediately before this one
    ///
    /// Custom periods have no previous period.
    pub fn previous_contains(&self, date: NaiveDate) -> bool {
        match self.period_type {
            PeriodType::Month => {
                let (month, year) = if self.month == 1 {
                    (12, self.year - 1)
                } else {
                    (self.month - 1, self.year)
                };
                date.month() == month && date.year() == year
            }
            PeriodType::Quarter => {
                let (quarter, year) = if self.quarter() == 1 {
                    (4, self.year - 1)
                } else {
                    (self.quarter() - 1, self.year)
                };
                quarter_of(date) == quarter && date.year() == year
            }
            PeriodType::Year => date.year() == self.year - 1,
            PeriodType::Custom => false,
        }
    }

    /// Human-readable label, e.g. "Março 2025" or "1º Trimestre 2025"
    pub fn label(&self) -> String {
        match self.period_type {
            PeriodType::Month => {
                format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
            }
            PeriodType::Quarter => format!("{}º Trimestre {}", self.quarter(), self.year),
            PeriodType::Year => format!("Ano {}", self.year),
            PeriodType::Custom => "Período Personalizado".to_string(),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// Error type for period construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    InvalidMonth(u32),
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvalidMonth(m) => write!(f, "Invalid month: {} (expected 1-12)", m),
        }
    }
}

impl std::error::Error for PeriodError {}
