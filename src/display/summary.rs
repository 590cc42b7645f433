//! Terminal tables for period statistics and category breakdowns

use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use super::format::{format_percentage, format_signed_percentage};
use crate::models::{Money, NumberFormat, TransactionType};
use crate::reports::{percentage_change, CategoryBreakdown, PeriodStats, PreviousPeriodStats};

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "")]
    label: &'static str,
    #[tabled(rename = "Atual")]
    current: String,
    #[tabled(rename = "Anterior")]
    previous: String,
    #[tabled(rename = "Variação")]
    change: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Categoria")]
    category: String,
    #[tabled(rename = "Valor")]
    amount: String,
    #[tabled(rename = "%")]
    percentage: String,
}

/// Current vs previous totals with their period-over-period change
pub fn format_stats_table(
    current: &PeriodStats,
    previous: &PreviousPeriodStats,
    number_format: &NumberFormat,
) -> String {
    let row = |label: &'static str, now: Money, before: Money| StatsRow {
        label,
        current: now.format_with(number_format),
        previous: before.format_with(number_format),
        change: format_signed_percentage(percentage_change(now, before)),
    };

    let rows = vec![
        row("Receitas", current.income(), previous.income()),
        row("Despesas", current.expenses(), previous.expenses()),
        row("Saldo", current.balance(), previous.balance()),
    ];

    let mut output = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    output.push_str(&format!(
        "\n{} transações, taxa de poupança {}",
        current.transaction_count(),
        format_percentage(current.savings_rate())
    ));
    output
}

/// One category breakdown as a table, or a placeholder line when empty
pub fn format_breakdown_table(breakdown: &CategoryBreakdown, number_format: &NumberFormat) -> String {
    let title = match breakdown.kind {
        TransactionType::Expense => "Despesas por Categoria",
        TransactionType::Income => "Receitas por Categoria",
    };

    if breakdown.is_empty() {
        return format!("{}\n  Sem dados para o período.", title);
    }

    let rows: Vec<CategoryRow> = breakdown
        .categories
        .iter()
        .map(|c| CategoryRow {
            category: c.category.clone(),
            amount: c.amount.format_with(number_format),
            percentage: format_percentage(c.percentage),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    format!(
        "{}\n{}\nTotal: {}",
        title,
        table,
        breakdown.total.format_with(number_format)
    )
}
