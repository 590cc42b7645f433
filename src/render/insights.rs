//! Derived textual statements about the period

use super::cursor::DocumentCursor;
use super::surface::{DrawingSurface, FontWeight, Rgb, TextAlign};
use super::{draw_section_title, SectionRenderer};
use crate::error::ReportResult;
use crate::models::NumberFormat;
use crate::reports::{percentage_change, PeriodStats, PreviousPeriodStats};

pub const INSIGHT_LINE_HEIGHT: f64 = 8.0;

/// Expense change, in percent, beyond which it is worth mentioning
pub const EXPENSE_CHANGE_THRESHOLD: f64 = 10.0;

/// Build the insight lines, in display order
///
/// The balance and savings rate lines are always present, followed by an
/// optional expense trend line and the transaction count.
pub fn insights(
    current: &PeriodStats,
    previous: &PreviousPeriodStats,
    number_format: &NumberFormat,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);

    let balance = current.balance();
    if balance.is_positive() {
        lines.push(format!(
            "Saldo positivo de {}",
            balance.format_with(number_format)
        ));
    } else {
        lines.push(format!(
            "Saldo negativo de {}",
            balance.abs().format_with(number_format)
        ));
    }

    lines.push(format!("Taxa de poupança: {:.1}%", current.savings_rate()));

    if previous.expenses().is_positive() {
        let change = percentage_change(current.expenses(), previous.expenses());
        if change > EXPENSE_CHANGE_THRESHOLD {
            lines.push(format!(
                "Despesas aumentaram {:.1}% em relação ao período anterior",
                change
            ));
        } else if change < -EXPENSE_CHANGE_THRESHOLD {
            lines.push(format!(
                "Despesas reduziram {:.1}% em relação ao período anterior",
                change.abs()
            ));
        }
    }

    lines.push(format!(
        "Total de {} transações registradas",
        current.transaction_count()
    ));

    lines
}

pub struct InsightsRenderer<'a> {
    pub current: &'a PeriodStats,
    pub previous: &'a PreviousPeriodStats,
    pub number_format: &'a NumberFormat,
}

impl SectionRenderer for InsightsRenderer<'_> {
    fn render<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
    ) -> ReportResult<()> {
        let lines = insights(self.current, self.previous, self.number_format);
        log::debug!("Rendering {} insights on page {}", lines.len(), cursor.page_number());
        draw_section_title(cursor, "Insights do Período")?;

        for line in lines {
            cursor.reserve(INSIGHT_LINE_HEIGHT)?;

            let x = cursor.margin() + 5.0;
            let y = cursor.y();
            let surface = cursor.surface();
            surface.set_font(FontWeight::Normal, 10.0)?;
            surface.set_text_color(Rgb::BLACK)?;
            surface.draw_text(x, y, &format!("• {}", line), TextAlign::Left)?;

            cursor.advance(INSIGHT_LINE_HEIGHT);
        }
        Ok(())
    }
}
