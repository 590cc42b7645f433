//! Category breakdown with proportional bars
//!
//! Expenses first, then income. Each group lists its categories largest
//! first, with the amount, the share of the group total and a bar.

use super::cursor::DocumentCursor;
use super::surface::{DrawingSurface, FontWeight, RectStyle, Rgb, TextAlign};
use super::{draw_section_title, SectionRenderer};
use crate::display::format::format_percentage;
use crate::error::ReportResult;
use crate::models::{NumberFormat, TransactionType};
use crate::reports::{CategoryBreakdown, CategoryTotal};

pub const BAR_WIDTH: f64 = 60.0;
pub const BAR_HEIGHT: f64 = 3.0;
pub const CATEGORY_ROW_HEIGHT: f64 = 8.0;
const GROUP_LABEL_HEIGHT: f64 = 10.0;
const GROUP_GAP: f64 = 10.0;

/// Offset of the amount column from the margin
const AMOUNT_OFFSET: f64 = 80.0;

pub const NO_DATA_TEXT: &str = "Sem dados para o período.";

struct GroupStyle {
    label: &'static str,
    label_color: Rgb,
    bar_color: Rgb,
}

fn group_style(kind: TransactionType) -> GroupStyle {
    match kind {
        TransactionType::Expense => GroupStyle {
            label: "Despesas por Categoria",
            label_color: Rgb::RED,
            bar_color: Rgb::BORDER_RED,
        },
        TransactionType::Income => GroupStyle {
            label: "Receitas por Categoria",
            label_color: Rgb::GREEN,
            bar_color: Rgb::BORDER_GREEN,
        },
    }
}

/// Filled part of a bar for a percentage, clamped to the bar
pub fn bar_fill_width(percentage: f64) -> f64 {
    (percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH
}

pub struct CategoryBreakdownRenderer<'a> {
    pub expenses: &'a CategoryBreakdown,
    pub income: &'a CategoryBreakdown,
    pub number_format: &'a NumberFormat,
}

impl CategoryBreakdownRenderer<'_> {
    fn render_group<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
        group: &CategoryBreakdown,
    ) -> ReportResult<()> {
        let style = group_style(group.kind);

        cursor.reserve(GROUP_LABEL_HEIGHT)?;
        let (margin, y) = (cursor.margin(), cursor.y());
        let surface = cursor.surface();
        surface.set_font(FontWeight::Bold, 12.0)?;
        surface.set_text_color(style.label_color)?;
        surface.draw_text(margin, y, style.label, TextAlign::Left)?;
        surface.set_text_color(Rgb::BLACK)?;
        cursor.advance(GROUP_LABEL_HEIGHT);

        if group.is_empty() {
            cursor.reserve(CATEGORY_ROW_HEIGHT)?;
            let y = cursor.y();
            let surface = cursor.surface();
            surface.set_font(FontWeight::Normal, 9.0)?;
            surface.set_text_color(Rgb::GRAY)?;
            surface.draw_text(margin + 5.0, y, NO_DATA_TEXT, TextAlign::Left)?;
            surface.set_text_color(Rgb::BLACK)?;
            cursor.advance(CATEGORY_ROW_HEIGHT);
            return Ok(());
        }

        for entry in &group.categories {
            self.render_category(cursor, entry, style.bar_color)?;
        }
        Ok(())
    }

    fn render_category<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
        entry: &CategoryTotal,
        bar_color: Rgb,
    ) -> ReportResult<()> {
        cursor.reserve(CATEGORY_ROW_HEIGHT)?;
        let (margin, y) = (cursor.margin(), cursor.y());
        let amount = format!(
            "{} ({})",
            entry.amount.format_with(self.number_format),
            format_percentage(entry.percentage)
        );

        let surface = cursor.surface();
        surface.set_font(FontWeight::Normal, 9.0)?;
        surface.set_text_color(Rgb::BLACK)?;
        surface.draw_text(
            margin + 5.0,
            y,
            &format!("{}:", entry.category),
            TextAlign::Left,
        )?;
        surface.draw_text(margin + AMOUNT_OFFSET, y, &amount, TextAlign::Left)?;

        surface.set_draw_color(Rgb::BAR_TRACK)?;
        surface.draw_rect(margin + 5.0, y + 2.0, BAR_WIDTH, BAR_HEIGHT, RectStyle::Stroke)?;
        let fill = bar_fill_width(entry.percentage);
        if fill > 0.0 {
            surface.set_fill_color(bar_color)?;
            surface.draw_rect(margin + 5.0, y + 2.0, fill, BAR_HEIGHT, RectStyle::Fill)?;
        }

        cursor.advance(CATEGORY_ROW_HEIGHT);
        Ok(())
    }
}

impl SectionRenderer for CategoryBreakdownRenderer<'_> {
    fn render<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
    ) -> ReportResult<()> {
        log::debug!(
            "Rendering breakdown of {} expense and {} income categories",
            self.expenses.categories.len(),
            self.income.categories.len()
        );
        draw_section_title(cursor, "Análise por Categoria")?;

        self.render_group(cursor, self.expenses)?;
        // A gap that would start a new page is dropped
        if !cursor.reserve(GROUP_GAP)? {
            cursor.advance(GROUP_GAP);
        }
        self.render_group(cursor, self.income)
    }
}
