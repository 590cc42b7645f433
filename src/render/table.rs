//! Transaction table
//!
//! Five fixed columns with relative widths. Rows never split across pages:
//! each row reserves its height first. The column header is only drawn once,
//! at the start of the table.

use super::cursor::DocumentCursor;
use super::surface::{DrawingSurface, FontWeight, RectStyle, Rgb, TextAlign};
use super::{draw_section_title, SectionRenderer};
use crate::display::format::{format_date, truncate};
use crate::error::ReportResult;
use crate::models::{NumberFormat, Transaction, TransactionType};

pub const ROW_HEIGHT: f64 = 8.0;

/// Descriptions longer than this are cut and get an ellipsis
pub const DESCRIPTION_MAX_CHARS: usize = 25;

pub const COLUMN_HEADERS: [&str; 5] = ["Data", "Descrição", "Categoria", "Tipo", "Valor"];

/// Relative column widths; they fill the content width exactly
const COLUMN_WEIGHTS: [f64; 5] = [25.0, 60.0, 35.0, 25.0, 25.0];

/// Left padding of cell text
const CELL_PADDING: f64 = 2.0;

/// Baseline offset of cell text inside a row
const TEXT_BASELINE: f64 = 5.0;

pub const EMPTY_TABLE_TEXT: &str = "Nenhuma transação encontrada para o período selecionado.";

const EMPTY_TABLE_HEIGHT: f64 = 15.0;

pub struct TransactionTable<'a> {
    pub transactions: &'a [Transaction],
    pub number_format: &'a NumberFormat,
    /// strftime pattern for the date column
    pub date_format: &'a str,
}

/// Left edge of every column's text for a table starting at `margin`
fn column_positions(margin: f64, content_width: f64) -> [f64; 5] {
    let total: f64 = COLUMN_WEIGHTS.iter().sum();
    let scale = content_width / total;
    let mut positions = [0.0; 5];
    let mut x = margin + CELL_PADDING;
    for (position, weight) in positions.iter_mut().zip(COLUMN_WEIGHTS) {
        *position = x;
        x += weight * scale;
    }
    positions
}

impl TransactionTable<'_> {
    fn row_cells(&self, txn: &Transaction) -> ReportResult<[String; 5]> {
        Ok([
            format_date(txn.date, self.date_format)?,
            truncate(&txn.description, DESCRIPTION_MAX_CHARS),
            txn.category.clone(),
            txn.kind.label().to_string(),
            txn.amount.format_with(self.number_format),
        ])
    }

    fn render_empty<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
    ) -> ReportResult<()> {
        cursor.reserve(EMPTY_TABLE_HEIGHT)?;
        let x = cursor.margin();
        let y = cursor.y();
        let surface = cursor.surface();
        surface.set_font(FontWeight::Normal, 10.0)?;
        surface.set_text_color(Rgb::GRAY)?;
        surface.draw_text(x, y, EMPTY_TABLE_TEXT, TextAlign::Left)?;
        surface.set_text_color(Rgb::BLACK)?;
        cursor.advance(EMPTY_TABLE_HEIGHT);
        Ok(())
    }

    fn render_header<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
        columns: &[f64; 5],
    ) -> ReportResult<()> {
        cursor.reserve(ROW_HEIGHT)?;
        let (x, y, width) = (cursor.margin(), cursor.y(), cursor.content_width());
        let surface = cursor.surface();
        surface.set_fill_color(Rgb::HEADER_ROW)?;
        surface.draw_rect(x, y, width, ROW_HEIGHT, RectStyle::Fill)?;
        surface.set_font(FontWeight::Bold, 9.0)?;
        surface.set_text_color(Rgb::BLACK)?;
        for (header, column_x) in COLUMN_HEADERS.iter().zip(columns) {
            surface.draw_text(*column_x, y + TEXT_BASELINE, header, TextAlign::Left)?;
        }
        cursor.advance(ROW_HEIGHT);
        Ok(())
    }

    fn render_row<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
        columns: &[f64; 5],
        index: usize,
        txn: &Transaction,
    ) -> ReportResult<()> {
        if cursor.reserve(ROW_HEIGHT)? {
            log::debug!("Transaction table continues on page {}", cursor.page_number());
        }

        let cells = self.row_cells(txn)?;
        let (x, y, width) = (cursor.margin(), cursor.y(), cursor.content_width());
        let amount_color = match txn.kind {
            TransactionType::Income => Rgb::GREEN,
            TransactionType::Expense => Rgb::RED,
        };

        let surface = cursor.surface();
        // Stripes follow the row index, not the position on the page
        if index % 2 == 0 {
            surface.set_fill_color(Rgb::STRIPE)?;
            surface.draw_rect(x, y, width, ROW_HEIGHT, RectStyle::Fill)?;
        }

        surface.set_font(FontWeight::Normal, 8.0)?;
        let last = cells.len() - 1;
        for (i, (cell, column_x)) in cells.iter().zip(columns).enumerate() {
            let color = if i == last { amount_color } else { Rgb::BLACK };
            surface.set_text_color(color)?;
            surface.draw_text(*column_x, y + TEXT_BASELINE, cell, TextAlign::Left)?;
        }
        surface.set_text_color(Rgb::BLACK)?;

        cursor.advance(ROW_HEIGHT);
        Ok(())
    }
}

impl SectionRenderer for TransactionTable<'_> {
    fn render<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
    ) -> ReportResult<()> {
        log::debug!(
            "Rendering {} transaction rows from page {}",
            self.transactions.len(),
            cursor.page_number()
        );
        draw_section_title(cursor, "Detalhamento de Transações")?;

        if self.transactions.is_empty() {
            return self.render_empty(cursor);
        }

        let columns = column_positions(cursor.margin(), cursor.content_width());
        self.render_header(cursor, &columns)?;
        for (index, txn) in self.transactions.iter().enumerate() {
            self.render_row(cursor, &columns, index, txn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use crate::models::Money;
    use crate::render::surface::{DrawCommand, Page, RecordingSurface};
    use chrono::NaiveDate;

    fn txn(i: usize, kind: TransactionType, description: &str) -> Transaction {
        Transaction::new(
            kind,
            Money::from_cents(1_000 + i as i64),
            "Moradia",
            description,
            NaiveDate::from_ymd_opt(2025, 3, 1 + (i % 28) as u32).unwrap(),
        )
        .with_id(format!("t{}", i))
    }

    fn render(transactions: &[Transaction]) -> Vec<Page> {
        let mut surface = RecordingSurface::a4();
        {
            let mut cursor = DocumentCursor::new(&mut surface, &LayoutSettings::default());
            let table = TransactionTable {
                transactions,
                number_format: &NumberFormat::default(),
                date_format: "%d/%m/%Y",
            };
            table.render(&mut cursor).unwrap();
        }
        surface.pages().to_vec()
    }

    fn count_text(pages: &[Page], needle: &str) -> usize {
        pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| *t == needle)
            .count()
    }

    #[test]
    fn test_column_positions_fill_content_width() {
        let columns = column_positions(20.0, 170.0);
        assert_eq!(columns, [22.0, 47.0, 107.0, 142.0, 167.0]);

        let wide = column_positions(10.0, 340.0);
        assert_eq!(wide, [12.0, 62.0, 182.0, 252.0, 302.0]);
    }

    #[test]
    fn test_empty_table() {
        let pages = render(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains_text(EMPTY_TABLE_TEXT));
        assert_eq!(count_text(&pages, "Data"), 0);
    }

    #[test]
    fn test_row_cells() {
        let txn = Transaction::new(
            TransactionType::Income,
            Money::from_cents(500_000),
            "Salário",
            "Salário de março",
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        );
        let pages = render(&[txn]);
        let texts: Vec<&str> = pages[0].texts().collect();
        assert!(texts.contains(&"05/03/2025"));
        assert!(texts.contains(&"Salário de março"));
        assert!(texts.contains(&"Receita"));
        assert!(texts.contains(&"R$ 5.000,00"));
    }

    #[test]
    fn test_long_description_truncated() {
        let long = "Supermercado do bairro com entrega em casa";
        let pages = render(&[txn(0, TransactionType::Expense, long)]);
        assert!(pages[0].contains_text("Supermercado do bairro co..."));
        assert!(!pages[0].contains_text(long));
    }

    #[test]
    fn test_bad_date_format_is_a_config_error() {
        let mut surface = RecordingSurface::a4();
        let mut cursor = DocumentCursor::new(&mut surface, &LayoutSettings::default());
        let transactions = [txn(0, TransactionType::Expense, "Aluguel")];
        let table = TransactionTable {
            transactions: &transactions,
            number_format: &NumberFormat::default(),
            date_format: "%Q",
        };
        let err = table.render(&mut cursor).unwrap_err();
        assert!(matches!(err, crate::error::ReportError::Config(_)));
    }

    #[test]
    fn test_amount_colored_by_type() {
        let pages = render(&[
            txn(0, TransactionType::Income, "in"),
            txn(1, TransactionType::Expense, "out"),
        ]);
        let mut color = Rgb::BLACK;
        let mut amount_colors = Vec::new();
        for command in &pages[0].commands {
            match command {
                DrawCommand::SetTextColor { color: c } => color = *c,
                DrawCommand::Text { text, .. } if text.starts_with("R$") => {
                    amount_colors.push(color)
                }
                _ => {}
            }
        }
        assert_eq!(amount_colors, vec![Rgb::GREEN, Rgb::RED]);
    }

    #[test]
    fn test_rows_paginate_without_header_redraw() {
        // 28 rows fit below the title and header on the first page, 30 on
        // each page after that
        let rows: Vec<Transaction> = (0..60)
            .map(|i| txn(i, TransactionType::Expense, "linha"))
            .collect();
        let pages = render(&rows);

        assert_eq!(pages.len(), 3);
        assert_eq!(count_text(&pages, "Data"), 1);
        assert_eq!(pages[0].texts().filter(|t| *t == "linha").count(), 28);
        assert_eq!(pages[1].texts().filter(|t| *t == "linha").count(), 30);
        assert_eq!(pages[2].texts().filter(|t| *t == "linha").count(), 2);
    }

    #[test]
    fn test_stripes_continue_across_pages() {
        let rows: Vec<Transaction> = (0..29)
            .map(|i| txn(i, TransactionType::Expense, "linha"))
            .collect();
        let pages = render(&rows);

        // Row 28 (even) is the first row on page 2 and keeps its stripe
        assert_eq!(pages.len(), 2);
        assert!(pages[1].commands.iter().any(|c| matches!(
            c,
            DrawCommand::Rect { y, style: RectStyle::Fill, .. } if *y == 20.0
        )));
    }
}
