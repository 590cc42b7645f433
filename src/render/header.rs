//! Report header ribbon
//!
//! Drawn once, at the top of the first page. Later pages never get a header.

use chrono::NaiveDateTime;

use super::cursor::DocumentCursor;
use super::surface::{DrawingSurface, FontWeight, RectStyle, Rgb, TextAlign};
use super::SectionRenderer;
use crate::error::ReportResult;

/// Height of the colored band
pub const RIBBON_HEIGHT: f64 = 30.0;

/// Where content starts below the ribbon
pub const CONTENT_TOP: f64 = 40.0;

/// Room left for the timestamp at the right edge
const TIMESTAMP_WIDTH: f64 = 50.0;

pub const REPORT_TITLE: &str = "Relatório Financeiro";

pub struct HeaderRenderer<'a> {
    pub period_label: &'a str,
    pub generated_at: NaiveDateTime,
}

impl HeaderRenderer<'_> {
    fn timestamp(&self) -> String {
        format!(
            "Gerado em: {} às {}",
            self.generated_at.format("%d/%m/%Y"),
            self.generated_at.format("%H:%M:%S")
        )
    }
}

impl SectionRenderer for HeaderRenderer<'_> {
    fn render<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
    ) -> ReportResult<()> {
        if cursor.page_number() != 1 {
            log::debug!("Header skipped on page {}", cursor.page_number());
            return Ok(());
        }

        let margin = cursor.margin();
        let page_width = cursor.page_width();
        let timestamp = self.timestamp();

        let surface = cursor.surface();
        surface.set_fill_color(Rgb::BLUE)?;
        surface.draw_rect(0.0, 0.0, page_width, RIBBON_HEIGHT, RectStyle::Fill)?;

        surface.set_text_color(Rgb::WHITE)?;
        surface.set_font(FontWeight::Bold, 20.0)?;
        surface.draw_text(margin, 15.0, REPORT_TITLE, TextAlign::Left)?;

        surface.set_font(FontWeight::Normal, 12.0)?;
        surface.draw_text(margin, 22.0, self.period_label, TextAlign::Left)?;
        surface.draw_text(
            page_width - margin - TIMESTAMP_WIDTH,
            22.0,
            &timestamp,
            TextAlign::Left,
        )?;
        surface.set_text_color(Rgb::BLACK)?;

        let below = CONTENT_TOP - cursor.y();
        if below > 0.0 {
            cursor.advance(below);
        }
        Ok(())
    }
}
