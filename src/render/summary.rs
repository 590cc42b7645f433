//! Summary cards: income, expenses and balance side by side

use super::cursor::DocumentCursor;
use super::surface::{DrawingSurface, FontWeight, RectStyle, Rgb, TextAlign};
use super::{draw_section_title, SectionRenderer};
use crate::display::format::format_signed_percentage;
use crate::error::ReportResult;
use crate::models::{Money, NumberFormat};
use crate::reports::{percentage_change, PeriodStats, PreviousPeriodStats};

pub const CARD_HEIGHT: f64 = 35.0;

/// Horizontal gap between two cards
pub const CARD_GAP: f64 = 10.0;

/// Vertical space taken by the row of cards, spacing included
pub const CARDS_BLOCK_HEIGHT: f64 = CARD_HEIGHT + 15.0;

/// Which way a change is good news for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    fn is_favorable(self, change: f64) -> bool {
        match self {
            Direction::HigherIsBetter => change >= 0.0,
            Direction::LowerIsBetter => change <= 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    fill: Rgb,
    border: Rgb,
    title: Rgb,
}

const POSITIVE: Palette = Palette {
    fill: Rgb::LIGHT_GREEN,
    border: Rgb::BORDER_GREEN,
    title: Rgb::GREEN,
};

const NEGATIVE: Palette = Palette {
    fill: Rgb::LIGHT_RED,
    border: Rgb::BORDER_RED,
    title: Rgb::RED,
};

struct Card {
    title: &'static str,
    amount: Money,
    change: f64,
    direction: Direction,
    palette: Palette,
    note: Option<String>,
}

/// Period-over-period summary of the three headline figures
pub struct SummaryCards<'a> {
    pub current: &'a PeriodStats,
    pub previous: &'a PreviousPeriodStats,
    pub number_format: &'a NumberFormat,
}

impl SummaryCards<'_> {
    fn cards(&self) -> [Card; 3] {
        let balance = self.current.balance();
        [
            Card {
                title: "RECEITAS",
                amount: self.current.income(),
                change: percentage_change(self.current.income(), self.previous.income()),
                direction: Direction::HigherIsBetter,
                palette: POSITIVE,
                note: None,
            },
            Card {
                title: "DESPESAS",
                amount: self.current.expenses(),
                change: percentage_change(self.current.expenses(), self.previous.expenses()),
                direction: Direction::LowerIsBetter,
                palette: NEGATIVE,
                note: None,
            },
            Card {
                title: "SALDO",
                amount: balance,
                change: percentage_change(balance, self.previous.balance()),
                direction: Direction::HigherIsBetter,
                palette: if balance.is_negative() { NEGATIVE } else { POSITIVE },
                note: Some(format!("{} transações", self.current.transaction_count())),
            },
        ]
    }

    fn draw_card<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        card: &Card,
        x: f64,
        y: f64,
        width: f64,
    ) -> ReportResult<()> {
        surface.set_fill_color(card.palette.fill)?;
        surface.draw_rect(x, y, width, CARD_HEIGHT, RectStyle::Fill)?;
        surface.set_draw_color(card.palette.border)?;
        surface.draw_rect(x, y, width, CARD_HEIGHT, RectStyle::Stroke)?;

        surface.set_font(FontWeight::Bold, 10.0)?;
        surface.set_text_color(card.palette.title)?;
        surface.draw_text(x + 5.0, y + 8.0, card.title, TextAlign::Left)?;

        surface.set_font(FontWeight::Bold, 16.0)?;
        surface.set_text_color(Rgb::BLACK)?;
        surface.draw_text(
            x + 5.0,
            y + 18.0,
            &card.amount.format_with(self.number_format),
            TextAlign::Left,
        )?;

        let change_color = if card.direction.is_favorable(card.change) {
            Rgb::GREEN
        } else {
            Rgb::RED
        };
        surface.set_font(FontWeight::Normal, 8.0)?;
        surface.set_text_color(change_color)?;
        surface.draw_text(
            x + 5.0,
            y + 28.0,
            &format!("{} vs anterior", format_signed_percentage(card.change)),
            TextAlign::Left,
        )?;

        if let Some(note) = &card.note {
            surface.set_text_color(Rgb::GRAY)?;
            surface.draw_text(x + 5.0, y + 32.0, note, TextAlign::Left)?;
        }
        surface.set_text_color(Rgb::BLACK)?;
        Ok(())
    }
}

impl SectionRenderer for SummaryCards<'_> {
    fn render<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
    ) -> ReportResult<()> {
        log::debug!("Rendering summary cards on page {}", cursor.page_number());
        draw_section_title(cursor, "Resumo Executivo")?;
        cursor.reserve(CARDS_BLOCK_HEIGHT)?;

        let width = (cursor.content_width() - 2.0 * CARD_GAP) / 3.0;
        let margin = cursor.margin();
        let y = cursor.y();
        for (i, card) in self.cards().iter().enumerate() {
            let x = margin + i as f64 * (width + CARD_GAP);
            self.draw_card(cursor.surface(), card, x, y, width)?;
        }

        cursor.advance(CARDS_BLOCK_HEIGHT);
        Ok(())
    }
}
