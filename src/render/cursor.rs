//! Document cursor
//!
//! Owns the vertical write position and page count of a document being
//! rendered. Section renderers only move through a page with [`reserve`],
//! [`advance`] and [`force_new_page`].
//!
//! [`reserve`]: DocumentCursor::reserve
//! [`advance`]: DocumentCursor::advance
//! [`force_new_page`]: DocumentCursor::force_new_page

use serde::Serialize;

use super::footer::FooterRenderer;
use super::surface::DrawingSurface;
use crate::config::settings::LayoutSettings;
use crate::error::ReportResult;

/// Page geometry and write position of a document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentState {
    page_number: u32,
    cursor_y: f64,
    page_width: f64,
    page_height: f64,
    margin: f64,
    footer_reserve: f64,
}

impl DocumentState {
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Lowest y a reserved block may extend to
    pub fn bottom_limit(&self) -> f64 {
        self.page_height - self.footer_reserve
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }
}

/// Drawing cursor over a surface
pub struct DocumentCursor<'s, S: DrawingSurface + ?Sized> {
    surface: &'s mut S,
    state: DocumentState,
    footer: Option<FooterRenderer>,
}

impl<'s, S: DrawingSurface + ?Sized> DocumentCursor<'s, S> {
    /// Start a document on the surface's current (first) page
    pub fn new(surface: &'s mut S, layout: &LayoutSettings) -> Self {
        let state = DocumentState {
            page_number: 1,
            cursor_y: layout.margin,
            page_width: surface.page_width(),
            page_height: surface.page_height(),
            margin: layout.margin,
            footer_reserve: layout.footer_reserve,
        };
        let footer = layout.page_footer.then(FooterRenderer::default);

        Self {
            surface,
            state,
            footer,
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn page_number(&self) -> u32 {
        self.state.page_number
    }

    pub fn y(&self) -> f64 {
        self.state.cursor_y
    }

    pub fn margin(&self) -> f64 {
        self.state.margin
    }

    pub fn page_width(&self) -> f64 {
        self.state.page_width
    }

    pub fn content_width(&self) -> f64 {
        self.state.content_width()
    }

    /// The surface to draw on
    pub fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// Make sure a block of `height` fits on the current page
    ///
    /// Starts a new page when it does not and returns `true` in that case.
    /// The cursor does not move otherwise; call [`advance`](Self::advance)
    /// once the block is drawn.
    pub fn reserve(&mut self, height: f64) -> ReportResult<bool> {
        if self.state.cursor_y + height <= self.state.bottom_limit() {
            return Ok(false);
        }

        // A block taller than a whole page cannot be helped by another break
        if self.state.cursor_y <= self.state.margin {
            log::warn!(
                "Block of height {:.1} does not fit on an empty page {}",
                height,
                self.state.page_number
            );
            return Ok(false);
        }

        self.break_page()?;
        Ok(true)
    }

    /// Move the cursor down by `height`
    pub fn advance(&mut self, height: f64) {
        self.state.cursor_y += height;
    }

    /// Start a new page regardless of the space left
    pub fn force_new_page(&mut self) -> ReportResult<()> {
        self.break_page()
    }

    /// Close the last page; draws its footer when footers are enabled
    pub fn finish(&mut self) -> ReportResult<()> {
        self.draw_footer()
    }

    fn break_page(&mut self) -> ReportResult<()> {
        self.draw_footer()?;
        self.surface.new_page()?;
        self.state.page_number += 1;
        self.state.cursor_y = self.state.margin;
        log::debug!("Started page {}", self.state.page_number);
        Ok(())
    }

    fn draw_footer(&mut self) -> ReportResult<()> {
        if let Some(footer) = &self.footer {
            footer.render(&mut *self.surface, &self.state)?;
        }
        Ok(())
    }
}
