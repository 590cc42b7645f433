//! Report layout and pagination
//!
//! A report is drawn onto a [`DrawingSurface`] by a fixed sequence of section
//! renderers, each moving a shared [`DocumentCursor`] down the page:
//!
//! - page 1: header, summary cards, insights
//! - page 2: transaction table (continues onto further pages as needed)
//! - page 3+: category breakdown
//!
//! [`ReportAssembler`] runs the sequence and saves the document.

pub mod assembler;
pub mod breakdown;
pub mod cursor;
pub mod footer;
pub mod header;
pub mod insights;
pub mod summary;
pub mod surface;
pub mod table;

pub use assembler::{report_file_name, GeneratedReport, ReportAssembler};
pub use cursor::{DocumentCursor, DocumentState};
pub use surface::{
    DrawCommand, DrawingSurface, Document, FontWeight, Page, RecordingSurface, RectStyle, Rgb,
    SurfaceError, SurfaceResult, TextAlign,
};

use crate::error::ReportResult;

/// Height taken by a section title and its underline
pub const SECTION_TITLE_HEIGHT: f64 = 15.0;

/// A block of the report that draws itself at the cursor
pub trait SectionRenderer {
    fn render<S: DrawingSurface + ?Sized>(
        &self,
        cursor: &mut DocumentCursor<'_, S>,
    ) -> ReportResult<()>;
}

/// Draw a blue, underlined section title
pub(crate) fn draw_section_title<S: DrawingSurface + ?Sized>(
    cursor: &mut DocumentCursor<'_, S>,
    title: &str,
) -> ReportResult<()> {
    cursor.reserve(SECTION_TITLE_HEIGHT)?;

    let x = cursor.margin();
    let y = cursor.y();
    let surface = cursor.surface();
    surface.set_font(FontWeight::Bold, 14.0)?;
    surface.set_text_color(Rgb::BLUE)?;
    surface.draw_text(x, y, title, TextAlign::Left)?;
    surface.set_draw_color(Rgb::BLUE)?;
    surface.draw_line(x, y + 8.0, x + 60.0, y + 8.0)?;
    surface.set_text_color(Rgb::BLACK)?;

    cursor.advance(SECTION_TITLE_HEIGHT);
    Ok(())
}
