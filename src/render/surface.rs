//! Drawing surface abstraction
//!
//! The report engine only issues primitive drawing calls through the
//! [`DrawingSurface`] trait. [`RecordingSurface`] is the in-crate
//! implementation: it records every call per page and produces an immutable
//! [`Document`] when saved.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ReportResult;
use crate::storage::file_io::write_json_atomic;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const BLUE: Rgb = Rgb(59, 130, 246);
    pub const GREEN: Rgb = Rgb(21, 128, 61);
    pub const RED: Rgb = Rgb(185, 28, 28);
    pub const LIGHT_GREEN: Rgb = Rgb(220, 252, 231);
    pub const LIGHT_RED: Rgb = Rgb(254, 226, 226);
    pub const BORDER_GREEN: Rgb = Rgb(34, 197, 94);
    pub const BORDER_RED: Rgb = Rgb(239, 68, 68);
    pub const HEADER_ROW: Rgb = Rgb(243, 244, 246);
    pub const STRIPE: Rgb = Rgb(249, 250, 251);
    pub const BAR_TRACK: Rgb = Rgb(229, 231, 235);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Horizontal anchor of a text run relative to its x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RectStyle {
    /// Filled with the current fill color
    Fill,
    /// Outlined with the current draw color
    Stroke,
}

/// Failure reported by a drawing surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("Failed to save document: {0}")]
    Save(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Primitive drawing operations the report engine relies on
///
/// Coordinates are in page units (millimetres for the default A4 layout)
/// with the origin at the top-left corner.
pub trait DrawingSurface {
    fn page_width(&self) -> f64;

    fn page_height(&self) -> f64;

    fn set_fill_color(&mut self, color: Rgb) -> SurfaceResult<()>;

    fn set_draw_color(&mut self, color: Rgb) -> SurfaceResult<()>;

    fn set_text_color(&mut self, color: Rgb) -> SurfaceResult<()>;

    fn set_font(&mut self, weight: FontWeight, size: f64) -> SurfaceResult<()>;

    fn draw_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign) -> SurfaceResult<()>;

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: RectStyle)
        -> SurfaceResult<()>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> SurfaceResult<()>;

    /// Start a new page; subsequent calls draw on it
    fn new_page(&mut self) -> SurfaceResult<()>;

    /// Finalize the document under the given name
    fn save(&mut self, file_name: &str) -> SurfaceResult<()>;
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetFillColor { color: Rgb },
    SetDrawColor { color: Rgb },
    SetTextColor { color: Rgb },
    SetFont { weight: FontWeight, size: f64 },
    Text { x: f64, y: f64, text: String, align: TextAlign },
    Rect { x: f64, y: f64, width: f64, height: f64, style: RectStyle },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// A page of recorded drawing calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: u32,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    /// Text runs drawn on this page, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Check if any text run on the page contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// A finished, immutable document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub file_name: String,
    pub page_width: f64,
    pub page_height: f64,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Persist the document as `<dir>/<file_name>.json`
    pub fn write_json(&self, dir: &Path) -> ReportResult<PathBuf> {
        let path = dir.join(format!("{}.json", self.file_name));
        write_json_atomic(&path, self)?;
        Ok(path)
    }
}

/// In-memory surface that records every drawing call
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    page_width: f64,
    page_height: f64,
    pages: Vec<Page>,
    document: Option<Document>,
}

impl RecordingSurface {
    /// Create a surface with one empty page of the given size
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            pages: vec![Page {
                number: 1,
                commands: Vec::new(),
            }],
            document: None,
        }
    }

    /// A4 portrait in millimetres
    pub fn a4() -> Self {
        Self::new(210.0, 297.0)
    }

    /// Pages recorded so far
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The saved document, if `save` has been called
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Take the saved document out of the surface
    pub fn into_document(self) -> Option<Document> {
        self.document
    }

    fn record(&mut self, command: DrawCommand) -> SurfaceResult<()> {
        if self.document.is_some() {
            return Err(SurfaceError::Draw("document already saved".into()));
        }
        match self.pages.last_mut() {
            Some(page) => {
                page.commands.push(command);
                Ok(())
            }
            None => Err(SurfaceError::Draw("no page to draw on".into())),
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn page_width(&self) -> f64 {
        self.page_width
    }

    fn page_height(&self) -> f64 {
        self.page_height
    }

    fn set_fill_color(&mut self, color: Rgb) -> SurfaceResult<()> {
        self.record(DrawCommand::SetFillColor { color })
    }

    fn set_draw_color(&mut self, color: Rgb) -> SurfaceResult<()> {
        self.record(DrawCommand::SetDrawColor { color })
    }

    fn set_text_color(&mut self, color: Rgb) -> SurfaceResult<()> {
        self.record(DrawCommand::SetTextColor { color })
    }

    fn set_font(&mut self, weight: FontWeight, size: f64) -> SurfaceResult<()> {
        self.record(DrawCommand::SetFont { weight, size })
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign) -> SurfaceResult<()> {
        self.record(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            align,
        })
    }

    fn draw_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: RectStyle,
    ) -> SurfaceResult<()> {
        self.record(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            style,
        })
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> SurfaceResult<()> {
        self.record(DrawCommand::Line { x1, y1, x2, y2 })
    }

    fn new_page(&mut self) -> SurfaceResult<()> {
        if self.document.is_some() {
            return Err(SurfaceError::Draw("document already saved".into()));
        }
        let number = self.pages.len() as u32 + 1;
        self.pages.push(Page {
            number,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn save(&mut self, file_name: &str) -> SurfaceResult<()> {
        if self.document.is_some() {
            return Err(SurfaceError::Save("document already saved".into()));
        }
        if file_name.trim().is_empty() {
            return Err(SurfaceError::Save("file name cannot be empty".into()));
        }
        self.document = Some(Document {
            file_name: file_name.to_string(),
            page_width: self.page_width,
            page_height: self.page_height,
            pages: self.pages.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_records_per_page() {
        let mut surface = RecordingSurface::a4();
        surface.draw_text(10.0, 10.0, "first", TextAlign::Left).unwrap();
        surface.new_page().unwrap();
        surface.draw_rect(0.0, 0.0, 5.0, 5.0, RectStyle::Fill).unwrap();

        let pages = surface.pages();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains_text("first"));
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].commands.len(), 1);
    }

    #[test]
    fn test_save_finalizes_document() {
        let mut surface = RecordingSurface::a4();
        surface.draw_text(1.0, 1.0, "x", TextAlign::Center).unwrap();
        surface.save("report").unwrap();

        assert!(surface.draw_text(1.0, 1.0, "late", TextAlign::Left).is_err());
        assert!(surface.new_page().is_err());
        assert!(matches!(surface.save("again"), Err(SurfaceError::Save(_))));

        let doc = surface.into_document().unwrap();
        assert_eq!(doc.file_name, "report");
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page_width, 210.0);
    }

    #[test]
    fn test_save_rejects_empty_name() {
        let mut surface = RecordingSurface::a4();
        assert!(surface.save(" ").is_err());
        assert!(surface.document().is_none());
    }

    #[test]
    fn test_write_json() {
        let temp_dir = TempDir::new().unwrap();
        let mut surface = RecordingSurface::a4();
        surface.set_font(FontWeight::Bold, 12.0).unwrap();
        surface.save("relatorio").unwrap();

        let doc = surface.into_document().unwrap();
        let path = doc.write_json(temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join("relatorio.json"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: Document = serde_json::from_str(&contents).unwrap();
        assert_eq!(loaded, doc);
        assert!(contents.contains("\"op\": \"set_font\""));
    }
}
