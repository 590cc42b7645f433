//! Page footer: page number and confidentiality notice
//!
//! Only drawn when `layout.page_footer` is enabled.

use super::cursor::DocumentState;
use super::surface::{DrawingSurface, FontWeight, Rgb, SurfaceResult, TextAlign};

/// Distance of the footer baseline from the bottom edge
const FOOTER_OFFSET: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct FooterRenderer {
    notice: String,
}

impl Default for FooterRenderer {
    fn default() -> Self {
        Self {
            notice: "Gerenciador Financeiro - Relatório Confidencial".to_string(),
        }
    }
}

impl FooterRenderer {
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        state: &DocumentState,
    ) -> SurfaceResult<()> {
        let y = state.page_height() - FOOTER_OFFSET;

        surface.set_font(FontWeight::Normal, 8.0)?;
        surface.set_text_color(Rgb::GRAY)?;
        surface.draw_text(
            state.page_width() / 2.0,
            y,
            &format!("Página {}", state.page_number()),
            TextAlign::Center,
        )?;
        surface.draw_text(state.margin(), y, &self.notice, TextAlign::Left)?;
        surface.set_text_color(Rgb::BLACK)
    }
}
