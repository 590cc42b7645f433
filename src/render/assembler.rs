//! Report assembly
//!
//! Runs the section renderers in their fixed order and saves the document.
//! Input is validated before the first drawing call, so a rejected request
//! leaves the surface untouched.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::breakdown::CategoryBreakdownRenderer;
use super::cursor::DocumentCursor;
use super::header::HeaderRenderer;
use super::insights::InsightsRenderer;
use super::summary::SummaryCards;
use super::surface::DrawingSurface;
use super::table::TransactionTable;
use super::SectionRenderer;
use crate::config::{LayoutSettings, Settings};
use crate::display::format::slugify;
use crate::error::ReportResult;
use crate::reports::ReportRequest;

/// Prefix of every generated file name
pub const FILE_NAME_PREFIX: &str = "relatorio-financeiro";

/// Outcome of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedReport {
    /// Document name, without extension
    pub file_name: String,
    pub page_count: u32,
    pub generated_at: NaiveDateTime,
}

/// File name for a report: prefix, slug of the period label, ISO date
pub fn report_file_name(period_label: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}-{}",
        FILE_NAME_PREFIX,
        slugify(period_label),
        date.format("%Y-%m-%d")
    )
}

/// Lays out and saves reports with the given settings
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    settings: Settings,
    clock: Option<NaiveDateTime>,
}

impl ReportAssembler {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            clock: None,
        }
    }

    /// Use a fixed generation time instead of the local clock
    pub fn with_clock(mut self, generated_at: NaiveDateTime) -> Self {
        self.clock = Some(generated_at);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Render `request` onto `surface` and save it
    ///
    /// Sections always land on the same pages: header, summary and insights
    /// on page 1, the transaction table from page 2, and the category
    /// breakdown on a page of its own after the table.
    pub fn generate<S: DrawingSurface + ?Sized>(
        &self,
        request: &ReportRequest,
        surface: &mut S,
    ) -> ReportResult<GeneratedReport> {
        // The cursor lays out on the surface's page size, so check that one
        let layout = LayoutSettings {
            page_width: surface.page_width(),
            page_height: surface.page_height(),
            ..self.settings.layout.clone()
        };
        if let Err(err) = self
            .settings
            .validate()
            .and_then(|_| layout.validate())
            .and_then(|_| request.validate())
        {
            log::warn!(
                "Rejected report request for {}: {}",
                request.period_label,
                err
            );
            return Err(err);
        }

        let generated_at = self.clock.unwrap_or_else(|| Local::now().naive_local());
        let file_name = report_file_name(&request.period_label, generated_at.date());
        let number_format = &self.settings.number_format;
        let expenses = request.expense_breakdown()?;
        let income = request.income_breakdown()?;

        let page_count = {
            let mut cursor = DocumentCursor::new(&mut *surface, &layout);

            HeaderRenderer {
                period_label: &request.period_label,
                generated_at,
            }
            .render(&mut cursor)?;
            SummaryCards {
                current: &request.current_stats,
                previous: &request.previous_stats,
                number_format,
            }
            .render(&mut cursor)?;
            InsightsRenderer {
                current: &request.current_stats,
                previous: &request.previous_stats,
                number_format,
            }
            .render(&mut cursor)?;

            cursor.force_new_page()?;
            TransactionTable {
                transactions: &request.transactions,
                number_format,
                date_format: &self.settings.date_format,
            }
            .render(&mut cursor)?;

            cursor.force_new_page()?;
            CategoryBreakdownRenderer {
                expenses: &expenses,
                income: &income,
                number_format,
            }
            .render(&mut cursor)?;

            cursor.finish()?;
            cursor.page_number()
        };

        surface.save(&file_name)?;
        log::info!(
            "Generated report {} ({} pages, {} transactions)",
            file_name,
            page_count,
            request.transactions.len()
        );

        Ok(GeneratedReport {
            file_name,
            page_count,
            generated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::models::{Money, NumberFormat, PeriodType, ReportPeriod, Transaction, TransactionType};
    use crate::render::breakdown::NO_DATA_TEXT;
    use crate::render::surface::{
        FontWeight, RecordingSurface, RectStyle, Rgb, SurfaceError, SurfaceResult, TextAlign,
    };
    use crate::render::table::EMPTY_TABLE_TEXT;
    use crate::reports::PeriodStats;

    fn clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn assembler() -> ReportAssembler {
        ReportAssembler::new(Settings::default()).with_clock(clock())
    }

    fn march() -> ReportPeriod {
        ReportPeriod::new(PeriodType::Month, 3, 2025).unwrap()
    }

    fn txn(kind: TransactionType, cents: i64, category: &str, description: &str) -> Transaction {
        Transaction::new(
            kind,
            Money::from_cents(cents),
            category,
            description,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(TransactionType::Income, 500_000, "Salário", "Salário"),
            txn(TransactionType::Expense, 120_000, "Moradia", "Aluguel"),
            txn(TransactionType::Expense, 30_000, "Alimentação", "Mercado"),
        ]
    }

    /// Wraps a recording surface and fails at a chosen point
    struct FailingSurface {
        inner: RecordingSurface,
        fail_on_new_page: bool,
        calls: usize,
    }

    impl FailingSurface {
        fn new(fail_on_new_page: bool) -> Self {
            Self {
                inner: RecordingSurface::a4(),
                fail_on_new_page,
                calls: 0,
            }
        }
    }

    impl DrawingSurface for FailingSurface {
        fn page_width(&self) -> f64 {
            self.inner.page_width()
        }

        fn page_height(&self) -> f64 {
            self.inner.page_height()
        }

        fn set_fill_color(&mut self, color: Rgb) -> SurfaceResult<()> {
            self.calls += 1;
            self.inner.set_fill_color(color)
        }

        fn set_draw_color(&mut self, color: Rgb) -> SurfaceResult<()> {
            self.calls += 1;
            self.inner.set_draw_color(color)
        }

        fn set_text_color(&mut self, color: Rgb) -> SurfaceResult<()> {
            self.calls += 1;
            self.inner.set_text_color(color)
        }

        fn set_font(&mut self, weight: FontWeight, size: f64) -> SurfaceResult<()> {
            self.calls += 1;
            self.inner.set_font(weight, size)
        }

        fn draw_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign) -> SurfaceResult<()> {
            self.calls += 1;
            self.inner.draw_text(x, y, text, align)
        }

        fn draw_rect(
            &mut self,
            x: f64,
            y: f64,
            width: f64,
            height: f64,
            style: RectStyle,
        ) -> SurfaceResult<()> {
            self.calls += 1;
            self.inner.draw_rect(x, y, width, height, style)
        }

        fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> SurfaceResult<()> {
            self.calls += 1;
            self.inner.draw_line(x1, y1, x2, y2)
        }

        fn new_page(&mut self) -> SurfaceResult<()> {
            self.calls += 1;
            if self.fail_on_new_page {
                return Err(SurfaceError::Draw("out of memory".into()));
            }
            self.inner.new_page()
        }

        fn save(&mut self, _file_name: &str) -> SurfaceResult<()> {
            self.calls += 1;
            Err(SurfaceError::Save("disk full".into()))
        }
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        assert_eq!(
            report_file_name("Março 2025", date),
            "relatorio-financeiro-março-2025-2025-04-02"
        );
        assert_eq!(
            report_file_name("1º Trimestre 2025", date),
            "relatorio-financeiro-1º-trimestre-2025-2025-04-02"
        );
    }

    #[test]
    fn test_empty_request_produces_three_pages() {
        let request = ReportRequest::for_period(&march(), &[]).unwrap();
        assert_eq!(request.current_stats, PeriodStats::default());

        let mut surface = RecordingSurface::a4();
        let report = assembler().generate(&request, &mut surface).unwrap();
        assert_eq!(report.page_count, 3);
        assert_eq!(report.file_name, "relatorio-financeiro-março-2025-2025-04-02");

        let doc = surface.into_document().unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.file_name, report.file_name);
        assert!(doc.pages[1].contains_text(EMPTY_TABLE_TEXT));
        assert_eq!(doc.pages[2].texts().filter(|t| *t == NO_DATA_TEXT).count(), 2);
    }

    #[test]
    fn test_sections_land_on_their_pages() {
        let request = ReportRequest::for_period(&march(), &sample()).unwrap();
        let mut surface = RecordingSurface::a4();
        assembler().generate(&request, &mut surface).unwrap();

        let doc = surface.into_document().unwrap();
        assert_eq!(doc.page_count(), 3);
        let first = &doc.pages[0];
        assert!(first.contains_text("Relatório Financeiro"));
        assert!(first.contains_text("Março 2025"));
        assert!(first.contains_text("Gerado em: 02/04/2025 às 14:30:00"));
        assert!(first.contains_text("Resumo Executivo"));
        assert!(first.contains_text("Saldo positivo de R$ 3.500,00"));
        assert!(doc.pages[1].contains_text("Detalhamento de Transações"));
        assert!(doc.pages[1].contains_text("Aluguel"));
        assert!(doc.pages[2].contains_text("Análise por Categoria"));
        assert!(doc.pages[2].contains_text("R$ 1.200,00 (80.0%)"));
    }

    #[test]
    fn test_header_only_on_first_page() {
        let request = ReportRequest::for_period(&march(), &sample()).unwrap();
        let mut surface = RecordingSurface::a4();
        assembler().generate(&request, &mut surface).unwrap();

        let doc = surface.into_document().unwrap();
        let with_title = doc
            .pages
            .iter()
            .filter(|p| p.contains_text("Relatório Financeiro"))
            .count();
        assert_eq!(with_title, 1);
    }

    #[test]
    fn test_identical_requests_draw_identically() {
        let transactions = sample();
        let request = ReportRequest::for_period(&march(), &transactions).unwrap();

        let mut first = RecordingSurface::a4();
        let mut second = RecordingSurface::a4();
        assembler().generate(&request, &mut first).unwrap();
        assembler().generate(&request, &mut second).unwrap();

        assert_eq!(first.into_document(), second.into_document());
    }

    #[test]
    fn test_long_table_spans_pages() {
        // 28 rows on the first table page, then 30 per page
        let transactions: Vec<Transaction> = (0..63)
            .map(|i| txn(TransactionType::Expense, 1_000 + i, "Diversos", "item"))
            .collect();
        let request = ReportRequest::for_period(&march(), &transactions).unwrap();
        let mut surface = RecordingSurface::a4();
        let report = assembler().generate(&request, &mut surface).unwrap();

        assert_eq!(report.page_count, 5);
        let doc = surface.into_document().unwrap();
        let rows: Vec<usize> = doc
            .pages
            .iter()
            .map(|p| p.texts().filter(|t| *t == "item").count())
            .collect();
        assert_eq!(rows, vec![0, 28, 30, 5, 0]);
        assert!(doc.pages[4].contains_text("Análise por Categoria"));
    }

    #[test]
    fn test_footer_when_enabled() {
        let mut settings = Settings::default();
        settings.layout.page_footer = true;
        let request = ReportRequest::for_period(&march(), &sample()).unwrap();
        let mut surface = RecordingSurface::a4();
        ReportAssembler::new(settings)
            .with_clock(clock())
            .generate(&request, &mut surface)
            .unwrap();

        let doc = surface.into_document().unwrap();
        for (i, page) in doc.pages.iter().enumerate() {
            assert!(page.contains_text(&format!("Página {}", i + 1)));
            assert!(page.contains_text("Relatório Confidencial"));
        }
    }

    #[test]
    fn test_invalid_request_draws_nothing() {
        let mut request = ReportRequest::for_period(&march(), &sample()).unwrap();
        request.transactions[1].category = String::new();

        let mut surface = FailingSurface::new(false);
        let err = assembler().generate(&request, &mut surface).unwrap_err();
        assert!(err.is_input_data());
        assert_eq!(surface.calls, 0);
    }

    #[test]
    fn test_invalid_date_format_draws_nothing() {
        let mut settings = Settings::default();
        settings.date_format = "%Q".into();
        let request = ReportRequest::for_period(&march(), &sample()).unwrap();

        let mut surface = FailingSurface::new(false);
        let err = ReportAssembler::new(settings)
            .with_clock(clock())
            .generate(&request, &mut surface)
            .unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
        assert_eq!(surface.calls, 0);
    }

    #[test]
    fn test_short_surface_rejected() {
        let request = ReportRequest::for_period(&march(), &sample()).unwrap();
        // 90 - 20 - 30 leaves 40, less than the summary cards need
        let mut surface = RecordingSurface::new(210.0, 90.0);
        let err = assembler().generate(&request, &mut surface).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
        assert!(surface.pages()[0].commands.is_empty());
    }

    fn in_bounds<S: DrawingSurface + ?Sized>(cursor: &DocumentCursor<'_, S>) -> bool {
        let state = cursor.state();
        state.cursor_y() >= state.margin() && state.cursor_y() <= state.bottom_limit()
    }

    #[test]
    fn test_cursor_stays_on_smallest_page() {
        let mut settings = Settings::default();
        settings.layout.page_height = 20.0 + crate::config::settings::MIN_CONTENT_HEIGHT + 30.0;
        assert!(settings.layout.validate().is_ok());

        let transactions: Vec<Transaction> = (0..12)
            .map(|i| txn(TransactionType::Expense, 1_000 + i, &format!("Cat {}", i % 4), "item"))
            .chain(sample())
            .collect();
        let request = ReportRequest::for_period(&march(), &transactions).unwrap();
        let expenses = request.expense_breakdown().unwrap();
        let income = request.income_breakdown().unwrap();
        let number_format = NumberFormat::default();

        let mut surface = RecordingSurface::new(210.0, settings.layout.page_height);
        let mut cursor = DocumentCursor::new(&mut surface, &settings.layout);

        HeaderRenderer {
            period_label: &request.period_label,
            generated_at: clock(),
        }
        .render(&mut cursor)
        .unwrap();
        assert!(in_bounds(&cursor));

        SummaryCards {
            current: &request.current_stats,
            previous: &request.previous_stats,
            number_format: &number_format,
        }
        .render(&mut cursor)
        .unwrap();
        assert!(in_bounds(&cursor));

        InsightsRenderer {
            current: &request.current_stats,
            previous: &request.previous_stats,
            number_format: &number_format,
        }
        .render(&mut cursor)
        .unwrap();
        assert!(in_bounds(&cursor));

        cursor.force_new_page().unwrap();
        TransactionTable {
            transactions: &request.transactions,
            number_format: &number_format,
            date_format: &settings.date_format,
        }
        .render(&mut cursor)
        .unwrap();
        assert!(in_bounds(&cursor));

        cursor.force_new_page().unwrap();
        CategoryBreakdownRenderer {
            expenses: &expenses,
            income: &income,
            number_format: &number_format,
        }
        .render(&mut cursor)
        .unwrap();
        assert!(in_bounds(&cursor));
        assert!(cursor.page_number() > 5);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let transactions = vec![
            txn(TransactionType::Expense, 100, "A", "x").with_id("same"),
            txn(TransactionType::Expense, 200, "B", "y").with_id("same"),
        ];
        let request = ReportRequest::for_period(&march(), &transactions).unwrap();
        let mut surface = RecordingSurface::a4();
        let err = assembler().generate(&request, &mut surface).unwrap_err();
        assert!(err.is_input_data());
        assert_eq!(surface.pages().len(), 1);
        assert!(surface.pages()[0].commands.is_empty());
    }

    #[test]
    fn test_surface_failure_propagates() {
        let request = ReportRequest::for_period(&march(), &sample()).unwrap();
        let mut surface = FailingSurface::new(true);
        let err = assembler().generate(&request, &mut surface).unwrap_err();
        assert!(err.is_render_surface());
        assert!(surface.inner.document().is_none());
        assert_eq!(surface.inner.pages().len(), 1);
    }

    #[test]
    fn test_save_failure_propagates() {
        let request = ReportRequest::for_period(&march(), &sample()).unwrap();
        let mut surface = FailingSurface::new(false);
        let err = assembler().generate(&request, &mut surface).unwrap_err();
        assert!(err.is_render_surface());
        assert!(err.to_string().contains("disk full"));
        assert!(surface.inner.document().is_none());
    }
}
