//! PDF report export.
//!
//! Layout is computed first as plain data (`ReportLayout`) so page breaking
//! can be tested without parsing PDF output; `render_pdf` then draws it with
//! the builtin Helvetica faces. Coordinates are PDF points with the origin at
//! the bottom-left corner.

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use tracing::debug;

use citypop_common::{format_number, format_percent_fixed, CityPopError};

use crate::report::{ReportMode, ReportRow};

pub const DOCUMENT_TITLE: &str = "Pakistan City Population Report";

pub const PAGE_WIDTH: f32 = 600.0;
pub const PAGE_HEIGHT: f32 = 800.0;

const MARGIN_X: f32 = 50.0;
const BOTTOM_LIMIT: f32 = 50.0;
const ROW_STEP: f32 = 20.0;

const FIRST_HEADER_Y: f32 = 640.0;
const NEXT_TITLE_Y: f32 = 770.0;
const NEXT_HEADER_Y: f32 = 740.0;
const NEXT_FIRST_ROW_Y: f32 = 720.0;

const COLUMN_HEADERS: [&str; 6] = ["Rank", "City", "Province", "Pop. 2017", "Pop. 1998", "Change %"];
const COLUMN_X: [f32; 6] = [50.0, 100.0, 250.0, 350.0, 450.0, 550.0];
const COLUMN_WIDTH: [f32; 6] = [50.0, 150.0, 100.0, 100.0, 100.0, 80.0];

/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
}

impl TextItem {
    fn new(text: impl Into<String>, x: f32, y: f32, size: f32, bold: bool) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            bold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub items: Vec<TextItem>,
    /// Number of report rows placed on this page.
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<PageLayout>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Place every text item of a report.
pub fn layout_report(mode: ReportMode, rows: &[ReportRow], generated_on: &str) -> ReportLayout {
    let mut first = PageLayout::default();
    first.items.push(TextItem::new(DOCUMENT_TITLE, MARGIN_X, 750.0, 20.0, true));
    first
        .items
        .push(TextItem::new(format!("Report Type: {}", mode.label()), MARGIN_X, 720.0, 14.0, false));
    first
        .items
        .push(TextItem::new(format!("Generated on: {generated_on}"), MARGIN_X, 700.0, 12.0, false));
    first.items.push(TextItem::new(mode.title(), MARGIN_X, 670.0, 16.0, true));
    push_headers(&mut first, FIRST_HEADER_Y);

    let mut pages = Vec::new();
    let mut page = first;
    let mut y = FIRST_HEADER_Y - ROW_STEP;

    for row in rows {
        if y < BOTTOM_LIMIT {
            pages.push(std::mem::take(&mut page));
            page.items.push(TextItem::new(mode.title(), MARGIN_X, NEXT_TITLE_Y, 16.0, true));
            push_headers(&mut page, NEXT_HEADER_Y);
            y = NEXT_FIRST_ROW_Y;
        }

        for (i, cell) in row_cells(row).into_iter().enumerate() {
            let text = fit_to_width(&cell, COLUMN_WIDTH[i], 10.0);
            page.items.push(TextItem::new(text, COLUMN_X[i], y, 10.0, false));
        }
        page.rows += 1;
        y -= ROW_STEP;
    }
    pages.push(page);

    ReportLayout { pages }
}

fn push_headers(page: &mut PageLayout, y: f32) {
    for (header, x) in COLUMN_HEADERS.iter().zip(COLUMN_X) {
        page.items.push(TextItem::new(*header, x, y, 12.0, true));
    }
}

fn row_cells(row: &ReportRow) -> [String; 6] {
    [
        row.rank.to_string(),
        row.city.clone(),
        row.province.clone(),
        format_number(row.population_2017),
        format_number(row.population_1998),
        format_percent_fixed(row.change),
    ]
}

/// Truncate text that would overflow its column.
fn fit_to_width(text: &str, max_width: f32, size: f32) -> String {
    let max_chars = (max_width / (size * AVG_GLYPH_WIDTH)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Characters the builtin Helvetica faces can encode (WinAnsiEncoding).
fn winansi_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
        || matches!(
            c,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž'
                | '‘' | '’' | '“' | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ'
                | 'ž' | 'Ÿ'
        )
}

/// First text item the builtin fonts would silently drop characters from.
fn unencodable_text(layout: &ReportLayout) -> Option<&str> {
    layout
        .pages
        .iter()
        .flat_map(|page| &page.items)
        .map(|item| item.text.as_str())
        .find(|text| !text.chars().all(winansi_encodable))
}

/// Draw a computed layout. Either the whole document is produced or an error.
pub fn render_pdf(layout: &ReportLayout) -> Result<Vec<u8>, CityPopError> {
    if let Some(text) = unencodable_text(layout) {
        return Err(generation(format!("text cannot be encoded with the builtin fonts: '{text}'")));
    }

    let (doc, first_page, first_layer) =
        PdfDocument::new(DOCUMENT_TITLE, pt(PAGE_WIDTH), pt(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(generation)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(generation)?;

    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(pt(PAGE_WIDTH), pt(PAGE_HEIGHT), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for item in &page.items {
            let font: &IndirectFontRef = if item.bold { &bold } else { &regular };
            layer.use_text(item.text.clone(), item.size, pt(item.x), pt(item.y), font);
        }
    }

    let bytes = doc.save_to_bytes().map_err(generation)?;
    debug!(pages = layout.page_count(), bytes = bytes.len(), "Rendered PDF report");
    Ok(bytes)
}

pub fn pdf_file_name(mode: ReportMode, now: DateTime<Utc>) -> String {
    format!("Pakistan_Population_Report_{}_{}.pdf", mode.as_str(), now.timestamp_millis())
}

pub fn generated_on(now: DateTime<Utc>) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

fn pt(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn generation(e: impl std::fmt::Display) -> CityPopError {
    CityPopError::Generation(format!("PDF generation failed: {e}"))
}
