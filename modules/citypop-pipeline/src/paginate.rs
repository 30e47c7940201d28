//! Fixed-size pages over the filtered rows, and the table render model.

use citypop_common::{format_number, format_plain, ChangeTone, CityRecord};

pub const PAGE_SIZE: usize = 10;

/// `ceil(len / PAGE_SIZE)`.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Clamp a requested 1-indexed page into `1..=page_count` (1 when empty).
pub fn clamp_page(page: usize, len: usize) -> usize {
    page.clamp(1, page_count(len).max(1))
}

/// Rows `[(page-1)*10, page*10)` clamped to the available length.
pub fn page_slice(records: &[CityRecord], page: usize) -> &[CityRecord] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(records.len());
    let end = start.saturating_add(PAGE_SIZE).min(records.len());
    &records[start..end]
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub rank: i64,
    pub city: String,
    pub province: String,
    pub population_2017: String,
    pub population_1998: String,
    pub change: String,
    pub tone: ChangeTone,
}

impl TableRow {
    fn from_record(record: &CityRecord) -> Self {
        Self {
            rank: record.rank,
            city: record.city.clone(),
            province: record.province.clone(),
            population_2017: format_number(record.population_2017),
            population_1998: format_number(record.population_1998),
            change: format!("{}%", format_plain(record.change)),
            tone: ChangeTone::of(record.change),
        }
    }
}

/// Pagination controls. Only produced when there is more than one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationView {
    pub current: usize,
    pub page_count: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationView {
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        1..=self.page_count
    }
}

/// Everything the presentation layer needs to draw the data table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    /// 1-indexed position of the first visible row (0 when empty).
    pub showing_from: usize,
    pub showing_to: usize,
    pub total: usize,
    pub pagination: Option<PaginationView>,
}

impl TableView {
    pub fn build(records: &[CityRecord], page: usize) -> Self {
        let page = clamp_page(page, records.len());
        let slice = page_slice(records, page);
        let pages = page_count(records.len());

        let showing_from = if slice.is_empty() { 0 } else { (page - 1) * PAGE_SIZE + 1 };
        let showing_to = if slice.is_empty() { 0 } else { showing_from + slice.len() - 1 };

        let pagination = (pages > 1).then(|| PaginationView {
            current: page,
            page_count: pages,
            prev_enabled: page > 1,
            next_enabled: page < pages,
        });

        Self {
            rows: slice.iter().map(TableRow::from_record).collect(),
            showing_from,
            showing_to,
            total: records.len(),
            pagination,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
