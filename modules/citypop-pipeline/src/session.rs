use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use citypop_common::{CityPopError, CityRecord, CoercionMode};

use crate::charts::ChartSet;
use crate::client::{DataClient, FetchError};
use crate::csv_export::export_csv;
use crate::filter::{FilterBounds, FilterCriteria};
use crate::load::{load_records, LoadReport};
use crate::paginate::{clamp_page, page_count, TableView};
use crate::pdf::{generated_on, layout_report, render_pdf};
use crate::report::{select_report, ReportMode, ReportRow};

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub total: usize,
    pub filtered: usize,
    pub provinces: usize,
}

/// State of one dashboard session.
///
/// `all_data` is fixed at load. Every filter change replaces `filtered_data`
/// and the chart set wholesale.
#[derive(Debug, Clone)]
pub struct Session {
    all_data: Vec<CityRecord>,
    filtered_data: Vec<CityRecord>,
    bounds: FilterBounds,
    criteria: FilterCriteria,
    current_page: usize,
    charts: ChartSet,
    load_report: LoadReport,
}

impl Session {
    /// Fetch the dataset once and build a session from it.
    pub async fn fetch(client: &DataClient, mode: CoercionMode) -> Result<Self, FetchError> {
        let raw = client.fetch_all().await?;
        Ok(Self::load(&raw, mode))
    }

    pub fn load(raw: &[Value], mode: CoercionMode) -> Self {
        let (records, report) = load_records(raw, mode);
        info!(
            loaded = report.loaded,
            malformed = report.malformed,
            rejected = report.rejected,
            "Session loaded"
        );
        let mut session = Self::from_records(records);
        session.load_report = report;
        session
    }

    pub fn from_records(records: Vec<CityRecord>) -> Self {
        let bounds = FilterBounds::from_records(&records);
        let criteria = FilterCriteria::unbounded(&bounds);
        let charts = ChartSet::build(&records);
        let load_report = LoadReport {
            loaded: records.len(),
            ..LoadReport::default()
        };

        Self {
            filtered_data: records.clone(),
            all_data: records,
            bounds,
            criteria,
            current_page: 1,
            charts,
            load_report,
        }
    }

    pub fn all_data(&self) -> &[CityRecord] {
        &self.all_data
    }

    pub fn filtered_data(&self) -> &[CityRecord] {
        &self.filtered_data
    }

    pub fn bounds(&self) -> &FilterBounds {
        &self.bounds
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered_data.len())
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn load_report(&self) -> LoadReport {
        self.load_report
    }

    // --- Transitions ---

    pub fn apply_filter(&mut self, criteria: FilterCriteria) {
        self.filtered_data = criteria.apply(&self.all_data);
        self.criteria = criteria;
        self.current_page = 1;
        self.charts = ChartSet::build(&self.filtered_data);
    }

    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::unbounded(&self.bounds);
        self.filtered_data = self.all_data.clone();
        self.current_page = 1;
        self.charts = ChartSet::build(&self.filtered_data);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = clamp_page(page, self.filtered_data.len());
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.page_count() {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    // --- Views ---

    pub fn table_view(&self) -> TableView {
        TableView::build(&self.filtered_data, self.current_page)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total: self.all_data.len(),
            filtered: self.filtered_data.len(),
            provinces: self.bounds.provinces.len(),
        }
    }

    pub fn report(&self, mode: ReportMode) -> Vec<ReportRow> {
        select_report(&self.filtered_data, mode)
    }

    pub fn export_csv(&self) -> Result<String, CityPopError> {
        export_csv(&self.filtered_data)
    }

    pub fn export_pdf(&self, mode: ReportMode, now: DateTime<Utc>) -> Result<Vec<u8>, CityPopError> {
        let layout = layout_report(mode, &self.report(mode), &generated_on(now));
        render_pdf(&layout)
    }
}
