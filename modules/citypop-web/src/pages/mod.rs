use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::{info, warn};

use citypop_pipeline::csv_export::csv_file_name;
use citypop_pipeline::pdf::pdf_file_name;
use citypop_pipeline::{FilterBounds, FilterCriteria, ReportMode};

use crate::components::{render_dashboard, DashboardData, SessionView};
use crate::{spawn_refresh, AppState};

const NO_DATA_NOTICE: &str = "No data loaded yet.";
pub const PDF_FAILED_NOTICE: &str = "Failed to generate PDF report. Please try again.";
const CSV_FAILED_NOTICE: &str = "Failed to export data. Please try again.";

#[derive(serde::Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    if let Some(page) = query.page {
        if let Some(session) = state.session.write().await.as_mut() {
            session.go_to_page(page);
        }
    }

    let notice = state.take_notice().await;
    let loading = state.is_loading();
    let view = state.session.read().await.as_ref().map(SessionView::from_session);

    Html(render_dashboard(DashboardData { loading, notice, view }))
}

// --- Filters ---

/// Raw filter form. Inputs arrive as text; blanks mean "not set".
#[derive(serde::Deserialize, Default)]
pub struct FilterForm {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub max_population: String,
    #[serde(default)]
    pub max_change: String,
    #[serde(default)]
    pub min_population: String,
    #[serde(default)]
    pub min_change: String,
}

impl FilterForm {
    /// Missing or unparseable upper bounds fall back to the slider maximum.
    pub fn to_criteria(&self, bounds: &FilterBounds) -> FilterCriteria {
        let province = self.province.trim();
        FilterCriteria {
            province: (!province.is_empty()).then(|| province.to_string()),
            max_population: parse_number(&self.max_population).unwrap_or(bounds.max_population),
            max_change: parse_number(&self.max_change).unwrap_or(bounds.max_change),
            min_population: parse_number(&self.min_population),
            min_change: parse_number(&self.min_change),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub async fn apply_filters(
    State(state): State<Arc<AppState>>,
    axum::Form(form): axum::Form<FilterForm>,
) -> Redirect {
    match state.session.write().await.as_mut() {
        Some(session) => {
            let criteria = form.to_criteria(session.bounds());
            session.apply_filter(criteria);
            info!(matched = session.filtered_data().len(), "Filters applied");
        }
        None => state.set_notice(NO_DATA_NOTICE).await,
    }
    Redirect::to("/")
}

pub async fn reset_filters(State(state): State<Arc<AppState>>) -> Redirect {
    if let Some(session) = state.session.write().await.as_mut() {
        session.reset_filters();
    }
    Redirect::to("/")
}

pub async fn reload(State(state): State<Arc<AppState>>) -> Redirect {
    spawn_refresh(state);
    Redirect::to("/")
}

// --- Exports ---

fn attachment(body: Vec<u8>, content_type: &'static str, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

pub async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    let result = match state.session.read().await.as_ref() {
        Some(session) => session.export_csv(),
        None => {
            state.set_notice(NO_DATA_NOTICE).await;
            return Redirect::to("/").into_response();
        }
    };

    match result {
        Ok(text) => attachment(text.into_bytes(), "text/csv; charset=utf-8", &csv_file_name(Utc::now())),
        Err(e) => {
            warn!(error = %e, "Error exporting CSV");
            state.set_notice(CSV_FAILED_NOTICE).await;
            Redirect::to("/").into_response()
        }
    }
}

#[derive(serde::Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub report: ReportMode,
}

pub async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let now = Utc::now();
    let result = match state.session.read().await.as_ref() {
        Some(session) => session.export_pdf(query.report, now),
        None => {
            state.set_notice(NO_DATA_NOTICE).await;
            return Redirect::to("/").into_response();
        }
    };

    match result {
        Ok(bytes) => {
            info!(report = %query.report, bytes = bytes.len(), "PDF report generated");
            attachment(bytes, "application/pdf", &pdf_file_name(query.report, now))
        }
        Err(e) => {
            warn!(error = %e, report = %query.report, "Error generating PDF");
            state.set_notice(PDF_FAILED_NOTICE).await;
            Redirect::to("/").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> FilterBounds {
        FilterBounds {
            provinces: vec!["P1".to_string(), "P2".to_string()],
            min_population: 0.0,
            max_population: 100_000.0,
            min_change: 0.0,
            max_change: 30.0,
        }
    }

    #[test]
    fn blank_form_is_unbounded() {
        let criteria = FilterForm::default().to_criteria(&bounds());
        assert_eq!(criteria, FilterCriteria::unbounded(&bounds()));
    }

    #[test]
    fn form_values_become_criteria() {
        let form = FilterForm {
            province: "P1".to_string(),
            max_population: "50000".to_string(),
            max_change: "12.5".to_string(),
            min_population: " 100 ".to_string(),
            min_change: String::new(),
        };
        let criteria = form.to_criteria(&bounds());
        assert_eq!(criteria.province.as_deref(), Some("P1"));
        assert_eq!(criteria.max_population, 50_000.0);
        assert_eq!(criteria.max_change, 12.5);
        assert_eq!(criteria.min_population, Some(100.0));
        assert_eq!(criteria.min_change, None);
    }

    #[test]
    fn garbage_numbers_fall_back_to_bounds() {
        let form = FilterForm {
            max_population: "lots".to_string(),
            max_change: "NaN".to_string(),
            min_change: "inf".to_string(),
            ..FilterForm::default()
        };
        let criteria = form.to_criteria(&bounds());
        assert_eq!(criteria.max_population, 100_000.0);
        assert_eq!(criteria.max_change, 30.0);
        assert_eq!(criteria.min_change, None);
    }
}
