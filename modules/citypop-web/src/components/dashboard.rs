use dioxus::prelude::*;

use citypop_common::{format_number, format_plain, ChangeTone};
use citypop_pipeline::{
    FilterBounds, FilterCriteria, PaginationView, ReportMode, Session, SessionSummary, TableView,
};

use super::charts::{ChartScripts, GROWTH_CHART_ID, POPULATION_CHART_ID, PROVINCE_CHART_ID};
use super::layout::Layout;
use crate::templates::render_document;

#[derive(Clone, PartialEq)]
pub struct DashboardData {
    pub loading: bool,
    pub notice: Option<String>,
    pub view: Option<SessionView>,
}

/// Render model for a loaded session.
#[derive(Clone, PartialEq)]
pub struct SessionView {
    pub summary: SessionSummary,
    pub table: TableView,
    pub bounds: FilterBounds,
    pub criteria: FilterCriteria,
    pub charts: ChartScripts,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            summary: session.summary(),
            table: session.table_view(),
            bounds: session.bounds().clone(),
            criteria: session.criteria().clone(),
            charts: ChartScripts::build(session.charts()),
        }
    }
}

fn stat_card(value: String, label: &str, color: &str) -> Element {
    let text_class = format!("text-3xl font-bold text-{color}-700");
    rsx! {
        div { class: "bg-white border border-gray-200 rounded-lg p-4 text-center",
            div { class: "{text_class}", "{value}" }
            div { class: "text-xs text-gray-400 mt-1", "{label}" }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn Dashboard(data: DashboardData) -> Element {
    // Keep polling until the first fetch resolves.
    let refresh = data.loading && data.view.is_none();

    rsx! {
        Layout { title: "Dashboard".to_string(), refresh: refresh,
            if let Some(notice) = &data.notice {
                div { class: "bg-red-50 border border-red-200 text-red-800 rounded-lg p-3 mb-4 text-sm",
                    "{notice}"
                }
            }

            if let Some(view) = &data.view {
                { render_loaded(view, data.loading) }
            } else if data.loading {
                div { class: "text-center py-24",
                    div { class: "inline-block h-8 w-8 rounded-full border-4 border-blue-600 border-t-transparent animate-spin" }
                    p { class: "mt-2 text-gray-500", "Loading data, please wait..." }
                }
            } else {
                div { class: "text-center py-24",
                    p { class: "text-gray-500 mb-4", "No data loaded." }
                    form { method: "post", action: "/reload",
                        button { r#type: "submit", class: "px-4 py-2 rounded bg-blue-600 text-white text-sm",
                            "Retry"
                        }
                    }
                }
            }
        }
    }
}

fn render_loaded(view: &SessionView, loading: bool) -> Element {
    let summary = view.summary;

    rsx! {
        if loading {
            p { class: "text-xs text-gray-400 mb-2", "Refreshing data..." }
        }

        // --- Stat cards ---
        div { class: "grid grid-cols-1 md:grid-cols-3 gap-3 mb-6",
            { stat_card(summary.total.to_string(), "Cities", "blue") }
            { stat_card(summary.filtered.to_string(), "Matching Filters", "green") }
            { stat_card(summary.provinces.to_string(), "Provinces", "purple") }
        }

        { filter_panel(&view.bounds, &view.criteria) }

        // --- Data table ---
        div { class: "bg-white border border-gray-200 rounded-lg p-4 mb-6",
            div { class: "flex justify-between items-center mb-3",
                h3 { class: "font-semibold text-sm", "City Data" }
                span { class: "text-xs text-gray-500",
                    "Showing {view.table.showing_from}-{view.table.showing_to} of {view.table.total}"
                }
            }
            { data_table(&view.table) }
            if let Some(pagination) = &view.table.pagination {
                { pagination_links(pagination) }
            }
        }

        // --- Charts ---
        div { class: "grid grid-cols-1 lg:grid-cols-2 gap-4 mb-6",
            { chart_card("Population by Province", PROVINCE_CHART_ID, &view.charts.province) }
            { chart_card("Top 10 Cities by Growth Rate", GROWTH_CHART_ID, &view.charts.growth) }
            { chart_card("Population Distribution (Top 15 Cities)", POPULATION_CHART_ID, &view.charts.population) }
        }

        { report_panel() }
    }
}

fn filter_panel(bounds: &FilterBounds, criteria: &FilterCriteria) -> Element {
    let selected = criteria.province.clone().unwrap_or_default();
    let population_min = format_number(bounds.min_population);
    let population_max = format_number(bounds.max_population);
    let population_value = format_plain(criteria.max_population);
    let population_current = format_number(criteria.max_population);
    let change_min = format!("{}%", format_plain(bounds.min_change));
    let change_max = format!("{}%", format_plain(bounds.max_change));
    let change_value = format_plain(criteria.max_change);
    let change_current = format!("{}%", format_plain(criteria.max_change));
    let min_population = criteria.min_population.map(format_plain).unwrap_or_default();
    let min_change = criteria.min_change.map(format_plain).unwrap_or_default();
    let bounds_min_population = format_plain(bounds.min_population);
    let bounds_max_population = format_plain(bounds.max_population);
    let bounds_min_change = format_plain(bounds.min_change);
    let bounds_max_change = format_plain(bounds.max_change);

    rsx! {
        div { class: "bg-white border border-gray-200 rounded-lg p-4 mb-6",
            h3 { class: "font-semibold mb-3 text-sm", "Filters" }
            form { method: "post", action: "/filters", class: "grid grid-cols-1 md:grid-cols-3 gap-4 items-end",
                div {
                    label { class: "block text-xs text-gray-500 mb-1", r#for: "province", "Province" }
                    select { id: "province", name: "province", class: "w-full border rounded px-2 py-1 text-sm",
                        option { value: "", selected: selected.is_empty(), "All Provinces" }
                        for province in bounds.provinces.iter() {
                            option { value: "{province}", selected: *province == selected, "{province}" }
                        }
                    }
                }
                div {
                    label { class: "block text-xs text-gray-500 mb-1", r#for: "max_population",
                        "Max Population (2017): {population_current}"
                    }
                    input {
                        id: "max_population",
                        name: "max_population",
                        r#type: "range",
                        class: "w-full",
                        min: "{bounds_min_population}",
                        max: "{bounds_max_population}",
                        step: "100000",
                        value: "{population_value}",
                    }
                    div { class: "flex justify-between text-xs text-gray-400",
                        span { "{population_min}" }
                        span { "{population_max}" }
                    }
                }
                div {
                    label { class: "block text-xs text-gray-500 mb-1", r#for: "max_change",
                        "Max Change Rate: {change_current}"
                    }
                    input {
                        id: "max_change",
                        name: "max_change",
                        r#type: "range",
                        class: "w-full",
                        min: "{bounds_min_change}",
                        max: "{bounds_max_change}",
                        step: "1",
                        value: "{change_value}",
                    }
                    div { class: "flex justify-between text-xs text-gray-400",
                        span { "{change_min}" }
                        span { "{change_max}" }
                    }
                }
                div {
                    label { class: "block text-xs text-gray-500 mb-1", r#for: "min_population", "Min Population (optional)" }
                    input {
                        id: "min_population",
                        name: "min_population",
                        r#type: "number",
                        class: "w-full border rounded px-2 py-1 text-sm",
                        value: "{min_population}",
                    }
                }
                div {
                    label { class: "block text-xs text-gray-500 mb-1", r#for: "min_change", "Min Change Rate (optional)" }
                    input {
                        id: "min_change",
                        name: "min_change",
                        r#type: "number",
                        step: "any",
                        class: "w-full border rounded px-2 py-1 text-sm",
                        value: "{min_change}",
                    }
                }
                div {
                    button { r#type: "submit", class: "px-4 py-2 rounded bg-blue-600 text-white text-sm",
                        "Apply Filters"
                    }
                }
            }
            form { method: "post", action: "/filters/reset", class: "mt-3",
                button { r#type: "submit", class: "px-4 py-2 rounded bg-gray-200 text-gray-800 text-sm",
                    "Reset Filters"
                }
            }
        }
    }
}

fn tone_class(tone: ChangeTone) -> &'static str {
    match tone {
        ChangeTone::Positive => "text-right py-1 text-green-700",
        ChangeTone::Negative => "text-right py-1 text-red-700",
        ChangeTone::Neutral => "text-right py-1",
    }
}

fn data_table(table: &TableView) -> Element {
    rsx! {
        table { class: "w-full text-xs",
            thead {
                tr {
                    th { class: "text-left pb-2 text-gray-500", "Rank" }
                    th { class: "text-left pb-2 text-gray-500", "City" }
                    th { class: "text-left pb-2 text-gray-500", "Province" }
                    th { class: "text-right pb-2 text-gray-500", "Population (2017)" }
                    th { class: "text-right pb-2 text-gray-500", "Population (1998)" }
                    th { class: "text-right pb-2 text-gray-500", "Change Rate" }
                }
            }
            tbody {
                if table.is_empty() {
                    tr {
                        td { colspan: "6", class: "text-center py-3 text-gray-400", "No data found" }
                    }
                }
                for row in table.rows.iter() {
                    tr {
                        td { class: "py-1 pr-2", "{row.rank}" }
                        td { class: "py-1 pr-2", "{row.city}" }
                        td { class: "py-1 pr-2 text-gray-500", "{row.province}" }
                        td { class: "text-right py-1", "{row.population_2017}" }
                        td { class: "text-right py-1", "{row.population_1998}" }
                        td { class: tone_class(row.tone), "{row.change}" }
                    }
                }
            }
        }
    }
}

fn pagination_links(pagination: &PaginationView) -> Element {
    let prev = pagination.current.saturating_sub(1);
    let next = pagination.current + 1;

    rsx! {
        nav { class: "flex gap-1 mt-3 text-xs",
            if pagination.prev_enabled {
                a { href: "/?page={prev}", class: "px-2 py-1 border rounded text-blue-600", aria_label: "Previous", "«" }
            } else {
                span { class: "px-2 py-1 border rounded text-gray-300", "«" }
            }
            for page in pagination.pages() {
                {
                    let class = if page == pagination.current {
                        "px-2 py-1 border rounded bg-blue-600 text-white"
                    } else {
                        "px-2 py-1 border rounded text-blue-600"
                    };
                    rsx! { a { href: "/?page={page}", class: class, "{page}" } }
                }
            }
            if pagination.next_enabled {
                a { href: "/?page={next}", class: "px-2 py-1 border rounded text-blue-600", aria_label: "Next", "»" }
            } else {
                span { class: "px-2 py-1 border rounded text-gray-300", "»" }
            }
        }
    }
}

fn chart_card(title: &str, id: &str, script: &str) -> Element {
    rsx! {
        div { class: "bg-white border border-gray-200 rounded-lg p-4",
            h3 { class: "font-semibold mb-3 text-sm", "{title}" }
            canvas { id: "{id}", height: "200" }
            script { dangerous_inner_html: "{script}" }
        }
    }
}

fn report_panel() -> Element {
    rsx! {
        div { class: "bg-white border border-gray-200 rounded-lg p-4 mb-6",
            h3 { class: "font-semibold mb-3 text-sm", "Reports" }
            div { class: "flex flex-wrap gap-3 items-end",
                form { method: "get", action: "/export/pdf", class: "flex gap-2 items-end",
                    select { name: "report", class: "border rounded px-2 py-1 text-sm",
                        for mode in ReportMode::ALL {
                            {
                                let value = mode.as_str();
                                let label = mode.label();
                                rsx! { option { value: value, "{label}" } }
                            }
                        }
                    }
                    button { r#type: "submit", class: "px-4 py-2 rounded bg-blue-600 text-white text-sm",
                        "Generate PDF Report"
                    }
                }
                a { href: "/export/csv", class: "px-4 py-2 rounded bg-green-600 text-white text-sm no-underline",
                    "Export CSV"
                }
            }
        }
    }
}

pub fn render_dashboard(data: DashboardData) -> String {
    render_document(Dashboard, DashboardProps { data })
}
