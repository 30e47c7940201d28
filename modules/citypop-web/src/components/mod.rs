pub mod charts;
pub mod dashboard;
pub mod layout;

pub use charts::{
    build_growth_chart, build_population_chart, build_province_chart, ChartScripts,
};
pub use dashboard::{render_dashboard, DashboardData, SessionView};
