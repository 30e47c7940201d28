//! Client-side data pipeline for the census dashboard.
//!
//! A [`Session`] is fetched once, then filtered, paginated, aggregated for
//! charts, selected into reports, and exported as CSV or PDF. None of the
//! transforms mutate the loaded dataset and none of them fail on empty input.

pub mod charts;
pub mod client;
pub mod csv_export;
pub mod filter;
pub mod load;
pub mod paginate;
pub mod pdf;
pub mod report;
pub mod session;
mod sort;

pub use charts::{ChartSet, GrowthPoint, PopulationPoint, ProvinceTotal};
pub use client::{DataClient, FetchError};
pub use filter::{FilterBounds, FilterCriteria};
pub use load::{load_records, LoadReport};
pub use paginate::{PaginationView, TableRow, TableView, PAGE_SIZE};
pub use report::{ReportMode, ReportRow};
pub use session::{Session, SessionSummary};
