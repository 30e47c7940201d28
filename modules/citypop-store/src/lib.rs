//! Read-only access to the census dataset.
//!
//! `CityStore` is the seam the query service depends on. `PgCityStore` reads
//! the `major_cities` table; `MemoryCityStore` serves a fixed set of records
//! (seed files, tests).

mod memory;
mod postgres;

use async_trait::async_trait;

use citypop_common::{CityPopError, CityRecord};

pub use memory::MemoryCityStore;
pub use postgres::PgCityStore;

#[async_trait]
pub trait CityStore: Send + Sync {
    /// Every record, in the store's natural order.
    async fn fetch_all(&self) -> Result<Vec<CityRecord>, CityPopError>;
}
