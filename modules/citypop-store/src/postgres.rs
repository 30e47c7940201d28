use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use citypop_common::{CityPopError, CityRecord};

use crate::CityStore;

type CityRow = (i64, String, String, f64, f64, f64);

/// `major_cities` table reader.
#[derive(Clone)]
pub struct PgCityStore {
    pool: PgPool,
}

impl PgCityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool without touching the network. Connection errors surface on
    /// the first query instead of at startup.
    pub fn connect_lazy(database_url: &str) -> Result<Self, CityPopError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)
            .map_err(|e| CityPopError::Database(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Round-trip a trivial query and log the outcome. Never fails the caller.
    pub async fn check_connection(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => {
                info!("Database connected successfully");
                true
            }
            Err(e) => {
                warn!(error = %e, "Database connection error");
                false
            }
        }
    }
}

#[async_trait]
impl CityStore for PgCityStore {
    async fn fetch_all(&self) -> Result<Vec<CityRecord>, CityPopError> {
        let rows = sqlx::query_as::<_, CityRow>(
            r#"
            SELECT rank, city, province, population_2017_census, population_1998_census, change
            FROM major_cities
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CityPopError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }
}

fn row_to_record(row: CityRow) -> CityRecord {
    let (rank, city, province, population_2017, population_1998, change) = row;
    CityRecord {
        rank,
        city,
        province,
        population_2017,
        population_1998,
        change,
    }
}
