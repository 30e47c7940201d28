use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use citypop_common::{CityPopError, CityRecord};

use crate::CityStore;

/// Fixed, in-process dataset.
#[derive(Debug, Clone, Default)]
pub struct MemoryCityStore {
    records: Vec<CityRecord>,
}

impl MemoryCityStore {
    pub fn new(records: Vec<CityRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of records shaped like the API output.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CityPopError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            CityPopError::Database(format!("failed to read {}: {e}", path.display()))
        })?;
        let records: Vec<CityRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            CityPopError::Database(format!("invalid seed file {}: {e}", path.display()))
        })?;

        for record in &records {
            record
                .validate()
                .map_err(|e| CityPopError::Database(format!("{}: {e}", record.city)))?;
        }

        info!(count = records.len(), path = %path.display(), "Loaded seed file");
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CityStore for MemoryCityStore {
    async fn fetch_all(&self) -> Result<Vec<CityRecord>, CityPopError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_all_preserves_insertion_order() {
        let store = MemoryCityStore::new(vec![
            CityRecord::new(2, "Lahore", "Punjab", 11_126_285.0, 5_143_495.0, 116.32),
            CityRecord::new(1, "Karachi", "Sindh", 14_910_352.0, 9_339_023.0, 59.65),
        ]);
        let records = store.fetch_all().await.unwrap();
        assert_eq!(records[0].city, "Lahore");
        assert_eq!(records[1].city, "Karachi");
    }

    #[tokio::test]
    async fn from_json_file_rejects_invalid_records() {
        let dir = std::env::temp_dir().join(format!("citypop-seed-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("bad.json");
        tokio::fs::write(
            &path,
            r#"[{"Rank":1,"City":"","Province":"P","Population_2017_Census":1,"Population_1998_Census":1,"Change":0}]"#,
        )
        .await
        .unwrap();

        let err = MemoryCityStore::from_json_file(&path).await.unwrap_err();
        assert!(matches!(err, CityPopError::Database(_)));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn from_json_file_reads_api_shaped_array() {
        let dir = std::env::temp_dir().join(format!("citypop-seed-ok-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("cities.json");
        tokio::fs::write(
            &path,
            r#"[{"Rank":1,"City":"A","Province":"P1","Population_2017_Census":1000,"Population_1998_Census":800,"Change":25}]"#,
        )
        .await
        .unwrap();

        let store = MemoryCityStore::from_json_file(&path).await.unwrap();
        assert_eq!(store.len(), 1);

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
