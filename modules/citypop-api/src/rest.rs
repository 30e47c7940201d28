use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{info, warn};

use citypop_common::{CityPopError, CityRecord};
use citypop_store::CityStore;

use crate::AppState;

// --- Queries ---

/// Full dump of the dataset in store order. An empty store is `NotFound`,
/// which callers must keep distinct from a store failure.
pub async fn list_all(store: &dyn CityStore) -> Result<Vec<CityRecord>, CityPopError> {
    let records = store.fetch_all().await?;
    if records.is_empty() {
        return Err(CityPopError::NotFound);
    }
    Ok(records)
}

// --- Handlers ---

pub async fn api_get_all(State(state): State<Arc<AppState>>) -> Response {
    match list_all(state.store.as_ref()).await {
        Ok(records) => {
            info!(count = records.len(), "response sent successfully");
            Json(records).into_response()
        }
        Err(CityPopError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No data found" })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to list cities");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": e.to_string() })),
            )
                .into_response()
        }
    }
}
