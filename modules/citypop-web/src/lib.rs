use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tokio::sync::{Mutex, RwLock};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use citypop_common::CoercionMode;
use citypop_pipeline::{DataClient, Session};

pub mod components;
pub mod pages;
pub mod templates;

pub const LOAD_FAILED_NOTICE: &str = "Failed to load data. Please try again later.";

pub struct AppState {
    pub client: DataClient,
    pub coercion: CoercionMode,
    pub session: RwLock<Option<Session>>,
    loading: AtomicBool,
    notice: Mutex<Option<String>>,
}

impl AppState {
    pub fn new(client: DataClient, coercion: CoercionMode) -> Self {
        Self {
            client,
            coercion,
            session: RwLock::new(None),
            loading: AtomicBool::new(false),
            notice: Mutex::new(None),
        }
    }

    /// State with a session already in place. No fetch is made.
    pub fn with_session(client: DataClient, session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
            ..Self::new(client, CoercionMode::default())
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Mark a fetch as in flight. Returns false if one already is.
    pub fn begin_loading(&self) -> bool {
        self.loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub async fn set_notice(&self, message: impl Into<String>) {
        *self.notice.lock().await = Some(message.into());
    }

    /// Notices are shown once.
    pub async fn take_notice(&self) -> Option<String> {
        self.notice.lock().await.take()
    }

    /// Fetch the dataset and replace the session. On failure the previous
    /// session stays and a notice is queued.
    pub async fn refresh(&self) {
        self.loading.store(true, Ordering::SeqCst);

        match Session::fetch(&self.client, self.coercion).await {
            Ok(session) => {
                info!(records = session.all_data().len(), "Dashboard data loaded");
                *self.session.write().await = Some(session);
            }
            Err(e) => {
                warn!(error = %e, url = %self.client.url(), "Error fetching data");
                self.set_notice(LOAD_FAILED_NOTICE).await;
            }
        }

        self.loading.store(false, Ordering::SeqCst);
    }
}

/// Start a background fetch unless one is already running.
pub fn spawn_refresh(state: Arc<AppState>) {
    if !state.begin_loading() {
        return;
    }
    tokio::spawn(async move {
        state.refresh().await;
    });
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Dashboard (Dioxus SSR)
        .route("/", get(pages::dashboard_page))
        .route("/filters", post(pages::apply_filters))
        .route("/filters/reset", post(pages::reset_filters))
        .route("/reload", post(pages::reload))
        // Downloads
        .route("/export/csv", get(pages::export_csv))
        .route("/export/pdf", get(pages::export_pdf))
        .with_state(state)
        // Pages reflect live session state
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
        )
}
