use crate::config::{AppConfig, MapConfig};
use crate::controller::{Artifacts, ReactiveController};
use crate::types::{selector_options, Dataset, Selector, SelectorOption};
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use lru::LruCache;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

/// One controller per browser session, least recently used evicted first.
pub struct SessionStore {
    sessions: LruCache<Uuid, ReactiveController>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: LruCache::new(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.sessions.contains(id)
    }

    pub fn update(
        &mut self,
        id: Uuid,
        selector: Selector,
        dataset: &Arc<Dataset>,
        map_config: &MapConfig,
    ) -> Arc<Artifacts> {
        let controller = self.sessions.get_or_insert_mut(id, || {
            debug!("New session {}", id);
            ReactiveController::new(Arc::clone(dataset), map_config.clone())
        });
        controller.on_selector_change(selector)
    }
}

fn one_shot(selector: Selector, dataset: &Arc<Dataset>, map_config: &MapConfig) -> Arc<Artifacts> {
    let mut controller = ReactiveController::new(Arc::clone(dataset), map_config.clone());
    controller.on_selector_change(selector)
}

pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub config: AppConfig,
    pub sessions: Mutex<SessionStore>,
}

impl AppState {
    pub fn new(config: AppConfig, dataset: Dataset) -> Self {
        let sessions = Mutex::new(SessionStore::new(config.server.max_sessions));
        Self {
            dataset: Arc::new(dataset),
            config,
            sessions,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateParams {
    name: Option<String>,
    session: Option<Uuid>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    leads: usize,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/api/options", get(options_handler))
        .route("/api/update", get(update_handler))
        .route("/api/health", get(health_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(config: AppConfig, dataset: Dataset) -> Result<()> {
    let ip: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server host: {}", config.server.host))?;
    let addr = SocketAddr::from((ip, config.server.port));

    let state = Arc::new(AppState::new(config, dataset));
    let app = build_router(state);

    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn options_handler(State(state): State<Arc<AppState>>) -> Json<Vec<SelectorOption>> {
    Json(selector_options(&state.dataset))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UpdateParams>,
) -> Json<Arc<Artifacts>> {
    let selector = params
        .name
        .as_deref()
        .map(Selector::parse)
        .unwrap_or_default();

    let artifacts = match params.session {
        Some(id) => {
            let mut sessions = state.sessions.lock().await;
            sessions.update(id, selector, &state.dataset, &state.config.map)
        }
        None => one_shot(selector, &state.dataset, &state.config.map),
    };

    Json(artifacts)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        leads: state.dataset.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lead;

    fn dataset() -> Arc<Dataset> {
        let lead = |name: &str| Lead {
            name: name.to_string(),
            latitude: Some(1.0),
            longitude: Some(1.0),
            monthly_total_income: Some(10.0),
            source: Some("web".to_string()),
            call_id: Some("1".to_string()),
        };
        Arc::new(Dataset::new(vec![lead("A"), lead("B")]))
    }

    #[test]
    fn sessions_keep_independent_selectors() {
        let data = dataset();
        let map = MapConfig::default();
        let mut store = SessionStore::new(8);
        let (one, two) = (Uuid::new_v4(), Uuid::new_v4());

        let a = store.update(one, Selector::Name("A".to_string()), &data, &map);
        let all = store.update(two, Selector::All, &data, &map);
        assert_eq!(a.map.point_count(), 1);
        assert_eq!(all.map.point_count(), 2);

        let again = store.update(one, Selector::Name("A".to_string()), &data, &map);
        assert!(Arc::ptr_eq(&a, &again));
    }

    #[test]
    fn full_store_evicts_least_recently_used() {
        let data = dataset();
        let map = MapConfig::default();
        let mut store = SessionStore::new(2);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

        store.update(ids[0], Selector::All, &data, &map);
        store.update(ids[1], Selector::All, &data, &map);
        store.update(ids[0], Selector::Name("A".to_string()), &data, &map);
        store.update(ids[2], Selector::All, &data, &map);

        assert_eq!(store.len(), 2);
        assert!(store.contains(&ids[0]));
        assert!(!store.contains(&ids[1]));
        assert!(store.contains(&ids[2]));
    }

    #[test]
    fn zero_capacity_still_holds_one_session() {
        let data = dataset();
        let map = MapConfig::default();
        let mut store = SessionStore::new(0);
        let (one, two) = (Uuid::new_v4(), Uuid::new_v4());

        store.update(one, Selector::All, &data, &map);
        store.update(two, Selector::All, &data, &map);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&two));
    }
}
