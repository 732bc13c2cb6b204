use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod defaults;
pub mod editor;
pub mod error;
pub mod handlers;
pub mod kv;
pub mod models;
pub mod storage;

use auth::SessionStore;
use kv::KeyValueStore;
use storage::Stores;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub stores: Stores,
    pub config: config::AppConfig,
    pub sessions: SessionStore,
}

impl AppState {
    /// Wire the record stores over `backend`. Built once at startup.
    pub fn new(backend: Arc<dyn KeyValueStore>, config: config::AppConfig) -> Self {
        let sessions = SessionStore::new(config.session_duration_hours);
        Self {
            stores: Stores::new(backend),
            config,
            sessions,
        }
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    let admin_router = Router::new()
        .route(
            "/",
            get(|| async { axum::response::Redirect::to("/admin/dashboard") }),
        )
        .route("/login", post(handlers::admin::login))
        .route("/logout", post(handlers::admin::logout))
        .route("/dashboard", get(handlers::admin::dashboard))
        .route("/analytics", get(handlers::admin::analytics))
        .route(
            "/profile",
            get(handlers::admin::get_profile).put(handlers::admin::put_profile),
        )
        .route("/links", post(handlers::admin::add_link))
        .route(
            "/links/:id",
            patch(handlers::admin::update_link).delete(handlers::admin::delete_link),
        )
        .route("/featured", post(handlers::admin::add_featured))
        .route(
            "/featured/:id",
            patch(handlers::admin::update_featured).delete(handlers::admin::delete_featured),
        )
        .route("/themes", get(handlers::admin::list_themes))
        .route("/themes/:id", post(handlers::admin::apply_theme))
        .route(
            "/settings",
            get(handlers::admin::get_settings).put(handlers::admin::put_settings),
        )
        .route("/lock", post(handlers::admin::lock))
        .route("/unlock", post(handlers::admin::unlock));

    Router::new()
        .route("/", get(handlers::public::index))
        .route("/health", get(|| async { axum::http::StatusCode::OK }))
        // Admin panel (all under /admin/*)
        .nest("/admin", admin_router)
        // Public profile routes come LAST so /admin/* takes priority
        .route("/:slug", get(handlers::public::profile))
        .route("/:slug/go/:link_id", get(handlers::public::follow_link))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
