//! medinfo - health information backend
//!
//! Public catalog API (body parts, illnesses with medicines, doctors, health
//! tips, contact form) and a session-gated admin API for managing content.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{delete, get, post, put},
    Router,
};
use medinfo_core::ImagePolicy;
use medinfo_store::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Application state
pub struct AppState {
    pub store: SqliteStore,
    pub config: ServerConfig,
    pub sessions: SessionStore,
    pub image_policy: ImagePolicy,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(store: SqliteStore, config: ServerConfig) -> Self {
        Self {
            sessions: SessionStore::new(config.auth.session_ttl_secs),
            image_policy: config.image_policy(),
            upload_dir: config.upload_dir(),
            store,
            config,
        }
    }
}

/// Build the application router with all routes and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    let body_limit = state.config.server.body_limit_bytes;

    let admin = Router::new()
        .route("/admin/stats", get(handlers::dashboard::stats))
        .route("/admin/body-parts", get(handlers::dashboard::body_parts))
        .route("/admin/illnesses-list", get(handlers::dashboard::illness_options))
        // Illnesses
        .route("/admin/illnesses", get(handlers::illnesses::list))
        .route("/admin/illness", post(handlers::illnesses::create))
        .route(
            "/admin/illness/{id}",
            put(handlers::illnesses::update).delete(handlers::illnesses::remove),
        )
        // Doctors
        .route("/admin/doctors", get(handlers::doctors::list))
        .route("/admin/doctor", post(handlers::doctors::create))
        .route(
            "/admin/doctor/{id}",
            put(handlers::doctors::update).delete(handlers::doctors::remove),
        )
        // Medicines
        .route("/admin/medicines", get(handlers::medicines::list))
        .route("/admin/medicine", post(handlers::medicines::create))
        .route("/admin/medicine/{id}", delete(handlers::medicines::remove))
        .route(
            "/admin/medicine/upload-image/{id}",
            post(handlers::medicines::upload_image),
        )
        // Messages
        .route("/admin/messages", get(handlers::messages::list))
        .route("/admin/message/{id}/read", post(handlers::messages::mark_read))
        // Health tips
        .route("/admin/tips", get(handlers::tips::list))
        .route("/admin/tip", post(handlers::tips::create))
        .route("/admin/tip/{id}", delete(handlers::tips::remove))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        // Health check
        .route("/health", get(handlers::public::health_check))
        // Public catalog
        .route("/api/body-parts", get(handlers::public::body_parts))
        .route("/api/body-part/{slug}", get(handlers::public::body_part_detail))
        .route("/api/health-tips", get(handlers::public::health_tips))
        .route("/api/contact", post(handlers::public::contact))
        // Admin session
        .route("/admin/login", post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/check", get(auth::check))
        .merge(admin)
        // Uploaded medicine images
        .nest_service("/uploads", ServeDir::new(&state.upload_dir))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
