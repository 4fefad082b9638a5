//! HTTP API layer
//!
//! REST surface for the lecturer claims system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: thin glue over the domain services
//! - **Middleware**: bearer-token auth minting an `ActorContext`, audit logging
//! - **DTOs**: request/response shapes with `validator` checks
//! - **Error handling**: the domain taxonomy mapped to HTTP statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(pool, ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimService;
use domain_directory::DirectoryService;
use infra_db::adapters::{PgClaimsAdapter, PgDirectoryAdapter, PgLecturerProfileAdapter};

use crate::config::ApiConfig;
use crate::handlers::{claims, directory, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub claims: Arc<ClaimService>,
    pub directory: Arc<DirectoryService>,
}

impl AppState {
    /// Wires the domain services over their PostgreSQL adapters
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        let claims_port = Arc::new(PgClaimsAdapter::new(pool.clone()));
        let profile_port = Arc::new(PgLecturerProfileAdapter::new(pool.clone()));
        let directory_port = Arc::new(PgDirectoryAdapter::new(pool.clone()));

        Self {
            pool,
            config,
            claims: Arc::new(ClaimService::new(claims_port, profile_port)),
            directory: Arc::new(DirectoryService::new(directory_port)),
        }
    }
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState::new(pool, config);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claim workflow routes
    let claim_routes = Router::new()
        .route("/", post(claims::submit))
        .route("/", get(claims::all_claims))
        .route("/mine", get(claims::my_claims))
        .route("/report", get(claims::report))
        .route("/verify-queue", get(claims::verify_queue))
        .route("/review-queue", get(claims::review_queue))
        .route("/approval-queue", get(claims::approval_queue))
        .route("/:id", get(claims::get_claim))
        .route("/:id", delete(claims::delete_claim))
        .route("/:id/verify", post(claims::verify))
        .route("/:id/reject-verification", post(claims::reject_verification))
        .route("/:id/approve", post(claims::approve))
        .route("/:id/reject", post(claims::reject));

    // Directory administration routes
    let department_routes = Router::new()
        .route("/", get(directory::list_departments))
        .route("/", post(directory::create_department))
        .route("/:id", get(directory::get_department))
        .route("/:id", put(directory::rename_department))
        .route("/:id", delete(directory::delete_department))
        .route("/:id/rate", put(directory::update_department_rate));

    let user_routes = Router::new()
        .route("/", get(directory::list_users))
        .route("/", post(directory::create_user))
        .route("/:id", get(directory::get_user))
        .route("/:id", put(directory::update_user))
        .route("/:id", delete(directory::delete_user));

    let lecturer_routes = Router::new()
        .route("/", get(directory::list_lecturers))
        .route("/:id/rate", put(directory::override_lecturer_rate));

    let module_routes = Router::new()
        .route("/", get(directory::list_modules))
        .route("/", post(directory::create_module));

    let assignment_routes = Router::new()
        .route("/", get(directory::list_assignments))
        .route("/", post(directory::assign_module))
        .route("/:id", delete(directory::unassign_module));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claim_routes)
        .nest("/departments", department_routes)
        .nest("/users", user_routes)
        .nest("/lecturers", lecturer_routes)
        .nest("/modules", module_routes)
        .nest("/module-assignments", assignment_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
