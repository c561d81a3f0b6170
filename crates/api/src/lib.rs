//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Session-based authentication middleware
//! - Request extractors
//! - Response types

pub mod middleware;
pub mod routes;
pub mod session;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use meridian_core::beneficiary::BeneficiaryStore;
use meridian_core::card::CardSettingsStore;
use meridian_core::ledger::{LedgerStore, MovementService};
use meridian_core::savings::SavingsGoalStore;
use meridian_core::user::UserStore;
use session::SessionStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// User registry.
    pub users: Arc<UserStore>,
    /// Account balances and history.
    pub ledger: Arc<LedgerStore>,
    /// Per-account card settings.
    pub cards: Arc<CardSettingsStore>,
    /// Savings goals.
    pub goals: Arc<SavingsGoalStore>,
    /// Transfer beneficiary directory.
    pub beneficiaries: Arc<BeneficiaryStore>,
    /// The money movement operations over the stores above.
    pub movements: MovementService,
    /// Active sessions.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Creates fresh in-memory state (one per process, or per test).
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(UserStore::new());
        let ledger = Arc::new(LedgerStore::new());
        let cards = Arc::new(CardSettingsStore::new());
        let goals = Arc::new(SavingsGoalStore::new());
        let beneficiaries = Arc::new(BeneficiaryStore::new());
        let movements = MovementService::new(
            Arc::clone(&ledger),
            Arc::clone(&cards),
            Arc::clone(&goals),
        );

        Self {
            users,
            ledger,
            cards,
            goals,
            beneficiaries,
            movements,
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
