//! Authentication routes for registration and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, routes::app_error};
use meridian_core::auth::{hash_password, verify_password};
use meridian_core::card::CardSettings;
use meridian_core::ledger::{Account, AccountType, generate_account_number};
use meridian_core::user::{NewUser, UserError};
use meridian_shared::AppError;
use meridian_shared::types::Currency;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Full display name.
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password; stored only as an argon2id hash.
    pub password: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// POST /auth/register - Create a user with one default account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password during registration");
            return app_error(&AppError::Internal("registration failed".into()));
        }
    };

    let user = match state.users.register(NewUser {
        email: payload.email,
        display_name: payload.full_name,
        phone: payload.phone,
        password_hash,
    }) {
        Ok(user) => user,
        Err(UserError::EmailTaken(email)) => {
            return app_error(&AppError::Conflict(format!(
                "Email already registered: {email}"
            )));
        }
    };

    // Every new user starts with one default account and permissive card
    // settings with the standard spending limit.
    let number = generate_account_number();
    state.ledger.open_account(
        user.id,
        Account::new(
            number.clone(),
            AccountType::Savings,
            Currency::Egp,
            "My Card",
            Decimal::new(1_000_00, 2),
        ),
    );
    state.cards.set(
        number.clone(),
        CardSettings {
            spending_limit: Some(Decimal::from(50_000)),
            ..CardSettings::default()
        },
    );

    info!(user_id = %user.id, account = %number, "User registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "customerId": user.id,
            "accountNumber": number,
            "message": "Registration successful. Please login."
        })),
    )
        .into_response()
}

/// POST /auth/login - Verify credentials and issue a session token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_credentials",
                "message": "Invalid email or password"
            })),
        )
            .into_response()
    };

    let Some(user) = state.users.find_by_email(&payload.email) else {
        info!(email = %payload.email, "Login attempt for non-existent user");
        return invalid_credentials();
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return app_error(&AppError::Internal("login failed".into()));
        }
    }

    let token = state.sessions.issue(user.id);
    info!(user_id = %user.id, "User logged in");

    (
        StatusCode::OK,
        Json(json!({
            "sessionToken": token,
            "customerId": user.id,
            "fullName": user.display_name,
            "email": user.email
        })),
    )
        .into_response()
}
