//! HTTP handlers for the form actions
//!
//! Thin adapters: decode the form body, call the action, render its outcome.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::actions::{ActionOutcome, InvoiceActions, authenticate};
use crate::core::auth::AuthProvider;
use crate::core::error::DashboardError;
use crate::core::form::FormData;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub auth_provider: Arc<dyn AuthProvider>,
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<FormData>,
) -> ActionOutcome {
    state.actions.create_invoice(&form).await
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> ActionOutcome {
    state.actions.update_invoice(&id, &form).await
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ActionOutcome {
    state.actions.delete_invoice(&id).await
}

/// Credentials sign-in
///
/// 204 on success, 401 with `{ "message" }` for a recognized failure. Any
/// other failure becomes a 500 through [`DashboardError`].
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<FormData>,
) -> Result<Response, DashboardError> {
    let response = match authenticate(state.auth_provider.as_ref(), None, &form).await? {
        None => StatusCode::NO_CONTENT.into_response(),
        Some(message) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": message })),
        )
            .into_response(),
    };
    Ok(response)
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dashboard-actions"
    }))
}
