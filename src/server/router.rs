//! Router builder utilities for action routes

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{
    AppState, create_invoice, delete_invoice, health_check, login, update_invoice,
};

/// Build the action routes
///
/// Mounted under the configured invoices path (default `/dashboard/invoices`):
/// - POST {invoices}/create - Create an invoice
/// - POST {invoices}/{id}/edit - Update an invoice
/// - POST {invoices}/{id}/delete - Delete an invoice
/// - POST /login - Credentials sign-in
/// - GET /health, /healthz - Health check
pub fn build_action_routes(state: AppState) -> Router {
    let invoices = state.actions.invoices_path().trim_end_matches('/').to_string();

    Router::new()
        .route(&format!("{}/create", invoices), post(create_invoice))
        .route(&format!("{}/{{id}}/edit", invoices), post(update_invoice))
        .route(&format!("{}/{{id}}/delete", invoices), post(delete_invoice))
        .route("/login", post(login))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
}
