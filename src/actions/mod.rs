//! Form actions
//!
//! Every action takes its collaborators explicitly and hands back plain data:
//! an [`ActionOutcome`] for the invoice mutations, an optional message for
//! sign-in.

pub mod authenticate;
pub mod invoices;

pub use authenticate::authenticate;
pub use invoices::{INVOICES_PATH, InvoiceActions};

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::core::effects::Redirect;
use crate::core::form::FormState;

/// What an invoice action ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The form failed validation; nothing was written
    Invalid(FormState),
    /// The store rejected the statement; no effects ran
    Failed(FormState),
    /// The mutation was applied and the action reports back in place
    Done(FormState),
    /// The mutation was applied and control moved to another path
    Redirected(Redirect),
}

impl ActionOutcome {
    /// The form state, unless the action redirected
    pub fn form_state(&self) -> Option<&FormState> {
        match self {
            ActionOutcome::Invalid(state)
            | ActionOutcome::Failed(state)
            | ActionOutcome::Done(state) => Some(state),
            ActionOutcome::Redirected(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            ActionOutcome::Redirected(redirect) => Some(redirect),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ActionOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionOutcome::Done(_) => StatusCode::OK,
            ActionOutcome::Redirected(_) => StatusCode::SEE_OTHER,
        }
    }
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ActionOutcome::Redirected(redirect) => redirect.into_response(),
            ActionOutcome::Invalid(state)
            | ActionOutcome::Failed(state)
            | ActionOutcome::Done(state) => (status, Json(state)).into_response(),
        }
    }
}
