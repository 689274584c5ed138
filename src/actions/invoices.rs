//! Invoice mutations: create, update, delete
//!
//! Each action runs validate → transform → persist → invalidate → redirect.
//! Validation and storage failures come back as [`FormState`] data; nothing
//! here returns an error value.

use std::sync::Arc;

use crate::actions::ActionOutcome;
use crate::core::effects::{PathRevalidator, Redirector};
use crate::core::form::{FieldErrors, FormData, FormState};
use crate::core::invoice::{self, InvoiceForm};
use crate::core::service::PersistenceGateway;
use crate::core::statement::InvoiceStatement;

/// Default path of the invoices listing view
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Which mutation an action performs, for messages and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Create,
    Update,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Create => "Create",
            Mutation::Update => "Update",
        }
    }

    fn invalid_message(self) -> String {
        format!("Missing Fields. Failed to {} Invoice.", self.verb())
    }

    fn database_message(self) -> String {
        format!("Database Error: Failed to {} Invoice.", self.verb())
    }
}

/// Invoice actions bound to their collaborators
///
/// Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct InvoiceActions {
    gateway: Arc<dyn PersistenceGateway>,
    revalidator: Arc<dyn PathRevalidator>,
    redirector: Arc<dyn Redirector>,
    invoices_path: String,
}

impl InvoiceActions {
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        revalidator: Arc<dyn PathRevalidator>,
        redirector: Arc<dyn Redirector>,
    ) -> Self {
        Self {
            gateway,
            revalidator,
            redirector,
            invoices_path: INVOICES_PATH.to_string(),
        }
    }

    /// Use another listing path for invalidation and redirects
    pub fn with_invoices_path(mut self, path: impl Into<String>) -> Self {
        self.invoices_path = path.into();
        self
    }

    pub fn invoices_path(&self) -> &str {
        &self.invoices_path
    }

    /// Create an invoice from a submitted form
    ///
    /// The date is today's UTC date.
    pub async fn create_invoice(&self, form: &FormData) -> ActionOutcome {
        let (parsed, amount) = match self.validate(Mutation::Create, form) {
            Ok(valid) => valid,
            Err(state) => return ActionOutcome::Invalid(state),
        };

        let statement = InvoiceStatement::Insert {
            customer_id: parsed.customer_id,
            amount,
            status: parsed.status,
            date: invoice::today(),
        };

        self.commit(Mutation::Create, statement).await
    }

    /// Replace customer, amount and status of invoice `id`
    ///
    /// `id` is used as given; the caller is responsible for having checked
    /// access to it.
    pub async fn update_invoice(&self, id: &str, form: &FormData) -> ActionOutcome {
        let (parsed, amount) = match self.validate(Mutation::Update, form) {
            Ok(valid) => valid,
            Err(state) => return ActionOutcome::Invalid(state),
        };

        let statement = InvoiceStatement::Update {
            id: id.to_string(),
            customer_id: parsed.customer_id,
            amount,
            status: parsed.status,
        };

        self.commit(Mutation::Update, statement).await
    }

    /// Delete invoice `id`
    ///
    /// Invalidates the listing but does not redirect: deletion is triggered
    /// from the listing itself.
    pub async fn delete_invoice(&self, id: &str) -> ActionOutcome {
        let statement = InvoiceStatement::Delete { id: id.to_string() };

        match self.gateway.execute(statement).await {
            Ok(rows) => {
                tracing::info!(invoice_id = id, rows, "invoice deleted");
                self.revalidator.revalidate_path(&self.invoices_path);
                ActionOutcome::Done(FormState::message("Deleted Invoice"))
            }
            Err(e) => {
                tracing::error!(invoice_id = id, error = %e, "failed to delete invoice");
                ActionOutcome::Failed(FormState::message(
                    "Database Error: Failed to Delete Invoice",
                ))
            }
        }
    }

    /// Parsed form plus its amount in cents
    fn validate(
        &self,
        mutation: Mutation,
        form: &FormData,
    ) -> Result<(InvoiceForm, i64), FormState> {
        let schema = match mutation {
            Mutation::Create => invoice::create_invoice_schema(),
            Mutation::Update => invoice::update_invoice_schema(),
        };

        let parsed: InvoiceForm = schema
            .parse(form)
            .map_err(|errors| Self::reject(mutation, errors))?;

        match parsed.amount_cents() {
            Some(cents) => Ok((parsed, cents)),
            None => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    "amount".to_string(),
                    vec![invoice::AMOUNT_INVALID_MESSAGE.to_string()],
                );
                Err(Self::reject(mutation, errors))
            }
        }
    }

    fn reject(mutation: Mutation, errors: FieldErrors) -> FormState {
        tracing::debug!(
            action = mutation.verb(),
            fields = ?errors.keys().collect::<Vec<_>>(),
            "invoice form rejected"
        );
        FormState::invalid(errors, mutation.invalid_message())
    }

    async fn commit(&self, mutation: Mutation, statement: InvoiceStatement) -> ActionOutcome {
        let kind = statement.kind();
        if let Err(e) = self.gateway.execute(statement).await {
            tracing::error!(action = mutation.verb(), statement = kind, error = %e, "failed to persist invoice");
            return ActionOutcome::Failed(FormState::message(mutation.database_message()));
        }

        tracing::info!(action = mutation.verb(), statement = kind, "invoice saved");
        self.revalidator.revalidate_path(&self.invoices_path);
        ActionOutcome::Redirected(self.redirector.redirect(&self.invoices_path))
    }
}
