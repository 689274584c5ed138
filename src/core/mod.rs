//! Core module containing the types and collaborator traits the actions use

pub mod auth;
pub mod effects;
pub mod error;
pub mod form;
pub mod invoice;
pub mod service;
pub mod statement;
pub mod validation;

pub use auth::{AuthError, AuthErrorKind, AuthProvider, NoAuthProvider, SignInError};
pub use effects::{PathRevalidator, Redirect, Redirector};
pub use error::{ConfigError, DashboardError, StorageError};
pub use form::{FieldErrors, FormData, FormState};
pub use invoice::{Invoice, InvoiceForm, InvoiceStatus};
pub use service::PersistenceGateway;
pub use statement::{InvoiceStatement, SqlParam};
