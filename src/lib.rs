//! # Dashboard Actions
//!
//! Server-side form actions for an invoicing dashboard.
//!
//! ## Features
//!
//! - **Invoice Mutations**: create, update and delete invoices from raw form posts
//! - **Schema Validation**: per-field errors keyed by field name, all collected at once
//! - **Error Boundary**: validation and storage failures come back as form state, never as panics
//! - **Post-Commit Effects**: cached listing invalidation and redirects as injected capabilities
//! - **Credentials Sign-In**: provider failures mapped to user-facing messages
//! - **Pluggable Storage**: in-memory store, or PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let gateway = InMemoryGateway::new();
//! let actions = InvoiceActions::new(
//!     Arc::new(gateway),
//!     Arc::new(TracingRevalidator),
//!     Arc::new(SeeOtherRedirector),
//! );
//!
//! let form = FormData::new()
//!     .with("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a")
//!     .with("amount", "45.00")
//!     .with("status", "paid");
//!
//! match actions.create_invoice(&form).await {
//!     ActionOutcome::Redirected(redirect) => println!("-> {}", redirect.location()),
//!     other => println!("{:?}", other.form_state()),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::actions::{ActionOutcome, INVOICES_PATH, InvoiceActions, authenticate};

    // === Core Types ===
    pub use crate::core::{
        auth::{AuthError, AuthErrorKind, AuthProvider, NoAuthProvider, SignInError},
        effects::{
            PathRevalidator, RecordingRevalidator, Redirect, Redirector, SeeOtherRedirector,
            TracingRevalidator,
        },
        error::{ConfigError, DashboardError, StorageError},
        form::{FieldErrors, FormData, FormState},
        invoice::{Invoice, InvoiceForm, InvoiceStatus},
        service::PersistenceGateway,
        statement::{InvoiceStatement, SqlParam},
        validation::{FieldRule, Schema},
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryGateway;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresGateway;

    // === Config ===
    pub use crate::config::{DashboardConfig, DatabaseConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::{get, post},
    };
}
