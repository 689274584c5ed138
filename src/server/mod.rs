//! Server module for exposing the form actions over HTTP
//!
//! This module provides a `ServerBuilder` that registers:
//! - the invoice create, edit and delete form posts
//! - the credentials sign-in post
//! - health check routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_action_routes;
