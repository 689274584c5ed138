//! Post-commit effects: page-cache invalidation and redirects
//!
//! Both are capabilities handed to the action pipeline rather than globals,
//! so the pipeline can run without a live server.

use axum::response::{IntoResponse, Response};
use std::sync::{Arc, RwLock};

/// Marks cached renderings of a path as stale
///
/// Fire-and-forget: the pipeline neither waits on nor inspects the result.
pub trait PathRevalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

/// Produces the redirect that ends an action
pub trait Redirector: Send + Sync {
    fn redirect(&self, path: &str) -> Redirect;
}

/// Transfer of control to another path
///
/// Returned as the final value of an action; nothing runs after it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        axum::response::Redirect::to(&self.location).into_response()
    }
}

/// Redirector answering with `303 See Other`, the form-post convention
#[derive(Debug, Clone, Copy, Default)]
pub struct SeeOtherRedirector;

impl Redirector for SeeOtherRedirector {
    fn redirect(&self, path: &str) -> Redirect {
        Redirect::to(path)
    }
}

/// Revalidator that only records the event in the trace log
///
/// For deployments where the page cache lives in front of this service and
/// watches the logs, or has no cache at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRevalidator;

impl PathRevalidator for TracingRevalidator {
    fn revalidate_path(&self, path: &str) {
        tracing::info!(path, "cached path marked stale");
    }
}

/// Revalidator that remembers every path it was asked to invalidate
#[derive(Debug, Clone, Default)]
pub struct RecordingRevalidator {
    paths: Arc<RwLock<Vec<String>>>,
}

impl RecordingRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths revalidated so far, oldest first
    pub fn paths(&self) -> Vec<String> {
        self.paths
            .read()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl PathRevalidator for RecordingRevalidator {
    fn revalidate_path(&self, path: &str) {
        if let Ok(mut paths) = self.paths.write() {
            paths.push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};

    #[test]
    fn test_see_other_redirector_keeps_path() {
        let redirect = SeeOtherRedirector.redirect("/dashboard/invoices");
        assert_eq!(redirect.location(), "/dashboard/invoices");
    }

    #[test]
    fn test_redirect_response_is_303() {
        let response = Redirect::to("/dashboard/invoices").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/dashboard/invoices"
        );
    }

    #[test]
    fn test_recording_revalidator_keeps_order() {
        let revalidator = RecordingRevalidator::new();
        revalidator.revalidate_path("/a");
        revalidator.revalidate_path("/b");
        assert_eq!(revalidator.paths(), ["/a", "/b"]);
    }

    #[test]
    fn test_recording_revalidator_clones_share_state() {
        let revalidator = RecordingRevalidator::new();
        let handle = revalidator.clone();
        handle.revalidate_path("/dashboard/invoices");
        assert_eq!(revalidator.paths().len(), 1);
    }
}
