//! ServerBuilder for fluent API to build HTTP servers

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers::AppState;
use super::router::build_action_routes;
use crate::actions::InvoiceActions;
use crate::config::DashboardConfig;
use crate::core::auth::{AuthProvider, NoAuthProvider};
use crate::core::effects::{PathRevalidator, Redirector, SeeOtherRedirector, TracingRevalidator};
use crate::core::service::PersistenceGateway;

/// Builder for the form-action HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(config)
///     .with_gateway(PostgresGateway::connect(&database).await?)
///     .with_auth_provider(MyProvider::new())
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: DashboardConfig,
    gateway: Option<Arc<dyn PersistenceGateway>>,
    revalidator: Arc<dyn PathRevalidator>,
    redirector: Arc<dyn Redirector>,
    auth_provider: Arc<dyn AuthProvider>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
            gateway: None,
            revalidator: Arc::new(TracingRevalidator),
            redirector: Arc::new(SeeOtherRedirector),
            auth_provider: Arc::new(NoAuthProvider),
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the persistence gateway
    ///
    /// Falls back to the in-memory store when the `in-memory` feature is on.
    pub fn with_gateway(mut self, gateway: impl PersistenceGateway + 'static) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    pub fn with_revalidator(mut self, revalidator: impl PathRevalidator + 'static) -> Self {
        self.revalidator = Arc::new(revalidator);
        self
    }

    pub fn with_redirector(mut self, redirector: impl Redirector + 'static) -> Self {
        self.redirector = Arc::new(redirector);
        self
    }

    /// Set the sign-in provider used by `/login`
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Arc::new(provider);
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for pages or endpoints outside the form actions, such as the
    /// invoices listing the actions redirect to.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let gateway = self.take_gateway()?;

        let actions = InvoiceActions::new(gateway, self.revalidator, self.redirector)
            .with_invoices_path(self.config.routes.invoices_path.clone());

        let state = AppState {
            actions,
            auth_provider: self.auth_provider,
        };

        let mut app = build_action_routes(state);
        for routes in self.custom_routes {
            app = app.merge(routes);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    #[cfg(feature = "in-memory")]
    fn take_gateway(&mut self) -> Result<Arc<dyn PersistenceGateway>> {
        Ok(self.gateway.take().unwrap_or_else(|| {
            tracing::warn!("No persistence gateway configured, using in-memory store");
            Arc::new(crate::storage::InMemoryGateway::new())
        }))
    }

    #[cfg(not(feature = "in-memory"))]
    fn take_gateway(&mut self) -> Result<Arc<dyn PersistenceGateway>> {
        self.gateway
            .take()
            .ok_or_else(|| anyhow::anyhow!("PersistenceGateway is required. Call .with_gateway()"))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds `server.bind` from the configuration and stops on SIGTERM or
    /// Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
