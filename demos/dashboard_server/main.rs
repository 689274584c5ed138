//! Dashboard Server Example
//!
//! Serves the invoice form actions and the credentials sign-in:
//! - POST /dashboard/invoices/create
//! - POST /dashboard/invoices/{id}/edit
//! - POST /dashboard/invoices/{id}/delete
//! - POST /login
//!
//! Configuration comes from the YAML file given as first argument (optional),
//! then `DASHBOARD_BIND`, `DATABASE_URL` and `DASHBOARD_LOG`. With a database
//! configured and the `postgres` feature on, invoices go to PostgreSQL;
//! otherwise they live in memory and `GET /dashboard/invoices` lists them.
//!
//! The demo sign-in accepts `DEMO_EMAIL` / `DEMO_PASSWORD`
//! (default `user@nextmail.com` / `123456`).

use anyhow::Result;
use dashboard::core::auth::CREDENTIALS_STRATEGY;
use dashboard::prelude::*;
use tracing_subscriber::EnvFilter;

/// Sign-in against a single fixed account
struct DemoAuthProvider {
    email: String,
    password: String,
}

impl DemoAuthProvider {
    fn from_env() -> Self {
        Self {
            email: std::env::var("DEMO_EMAIL").unwrap_or_else(|_| "user@nextmail.com".into()),
            password: std::env::var("DEMO_PASSWORD").unwrap_or_else(|_| "123456".into()),
        }
    }
}

#[async_trait]
impl AuthProvider for DemoAuthProvider {
    async fn sign_in(&self, strategy: &str, form: &FormData) -> Result<(), SignInError> {
        if strategy != CREDENTIALS_STRATEGY {
            return Err(AuthError::new(AuthErrorKind::Configuration).into());
        }
        let email = form.get("email").unwrap_or_default();
        let password = form.get("password").unwrap_or_default();
        if email.trim() == self.email && password == self.password {
            Ok(())
        } else {
            Err(AuthError::new(AuthErrorKind::CredentialsSignin).into())
        }
    }
}

fn load_config() -> Result<DashboardConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(path)?,
        None => DashboardConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let builder = ServerBuilder::new()
        .with_config(config.clone())
        .with_auth_provider(DemoAuthProvider::from_env());

    let builder = with_storage(builder, &config).await?;

    println!("\n🌐 Server running on http://{}", config.server.bind);
    println!("\n📚 Form actions:");
    println!("    POST {}/create", config.routes.invoices_path);
    println!("    POST {}/{{id}}/edit", config.routes.invoices_path);
    println!("    POST {}/{{id}}/delete", config.routes.invoices_path);
    println!("    POST /login");

    builder.serve().await
}

#[cfg(feature = "postgres")]
async fn with_storage(builder: ServerBuilder, config: &DashboardConfig) -> Result<ServerBuilder> {
    match &config.database {
        Some(database) => {
            let gateway = PostgresGateway::connect(database).await?;
            gateway.migrate().await?;
            tracing::info!("Using PostgreSQL storage");
            Ok(builder.with_gateway(gateway))
        }
        None => Ok(with_memory(builder, config)),
    }
}

#[cfg(not(feature = "postgres"))]
async fn with_storage(builder: ServerBuilder, config: &DashboardConfig) -> Result<ServerBuilder> {
    if config.database.is_some() {
        tracing::warn!("Database configured but the `postgres` feature is off, using memory");
    }
    Ok(with_memory(builder, config))
}

/// In-memory storage plus a JSON listing at the invoices path
fn with_memory(builder: ServerBuilder, config: &DashboardConfig) -> ServerBuilder {
    let gateway = InMemoryGateway::new();
    let listing = gateway.clone();
    let routes = Router::new().route(
        &config.routes.invoices_path,
        get(move || {
            let listing = listing.clone();
            async move { axum::Json(listing.list()) }
        }),
    );
    builder.with_gateway(gateway).with_custom_routes(routes)
}
