//! Integration tests for the PostgreSQL gateway.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a PostgreSQL container)
//! - Feature flag `postgres` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features postgres --test postgres_tests -- --test-threads=1
//! ```
//!
//! All tests share a single PostgreSQL container (via `OnceLock`). Each test
//! creates a fresh `PgPool` and truncates the invoices table before running.

#![cfg(feature = "postgres")]

use dashboard::actions::{ActionOutcome, InvoiceActions};
use dashboard::core::effects::{RecordingRevalidator, SeeOtherRedirector};
use dashboard::core::form::FormData;
use dashboard::core::invoice::{self, InvoiceStatus};
use dashboard::core::service::PersistenceGateway;
use dashboard::core::statement::InvoiceStatement;
use dashboard::storage::PostgresGateway;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::sync::{Arc, OnceLock};
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh pool per test)
// ---------------------------------------------------------------------------

struct PgTestEnv {
    /// Dropping this stops the container
    _container: testcontainers::ContainerAsync<Postgres>,
    connection_url: String,
}

/// Stored in a std `OnceLock` so the container outlives the runtime of the
/// test that started it
static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    PostgresGateway::new(pool.clone())
        .migrate()
        .await
        .expect("Failed to run migrations");
    pool.close().await;

    let _ = TEST_ENV.set(PgTestEnv {
        _container: container,
        connection_url: url,
    });
    TEST_ENV.get().unwrap()
}

/// Fresh pool bound to the current runtime, invoices table emptied
async fn clean_pool() -> PgPool {
    let env = init_pg_env().await;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&env.connection_url)
        .await
        .expect("Failed to connect to PostgreSQL");
    sqlx::query("TRUNCATE invoices")
        .execute(&pool)
        .await
        .expect("Failed to truncate invoices table");
    pool
}

async fn only_invoice(pool: &PgPool) -> (String, String, i32, String, String) {
    let row = sqlx::query(
        "SELECT id::text AS id, customer_id::text AS customer_id, amount, status, \
         to_char(date, 'YYYY-MM-DD') AS date FROM invoices",
    )
    .fetch_one(pool)
    .await
    .expect("exactly one invoice");
    (
        row.get("id"),
        row.get("customer_id"),
        row.get("amount"),
        row.get("status"),
        row.get("date"),
    )
}

fn insert(amount: i64) -> InvoiceStatement {
    InvoiceStatement::Insert {
        customer_id: CUSTOMER.to_string(),
        amount,
        status: InvoiceStatus::Pending,
        date: "2024-06-01".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_insert_update_delete() {
    let gateway = PostgresGateway::new(clean_pool().await);

    assert_eq!(gateway.execute(insert(4500)).await.unwrap(), 1);
    let (id, customer_id, amount, status, date) = only_invoice(gateway.pool()).await;
    assert_eq!(customer_id, CUSTOMER);
    assert_eq!(amount, 4500);
    assert_eq!(status, "pending");
    assert_eq!(date, "2024-06-01");

    let rows = gateway
        .execute(InvoiceStatement::Update {
            id: id.clone(),
            customer_id: CUSTOMER.to_string(),
            amount: 99,
            status: InvoiceStatus::Paid,
        })
        .await
        .unwrap();
    assert_eq!(rows, 1);
    let (_, _, amount, status, date) = only_invoice(gateway.pool()).await;
    assert_eq!(amount, 99);
    assert_eq!(status, "paid");
    assert_eq!(date, "2024-06-01");

    let rows = gateway
        .execute(InvoiceStatement::Delete { id })
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_unknown_id_affects_no_rows() {
    let pool = clean_pool().await;
    let gateway = PostgresGateway::new(pool);

    let rows = gateway
        .execute(InvoiceStatement::Delete {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_malformed_id_is_a_query_error() {
    let pool = clean_pool().await;
    let gateway = PostgresGateway::new(pool);

    let err = gateway
        .execute(InvoiceStatement::Delete {
            id: "not-a-uuid".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("PostgreSQL query error"));
}

#[tokio::test]
async fn test_non_positive_amount_refused_by_table() {
    let pool = clean_pool().await;
    let gateway = PostgresGateway::new(pool);
    assert!(gateway.execute(insert(0)).await.is_err());
}

#[tokio::test]
async fn test_largest_accepted_amount_fits_column() {
    let gateway = PostgresGateway::new(clean_pool().await);

    assert_eq!(
        gateway.execute(insert(invoice::MAX_AMOUNT_CENTS)).await.unwrap(),
        1
    );
    let (_, _, amount, _, _) = only_invoice(gateway.pool()).await;
    assert_eq!(i64::from(amount), invoice::MAX_AMOUNT_CENTS);
}

// ---------------------------------------------------------------------------
// Actions against PostgreSQL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_action_persists_row() {
    let gateway = PostgresGateway::new(clean_pool().await);
    let revalidator = RecordingRevalidator::new();
    let actions = InvoiceActions::new(
        Arc::new(gateway.clone()),
        Arc::new(revalidator.clone()),
        Arc::new(SeeOtherRedirector),
    );

    let form = FormData::new()
        .with("customerId", CUSTOMER)
        .with("amount", "45.00")
        .with("status", "paid");
    let outcome = actions.create_invoice(&form).await;

    assert!(matches!(outcome, ActionOutcome::Redirected(_)));
    let (_, customer_id, amount, status, date) = only_invoice(gateway.pool()).await;
    assert_eq!(customer_id, CUSTOMER);
    assert_eq!(amount, 4500);
    assert_eq!(status, "paid");
    assert_eq!(date, invoice::today());
    assert_eq!(revalidator.paths(), ["/dashboard/invoices"]);
}

#[tokio::test]
async fn test_create_action_with_unknown_customer_format_fails_softly() {
    let pool = clean_pool().await;
    let revalidator = RecordingRevalidator::new();
    let actions = InvoiceActions::new(
        Arc::new(PostgresGateway::new(pool)),
        Arc::new(revalidator.clone()),
        Arc::new(SeeOtherRedirector),
    );

    let form = FormData::new()
        .with("customerId", "customer-7")
        .with("amount", "10")
        .with("status", "pending");
    let outcome = actions.create_invoice(&form).await;

    let state = outcome.form_state().expect("form state");
    assert_eq!(
        state.message.as_deref(),
        Some("Database Error: Failed to Create Invoice.")
    );
    assert!(revalidator.paths().is_empty());
}
