//! Invoice records and the invoice form schema

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

use crate::core::validation::{FieldRule, Schema, filters, validators};

pub const CUSTOMER_MESSAGE: &str = "Please Select A Customer.";
pub const AMOUNT_INVALID_MESSAGE: &str = "Please Enter A Valid Amount.";
pub const AMOUNT_MESSAGE: &str = "Please Enter An Amount Greater Than $0";
pub const STATUS_MESSAGE: &str = "Please Select An Invoice Status.";

/// Largest amount in cents the `amount` column (INTEGER) can hold
pub const MAX_AMOUNT_CENTS: i64 = i32::MAX as i64;

/// Date format of the `date` column (ISO-8601 calendar date, no time)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: &'static [&'static str] = &["pending", "paid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored invoice
///
/// `amount` is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

/// Caller-supplied invoice fields, after validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: String,
    /// Decimal amount in currency units
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Amount converted to whole cents, `None` when out of range
    pub fn amount_cents(&self) -> Option<i64> {
        to_cents(self.amount)
    }
}

/// Convert a decimal currency amount to integer cents, rounding to nearest
///
/// `None` when the magnitude exceeds [`MAX_AMOUNT_CENTS`].
pub fn to_cents(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    (cents.abs() <= MAX_AMOUNT_CENTS as f64).then_some(cents as i64)
}

/// Today's UTC date as stored in the `date` column
pub fn today() -> String {
    format_date(chrono::Utc::now().date_naive())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

static INVOICE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(FieldRule::new("id", filters::string("Invalid invoice id.")))
        .field(FieldRule::new("customerId", filters::string(CUSTOMER_MESSAGE)))
        .field(
            FieldRule::new("amount", filters::number(AMOUNT_INVALID_MESSAGE))
                .check(validators::gt(0.0, AMOUNT_MESSAGE))
                .check(|_: &str, value: &Value| match value.as_f64() {
                    Some(amount) if amount > 0.0 => match to_cents(amount) {
                        // below half a cent would be stored as zero
                        Some(0) => Err(AMOUNT_MESSAGE.to_string()),
                        Some(_) => Ok(()),
                        None => Err(AMOUNT_INVALID_MESSAGE.to_string()),
                    },
                    _ => Ok(()),
                }),
        )
        .field(
            FieldRule::new("status", filters::string(STATUS_MESSAGE))
                .check(validators::one_of(InvoiceStatus::ALL, STATUS_MESSAGE)),
        )
        .field(
            FieldRule::new("date", filters::string("Invalid invoice date."))
                .check(validators::date_format(DATE_FORMAT)),
        )
});

static CREATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| INVOICE_SCHEMA.omit(&["id", "date"]));

static UPDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| INVOICE_SCHEMA.omit(&["id", "date"]));

/// Full invoice schema, including the system-assigned `id` and `date`
pub fn invoice_schema() -> &'static Schema {
    &INVOICE_SCHEMA
}

/// Fields a caller supplies when creating an invoice
pub fn create_invoice_schema() -> &'static Schema {
    &CREATE_SCHEMA
}

/// Fields a caller supplies when updating an invoice
pub fn update_invoice_schema() -> &'static Schema {
    &UPDATE_SCHEMA
}
