//! Parameterized statements issued by the invoice actions
//!
//! Each action issues exactly one of these. The SQL text is fixed and uses
//! positional placeholders; values only ever travel as bound parameters.

use crate::core::invoice::InvoiceStatus;

/// A value bound to a statement placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
}

/// The statement shapes the invoice actions can issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceStatement {
    Insert {
        customer_id: String,
        amount: i64,
        status: InvoiceStatus,
        date: String,
    },
    Update {
        id: String,
        customer_id: String,
        amount: i64,
        status: InvoiceStatus,
    },
    Delete {
        id: String,
    },
}

impl InvoiceStatement {
    /// Statement text, `$n` placeholders matching [`params`](Self::params)
    pub fn sql(&self) -> &'static str {
        match self {
            InvoiceStatement::Insert { .. } => {
                "INSERT INTO invoices (customer_id, amount, status, date) \
                 VALUES (CAST($1 AS UUID), $2, $3, CAST($4 AS DATE))"
            }
            InvoiceStatement::Update { .. } => {
                "UPDATE invoices SET customer_id = CAST($1 AS UUID), amount = $2, status = $3 \
                 WHERE id = CAST($4 AS UUID)"
            }
            InvoiceStatement::Delete { .. } => "DELETE FROM invoices WHERE id = CAST($1 AS UUID)",
        }
    }

    /// Bound values, in placeholder order
    pub fn params(&self) -> Vec<SqlParam> {
        match self {
            InvoiceStatement::Insert {
                customer_id,
                amount,
                status,
                date,
            } => vec![
                SqlParam::Text(customer_id.clone()),
                SqlParam::Integer(*amount),
                SqlParam::Text(status.as_str().to_string()),
                SqlParam::Text(date.clone()),
            ],
            InvoiceStatement::Update {
                id,
                customer_id,
                amount,
                status,
            } => vec![
                SqlParam::Text(customer_id.clone()),
                SqlParam::Integer(*amount),
                SqlParam::Text(status.as_str().to_string()),
                SqlParam::Text(id.clone()),
            ],
            InvoiceStatement::Delete { id } => vec![SqlParam::Text(id.clone())],
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            InvoiceStatement::Insert { .. } => "insert",
            InvoiceStatement::Update { .. } => "update",
            InvoiceStatement::Delete { .. } => "delete",
        }
    }
}
