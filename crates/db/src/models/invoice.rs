//! Invoice entity model.
//!
//! There is no separate create/update DTO here: repositories take the
//! validated [`InvoiceInput`](factura_core::validation::InvoiceInput) from
//! `factura-core`, so raw form data can never reach a statement.

use chrono::NaiveDate;
use factura_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `invoices` table.
///
/// `date` keeps its external DD/MM/YYYY shape on the wire; `status` is the
/// stored text value (`Unpaid` or `Paid`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub user_id: DbId,
    pub customer_name: String,
    pub customer_address: String,
    #[serde(with = "factura_core::validation::date_format")]
    pub date: NaiveDate,
    pub invoice_no: String,
    pub description: String,
    pub total: f64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
