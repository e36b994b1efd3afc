//! Repository for the `invoices` table.
//!
//! Every query is scoped to the owning user id, so probing another tenant's
//! invoice id behaves exactly like probing an id that does not exist.

use factura_core::types::DbId;
use factura_core::validation::{InvoiceInput, InvoiceStatus};
use sqlx::PgPool;

use crate::models::invoice::Invoice;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, customer_name, customer_address, date, \
                        invoice_no, description, total, status, created_at, updated_at";

/// Provides owner-scoped CRUD operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice for `owner_id`, returning the created row.
    ///
    /// `status` is left to the column default (`Unpaid`).
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &InvoiceInput,
    ) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices
                (user_id, customer_name, customer_address, date, invoice_no, description, total)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(owner_id)
            .bind(&input.customer_name)
            .bind(&input.customer_address)
            .bind(input.date)
            .bind(&input.invoice_no)
            .bind(&input.description)
            .bind(input.total)
            .fetch_one(pool)
            .await
    }

    /// List all invoices owned by `owner_id`, in insertion order.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single invoice scoped to `(id, owner_id)`.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite all mutable fields of an invoice scoped to `(id, owner_id)`.
    ///
    /// Returns `None` when no owned row matches; the statement touches
    /// nothing in that case.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &InvoiceInput,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                customer_name = $3,
                customer_address = $4,
                date = $5,
                invoice_no = $6,
                description = $7,
                total = $8,
                status = $9,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.customer_name)
            .bind(&input.customer_address)
            .bind(input.date)
            .bind(&input.invoice_no)
            .bind(&input.description)
            .bind(input.total)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete an invoice scoped to `(id, owner_id)`.
    ///
    /// Returns `true` if a row was deleted, `false` when the id was missing
    /// or owned by someone else. The caller decides whether that silence is
    /// worth logging.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
