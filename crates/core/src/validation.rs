//! Invoice input validation — pure logic, no database access.
//!
//! Every rule the HTTP layer enforces on invoice input lives here so it can
//! be tested without a transport or store. Handlers pass the raw form fields
//! through [`validate_invoice_input`] and persist only the validated result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// External representation of invoice dates (e.g. `04/11/2025`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Payment status of an invoice.
///
/// Stored as TEXT in the database (`Unpaid` is the column default), so the
/// wire and store representations are the variant names themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
}

impl InvoiceStatus {
    /// The exact string persisted in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Paid => "Paid",
        }
    }

    /// Parse a status string. Anything other than the two known values is a
    /// validation error.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim() {
            "Unpaid" => Ok(InvoiceStatus::Unpaid),
            "Paid" => Ok(InvoiceStatus::Paid),
            _ => Err(CoreError::Validation("Invalid status".into())),
        }
    }
}

/// Raw invoice form fields exactly as received on the wire.
///
/// All fields arrive as strings; parsing and trimming happen in
/// [`validate_invoice_input`], never in handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvoiceInput {
    pub customer_name: String,
    pub customer_address: String,
    pub date: String,
    pub invoice_no: String,
    pub description: String,
    pub total: String,
}

/// Validated invoice fields ready for persistence.
#[derive(Debug, Clone)]
pub struct InvoiceInput {
    pub customer_name: String,
    pub customer_address: String,
    pub date: NaiveDate,
    pub invoice_no: String,
    pub description: String,
    pub total: f64,
}

/// Validate raw invoice input.
///
/// Rules, applied in order:
///
/// 1. all six fields must be non-empty after trimming surrounding whitespace;
/// 2. `total` must parse as a non-negative finite decimal;
/// 3. `date` must parse under the exact format DD/MM/YYYY and name a real
///    calendar date.
///
/// The first failing rule wins; nothing is persisted on failure.
pub fn validate_invoice_input(raw: &RawInvoiceInput) -> Result<InvoiceInput, CoreError> {
    let customer_name = raw.customer_name.trim();
    let customer_address = raw.customer_address.trim();
    let date = raw.date.trim();
    let invoice_no = raw.invoice_no.trim();
    let description = raw.description.trim();
    let total = raw.total.trim();

    let all_present = [
        customer_name,
        customer_address,
        date,
        invoice_no,
        description,
        total,
    ]
    .iter()
    .all(|field| !field.is_empty());

    if !all_present {
        return Err(CoreError::Validation("All fields are required".into()));
    }

    let total = parse_total(total)?;
    let date = parse_date(date)?;

    Ok(InvoiceInput {
        customer_name: customer_name.to_string(),
        customer_address: customer_address.to_string(),
        date,
        invoice_no: invoice_no.to_string(),
        description: description.to_string(),
        total,
    })
}

/// Parse an invoice total: a non-negative finite decimal.
pub fn parse_total(raw: &str) -> Result<f64, CoreError> {
    let total: f64 = raw
        .parse()
        .map_err(|_| CoreError::Validation("Invalid invoice total".into()))?;
    if !total.is_finite() || total < 0.0 {
        return Err(CoreError::Validation("Invalid invoice total".into()));
    }
    Ok(total)
}

/// Parse an invoice date in DD/MM/YYYY format.
///
/// chrono rejects impossible calendar dates (e.g. `31/02/2024`) as well as
/// malformed strings, so both cases surface as the same validation error.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CoreError::Validation("Invalid date, expected DD/MM/YYYY".into()))
}

/// Serde helper keeping the external DD/MM/YYYY shape on [`NaiveDate`] fields.
///
/// Use as `#[serde(with = "factura_core::validation::date_format")]`.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
