//! Handlers for the `/invoices` resource.
//!
//! Every operation runs as an authenticated principal ([`AuthUser`]) and every
//! repository call is scoped to that principal's user id, so another tenant's
//! invoice ids behave exactly like ids that do not exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use factura_core::error::CoreError;
use factura_core::types::DbId;
use factura_core::validation::{validate_invoice_input, InvoiceStatus, RawInvoiceInput};
use factura_db::models::invoice::Invoice;
use factura_db::repositories::InvoiceRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /invoices/{id}`: the six form fields plus a status.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    #[serde(flatten)]
    pub fields: RawInvoiceInput,
    pub status: String,
}

/// GET /api/v1/invoices
///
/// All invoices owned by the principal, in insertion order.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = InvoiceRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(invoices))
}

/// POST /api/v1/invoices
///
/// Validate and create an invoice for the principal. New invoices always
/// start as `Unpaid`. Validation failures persist nothing.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RawInvoiceInput>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    let validated = validate_invoice_input(&input)?;
    let invoice = InvoiceRepo::create(&state.pool, user.user_id, &validated).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invoice>> {
    let invoice = InvoiceRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(invoice))
}

/// PUT /api/v1/invoices/{id}
///
/// Overwrite all mutable fields of an owned invoice, including its status.
/// The target is resolved first: an id that is missing or owned by another
/// user yields the same 404 before any validation output can leak.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoiceRequest>,
) -> AppResult<Json<Invoice>> {
    InvoiceRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    let validated = validate_invoice_input(&input.fields)?;
    let status = InvoiceStatus::parse(&input.status)?;

    // The row can vanish between resolve and write (a racing delete); the
    // scoped update reports that as the same not-found.
    let invoice = InvoiceRepo::update(&state.pool, user.user_id, id, &validated, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(invoice))
}

/// DELETE /api/v1/invoices/{id}
///
/// Deleting a missing or foreign-owned id is a deliberate no-op: the end
/// state (no such owned invoice) already holds, so the response is 204
/// either way and the miss is only logged.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InvoiceRepo::delete(&state.pool, user.user_id, id).await?;
    if !deleted {
        tracing::debug!(
            invoice_id = id,
            user_id = user.user_id,
            "Delete no-op: invoice missing or not owned by caller"
        );
    }
    Ok(StatusCode::NO_CONTENT)
}
