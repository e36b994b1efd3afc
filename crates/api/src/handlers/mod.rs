//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers validate input via `factura_core::validation`, delegate to the
//! corresponding repository in `factura_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod invoice;
