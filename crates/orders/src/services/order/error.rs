//! Order workflow errors.

use thiserror::Error;

use eshop_core::OrderId;

use crate::db::RepositoryError;

/// Errors surfaced by the order workflow.
///
/// Notification failure is deliberately absent: confirmation email is
/// best-effort and never fails a checkout that has already persisted.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A selection token did not resolve to a catalog entry.
    #[error("no good matches selection '{0}'")]
    GoodNotFound(String),

    /// An order id did not resolve to a persisted order.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// The store or catalog failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
