//! Unified error type for the crate.
//!
//! Every fallible operation returns [`Result<T>`]. Each variant maps to
//! exactly one [`ErrorKind`], which a transport adapter turns into an
//! HTTP status with [`ErrorKind::http_status`]; the Display message is
//! the human-readable side of the same rejection.

use crate::entities::OrderStatus;
use sea_orm::prelude::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Role '{role}' may not perform '{action}'")]
    Forbidden { role: String, action: String },

    #[error("Order {id} belongs to another customer")]
    OrderNotOwned { id: i64 },

    #[error("User '{user}' not found")]
    UserNotFound { user: String },

    #[error("User '{user}' is not on the delivery crew")]
    DeliveryCrewNotFound { user: String },

    #[error("Menu item {id} not found")]
    MenuItemNotFound { id: i64 },

    #[error("Category {id} not found")]
    CategoryNotFound { id: i64 },

    #[error("Order {id} not found")]
    OrderNotFound { id: i64 },

    #[error("Cart is empty, nothing to check out")]
    EmptyCart,

    #[error("Cart changed while checking out, retry")]
    CheckoutConflict,

    #[error("Order {order} cannot move from '{from}' to '{to}'")]
    InvalidTransition {
        order: i64,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("An order with delivery crew cannot be pending")]
    PendingWithCrew,

    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i32 },

    #[error("Price must be positive, got {price}")]
    InvalidPrice { price: Decimal },

    #[error("Title must not be blank")]
    BlankTitle,

    #[error("Request is missing the 'username' field")]
    MissingUsername,

    #[error("Request is missing the 'delivery_crew' field")]
    MissingDeliveryCrew,

    #[error("Request is missing the 'status' field")]
    MissingStatus,

    #[error("Unknown ordering field '{field}'")]
    UnknownOrderingField { field: String },

    #[error("Invalid page window: page {page}, per_page {per_page}")]
    InvalidPage { page: u64, per_page: u64 },
}

/// Coarse classification of an [`Error`], the machine-checkable half of
/// the rejection contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or semantically invalid input
    Validation,
    /// Target absent, or hidden from this caller
    NotFound,
    /// Caller authenticated but not allowed
    Forbidden,
    /// Lost race or illegal state transition
    Conflict,
    /// Storage or configuration failure
    Internal,
}

impl ErrorKind {
    /// Status code a transport adapter should answer with.
    #[must_use]
    pub fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl Error {
    /// Classifies the error for transport mapping and tests.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } | Self::Database(_) => ErrorKind::Internal,
            Self::Forbidden { .. } | Self::OrderNotOwned { .. } => ErrorKind::Forbidden,
            Self::UserNotFound { .. }
            | Self::DeliveryCrewNotFound { .. }
            | Self::MenuItemNotFound { .. }
            | Self::CategoryNotFound { .. }
            | Self::OrderNotFound { .. } => ErrorKind::NotFound,
            Self::CheckoutConflict | Self::InvalidTransition { .. } => ErrorKind::Conflict,
            Self::EmptyCart
            | Self::PendingWithCrew
            | Self::InvalidQuantity { .. }
            | Self::InvalidPrice { .. }
            | Self::BlankTitle
            | Self::MissingUsername
            | Self::MissingDeliveryCrew
            | Self::MissingStatus
            | Self::UnknownOrderingField { .. }
            | Self::InvalidPage { .. } => ErrorKind::Validation,
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_every_status() {
        assert_eq!(ErrorKind::Validation.http_status(), 400);
        assert_eq!(ErrorKind::Forbidden.http_status(), 403);
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::Conflict.http_status(), 409);
        assert_eq!(ErrorKind::Internal.http_status(), 500);
    }

    #[test]
    fn test_denials_are_distinguishable_from_absence() {
        let denied = Error::OrderNotOwned { id: 7 };
        let absent = Error::OrderNotFound { id: 7 };
        assert_eq!(denied.kind(), ErrorKind::Forbidden);
        assert_eq!(absent.kind(), ErrorKind::NotFound);
        assert_ne!(denied.kind().http_status(), absent.kind().http_status());
    }

    #[test]
    fn test_lifecycle_rejections_classify_as_conflict() {
        let err = Error::InvalidTransition {
            order: 1,
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(Error::CheckoutConflict.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_validation_rejections() {
        assert_eq!(Error::EmptyCart.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::InvalidQuantity { quantity: 0 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::MissingUsername.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::InvalidPage {
                page: 0,
                per_page: 2
            }
            .kind(),
            ErrorKind::Validation
        );
    }
}
