//! Contract error types for inventory service
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! Problem Details responses.

use thiserror::Error;

/// Inventory service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Product, movement, user or other record not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (product, user, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Duplicate or otherwise conflicting state
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Input rejected before touching storage
    #[error("Validation error: {message}")]
    Validation { message: String },
    /// Not enough stock for a sale
    #[error("Insufficient stock for '{product}': available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },
    /// Missing, invalid or expired credentials
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },
    /// Authenticated but not allowed
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },
    /// Storage or other unexpected failure (details are logged, not exposed)
    #[error("Internal error")]
    Internal,
}

impl InventoryError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }
}

/// Log a storage failure and collapse it into [`InventoryError::Internal`].
/// Domain errors raised by a repository pass through unchanged.
pub(crate) fn internal(error: anyhow::Error) -> InventoryError {
    if let Some(domain) = error.downcast_ref::<InventoryError>() {
        return domain.clone();
    }
    tracing::error!(error = ?error, "inventory storage failure");
    InventoryError::Internal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_keeps_wrapped_domain_errors() {
        let wrapped = anyhow::Error::new(InventoryError::conflict("Username already exists"));
        assert_eq!(
            internal(wrapped),
            InventoryError::conflict("Username already exists")
        );

        let storage = anyhow::anyhow!("connection reset");
        assert_eq!(internal(storage), InventoryError::Internal);
    }
}
