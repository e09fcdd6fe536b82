use super::StorageError;

/// Top-level error type for the lapak backend.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum LapakError {
    #[error("address not found: {id}")]
    AddressNotFound { id: i64 },

    #[error("product not found: {id}")]
    ProductNotFound { id: i64 },

    #[error("order not found: {id}")]
    OrderNotFound { id: i64 },

    #[error("category not found: {id}")]
    CategoryNotFound { id: i64 },

    #[error("store not found for user: {user_id}")]
    StoreNotFound { user_id: i64 },

    #[error("forbidden: {resource} does not belong to the requester")]
    Forbidden { resource: &'static str },

    #[error("invalid price value: {value:?}")]
    InvalidPrice { value: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LapakError {
    /// HTTP status an edge collaborator should respond with for this error.
    ///
    /// A missing order on read is 404; every other client-side failure
    /// (missing address/product during creation, forbidden access, malformed
    /// input) is reported as 400; storage failures are 500.
    pub fn status_code(&self) -> u16 {
        match self {
            LapakError::OrderNotFound { .. } => 404,
            LapakError::AddressNotFound { .. }
            | LapakError::ProductNotFound { .. }
            | LapakError::CategoryNotFound { .. }
            | LapakError::StoreNotFound { .. }
            | LapakError::Forbidden { .. }
            | LapakError::InvalidPrice { .. }
            | LapakError::InvalidInput(_) => 400,
            LapakError::Storage(_) => 500,
        }
    }

    /// True for the not-found family, regardless of entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LapakError::AddressNotFound { .. }
                | LapakError::ProductNotFound { .. }
                | LapakError::OrderNotFound { .. }
                | LapakError::CategoryNotFound { .. }
                | LapakError::StoreNotFound { .. }
        )
    }
}

/// Convenience type alias.
pub type LapakResult<T> = Result<T, LapakError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_per_error_kind() {
        assert_eq!(LapakError::OrderNotFound { id: 1 }.status_code(), 404);
        assert_eq!(LapakError::AddressNotFound { id: 1 }.status_code(), 400);
        assert_eq!(LapakError::Forbidden { resource: "order" }.status_code(), 400);
        assert_eq!(
            LapakError::InvalidPrice { value: "abc".into() }.status_code(),
            400
        );
        let storage = LapakError::Storage(StorageError::Sqlite {
            message: "disk I/O error".into(),
        });
        assert_eq!(storage.status_code(), 500);
    }

    #[test]
    fn not_found_family() {
        assert!(LapakError::ProductNotFound { id: 3 }.is_not_found());
        assert!(!LapakError::Forbidden { resource: "address" }.is_not_found());
    }
}
