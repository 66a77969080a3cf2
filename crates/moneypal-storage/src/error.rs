/// Errors produced by the storage layer.
///
/// # Examples
///
/// ```rust
/// use moneypal_storage::StorageError;
///
/// let err = StorageError::InvalidColumn {
///     column: "type",
///     message: "unknown notification kind: push".to_string(),
/// };
/// assert!(err.to_string().contains("type"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An underlying database error (connectivity, constraint, migration).
    #[error("storage: database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// A stored value could not be mapped back into its domain type.
    #[error("storage: invalid value in column '{column}': {message}")]
    InvalidColumn {
        column: &'static str,
        message: String,
    },
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
