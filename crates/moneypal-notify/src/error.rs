/// Errors that can occur while configuring or using a mail transport.
///
/// # Examples
///
/// ```rust
/// use moneypal_notify::NotifyError;
///
/// let err = NotifyError::InvalidConfig("missing smtp password".to_string());
/// assert!(err.to_string().contains("password"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The mail configuration is missing a required field or inconsistent.
    #[error("notify: invalid mail configuration: {0}")]
    InvalidConfig(String),

    /// A recipient or sender address failed to parse.
    #[error("notify: invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message itself could not be assembled.
    #[error("notify: could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// The SMTP transport rejected or failed to deliver the message.
    #[error("notify: SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Generic delivery error for cases not covered by other variants.
    #[error("notify: {0}")]
    Other(String),
}

/// Convenience `Result` alias for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
