//! Unified error handling for the directory backend.
//!
//! Provides a single error type that can be flattened into the coarse
//! result codes returned to the directory-protocol layer. Detail stays in
//! the logs; the protocol response only carries what `user_message` allows.

use std::fmt;

use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Directory-protocol result codes produced by this backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LdapResultCode {
    Success,
    OperationsError,
    InvalidCredentials,
    InsufficientAccessRights,
}

impl LdapResultCode {
    /// Numeric code as defined by the protocol
    pub fn code(&self) -> u8 {
        match self {
            LdapResultCode::Success => 0,
            LdapResultCode::OperationsError => 1,
            LdapResultCode::InvalidCredentials => 49,
            LdapResultCode::InsufficientAccessRights => 50,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LdapResultCode::Success)
    }
}

impl fmt::Display for LdapResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LdapResultCode::Success => "success",
            LdapResultCode::OperationsError => "operationsError",
            LdapResultCode::InvalidCredentials => "invalidCredentials",
            LdapResultCode::InsufficientAccessRights => "insufficientAccessRights",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Insufficient access: {0}")]
    InsufficientAccess(String),

    // Structural
    #[error("Invalid DN: {0}")]
    InvalidDn(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // Search
    #[error("{0}")]
    Operations(String),

    // Configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    // External service errors
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Single sign-on error: {0}")]
    Sso(String),
}

impl AppError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InsufficientAccess(_) => "INSUFFICIENT_ACCESS",
            AppError::InvalidDn(_) => "INVALID_DN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Operations(_) => "OPERATIONS_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            #[cfg(feature = "http")]
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Sso(_) => "SSO_ERROR",
        }
    }

    /// Get the protocol result code
    ///
    /// Every credential-relevant failure collapses to `InvalidCredentials`
    /// so callers cannot tell which check failed.
    pub fn result_code(&self) -> LdapResultCode {
        match self {
            AppError::InvalidCredentials
            | AppError::InvalidDn(_)
            | AppError::NotFound(_)
            | AppError::Sso(_) => LdapResultCode::InvalidCredentials,
            #[cfg(feature = "http")]
            AppError::Http(_) => LdapResultCode::InvalidCredentials,
            AppError::InsufficientAccess(_) => LdapResultCode::InsufficientAccessRights,
            _ => LdapResultCode::OperationsError,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Filter errors are the one diagnostic the caller sees
            AppError::Operations(msg) => msg.clone(),

            AppError::InvalidCredentials
            | AppError::InvalidDn(_)
            | AppError::NotFound(_)
            | AppError::Sso(_) => "Invalid credentials".to_string(),
            #[cfg(feature = "http")]
            AppError::Http(_) => "Invalid credentials".to_string(),
            AppError::InsufficientAccess(_) => "Insufficient access".to_string(),

            AppError::Config(msg) | AppError::Validation(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::OutsideBase { .. } | DomainError::ComponentCount { .. } => {
                AppError::InvalidDn(err.to_string())
            }
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, what: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, what: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(what.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn invalid_dn(msg: impl Into<String>) -> Self {
        AppError::InvalidDn(msg.into())
    }

    pub fn insufficient_access(msg: impl Into<String>) -> Self {
        AppError::InsufficientAccess(msg.into())
    }

    pub fn operations(msg: impl Into<String>) -> Self {
        AppError::Operations(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn sso(msg: impl Into<String>) -> Self {
        AppError::Sso(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_errors_become_invalid_credentials() {
        let err: AppError = DomainError::ComponentCount {
            dn: "a,b,c,dc=x".to_string(),
            count: 3,
        }
        .into();

        assert_eq!(err.result_code(), LdapResultCode::InvalidCredentials);
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_lookup_miss_does_not_leak_detail() {
        let err = None::<()>.ok_or_not_found("user alice").unwrap_err();

        assert_eq!(err.result_code(), LdapResultCode::InvalidCredentials);
        assert!(!err.user_message().contains("alice"));
    }

    #[test]
    fn test_operations_error_keeps_message() {
        let err = AppError::operations("unhandled filter type: device");

        assert_eq!(err.result_code(), LdapResultCode::OperationsError);
        assert_eq!(err.user_message(), "unhandled filter type: device");
    }

    #[test]
    fn test_access_error_hides_detail() {
        let err = AppError::insufficient_access("BindDN cn=x not in base");

        assert_eq!(err.result_code(), LdapResultCode::InsufficientAccessRights);
        assert_eq!(err.user_message(), "Insufficient access");
    }

    #[test]
    fn test_numeric_codes() {
        assert_eq!(LdapResultCode::Success.code(), 0);
        assert_eq!(LdapResultCode::InvalidCredentials.code(), 49);
        assert_eq!(LdapResultCode::InsufficientAccessRights.code(), 50);
        assert_eq!(
            LdapResultCode::OperationsError.to_string(),
            "operationsError (1)"
        );
    }
}
