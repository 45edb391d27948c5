use thiserror::Error;

/// Errors surfaced by the stores and the lookup services.
///
/// None of these are fatal: a failed operation leaves todos, markers and the
/// color library exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required text field was empty after trimming.
    #[error("{field} must not be empty")]
    InvalidInput { field: &'static str },

    /// The geocoder answered but had no match for the query.
    #[error("no location found for '{query}'")]
    NotFound { query: String },

    /// Network, HTTP or decoding failure in a lookup.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The geolocation provider refused to hand out a position.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

/// Which control triggered a lookup, used to word notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Search,
    Geolocation,
}

impl AppError {
    pub fn invalid_input(field: &'static str) -> Self {
        Self::InvalidInput { field }
    }

    pub fn request_failed(reason: impl std::fmt::Display) -> Self {
        Self::RequestFailed(reason.to_string())
    }

    /// Message shown in the dismissable inline notice.
    pub fn user_message(&self, source: LookupSource) -> String {
        match (self, source) {
            (AppError::InvalidInput { field }, _) => format!("Please enter a {field}."),
            (AppError::NotFound { .. }, _) => {
                "Location not found. Try a different search term.".to_string()
            }
            (AppError::RequestFailed(_), LookupSource::Search) => {
                "Failed to search location. Please try again.".to_string()
            }
            (AppError::RequestFailed(reason), LookupSource::Geolocation) => {
                format!("Location error: {reason}")
            }
            (AppError::PermissionDenied(reason), _) => {
                format!("Location error: permission denied ({reason})")
            }
        }
    }
}

/// Extension trait for turning transport errors into `AppError::RequestFailed`.
pub trait IntoRequestFailed<T> {
    fn or_request_failed(self) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> IntoRequestFailed<T> for Result<T, E> {
    fn or_request_failed(self) -> Result<T, AppError> {
        self.map_err(AppError::request_failed)
    }
}
