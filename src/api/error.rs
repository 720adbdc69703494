use thiserror::Error;

/// Errors surfaced by the Photo API
///
/// Every variant is plain data so it can travel inside iced messages
/// and be stored on loader state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network error, non-2xx status, or an undecodable body
    #[error("{message}")]
    FetchFailed {
        /// HTTP status, if the server answered at all
        status: Option<u16>,
        message: String,
    },

    /// Detail lookup for an id that doesn't exist
    #[error("Photo not found")]
    NotFound { id: String },
}

impl ApiError {
    /// Build a failure for a non-success HTTP status
    ///
    /// `what` names the resource, e.g. "photos" gives
    /// "Failed to fetch photos: Service Unavailable".
    pub fn from_status(what: &str, status: u16, reason: Option<&str>) -> Self {
        let reason = reason
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::FetchFailed {
            status: Some(status),
            message: format!("Failed to fetch {}: {}", what, reason),
        }
    }

    /// Build a failure for an error that happened before any response arrived
    pub fn transport(what: &str, err: impl std::fmt::Display) -> Self {
        ApiError::FetchFailed {
            status: None,
            message: format!("Failed to fetch {}: {}", what, err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::FetchFailed { status, .. } => *status,
            ApiError::NotFound { .. } => Some(404),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = ApiError::from_status("photos", 503, Some("Service Unavailable"));
        assert_eq!(err.to_string(), "Failed to fetch photos: Service Unavailable");
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_status_without_reason() {
        let err = ApiError::from_status("photo", 599, None);
        assert_eq!(err.to_string(), "Failed to fetch photo: HTTP 599");
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::NotFound { id: "999".to_string() };
        assert_eq!(err.to_string(), "Photo not found");
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }
}
