//! Error taxonomy for calls against the tracker backend.

/// Everything that can go wrong between a page and the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, CORS).
    #[error("Network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// A 2xx body that is not the JSON we expected.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// The backend answered `{"success": false, "message": ...}`.
    #[error("{0}")]
    Rejected(String),
    /// The resource has no route for this operation.
    #[error("{0} is not supported for this resource")]
    Unsupported(&'static str),
    /// Client-side validation failed before any request was made.
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Bad gateway / gateway timeout: the proxy is up but the backend is not.
    pub fn is_gateway(&self) -> bool {
        matches!(self.status(), Some(502) | Some(504))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_statuses() {
        let err = |status| ApiError::Status {
            status,
            message: String::new(),
        };
        assert!(err(502).is_gateway());
        assert!(err(504).is_gateway());
        assert!(!err(500).is_gateway());
        assert!(!err(503).is_gateway());
        assert!(!ApiError::Network("down".into()).is_gateway());
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 404,
            message: "Timetable entry not found with id: 3".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Timetable entry not found with id: 3");
        assert_eq!(ApiError::Rejected("Invalid username or password".into()).to_string(), "Invalid username or password");
    }
}
