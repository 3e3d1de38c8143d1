//! # Client Errors
//!
//! Every operation fails with one of three kinds. Invalid parameters are usually caught
//! locally before any request is built; authorization and server faults are whatever the
//! remote service reported, passed through unchanged.

/// Errors raised by entity clients and invokers.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required identifier, name or paging bound is missing or malformed.
    #[error("Invalid parameter {parameter} passed to {method}: {reason}")]
    InvalidParameter {
        method: String,
        parameter: String,
        reason: String,
    },

    /// The remote service rejected the caller's identity or permissions.
    #[error("User {user_id} is not authorized to issue {method}: {message}")]
    NotAuthorized {
        method: String,
        user_id: String,
        message: String,
    },

    /// Any other remote-side failure, including not-found and transport problems.
    #[error("Server fault in {method}{}: {message}", status_suffix(.status))]
    ServerFault {
        method: String,
        status: Option<u16>,
        message: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl ClientError {
    pub fn invalid(method: &str, parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            method: method.to_string(),
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_authorized(method: &str, user_id: &str, message: impl Into<String>) -> Self {
        Self::NotAuthorized {
            method: method.to_string(),
            user_id: user_id.to_string(),
            message: message.into(),
        }
    }

    pub fn server_fault(method: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::ServerFault {
            method: method.to_string(),
            status,
            message: message.into(),
        }
    }

    /// Not-found as reported by the server.
    pub fn not_found(method: &str, guid: &str) -> Self {
        Self::server_fault(method, Some(404), format!("no element with GUID {guid}"))
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Self::NotAuthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ServerFault { status: Some(404), .. })
    }

    /// Name of the operation that failed.
    pub fn method(&self) -> &str {
        match self {
            Self::InvalidParameter { method, .. }
            | Self::NotAuthorized { method, .. }
            | Self::ServerFault { method, .. } => method,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_when_known() {
        let err = ClientError::not_found("getTopicByGUID", "abc");
        assert_eq!(
            err.to_string(),
            "Server fault in getTopicByGUID (HTTP 404): no element with GUID abc"
        );
        assert!(err.is_not_found());

        let err = ClientError::server_fault("findTopics", None, "connection refused");
        assert_eq!(err.to_string(), "Server fault in findTopics: connection refused");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_method_accessor() {
        let err = ClientError::invalid("createTopic", "qualifiedName", "must not be empty");
        assert_eq!(err.method(), "createTopic");
        assert!(err.is_invalid_parameter());
    }
}
