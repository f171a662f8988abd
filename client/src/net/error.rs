//! Client-side error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Only `Network` is produced by transports. The remaining variants are
//! assigned by the flows once they know which endpoint family rejected the
//! call, so views can pick a message without re-inspecting status codes.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure raised by an API call or a browser capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// No response was received (connection refused, CORS, DNS, aborted).
    #[error("network request failed: {0}")]
    Network(String),

    /// An auth endpoint answered with a non-2xx status.
    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// A signup endpoint rejected the submitted payload.
    #[error("registration rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Any other endpoint answered with a non-2xx status.
    #[error("request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Geolocation was denied, timed out, or is unsupported.
    #[error("geolocation unavailable: {0}")]
    CapabilityUnavailable(String),
}

impl ClientError {
    /// Server-supplied message carried by a rejected response, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Auth { message, .. } | Self::Validation { message, .. } | Self::Request { message, .. }
                if !message.is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// HTTP status of a rejected response; `None` when no response arrived.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Validation { status, .. } | Self::Request { status, .. } => {
                Some(*status)
            }
            Self::Network(_) | Self::CapabilityUnavailable(_) => None,
        }
    }
}
