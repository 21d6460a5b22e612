//! Structured error type for simulation service calls.

use thiserror::Error;

/// Failure of a single request to the simulation service.
///
/// Displayed verbatim in the theoretical results container, in the TUI error
/// history and on CLI stderr.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response: connection refused, timeout,
    /// malformed request.
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("invalid response from {endpoint}: {message}")]
    Parse {
        endpoint: &'static str,
        message: String,
    },

    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Short category tag for compact displays.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Transport(_) | ApiError::InvalidBaseUrl(_) => "NET",
            ApiError::HttpStatus { .. } => "HTTP",
            ApiError::Parse { .. } => "PARSE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_displays_code_only() {
        assert_eq!(ApiError::HttpStatus { status: 500 }.to_string(), "HTTP 500");
        assert_eq!(ApiError::HttpStatus { status: 404 }.category(), "HTTP");
    }

    #[test]
    fn parse_error_names_endpoint() {
        let err = ApiError::Parse {
            endpoint: "/api/ciclo-diario",
            message: "missing field `horas`".into(),
        };
        assert!(err.to_string().contains("/api/ciclo-diario"));
        assert_eq!(err.category(), "PARSE");
    }
}
