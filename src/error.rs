// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for Keenetic Exporter application

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Connection, DNS or timeout failure while talking to the router
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Router answered with an unexpected HTTP status
    #[error("keenetic returned bad status code {status} for {path}")]
    BadStatus { path: String, status: u16 },

    /// Router still demands a challenge after a successful login
    #[error("keenetic rejected the credentials")]
    AuthRejected,

    /// Router response violates the expected wire contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Response body is not the expected JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Background task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = AppError::Config("test error".to_string());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_bad_status_error() {
        let err = AppError::BadStatus {
            path: "/rci/".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "keenetic returned bad status code 500 for /rci/"
        );
    }

    #[test]
    fn test_auth_rejected_error() {
        assert_eq!(
            AppError::AuthRejected.to_string(),
            "keenetic rejected the credentials"
        );
    }

    #[test]
    fn test_decode_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Decode(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_addr_parse_error_conversion() {
        let parse_result = "invalid".parse::<std::net::SocketAddr>();
        assert!(parse_result.is_err());
        let app_err: AppError = parse_result.unwrap_err().into();
        assert!(matches!(app_err, AppError::AddrParse(_)));
    }
}
