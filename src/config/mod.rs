// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for Keenetic Exporter application
//!
//! Loads and parses configuration from environment variables and JSON.

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, Result};


/// Default configuration values
pub mod defaults {
    pub const SERVER_ADDR: &str = "0.0.0.0:2112";
    pub const KEENETIC_LOGIN: &str = "admin";
    pub const KEENETIC_PASSWORD: &str = "";
    pub const SYSTEM_POLL_INTERVAL_SECS: u64 = 4;
    pub const TRAFFIC_POLL_INTERVAL_SECS: u64 = 2;
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
    pub const KEENETIC_ENDPOINT: &str = "KEENETIC_ENDPOINT";
    pub const KEENETIC_LOGIN: &str = "KEENETIC_LOGIN";
    pub const KEENETIC_PASSWORD: &str = "KEENETIC_PASSWORD";
    pub const KEENETIC_INTERFACES: &str = "KEENETIC_INTERFACES";
    pub const KEENETIC_DEVICES: &str = "KEENETIC_DEVICES";
    pub const SYSTEM_POLL_INTERVAL: &str = "SYSTEM_POLL_INTERVAL_SECONDS";
    pub const TRAFFIC_POLL_INTERVAL: &str = "TRAFFIC_POLL_INTERVAL_SECONDS";
    pub const HTTP_TIMEOUT: &str = "HTTP_TIMEOUT_SECONDS";
}

/// Maps an opaque router-side identifier to a human label
///
/// `code` is what the router understands (a port name such as
/// `GigabitEthernet0/Vlan4`, or a client MAC address); `name` is the label
/// written into emitted metrics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedEndpoint {
    pub name: String,
    pub code: String,
}

impl NamedEndpoint {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// Validates a named endpoint
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("Empty name for code '{}'", self.code));
        }
        if self.code.trim().is_empty() {
            return Err(format!("Empty code for '{}'", self.name));
        }
        Ok(())
    }
}

/// Connection settings for the router management API
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub endpoint: String,
    pub login: String,
    pub password: SecretString,
    pub timeout: Duration,
}

impl RouterConfig {
    pub fn new(endpoint: impl Into<String>, login: impl Into<String>, password: &str) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            login: login.into(),
            password: SecretString::from(password.to_string()),
            timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
        }
    }

    /// Validates router configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!(
                "Invalid endpoint '{}': expected 'http://host' or 'https://host'",
                self.endpoint
            ));
        }

        if self.login.trim().is_empty() {
            return Err("Login cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Application-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub router: RouterConfig,
    pub interfaces: Vec<NamedEndpoint>,
    pub devices: Vec<NamedEndpoint>,
    pub system_interval_secs: u64,
    pub traffic_interval_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr =
            lookup(env_vars::SERVER_ADDR).unwrap_or_else(|| defaults::SERVER_ADDR.to_string());

        let endpoint = lookup(env_vars::KEENETIC_ENDPOINT).ok_or_else(|| {
            AppError::Config(format!("{} is not set", env_vars::KEENETIC_ENDPOINT))
        })?;
        let login = lookup(env_vars::KEENETIC_LOGIN)
            .unwrap_or_else(|| defaults::KEENETIC_LOGIN.to_string());
        let password = lookup(env_vars::KEENETIC_PASSWORD)
            .unwrap_or_else(|| defaults::KEENETIC_PASSWORD.to_string());

        let mut router = RouterConfig::new(endpoint, login, &password);
        router.timeout = Duration::from_secs(parse_secs(
            &lookup,
            env_vars::HTTP_TIMEOUT,
            defaults::HTTP_TIMEOUT_SECS,
        )?);
        router.validate().map_err(AppError::Config)?;

        let interfaces = parse_endpoints(&lookup, env_vars::KEENETIC_INTERFACES)?;
        let devices = parse_endpoints(&lookup, env_vars::KEENETIC_DEVICES)?;

        if interfaces.is_empty() && devices.is_empty() {
            tracing::warn!(
                "No interfaces or devices configured. Only system metrics will be exported."
            );
        }

        Ok(Config {
            server_addr,
            router,
            interfaces,
            devices,
            system_interval_secs: parse_secs(
                &lookup,
                env_vars::SYSTEM_POLL_INTERVAL,
                defaults::SYSTEM_POLL_INTERVAL_SECS,
            )?,
            traffic_interval_secs: parse_secs(
                &lookup,
                env_vars::TRAFFIC_POLL_INTERVAL,
                defaults::TRAFFIC_POLL_INTERVAL_SECS,
            )?,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(AppError::Config(format!("{key} must be greater than zero"))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(AppError::Config(format!("Invalid {key} '{raw}': {e}"))),
    }
}

fn parse_endpoints<F>(lookup: &F, key: &str) -> Result<Vec<NamedEndpoint>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(Vec::new());
    };
    let endpoints: Vec<NamedEndpoint> = serde_json::from_str(&raw)
        .map_err(|e| AppError::Config(format!("Failed to parse {key}: {e}")))?;
    for endpoint in &endpoints {
        endpoint
            .validate()
            .map_err(|e| AppError::Config(format!("Invalid entry in {key}: {e}")))?;
    }
    Ok(endpoints)
}
