// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Authenticated session client for the NDM web API
//!
//! Login is a three step exchange:
//! 1. `GET /auth` either answers 200 (session already valid) or 401 with a
//!    challenge/realm pair and fresh session cookies.
//! 2. `POST /auth` with the login and the challenge digest.
//! 3. `GET /auth` again, which must now answer 200.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, ORIGIN, REFERER};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::RouterConfig;
use crate::error::{AppError, Result};

use super::digest::credential_digest;
use super::query::Query;

const AUTH_PATH: &str = "/auth";
const LOGIN_PATH: &str = "/login";
const DASHBOARD_PATH: &str = "/dashboard";
const RCI_PATH: &str = "/rci/";

const CHALLENGE_HEADER: &str = "X-NDM-Challenge";
const REALM_HEADER: &str = "X-NDM-Realm";

const BROWSER_ACCEPT: &str = "application/json, text/plain, */*";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/95.0.4638.54 Safari/537.36";

/// A cookie carried by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Mutable login state, guarded by the client's mutex
#[derive(Debug, Default)]
struct Session {
    challenge: Option<String>,
    realm: Option<String>,
    cookies: Vec<SessionCookie>,
}

impl Session {
    fn cookie_header(&self) -> Result<Option<HeaderValue>> {
        if self.cookies.is_empty() {
            return Ok(None);
        }
        let joined = self
            .cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined)
            .map(Some)
            .map_err(|_| AppError::Protocol("session cookie is not a valid header value".to_string()))
    }

    /// Appends the cookies the web UI sets once logged in
    fn mark_authorized(&mut self) {
        for (name, value) in [("_authorized", "admin"), ("sysmode", "router")] {
            if !self.cookies.iter().any(|c| c.name == name) {
                self.cookies.push(SessionCookie::new(name, value));
            }
        }
    }
}

/// Outcome of a `GET /auth` probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Authorized,
    Challenged,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    login: &'a str,
    password: &'a str,
}

/// `Origin` and `Referer` values, built once from the endpoint
struct PageHeaders {
    origin: HeaderValue,
    login_referer: HeaderValue,
    dashboard_referer: HeaderValue,
}

impl PageHeaders {
    fn new(endpoint: &str) -> Result<Self> {
        let value = |s: String| {
            HeaderValue::from_str(&s).map_err(|_| {
                AppError::Config(format!("endpoint '{endpoint}' is not a valid header value"))
            })
        };
        Ok(Self {
            origin: value(endpoint.to_string())?,
            login_referer: value(format!("{endpoint}{LOGIN_PATH}"))?,
            dashboard_referer: value(format!("{endpoint}{DASHBOARD_PATH}"))?,
        })
    }
}

/// Keenetic management API client
///
/// Owns the HTTP transport and the session. `authenticate` holds the session
/// lock for the whole three-step exchange; `execute` only takes it to copy
/// the cookie header, so a query never observes a half-replaced jar and two
/// queries never wait on each other.
pub struct KeeneticClient {
    http: reqwest::Client,
    endpoint: String,
    pages: PageHeaders,
    login: String,
    password: SecretString,
    session: Mutex<Session>,
}

impl KeeneticClient {
    /// Creates a client for the configured router
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built, or a
    /// config error if the endpoint cannot be sent as `Origin`/`Referer`.
    pub fn new(config: &RouterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            pages: PageHeaders::new(&endpoint)?,
            endpoint,
            login: config.login.clone(),
            password: config.password.clone(),
            session: Mutex::new(Session::default()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Snapshot of the cookies currently carried by the session
    pub async fn cookies(&self) -> Vec<SessionCookie> {
        self.session.lock().await.cookies.clone()
    }

    /// Runs the full login sequence
    ///
    /// # Errors
    ///
    /// Returns `BadStatus` if any step answers an unexpected status,
    /// `AuthRejected` if the router still challenges after logging in, or a
    /// transport error.
    pub async fn authenticate(&self) -> Result<()> {
        let mut session = self.session.lock().await;

        if self.probe(&mut session).await? == Probe::Authorized {
            tracing::debug!("Session at {} is already authorized", self.endpoint);
            return Ok(());
        }

        self.submit_credentials(&session).await?;

        match self.probe(&mut session).await? {
            Probe::Authorized => {
                tracing::info!("Authenticated to {} as {}", self.endpoint, self.login);
                Ok(())
            }
            Probe::Challenged => {
                tracing::warn!("Router {} rejected login '{}'", self.endpoint, self.login);
                Err(AppError::AuthRejected)
            }
        }
    }

    /// Executes a query and decodes its response
    ///
    /// Does not retry or re-authenticate; a rejected session surfaces as
    /// `BadStatus`.
    ///
    /// # Errors
    ///
    /// Returns a transport error, `BadStatus` for a non-200 answer, or a
    /// decode error for a malformed body.
    pub async fn execute<Q: Query>(&self, query: &Q) -> Result<Q::Response> {
        let cookie = self.session.lock().await.cookie_header()?;

        let mut headers = self.browser_headers(&self.pages.dashboard_referer);
        headers.insert(ORIGIN, self.pages.origin.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(cookie) = cookie {
            headers.insert(COOKIE, cookie);
        }

        tracing::trace!("POST {}{} ({} query)", self.endpoint, RCI_PATH, query.name());
        let response = self
            .http
            .post(self.url(RCI_PATH))
            .headers(headers)
            .body(query.request_body().to_string())
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(bad_status(RCI_PATH, response.status()));
        }

        let body = response.bytes().await?;
        query.decode(&body)
    }

    async fn probe(&self, session: &mut Session) -> Result<Probe> {
        let mut headers = self.browser_headers(&self.pages.login_referer);
        if let Some(cookie) = session.cookie_header()? {
            headers.insert(COOKIE, cookie);
        }

        tracing::trace!("GET {}{}", self.endpoint, AUTH_PATH);
        let response = self
            .http
            .get(self.url(AUTH_PATH))
            .headers(headers)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                session.mark_authorized();
                Ok(Probe::Authorized)
            }
            StatusCode::UNAUTHORIZED => {
                let challenge = required_header(response.headers(), CHALLENGE_HEADER)?;
                let realm = required_header(response.headers(), REALM_HEADER)?;
                tracing::trace!("Received challenge for realm '{}'", realm);
                session.challenge = Some(challenge);
                session.realm = Some(realm);
                session.cookies = response
                    .cookies()
                    .map(|c| SessionCookie::new(c.name(), c.value()))
                    .collect();
                Ok(Probe::Challenged)
            }
            status => Err(bad_status(AUTH_PATH, status)),
        }
    }

    async fn submit_credentials(&self, session: &Session) -> Result<()> {
        let (Some(challenge), Some(realm)) = (&session.challenge, &session.realm) else {
            return Err(AppError::Protocol(
                "login attempted without a challenge".to_string(),
            ));
        };
        let digest = credential_digest(
            &self.login,
            self.password.expose_secret(),
            realm,
            challenge,
        );
        let body = serde_json::to_vec(&LoginBody {
            login: &self.login,
            password: &digest,
        })?;

        let mut headers = self.browser_headers(&self.pages.login_referer);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=UTF-8"),
        );
        headers.insert(ORIGIN, self.pages.origin.clone());
        if let Some(cookie) = session.cookie_header()? {
            headers.insert(COOKIE, cookie);
        }

        tracing::trace!("POST {}{}", self.endpoint, AUTH_PATH);
        let response = self
            .http
            .post(self.url(AUTH_PATH))
            .headers(headers)
            .body(body)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(bad_status(AUTH_PATH, response.status()));
        }
        Ok(())
    }

    /// `Accept` and `Referer` as sent by a web UI page
    fn browser_headers(&self, referer: &HeaderValue) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(REFERER, referer.clone());
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

fn required_header(headers: &HeaderMap, name: &str) -> Result<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| AppError::Protocol(format!("401 response without {name} header")))
}

fn bad_status(path: &str, status: StatusCode) -> AppError {
    AppError::BadStatus {
        path: path.to_string(),
        status: status.as_u16(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_joins_pairs() {
        let session = Session {
            cookies: vec![
                SessionCookie::new("session_id", "abc"),
                SessionCookie::new("_authorized", "admin"),
            ],
            ..Session::default()
        };
        assert_eq!(
            session.cookie_header().unwrap(),
            Some(HeaderValue::from_static("session_id=abc; _authorized=admin"))
        );
    }

    #[test]
    fn test_empty_jar_sends_no_cookie_header() {
        assert!(Session::default().cookie_header().unwrap().is_none());
    }

    #[test]
    fn test_unencodable_cookie_is_protocol_error() {
        let session = Session {
            cookies: vec![SessionCookie::new("session_id", "abc\ndef")],
            ..Session::default()
        };
        assert!(matches!(
            session.cookie_header(),
            Err(AppError::Protocol(_))
        ));
    }

    #[test]
    fn test_mark_authorized_appends_confirmation_cookies() {
        let mut session = Session {
            cookies: vec![SessionCookie::new("session_id", "abc")],
            ..Session::default()
        };
        session.mark_authorized();
        assert_eq!(
            session.cookies,
            vec![
                SessionCookie::new("session_id", "abc"),
                SessionCookie::new("_authorized", "admin"),
                SessionCookie::new("sysmode", "router"),
            ]
        );
    }

    #[test]
    fn test_endpoint_trailing_slash_is_stripped() {
        let client = KeeneticClient::new(&RouterConfig::new("http://router/", "admin", "pw")).unwrap();
        assert_eq!(client.endpoint(), "http://router");
        assert_eq!(client.url(RCI_PATH), "http://router/rci/");
        assert_eq!(client.pages.origin, "http://router");
        assert_eq!(client.pages.login_referer, "http://router/login");
        assert_eq!(client.pages.dashboard_referer, "http://router/dashboard");
    }

    #[test]
    fn test_endpoint_unusable_as_header_is_rejected() {
        let config = RouterConfig::new("http://router\n", "admin", "pw");
        assert!(matches!(
            KeeneticClient::new(&config),
            Err(AppError::Config(_))
        ));
    }
}
