//! HTTP transport for the auth endpoints.
//!
//! Provides [`AuthBackend`], a thin JSON/HTTP layer over the backend's
//! auth routes. Session logic stays in the sans-IO [`crate::SessionClient`];
//! this module only performs requests and maps failures into
//! [`AuthError`].
//!
//! Every request is bounded by [`REQUEST_TIMEOUT`] so a hanging backend
//! cannot leave the session in `Checking` indefinitely.

use std::time::Duration;

use lexyvoz_core::{AuthError, UserProfile, UserWire};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{RegisterRequest, SessionGrant};

/// Upper bound for every auth request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport construction errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    Setup(String),
}

/// Login request body.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    correo: &'a str,
    password: &'a str,
}

/// Login/register response: a token plus the user fields inline.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    #[serde(flatten)]
    user: UserWire,
}

/// HTTP client for the auth endpoints.
pub struct AuthBackend {
    http: reqwest::Client,
    base_url: String,
}

impl AuthBackend {
    /// Create a backend client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// `POST /auth/login` - exchange credentials for a grant.
    pub async fn login(&self, correo: &str, password: &str) -> Result<SessionGrant, AuthError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest { correo, password })
            .send()
            .await
            .map_err(map_request_error)?;

        let body: AuthResponse = check_status(response)?.json().await.map_err(map_request_error)?;
        Ok(SessionGrant { token: body.token, user: UserProfile::from(body.user) })
    }

    /// `GET /auth/check-status` - verify a token, returning the refreshed
    /// profile.
    pub async fn check_status(&self, token: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .http
            .get(format!("{}/auth/check-status", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_request_error)?;

        let wire: UserWire = check_status(response)?.json().await.map_err(map_request_error)?;
        Ok(UserProfile::from(wire))
    }

    /// `POST /auth/register` - create an account, returning a grant.
    pub async fn register(&self, request: &RegisterRequest) -> Result<SessionGrant, AuthError> {
        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(map_request_error)?;

        let body: AuthResponse = check_status(response)?.json().await.map_err(map_request_error)?;
        Ok(SessionGrant { token: body.token, user: UserProfile::from(body.user) })
    }

    /// `POST /auth/logout` - best-effort server-side revoke.
    ///
    /// Logout succeeds locally regardless of this call's outcome; the
    /// caller fires it and may ignore the result.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(format!("{}/auth/logout", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_request_error)?;

        check_status(response).map(|_| ())
    }
}

/// Map HTTP status codes into the auth error taxonomy.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(AuthError::InvalidCredentials);
    }
    Err(AuthError::Network { reason: format!("unexpected status {status}") })
}

/// Map reqwest failures into the auth error taxonomy.
fn map_request_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::Timeout { elapsed: REQUEST_TIMEOUT }
    } else if err.is_decode() {
        AuthError::MalformedResponse { reason: err.to_string() }
    } else {
        AuthError::Network { reason: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_flattens_user_fields() {
        let body = r#"{
            "token": "abc",
            "usuario_id": 2,
            "nombre": "Sol",
            "correo": "sol@lexyvoz.test",
            "tipo": "Administrador"
        }"#;

        let parsed: AuthResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.token, "abc");

        let profile = UserProfile::from(parsed.user);
        assert_eq!(profile.role(), lexyvoz_core::Role::Admin);
    }
}
