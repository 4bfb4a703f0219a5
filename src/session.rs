use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use crate::constants::{FLASH_COOKIE, SESSION_COOKIE};
use crate::security::{sign_payload, verify_payload};
use crate::AppState;

/// Client-held session state, carried in a signed cookie
///
/// The cookie value is `hex(json-payload).hex(hmac-sha256(payload))`. An
/// absent, malformed, or tampered cookie decodes to the empty session, which
/// is indistinguishable from being logged out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Option<u64>,
    pub username: Option<String>,
    /// Id of the initial upload created by the most recent initial-image POST
    pub initial_image_id: Option<u64>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// Serialize and sign into a cookie value
    pub fn encode(&self, secret: &str) -> Option<String> {
        let payload = serde_json::to_vec(self).ok()?;
        let signature = sign_payload(&payload, secret);
        Some(format!("{}.{}", hex::encode(&payload), signature))
    }

    /// Decode and verify a cookie value; any failure yields None
    pub fn decode(value: &str, secret: &str) -> Option<Self> {
        let (payload_hex, signature) = value.split_once('.')?;
        let payload = hex::decode(payload_hex).ok()?;

        if !verify_payload(&payload, signature, secret) {
            tracing::warn!("Session cookie failed signature verification");
            return None;
        }

        serde_json::from_slice(&payload).ok()
    }

    /// Build the Set-Cookie for this session state
    pub fn to_cookie(&self, secret: &str) -> Cookie<'static> {
        let value = self.encode(secret).unwrap_or_default();
        let mut cookie = Cookie::new(SESSION_COOKIE, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie
    }

    /// Add the session cookie to a jar, returning the updated jar
    pub fn write_to(&self, jar: CookieJar, secret: &str) -> CookieJar {
        jar.add(self.to_cookie(secret))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = jar
            .get(SESSION_COOKIE)
            .and_then(|c| Session::decode(c.value(), &state.config.session_secret_key))
            .unwrap_or_default();
        Ok(session)
    }
}

// =============================================================================
// Flash Messages
// =============================================================================

/// Severity of a flash message, mirrored into the rendered page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

/// One-shot user-facing message, set on redirect and cleared by the next
/// page GET that reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub message: String,
    pub level: FlashLevel,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: FlashLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: FlashLevel::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: FlashLevel::Info,
        }
    }

    fn to_cookie(&self) -> Option<Cookie<'static>> {
        let payload = serde_json::to_vec(self).ok()?;
        let mut cookie = Cookie::new(FLASH_COOKIE, hex::encode(payload));
        cookie.set_path("/");
        Some(cookie)
    }

    fn from_cookie_value(value: &str) -> Option<Self> {
        let payload = hex::decode(value).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    /// Add this flash to a jar, returning the updated jar
    pub fn write_to(&self, jar: CookieJar) -> CookieJar {
        match self.to_cookie() {
            Some(cookie) => jar.add(cookie),
            None => jar,
        }
    }

    /// Build a redirect response that also sets this flash
    ///
    /// Used from error conversion, where no cookie jar is in scope.
    pub fn into_redirect(self, target: &str) -> Response {
        let mut response = Redirect::to(target).into_response();
        if let Some(cookie) = self.to_cookie() {
            if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }
}

/// Read and clear the pending flash message, if any
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|c| Flash::from_cookie_value(c.value()));

    if flash.is_some() {
        let mut removal = Cookie::new(FLASH_COOKIE, "");
        removal.set_path("/");
        (jar.remove(removal), flash)
    } else {
        (jar, flash)
    }
}
