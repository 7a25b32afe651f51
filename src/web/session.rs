//! Cookie-backed sessions.
//!
//! The browser only holds `<session-uuid>.<hex HMAC-SHA256>`; the session
//! data itself lives in the server's [`SessionStore`](crate::core::SessionStore).
//! A cookie that is missing, malformed, badly signed or points at an expired
//! session simply starts a new, empty session. Such a session is only stored,
//! and its cookie only set, once a handler puts something into it.

use crate::core::SessionState;
use crate::utils::error::{Result, ShopError};
use crate::web::state::AppState;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "ubermelon_session";

#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            ShopError::SessionError {
                message: format!("unusable secret key: {}", e),
            }
        })?;
        Ok(Self { mac })
    }

    pub fn sign(&self, id: &Uuid) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        format!("{}.{}", id, hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns the session id if the token carries a valid signature.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let (id, signature) = token.split_once('.')?;
        let id = Uuid::parse_str(id).ok()?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(id)
    }
}

/// Finds our cookie among all `Cookie` headers of a request.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// The session of the current request. Handlers change `state` and hand the
/// session back through [`Session::commit`] together with their response.
pub struct Session {
    id: Uuid,
    is_new: bool,
    pub state: SessionState,
}

impl Session {
    pub async fn load(app: &AppState, headers: &HeaderMap) -> Result<Self> {
        if let Some(id) = token_from_headers(headers).and_then(|token| app.signer.verify(token)) {
            if let Some(state) = app.sessions.load(&id).await? {
                return Ok(Self {
                    id,
                    is_new: false,
                    state,
                });
            }
            tracing::debug!(session = %id, "Session cookie points at an unknown or expired session");
        }

        Ok(Self {
            id: Uuid::new_v4(),
            is_new: true,
            state: SessionState::default(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Persists the session and, for a new session, attaches the cookie.
    /// A new session that is still empty is neither stored nor sent.
    pub async fn commit(self, app: &AppState, response: impl IntoResponse) -> Result<Response> {
        if self.is_new && self.state == SessionState::default() {
            return Ok(response.into_response());
        }
        app.sessions.save(&self.id, &self.state).await?;

        let mut response = response.into_response();
        if self.is_new {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                SESSION_COOKIE,
                app.signer.sign(&self.id)
            );
            let value = HeaderValue::from_str(&cookie).map_err(|e| ShopError::SessionError {
                message: format!("cannot build session cookie: {}", e),
            })?;
            response.headers_mut().append(header::SET_COOKIE, value);
        }

        Ok(response)
    }
}
