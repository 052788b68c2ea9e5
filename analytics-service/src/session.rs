//! Session identity read from the externally-issued `user` cookie.
//!
//! The cookie is set by a separate subsystem and is not validated against
//! any session store here. A missing or malformed cookie degrades to the
//! anonymous identity instead of rejecting the request.

use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

pub const SESSION_COOKIE: &str = "user";

/// Outcome of parsing the session cookie, explicit at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIdentity {
    User(i64),
    Anonymous,
}

#[derive(Deserialize)]
struct SessionCookie {
    id: i64,
}

impl SessionIdentity {
    /// Parse the `user` cookie, whose value is a JSON object `{"id": <n>}`.
    pub fn from_jar(jar: &CookieJar) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return SessionIdentity::Anonymous;
        };

        match serde_json::from_str::<SessionCookie>(cookie.value()) {
            Ok(session) => SessionIdentity::User(session.id),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed session cookie");
                SessionIdentity::Anonymous
            }
        }
    }

    /// The identifier used to scope internal calls; 0 for anonymous.
    pub fn user_id(&self) -> i64 {
        match self {
            SessionIdentity::User(id) => *id,
            SessionIdentity::Anonymous => 0,
        }
    }
}
