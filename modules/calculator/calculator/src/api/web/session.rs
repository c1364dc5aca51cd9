use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderName;
use calculator_sdk::SessionId;

pub const SESSION_COOKIE: &str = "calculator_session";

/// Session id carried by the browser; a fresh one is minted when the cookie
/// is missing or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie {
    pub id: SessionId,
    pub is_new: bool,
}

impl SessionCookie {
    /// Parse the session id out of a `Cookie` header value.
    #[must_use]
    pub fn find(cookie_header: &str) -> Option<SessionId> {
        cookie_header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| value.trim().parse().ok())
    }

    /// `Set-Cookie` header refreshing this session.
    #[must_use]
    pub fn set_cookie(&self) -> [(HeaderName, String); 1] {
        [(
            SET_COOKIE,
            format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id),
        )]
    }
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(Self::find);

        Ok(match existing {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: SessionId::new(),
                is_new: true,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_session_among_other_cookies() {
        let id = SessionId::new();
        let header = format!("theme=dark; {SESSION_COOKIE}={id}; lang=en");
        assert_eq!(SessionCookie::find(&header), Some(id));
    }

    #[test]
    fn ignores_malformed_or_missing_cookie() {
        assert_eq!(SessionCookie::find("theme=dark"), None);
        assert_eq!(SessionCookie::find(&format!("{SESSION_COOKIE}=nope")), None);
        assert_eq!(SessionCookie::find(""), None);
    }

    #[test]
    fn set_cookie_is_http_only() {
        let cookie = SessionCookie {
            id: SessionId::new(),
            is_new: true,
        };
        let [(name, value)] = cookie.set_cookie();
        assert_eq!(name, SET_COOKIE);
        assert!(value.starts_with(&format!("{SESSION_COOKIE}={}", cookie.id)));
        assert!(value.contains("HttpOnly"));
    }
}
