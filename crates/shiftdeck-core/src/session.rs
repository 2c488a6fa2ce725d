//! Read-only session context threaded through the client.
//!
//! Built once at startup from profile config and environment; there is no
//! ambient global. Tokens are minted elsewhere — this client only carries
//! them.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::UserId;
use crate::util::{is_http_url, normalize_text_option};

/// Authenticated API context for one run of the console.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    access_token: String,
    user_id: Option<UserId>,
}

impl Session {
    /// Validate and normalize the session parts.
    ///
    /// The base URL must carry an http(s) scheme; trailing slashes are
    /// stripped so endpoint paths can be appended verbatim.
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        user_id: Option<UserId>,
    ) -> Result<Self> {
        let base_url = normalize_text_option(Some(base_url.into()))
            .ok_or_else(|| Error::InvalidInput("API base URL must not be empty".to_string()))?;
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(
                "API base URL must include http:// or https://".to_string(),
            ));
        }

        let access_token = normalize_text_option(Some(access_token.into()))
            .ok_or_else(|| Error::InvalidInput("access token must not be empty".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            user_id,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Absolute URL for an endpoint path starting with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Serialized profile shape sessions are loaded from.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl SessionConfig {
    /// Resolve into a validated [`Session`], with environment variables
    /// taking precedence over stored values.
    pub fn into_session(self) -> Result<Session> {
        let base_url = env_override("SHIFTDECK_API_BASE_URL")
            .or_else(|| normalize_text_option(self.api_base_url))
            .ok_or_else(|| {
                Error::InvalidInput(
                    "API base URL is not configured. Run `shiftdeck config init` or set SHIFTDECK_API_BASE_URL".to_string(),
                )
            })?;
        let access_token = env_override("SHIFTDECK_ACCESS_TOKEN")
            .or_else(|| normalize_text_option(self.access_token))
            .ok_or_else(|| {
                Error::InvalidInput(
                    "access token is not configured. Run `shiftdeck config init` or set SHIFTDECK_ACCESS_TOKEN".to_string(),
                )
            })?;

        Session::new(base_url, access_token, self.user_id.map(UserId::new))
    }
}

fn env_override(key: &str) -> Option<String> {
    normalize_text_option(std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn session_normalizes_base_url() {
        let session = Session::new("https://api.example.com/", "token", None).unwrap();
        assert_eq!(session.base_url(), "https://api.example.com");
        assert_eq!(
            session.endpoint("/time-clock/cut-worklog"),
            "https://api.example.com/time-clock/cut-worklog"
        );
    }

    #[test]
    fn session_rejects_invalid_parts() {
        assert!(Session::new("api.example.com", "token", None).is_err());
        assert!(Session::new("https://api.example.com", "  ", None).is_err());
        assert!(Session::new("", "token", None).is_err());
    }

    #[test]
    fn session_debug_redacts_token() {
        let session = Session::new("https://api.example.com", "secret", None).unwrap();
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn session_config_rejects_unknown_fields() {
        let raw = r#"{ "api_base_url": "https://api.example.com", "password": "nope" }"#;
        assert!(serde_json::from_str::<SessionConfig>(raw).is_err());
    }
}
