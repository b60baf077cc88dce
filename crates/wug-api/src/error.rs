use thiserror::Error;

/// Top-level error type for the `wug-api` crate.
///
/// Covers every failure mode of the REST surface: token exchange,
/// transport, non-200 responses, and payloads that do not parse.
/// `wug-core` maps these into reconciliation-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The token endpoint answered with a non-success status.
    /// `message` is the response body, verbatim.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The token endpoint answered 200 but no `access_token` could be read.
    #[error("Token response did not contain an access token")]
    MalformedTokenResponse { body: String },

    /// The token request got no HTTP answer (connection refused, DNS,
    /// TLS handshake, timeout).
    #[error("Token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote API ──────────────────────────────────────────────────
    /// Any response other than 200. `body` is the raw response text.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the remote answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The raw response body attached to this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. }
            | Self::Deserialization { body, .. }
            | Self::MalformedTokenResponse { body } => Some(body),
            Self::Authentication { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn not_found_only_for_404() {
        let gone = Error::Http {
            status: 404,
            body: "no such device".into(),
        };
        let boom = Error::Http {
            status: 500,
            body: "boom".into(),
        };
        assert!(gone.is_not_found());
        assert!(!boom.is_not_found());
    }

    #[test]
    fn body_is_preserved_verbatim() {
        let err = Error::Http {
            status: 400,
            body: r#"{"error":"bad template"}"#.into(),
        };
        assert_eq!(err.body(), Some(r#"{"error":"bad template"}"#));
        assert_eq!(err.to_string(), r#"HTTP 400: {"error":"bad template"}"#);
    }
}
