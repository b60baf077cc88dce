// ── Core error types ──
//
// Reconciliation-level errors. The `From<wug_api::Error>` impl translates
// transport-layer failures into this taxonomy; raw response bodies are
// carried through untouched so an operator sees what the server said.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    /// The token exchange failed: rejected credentials, no answer from
    /// the token endpoint, or a 401 on a later call.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The token endpoint answered 200 without a usable `access_token`.
    #[error("Authentication failed: token response carried no access_token")]
    MalformedToken { body: String },

    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ── Remote errors ────────────────────────────────────────────────
    /// Any non-200 answer. `body` is the raw response text.
    #[error("Remote API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{kind} not found: {identifier}")]
    NotFound { kind: String, identifier: String },

    /// More than one remote object answered to a single identifier.
    #[error("{kind} {identifier} matched {count} remote objects, expected one")]
    AmbiguousResult {
        kind: String,
        identifier: String,
        count: u64,
    },

    /// A 200 create response without a usable identifier.
    #[error("Creating {kind} returned no identifier: {body}")]
    CreateFailed { kind: String, body: String },

    /// The object was created but reading it back failed. The identifier
    /// is valid and must be kept.
    #[error("{kind} {id} was created but could not be read back: {source}")]
    ReadAfterCreate {
        kind: String,
        id: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Cannot map field `{field}`: {reason}")]
    Mapping { field: String, reason: String },

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("Invalid lifecycle transition: cannot {operation} while {state}")]
    InvalidTransition { operation: String, state: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn mapping(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Mapping {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The raw remote response carried by this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. }
            | Self::CreateFailed { body, .. }
            | Self::MalformedToken { body } => Some(body),
            Self::ReadAfterCreate { source, .. } => source.body(),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wug_api::Error> for CoreError {
    fn from(err: wug_api::Error) -> Self {
        match err {
            wug_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            wug_api::Error::MalformedTokenResponse { body } => CoreError::MalformedToken { body },
            wug_api::Error::TokenRequest(e) => CoreError::AuthenticationFailed {
                message: format!("token request failed: {e}"),
            },
            wug_api::Error::Http { status: 401, body } => CoreError::AuthenticationFailed {
                message: format!("token rejected by the server: {body}"),
            },
            wug_api::Error::Http { status, body } => CoreError::Http { status, body },
            wug_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            wug_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            wug_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            wug_api::Error::Deserialization { message, body: _ } => CoreError::Mapping {
                field: "<response>".into(),
                reason: message,
            },
        }
    }
}
