//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wug_config::ConfigError;
use wug_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to WhatsUp Gold at {url}")]
    #[diagnostic(
        code(wug::connection_failed),
        help(
            "Check that the server is reachable and the URL includes /api/v1.\n\
             Self-signed certificate? Retry with --insecure (-k) or --ca-cert."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(wug::auth_failed),
        help("Verify the user and password (--user/--password, WUG_USER/WUG_PASSWORD).")
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{kind} '{identifier}' not found")]
    #[diagnostic(code(wug::not_found))]
    NotFound { kind: String, identifier: String },

    #[error("{kind} '{identifier}' matched {count} objects, expected exactly one")]
    #[diagnostic(code(wug::ambiguous))]
    Ambiguous {
        kind: String,
        identifier: String,
        count: u64,
    },

    #[error("{kind} {id} was created but could not be read back")]
    #[diagnostic(
        code(wug::read_after_create),
        help("The object exists. Keep the ID and retry with: wug {kind} read {id} -f <manifest>")
    )]
    ReadAfterCreate {
        kind: String,
        id: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status})")]
    #[diagnostic(code(wug::api_error), help("Server response: {body}"))]
    Api { status: u16, body: String },

    #[error("Create returned no {kind} ID")]
    #[diagnostic(code(wug::create_failed), help("Server response: {body}"))]
    CreateFailed { kind: String, body: String },

    #[error("Unexpected response data: {reason}")]
    #[diagnostic(code(wug::mapping), help("Field: {field}"))]
    Mapping { field: String, reason: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wug::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Missing {field}")]
    #[diagnostic(
        code(wug::missing_setting),
        help(
            "Set it in {path}, via {env}, or with --{field}."
        )
    )]
    MissingSetting {
        field: String,
        env: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(wug::config))]
    Config(Box<ConfigError>),

    // ── Output ───────────────────────────────────────────────────────
    #[error("Could not render output: {0}")]
    #[diagnostic(code(wug::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::MissingSetting { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            Self::ReadAfterCreate { source, .. } => match source.as_ref() {
                CoreError::AuthenticationFailed { .. } | CoreError::MalformedToken { .. } => {
                    exit_code::AUTH
                }
                CoreError::ConnectionFailed { .. } => exit_code::CONNECTION,
                _ => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::MalformedToken { body } => CliError::AuthFailed {
                message: format!("token response carried no access_token: {body}"),
            },

            CoreError::Http { status, body } => CliError::Api { status, body },

            CoreError::NotFound { kind, identifier } => CliError::NotFound { kind, identifier },

            CoreError::AmbiguousResult {
                kind,
                identifier,
                count,
            } => CliError::Ambiguous {
                kind,
                identifier,
                count,
            },

            CoreError::CreateFailed { kind, body } => CliError::CreateFailed { kind, body },

            CoreError::ReadAfterCreate { kind, id, source } => {
                CliError::ReadAfterCreate { kind, id, source }
            }

            CoreError::Mapping { field, reason } => CliError::Mapping { field, reason },

            CoreError::InvalidTransition { operation, state } => CliError::Validation {
                field: operation,
                reason: format!("not allowed while {state}"),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { field, env } => CliError::MissingSetting {
                field,
                env,
                path: wug_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
