//! Shared helpers for command handlers.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use wug_core::{ConnectionConfig, Observation, ResourceId, WugClient};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, FieldRow};

/// A record together with its server-assigned identifier, as printed.
#[derive(Serialize)]
pub struct Identified<'a, R> {
    pub id: &'a ResourceId,
    #[serde(flatten)]
    pub record: &'a R,
}

/// Read and validate a desired-state manifest.
pub fn read_manifest<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    Ok(wug_config::load_manifest(path)?)
}

/// Validate an identifier given on the command line.
pub fn parse_id(raw: &str) -> Result<ResourceId, CliError> {
    ResourceId::new(raw).ok_or_else(|| CliError::Validation {
        field: "id".into(),
        reason: "must not be empty".into(),
    })
}

/// Authenticate and return a client for this invocation.
pub async fn connect(connection: &ConnectionConfig) -> Result<WugClient, CliError> {
    tracing::debug!(url = %connection.url, "authenticating");
    Ok(connection.connect().await?)
}

/// Print a record in the selected output format.
pub fn print_record<R: Serialize>(
    global: &GlobalOpts,
    id: &ResourceId,
    record: &R,
    rows_fn: impl Fn(&Identified<'_, R>) -> Vec<FieldRow>,
) -> Result<(), CliError> {
    let view = Identified { id, record };
    let out = output::render_single(&global.output, &view, rows_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Print what a read found. A vanished object is reported, not an error.
pub fn print_observation<R: Serialize>(
    global: &GlobalOpts,
    kind: &str,
    id: &ResourceId,
    observation: &Observation<R>,
    rows_fn: impl Fn(&Identified<'_, R>) -> Vec<FieldRow>,
) -> Result<(), CliError> {
    match observation {
        Observation::Present(record) => print_record(global, id, record, rows_fn),
        Observation::Absent => {
            notice(global, &format!("{kind} {id} no longer exists"));
            Ok(())
        }
    }
}

/// Status line on stderr.
pub fn notice(global: &GlobalOpts, message: &str) {
    output::notice(message, output::should_color(&global.color), global.quiet);
}

/// Comma-separated list, `-` when empty.
pub fn join_or_dash<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() { "-".into() } else { joined }
}
