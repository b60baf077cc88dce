// ── Monitor type lookup ──
//
// Read-only search of the monitor library. Resolves a human search term
// into the class identifier a monitor assignment needs.

use serde::Serialize;
use tracing::debug;
use wug_api::WugClient;

use crate::error::CoreError;
use crate::model::MonitorType;

/// First library entry matching a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorTypeMatch {
    pub class_id: String,
    /// Canonical monitor name.
    pub monitor_name: String,
    pub monitor_id: String,
}

/// Search the library for a monitor of `kind` matching `search`.
///
/// Only the library list for `kind` is consulted. Zero matches is
/// [`CoreError::NotFound`]; several matches resolve to the first one the
/// server lists.
pub async fn lookup_monitor_type(
    client: &WugClient,
    kind: MonitorType,
    search: &str,
) -> Result<MonitorTypeMatch, CoreError> {
    let result = client.search_monitors(&kind.to_string(), search).await?;
    debug!(%kind, search, size = result.size, "monitor library search");

    let not_found = || CoreError::NotFound {
        kind: format!("{kind} monitor type"),
        identifier: search.to_owned(),
    };
    if result.size == 0 {
        return Err(not_found());
    }
    let entries = match kind {
        MonitorType::Active => &result.active,
        MonitorType::Performance => &result.performance,
    };
    let entry = entries.first().ok_or_else(not_found)?;

    let class_id = entry
        .monitor_type_info
        .as_ref()
        .and_then(|info| info.class_id.clone())
        .ok_or_else(|| CoreError::mapping("monitorTypeInfo.classId", "missing from response"))?;

    Ok(MonitorTypeMatch {
        class_id,
        monitor_name: entry
            .name
            .clone()
            .ok_or_else(|| CoreError::mapping("name", "missing from response"))?,
        monitor_id: entry
            .monitor_id
            .clone()
            .ok_or_else(|| CoreError::mapping("monitorId", "missing from response"))?,
    })
}
