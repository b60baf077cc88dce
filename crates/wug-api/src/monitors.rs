// Monitor endpoints
//
// Assignments are device-scoped (`/devices/{deviceId}/monitors/...`);
// the monitor library search is global (`/monitors/-`).

use tracing::debug;

use crate::client::{CreateResult, WugClient};
use crate::error::Error;
use crate::types::{
    Envelope, Fetched, MonitorAssignment, MonitorLibrary, MonitorLibraryEntry, OneOrMany,
};

/// Result of a monitor library search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorSearch {
    /// `paging.size` as reported by the server.
    pub size: u64,
    pub active: Vec<MonitorLibraryEntry>,
    pub performance: Vec<MonitorLibraryEntry>,
}

impl WugClient {
    /// Assign a monitor to a device.
    ///
    /// `POST /devices/{deviceId}/monitors/-`
    pub async fn create_monitor_assignment(
        &self,
        device_id: &str,
        assignment: &MonitorAssignment,
    ) -> Result<CreateResult, Error> {
        let url = self.url(&["devices", device_id, "monitors", "-"])?;
        debug!(device_id, "assigning monitor");
        self.post_create(url, assignment).await
    }

    /// Fetch one assignment.
    ///
    /// `GET /devices/{deviceId}/monitors/{id}`. A `null` payload means no
    /// match; an array payload is classified by its length.
    pub async fn get_monitor_assignment(
        &self,
        device_id: &str,
        id: &str,
    ) -> Result<Fetched<MonitorAssignment>, Error> {
        let url = self.url(&["devices", device_id, "monitors", id])?;
        let envelope: Envelope<Option<OneOrMany<MonitorAssignment>>> = self.get(url).await?;

        let items = envelope.data.map(OneOrMany::into_vec).unwrap_or_default();
        let count = u64::try_from(items.len()).unwrap_or(u64::MAX);
        debug!(device_id, id, count, "fetched monitor assignment");

        Ok(Fetched::from_count(count, items.into_iter().next()))
    }

    /// Remove an assignment.
    ///
    /// `DELETE /devices/{deviceId}/monitors/{id}`
    pub async fn delete_monitor_assignment(&self, device_id: &str, id: &str) -> Result<(), Error> {
        let url = self.url(&["devices", device_id, "monitors", id])?;
        debug!(device_id, id, "removing monitor assignment");
        self.delete(url).await
    }

    /// Search the monitor library by type and name.
    ///
    /// `GET /monitors/-?type=...&search=...` across device, system, and
    /// core monitors.
    pub async fn search_monitors(
        &self,
        monitor_type: &str,
        search: &str,
    ) -> Result<MonitorSearch, Error> {
        let url = self.url(&["monitors", "-"])?;
        let envelope: Envelope<Option<MonitorLibrary>> = self
            .get_with_params(
                url,
                &[
                    ("type", monitor_type),
                    ("search", search),
                    ("includeDeviceMonitors", "true"),
                    ("includeSystemMonitors", "true"),
                    ("includeCoreMonitors", "true"),
                ],
            )
            .await?;

        let library = envelope.data.unwrap_or_default();
        let size = envelope
            .paging
            .and_then(|p| p.size)
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or_else(|| {
                u64::try_from(library.active_monitors.len() + library.performance_monitors.len())
                    .unwrap_or(u64::MAX)
            });

        Ok(MonitorSearch {
            size,
            active: library.active_monitors,
            performance: library.performance_monitors,
        })
    }
}
