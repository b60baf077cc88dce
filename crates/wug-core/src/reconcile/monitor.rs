// Monitor assignments are scoped to their device; every call routes
// through the owning device id.

use wug_api::types::MonitorAssignment;
use wug_api::{CreateResult, Fetched, WugClient};

use super::{ResourceId, ResourceKind};
use crate::convert::SchemaMap;
use crate::model::Monitor;

/// Monitor assignment resource kind.
pub struct Monitors;

impl ResourceKind for Monitors {
    type Record = Monitor;
    type Scope = str;

    const NAME: &'static str = "monitor";

    fn scope(record: &Monitor) -> &str {
        &record.device_id
    }

    async fn submit(client: &WugClient, desired: &Monitor) -> Result<CreateResult, wug_api::Error> {
        client
            .create_monitor_assignment(&desired.device_id, &desired.to_wire())
            .await
    }

    async fn fetch(
        client: &WugClient,
        id: &ResourceId,
        device_id: &str,
    ) -> Result<Fetched<MonitorAssignment>, wug_api::Error> {
        client.get_monitor_assignment(device_id, id.as_str()).await
    }

    async fn remove(client: &WugClient, id: &ResourceId, device_id: &str) -> Result<(), wug_api::Error> {
        client.delete_monitor_assignment(device_id, id.as_str()).await
    }
}
