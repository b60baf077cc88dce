// Devices are created through the template endpoint and read back as a
// template. Template options ride along in the apply request.

use wug_api::types::DeviceTemplate;
use wug_api::{CreateResult, Fetched, WugClient};

use super::{ResourceId, ResourceKind};
use crate::convert::SchemaMap;
use crate::model::Device;

/// Device resource kind.
pub struct Devices;

impl ResourceKind for Devices {
    type Record = Device;
    type Scope = ();

    const NAME: &'static str = "device";

    fn scope(_record: &Device) -> &() {
        &()
    }

    async fn submit(client: &WugClient, desired: &Device) -> Result<CreateResult, wug_api::Error> {
        let option = desired.options.to_string();
        client
            .apply_device_template(&[option.as_str()], &desired.to_wire())
            .await
    }

    async fn fetch(
        client: &WugClient,
        id: &ResourceId,
        _scope: &(),
    ) -> Result<Fetched<DeviceTemplate>, wug_api::Error> {
        client.get_device_template(id.as_str()).await
    }

    async fn remove(client: &WugClient, id: &ResourceId, _scope: &()) -> Result<(), wug_api::Error> {
        client.delete_device(id.as_str()).await
    }
}
