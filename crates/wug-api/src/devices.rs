// Device template endpoints
//
// Devices are created and read back as configuration templates. There is
// no dedicated update call; re-applying a template is the only mutation.

use tracing::debug;

use crate::client::{CreateResult, WugClient};
use crate::error::Error;
use crate::types::{ApplyTemplatesRequest, DeviceTemplate, DeviceTemplateSet, Envelope, Fetched};

impl WugClient {
    /// Apply a single device template.
    ///
    /// `PATCH /devices/-/config/template` with `{"options": [...], "templates": [...]}`
    pub async fn apply_device_template(
        &self,
        options: &[&str],
        template: &DeviceTemplate,
    ) -> Result<CreateResult, Error> {
        let url = self.url(&["devices", "-", "config", "template"])?;
        debug!(
            name = template.display_name.as_deref().unwrap_or_default(),
            "applying device template"
        );
        let request = ApplyTemplatesRequest {
            options: options.iter().map(ToString::to_string).collect(),
            templates: vec![template.clone()],
        };
        self.patch_create(url, &request).await
    }

    /// Fetch the template describing one device.
    ///
    /// `GET /devices/{id}/config/template`. The match count comes from
    /// `data.deviceCount`, falling back to the number of templates.
    pub async fn get_device_template(&self, id: &str) -> Result<Fetched<DeviceTemplate>, Error> {
        let url = self.url(&["devices", id, "config", "template"])?;
        let envelope: Envelope<Option<DeviceTemplateSet>> = self.get(url).await?;
        let set = envelope.data.unwrap_or_default();

        let count = match set.device_count {
            Some(n) => u64::try_from(n).unwrap_or(0),
            None => u64::try_from(set.templates.len()).unwrap_or(u64::MAX),
        };
        debug!(id, count, "fetched device template");

        Ok(Fetched::from_count(count, set.templates.into_iter().next()))
    }

    /// Delete a device.
    ///
    /// `DELETE /devices/{id}`
    pub async fn delete_device(&self, id: &str) -> Result<(), Error> {
        let url = self.url(&["devices", id])?;
        debug!(id, "deleting device");
        self.delete(url).await
    }
}
