// Device record ↔ device template.
//
// | record                       | wire                               |
// |------------------------------|------------------------------------|
// | name                         | displayName                        |
// | groups[].name / .parents     | groups[].name / .parents           |
// | interface.default            | interfaces[].defaultInterface      |
// | interface.poll_using_...     | interfaces[].pollUsingNetworkName  |
// | interface.network_address    | interfaces[].networkAddress        |
// | interface.network_name       | interfaces[].networkName           |
// | credential.type / .name      | credentials[].credentialType / .credential |
// | active_monitor.critical      | activeMonitors[].isCritical ("true")  |
// | active_monitor.polling_order | activeMonitors[].pollingOrder ("3")   |
// | performance_monitor.name     | performanceMonitors[].name         |
// | subroles                     | subRoles                           |
//
// `options` is not part of the template; it travels beside it in the
// apply request and is never echoed back.

use std::collections::BTreeSet;

use wug_api::types::{
    DeviceTemplate, TemplateActiveMonitor, TemplateCredential, TemplateGroup, TemplateInterface,
    TemplatePerformanceMonitor,
};

use super::{SchemaMap, parse_flag, parse_number, required};
use crate::error::CoreError;
use crate::model::{
    ActiveMonitorRef, Credential, Device, GroupRef, Interface, PerformanceMonitorRef,
};

impl SchemaMap for Device {
    type Wire = DeviceTemplate;

    fn to_wire(&self) -> DeviceTemplate {
        DeviceTemplate {
            display_name: Some(self.name.clone()),
            interfaces: self
                .interfaces
                .iter()
                .map(|i| TemplateInterface {
                    default_interface: Some(i.default),
                    poll_using_network_name: Some(i.poll_using_network_name),
                    network_address: Some(i.network_address.clone()),
                    network_name: Some(i.network_name.clone()),
                })
                .collect(),
            groups: self
                .groups
                .iter()
                .map(|g| TemplateGroup {
                    name: Some(g.name.clone()),
                    parents: g.parents.clone(),
                })
                .collect(),
            credentials: self
                .credentials
                .iter()
                .map(|c| TemplateCredential {
                    credential_type: Some(c.kind.clone()),
                    credential: Some(c.name.clone()),
                })
                .collect(),
            active_monitors: self
                .active_monitors
                .iter()
                .map(|m| TemplateActiveMonitor {
                    name: Some(m.name.clone()),
                    argument: m.argument.clone(),
                    comment: m.comment.clone(),
                    is_critical: Some(m.critical.to_string()),
                    polling_order: Some(m.polling_order.to_string()),
                })
                .collect(),
            performance_monitors: self
                .performance_monitors
                .iter()
                .map(|m| TemplatePerformanceMonitor {
                    name: Some(m.name.clone()),
                })
                .collect(),
            device_type: self.device_type.clone(),
            snmp_oid: self.snmp_oid.clone(),
            primary_role: self.primary_role.clone(),
            sub_roles: self.sub_roles.clone(),
            os: self.os.clone(),
            brand: self.brand.clone(),
            action_policy: self.action_policy.clone(),
        }
    }

    fn from_wire(wire: DeviceTemplate, desired: &Self) -> Result<Self, CoreError> {
        let groups: Vec<GroupRef> = wire
            .groups
            .into_iter()
            .map(|g| {
                Ok(GroupRef {
                    name: required("groups.name", g.name)?,
                    parents: g.parents,
                })
            })
            .collect::<Result<_, CoreError>>()?;

        let interfaces: BTreeSet<Interface> = wire
            .interfaces
            .into_iter()
            .map(|i| {
                Ok(Interface {
                    default: i.default_interface.unwrap_or(false),
                    poll_using_network_name: i.poll_using_network_name.unwrap_or(false),
                    network_address: required("interfaces.networkAddress", i.network_address)?,
                    network_name: required("interfaces.networkName", i.network_name)?,
                })
            })
            .collect::<Result<_, CoreError>>()?;

        let credentials: BTreeSet<Credential> = wire
            .credentials
            .into_iter()
            .map(|c| {
                Ok(Credential {
                    kind: required("credentials.credentialType", c.credential_type)?,
                    name: required("credentials.credential", c.credential)?,
                })
            })
            .collect::<Result<_, CoreError>>()?;

        let active_monitors: BTreeSet<ActiveMonitorRef> = wire
            .active_monitors
            .into_iter()
            .map(|m| {
                Ok(ActiveMonitorRef {
                    name: required("activeMonitors.name", m.name)?,
                    argument: m.argument,
                    comment: m.comment,
                    critical: m
                        .is_critical
                        .as_deref()
                        .map(|s| parse_flag("activeMonitors.isCritical", s))
                        .transpose()?
                        .unwrap_or(false),
                    polling_order: m
                        .polling_order
                        .as_deref()
                        .map(|s| parse_number("activeMonitors.pollingOrder", s))
                        .transpose()?
                        .unwrap_or(0),
                })
            })
            .collect::<Result<_, CoreError>>()?;

        let performance_monitors: BTreeSet<PerformanceMonitorRef> = wire
            .performance_monitors
            .into_iter()
            .map(|m| {
                Ok(PerformanceMonitorRef {
                    name: required("performanceMonitors.name", m.name)?,
                })
            })
            .collect::<Result<_, CoreError>>()?;

        Ok(Device {
            name: required("displayName", wire.display_name)?,
            options: desired.options,
            groups,
            interfaces,
            credentials,
            active_monitors,
            performance_monitors,
            device_type: wire.device_type,
            snmp_oid: wire.snmp_oid,
            primary_role: wire.primary_role,
            sub_roles: wire.sub_roles,
            os: wire.os,
            brand: wire.brand,
            action_policy: wire.action_policy,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::TemplateOption;

    fn full_device() -> Device {
        let mut device = Device::new("core-switch-1", TemplateOption::L2);
        device.groups = vec![
            GroupRef {
                name: "Network".into(),
                parents: vec![],
            },
            GroupRef {
                name: "Core".into(),
                parents: vec!["My Network".into(), "Datacenter".into()],
            },
        ];
        device.interfaces.insert(Interface {
            default: true,
            poll_using_network_name: false,
            network_address: "10.0.0.1".into(),
            network_name: "sw1".into(),
        });
        device.interfaces.insert(Interface {
            default: false,
            poll_using_network_name: true,
            network_address: "10.0.1.1".into(),
            network_name: "sw1-oob".into(),
        });
        device.credentials.insert(Credential {
            kind: "SNMPv2".into(),
            name: "public-ro".into(),
        });
        device.active_monitors.insert(ActiveMonitorRef {
            name: "Ping".into(),
            argument: Some("-n 3".into()),
            comment: Some("reachability".into()),
            critical: true,
            polling_order: 1,
        });
        device.performance_monitors.insert(PerformanceMonitorRef {
            name: "CPU Utilization".into(),
        });
        device.device_type = Some("Switch".into());
        device.snmp_oid = Some("1.3.6.1.4.1.9.1.1208".into());
        device.primary_role = Some("Switch".into());
        device.sub_roles = vec!["Layer 2".into(), "Layer 3".into()];
        device.os = Some("IOS".into());
        device.brand = Some("Cisco".into());
        device.action_policy = Some("Email on down".into());
        device
    }

    #[test]
    fn round_trip_is_lossless() {
        let device = full_device();
        let back = Device::from_wire(device.to_wire(), &device).unwrap();
        assert_eq!(back, device);
    }

    #[test]
    fn wire_field_names() {
        let wire = serde_json::to_value(full_device().to_wire()).unwrap();
        assert_eq!(wire["displayName"], "core-switch-1");
        assert_eq!(wire["subRoles"], json!(["Layer 2", "Layer 3"]));
        assert_eq!(wire["groups"][1]["parents"], json!(["My Network", "Datacenter"]));
        assert_eq!(wire["activeMonitors"][0]["isCritical"], "true");
        assert_eq!(wire["activeMonitors"][0]["pollingOrder"], "1");
        assert_eq!(wire["credentials"][0]["credentialType"], "SNMPv2");
        assert_eq!(wire["credentials"][0]["credential"], "public-ro");
        assert!(wire["interfaces"]
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i["defaultInterface"] == json!(true) && i["networkName"] == "sw1"));
        assert!(wire.get("options").is_none());
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let device = Device::new("bare", TemplateOption::Basic);
        let wire = serde_json::to_value(device.to_wire()).unwrap();
        assert_eq!(wire, json!({ "displayName": "bare" }));
    }

    #[test]
    fn server_order_does_not_leak_into_the_record() {
        let device = full_device();
        let mut wire = device.to_wire();
        wire.interfaces.reverse();
        let back = Device::from_wire(wire, &device).unwrap();
        assert_eq!(back.interfaces, device.interfaces);
    }

    #[test]
    fn server_computed_fields_are_populated() {
        let desired = Device::new("edge", TemplateOption::Basic);
        let wire: DeviceTemplate = serde_json::from_value(json!({
            "displayName": "edge",
            "os": "Linux",
            "brand": "Generic",
            "primaryRole": "Server"
        }))
        .unwrap();
        let observed = Device::from_wire(wire, &desired).unwrap();
        assert_eq!(observed.os.as_deref(), Some("Linux"));
        assert_eq!(observed.primary_role.as_deref(), Some("Server"));
        assert_eq!(observed.options, TemplateOption::Basic);
    }

    #[test]
    fn non_numeric_polling_order_fails() {
        let desired = Device::new("edge", TemplateOption::Basic);
        let wire: DeviceTemplate = serde_json::from_value(json!({
            "displayName": "edge",
            "activeMonitors": [{ "name": "Ping", "pollingOrder": "first" }]
        }))
        .unwrap();
        let err = Device::from_wire(wire, &desired).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Mapping { ref field, .. } if field == "activeMonitors.pollingOrder"
        ));
    }

    #[test]
    fn interface_without_address_fails() {
        let desired = Device::new("edge", TemplateOption::Basic);
        let wire: DeviceTemplate = serde_json::from_value(json!({
            "displayName": "edge",
            "interfaces": [{ "networkName": "edge" }]
        }))
        .unwrap();
        assert!(Device::from_wire(wire, &desired).is_err());
    }
}
