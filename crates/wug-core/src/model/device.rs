// ── Device desired-state record ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the server applies a device template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(try_from = "String", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TemplateOption {
    L2,
    Basic,
}

impl TryFrom<String> for TemplateOption {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse()
            .map_err(|_| format!("unknown template option `{value}`, expected `l2` or `basic`"))
    }
}

impl From<TemplateOption> for String {
    fn from(option: TemplateOption) -> Self {
        option.to_string()
    }
}

/// A group the device joins: the leaf group name and its parent chain,
/// outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interface {
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub poll_using_network_name: bool,
    pub network_address: String,
    pub network_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Credential {
    /// Credential type (SNMP, Windows, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActiveMonitorRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub polling_order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PerformanceMonitorRef {
    pub name: String,
}

/// Desired state of one device.
///
/// Unordered collections are value-ordered sets: two records holding the
/// same interfaces in a different order compare equal, and a read never
/// reshuffles them. `groups` and `sub_roles` keep their order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Device {
    pub name: String,
    pub options: TemplateOption,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
    #[serde(rename = "interface", default)]
    pub interfaces: BTreeSet<Interface>,
    #[serde(rename = "credential", default, skip_serializing_if = "BTreeSet::is_empty")]
    pub credentials: BTreeSet<Credential>,
    #[serde(rename = "active_monitor", default, skip_serializing_if = "BTreeSet::is_empty")]
    pub active_monitors: BTreeSet<ActiveMonitorRef>,
    #[serde(
        rename = "performance_monitor",
        default,
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub performance_monitors: BTreeSet<PerformanceMonitorRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snmp_oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_role: Option<String>,
    #[serde(rename = "subroles", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_policy: Option<String>,
}

impl Device {
    /// A device with only the required attributes set.
    pub fn new(name: impl Into<String>, options: TemplateOption) -> Self {
        Self {
            name: name.into(),
            options,
            groups: Vec::new(),
            interfaces: BTreeSet::new(),
            credentials: BTreeSet::new(),
            active_monitors: BTreeSet::new(),
            performance_monitors: BTreeSet::new(),
            device_type: None,
            snmp_oid: None,
            primary_role: None,
            sub_roles: Vec::new(),
            os: None,
            brand: None,
            action_policy: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn template_option_is_case_insensitive() {
        assert_eq!("L2".parse::<TemplateOption>().unwrap(), TemplateOption::L2);
        assert_eq!(
            "Basic".parse::<TemplateOption>().unwrap(),
            TemplateOption::Basic
        );
        assert_eq!(TemplateOption::L2.to_string(), "l2");
    }

    #[test]
    fn template_option_rejects_unknown_values() {
        let err = serde_json::from_str::<TemplateOption>("\"full\"").unwrap_err();
        assert!(err.to_string().contains("unknown template option"));
    }

    #[test]
    fn interface_order_does_not_matter() {
        let a = Interface {
            default: true,
            poll_using_network_name: false,
            network_address: "10.0.0.1".into(),
            network_name: "sw1".into(),
        };
        let b = Interface {
            default: false,
            poll_using_network_name: false,
            network_address: "10.0.0.2".into(),
            network_name: "sw1-b".into(),
        };

        let mut left = Device::new("sw1", TemplateOption::L2);
        left.interfaces.extend([a.clone(), b.clone()]);
        let mut right = Device::new("sw1", TemplateOption::L2);
        right.interfaces.extend([b, a]);

        assert_eq!(left, right);
    }

    #[test]
    fn duplicate_interfaces_collapse() {
        let iface = Interface {
            default: false,
            poll_using_network_name: true,
            network_address: "10.0.0.9".into(),
            network_name: "edge".into(),
        };
        let mut device = Device::new("edge", TemplateOption::Basic);
        device.interfaces.insert(iface.clone());
        device.interfaces.insert(iface);
        assert_eq!(device.interfaces.len(), 1);
    }

    #[test]
    fn manifest_field_names() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "name": "core-switch-1",
            "options": "L2",
            "groups": [{ "name": "Network" }],
            "interface": [{ "default": true, "network_address": "10.0.0.1", "network_name": "sw1" }],
            "credential": [{ "type": "SNMPv2", "name": "public-ro" }],
            "subroles": ["Switch"]
        }))
        .unwrap();

        assert_eq!(device.options, TemplateOption::L2);
        assert_eq!(device.groups[0].parents.len(), 0);
        assert_eq!(device.credentials.iter().next().unwrap().kind, "SNMPv2");
        assert_eq!(device.sub_roles, vec!["Switch".to_owned()]);
    }
}
