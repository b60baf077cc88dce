// ── Monitor assignment desired-state record ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(try_from = "String", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MonitorType {
    Active,
    Performance,
}

impl TryFrom<String> for MonitorType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|_| {
            format!("unknown monitor type `{value}`, expected `active` or `performance`")
        })
    }
}

impl From<MonitorType> for String {
    fn from(kind: MonitorType) -> Self {
        kind.to_string()
    }
}

/// Parameters of an active monitor assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActiveParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_policy_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_interval_seconds: Option<i64>,
    /// Interface the monitor polls. Numeric here, a string on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_id: Option<u64>,
}

/// Parameters of a performance monitor assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerformanceParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_interval_minutes: Option<i64>,
}

/// Desired state of one monitor assigned to one device.
///
/// `device_id` scopes every remote call and is never sent in a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Monitor {
    pub device_id: String,
    #[serde(rename = "type")]
    pub kind: MonitorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_type_class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_global: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceParameters>,
}

impl Monitor {
    pub fn new(device_id: impl Into<String>, kind: MonitorType) -> Self {
        Self {
            device_id: device_id.into(),
            kind,
            monitor_type_class_id: None,
            monitor_type_id: None,
            monitor_type_name: None,
            is_global: None,
            enabled: None,
            active: None,
            performance: None,
        }
    }
}
