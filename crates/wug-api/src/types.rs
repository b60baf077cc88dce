//! Wire types for the WhatsUp Gold REST API.
//!
//! Every type matches the JSON exchanged with the remote endpoints.
//! Field names are camelCase on the wire; every field is optional and
//! omitted when absent, so the server never receives a zero value that
//! was not asked for.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Envelope ─────────────────────────────────────────────────────────

/// Standard response envelope.
///
/// ```json
/// { "data": { ... }, "paging": { "size": 1 } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub paging: Option<Paging>,
}

/// Paging metadata returned by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub size: Option<i64>,
}

/// Outcome of a fetch by identifier.
///
/// A 200 response can still describe zero or several matches; callers
/// must never silently pick one of several.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The remote reports no object for the identifier.
    Missing,
    /// Exactly one match.
    One(T),
    /// More than one match.
    Ambiguous { count: u64 },
}

impl<T> Fetched<T> {
    /// Classify a reported match count, taking the first element when the
    /// count is exactly one.
    pub fn from_count(count: u64, first: Option<T>) -> Self {
        match (count, first) {
            (1, Some(item)) => Self::One(item),
            (0 | 1, _) => Self::Missing,
            (count, _) => Self::Ambiguous { count },
        }
    }

    /// Fallibly transform the matched item, keeping the classification.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Fetched<U>, E> {
        Ok(match self {
            Self::Missing => Fetched::Missing,
            Self::One(item) => Fetched::One(f(item)?),
            Self::Ambiguous { count } => Fetched::Ambiguous { count },
        })
    }
}

// ── Device templates ─────────────────────────────────────────────────

/// Body of `PATCH /devices/-/config/template`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyTemplatesRequest {
    pub options: Vec<String>,
    pub templates: Vec<DeviceTemplate>,
}

/// One device, described as a configuration template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TemplateInterface>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<TemplateGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<TemplateCredential>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_monitors: Vec<TemplateActiveMonitor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub performance_monitors: Vec<TemplatePerformanceMonitor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snmp_oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInterface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_interface: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_using_network_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
}

/// A group reference: leaf name plus the chain of parent groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,
    /// Credential name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

/// Active monitor attached through a template.
///
/// `isCritical` and `pollingOrder` travel as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateActiveMonitor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_critical: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub polling_order: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatePerformanceMonitor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// `data` of `GET /devices/{id}/config/template`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTemplateSet {
    #[serde(default)]
    pub device_count: Option<i64>,
    #[serde(default)]
    pub templates: Vec<DeviceTemplate>,
}

// ── Monitor assignments ──────────────────────────────────────────────

/// A monitor assigned to a device.
///
/// Body of `POST /devices/{deviceId}/monitors/-` and `data` of
/// `GET /devices/{deviceId}/monitors/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorAssignment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub monitor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_type_class_id: Option<String>,
    #[serde(
        rename = "monitorType",
        alias = "monitorTypeId",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
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

/// Parameters of an active monitor. `interfaceId` travels as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_policy_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_policy_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_interval_seconds: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_interval_minutes: Option<i64>,
}

/// `data` of a single-assignment fetch: an object, an array, or `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

// ── Monitor library search ───────────────────────────────────────────

/// `data` of `GET /monitors/-`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorLibrary {
    #[serde(default)]
    pub active_monitors: Vec<MonitorLibraryEntry>,
    #[serde(default)]
    pub performance_monitors: Vec<MonitorLibraryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorLibraryEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub monitor_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub monitor_type_info: Option<MonitorTypeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorTypeInfo {
    #[serde(default)]
    pub class_id: Option<String>,
    #[serde(default)]
    pub base_type: Option<String>,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Accept a string, number, or boolean where the API documents a string.
///
/// Firmware versions disagree on whether identifiers and flags are quoted;
/// numeric and boolean coercion happens later, in the schema mapper.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a string, number, or boolean, got {other}"
            )));
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn template_omits_absent_fields() {
        let template = DeviceTemplate {
            display_name: Some("edge-1".into()),
            ..DeviceTemplate::default()
        };
        assert_eq!(
            serde_json::to_value(&template).unwrap(),
            json!({ "displayName": "edge-1" })
        );
    }

    #[test]
    fn active_monitor_accepts_quoted_and_bare_scalars() {
        let quoted: TemplateActiveMonitor = serde_json::from_value(json!({
            "name": "Ping", "isCritical": "true", "pollingOrder": "3"
        }))
        .unwrap();
        let bare: TemplateActiveMonitor = serde_json::from_value(json!({
            "name": "Ping", "isCritical": true, "pollingOrder": 3
        }))
        .unwrap();
        assert_eq!(quoted, bare);
        assert_eq!(bare.polling_order.as_deref(), Some("3"));
    }

    #[test]
    fn lenient_string_rejects_objects() {
        let result = serde_json::from_value::<TemplateActiveMonitor>(json!({
            "pollingOrder": { "value": 1 }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn monitor_type_id_reads_either_spelling() {
        let a: MonitorAssignment =
            serde_json::from_value(json!({ "monitorType": "12" })).unwrap();
        let b: MonitorAssignment =
            serde_json::from_value(json!({ "monitorTypeId": 12 })).unwrap();
        assert_eq!(a.monitor_type_id.as_deref(), Some("12"));
        assert_eq!(a, b);
    }

    #[test]
    fn fetched_classification() {
        assert_eq!(Fetched::from_count(0, None::<u8>), Fetched::Missing);
        assert_eq!(Fetched::from_count(1, Some(7)), Fetched::One(7));
        assert_eq!(Fetched::from_count(1, None::<u8>), Fetched::Missing);
        assert_eq!(
            Fetched::from_count(3, Some(7)),
            Fetched::Ambiguous { count: 3 }
        );
    }

    #[test]
    fn one_or_many_shapes() {
        let one: OneOrMany<MonitorAssignment> =
            serde_json::from_value(json!({ "type": "active" })).unwrap();
        let many: OneOrMany<MonitorAssignment> =
            serde_json::from_value(json!([{ "type": "active" }, { "type": "performance" }]))
                .unwrap();
        assert_eq!(one.into_vec().len(), 1);
        assert_eq!(many.into_vec().len(), 2);
    }
}
