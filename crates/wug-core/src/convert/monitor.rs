// Monitor record ↔ monitor assignment.
//
// Names map snake_case ↔ camelCase one to one, except `monitor_type_id`
// which the wire calls `monitorType`. `active.interface_id` is numeric in
// the record and a string on the wire. `device_id` lives in the URL.

use wug_api::types::{
    ActiveParameters as WireActive, MonitorAssignment, PerformanceParameters as WirePerformance,
};

use super::{SchemaMap, parse_optional_number, required};
use crate::error::CoreError;
use crate::model::{ActiveParameters, Monitor, MonitorType, PerformanceParameters};

impl SchemaMap for Monitor {
    type Wire = MonitorAssignment;

    fn to_wire(&self) -> MonitorAssignment {
        MonitorAssignment {
            monitor_type: Some(self.kind.to_string()),
            monitor_type_class_id: self.monitor_type_class_id.clone(),
            monitor_type_id: self.monitor_type_id.clone(),
            monitor_type_name: self.monitor_type_name.clone(),
            is_global: self.is_global,
            enabled: self.enabled,
            active: self.active.as_ref().map(|a| WireActive {
                critical_order: a.critical_order,
                action_policy_name: a.action_policy_name.clone(),
                action_policy_id: a.action_policy_id.clone(),
                comment: a.comment.clone(),
                argument: a.argument.clone(),
                polling_interval_seconds: a.polling_interval_seconds,
                interface_id: a.interface_id.map(|id| id.to_string()),
            }),
            performance: self.performance.as_ref().map(|p| WirePerformance {
                polling_interval_minutes: p.polling_interval_minutes,
            }),
        }
    }

    fn from_wire(wire: MonitorAssignment, desired: &Self) -> Result<Self, CoreError> {
        let raw_type = required("type", wire.monitor_type)?;
        let kind = raw_type
            .parse::<MonitorType>()
            .map_err(|_| CoreError::mapping("type", format!("unknown monitor type `{raw_type}`")))?;

        let active = wire
            .active
            .map(|a| {
                Ok::<_, CoreError>(ActiveParameters {
                    critical_order: a.critical_order,
                    action_policy_name: a.action_policy_name,
                    action_policy_id: a.action_policy_id,
                    comment: a.comment,
                    argument: a.argument,
                    polling_interval_seconds: a.polling_interval_seconds,
                    interface_id: parse_optional_number(
                        "active.interfaceId",
                        a.interface_id.as_deref(),
                    )?,
                })
            })
            .transpose()?;

        Ok(Monitor {
            device_id: desired.device_id.clone(),
            kind,
            monitor_type_class_id: wire.monitor_type_class_id,
            monitor_type_id: wire.monitor_type_id,
            monitor_type_name: wire.monitor_type_name,
            is_global: wire.is_global,
            enabled: wire.enabled,
            active,
            performance: wire.performance.map(|p| PerformanceParameters {
                polling_interval_minutes: p.polling_interval_minutes,
            }),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn full_monitor() -> Monitor {
        Monitor {
            device_id: "42".into(),
            kind: MonitorType::Active,
            monitor_type_class_id: Some("2655476e-36b0-455f-8e55-9f7d2b2bd4d6".into()),
            monitor_type_id: Some("3".into()),
            monitor_type_name: Some("Ping".into()),
            is_global: Some(true),
            enabled: Some(true),
            active: Some(ActiveParameters {
                critical_order: Some(1),
                action_policy_name: Some("Email on down".into()),
                action_policy_id: Some("7".into()),
                comment: Some("reachability".into()),
                argument: Some("-n 3".into()),
                polling_interval_seconds: Some(60),
                interface_id: Some(17),
            }),
            performance: Some(PerformanceParameters {
                polling_interval_minutes: Some(10),
            }),
        }
    }

    #[test]
    fn round_trip_is_lossless() {
        let monitor = full_monitor();
        let back = Monitor::from_wire(monitor.to_wire(), &monitor).unwrap();
        assert_eq!(back, monitor);
    }

    #[test]
    fn wire_field_names() {
        let wire = serde_json::to_value(full_monitor().to_wire()).unwrap();
        assert_eq!(wire["type"], "active");
        assert_eq!(wire["monitorType"], "3");
        assert_eq!(wire["monitorTypeName"], "Ping");
        assert_eq!(wire["isGlobal"], true);
        assert_eq!(wire["active"]["interfaceId"], "17");
        assert_eq!(wire["active"]["pollingIntervalSeconds"], 60);
        assert_eq!(wire["performance"]["pollingIntervalMinutes"], 10);
        assert!(wire.get("deviceId").is_none());
    }

    #[test]
    fn minimal_monitor_sends_only_type() {
        let monitor = Monitor::new("42", MonitorType::Performance);
        let wire = serde_json::to_value(monitor.to_wire()).unwrap();
        assert_eq!(wire, json!({ "type": "performance" }));
    }

    #[test]
    fn non_numeric_interface_id_fails() {
        let desired = Monitor::new("42", MonitorType::Active);
        let wire: MonitorAssignment = serde_json::from_value(json!({
            "type": "active",
            "active": { "interfaceId": "eth0" }
        }))
        .unwrap();
        let err = Monitor::from_wire(wire, &desired).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Mapping { ref field, .. } if field == "active.interfaceId"
        ));
    }

    #[test]
    fn unknown_type_from_server_fails() {
        let desired = Monitor::new("42", MonitorType::Active);
        let wire: MonitorAssignment =
            serde_json::from_value(json!({ "type": "passive" })).unwrap();
        assert!(Monitor::from_wire(wire, &desired).is_err());
    }

    #[test]
    fn read_populates_fields_absent_from_desired_state() {
        let desired = Monitor::new("42", MonitorType::Active);
        let wire: MonitorAssignment = serde_json::from_value(json!({
            "type": "Active",
            "monitorTypeClassId": "abc",
            "monitorTypeName": "Ping",
            "isGlobal": false,
            "enabled": true
        }))
        .unwrap();
        let observed = Monitor::from_wire(wire, &desired).unwrap();
        assert_eq!(observed.kind, MonitorType::Active);
        assert_eq!(observed.monitor_type_class_id.as_deref(), Some("abc"));
        assert_eq!(observed.enabled, Some(true));
        assert_eq!(observed.device_id, "42");
    }
}
