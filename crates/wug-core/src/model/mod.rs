// ── Desired-state model ──
//
// Statically typed records for every managed resource kind. Records are
// validated once, when a manifest is loaded, and flow unchanged through
// the mapper and the reconciler afterwards.

pub mod device;
pub mod monitor;

pub use device::{
    ActiveMonitorRef, Credential, Device, GroupRef, Interface, PerformanceMonitorRef,
    TemplateOption,
};
pub use monitor::{ActiveParameters, Monitor, MonitorType, PerformanceParameters};
