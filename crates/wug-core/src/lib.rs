//! Reconciliation core between desired-state records and the WhatsUp Gold
//! REST API.
//!
//! - **[`model`]**: statically typed desired-state records ([`Device`],
//!   [`Monitor`]) validated once when a manifest is loaded.
//!
//! - **[`convert`]**: the schema mapper. [`SchemaMap`] translates a record
//!   to its wire shape and back, coercing the numbers and flags the API
//!   carries as strings.
//!
//! - **[`reconcile`]**: the lifecycle engine. A [`Reconciler`] creates,
//!   reads, and deletes one resource kind, tracking the server-assigned
//!   [`ResourceId`] in a [`Tracked`] instance. Every attribute is
//!   immutable; the update entry point only refreshes.
//!
//! - **[`lookup`]**: read-only monitor library search.
//!
//! A [`ConnectionConfig`] authenticates once and yields the
//! [`WugClient`](wug_api::WugClient) every reconciler shares.

pub mod config;
pub mod convert;
pub mod error;
pub mod lookup;
pub mod model;
pub mod reconcile;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConnectionConfig, TlsVerification};
pub use convert::SchemaMap;
pub use error::CoreError;
pub use lookup::{MonitorTypeMatch, lookup_monitor_type};
pub use model::{Device, Monitor, MonitorType, TemplateOption};
pub use reconcile::{
    Devices, Lifecycle, Monitors, Observation, Reconciler, ResourceId, ResourceKind, Tracked,
};
pub use wug_api::WugClient;
