// ── Reconciliation engine ──
//
// Drives one resource instance through its lifecycle:
//
//   Absent → Creating → Created → (Reading ↔ Present) → Deleting → Absent
//
// Every attribute is immutable; there is no in-place update. Each
// operation is a strictly sequential chain of awaited round trips, and
// `&mut Tracked` gives the caller exclusive access for its duration.

mod device;
mod monitor;

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};
use wug_api::{CreateResult, Fetched, WugClient};

pub use device::Devices;
pub use monitor::Monitors;

use crate::convert::SchemaMap;
use crate::error::CoreError;

// ── Lifecycle state ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Lifecycle {
    Absent,
    Creating,
    Created,
    Reading,
    Present,
    Deleting,
}

/// Opaque server-assigned identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// `None` for an empty (or all-whitespace) string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local view of one resource instance: the persisted identifier, the
/// current lifecycle state, and the last observed record.
#[derive(Debug, Clone)]
pub struct Tracked<R> {
    id: Option<ResourceId>,
    lifecycle: Lifecycle,
    observed: Option<R>,
}

impl<R> Tracked<R> {
    /// An instance that does not exist remotely yet.
    pub fn absent() -> Self {
        Self {
            id: None,
            lifecycle: Lifecycle::Absent,
            observed: None,
        }
    }

    /// An instance known by a previously persisted identifier. Its
    /// observed state is re-derived by the next read.
    pub fn existing(id: ResourceId) -> Self {
        Self {
            id: Some(id),
            lifecycle: Lifecycle::Present,
            observed: None,
        }
    }

    pub fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn observed(&self) -> Option<&R> {
        self.observed.as_ref()
    }

    fn transition(&mut self, to: Lifecycle) {
        debug!(from = %self.lifecycle, %to, "lifecycle transition");
        self.lifecycle = to;
    }

    fn clear(&mut self) {
        self.id = None;
        self.observed = None;
        self.transition(Lifecycle::Absent);
    }
}

/// What a read found.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation<R> {
    Present(R),
    /// The remote object no longer exists; the identifier was cleared.
    Absent,
}

// ── Resource kinds ───────────────────────────────────────────────────

/// The remote calls backing one resource kind.
pub trait ResourceKind {
    type Record: SchemaMap + Clone + Send + Sync;

    /// What, besides the identifier, locates a remote object: nothing for
    /// devices, the owning device for monitors.
    type Scope: ?Sized + Sync;

    /// Human-readable kind name used in logs and errors.
    const NAME: &'static str;

    fn scope(record: &Self::Record) -> &Self::Scope;

    fn submit(
        client: &WugClient,
        desired: &Self::Record,
    ) -> impl Future<Output = Result<CreateResult, wug_api::Error>> + Send;

    fn fetch(
        client: &WugClient,
        id: &ResourceId,
        scope: &Self::Scope,
    ) -> impl Future<
        Output = Result<Fetched<<Self::Record as SchemaMap>::Wire>, wug_api::Error>,
    > + Send;

    fn remove(
        client: &WugClient,
        id: &ResourceId,
        scope: &Self::Scope,
    ) -> impl Future<Output = Result<(), wug_api::Error>> + Send;
}

// ── Reconciler ───────────────────────────────────────────────────────

/// Create/Read/Update/Delete for one resource kind.
pub struct Reconciler<K> {
    client: WugClient,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for Reconciler<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> Reconciler<K> {
    pub fn new(client: WugClient) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    /// Submit the full desired record, take the server-assigned
    /// identifier, then read the object back.
    ///
    /// A create response without an identifier fails with
    /// [`CoreError::CreateFailed`] and leaves the instance `Absent`. A
    /// failed read-back does not undo the create: the identifier is kept,
    /// the instance stays `Created`, and [`CoreError::ReadAfterCreate`]
    /// is returned.
    pub async fn create(
        &self,
        tracked: &mut Tracked<K::Record>,
        desired: &K::Record,
    ) -> Result<(ResourceId, K::Record), CoreError> {
        if tracked.id.is_some() {
            return Err(CoreError::InvalidTransition {
                operation: "create".into(),
                state: format!("{} with an identifier", tracked.lifecycle),
            });
        }

        tracked.transition(Lifecycle::Creating);
        let result = match K::submit(&self.client, desired).await {
            Ok(result) => result,
            Err(e) => {
                tracked.transition(Lifecycle::Absent);
                return Err(e.into());
            }
        };

        let Some(id) = result.result_id.and_then(ResourceId::new) else {
            tracked.transition(Lifecycle::Absent);
            return Err(CoreError::CreateFailed {
                kind: K::NAME.into(),
                body: result.body,
            });
        };

        info!(kind = K::NAME, %id, "created");
        tracked.id = Some(id.clone());
        tracked.transition(Lifecycle::Created);

        tracked.transition(Lifecycle::Reading);
        match self.observe(&id, desired).await {
            Ok(Some(record)) => {
                tracked.observed = Some(record.clone());
                tracked.transition(Lifecycle::Present);
                Ok((id, record))
            }
            Ok(None) => {
                tracked.transition(Lifecycle::Created);
                let gone = CoreError::NotFound {
                    kind: K::NAME.into(),
                    identifier: id.to_string(),
                };
                Err(Self::read_after_create(&id, gone))
            }
            Err(e) => {
                tracked.transition(Lifecycle::Created);
                Err(Self::read_after_create(&id, e))
            }
        }
    }

    /// Re-derive the observed record from the remote object.
    ///
    /// Zero matches means the object was deleted out of band: the
    /// identifier is cleared and `Observation::Absent` is returned. Any
    /// error leaves the instance untouched.
    pub async fn read(
        &self,
        tracked: &mut Tracked<K::Record>,
        desired: &K::Record,
    ) -> Result<Observation<K::Record>, CoreError> {
        let Some(id) = tracked.id.clone() else {
            tracked.clear();
            return Ok(Observation::Absent);
        };

        let previous = tracked.lifecycle;
        tracked.transition(Lifecycle::Reading);

        match self.observe(&id, desired).await {
            Ok(Some(record)) => {
                tracked.observed = Some(record.clone());
                tracked.transition(Lifecycle::Present);
                Ok(Observation::Present(record))
            }
            Ok(None) => {
                warn!(kind = K::NAME, %id, "remote object no longer exists, clearing identifier");
                tracked.clear();
                Ok(Observation::Absent)
            }
            Err(e) => {
                tracked.transition(previous);
                Err(e)
            }
        }
    }

    /// Every attribute is immutable, so a change is realized as delete
    /// followed by create. This entry point only refreshes, exactly like
    /// [`read`](Self::read), and never sends a mutating request.
    pub async fn update(
        &self,
        tracked: &mut Tracked<K::Record>,
        desired: &K::Record,
    ) -> Result<Observation<K::Record>, CoreError> {
        debug!(kind = K::NAME, "update requested, refreshing instead");
        self.read(tracked, desired).await
    }

    /// Remove the remote object.
    ///
    /// A 404 counts as success. Any other failure leaves the instance
    /// `Present` with its identifier so the delete can be retried.
    pub async fn delete(
        &self,
        tracked: &mut Tracked<K::Record>,
        scope: &K::Scope,
    ) -> Result<(), CoreError> {
        let Some(id) = tracked.id.clone() else {
            tracked.clear();
            return Ok(());
        };

        tracked.transition(Lifecycle::Deleting);
        match K::remove(&self.client, &id, scope).await {
            Ok(()) => info!(kind = K::NAME, %id, "deleted"),
            Err(e) if e.is_not_found() => {
                info!(kind = K::NAME, %id, "already deleted remotely");
            }
            Err(e) => {
                tracked.transition(Lifecycle::Present);
                return Err(e.into());
            }
        }

        tracked.clear();
        Ok(())
    }

    async fn observe(
        &self,
        id: &ResourceId,
        desired: &K::Record,
    ) -> Result<Option<K::Record>, CoreError> {
        match K::fetch(&self.client, id, K::scope(desired)).await? {
            Fetched::Missing => Ok(None),
            Fetched::One(wire) => K::Record::from_wire(wire, desired).map(Some),
            Fetched::Ambiguous { count } => Err(CoreError::AmbiguousResult {
                kind: K::NAME.into(),
                identifier: id.to_string(),
                count,
            }),
        }
    }

    fn read_after_create(id: &ResourceId, source: CoreError) -> CoreError {
        CoreError::ReadAfterCreate {
            kind: K::NAME.into(),
            id: id.to_string(),
            source: Box::new(source),
        }
    }
}
