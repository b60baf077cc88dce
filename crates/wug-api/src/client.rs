// Resource client for the WhatsUp Gold REST API.
//
// Thin HTTP mechanics over an authenticated `Session`: URL building,
// verb helpers, and response handling. Endpoint methods live in
// `devices.rs` and `monitors.rs` as further `impl WugClient` blocks.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::Session;
use crate::error::Error;

/// Server response to a create/apply call.
///
/// The raw body is kept so a missing identifier can be reported with
/// whatever the server actually said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    /// `data.idMap[0].resultId`, when present and non-empty.
    pub result_id: Option<String>,
    pub body: String,
}

impl CreateResult {
    fn from_body(body: String) -> Self {
        let result_id = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.pointer("/data/idMap/0/resultId").and_then(scalar_to_string))
            .filter(|id| !id.is_empty());
        Self { result_id, body }
    }
}

/// Async client for device and monitor resources.
///
/// Cheap to clone; every clone shares the same [`Session`]. Only a 200
/// response counts as success: any other status becomes
/// [`Error::Http`] carrying the verbatim body.
#[derive(Debug, Clone)]
pub struct WugClient {
    session: Arc<Session>,
}

impl WugClient {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    // ── URL builder ──────────────────────────────────────────────────

    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        self.session.endpoint(segments)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.session.http().get(url).send().await?;
        let body = Self::success_body(resp).await?;
        Self::decode(body)
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");
        let resp = self.session.http().get(url).query(params).send().await?;
        let body = Self::success_body(resp).await?;
        Self::decode(body)
    }

    pub(crate) async fn post_create<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<CreateResult, Error> {
        debug!("POST {url}");
        let resp = self.session.http().post(url).json(body).send().await?;
        Ok(CreateResult::from_body(Self::success_body(resp).await?))
    }

    pub(crate) async fn patch_create<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<CreateResult, Error> {
        debug!("PATCH {url}");
        let resp = self.session.http().patch(url).json(body).send().await?;
        Ok(CreateResult::from_body(Self::success_body(resp).await?))
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self.session.http().delete(url).send().await?;
        Self::success_body(resp).await.map(drop)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn success_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        if status == StatusCode::OK {
            Ok(body)
        } else {
            debug!(status = status.as_u16(), "request rejected");
            Err(Error::Http {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

/// Identifiers arrive as strings or bare numbers depending on the endpoint.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
