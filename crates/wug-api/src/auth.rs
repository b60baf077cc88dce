// Session management
//
// Password-grant token exchange against `POST {base}/token`. The resulting
// bearer token is baked into a dedicated `reqwest::Client` as a default
// header, so every resource call made through the session carries it.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Shape of a successful token response. Only the token itself matters.
#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// An authenticated connection to one WhatsUp Gold endpoint.
///
/// Created once per process by [`Session::authenticate`] and shared
/// read-only (usually behind an `Arc`) by every resource client. The token
/// is never refreshed: once it is rejected, resource calls fail with a 401
/// [`Error::Http`] and the caller decides what to do.
#[derive(Debug, Clone)]
pub struct Session {
    http: reqwest::Client,
    base_url: Url,
}

impl Session {
    /// Exchange `username`/`password` for a bearer token.
    ///
    /// `endpoint` is the API root, e.g. `https://wug.example.net:9644/api/v1`.
    /// The body is URL-encoded but sent with a JSON content type, which is
    /// what the token endpoint expects.
    pub async fn authenticate(
        endpoint: &str,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(endpoint)?;
        let url = base_url.join("token")?;

        debug!("requesting token at {url}");

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "password")
            .append_pair("username", username)
            .append_pair("password", password.expose_secret())
            .finish();

        let resp = transport
            .build_client()?
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(Error::TokenRequest)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::TokenRequest)?;
        if status != StatusCode::OK {
            return Err(Error::Authentication { message: text });
        }

        let token = serde_json::from_str::<TokenResponse>(&text)
            .ok()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .ok_or(Error::MalformedTokenResponse { body: text })?;

        info!(access_token = %token, "authenticated against {base_url}");

        Self::from_token(base_url, &SecretString::from(token), transport)
    }

    /// Build a session around an already-issued token.
    pub fn from_token(
        base_url: Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url.as_str())?;

        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self { http, base_url })
    }

    /// The API root every resource path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The authenticated HTTP client.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve path segments under the API root. Segments are
    /// percent-encoded, so opaque identifiers are safe to pass through.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Parse the endpoint and force a trailing slash so relative joins keep the
/// last path segment (`…/api/v1/` + `token` → `…/api/v1/token`).
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = normalize_base_url("https://wug.local:9644/api/v1").unwrap();
        assert_eq!(url.as_str(), "https://wug.local:9644/api/v1/");
        assert_eq!(url.join("token").unwrap().path(), "/api/v1/token");
    }

    #[test]
    fn base_url_keeps_single_trailing_slash() {
        let url = normalize_base_url("https://wug.local/api/v1//").unwrap();
        assert_eq!(url.path(), "/api/v1/");
    }

    #[test]
    fn endpoint_encodes_segments() {
        let session = Session::from_token(
            Url::parse("https://wug.local/api/v1").unwrap(),
            &SecretString::from("t".to_owned()),
            &TransportConfig::default(),
        )
        .unwrap();

        let url = session.endpoint(&["devices", "4 2", "config", "template"]).unwrap();
        assert_eq!(url.path(), "/api/v1/devices/4%202/config/template");

        let url = session.endpoint(&["devices", "-", "config", "template"]).unwrap();
        assert_eq!(url.path(), "/api/v1/devices/-/config/template");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(matches!(
            normalize_base_url("mailto:ops@example.net"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
