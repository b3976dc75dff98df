// Sensibo API HTTP client
//
// Wraps `reqwest::Client` with API-key query authentication, URL
// construction, and `{ "result": ... }` envelope unwrapping. Endpoint methods
// live in `pods.rs` as inherent methods to keep this module focused on
// transport mechanics.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Base URL of the Sensibo v2 API.
pub const API_BASE_URL: &str = "https://home.sensibo.com/api/v2";

// ── Session ownership ────────────────────────────────────────────────

/// The HTTP session behind a client, tagged with who is responsible for it.
#[derive(Debug)]
enum HttpSession {
    /// Built by the client; released together with it.
    Owned(reqwest::Client),
    /// Supplied by the caller, who keeps managing it.
    Shared(reqwest::Client),
}

impl HttpSession {
    fn client(&self) -> &reqwest::Client {
        match self {
            Self::Owned(http) | Self::Shared(http) => http,
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Sensibo REST API.
///
/// Every request carries the API key as the `apiKey` query parameter, and
/// every method returns the unwrapped `result` payload. The client keeps no
/// state between calls and can be shared across tasks.
#[derive(Debug)]
pub struct SensiboClient {
    api_key: SecretString,
    base_url: Url,
    session: HttpSession,
}

impl SensiboClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client that owns its HTTP session, talking to [`API_BASE_URL`].
    pub fn new(api_key: impl Into<SecretString>) -> Result<Self, Error> {
        Self::from_transport(API_BASE_URL, api_key, &TransportConfig::default())
    }

    /// Create a client that owns an HTTP session built from `transport`.
    pub fn from_transport(
        base_url: &str,
        api_key: impl Into<SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: Self::normalize_base_url(base_url)?,
            session: HttpSession::Owned(http),
        })
    }

    /// Use a caller-managed `reqwest::Client`, talking to [`API_BASE_URL`].
    pub fn with_session(
        api_key: impl Into<SecretString>,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Self::from_reqwest(API_BASE_URL, api_key, http)
    }

    /// Use a caller-managed `reqwest::Client` against a custom base URL.
    pub fn from_reqwest(
        base_url: &str,
        api_key: impl Into<SecretString>,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: Self::normalize_base_url(base_url)?,
            session: HttpSession::Shared(http),
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&path);
        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The API base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP session.
    pub fn http(&self) -> &reqwest::Client {
        self.session.client()
    }

    /// Whether the client created (and will release) its own session.
    pub fn owns_session(&self) -> bool {
        matches!(self.session, HttpSession::Owned(_))
    }

    /// Dispose of the client.
    ///
    /// An owned session is released here; a shared one stays usable by
    /// whoever supplied it. Dropping the client has the same effect.
    pub fn close(self) {
        if self.owns_session() {
            debug!("releasing owned HTTP session");
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append an absolute API path (e.g. `"/pods/abc"`) to the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Query parameters for a request: `apiKey` first, then `extra`.
    fn params<'a>(&'a self, extra: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        let mut params = Vec::with_capacity(extra.len() + 1);
        params.push(("apiKey", self.api_key.expose_secret()));
        params.extend_from_slice(extra);
        params
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {path} params={extra:?}");

        let resp = self.http().get(url).query(&self.params(extra)).send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {path} params={extra:?}");

        let resp = self
            .http()
            .put(url)
            .query(&self.params(extra))
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {path} params={extra:?}");

        let resp = self
            .http()
            .post(url)
            .query(&self.params(extra))
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {path} params={extra:?}");

        let resp = self
            .http()
            .patch(url)
            .query(&self.params(extra))
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Map the status code, then strip the `{ "result": ... }` envelope.
async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication);
    }

    let body = resp.text().await?;

    if status != StatusCode::OK {
        return Err(Error::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    unwrap_envelope(body)
}

fn unwrap_envelope<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    let mut envelope: Map<String, Value> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }
    };

    let Some(result) = envelope.remove("result") else {
        return Err(Error::MissingResult { body });
    };

    serde_json::from_value(result).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
