// src/client.rs

use crate::error::ZurichError;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER,
};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Base of every request. Relative paths are joined onto it.
pub const DEFAULT_BASE_URL: &str = "https://www.ogd.stadt-zuerich.ch/wfs/geoportal/";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const USER_AGENT: &str = concat!("ODPZurichRust/", env!("CARGO_PKG_VERSION"));

pub(crate) const GEOJSON_CONTENT_TYPE: &str = "application/vnd.geo+json";

/// Who is responsible for the transport session held by a [`ZurichClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOwnership {
    /// Created lazily by the client, released on `close` or drop.
    Owned,
    /// Supplied by the caller; the client never releases it.
    External,
}

/// Asynchronous client for the Open Data Platform of the City of Zurich.
///
/// The client holds at most one `reqwest::Client` (the transport session). If none is
/// supplied through [`ZurichClientBuilder::session`], one is created on the first request
/// and released by [`ZurichClient::close`], which also runs when the client is dropped.
/// A supplied session is only ever borrowed.
///
/// ```rust,no_run
/// use odp_zurich::{ZurichClient, ZurichError};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), ZurichError> {
/// let client = ZurichClient::new()?;
/// for spot in client.disabled_parkings().await? {
///     println!("{} at ({}, {})", spot.spot_id(), spot.longitude(), spot.latitude());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ZurichClient {
    pub(crate) base_url: Url,
    pub(crate) request_timeout: Duration,
    pub(crate) user_agent: String,
    session: OnceCell<Client>,
    ownership: SessionOwnership,
}

/// Builder for [`ZurichClient`].
#[derive(Debug, Default)]
pub struct ZurichClientBuilder {
    session: Option<Client>,
    request_timeout: Option<Duration>,
    base_url: Option<String>,
    user_agent: Option<String>,
}

impl ZurichClientBuilder {
    /// Use a caller-owned `reqwest::Client`. The built client will not release it.
    pub fn session(mut self, session: Client) -> Self {
        self.session = Some(session);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Override the API base, e.g. to point at a mirror or a local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validates the configuration and builds the client.
    ///
    /// # Returns
    /// `ZurichError::UrlParseError` or `ZurichError::InvalidUrl` if the base URL is unusable.
    pub fn build(self) -> Result<ZurichClient, ZurichError> {
        let raw_base = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Url::join drops the last segment unless the base ends with a slash.
        let base_url = if raw_base.ends_with('/') {
            Url::parse(&raw_base)?
        } else {
            Url::parse(&format!("{}/", raw_base))?
        };

        if base_url.cannot_be_a_base() {
            return Err(ZurichError::InvalidUrl(format!(
                "'{}' cannot be used as a base URL",
                base_url
            )));
        }

        let (session, ownership) = match self.session {
            Some(client) => (OnceCell::new_with(Some(client)), SessionOwnership::External),
            None => (OnceCell::new(), SessionOwnership::Owned),
        };

        log::debug!(
            "ZurichClient initialized with base_url={}, ownership={:?}",
            base_url,
            ownership
        );

        Ok(ZurichClient {
            base_url,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
            session,
            ownership,
        })
    }
}

impl ZurichClient {
    /// A client against the public endpoint with the default timeout and its own session.
    pub fn new() -> Result<Self, ZurichError> {
        Self::builder().build()
    }

    pub fn builder() -> ZurichClientBuilder {
        ZurichClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn ownership(&self) -> SessionOwnership {
        self.ownership
    }

    /// Whether a transport session is currently held.
    pub fn has_session(&self) -> bool {
        self.session.initialized()
    }

    /// Releases the session if this client created it. A caller-supplied session is left alone.
    pub fn close(&mut self) {
        if self.ownership == SessionOwnership::Owned && self.session.take().is_some() {
            log::debug!("Released owned transport session");
        }
    }

    async fn session(&self) -> Result<&Client, ZurichError> {
        self.session
            .get_or_try_init(|| async {
                log::debug!("Creating owned transport session");
                Client::builder().build().map_err(ZurichError::ReqwestError)
            })
            .await
    }

    // Core request path: build URL and headers, run the exchange under the timeout,
    // then validate the content type and decode the body.
    pub(crate) async fn _request(
        &self,
        method: Method,
        uri: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Value, ZurichError> {
        let full_url = self.base_url.join(uri.trim_start_matches('/')).map_err(|e| {
            ZurichError::InvalidUrl(format!(
                "Failed to join base URL '{}' with path '{}': {}",
                self.base_url, uri, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEOJSON_CONTENT_TYPE));
        headers.insert(USER_AGENT_HEADER, HeaderValue::from_str(&self.user_agent)?);

        let session = self.session().await?;

        let mut request_builder = session
            .request(method.clone(), full_url.clone())
            .headers(headers);
        if let Some(params) = params {
            request_builder = request_builder.query(params);
        }

        log::debug!(
            "Preparing request: Method={}, URL={}, Params={:?}, Timeout={:?}",
            method,
            full_url,
            params,
            self.request_timeout
        );

        let exchange = async {
            let response = request_builder
                .send()
                .await
                .map_err(ZurichError::transport)?;
            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = response.bytes().await.map_err(ZurichError::transport)?;
            Ok::<_, ZurichError>((status, content_type, body))
        };

        let (status, content_type, body) = tokio::time::timeout(self.request_timeout, exchange)
            .await
            .map_err(ZurichError::timeout)??;

        process_response(&full_url, status, &content_type, &body)
    }
}

impl Drop for ZurichClient {
    fn drop(&mut self) {
        self.close();
    }
}

fn process_response(
    url: &Url,
    status: StatusCode,
    content_type: &str,
    body: &[u8],
) -> Result<Value, ZurichError> {
    if !status.is_success() {
        let body = String::from_utf8_lossy(body).into_owned();
        log::warn!("Request to '{}' failed with status {}. Body: {}", url, status, body);
        return Err(ZurichError::Status { status, body });
    }

    if !content_type.contains(GEOJSON_CONTENT_TYPE) {
        let body = String::from_utf8_lossy(body).into_owned();
        log::warn!(
            "Unexpected content type '{}' from '{}'. Body: {}",
            content_type,
            url,
            body
        );
        return Err(ZurichError::UnexpectedContentType {
            content_type: content_type.to_string(),
            body,
        });
    }

    serde_json::from_slice(body).map_err(|e| {
        log::error!(
            "JSON decoding failed for response from '{}'. Error: {}. Body: {}",
            url,
            e,
            String::from_utf8_lossy(body)
        );
        ZurichError::JsonError(e)
    })
}
