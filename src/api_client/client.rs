use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::error::ClientError;
use super::interceptor::{Interceptor, Next};
use super::request_option::{apply_all, RequestOption};
use super::response_filter::{default_filter, ResponseFilter};

const USER_AGENT: &str = concat!("lametric-notify/", env!("CARGO_PKG_VERSION"));

/// Construction settings for an [`HttpClient`]
///
/// Everything here is fixed once the client is built.
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Options applied to every request before the call-specific ones
    pub defaults: Vec<RequestOption>,
    /// Replaces [`invalid_status_as_error`](super::invalid_status_as_error)
    pub response_filter: Option<ResponseFilter>,
    /// Outermost first
    pub interceptors: Vec<Arc<dyn Interceptor>>,
    /// Shared transport; built from `timeout_secs` and `user_agent` when absent
    pub client: Option<Client>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            defaults: Vec::new(),
            response_filter: None,
            interceptors: Vec::new(),
            client: None,
            timeout_secs: Some(30),
            user_agent: Some(USER_AGENT.to_string()),
        }
    }
}

impl fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("defaults", &self.defaults)
            .field("custom_response_filter", &self.response_filter.is_some())
            .field("interceptors", &self.interceptors.len())
            .field("shared_client", &self.client.is_some())
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpClientConfig {
    pub fn with_default(mut self, option: RequestOption) -> Self {
        self.defaults.push(option);
        self
    }

    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_response_filter(mut self, filter: ResponseFilter) -> Self {
        self.response_filter = Some(filter);
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the underlying transport from the timeout and user agent
    pub fn build_transport(&self) -> Result<Client, ClientError> {
        let timeout = Duration::from_secs(self.timeout_secs.unwrap_or(30));

        let mut builder = Client::builder()
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(60))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder
            .build()
            .map_err(|e| ClientError::build("failed to create HTTP client", e))
    }
}

/// Status, headers and final url of a response whose body was consumed
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
}

impl From<&Response> for ResponseMeta {
    fn from(response: &Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }
}

/// Reusable HTTP client bound to one base address
///
/// Every call starts from `GET {base_url}`, applies the default options and
/// then the call options, runs through the interceptor chain and finally
/// through the response filter. Cloning is cheap and shares the transport.
#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    defaults: Arc<[RequestOption]>,
    filter: ResponseFilter,
    interceptors: Arc<[Arc<dyn Interceptor>]>,
    client: Client,
}

impl HttpClient {
    pub fn new(base_url: &str, config: HttpClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let client = match &config.client {
            Some(client) => client.clone(),
            None => config.build_transport()?,
        };

        Ok(Self {
            base_url,
            defaults: config.defaults.into(),
            filter: config.response_filter.unwrap_or_else(default_filter),
            interceptors: config.interceptors.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Compose the request without sending it
    pub fn build_request(&self, options: &[RequestOption]) -> Result<Request, ClientError> {
        let mut request = Request::new(Method::GET, self.base_url.clone());
        apply_all(&mut request, self.defaults.iter().chain(options))?;
        Ok(request)
    }

    /// Send a request and return the filtered response
    pub async fn send(&self, options: &[RequestOption]) -> Result<Response, ClientError> {
        let request = self.build_request(options)?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        Next::new(&self.client, &self.filter, &self.interceptors)
            .run(request)
            .await
    }

    /// Send a request and drain the body without decoding it
    pub async fn discard(&self, options: &[RequestOption]) -> Result<ResponseMeta, ClientError> {
        let (meta, _) = self.bytes(options).await?;
        Ok(meta)
    }

    /// Send a request and read the whole body into memory
    pub async fn bytes(
        &self,
        options: &[RequestOption],
    ) -> Result<(ResponseMeta, Bytes), ClientError> {
        let response = self.send(options).await?;
        let meta = ResponseMeta::from(&response);
        let body = response.bytes().await.map_err(|source| ClientError::Body {
            url: meta.url.to_string(),
            source,
        })?;
        Ok((meta, body))
    }

    /// Send a request and decode the body as JSON
    ///
    /// A status rejected by the filter is returned as is; the body is never
    /// decoded in that case.
    pub async fn json<T>(&self, options: &[RequestOption]) -> Result<(ResponseMeta, T), ClientError>
    where
        T: DeserializeOwned,
    {
        let (meta, body) = self.bytes(options).await?;
        let output = serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: meta.url.to_string(),
            source,
        })?;
        Ok((meta, output))
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("defaults", &self.defaults)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}
