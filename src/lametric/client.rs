use async_trait::async_trait;
use reqwest::Method;
use url::Url;

use super::types::{CreateNotificationOutput, Notification};
use crate::api_client::{
    basic_auth, header, json_body, method, path, ClientError, HttpClient, HttpClientConfig,
};
use crate::config::Device;

/// Port the device API listens on when the address does not name one
pub const DEFAULT_PORT: u16 = 8080;
pub const NOTIFICATIONS_PATH: &str = "/api/v2/device/notifications";
/// Fixed basic auth user; the device token is the password
pub const AUTH_USERNAME: &str = "dev";

/// Notification operations of a single device
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// Push a notification, returning the id the device assigned to it
    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<CreateNotificationOutput, ClientError>;
}

/// [`NotificationClient`] talking to one device over its local HTTP API
#[derive(Debug, Clone)]
pub struct LaMetricClient {
    http: HttpClient,
}

impl LaMetricClient {
    /// Bind a client to `device`, adding its credentials to the defaults in `config`
    pub fn new(device: &Device, config: HttpClientConfig) -> Result<Self, ClientError> {
        let base_url = device_base_url(&device.address)?;
        let config = config
            .with_default(basic_auth(AUTH_USERNAME, device.token.clone()))
            .with_default(header("Accept", "application/json"));

        Ok(Self {
            http: HttpClient::new(base_url.as_str(), config)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    /// Full url notifications are posted to
    pub fn notifications_url(&self) -> Url {
        let mut url = self.base_url().clone();
        url.set_path(NOTIFICATIONS_PATH);
        url
    }
}

#[async_trait]
impl NotificationClient for LaMetricClient {
    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<CreateNotificationOutput, ClientError> {
        let (_, output) = self
            .http
            .json::<CreateNotificationOutput>(&[
                method(Method::POST),
                path(NOTIFICATIONS_PATH),
                json_body(notification.clone()),
            ])
            .await?;
        Ok(output)
    }
}

/// Base url for a device address
///
/// A bare host gets `http://` and port 8080, `host:port` keeps its port and
/// an address with a scheme is used unchanged.
pub fn device_base_url(address: &str) -> Result<Url, ClientError> {
    let has_scheme = address.contains("://");
    let raw = if has_scheme {
        address.to_string()
    } else {
        format!("http://{address}")
    };

    let mut url = Url::parse(&raw).map_err(|source| ClientError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;

    if !has_scheme && url.port().is_none() {
        url.set_port(Some(DEFAULT_PORT))
            .map_err(|()| ClientError::Build {
                message: format!("cannot set port on '{raw}'"),
                source: None,
            })?;
    }
    Ok(url)
}
