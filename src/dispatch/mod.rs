//! Concurrent delivery of one notification to every configured device
//!
//! [`Dispatcher::send_all`] spawns one task per device, waits for all of them
//! and folds the failures into a single [`MultiError`]. A failing device
//! never cancels its siblings. Cancelling the caller's token does: every
//! task runs under a child token, and a cancelled device call reports
//! [`ClientError::Cancelled`].

mod errors;

pub use errors::{DispatchError, MultiError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api_client::{ClientError, HttpClientConfig};
use crate::config::Device;
use crate::lametric::{CreateNotificationOutput, LaMetricClient, Notification, NotificationClient};

/// A notification the device accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub address: String,
    /// Id assigned by the device
    pub id: String,
}

/// Outcome of one dispatch round
#[derive(Debug)]
pub struct DispatchReport {
    /// Number of devices a send was started for
    pub attempted: usize,
    /// Successful sends, in device order
    pub deliveries: Vec<Delivery>,
    /// Present iff at least one device failed
    pub errors: Option<MultiError>,
}

impl DispatchReport {
    pub fn sent(&self) -> usize {
        self.deliveries.len()
    }

    pub fn failed(&self) -> usize {
        self.errors.as_ref().map_or(0, MultiError::len)
    }

    /// Success count, or the aggregate error if any device failed
    pub fn into_result(self) -> Result<usize, MultiError> {
        match self.errors {
            Some(errors) => Err(errors),
            None => Ok(self.deliveries.len()),
        }
    }
}

/// Fans notifications out to a fixed set of devices
#[derive(Debug, Clone)]
pub struct Dispatcher {
    devices: Arc<[Device]>,
    config: HttpClientConfig,
}

impl Dispatcher {
    /// Create a dispatcher whose device clients all share one transport
    pub fn new(devices: Vec<Device>, config: HttpClientConfig) -> Result<Self, ClientError> {
        let config = if config.client.is_some() {
            config
        } else {
            let client = config.build_transport()?;
            config.with_client(client)
        };

        Ok(Self {
            devices: devices.into(),
            config,
        })
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Send `notification` to every device and wait for all of them
    pub async fn send_all(
        &self,
        notification: &Notification,
        cancel: &CancellationToken,
    ) -> DispatchReport {
        let notification = Arc::new(notification.clone());
        debug!(devices = self.devices.len(), "dispatching notification");

        // one slot per device, indexed like `self.devices`
        let slots: Vec<_> = self
            .devices
            .iter()
            .map(|device| {
                let device = device.clone();
                let notification = Arc::clone(&notification);
                let config = self.config.clone();
                let cancel = cancel.child_token();
                tokio::spawn(async move { send(&device, &notification, config, &cancel).await })
            })
            .collect();

        let mut deliveries = Vec::new();
        let mut errors = Vec::new();
        for (device, slot) in self.devices.iter().zip(slots) {
            let outcome = slot.await.unwrap_or_else(|join_error| {
                Err(ClientError::Contract(format!(
                    "dispatch task ended abnormally: {join_error}"
                )))
            });

            match outcome {
                Ok(output) => {
                    debug!(
                        address = %device.address,
                        id = %output.success.id,
                        "notification created"
                    );
                    deliveries.push(Delivery {
                        address: device.address.clone(),
                        id: output.success.id,
                    });
                }
                Err(err) => {
                    warn!(address = %device.address, error = %err, "notification failed");
                    errors.push(DispatchError::new(device.address.clone(), err));
                }
            }
        }

        let report = DispatchReport {
            attempted: self.devices.len(),
            deliveries,
            errors: MultiError::from_errors(errors),
        };
        info!(
            attempted = report.attempted,
            sent = report.sent(),
            failed = report.failed(),
            "dispatch finished"
        );
        report
    }
}

async fn send(
    device: &Device,
    notification: &Notification,
    config: HttpClientConfig,
    cancel: &CancellationToken,
) -> Result<CreateNotificationOutput, ClientError> {
    let client = LaMetricClient::new(device, config)?;

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ClientError::Cancelled),
        result = client.create_notification(notification) => result,
    }
}
