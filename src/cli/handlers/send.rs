//! Send notification handler
//!
//! Builds the payload from the command arguments and dispatches it to every
//! configured device, or prints what would be sent in dry-run mode.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::super::commands::SendArgs;
use super::super::CliContext;
use crate::dispatch::Dispatcher;
use crate::errors::AppError;
use crate::lametric::{device_base_url, Notification};
use crate::lametric::client::NOTIFICATIONS_PATH;

/// Handler for the `send` command
pub struct SendHandler<'a> {
    context: &'a CliContext,
}

impl<'a> SendHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub async fn handle_send(&self, args: SendArgs) -> Result<()> {
        if args.sound_repeat.is_some() && args.sound.is_none() {
            return Err(AppError::invalid_argument("--sound-repeat", "requires --sound").into());
        }
        let notification = args.to_notification();

        if args.dry_run {
            return self.print_dry_run(&notification);
        }

        let config = &self.context.config;
        if config.devices.is_empty() {
            warn!(config = %self.context.config_path.display(), "no devices configured");
        }

        let dispatcher = Dispatcher::new(config.devices.clone(), config.http_client_config())
            .map_err(AppError::from)?;

        let cancel = CancellationToken::new();
        let interrupt = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling in-flight notifications");
                    cancel.cancel();
                }
            }
        });

        let report = dispatcher.send_all(&notification, &cancel).await;
        interrupt.abort();

        for delivery in &report.deliveries {
            println!("{} -> notification {}", delivery.address, delivery.id);
        }

        let sent = report.into_result().map_err(AppError::from)?;
        info!("{sent} notifications sent");
        println!("{sent} notifications sent");
        Ok(())
    }

    fn print_dry_run(&self, notification: &Notification) -> Result<()> {
        let payload =
            serde_json::to_string_pretty(notification).context("Failed to serialize payload")?;

        println!("Dry run - would send notification:");
        println!("{payload}");

        let devices = &self.context.config.devices;
        if devices.is_empty() {
            println!("No devices configured");
        }
        for device in devices {
            match device_base_url(&device.address) {
                Ok(mut url) => {
                    url.set_path(NOTIFICATIONS_PATH);
                    println!("POST {url}");
                }
                Err(err) => println!("{}: {err}", device.address),
            }
        }
        Ok(())
    }
}
