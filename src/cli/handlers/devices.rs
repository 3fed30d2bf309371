//! Device listing handler

use anyhow::Result;

use super::super::CliContext;
use crate::lametric::device_base_url;

/// Handler for the `devices` command
pub struct DevicesHandler<'a> {
    context: &'a CliContext,
}

impl<'a> DevicesHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub fn handle_list(&self) -> Result<()> {
        let devices = &self.context.config.devices;
        if devices.is_empty() {
            println!("No devices configured in {}", self.context.config_path.display());
            return Ok(());
        }

        println!("Configured devices ({}):", devices.len());
        for device in devices {
            let url = device_base_url(&device.address)
                .map(|url| url.to_string())
                .unwrap_or_else(|err| format!("<{err}>"));
            println!("  {}  {}  token={}", device.address, url, device.masked_token());
        }
        Ok(())
    }
}
