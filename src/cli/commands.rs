//! Command definitions and structures for the CLI
//!
//! This module contains the clap-based command line argument definitions,
//! including the main CLI structure and all subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::lametric::{
    icons, Frame, IconType, Notification, NotificationModel, Priority, Sound, SoundCategory,
};

/// Main CLI structure
#[derive(Parser)]
#[command(name = "lametric-notify")]
#[command(about = "Push notifications to LaMetric displays over their local API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the YAML configuration file
    #[arg(short, long, global = true, env = "LAMETRIC_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a notification to every configured device (default)
    Send(SendArgs),

    /// List configured devices
    Devices,
}

/// Notification content for the `send` command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SendArgs {
    /// Frame text
    #[arg(short, long, default_value = "ALERT")]
    pub text: String,

    /// Frame icon id (e.g. i555)
    #[arg(short, long, default_value = icons::ATTENTION)]
    pub icon: String,

    /// Notification priority
    #[arg(short, long, value_enum)]
    pub priority: Option<Priority>,

    /// Icon shown while the notification slides in
    #[arg(long, value_enum)]
    pub icon_type: Option<IconType>,

    /// Sound id (e.g. alarm10, positive1)
    #[arg(short, long)]
    pub sound: Option<String>,

    /// Sound category
    #[arg(long, value_enum, default_value = "notifications")]
    pub sound_category: SoundCategory,

    /// Times to repeat the sound
    #[arg(long)]
    pub sound_repeat: Option<u32>,

    /// Times the frames are shown (0 = until dismissed)
    #[arg(long)]
    pub cycles: Option<u32>,

    /// Milliseconds the notification stays in the device history
    #[arg(long)]
    pub lifetime: Option<u64>,

    /// Dry run - print the payload and targets without sending
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for SendArgs {
    fn default() -> Self {
        Self {
            text: "ALERT".to_string(),
            icon: icons::ATTENTION.to_string(),
            priority: None,
            icon_type: None,
            sound: None,
            sound_category: SoundCategory::Notifications,
            sound_repeat: None,
            cycles: None,
            lifetime: None,
            dry_run: false,
        }
    }
}

impl SendArgs {
    /// Build the notification payload described by these arguments
    pub fn to_notification(&self) -> Notification {
        let sound = self.sound.as_ref().map(|id| Sound {
            repeat: self.sound_repeat,
            ..Sound::new(self.sound_category, id.clone())
        });

        Notification {
            priority: self.priority,
            icon_type: self.icon_type,
            lifetime: self.lifetime,
            model: NotificationModel {
                frames: vec![Frame::text(self.icon.clone(), self.text.clone())],
                sound,
                cycles: self.cycles,
            },
        }
    }
}
