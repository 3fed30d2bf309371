//! LaMetric device API
//!
//! Payload types for the notification endpoint and a client bound to a
//! single device.

pub mod client;
pub mod types;

pub use client::{device_base_url, LaMetricClient, NotificationClient};
pub use types::{
    icons, sounds, CreateNotificationOutput, Frame, GoalData, IconType, Identifier, Notification,
    NotificationModel, Priority, Sound, SoundCategory,
};
