//! LaMetric notification payload
//!
//! Mirrors the JSON body accepted by `POST /api/v2/device/notifications`.
//! Optional fields are left out of the serialized payload when unset.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Info,
    Warning,
    Critical,
}

/// Icon shown while the notification slides in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    None,
    Info,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    Alarms,
    Notifications,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<IconType>,
    /// Milliseconds the notification stays in the device history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<u64>,
    pub model: NotificationModel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationModel {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<Sound>,
    /// Times the frames are shown; `0` keeps them until dismissed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_data: Option<GoalData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chart_data: Vec<i64>,
}

/// Progress gauge frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SoundCategory>,
    /// See [`sounds`] for known ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
}

/// Acknowledgment returned by the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNotificationOutput {
    pub success: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub id: String,
}

impl Notification {
    /// Notification made of the given frames, everything else unset
    pub fn with_frames(frames: Vec<Frame>) -> Self {
        Self {
            model: NotificationModel {
                frames,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl Frame {
    /// Icon + text frame
    pub fn text(icon: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn goal(icon: impl Into<String>, goal: GoalData) -> Self {
        Self {
            icon: Some(icon.into()),
            goal_data: Some(goal),
            ..Default::default()
        }
    }

    pub fn chart(data: Vec<i64>) -> Self {
        Self {
            chart_data: data,
            ..Default::default()
        }
    }
}

impl Sound {
    pub fn new(category: SoundCategory, id: impl Into<String>) -> Self {
        Self {
            category: Some(category),
            id: Some(id.into()),
            repeat: None,
        }
    }
}

/// Well-known icon ids
pub mod icons {
    pub const APPLE_LOGO: &str = "i37";
    pub const ATTENTION: &str = "i555";
    pub const BEACH: &str = "i386";
    pub const CALENDAR: &str = "i66";
    pub const CLOCK: &str = "i82";
    pub const DOGE: &str = "i6219";
    pub const DOLLAR: &str = "i34";
    pub const FACEBOOK: &str = "i128";
    pub const FACEBOOK_ALT: &str = "i28817";
    pub const GMAIL: &str = "i43";
    pub const HEART: &str = "i230";
    pub const INSTAGRAM: &str = "i3741";
    pub const MARIO: &str = "i3061";
    pub const MATRIX: &str = "i653";
    pub const POOP: &str = "i8520";
    pub const RSS: &str = "i85";
    pub const SMILE: &str = "i87";
    pub const TOOL: &str = "i93";
    pub const TWITCH: &str = "i549";
    pub const TWITTER: &str = "i70";
    pub const USA: &str = "i413";
    pub const YOUTUBE: &str = "i974";
}

/// Built-in sound ids
///
/// Ids from the first group belong to [`SoundCategory::Notifications`],
/// `ALARM*` ids to [`SoundCategory::Alarms`].
///
/// [`SoundCategory::Notifications`]: super::SoundCategory::Notifications
/// [`SoundCategory::Alarms`]: super::SoundCategory::Alarms
pub mod sounds {
    pub const BICYCLE: &str = "bicycle";
    pub const CAR: &str = "car";
    pub const CASH: &str = "cash";
    pub const CAT: &str = "cat";
    pub const DOG: &str = "dog";
    pub const DOG2: &str = "dog2";
    pub const ENERGY: &str = "energy";
    pub const KNOCK_KNOCK: &str = "knock-knock";
    pub const LETTER_EMAIL: &str = "letter_email";
    pub const LOSE1: &str = "lose1";
    pub const LOSE2: &str = "lose2";
    pub const NEGATIVE1: &str = "negative1";
    pub const NEGATIVE2: &str = "negative2";
    pub const NEGATIVE3: &str = "negative3";
    pub const NEGATIVE4: &str = "negative4";
    pub const NEGATIVE5: &str = "negative5";
    pub const NOTIFICATION: &str = "notification";
    pub const NOTIFICATION2: &str = "notification2";
    pub const NOTIFICATION3: &str = "notification3";
    pub const NOTIFICATION4: &str = "notification4";
    pub const OPEN_DOOR: &str = "open_door";
    pub const POSITIVE1: &str = "positive1";
    pub const POSITIVE2: &str = "positive2";
    pub const POSITIVE3: &str = "positive3";
    pub const POSITIVE4: &str = "positive4";
    pub const POSITIVE5: &str = "positive5";
    pub const POSITIVE6: &str = "positive6";
    pub const STATISTIC: &str = "statistic";
    pub const THUNDER: &str = "thunder";
    pub const WATER1: &str = "water1";
    pub const WATER2: &str = "water2";
    pub const WIN: &str = "win";
    pub const WIN2: &str = "win2";
    pub const WIND: &str = "wind";
    pub const WIND_SHORT: &str = "wind_short";

    pub const ALARM1: &str = "alarm1";
    pub const ALARM2: &str = "alarm2";
    pub const ALARM3: &str = "alarm3";
    pub const ALARM4: &str = "alarm4";
    pub const ALARM5: &str = "alarm5";
    pub const ALARM6: &str = "alarm6";
    pub const ALARM7: &str = "alarm7";
    pub const ALARM8: &str = "alarm8";
    pub const ALARM9: &str = "alarm9";
    pub const ALARM10: &str = "alarm10";
    pub const ALARM11: &str = "alarm11";
    pub const ALARM12: &str = "alarm12";
    pub const ALARM13: &str = "alarm13";
}
