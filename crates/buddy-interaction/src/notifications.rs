//! Push notifications.
//!
//! Each backend is a [`PushChannel`]: it knows its method names, how a
//! device address is passed and how a message is encoded. [`Notifications`]
//! drives whichever channel the configuration selects.

use std::sync::Arc;

use chrono::NaiveDateTime;

use buddy_core::model::{NotificationGroup, RegisteredDevice};
use buddy_core::params::{require_non_negative, require_text};
use buddy_core::{BuddyError, NotificationPlatform, ParamBag, PendingCall, SentinelPolicy};

use crate::context::UserContext;
use crate::methods::{self, PushMethods};

/// A notification to send.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PushMessage {
    pub text: String,
    pub title: Option<String>,
    /// Apple only.
    pub badge: Option<i64>,
    /// Apple only.
    pub sound: Option<String>,
    pub custom_data: Option<String>,
    pub deliver_after: Option<NaiveDateTime>,
    pub recipients: Vec<i64>,
    pub group: Option<String>,
}

impl PushMessage {
    pub fn to_users(text: impl Into<String>, recipients: Vec<i64>) -> Self {
        Self {
            text: text.into(),
            recipients,
            ..Default::default()
        }
    }

    pub fn to_group(text: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            group: Some(group.into()),
            ..Default::default()
        }
    }
}

/// One push backend.
pub trait PushChannel: Send + Sync {
    fn platform(&self) -> NotificationPlatform;

    fn methods(&self) -> &'static PushMethods;

    /// Parameter carrying the device token or channel URI.
    fn device_param(&self) -> &'static str;

    /// Appends the platform-specific message body.
    fn encode(&self, params: ParamBag, message: &PushMessage) -> ParamBag;
}

pub struct ApplePush;

impl PushChannel for ApplePush {
    fn platform(&self) -> NotificationPlatform {
        NotificationPlatform::Apple
    }

    fn methods(&self) -> &'static PushMethods {
        &methods::PUSH_APPLE
    }

    fn device_param(&self) -> &'static str {
        "AppleDeviceToken"
    }

    fn encode(&self, params: ParamBag, message: &PushMessage) -> ParamBag {
        params
            .text("Message", &message.text)
            .optional_int("Badge", message.badge)
            .optional_text("Sound", message.sound.as_deref())
            .optional_text("CustomItems", message.custom_data.as_deref())
    }
}

pub struct AndroidPush;

impl PushChannel for AndroidPush {
    fn platform(&self) -> NotificationPlatform {
        NotificationPlatform::Android
    }

    fn methods(&self) -> &'static PushMethods {
        &methods::PUSH_ANDROID
    }

    fn device_param(&self) -> &'static str {
        "DeviceRegistrationID"
    }

    // Android takes one opaque payload; custom data wins when present.
    fn encode(&self, params: ParamBag, message: &PushMessage) -> ParamBag {
        params.text(
            "RawMessage",
            message.custom_data.as_deref().unwrap_or(&message.text),
        )
    }
}

pub struct Win8Push;

impl PushChannel for Win8Push {
    fn platform(&self) -> NotificationPlatform {
        NotificationPlatform::Win8
    }

    fn methods(&self) -> &'static PushMethods {
        &methods::PUSH_WIN8
    }

    fn device_param(&self) -> &'static str {
        "DeviceURI"
    }

    fn encode(&self, params: ParamBag, message: &PushMessage) -> ParamBag {
        params
            .optional_text("ToastTitle", message.title.as_deref())
            .text("ToastText", &message.text)
            .optional_text("ToastParameter", message.custom_data.as_deref())
    }
}

pub struct WindowsPhonePush;

impl PushChannel for WindowsPhonePush {
    fn platform(&self) -> NotificationPlatform {
        NotificationPlatform::WindowsPhone
    }

    fn methods(&self) -> &'static PushMethods {
        &methods::PUSH_WINDOWS_PHONE
    }

    fn device_param(&self) -> &'static str {
        "DeviceURI"
    }

    fn encode(&self, params: ParamBag, message: &PushMessage) -> ParamBag {
        params
            .optional_text("ToastTitle", message.title.as_deref())
            .text("ToastSubtitle", &message.text)
            .optional_text("ToastParameter", message.custom_data.as_deref())
    }
}

/// Picks the channel for `platform`.
pub fn channel_for(platform: NotificationPlatform) -> Arc<dyn PushChannel> {
    match platform {
        NotificationPlatform::Apple => Arc::new(ApplePush),
        NotificationPlatform::Android => Arc::new(AndroidPush),
        NotificationPlatform::Win8 => Arc::new(Win8Push),
        NotificationPlatform::WindowsPhone => Arc::new(WindowsPhonePush),
    }
}

#[derive(Clone)]
pub struct Notifications {
    ctx: UserContext,
    channel: Arc<dyn PushChannel>,
}

impl Notifications {
    pub(crate) fn new(ctx: UserContext, platform: NotificationPlatform) -> Self {
        Self::with_channel(ctx, channel_for(platform))
    }

    pub(crate) fn with_channel(ctx: UserContext, channel: Arc<dyn PushChannel>) -> Self {
        Self { ctx, channel }
    }

    pub fn platform(&self) -> NotificationPlatform {
        self.channel.platform()
    }

    /// Registers this device for pushes, optionally inside a named group.
    pub fn register_device(&self, device_address: &str, group: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let device_address = require_text("deviceAddress", device_address)?;
            let params = self
                .ctx
                .params()
                .text(self.channel.device_param(), device_address)
                .optional_text("GroupName", group);
            Ok(self
                .ctx
                .op(self.channel.methods().register, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn unregister_device(&self) -> PendingCall<bool> {
        self.ctx
            .op(self.channel.methods().unregister, self.ctx.params())
            .boolean(SentinelPolicy::NEGATIVE_ONE)
    }

    pub fn groups(&self) -> PendingCall<Vec<NotificationGroup>> {
        self.ctx
            .op(self.channel.methods().groups, self.ctx.params())
            .list(SentinelPolicy::STRICT)
    }

    /// Registered devices, optionally restricted to one group.
    pub fn registered_devices(&self, group: Option<&str>) -> PendingCall<Vec<RegisteredDevice>> {
        let params = self.ctx.params().optional_text("GroupName", group);
        self.ctx
            .op(self.channel.methods().devices, params)
            .list(SentinelPolicy::STRICT)
    }

    /// Sends to the listed users, to a group, or both.
    pub fn send_message(&self, message: &PushMessage) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            require_text("message", &message.text)?;
            if message.recipients.is_empty() && message.group.is_none() {
                return Err(BuddyError::invalid_argument(
                    "recipients",
                    "name at least one user or a group",
                ));
            }
            for id in &message.recipients {
                require_non_negative("recipients", *id)?;
            }
            if let Some(badge) = message.badge {
                require_non_negative("badge", badge)?;
            }
            let recipients = message
                .recipients
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let params = self
                .ctx
                .params()
                .text("UserIDList", recipients)
                .optional_text("GroupName", message.group.as_deref());
            let params = match message.deliver_after {
                Some(at) => params.date("DeliverAfter", at),
                None => params.text("DeliverAfter", ""),
            };
            let params = self.channel.encode(params, message);
            Ok(self
                .ctx
                .op(self.channel.methods().send, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }
}
