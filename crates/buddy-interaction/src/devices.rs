//! Device analytics: device information and crash reports.

use std::sync::Arc;

use buddy_core::params::require_text;
use buddy_core::{PendingCall, SentinelPolicy, Session};

use crate::context::Scope;
use crate::methods;
use crate::search::location_params;

/// A crash to report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrashReport {
    pub method_name: String,
    pub stack_trace: String,
    pub location: Option<(f64, f64)>,
    pub metadata: Option<String>,
}

impl CrashReport {
    pub fn new(method_name: impl Into<String>, stack_trace: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            stack_trace: stack_trace.into(),
            ..Default::default()
        }
    }
}

/// Records device details against the application (or a user, when built
/// from a user scope).
#[derive(Clone)]
pub struct Devices {
    scope: Scope,
    session: Arc<Session>,
}

impl Devices {
    pub(crate) fn new(scope: Scope, session: Arc<Session>) -> Self {
        Self { scope, session }
    }

    /// Sends the device description from the session's [`DeviceInfo`].
    ///
    /// [`DeviceInfo`]: buddy_core::DeviceInfo
    pub fn record_information(
        &self,
        location: Option<(f64, f64)>,
        metadata: Option<&str>,
    ) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let device = self.session.device();
            let params = self
                .scope
                .params()
                .text("DeviceOSVersion", &device.os_version)
                .text("DeviceType", &device.device_type);
            let params = location_params(params, location, "Latitude", "Longitude")?
                .text("AppName", &device.process_name)
                .text("AppVersion", self.session.app_version_or_default())
                .optional_text("Metadata", metadata);
            Ok(self
                .scope
                .op(methods::DEVICE_INFORMATION_ADD, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn record_crash(&self, crash: &CrashReport) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let method_name = require_text("methodName", &crash.method_name)?;
            let device = self.session.device();
            let params = self
                .scope
                .params()
                .text("AppVersion", self.session.app_version_or_default())
                .text("DeviceOSVersion", &device.os_version)
                .text("DeviceType", &device.device_type)
                .text("MethodName", method_name)
                .text("StackTrace", &crash.stack_trace)
                .optional_text("Metadata", crash.metadata.as_deref());
            let params = location_params(params, crash.location, "Latitude", "Longitude")?;
            Ok(self
                .scope
                .op(methods::CRASH_RECORD_ADD, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }
}
