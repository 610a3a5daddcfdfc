use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default Buddy web service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://webservice.buddyplatform.com/Service/v1/BuddyService.ashx";

/// Request timeout applied when the config does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Push notification backend a device registers with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, Default,
)]
pub enum NotificationPlatform {
    #[default]
    Apple,
    Android,
    Win8,
    WindowsPhone,
}

/// Environment details recorded with device and crash reports.
///
/// Usually supplied by the embedding application. The default only knows the
/// compile-time target, so it is identical on every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub os_version: String,
    pub device_type: String,
    pub process_name: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            os_version: std::env::consts::OS.to_string(),
            device_type: std::env::consts::ARCH.to_string(),
            process_name: "buddy-sdk".to_string(),
        }
    }
}

/// Client configuration, usually loaded from `~/.config/buddy/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub app_name: String,
    pub app_password: String,
    pub app_version: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Fire a best-effort device registration after each successful login.
    pub record_device_on_login: bool,
    pub push_platform: NotificationPlatform,
    pub device: DeviceInfo,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            app_password: String::new(),
            app_version: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            record_device_on_login: true,
            push_platform: NotificationPlatform::default(),
            device: DeviceInfo::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(app_name: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            app_password: app_password.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = device;
        self
    }

    pub fn with_record_device_on_login(mut self, enabled: bool) -> Self {
        self.record_device_on_login = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
app_name = "demo"
app_password = "secret"
push_platform = "Android"
"#,
        )
        .unwrap();

        assert_eq!(config.app_name, "demo");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.push_platform, NotificationPlatform::Android);
        assert!(config.record_device_on_login);
    }

    #[test]
    fn test_defaults_are_stable() {
        assert_eq!(ClientConfig::default(), ClientConfig::default());

        let reloaded: ClientConfig = toml::from_str("app_name = \"demo\"").unwrap();
        assert_eq!(reloaded.device, DeviceInfo::default());
    }

    #[test]
    fn test_platform_parses_from_wire_name() {
        assert_eq!(
            "WindowsPhone".parse::<NotificationPlatform>().unwrap(),
            NotificationPlatform::WindowsPhone
        );
        assert!("Symbian".parse::<NotificationPlatform>().is_err());
    }
}
