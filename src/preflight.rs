//! Checks shared by the library and the build script.
//!
//! `build.rs` pulls this file in with `#[path]`, so it must only use `core`.

use core::fmt;

/// Longest device identifier that still fits every rendered topic
pub const DEVICE_ID_MAX_LEN: usize = 32;

/// Configuration values that must be supplied externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    WifiSsid,
    WifiPassword,
    DeviceId,
}

impl RequiredField {
    pub const ALL: [RequiredField; 3] = [
        RequiredField::WifiSsid,
        RequiredField::WifiPassword,
        RequiredField::DeviceId,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RequiredField::WifiSsid => "WIFI_SSID",
            RequiredField::WifiPassword => "WIFI_PASSWORD",
            RequiredField::DeviceId => "DEVICE_ID",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Missing(RequiredField),
    Empty(RequiredField),
    DeviceIdTooLong { len: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(field) => write!(f, "{} must be defined", field.name()),
            ConfigError::Empty(field) => write!(f, "{} cannot be empty", field.name()),
            ConfigError::DeviceIdTooLong { len } => write!(
                f,
                "DEVICE_ID is {} bytes long, at most {} are allowed",
                len, DEVICE_ID_MAX_LEN
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// The required values, all present and non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required<'a> {
    pub wifi_ssid: &'a str,
    pub wifi_password: &'a str,
    pub device_id: &'a str,
}

fn required(value: Option<&str>, field: RequiredField) -> Result<&str, ConfigError> {
    match value {
        None => Err(ConfigError::Missing(field)),
        Some(value) if value.is_empty() => Err(ConfigError::Empty(field)),
        Some(value) => Ok(value),
    }
}

/// Check SSID, password and device id in that order; the first failure wins.
pub fn check_required<'a>(
    wifi_ssid: Option<&'a str>,
    wifi_password: Option<&'a str>,
    device_id: Option<&'a str>,
) -> Result<Required<'a>, ConfigError> {
    let wifi_ssid = required(wifi_ssid, RequiredField::WifiSsid)?;
    let wifi_password = required(wifi_password, RequiredField::WifiPassword)?;
    let device_id = required(device_id, RequiredField::DeviceId)?;

    if device_id.len() > DEVICE_ID_MAX_LEN {
        return Err(ConfigError::DeviceIdTooLong {
            len: device_id.len(),
        });
    }

    Ok(Required {
        wifi_ssid,
        wifi_password,
        device_id,
    })
}

/// Chips with a dedicated pin profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    Esp32C3,
    Esp32S3,
}

/// Recognise a target identifier such as `esp32c3`, `ESP32-S3` or
/// `CONFIG_IDF_TARGET_ESP32C3`. Case, separators and surrounding whitespace
/// are ignored.
pub fn detect_chip(target: &str) -> Option<Chip> {
    let mut normalized = [0u8; 32];
    let mut len = 0;
    for byte in target.trim().bytes().filter(u8::is_ascii_alphanumeric) {
        if len == normalized.len() {
            return None;
        }
        normalized[len] = byte.to_ascii_uppercase();
        len += 1;
    }

    let name = &normalized[..len];
    let name = name.strip_prefix(b"CONFIGIDFTARGET").unwrap_or(name);

    match name {
        b"ESP32C3" => Some(Chip::Esp32C3),
        b"ESP32S3" => Some(Chip::Esp32S3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_targets() {
        assert_eq!(detect_chip("esp32c3"), Some(Chip::Esp32C3));
        assert_eq!(detect_chip("ESP32-C3"), Some(Chip::Esp32C3));
        assert_eq!(detect_chip(" esp32_s3 \n"), Some(Chip::Esp32S3));
        assert_eq!(detect_chip("CONFIG_IDF_TARGET_ESP32S3"), Some(Chip::Esp32S3));
    }

    #[test]
    fn rejects_unknown_targets() {
        assert_eq!(detect_chip("esp32"), None);
        assert_eq!(detect_chip("esp32c6"), None);
        assert_eq!(detect_chip(""), None);
        assert_eq!(
            detect_chip("an-unreasonably-long-target-identifier-string"),
            None
        );
    }

    #[test]
    fn required_values_in_order() {
        assert_eq!(
            check_required(None, None, None),
            Err(ConfigError::Missing(RequiredField::WifiSsid))
        );
        assert_eq!(
            check_required(Some("net"), Some(""), None),
            Err(ConfigError::Empty(RequiredField::WifiPassword))
        );
        assert_eq!(
            check_required(Some("net"), Some("pw"), Some("ESP32_001")),
            Ok(Required {
                wifi_ssid: "net",
                wifi_password: "pw",
                device_id: "ESP32_001",
            })
        );
    }

    #[test]
    fn device_id_length_is_bounded() {
        let id = "d".repeat(40);
        assert_eq!(
            check_required(Some("net"), Some("pw"), Some(id.as_str())),
            Err(ConfigError::DeviceIdTooLong { len: 40 })
        );

        let id = "d".repeat(DEVICE_ID_MAX_LEN);
        assert!(check_required(Some("net"), Some("pw"), Some(id.as_str())).is_ok());
    }
}
