use crate::constants::DHT_PIN;
use crate::preflight::{detect_chip, Chip};

/// Hardware target the firmware was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardVariant {
    Esp32C3,
    Esp32S3,
    /// Unknown or unspecified target, default pin configuration
    Generic,
}

/// GPIO assignment for a board variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinProfile {
    pub dht: u8,
    /// Status LED, if the board has a known one
    pub led: Option<u8>,
}

impl BoardVariant {
    /// Detect the variant from a target identifier such as `esp32c3`,
    /// `ESP32-S3` or `CONFIG_IDF_TARGET_ESP32C3`.
    /// Returns `None` when the target is not recognised.
    pub fn detect(target: &str) -> Option<Self> {
        detect_chip(target).map(|chip| match chip {
            Chip::Esp32C3 => BoardVariant::Esp32C3,
            Chip::Esp32S3 => BoardVariant::Esp32S3,
        })
    }

    /// Board type string used for identification. "ESP32" for the generic
    /// fallback is a chosen default, not a reported chip name.
    pub fn board_type(&self) -> &'static str {
        match self {
            BoardVariant::Esp32C3 => "ESP32-C3",
            BoardVariant::Esp32S3 => "ESP32-S3",
            BoardVariant::Generic => "ESP32",
        }
    }

    /// Chosen defaults: the onboard LED of the Espressif devkits (GPIO 8 on
    /// C3, GPIO 48 on S3) and no LED on unknown boards.
    pub fn pins(&self) -> PinProfile {
        let led = match self {
            BoardVariant::Esp32C3 => Some(8),
            BoardVariant::Esp32S3 => Some(48),
            BoardVariant::Generic => None,
        };

        PinProfile { dht: DHT_PIN, led }
    }
}
