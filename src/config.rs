use core::fmt;
use core::time::Duration;

use heapless::{String, Vec};

use crate::board::{BoardVariant, PinProfile};
use crate::constants::*;
use crate::preflight::{check_required, Required};
pub use crate::preflight::{ConfigError, RequiredField};
use crate::topic::{self, Topics};

/// Values supplied from outside the firmware (cfg.toml or the build
/// environment). Anything left `None` falls back to the defaults in
/// [`crate::constants`], except for the required fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildInputs<'a> {
    // Wi-Fi SSID to connect to (required)
    pub wifi_ssid: Option<&'a str>,

    // Wi-Fi password (required)
    pub wifi_password: Option<&'a str>,

    // Unique device identifier, used in every MQTT topic (required)
    pub device_id: Option<&'a str>,

    // Hardware target, e.g. "esp32c3" (optional)
    pub board_target: Option<&'a str>,

    // MQTT broker hostname or IP address (optional)
    pub mqtt_broker: Option<&'a str>,

    // MQTT broker port (optional)
    pub mqtt_port: Option<u16>,

    // Debug output on the serial console (optional)
    pub debug_output: Option<bool>,
}

impl BuildInputs<'static> {
    pub const EMPTY: Self = BuildInputs {
        wifi_ssid: None,
        wifi_password: None,
        device_id: None,
        board_target: None,
        mqtt_broker: None,
        mqtt_port: None,
        debug_output: None,
    };
}

// build inputs are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));


/// Advisory conditions found while loading. They never stop startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning<'a> {
    UnknownBoardVariant { target: Option<&'a str> },
}

impl fmt::Display for Warning<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownBoardVariant { target: Some(target) } => write!(
                f,
                "Unknown ESP32 variant {:?}, using default pin configuration",
                target
            ),
            Warning::UnknownBoardVariant { target: None } => {
                write!(f, "Unknown ESP32 variant, using default pin configuration")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    pub telemetry_interval: Duration,
    pub wifi_reconnect_interval: Duration,
    pub mqtt_reconnect_interval: Duration,
    pub sensor_read_timeout: Duration,
    pub sensor_error_retry_delay: Duration,
    pub watchdog_timeout: Duration,
    pub wifi_connect_timeout: Duration,
    pub mqtt_connect_timeout: Duration,
    pub network_retry_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            telemetry_interval: Duration::from_millis(TELEMETRY_INTERVAL_MS),
            wifi_reconnect_interval: Duration::from_millis(WIFI_RECONNECT_INTERVAL_MS),
            mqtt_reconnect_interval: Duration::from_millis(MQTT_RECONNECT_INTERVAL_MS),
            sensor_read_timeout: Duration::from_millis(SENSOR_READ_TIMEOUT_MS),
            sensor_error_retry_delay: Duration::from_millis(SENSOR_ERROR_RETRY_DELAY_MS),
            watchdog_timeout: Duration::from_millis(WATCHDOG_TIMEOUT_MS),
            wifi_connect_timeout: Duration::from_millis(WIFI_CONNECT_TIMEOUT_MS),
            mqtt_connect_timeout: Duration::from_millis(MQTT_CONNECT_TIMEOUT_MS),
            network_retry_delay: Duration::from_millis(NETWORK_RETRY_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttSettings<'a> {
    pub broker: &'a str,
    pub port: u16,
    /// Stored as configured, range is not checked
    pub qos: u8,
    pub retain: bool,
    pub topics: Topics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    pub max_wifi_retry_attempts: u32,
    pub max_mqtt_retry_attempts: u32,
    pub max_consecutive_errors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSettings {
    pub temperature_precision: u8,
    pub humidity_precision: u8,
}

/// Buffer size hints for downstream components, in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffers {
    pub telemetry_json: usize,
    pub control_json: usize,
    pub ack_json: usize,
    pub status_json: usize,
    pub stack_size: usize,
    pub json_static_buffer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    pub watchdog: bool,
    pub ota_updates: bool,
    pub deep_sleep: bool,
    pub led_indicator: bool,
    pub restart_on_critical_error: bool,
    pub debug_output: bool,
}

/// Every device setting, resolved and validated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfiguration<'a> {
    pub device_id: String<DEVICE_ID_MAX_LEN>,
    pub board: BoardVariant,
    pub pins: PinProfile,
    pub wifi_ssid: &'a str,
    pub wifi_password: &'a str,
    pub timing: Timing,
    pub mqtt: MqttSettings<'a>,
    pub limits: Limits,
    pub sensor: SensorSettings,
    pub serial_baud_rate: u32,
    pub buffers: Buffers,
    pub features: Features,
}

/// Result of a successful load: the configuration plus any warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport<'a> {
    pub config: DeviceConfiguration<'a>,
    pub warnings: Vec<Warning<'a>, MAX_WARNINGS>,
}

impl<'a> DeviceConfiguration<'a> {
    /// Validate `inputs` and assemble the configuration.
    ///
    /// Missing or empty required values fail the whole load. An unknown
    /// board target is only a warning and selects the generic pin profile.
    pub fn load(inputs: &BuildInputs<'a>) -> Result<LoadReport<'a>, ConfigError> {
        let Required {
            wifi_ssid,
            wifi_password,
            device_id: id,
        } = check_required(inputs.wifi_ssid, inputs.wifi_password, inputs.device_id)?;

        let too_long = ConfigError::DeviceIdTooLong { len: id.len() };
        let device_id = String::try_from(id).map_err(|_| too_long)?;
        let topics = Topics::new(id).map_err(|e| match e {
            topic::Error::DeviceIdTooLong | topic::Error::BufferOverflow => too_long,
        })?;

        let mut warnings = Vec::new();
        let board = match inputs.board_target.and_then(BoardVariant::detect) {
            Some(board) => board,
            None => {
                let warning = Warning::UnknownBoardVariant {
                    target: inputs.board_target,
                };
                log::warn!("{}", warning);
                // Capacity is MAX_WARNINGS, this is the only push
                warnings.push(warning).ok();
                BoardVariant::Generic
            }
        };

        let config = DeviceConfiguration {
            device_id,
            board,
            pins: board.pins(),
            wifi_ssid,
            wifi_password,
            timing: Timing::default(),
            mqtt: MqttSettings {
                broker: inputs.mqtt_broker.unwrap_or(MQTT_BROKER),
                port: inputs.mqtt_port.unwrap_or(MQTT_PORT),
                qos: MQTT_QOS,
                retain: MQTT_RETAIN,
                topics,
            },
            limits: Limits {
                max_wifi_retry_attempts: MAX_WIFI_RETRY_ATTEMPTS,
                max_mqtt_retry_attempts: MAX_MQTT_RETRY_ATTEMPTS,
                max_consecutive_errors: MAX_CONSECUTIVE_ERRORS,
            },
            sensor: SensorSettings {
                temperature_precision: TEMPERATURE_PRECISION,
                humidity_precision: HUMIDITY_PRECISION,
            },
            serial_baud_rate: SERIAL_BAUD_RATE,
            buffers: Buffers {
                telemetry_json: TELEMETRY_JSON_SIZE,
                control_json: CONTROL_JSON_SIZE,
                ack_json: ACK_JSON_SIZE,
                status_json: STATUS_JSON_SIZE,
                stack_size: STACK_SIZE,
                json_static_buffer: JSON_STATIC_BUFFER,
            },
            features: Features {
                watchdog: ENABLE_WATCHDOG,
                ota_updates: ENABLE_OTA_UPDATES,
                deep_sleep: ENABLE_DEEP_SLEEP,
                led_indicator: ENABLE_LED_INDICATOR,
                restart_on_critical_error: RESTART_ON_CRITICAL_ERROR,
                debug_output: inputs.debug_output.unwrap_or(DEBUG_OUTPUT),
            },
        };

        log::info!(
            "Configuration loaded for {} on {}",
            config.device_id,
            config.board.board_type()
        );

        Ok(LoadReport { config, warnings })
    }

    pub fn board_type(&self) -> &'static str {
        self.board.board_type()
    }
}

// Startup banner; never prints the Wi-Fi password
impl fmt::Display for DeviceConfiguration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device:    {} ({}) v{}", self.device_id, self.board_type(), VERSION)?;
        write!(f, "Pins:      DHT={}", self.pins.dht)?;
        match self.pins.led {
            Some(led) => writeln!(f, " LED={}", led)?,
            None => writeln!(f, " LED=none")?,
        }
        writeln!(f, "WiFi:      {}", self.wifi_ssid)?;
        writeln!(
            f,
            "MQTT:      {}:{} qos={} retain={}",
            self.mqtt.broker, self.mqtt.port, self.mqtt.qos, self.mqtt.retain
        )?;
        writeln!(
            f,
            "Telemetry: {} every {} ms",
            self.mqtt.topics.telemetry,
            self.timing.telemetry_interval.as_millis()
        )?;
        writeln!(f, "Control:   {}", self.mqtt.topics.control)?;
        writeln!(f, "Ack:       {}", self.mqtt.topics.ack)?;
        write!(f, "Status:    {}", self.mqtt.topics.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BuildInputs<'static> {
        BuildInputs {
            wifi_ssid: Some("classroom"),
            wifi_password: Some("hunter22"),
            device_id: Some("ESP32_001"),
            board_target: Some("esp32c3"),
            ..BuildInputs::EMPTY
        }
    }

    #[test]
    fn loads_defaults() {
        let report = DeviceConfiguration::load(&valid()).unwrap();
        let config = report.config;

        assert!(report.warnings.is_empty());
        assert_eq!(config.device_id.as_str(), "ESP32_001");
        assert_eq!(config.board, BoardVariant::Esp32C3);
        assert_eq!(config.board_type(), "ESP32-C3");
        assert_eq!(config.pins.led, Some(8));
        assert_eq!(config.mqtt.broker, "localhost");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.mqtt.qos, 1);
        assert!(config.mqtt.retain);
        assert_eq!(config.timing.telemetry_interval, Duration::from_secs(2));
        assert_eq!(config.timing.watchdog_timeout, Duration::from_secs(60));
        assert_eq!(config.limits.max_wifi_retry_attempts, 30);
        assert_eq!(config.buffers.ack_json, 300);
        assert_eq!(config.serial_baud_rate, 115_200);
        assert!(config.features.debug_output);
        assert!(!config.features.ota_updates);
    }

    #[test]
    fn overrides_are_applied() {
        let inputs = BuildInputs {
            mqtt_broker: Some("broker.local"),
            mqtt_port: Some(8883),
            debug_output: Some(false),
            ..valid()
        };
        let config = DeviceConfiguration::load(&inputs).unwrap().config;

        assert_eq!(config.mqtt.broker, "broker.local");
        assert_eq!(config.mqtt.port, 8883);
        assert!(!config.features.debug_output);
    }

    #[test]
    fn missing_fields_are_named() {
        let inputs = BuildInputs {
            wifi_ssid: None,
            ..valid()
        };
        let err = DeviceConfiguration::load(&inputs).unwrap_err();
        assert_eq!(err, ConfigError::Missing(RequiredField::WifiSsid));
        assert_eq!(format!("{}", err), "WIFI_SSID must be defined");

        let inputs = BuildInputs {
            wifi_password: None,
            ..valid()
        };
        assert_eq!(
            DeviceConfiguration::load(&inputs).unwrap_err(),
            ConfigError::Missing(RequiredField::WifiPassword)
        );
    }

    #[test]
    fn first_failure_wins() {
        let err = DeviceConfiguration::load(&BuildInputs::EMPTY).unwrap_err();
        assert_eq!(err, ConfigError::Missing(RequiredField::WifiSsid));
    }

    #[test]
    fn empty_device_id_is_rejected() {
        let inputs = BuildInputs {
            device_id: Some(""),
            ..valid()
        };
        let err = DeviceConfiguration::load(&inputs).unwrap_err();
        assert_eq!(err, ConfigError::Empty(RequiredField::DeviceId));
        assert_eq!(format!("{}", err), "DEVICE_ID cannot be empty");
    }

    #[test]
    fn overlong_device_id_is_rejected() {
        let id = "d".repeat(DEVICE_ID_MAX_LEN + 1);
        let inputs = BuildInputs {
            device_id: Some(id.as_str()),
            ..valid()
        };
        assert_eq!(
            DeviceConfiguration::load(&inputs).unwrap_err(),
            ConfigError::DeviceIdTooLong {
                len: DEVICE_ID_MAX_LEN + 1
            }
        );
    }

    #[test]
    fn unknown_board_warns() {
        let inputs = BuildInputs {
            board_target: Some("esp32h2"),
            ..valid()
        };
        let report = DeviceConfiguration::load(&inputs).unwrap();

        assert_eq!(report.config.board, BoardVariant::Generic);
        assert_eq!(report.config.pins, BoardVariant::Generic.pins());
        assert_eq!(
            report.warnings.as_slice(),
            &[Warning::UnknownBoardVariant {
                target: Some("esp32h2")
            }]
        );
    }

    #[test]
    fn banner_hides_password() {
        let config = DeviceConfiguration::load(&valid()).unwrap().config;
        let banner = format!("{}", config);

        assert!(banner.contains("ESP32_001 (ESP32-C3)"));
        assert!(banner.contains("iot/classroom/ESP32_001/telemetry every 2000 ms"));
        assert!(!banner.contains("hunter22"));
    }
}
