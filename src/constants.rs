/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GPIO pin for the DHT22 sensor data line
pub const DHT_PIN: u8 = 2;

/// Interval between telemetry publications
pub const TELEMETRY_INTERVAL_MS: u64 = 2000;
/// Interval between WiFi connection checks
pub const WIFI_RECONNECT_INTERVAL_MS: u64 = 30_000;
/// Interval between MQTT reconnection attempts
pub const MQTT_RECONNECT_INTERVAL_MS: u64 = 5000;
/// DHT22 sensor read timeout
pub const SENSOR_READ_TIMEOUT_MS: u64 = 2000;
/// Delay before retrying a failed sensor read
pub const SENSOR_ERROR_RETRY_DELAY_MS: u64 = 5000;
/// Watchdog timeout
pub const WATCHDOG_TIMEOUT_MS: u64 = 60_000;

/// Default MQTT broker hostname or IP address
pub const MQTT_BROKER: &str = "localhost";
/// Default MQTT broker port (1883 for TCP, 8883 for TLS)
pub const MQTT_PORT: u16 = 1883;
/// MQTT quality of service level (0, 1 or 2)
pub const MQTT_QOS: u8 = 1;
/// Retain published messages on the broker
pub const MQTT_RETAIN: bool = true;

/// Maximum WiFi connection attempts
pub const MAX_WIFI_RETRY_ATTEMPTS: u32 = 30;
/// Maximum MQTT reconnection attempts before restart
pub const MAX_MQTT_RETRY_ATTEMPTS: u32 = 10;
/// Maximum consecutive errors before restart
pub const MAX_CONSECUTIVE_ERRORS: u32 = 5;

/// Decimal places for temperature readings
pub const TEMPERATURE_PRECISION: u8 = 1;
/// Decimal places for humidity readings
pub const HUMIDITY_PRECISION: u8 = 1;

/// Serial console speed
pub const SERIAL_BAUD_RATE: u32 = 115_200;
/// Debug output on the serial console
pub const DEBUG_OUTPUT: bool = true;

/// Buffer size for telemetry JSON payloads
pub const TELEMETRY_JSON_SIZE: usize = 200;
/// Buffer size for control JSON payloads
pub const CONTROL_JSON_SIZE: usize = 200;
/// Buffer size for acknowledgement JSON payloads
pub const ACK_JSON_SIZE: usize = 300;
/// Buffer size for status JSON payloads
pub const STATUS_JSON_SIZE: usize = 200;

/// WiFi connection timeout
pub const WIFI_CONNECT_TIMEOUT_MS: u64 = 30_000;
/// MQTT connection timeout
pub const MQTT_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Delay between network retry attempts
pub const NETWORK_RETRY_DELAY_MS: u64 = 1000;

/// Task stack size
pub const STACK_SIZE: usize = 8192;
/// Use statically allocated JSON buffers
pub const JSON_STATIC_BUFFER: bool = true;

/// Enable the watchdog timer
pub const ENABLE_WATCHDOG: bool = true;
/// Enable over-the-air updates
pub const ENABLE_OTA_UPDATES: bool = false;
/// Enable deep sleep mode for battery operation
pub const ENABLE_DEEP_SLEEP: bool = false;
/// Enable LED status indication
pub const ENABLE_LED_INDICATOR: bool = true;
/// Restart the device on critical errors
pub const RESTART_ON_CRITICAL_ERROR: bool = true;

pub use crate::preflight::DEVICE_ID_MAX_LEN;

/// Capacity of a rendered MQTT topic
pub const TOPIC_CAPACITY: usize = 64;
/// Maximum number of advisory warnings collected while loading
pub const MAX_WARNINGS: usize = 4;
