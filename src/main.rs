#![no_std]
#![no_main]

use core::fmt::Arguments;

use static_cell::StaticCell;

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println::logger::init_logger;

use esp32_classroom_node::{
    config::BUILD_INPUTS, debug_println, Console, DebugOutput, DeviceConfiguration,
};

esp_bootloader_esp_idf::esp_app_desc!();

static DEVICE_CONFIG: StaticCell<DeviceConfiguration<'static>> = StaticCell::new();

/// Debug console on the UART used by esp-println.
struct SerialConsole;

impl Console for SerialConsole {
    fn print(&mut self, args: Arguments<'_>) {
        esp_println::print!("{}", args);
    }

    fn println(&mut self, args: Arguments<'_>) {
        esp_println::println!("{}", args);
    }
}

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    init_logger(log::LevelFilter::Info);

    // Validate before touching any hardware
    let report = match DeviceConfiguration::load(&BUILD_INPUTS) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Invalid device configuration: {}", e);
            panic!("{}", e);
        }
    };

    if !report.warnings.is_empty() {
        log::warn!("Starting with {} configuration warning(s)", report.warnings.len());
    }

    let config: &'static DeviceConfiguration<'static> = DEVICE_CONFIG.init(report.config);

    let mut debug = DebugOutput::new(config.features.debug_output, SerialConsole);
    debug_println!(debug, "{}", config);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);

    // possibly high transient required at init
    // https://github.com/esp-rs/esp-hal/issues/1626
    Timer::after(Duration::from_millis(1000)).await;

    log::info!(
        "{} ready, publishing to {}",
        config.device_id,
        config.mqtt.topics.telemetry
    );
}
