use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

// Same checks the firmware runs at startup
#[allow(dead_code)]
#[path = "src/preflight.rs"]
mod preflight;

const CONFIG_FILE: &str = "cfg.toml";

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    wifi_ssid: Option<String>,
    wifi_password: Option<String>,
    device_id: Option<String>,
    board_target: Option<String>,
    mqtt_broker: Option<String>,
    mqtt_port: Option<u16>,
    debug_output: Option<bool>,
}

// Environment variables take precedence over cfg.toml
fn env_override(name: &str, value: &mut Option<String>) {
    println!("cargo:rerun-if-env-changed={}", name);
    if let Ok(v) = env::var(name) {
        *value = Some(v);
    }
}

fn env_override_parsed<T: std::str::FromStr>(
    name: &str,
    value: &mut Option<T>,
) -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed={}", name);
    if let Ok(v) = env::var(name) {
        let parsed = v
            .parse()
            .map_err(|_| format!("{} has an invalid value: {:?}", name, v))?;
        *value = Some(parsed);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);
    println!("cargo:rerun-if-changed=src/preflight.rs");

    // Read and parse, a missing file leaves every value unset
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")?;
    let config_path = Path::new(&manifest_dir).join(CONFIG_FILE);
    let mut raw: RawConfig = if config_path.exists() {
        toml::from_str(&fs::read_to_string(&config_path)?)?
    } else {
        RawConfig::default()
    };

    env_override("WIFI_SSID", &mut raw.wifi_ssid);
    env_override("WIFI_PASSWORD", &mut raw.wifi_password);
    env_override("DEVICE_ID", &mut raw.device_id);
    env_override("IDF_TARGET", &mut raw.board_target);
    env_override("MQTT_BROKER", &mut raw.mqtt_broker);
    env_override_parsed("MQTT_PORT", &mut raw.mqtt_port)?;
    env_override_parsed("DEBUG_OUTPUT", &mut raw.debug_output)?;

    // Firmware builds must not start without these
    if env::var_os("CARGO_FEATURE_FIRMWARE").is_some() {
        preflight::check_required(
            raw.wifi_ssid.as_deref(),
            raw.wifi_password.as_deref(),
            raw.device_id.as_deref(),
        )
        .map_err(|e| format!("{} (set it in {} or the environment)", e, CONFIG_FILE))?;

        let chip = raw.board_target.as_deref().and_then(preflight::detect_chip);
        if chip.is_none() {
            println!("cargo:warning=Unknown ESP32 variant, using default pin configuration");
        }
    }

    // Generate Rust code
    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    let code = format!(
        r#"
        pub const BUILD_INPUTS: BuildInputs<'static> = BuildInputs {{
            wifi_ssid: {ssid:?},
            wifi_password: {psk:?},
            device_id: {id:?},
            board_target: {target:?},
            mqtt_broker: {broker:?},
            mqtt_port: {port:?},
            debug_output: {debug:?},
        }};
    "#,
        ssid = raw.wifi_ssid.as_deref(),
        psk = raw.wifi_password.as_deref(),
        id = raw.device_id.as_deref(),
        target = raw.board_target.as_deref(),
        broker = raw.mqtt_broker.as_deref(),
        port = raw.mqtt_port,
        debug = raw.debug_output,
    );

    fs::write(dest_path, code)?;
    Ok(())
}
