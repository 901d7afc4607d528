#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod config;
pub mod constants;
pub mod debug;
pub mod preflight;
pub mod topic;

pub use board::{BoardVariant, PinProfile};
pub use config::{BuildInputs, ConfigError, DeviceConfiguration, LoadReport, RequiredField, Warning};
pub use debug::{Console, DebugOutput, LogConsole};
pub use topic::{parse_topic, Topic, TopicKind, Topics};
