use core::fmt::Write;

use heapless::String;

use crate::constants::{DEVICE_ID_MAX_LEN, TOPIC_CAPACITY};

/// Placeholder substituted with the device identifier.
pub const DEVICE_ID_PLACEHOLDER: &str = "{device_id}";

pub const TELEMETRY_TOPIC_TEMPLATE: &str = "iot/classroom/{device_id}/telemetry";
pub const CONTROL_TOPIC_TEMPLATE: &str = "iot/classroom/{device_id}/control";
pub const ACK_TOPIC_TEMPLATE: &str = "iot/classroom/{device_id}/ack";
pub const STATUS_TOPIC_TEMPLATE: &str = "iot/classroom/{device_id}/status";

/// A rendered MQTT topic
pub type Topic = String<TOPIC_CAPACITY>;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    DeviceIdTooLong,
    BufferOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    Telemetry,
    Control,
    Ack,
    Status,
}

impl TopicKind {
    pub const ALL: [TopicKind; 4] = [
        TopicKind::Telemetry,
        TopicKind::Control,
        TopicKind::Ack,
        TopicKind::Status,
    ];

    pub fn template(&self) -> &'static str {
        match self {
            TopicKind::Telemetry => TELEMETRY_TOPIC_TEMPLATE,
            TopicKind::Control => CONTROL_TOPIC_TEMPLATE,
            TopicKind::Ack => ACK_TOPIC_TEMPLATE,
            TopicKind::Status => STATUS_TOPIC_TEMPLATE,
        }
    }

    /// Last topic segment, e.g. `telemetry`
    pub fn suffix(&self) -> &'static str {
        match self {
            TopicKind::Telemetry => "telemetry",
            TopicKind::Control => "control",
            TopicKind::Ack => "ack",
            TopicKind::Status => "status",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        TopicKind::ALL.into_iter().find(|kind| kind.suffix() == suffix)
    }

    /// Substitute `device_id` into this kind's template.
    pub fn render(&self, device_id: &str) -> Result<Topic, Error> {
        if device_id.len() > DEVICE_ID_MAX_LEN {
            return Err(Error::DeviceIdTooLong);
        }
        render_template(self.template(), device_id)
    }

    /// Single-level wildcard filter matching this kind for every device,
    /// e.g. `iot/classroom/+/telemetry`.
    pub fn filter(&self) -> Topic {
        // Templates are far shorter than TOPIC_CAPACITY
        render_template(self.template(), "+").unwrap_or_default()
    }
}

fn render_template(template: &str, value: &str) -> Result<Topic, Error> {
    let mut topic = Topic::new();
    match template.split_once(DEVICE_ID_PLACEHOLDER) {
        Some((head, tail)) => write!(topic, "{}{}{}", head, value, tail),
        None => topic.push_str(template).map_err(|_| core::fmt::Error),
    }
    .map_err(|_| Error::BufferOverflow)?;

    Ok(topic)
}

/// Split a concrete topic such as `iot/classroom/ESP32_001/ack` into the
/// device identifier and the topic kind.
///
/// The kind is taken from the fourth segment and anything after it is
/// ignored, the way the dashboard bridge classifies incoming messages.
/// Device identifiers are not checked for `/`, so a topic rendered from
/// such an id does not parse back to the same id.
pub fn parse_topic(topic: &str) -> Option<(&str, TopicKind)> {
    let (prefix, _) = TELEMETRY_TOPIC_TEMPLATE.split_once(DEVICE_ID_PLACEHOLDER)?;
    let mut segments = topic.strip_prefix(prefix)?.split('/');
    let device_id = segments.next().filter(|id| !id.is_empty())?;
    let kind = TopicKind::from_suffix(segments.next()?)?;

    Some((device_id, kind))
}

/// All topics of one device, rendered once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub telemetry: Topic,
    pub control: Topic,
    pub ack: Topic,
    pub status: Topic,
}

impl Topics {
    pub fn new(device_id: &str) -> Result<Self, Error> {
        Ok(Self {
            telemetry: TopicKind::Telemetry.render(device_id)?,
            control: TopicKind::Control.render(device_id)?,
            ack: TopicKind::Ack.render(device_id)?,
            status: TopicKind::Status.render(device_id)?,
        })
    }

    pub fn get(&self, kind: TopicKind) -> &str {
        match kind {
            TopicKind::Telemetry => &self.telemetry,
            TopicKind::Control => &self.control,
            TopicKind::Ack => &self.ack,
            TopicKind::Status => &self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_kinds() {
        let topics = Topics::new("ESP32_001").unwrap();
        assert_eq!(topics.telemetry.as_str(), "iot/classroom/ESP32_001/telemetry");
        assert_eq!(topics.control.as_str(), "iot/classroom/ESP32_001/control");
        assert_eq!(topics.ack.as_str(), "iot/classroom/ESP32_001/ack");
        assert_eq!(topics.status.as_str(), "iot/classroom/ESP32_001/status");
        assert_eq!(topics.get(TopicKind::Ack), "iot/classroom/ESP32_001/ack");
    }

    #[test]
    fn rejects_long_device_id() {
        let id = "x".repeat(DEVICE_ID_MAX_LEN + 1);
        assert_eq!(TopicKind::Status.render(&id), Err(Error::DeviceIdTooLong));

        let id = "x".repeat(DEVICE_ID_MAX_LEN);
        assert!(Topics::new(&id).is_ok());
    }

    #[test]
    fn wildcard_filter() {
        assert_eq!(TopicKind::Telemetry.filter().as_str(), "iot/classroom/+/telemetry");
        assert_eq!(TopicKind::Ack.filter().as_str(), "iot/classroom/+/ack");
    }

    #[test]
    fn parses_device_topics() {
        assert_eq!(
            parse_topic("iot/classroom/c3-01/telemetry"),
            Some(("c3-01", TopicKind::Telemetry))
        );
        assert_eq!(
            parse_topic("iot/classroom/ESP32_001/control"),
            Some(("ESP32_001", TopicKind::Control))
        );
    }

    #[test]
    fn ignores_trailing_segments() {
        assert_eq!(
            parse_topic("iot/classroom/ESP32_001/ack/extra"),
            Some(("ESP32_001", TopicKind::Ack))
        );
        assert_eq!(
            parse_topic("iot/classroom/ESP32_001/status/"),
            Some(("ESP32_001", TopicKind::Status))
        );
    }

    #[test]
    fn slash_in_device_id_does_not_round_trip() {
        let topic = TopicKind::Control.render("room/7").unwrap();
        assert_eq!(topic.as_str(), "iot/classroom/room/7/control");
        assert_eq!(parse_topic(&topic), None);
    }

    #[test]
    fn rejects_foreign_topics() {
        assert_eq!(parse_topic("iot/lab/ESP32_001/telemetry"), None);
        assert_eq!(parse_topic("iot/classroom/ESP32_001/firmware"), None);
        assert_eq!(parse_topic("iot/classroom//status"), None);
        assert_eq!(parse_topic("iot/classroom/ESP32_001"), None);
    }
}
