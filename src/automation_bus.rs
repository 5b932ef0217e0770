use serde_derive::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::warn;

/// Device class tag attached to every event published by this bridge.
pub const DEVICE_CLASS: &str = "youless";

/// Measurement stream a published value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Power,
    Energy,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Power => write!(f, "power"),
            Channel::Energy => write!(f, "energy"),
        }
    }
}

/// Typed value carried by a device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Number(i64),
}

/// Value update for a single channel of a single device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceValueEvent {
    pub controller_id: String,
    pub device_class: String,
    pub device_address: String,
    pub value: Value,
    pub channel: Channel,
}

impl DeviceValueEvent {
    pub fn new(
        controller_id: impl Into<String>,
        device_address: impl Into<String>,
        value: Value,
        channel: Channel,
    ) -> Self {
        Self {
            controller_id: controller_id.into(),
            device_class: DEVICE_CLASS.to_string(),
            device_address: device_address.into(),
            value,
            channel,
        }
    }
}

/// Publish-only sink for device value updates.
///
/// The bus is owned by the hosting application; the connector only consumes
/// one passed in at construction time.
pub trait AutomationBus: Send + Sync {
    fn controller_id(&self) -> &str;
    fn publish(&self, event: DeviceValueEvent);
}

/// Bus implementation that fans events out over a bounded channel.
pub struct ChannelBus {
    controller_id: String,
    sender: Sender<DeviceValueEvent>,
}

impl ChannelBus {
    /// Creates a bus and the receiving end the host drains events from.
    pub fn new(
        controller_id: impl Into<String>,
        capacity: usize,
    ) -> (Self, Receiver<DeviceValueEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self {
                controller_id: controller_id.into(),
                sender,
            },
            receiver,
        )
    }
}

impl AutomationBus for ChannelBus {
    fn controller_id(&self) -> &str {
        &self.controller_id
    }

    fn publish(&self, event: DeviceValueEvent) {
        // A slow or gone consumer must not stall the poll loop
        if let Err(e) = self.sender.try_send(event) {
            warn!("Dropping device value event: {}", e);
        }
    }
}
