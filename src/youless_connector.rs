use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::automation_bus::{AutomationBus, Channel, DeviceValueEvent, Value};
use crate::config::YoulessConfig;
use crate::error::PollError;
use crate::status_payload::parse_reading;
use crate::youless_client::YoulessClient;

/// Polls a single YouLess device on a fixed interval and republishes its
/// readings as device value events on the automation bus.
///
/// Each cycle fetches the status document, parses the power and energy
/// fields, and publishes a power event followed by an energy event. A failed
/// cycle is logged and skipped; the loop only stops when the handle is
/// cancelled.
pub struct YoulessConnector {
    config: YoulessConfig,
    bus: Arc<dyn AutomationBus>,
    client: YoulessClient,
}

/// Handle to a running poll loop.
///
/// `stop` cancels the loop, interrupting the inter-cycle sleep promptly and
/// aborting an in-flight fetch. Dropping the handle leaves the loop running.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl YoulessConnector {
    pub fn new(config: YoulessConfig, bus: Arc<dyn AutomationBus>) -> Self {
        Self {
            config,
            bus,
            client: YoulessClient::new(),
        }
    }

    pub fn youless_ip(&self) -> &str {
        &self.config.ip
    }

    /// Starts the background poll loop without blocking the caller.
    ///
    /// Returns `None` when no device address is configured; nothing is
    /// scheduled in that case and no events will ever be published.
    pub fn connect(self) -> Option<PollerHandle> {
        if !self.config.is_configured() {
            warn!("Youless connector is present but not configured, ignoring");
            return None;
        }

        debug!("Scheduling retrieval of wattage from Youless");
        let task = tokio::spawn(async move {
            self.run().await;
        });
        Some(PollerHandle { task })
    }

    /// Main poll loop: one cycle, then sleep, forever.
    ///
    /// The sleep runs regardless of the cycle outcome and is only cut short
    /// by cancellation of the task.
    async fn run(self) {
        loop {
            if let Err(e) = self.fetch_and_publish().await {
                match &e {
                    PollError::Protocol { status, body } => {
                        error!("Error: {} retrieving data from youless: {}", status, body);
                    }
                    _ => error!("{}", e),
                }
            }
            tokio::time::sleep(self.config.check_interval).await;
        }
    }

    /// One fetch-parse-publish cycle against the configured device.
    ///
    /// On success exactly two events reach the bus, power first, energy
    /// second. On any failure nothing is published.
    pub async fn fetch_and_publish(&self) -> Result<(), PollError> {
        debug!(
            "Retrieving wattage usage from youless: {}",
            self.config.ip
        );
        let payload = self.client.fetch_status(&self.config.ip).await?;
        let reading = parse_reading(&payload)?;
        debug!("Retrieved wattage from youless: {}", reading.power);

        self.publish_value(Value::Number(reading.power), Channel::Power);
        self.publish_value(Value::Number(reading.energy), Channel::Energy);
        Ok(())
    }

    fn publish_value(&self, value: Value, channel: Channel) {
        self.bus.publish(DeviceValueEvent::new(
            self.bus.controller_id(),
            &self.config.ip,
            value,
            channel,
        ));
    }
}
