use std::env;
use std::sync::Arc;

use tracing::info;
use youless_bridge::automation_bus::ChannelBus;
use youless_bridge::config::YoulessConfig;
use youless_bridge::youless_connector::YoulessConnector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("Starting Youless bridge");

    let config = YoulessConfig::from_env();
    let controller_id = env::var("CONTROLLER_ID").unwrap_or_else(|_| "local".to_string());

    let (bus, mut events) = ChannelBus::new(controller_id, 32);

    // Drain the bus; a real host would forward these into its event fabric
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!(
                "Device {} {}: {:?}",
                event.device_address, event.channel, event.value
            );
        }
    });

    let poller = YoulessConnector::new(config, Arc::new(bus)).connect();

    tokio::signal::ctrl_c().await?;

    if let Some(poller) = poller {
        poller.stop();
    }
    println!("Youless bridge stopped");
    Ok(())
}
