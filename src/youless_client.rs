use std::time::Duration;

use tracing::debug;

use crate::error::PollError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP access to the status endpoint of a YouLess device.
///
/// Plain HTTP, no auth; the device exposes its readings on a fixed path.
pub struct YoulessClient {
    client: reqwest::Client,
}

impl Default for YoulessClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YoulessClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("HTTP client construction with static settings");
        Self { client }
    }

    /// Fetches the raw status document from `http://<host>/a?f=j`.
    ///
    /// Returns only the first line of the body; the device emits single-line
    /// JSON. An error status yields [`PollError::Protocol`] carrying the
    /// first line of the error body.
    pub async fn fetch_status(&self, host: &str) -> Result<String, PollError> {
        let url = format!("http://{host}/a?f=j");
        debug!("Connecting to youless at URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = first_line(&response.text().await?);

        if status >= 400 {
            return Err(PollError::Protocol { status, body });
        }
        Ok(body)
    }
}

fn first_line(body: &str) -> String {
    body.lines().next().unwrap_or_default().to_string()
}
