use thiserror::Error;

/// Errors from a single poll cycle.
///
/// None of these terminate the poll loop; each cycle is isolated and the
/// error is logged where the cycle runs.
#[derive(Error, Debug)]
pub enum PollError {
    /// Connection failures, timeouts, unexpected disconnects.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered with an HTTP error status.
    #[error("device returned status {status}: {body}")]
    Protocol { status: u16, body: String },

    /// The status document could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PollError {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
