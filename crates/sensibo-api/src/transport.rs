// Transport configuration for building the client-owned reqwest::Client.
//
// Only used when the caller does not bring its own session. A caller-supplied
// client is taken as-is.

use std::time::Duration;

use crate::error::Error;

/// Settings for the HTTP session a `SensiboClient` creates for itself.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` leaves timing to the caller.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("sensibo-api/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }

    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
