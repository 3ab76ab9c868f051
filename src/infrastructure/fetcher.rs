//! Retrieval of journal pages over HTTP

use crate::error::{DonsError, Result};
use crate::infrastructure::Config;
use std::time::Duration;
use tracing::{debug, info};

/// Something that turns a journal URL into page markup
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String>;

    /// Root that journal URLs are built on
    fn base_url(&self) -> &str;
}

/// Blocking HTTP client with a bounded timeout
pub struct HttpPageSource {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();
        HttpPageSource {
            agent,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.timeout(), &config.user_agent)
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&self, url: &str) -> Result<String> {
        info!(url, "fetching journal page");

        let response = self.agent.get(url).call().map_err(|e| {
            let message = match e {
                ureq::Error::Status(code, response) => {
                    format!("HTTP {} {}", code, response.status_text())
                }
                other => other.to_string(),
            };
            DonsError::Fetch {
                url: url.to_string(),
                message,
            }
        })?;

        let body = response.into_string().map_err(|e| DonsError::Fetch {
            url: url.to_string(),
            message: format!("unreadable body: {}", e),
        })?;
        debug!(url, bytes = body.len(), "page received");
        Ok(body)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
