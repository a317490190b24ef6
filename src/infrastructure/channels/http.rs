use crate::domain::contact::MarketingContact;
use crate::domain::ports::ContactChannel;
use crate::error::ChannelError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// How a channel authenticates against its endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelAuth {
    #[default]
    None,
    /// `Authorization: Bearer <token>`.
    Bearer { token: String },
    /// A vendor-specific header such as `api-key` or `X-Api-Key`.
    ApiKey { header: String, key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpChannelConfig {
    pub name: String,
    pub endpoint: String,
    #[serde(default)]
    pub auth: ChannelAuth,
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub requires_phone: bool,
}

/// Posts the contact as JSON to a third-party contacts endpoint.
///
/// Any transport error or non-2xx response is a `ChannelError`.
#[derive(Debug, Clone)]
pub struct HttpContactChannel {
    config: HttpChannelConfig,
    client: Client,
}

impl HttpContactChannel {
    pub fn new(config: HttpChannelConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Shares one connection pool across channels.
    pub fn with_client(config: HttpChannelConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl ContactChannel for HttpContactChannel {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn requires_phone(&self) -> bool {
        self.config.requires_phone
    }

    async fn send_contact(&self, contact: MarketingContact) -> Result<(), ChannelError> {
        let mut request = self.client.post(&self.config.endpoint).json(&contact);

        request = match &self.config.auth {
            ChannelAuth::None => request,
            ChannelAuth::Bearer { token } => request.bearer_auth(token),
            ChannelAuth::ApiKey { header, key } => request.header(header.as_str(), key.as_str()),
        };

        if let Some(timeout) = self.config.timeout_ms {
            request = request.timeout(Duration::from_millis(timeout));
        }

        tracing::debug!(channel = %self.config.name, endpoint = %self.config.endpoint, "posting contact");
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(ChannelError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
