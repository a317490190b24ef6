use crate::domain::contact::MarketingContact;
use crate::domain::ports::ContactChannel;
use crate::error::ChannelError;
use async_trait::async_trait;

/// Dry-run channel: records the contact in the log and always succeeds.
#[derive(Debug, Clone)]
pub struct LogChannel {
    name: String,
}

impl LogChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogChannel {
    fn default() -> Self {
        Self::new("log")
    }
}

#[async_trait]
impl ContactChannel for LogChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_contact(&self, contact: MarketingContact) -> Result<(), ChannelError> {
        tracing::info!(
            channel = %self.name,
            email = %contact.email,
            name = %contact.full_name(),
            role = %contact.role,
            tags = ?contact.tags,
            "contact synced (dry run)"
        );
        Ok(())
    }
}
