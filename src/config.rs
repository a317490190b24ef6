//! Optional TOML configuration: promo codes, marketing channels and sync
//! policy.
//!
//! ```toml
//! [[promos]]
//! code = "SAVE10"
//! fixed = 30
//!
//! [[channels]]
//! name = "mailchimp"
//! endpoint = "https://us1.api.mailchimp.com/3.0/lists/abc/members"
//! auth = { type = "bearer", token = "..." }
//!
//! [sync]
//! deadline_ms = 5000
//! missing_phone = "report_success"
//! ```

use crate::application::marketing::{MarketingSyncCoordinator, MissingPhonePolicy};
use crate::domain::money::Money;
use crate::domain::ports::ChannelRef;
use crate::domain::promo::{PromoCatalog, PromoCode, default_catalog};
use crate::error::{EnrollmentError, Result};
use crate::infrastructure::channels::{HttpChannelConfig, HttpContactChannel, LogChannel};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub promos: Vec<PromoEntry>,
    #[serde(default)]
    pub channels: Vec<HttpChannelConfig>,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// One promo code. Exactly one of `fixed` or `percent` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct PromoEntry {
    pub code: String,
    pub fixed: Option<Money>,
    pub percent: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncConfig {
    pub deadline_ms: Option<u64>,
    #[serde(default)]
    pub missing_phone: MissingPhonePolicy,
}

impl PromoEntry {
    fn to_promo(&self) -> Result<PromoCode> {
        match (self.fixed, self.percent) {
            (Some(amount), None) => Ok(PromoCode::fixed(&self.code, amount)),
            (None, Some(percent)) => PromoCode::percent(&self.code, percent),
            _ => Err(EnrollmentError::ConfigError(format!(
                "promo {} must set exactly one of `fixed` or `percent`",
                self.code
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for promo in &self.promos {
            promo.to_promo()?;
        }
        let mut names = std::collections::HashSet::new();
        for channel in &self.channels {
            if !names.insert(channel.name.as_str()) {
                return Err(EnrollmentError::ConfigError(format!(
                    "duplicate channel name: {}",
                    channel.name
                )));
            }
        }
        Ok(())
    }

    /// Fills in `deadline` when the file does not set `[sync] deadline_ms`.
    pub fn with_default_deadline(mut self, deadline: Duration) -> Self {
        if self.sync.deadline_ms.is_none() {
            self.sync.deadline_ms = Some(deadline.as_millis().try_into().unwrap_or(u64::MAX));
        }
        self
    }

    /// The configured promo table, or the storefront default when none are
    /// listed.
    pub fn promo_catalog(&self) -> Result<PromoCatalog> {
        if self.promos.is_empty() {
            return Ok(default_catalog());
        }
        self.promos.iter().map(PromoEntry::to_promo).collect()
    }

    /// Builds the sync coordinator. Without configured channels the contact
    /// only goes to a dry-run `LogChannel`.
    pub fn coordinator(&self) -> MarketingSyncCoordinator {
        let client = reqwest::Client::new();
        let channels: Vec<ChannelRef> = if self.channels.is_empty() {
            vec![Arc::new(LogChannel::default())]
        } else {
            self.channels
                .iter()
                .map(|c| Arc::new(HttpContactChannel::with_client(c.clone(), client.clone())) as ChannelRef)
                .collect()
        };

        let mut coordinator = MarketingSyncCoordinator::new(channels)
            .with_missing_phone_policy(self.sync.missing_phone);
        if let Some(ms) = self.sync.deadline_ms {
            coordinator = coordinator.with_deadline(Duration::from_millis(ms));
        }
        coordinator
    }
}
