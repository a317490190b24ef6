use crate::domain::contact::MarketingContact;
use crate::domain::ports::ChannelRef;
use crate::domain::sync::{ChannelOutcome, ChannelResult, SyncReport};
use crate::error::ChannelError;
use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// What a phone-only channel reports when the contact has no phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPhonePolicy {
    /// The channel is skipped and counted as delivered.
    #[default]
    ReportSuccess,
    /// The channel is skipped and counted as failed.
    ReportFailure,
}

/// Standing policy for phone-only channels. A missing number is treated as a
/// vacuously satisfied delivery.
pub const MISSING_PHONE_POLICY: MissingPhonePolicy = MissingPhonePolicy::ReportSuccess;

/// Fans a new-user event out to every configured contact channel.
///
/// Each sync is a single scatter/gather: all channels are spawned before any
/// is awaited, and the report only exists once every channel has settled.
/// Nothing is shared between channel tasks except the read-only channel handle.
pub struct MarketingSyncCoordinator {
    channels: Vec<ChannelRef>,
    deadline: Option<Duration>,
    missing_phone_policy: MissingPhonePolicy,
}

impl MarketingSyncCoordinator {
    pub fn new(channels: Vec<ChannelRef>) -> Self {
        Self {
            channels,
            deadline: None,
            missing_phone_policy: MISSING_PHONE_POLICY,
        }
    }

    /// Channels still pending this long after dispatch are aborted and
    /// reported as failed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_missing_phone_policy(mut self, policy: MissingPhonePolicy) -> Self {
        self.missing_phone_policy = policy;
        self
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Syncs `contact` to every channel concurrently.
    ///
    /// Never fails: channel errors, panics and deadline expiry all become a
    /// `false` entry. The report has one entry per channel, in supply order.
    pub async fn sync_new_user(&self, contact: MarketingContact) -> SyncReport {
        let started = Instant::now();
        let deadline = self.deadline.map(|d| started + d);

        let pending: Vec<Pending> = self
            .channels
            .iter()
            .map(|channel| self.dispatch(channel, &contact))
            .collect();

        let mut results = Vec::with_capacity(pending.len());
        for task in pending {
            results.push(settle(task, deadline).await);
        }

        let report = SyncReport::new(results);
        tracing::info!(
            email = %contact.email,
            channels = report.len(),
            failed = report.failed_channels().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "marketing sync finished"
        );
        report
    }

    fn dispatch(&self, channel: &ChannelRef, contact: &MarketingContact) -> Pending {
        let name = channel.name().to_string();

        if channel.requires_phone() && !contact.has_phone() {
            let succeeded = self.missing_phone_policy == MissingPhonePolicy::ReportSuccess;
            tracing::debug!(channel = %name, succeeded, "no phone on contact, channel skipped");
            return Pending::Skipped(ChannelResult::new(name, succeeded, ChannelOutcome::Skipped));
        }

        let channel = ChannelRef::clone(channel);
        let contact = contact.clone();
        let handle = tokio::spawn(async move { channel.send_contact(contact).await });
        Pending::Running { name, handle }
    }
}

enum Pending {
    Skipped(ChannelResult),
    Running {
        name: String,
        handle: JoinHandle<Result<(), ChannelError>>,
    },
}

async fn settle(task: Pending, deadline: Option<Instant>) -> ChannelResult {
    let (name, mut handle) = match task {
        Pending::Skipped(result) => return result,
        Pending::Running { name, handle } => (name, handle),
    };

    let joined = match deadline {
        Some(at) => match tokio::time::timeout_at(at, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                handle.abort();
                tracing::warn!(channel = %name, "channel did not settle before the sync deadline");
                return ChannelResult::new(name, false, ChannelOutcome::TimedOut);
            }
        },
        None => handle.await,
    };

    match joined {
        Ok(Ok(())) => ChannelResult::new(name, true, ChannelOutcome::Delivered),
        Ok(Err(err)) => {
            tracing::warn!(channel = %name, error = %err, "channel failed to sync contact");
            ChannelResult::new(name, false, ChannelOutcome::Failed(err.to_string()))
        }
        Err(join_err) => {
            tracing::error!(channel = %name, error = %join_err, "channel task aborted");
            ChannelResult::new(name, false, ChannelOutcome::Failed(join_err.to_string()))
        }
    }
}
