use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// How a single channel settled during one sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ChannelOutcome {
    Delivered,
    /// Not invoked because the contact has no phone number.
    Skipped,
    Failed(String),
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelResult {
    pub channel: String,
    pub succeeded: bool,
    pub outcome: ChannelOutcome,
}

impl ChannelResult {
    pub fn new(channel: impl Into<String>, succeeded: bool, outcome: ChannelOutcome) -> Self {
        Self {
            channel: channel.into(),
            succeeded,
            outcome,
        }
    }
}

/// Aggregated outcome of one scatter/gather sync: one entry per configured
/// channel, in the order the channels were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    results: Vec<ChannelResult>,
}

impl SyncReport {
    pub fn new(results: Vec<ChannelResult>) -> Self {
        Self { results }
    }

    pub fn get(&self, channel: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|r| r.channel == channel)
            .map(|r| r.succeeded)
    }

    pub fn results(&self) -> &[ChannelResult] {
        &self.results
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.results.iter().map(|r| (r.channel.as_str(), r.succeeded))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.succeeded)
    }

    pub fn failed_channels(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.succeeded)
            .map(|r| r.channel.as_str())
            .collect()
    }
}

// Serialized as the plain `channel -> bool` map, preserving channel order.
impl Serialize for SyncReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for (channel, succeeded) in self.entries() {
            map.serialize_entry(channel, &succeeded)?;
        }
        map.end()
    }
}
