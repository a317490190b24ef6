#![allow(dead_code)]

use async_trait::async_trait;
use enrollsync::domain::contact::MarketingContact;
use enrollsync::domain::ports::{ChannelRef, ContactChannel};
use enrollsync::error::ChannelError;
use std::io::{Error, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// A channel that records every contact it is handed.
pub struct SpyChannel {
    name: String,
    delay: Duration,
    behavior: Behavior,
    requires_phone: bool,
    calls: AtomicUsize,
    seen: Mutex<Vec<MarketingContact>>,
}

impl SpyChannel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::ZERO,
            behavior: Behavior::Succeed,
            requires_phone: false,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn behaving(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn phone_only(mut self) -> Self {
        self.requires_phone = true;
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<MarketingContact> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactChannel for SpyChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn requires_phone(&self) -> bool {
        self.requires_phone
    }

    async fn send_contact(&self, contact: MarketingContact) -> Result<(), ChannelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(contact);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(ChannelError::Other(format!("{}: network unreachable", self.name))),
            Behavior::Panic => panic!("{} exploded", self.name),
        }
    }
}

pub fn as_channels(spies: &[Arc<SpyChannel>]) -> Vec<ChannelRef> {
    spies.iter().map(|s| s.clone() as ChannelRef).collect()
}

pub fn contact() -> MarketingContact {
    MarketingContact::new("grace@example.com", "Grace", "Hopper", "student").with_tag("new-signup")
}

pub fn write_catalog(path: &Path) -> Result<(), Error> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "id,title,base_price,list_price")?;
    writeln!(file, "web-dev,Full-Stack Web Development,299,399")?;
    writeln!(file, "ds-101,Intro to Data Science,149,149")?;
    writeln!(file, "free-intro,Orientation,0,49")?;
    Ok(())
}
