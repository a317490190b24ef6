//! Concrete `ContactChannel` adapters.

pub mod http;
pub mod log;

pub use http::{ChannelAuth, HttpChannelConfig, HttpContactChannel};
pub use log::LogChannel;
