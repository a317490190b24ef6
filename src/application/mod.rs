//! Application layer: the pricing engine, the marketing fan-out and the
//! enrollment checkout that ties them together.
//!
//! Pricing is synchronous and pure. Marketing sync runs channel calls as
//! independent `tokio` tasks and gathers them into a single report.

pub mod enrollment;
pub mod marketing;
pub mod pricing;
