//! Domain layer: value objects, records and the ports the application layer
//! drives.

pub mod contact;
pub mod course;
pub mod enrollment;
pub mod money;
pub mod ports;
pub mod promo;
pub mod quote;
pub mod sync;
