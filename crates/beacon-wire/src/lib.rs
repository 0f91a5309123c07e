#![warn(clippy::pedantic)]

pub mod ad_structure;
pub mod address;
pub mod bytes;
pub mod envelope;
pub mod error;
pub mod report;

pub use ad_structure::AdStructure;
pub use address::{AddressType, DeviceAddress};
pub use envelope::EventEnvelope;
pub use error::WireError;
pub use report::{AdvEventType, AdvertisingReport};
