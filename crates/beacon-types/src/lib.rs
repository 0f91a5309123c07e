#![warn(clippy::pedantic)]

pub mod altbeacon;
pub mod beacon_kind;
pub mod eddystone;
pub mod error;
pub mod ibeacon;
pub mod record;

pub use altbeacon::AltBeacon;
pub use beacon_kind::BeaconKind;
pub use eddystone::{Eddystone, EddystoneTlm, EddystoneUid, EddystoneUrl, TlmTelemetry};
pub use error::TypeError;
pub use ibeacon::IBeacon;
pub use record::{BeaconPayload, BeaconRecord};
