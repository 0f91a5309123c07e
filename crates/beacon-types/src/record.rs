use beacon_wire::{AddressType, AdvEventType, DeviceAddress};
use serde::Serialize;

use crate::altbeacon::AltBeacon;
use crate::beacon_kind::BeaconKind;
use crate::eddystone::Eddystone;
use crate::ibeacon::IBeacon;

/// One recognized beacon, tagged with the advertising report it came from.
///
/// The record pairs what the *beacon* says about itself (`payload`) with
/// what the *receiver* observed (`address`, `rssi`). Both RSSI values are
/// kept: `payload` carries the calibrated reference power, `rssi` the
/// strength this controller measured.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BeaconRecord {
    pub event_type: AdvEventType,
    pub address_type: AddressType,
    pub address: DeviceAddress,
    pub rssi: i8,
    pub payload: BeaconPayload,
}

impl BeaconRecord {
    #[must_use]
    pub fn kind(&self) -> BeaconKind {
        self.payload.kind()
    }
}

/// The decoded beacon frame. At most one per advertising report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "format")]
pub enum BeaconPayload {
    #[serde(rename = "ibeacon")]
    IBeacon(IBeacon),
    #[serde(rename = "altbeacon")]
    AltBeacon(AltBeacon),
    #[serde(rename = "eddystone")]
    Eddystone(Eddystone),
}

impl BeaconPayload {
    #[must_use]
    pub fn kind(&self) -> BeaconKind {
        match self {
            Self::IBeacon(_) => BeaconKind::IBeacon,
            Self::AltBeacon(_) => BeaconKind::AltBeacon,
            Self::Eddystone(Eddystone::Uid(_)) => BeaconKind::EddystoneUid,
            Self::Eddystone(Eddystone::Url(_)) => BeaconKind::EddystoneUrl,
            Self::Eddystone(Eddystone::Tlm(_)) => BeaconKind::EddystoneTlm,
        }
    }
}

impl From<IBeacon> for BeaconPayload {
    fn from(beacon: IBeacon) -> Self {
        Self::IBeacon(beacon)
    }
}

impl From<AltBeacon> for BeaconPayload {
    fn from(beacon: AltBeacon) -> Self {
        Self::AltBeacon(beacon)
    }
}

impl From<Eddystone> for BeaconPayload {
    fn from(frame: Eddystone) -> Self {
        Self::Eddystone(frame)
    }
}
