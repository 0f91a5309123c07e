use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TypeError;

/// The beacon formats a record can carry, flattened so Eddystone frame
/// types can be selected individually.
///
/// ```text
/// ┌───────────────┬───────────────────┬────────────────────────────┐
/// │ Name          │ Variant           │ Carrier                    │
/// ├───────────────┼───────────────────┼────────────────────────────┤
/// │ ibeacon       │ IBeacon           │ 0xFF, Apple 0x004C         │
/// │ altbeacon     │ AltBeacon         │ 0xFF, code 0xACBE          │
/// │ eddystone-uid │ EddystoneUid      │ 0x16, UUID 0xFEAA, 0x00    │
/// │ eddystone-url │ EddystoneUrl      │ 0x16, UUID 0xFEAA, 0x10    │
/// │ eddystone-tlm │ EddystoneTlm      │ 0x16, UUID 0xFEAA, 0x20    │
/// └───────────────┴───────────────────┴────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BeaconKind {
    #[serde(rename = "ibeacon")]
    IBeacon,
    #[serde(rename = "altbeacon")]
    AltBeacon,
    #[serde(rename = "eddystone-uid")]
    EddystoneUid,
    #[serde(rename = "eddystone-url")]
    EddystoneUrl,
    #[serde(rename = "eddystone-tlm")]
    EddystoneTlm,
}

impl BeaconKind {
    pub const ALL: [Self; 5] = [
        Self::IBeacon,
        Self::AltBeacon,
        Self::EddystoneUid,
        Self::EddystoneUrl,
        Self::EddystoneTlm,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::IBeacon => "ibeacon",
            Self::AltBeacon => "altbeacon",
            Self::EddystoneUid => "eddystone-uid",
            Self::EddystoneUrl => "eddystone-url",
            Self::EddystoneTlm => "eddystone-tlm",
        }
    }

    /// Look a kind up by its [`name`](Self::name), ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BeaconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BeaconKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TypeError::UnknownBeaconKind {
            name: s.to_owned(),
        })
    }
}
