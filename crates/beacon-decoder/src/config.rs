use std::fmt;
use std::str::FromStr;

use beacon_types::{AltBeacon, BeaconPayload, Eddystone, IBeacon};

/// Decoder configuration.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────────┐
/// │ Field       │ Purpose                                              │
/// ├─────────────┼──────────────────────────────────────────────────────┤
/// │ recognizers │ AD-structure recognizers, tried in this order.       │
/// │             │ The first to match a structure wins.                 │
/// └─────────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// An empty list is valid: the walker still steps over every structure
/// but nothing is ever recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub recognizers: Vec<Recognizer>,
}

impl Default for DecoderConfig {
    /// iBeacon, then AltBeacon, then Eddystone.
    fn default() -> Self {
        Self {
            recognizers: Recognizer::DEFAULT_ORDER.to_vec(),
        }
    }
}

/// One AD-structure recognizer.
///
/// Each variant wraps a format's `decode` function. All of them report
/// the same `consumed` for a given structure, since it comes from the
/// structure's own length byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recognizer {
    IBeacon,
    AltBeacon,
    Eddystone,
}

impl Recognizer {
    pub const DEFAULT_ORDER: [Self; 3] = [Self::IBeacon, Self::AltBeacon, Self::Eddystone];

    /// Offer the AD structure at the front of `ad` to this recognizer.
    #[must_use]
    pub fn recognize(self, ad: &[u8]) -> (usize, Option<BeaconPayload>) {
        match self {
            Self::IBeacon => {
                let (consumed, beacon) = IBeacon::decode(ad);
                (consumed, beacon.map(BeaconPayload::from))
            }
            Self::AltBeacon => {
                let (consumed, beacon) = AltBeacon::decode(ad);
                (consumed, beacon.map(BeaconPayload::from))
            }
            Self::Eddystone => {
                let (consumed, frame) = Eddystone::decode(ad);
                (consumed, frame.map(BeaconPayload::from))
            }
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::IBeacon => "ibeacon",
            Self::AltBeacon => "altbeacon",
            Self::Eddystone => "eddystone",
        }
    }
}

impl fmt::Display for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Recognizer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown recognizer '{s}' (expected ibeacon, altbeacon or eddystone)")
            })
    }
}
