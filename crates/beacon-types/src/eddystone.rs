use beacon_wire::ad_structure::{ad_type, consumed_len};
use beacon_wire::bytes::{
    read_array, read_i8, read_i16_be, read_u8, read_u16_be, read_u16_le, read_u32_be,
};
use serde::Serialize;

/// Eddystone's 16-bit service UUID, as read little-endian (wire `AA FE`).
pub const EDDYSTONE_SERVICE_UUID: u16 = 0xFEAA;

pub const FRAME_UID: u8 = 0x00;
pub const FRAME_URL: u8 = 0x10;
pub const FRAME_TLM: u8 = 0x20;

/// Eddystone calibrates its tx power at 0 m; subtracting this converts it
/// to the 1 m reference iBeacon and AltBeacon use.
pub const RSSI_0M_TO_1M_DB: i16 = 41;

/// UID length bytes with and without the two trailing reserved bytes.
const UID_LENGTH_BYTES: [u8; 2] = [0x15, 0x17];

const TLM_LENGTH_BYTE: u8 = 0x11;

const URL_SCHEMES: [&str; 4] = ["http://www.", "https://www.", "http://", "https://"];

/// Expansion codes 0x00..=0x0D. The first seven carry a trailing slash.
const URL_EXPANSIONS: [&str; 14] = [
    ".com/", ".org/", ".edu/", ".net/", ".info/", ".biz/", ".gov/", ".com", ".org", ".edu",
    ".net", ".info", ".biz", ".gov",
];

/// Google Eddystone, carried in 16-bit service data for UUID 0xFEAA.
///
/// Every frame shares a five byte header; byte 4 selects the frame type.
///
/// ```text
/// ┌────────┬──────────┬─────────────────────────────────────┐
/// │ Offset │ Size     │ Field                               │
/// ├────────┼──────────┼─────────────────────────────────────┤
/// │ 0      │ 1        │ length                              │
/// │ 1      │ 1        │ AD type = 0x16 (service data)       │
/// │ 2      │ 2 (LE)   │ service UUID = 0xFEAA               │
/// │ 4      │ 1        │ frame type: 0x00 UID, 0x10 URL,     │
/// │        │          │             0x20 TLM                │
/// │ 5      │ ...      │ frame body                          │
/// └────────┴──────────┴─────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "frame", rename_all = "lowercase")]
pub enum Eddystone {
    Uid(EddystoneUid),
    Url(EddystoneUrl),
    Tlm(EddystoneTlm),
}

impl Eddystone {
    /// Try to recognize an Eddystone frame in the AD structure at the
    /// front of `ad`.
    ///
    /// `consumed` is `ad[0] + 1` regardless of the outcome. Unknown frame
    /// types, failed header checks, and structures whose declared length
    /// runs past `ad` all yield `None`.
    #[must_use]
    pub fn decode(ad: &[u8]) -> (usize, Option<Self>) {
        let Some(consumed) = consumed_len(ad) else {
            return (0, None);
        };
        (consumed, Self::parse(ad, consumed))
    }

    fn parse(ad: &[u8], consumed: usize) -> Option<Self> {
        let frame = ad.get(..consumed)?;
        if read_u8(frame, 1)? != ad_type::SERVICE_DATA_16BIT
            || read_u16_le(frame, 2)? != EDDYSTONE_SERVICE_UUID
        {
            return None;
        }

        match read_u8(frame, 4)? {
            FRAME_UID => EddystoneUid::parse(frame).map(Self::Uid),
            FRAME_URL => EddystoneUrl::parse(frame).map(Self::Url),
            FRAME_TLM => EddystoneTlm::parse(frame).map(Self::Tlm),
            _ => None,
        }
    }
}

/// UID frame: a 10-byte namespace plus a 6-byte instance.
///
/// Some beacons omit the two reserved trailing bytes, so both length
/// bytes 0x15 and 0x17 are accepted and decode identically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EddystoneUid {
    /// Calibrated power, already shifted to the 1 m reference.
    pub ref_rssi: i16,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub namespace: [u8; 10],
    #[serde(serialize_with = "hex::serde::serialize")]
    pub instance: [u8; 6],
}

impl EddystoneUid {
    fn parse(frame: &[u8]) -> Option<Self> {
        if !UID_LENGTH_BYTES.contains(&read_u8(frame, 0)?) {
            return None;
        }
        Some(Self {
            ref_rssi: i16::from(read_i8(frame, 5)?) - RSSI_0M_TO_1M_DB,
            namespace: read_array(frame, 6)?,
            instance: read_array(frame, 16)?,
        })
    }

    #[must_use]
    pub fn namespace_hex(&self) -> String {
        hex::encode(self.namespace)
    }

    #[must_use]
    pub fn instance_hex(&self) -> String {
        hex::encode(self.instance)
    }
}

/// URL frame: scheme prefix code followed by compressed URL bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EddystoneUrl {
    /// Calibrated power, already shifted to the 1 m reference.
    pub ref_rssi: i16,
    pub url: String,
}

impl EddystoneUrl {
    fn parse(frame: &[u8]) -> Option<Self> {
        let ref_rssi = i16::from(read_i8(frame, 5)?) - RSSI_0M_TO_1M_DB;
        let scheme = URL_SCHEMES[usize::from(read_u8(frame, 6)? & 0x03)];
        let encoded = frame.get(7..)?;
        Some(Self {
            ref_rssi,
            url: expand_url(scheme, encoded),
        })
    }
}

/// Expand Eddystone URL encoding onto `scheme`.
///
/// The expansion lookup and the printable-ASCII check are applied
/// independently to each byte. Codes 0x00..=0x0D and 0x21..=0x7E do not
/// overlap, so at most one of them fires. Any other byte is dropped.
#[must_use]
pub fn expand_url(scheme: &str, encoded: &[u8]) -> String {
    let mut url = String::with_capacity(scheme.len() + encoded.len() + 8);
    url.push_str(scheme);
    for &byte in encoded {
        if let Some(expansion) = URL_EXPANSIONS.get(usize::from(byte)) {
            url.push_str(expansion);
        }
        if (0x21..=0x7E).contains(&byte) {
            url.push(char::from(byte));
        }
    }
    url
}

/// TLM frame: unencrypted telemetry.
///
/// Only version 0 has a known layout; for any other version just the
/// version byte is reported and `telemetry` is `None`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EddystoneTlm {
    pub version: u8,
    pub telemetry: Option<TlmTelemetry>,
}

/// Decoded version 0 telemetry.
///
/// ```text
/// ┌────────┬──────────┬──────────────────────────────────────┐
/// │ Offset │ Size     │ Field                                │
/// ├────────┼──────────┼──────────────────────────────────────┤
/// │ 5      │ 1        │ version = 0x00                       │
/// │ 6      │ 2 (BE)   │ battery, mV                          │
/// │ 8      │ 2 (BE)   │ temperature, signed 8.8 fixed point  │
/// │ 10     │ 4 (BE)   │ advertising PDU count                │
/// │ 14     │ 4 (BE)   │ time since power-on, 0.1 s units     │
/// └────────┴──────────┴──────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TlmTelemetry {
    pub battery_v: f64,
    pub temperature_c: f64,
    pub adv_count: u32,
    pub uptime_s: f64,
}

impl EddystoneTlm {
    fn parse(frame: &[u8]) -> Option<Self> {
        if read_u8(frame, 0)? != TLM_LENGTH_BYTE {
            return None;
        }
        let version = read_u8(frame, 5)?;
        let telemetry = if version == 0 {
            Some(TlmTelemetry {
                battery_v: f64::from(read_u16_be(frame, 6)?) / 1000.0,
                temperature_c: f64::from(read_i16_be(frame, 8)?) / 256.0,
                adv_count: read_u32_be(frame, 10)?,
                uptime_s: f64::from(read_u32_be(frame, 14)?) / 10.0,
            })
        } else {
            None
        };
        Some(Self { version, telemetry })
    }
}
