use beacon_wire::ad_structure::{ad_type, consumed_len};
use beacon_wire::bytes::{read_array, read_i8, read_u8, read_u16_le};
use serde::Serialize;

/// Bytes an AltBeacon AD structure occupies, length byte included.
pub const ALTBEACON_STRUCT_LEN: usize = 0x1C;

/// AltBeacon beacon code as read little-endian (wire bytes `BE AC`).
pub const ALTBEACON_CODE: u16 = 0xACBE;

/// Open AltBeacon format, carried in manufacturer-specific data.
///
/// The header fields are little-endian, matching the Bluetooth company
/// id encoding.
///
/// ```text
/// ┌────────┬──────────┬────────────────────────────────────┐
/// │ Offset │ Size     │ Field                              │
/// ├────────┼──────────┼────────────────────────────────────┤
/// │ 0      │ 1        │ length = 0x1B                      │
/// │ 1      │ 1        │ AD type = 0xFF                     │
/// │ 2      │ 2 (LE)   │ manufacturer id                    │
/// │ 4      │ 2 (LE)   │ beacon code = 0xACBE               │
/// │ 6      │ 20       │ beacon id (opaque)                 │
/// │ 26     │ 1 (i8)   │ reference RSSI at 1 m              │
/// │ 27     │ 1        │ manufacturer reserved              │
/// └────────┴──────────┴────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AltBeacon {
    pub mfg_id: u16,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub beacon_id: [u8; 20],
    pub ref_rssi: i8,
    pub mfg_reserved: u8,
}

impl AltBeacon {
    /// Try to recognize an AltBeacon in the AD structure at the front of `ad`.
    ///
    /// Same contract as [`IBeacon::decode`](crate::IBeacon::decode):
    /// `consumed` is `ad[0] + 1` regardless of the outcome.
    #[must_use]
    pub fn decode(ad: &[u8]) -> (usize, Option<Self>) {
        let Some(consumed) = consumed_len(ad) else {
            return (0, None);
        };
        let beacon = if consumed == ALTBEACON_STRUCT_LEN {
            Self::parse(ad)
        } else {
            None
        };
        (consumed, beacon)
    }

    fn parse(ad: &[u8]) -> Option<Self> {
        if ad.len() < ALTBEACON_STRUCT_LEN
            || read_u8(ad, 1)? != ad_type::MANUFACTURER_SPECIFIC
            || read_u16_le(ad, 4)? != ALTBEACON_CODE
        {
            return None;
        }

        Some(Self {
            mfg_id: read_u16_le(ad, 2)?,
            beacon_id: read_array(ad, 6)?,
            ref_rssi: read_i8(ad, 26)?,
            mfg_reserved: read_u8(ad, 27)?,
        })
    }

    /// Beacon id as 40 lowercase hex digits.
    #[must_use]
    pub fn beacon_id_hex(&self) -> String {
        hex::encode(self.beacon_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: [u8; 28] = [
        0x1B, 0xFF, 0x44, 0x01, 0xBE, 0xAC, 0x8D, 0xEE, 0xFB, 0xB9, 0xF7, 0x38, 0x42, 0x97, 0x80,
        0x40, 0x96, 0x66, 0x8B, 0xB4, 0x42, 0x81, 0x13, 0x88, 0x0F, 0x4F, 0xC1, 0x55,
    ];

    #[test]
    fn decodes_known_frame() {
        let (consumed, beacon) = AltBeacon::decode(&FRAME);
        let beacon = beacon.unwrap();
        assert_eq!(consumed, 28);
        assert_eq!(beacon.mfg_id, 0x0144);
        assert_eq!(
            beacon.beacon_id_hex(),
            "8deefbb9f7384297804096668bb4428113880f4f"
        );
        assert_eq!(beacon.ref_rssi, -63);
        assert_eq!(beacon.mfg_reserved, 0x55);
    }

    #[test]
    fn big_endian_beacon_code_is_rejected() {
        let mut frame = FRAME;
        frame[4] = 0xAC;
        frame[5] = 0xBE;
        assert_eq!(AltBeacon::decode(&frame), (28, None));
    }

    #[test]
    fn wrong_ad_type_is_rejected() {
        let mut frame = FRAME;
        frame[1] = 0x16;
        assert_eq!(AltBeacon::decode(&frame), (28, None));
    }

    #[test]
    fn ibeacon_sized_structure_is_skipped() {
        let mut frame = [0u8; 27];
        frame[0] = 0x1A;
        assert_eq!(AltBeacon::decode(&frame), (27, None));
    }

    #[test]
    fn truncated_frame_is_not_recognized() {
        assert_eq!(AltBeacon::decode(&FRAME[..27]), (28, None));
    }

    #[test]
    fn serializes_beacon_id_as_hex() {
        let (_, beacon) = AltBeacon::decode(&FRAME);
        let json = serde_json::to_value(beacon.unwrap()).unwrap();
        assert_eq!(json["beacon_id"], "8deefbb9f7384297804096668bb4428113880f4f");
        assert_eq!(json["mfg_id"], 0x0144);
    }
}
