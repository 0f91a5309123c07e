use beacon_wire::ad_structure::{ad_type, consumed_len};
use beacon_wire::bytes::{read_array, read_i8, read_u16_be};
use serde::Serialize;
use uuid::Uuid;

/// Bytes an iBeacon AD structure occupies, length byte included.
pub const IBEACON_STRUCT_LEN: usize = 0x1B;

const LENGTH_BYTE: u8 = 0x1A;

/// Apple's company identifier, transmitted low byte first.
pub const APPLE_COMPANY_ID: [u8; 2] = [0x4C, 0x00];

/// Apple sub-type for iBeacon proximity frames.
pub const IBEACON_SUBTYPE: u8 = 0x02;

/// Length of the iBeacon sub-payload that follows the sub-type byte.
pub const IBEACON_SUBTYPE_LEN: u8 = 0x15;

/// Apple iBeacon, carried in manufacturer-specific data.
///
/// All multi-byte fields after the company id are big-endian.
///
/// ```text
/// ┌────────┬──────────┬────────────────────────────────────┐
/// │ Offset │ Size     │ Field                              │
/// ├────────┼──────────┼────────────────────────────────────┤
/// │ 0      │ 1        │ length = 0x1A                      │
/// │ 1      │ 1        │ AD type = 0xFF                     │
/// │ 2      │ 2        │ company id 0x4C 0x00 (Apple)       │
/// │ 4      │ 1        │ sub-type = 0x02                    │
/// │ 5      │ 1        │ sub-type length = 0x15             │
/// │ 6      │ 16       │ proximity UUID                     │
/// │ 22     │ 2 (BE)   │ major                              │
/// │ 24     │ 2 (BE)   │ minor                              │
/// │ 26     │ 1 (i8)   │ calibrated RSSI at 1 m             │
/// └────────┴──────────┴────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IBeacon {
    pub uuid: Uuid,
    pub major: u16,
    pub minor: u16,
    pub ref_rssi: i8,
}

impl IBeacon {
    /// Try to recognize an iBeacon in the AD structure at the front of `ad`.
    ///
    /// Returns `(consumed, beacon)`. `consumed` is `ad[0] + 1` whether or
    /// not the structure is an iBeacon (0 for an empty slice). A failed
    /// check yields `None`, never a partial record.
    #[must_use]
    pub fn decode(ad: &[u8]) -> (usize, Option<Self>) {
        let Some(consumed) = consumed_len(ad) else {
            return (0, None);
        };
        let beacon = if consumed == IBEACON_STRUCT_LEN {
            Self::parse(ad)
        } else {
            None
        };
        (consumed, beacon)
    }

    fn parse(ad: &[u8]) -> Option<Self> {
        let header: [u8; 6] = read_array(ad, 0)?;
        let expected = [
            LENGTH_BYTE,
            ad_type::MANUFACTURER_SPECIFIC,
            APPLE_COMPANY_ID[0],
            APPLE_COMPANY_ID[1],
            IBEACON_SUBTYPE,
            IBEACON_SUBTYPE_LEN,
        ];
        if header != expected {
            return None;
        }

        Some(Self {
            uuid: Uuid::from_bytes(read_array(ad, 6)?),
            major: read_u16_be(ad, 22)?,
            minor: read_u16_be(ad, 24)?,
            ref_rssi: read_i8(ad, 26)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: [u8; 27] = [
        0x1A, 0xFF, 0x4C, 0x00, 0x02, 0x15, 0x8D, 0xEE, 0xFB, 0xB9, 0xF7, 0x38, 0x42, 0x97, 0x80,
        0x40, 0x96, 0x66, 0x8B, 0xB4, 0x42, 0x81, 0x13, 0x88, 0x0F, 0x4E, 0xC1,
    ];

    #[test]
    fn decodes_known_frame() {
        let (consumed, beacon) = IBeacon::decode(&FRAME);
        let beacon = beacon.unwrap();
        assert_eq!(consumed, 27);
        assert_eq!(
            beacon.uuid.to_string(),
            "8deefbb9-f738-4297-8040-96668bb44281"
        );
        assert_eq!(beacon.major, 0x1388);
        assert_eq!(beacon.minor, 0x0F4E);
        assert_eq!(beacon.ref_rssi, -63);
    }

    #[test]
    fn truncated_frame_is_not_recognized() {
        let (consumed, beacon) = IBeacon::decode(&FRAME[..26]);
        assert_eq!(consumed, 27);
        assert!(beacon.is_none());
    }

    #[test]
    fn each_magic_byte_is_checked() {
        for idx in 1..6 {
            let mut frame = FRAME;
            frame[idx] ^= 0x01;
            let (consumed, beacon) = IBeacon::decode(&frame);
            assert_eq!(consumed, 27, "byte {idx}");
            assert!(beacon.is_none(), "byte {idx} flipped still recognized");
        }
    }

    #[test]
    fn other_lengths_report_their_own_size() {
        let (consumed, beacon) = IBeacon::decode(&[0x02, 0x01, 0x06]);
        assert_eq!(consumed, 3);
        assert!(beacon.is_none());
    }

    #[test]
    fn empty_slice_consumes_nothing() {
        assert_eq!(IBeacon::decode(&[]), (0, None));
    }
}
