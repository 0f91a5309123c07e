/// Well-known AD type codes that the beacon formats and the inspector
/// care about.
pub mod ad_type {
    pub const FLAGS: u8 = 0x01;
    pub const INCOMPLETE_16BIT_UUIDS: u8 = 0x02;
    pub const COMPLETE_16BIT_UUIDS: u8 = 0x03;
    pub const SHORTENED_LOCAL_NAME: u8 = 0x08;
    pub const COMPLETE_LOCAL_NAME: u8 = 0x09;
    pub const TX_POWER_LEVEL: u8 = 0x0A;
    pub const SERVICE_DATA_16BIT: u8 = 0x16;
    pub const MANUFACTURER_SPECIFIC: u8 = 0xFF;

    /// Human-readable name for an AD type, for diagnostics.
    #[must_use]
    pub fn name(ad_type: u8) -> &'static str {
        match ad_type {
            FLAGS => "Flags",
            INCOMPLETE_16BIT_UUIDS => "Incomplete 16-bit UUIDs",
            COMPLETE_16BIT_UUIDS => "Complete 16-bit UUIDs",
            SHORTENED_LOCAL_NAME => "Shortened Local Name",
            COMPLETE_LOCAL_NAME => "Complete Local Name",
            TX_POWER_LEVEL => "Tx Power Level",
            SERVICE_DATA_16BIT => "Service Data (16-bit UUID)",
            MANUFACTURER_SPECIFIC => "Manufacturer Specific Data",
            _ => "Unknown",
        }
    }
}

/// One length-prefixed AD structure inside advertising data.
///
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │ length   (u8)  — bytes that follow, not self │
/// │ ad_type  (u8)                                │
/// │ payload  [length - 1]                        │
/// └──────────────────────────────────────────────┘
/// ```
///
/// The length byte is self-describing: a structure always occupies
/// `length + 1` bytes, whether or not anything recognizes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdStructure<'a> {
    pub ad_type: u8,
    pub payload: &'a [u8],
}

/// Bytes occupied by the structure starting at `buf[0]`, length byte
/// included. `None` for an empty slice.
#[must_use]
pub fn consumed_len(buf: &[u8]) -> Option<usize> {
    buf.first().map(|&len| usize::from(len) + 1)
}

impl<'a> AdStructure<'a> {
    /// Frame the structure at the front of `buf`.
    ///
    /// Returns `(structure, bytes_consumed)`, or `None` when the slice is
    /// empty, the length byte is zero (no type byte), or the declared
    /// length runs past the end of `buf`.
    #[must_use]
    pub fn read_from(buf: &'a [u8]) -> Option<(Self, usize)> {
        let consumed = consumed_len(buf)?;
        let body = buf.get(1..consumed)?;
        let (&ad_type, payload) = body.split_first()?;
        Some((Self { ad_type, payload }, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_flags_structure() {
        let buf = [0x02, 0x01, 0x04, 0x1A];
        let (ad, consumed) = AdStructure::read_from(&buf).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(ad.ad_type, ad_type::FLAGS);
        assert_eq!(ad.payload, &[0x04]);
    }

    #[test]
    fn zero_length_has_no_type() {
        assert_eq!(consumed_len(&[0x00, 0xFF]), Some(1));
        assert_eq!(AdStructure::read_from(&[0x00, 0xFF]), None);
    }

    #[test]
    fn overlong_length_is_rejected() {
        assert_eq!(consumed_len(&[0x05, 0xFF, 0x00]), Some(6));
        assert_eq!(AdStructure::read_from(&[0x05, 0xFF, 0x00]), None);
    }

    #[test]
    fn empty_slice() {
        assert_eq!(consumed_len(&[]), None);
        assert_eq!(AdStructure::read_from(&[]), None);
    }

    #[test]
    fn names() {
        assert_eq!(ad_type::name(0xFF), "Manufacturer Specific Data");
        assert_eq!(ad_type::name(0x16), "Service Data (16-bit UUID)");
        assert_eq!(ad_type::name(0x42), "Unknown");
    }
}
