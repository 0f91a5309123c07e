//! Bounds-checked fixed-width field readers.
//!
//! Beacon formats mix byte orders inside a single structure (an AltBeacon
//! header is little-endian while an Eddystone TLM body is big-endian), so
//! there is no buffer-wide endianness. Each reader names its byte order and
//! every call site picks one per field.
//!
//! All readers take an absolute `offset` into `buf` and return `None` when
//! the field would extend past the end of the slice. Nothing here panics.
//!
//! | Reader          | Width | Order         |
//! |-----------------|-------|---------------|
//! | `read_u8`       | 1     | n/a           |
//! | `read_i8`       | 1     | n/a           |
//! | `read_u16_be`   | 2     | big-endian    |
//! | `read_u16_le`   | 2     | little-endian |
//! | `read_i16_be`   | 2     | big-endian    |
//! | `read_u32_be`   | 4     | big-endian    |
//! | `read_array`    | N     | wire order    |

/// Read `N` raw bytes starting at `offset`.
#[must_use]
pub fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    buf.get(offset..end)?.try_into().ok()
}

#[must_use]
pub fn read_u8(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

/// Read a two's-complement signed byte (RSSI and calibrated power fields).
#[must_use]
pub fn read_i8(buf: &[u8], offset: usize) -> Option<i8> {
    read_u8(buf, offset).map(|b| i8::from_ne_bytes([b]))
}

#[must_use]
pub fn read_u16_be(buf: &[u8], offset: usize) -> Option<u16> {
    read_array(buf, offset).map(u16::from_be_bytes)
}

#[must_use]
pub fn read_u16_le(buf: &[u8], offset: usize) -> Option<u16> {
    read_array(buf, offset).map(u16::from_le_bytes)
}

#[must_use]
pub fn read_i16_be(buf: &[u8], offset: usize) -> Option<i16> {
    read_array(buf, offset).map(i16::from_be_bytes)
}

#[must_use]
pub fn read_u32_be(buf: &[u8], offset: usize) -> Option<u32> {
    read_array(buf, offset).map(u32::from_be_bytes)
}
