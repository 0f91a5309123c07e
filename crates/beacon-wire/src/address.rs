use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::WireError;

/// Size of a Bluetooth device address on the wire.
pub const ADDRESS_SIZE: usize = 6;

/// LE address type carried in an advertising report header.
///
/// Only the two legacy values are accepted. Controllers that report
/// resolved identity addresses (0x02/0x03) are outside what the report
/// parser understands, and the header is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Public,
    Random,
}

impl AddressType {
    /// Parse the raw address-type byte.
    ///
    /// # Errors
    ///
    /// [`WireError::InvalidAddressType`] for anything other than 0 or 1.
    pub fn from_raw(value: u8) -> Result<Self, WireError> {
        match value {
            0x00 => Ok(Self::Public),
            0x01 => Ok(Self::Random),
            value => Err(WireError::InvalidAddressType { value }),
        }
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        match self {
            Self::Public => 0x00,
            Self::Random => 0x01,
        }
    }
}

/// A 48-bit Bluetooth device address.
///
/// Link-layer addresses are transmitted least-significant octet first.
/// `DeviceAddress` stores the octets in display order (most significant
/// first), so `Display` prints them left to right:
///
/// ```text
///   wire:    EC F8 00 EE F3 0C
///   display: 0C:F3:EE:00:F8:EC
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceAddress([u8; ADDRESS_SIZE]);

impl DeviceAddress {
    /// Build an address from its six octets in wire (little-endian) order.
    #[must_use]
    pub fn from_wire(mut octets: [u8; ADDRESS_SIZE]) -> Self {
        octets.reverse();
        Self(octets)
    }

    /// Build an address from its octets in display order.
    #[must_use]
    pub fn from_display_octets(octets: [u8; ADDRESS_SIZE]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl Serialize for DeviceAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
