use serde::Serialize;

use crate::address::{ADDRESS_SIZE, AddressType, DeviceAddress};
use crate::bytes::{read_array, read_i8};
use crate::error::WireError;

/// Fixed header size of one advertising report, before its data.
pub const REPORT_HEADER_SIZE: usize = 9;

/// Header plus the trailing RSSI byte; a report consumes
/// `data_length + REPORT_OVERHEAD` bytes.
pub const REPORT_OVERHEAD: usize = REPORT_HEADER_SIZE + 1;

/// Legacy advertising PDU type reported by the controller.
///
/// ```text
/// ┌──────┬───────────────────────┬───────────────────────────┐
/// │ Wire │ Variant               │ PDU                       │
/// ├──────┼───────────────────────┼───────────────────────────┤
/// │ 0x00 │ ConnectableUndirected │ ADV_IND                   │
/// │ 0x01 │ ConnectableDirected   │ ADV_DIRECT_IND            │
/// │ 0x02 │ ScannableUndirected   │ ADV_SCAN_IND              │
/// │ 0x03 │ NonConnectable        │ ADV_NONCONN_IND (beacons) │
/// │ 0x04 │ ScanResponse          │ SCAN_RSP                  │
/// │ else │ Other(u8)             │ preserved as-is           │
/// └──────┴───────────────────────┴───────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvEventType {
    ConnectableUndirected,
    ConnectableDirected,
    ScannableUndirected,
    NonConnectable,
    ScanResponse,
    Other(u8),
}

impl AdvEventType {
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0x00 => Self::ConnectableUndirected,
            0x01 => Self::ConnectableDirected,
            0x02 => Self::ScannableUndirected,
            0x03 => Self::NonConnectable,
            0x04 => Self::ScanResponse,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        match self {
            Self::ConnectableUndirected => 0x00,
            Self::ConnectableDirected => 0x01,
            Self::ScannableUndirected => 0x02,
            Self::NonConnectable => 0x03,
            Self::ScanResponse => 0x04,
            Self::Other(raw) => raw,
        }
    }
}

/// One device's advertisement inside an LE Advertising Report event.
///
/// ```text
/// ┌────────┬─────────────┬──────────────────────────────────────┐
/// │ Offset │ Size        │ Description                          │
/// ├────────┼─────────────┼──────────────────────────────────────┤
/// │ 0      │ 1 byte      │ Event type (PDU type)                │
/// │ 1      │ 1 byte      │ Address type (0 public, 1 random)    │
/// │ 2      │ 6 bytes     │ Device address, LSB first            │
/// │ 8      │ 1 byte      │ Data length                          │
/// │ 9      │ data_length │ Advertising data (AD structures)     │
/// │ 9 + n  │ 1 byte      │ RSSI (signed dBm)                    │
/// └────────┴─────────────┴──────────────────────────────────────┘
/// ```
///
/// `data` borrows from the event buffer; nothing is copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvertisingReport<'a> {
    pub event_type: AdvEventType,
    pub address_type: AddressType,
    pub address: DeviceAddress,
    pub data: &'a [u8],
    pub rssi: i8,
}

impl<'a> AdvertisingReport<'a> {
    /// Read one report from the front of `buf`.
    ///
    /// `buf` is the remainder of the event starting at this report; any
    /// bytes after the report (further reports) are left untouched.
    ///
    /// # Returns
    ///
    /// `(report, bytes_consumed)`, where `bytes_consumed` is always
    /// `data.len() + 10`.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if fewer than 9 header bytes remain.
    /// - [`WireError::InvalidAddressType`] for address types other than 0/1.
    /// - [`WireError::ReportOverrun`] if `data_length + 10` exceeds `buf.len()`.
    pub fn read_from(buf: &'a [u8]) -> Result<(Self, usize), WireError> {
        let Some(header) = buf.get(..REPORT_HEADER_SIZE) else {
            return Err(WireError::UnexpectedEof {
                offset: buf.len(),
                needed: REPORT_HEADER_SIZE - buf.len(),
            });
        };

        let event_type = AdvEventType::from_raw(header[0]);
        let address_type = AddressType::from_raw(header[1])?;
        let data_length = usize::from(header[8]);

        let consumed = data_length + REPORT_OVERHEAD;
        if consumed > buf.len() {
            return Err(WireError::ReportOverrun {
                data_length,
                remaining: buf.len(),
            });
        }

        // Both reads are in bounds after the overrun check above.
        let octets: [u8; ADDRESS_SIZE] =
            read_array(header, 2).ok_or(WireError::UnexpectedEof { offset: 2, needed: 6 })?;
        let rssi = read_i8(buf, REPORT_HEADER_SIZE + data_length).ok_or(
            WireError::UnexpectedEof {
                offset: REPORT_HEADER_SIZE + data_length,
                needed: 1,
            },
        )?;

        Ok((
            Self {
                event_type,
                address_type,
                address: DeviceAddress::from_wire(octets),
                data: &buf[REPORT_HEADER_SIZE..REPORT_HEADER_SIZE + data_length],
                rssi,
            },
            consumed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(address_type: u8, data: &[u8], rssi: u8) -> Vec<u8> {
        let mut buf = vec![0x03, address_type, 0xEC, 0xF8, 0x00, 0xEE, 0xF3, 0x0C];
        buf.push(u8::try_from(data.len()).unwrap());
        buf.extend_from_slice(data);
        buf.push(rssi);
        buf
    }

    #[test]
    fn reads_header_data_and_rssi() {
        let buf = report(0, &[0x02, 0x01, 0x04], 0xBB);
        let (report, consumed) = AdvertisingReport::read_from(&buf).unwrap();
        assert_eq!(consumed, 13);
        assert_eq!(report.event_type, AdvEventType::NonConnectable);
        assert_eq!(report.address_type, AddressType::Public);
        assert_eq!(report.address.to_string(), "0C:F3:EE:00:F8:EC");
        assert_eq!(report.data, &[0x02, 0x01, 0x04]);
        assert_eq!(report.rssi, -69);
    }

    #[test]
    fn trailing_bytes_are_not_consumed() {
        let mut buf = report(1, &[0xAA], 0x00);
        buf.extend_from_slice(&[0x99; 12]);
        let (report, consumed) = AdvertisingReport::read_from(&buf).unwrap();
        assert_eq!(consumed, 11);
        assert_eq!(report.address_type, AddressType::Random);
        assert_eq!(report.data, &[0xAA]);
    }

    #[test]
    fn empty_data_is_valid() {
        let buf = report(0, &[], 0xC0);
        let (report, consumed) = AdvertisingReport::read_from(&buf).unwrap();
        assert_eq!(consumed, REPORT_OVERHEAD);
        assert!(report.data.is_empty());
        assert_eq!(report.rssi, -64);
    }

    #[test]
    fn reject_short_header() {
        let buf = [0x03, 0x00, 0x01];
        assert!(matches!(
            AdvertisingReport::read_from(&buf),
            Err(WireError::UnexpectedEof { offset: 3, needed: 6 })
        ));
    }

    #[test]
    fn reject_identity_address_type() {
        let buf = report(2, &[0x01], 0x00);
        assert_eq!(
            AdvertisingReport::read_from(&buf),
            Err(WireError::InvalidAddressType { value: 2 })
        );
    }

    #[test]
    fn reject_overrun_including_missing_rssi() {
        let mut buf = report(0, &[0x01, 0x02], 0x00);
        buf.pop();
        assert_eq!(
            AdvertisingReport::read_from(&buf),
            Err(WireError::ReportOverrun {
                data_length: 2,
                remaining: 11
            })
        );
    }

    #[test]
    fn event_type_round_trips_unknown_values() {
        assert_eq!(AdvEventType::from_raw(0x07), AdvEventType::Other(0x07));
        assert_eq!(AdvEventType::from_raw(0x07).raw(), 0x07);
        assert_eq!(AdvEventType::from_raw(0x00).raw(), 0x00);
    }
}
