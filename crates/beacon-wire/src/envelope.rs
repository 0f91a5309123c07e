use crate::error::WireError;

/// H4 packet indicator for HCI event packets.
pub const HCI_EVENT_PACKET: u8 = 0x04;

/// HCI event code for LE Meta events.
pub const LE_META_EVENT: u8 = 0x3E;

/// LE Meta sub-event code for (legacy) LE Advertising Report.
pub const LE_ADVERTISING_REPORT: u8 = 0x02;

/// Bytes before the `total_length` field that it does not count:
/// packet type, event code and the length byte itself.
pub const ENVELOPE_PREAMBLE: usize = 3;

/// Total envelope size in bytes; the first report starts here.
pub const ENVELOPE_SIZE: usize = 5;

/// Outer envelope of an LE Advertising Report event as delivered by the
/// host controller.
///
/// ```text
/// ┌────────┬────────┬───────────────────────────────────────────┐
/// │ Offset │ Size   │ Description                               │
/// ├────────┼────────┼───────────────────────────────────────────┤
/// │ 0x00   │ 1 byte │ Packet type (0x04 = HCI event)            │
/// │ 0x01   │ 1 byte │ Event code (0x3E = LE Meta)               │
/// │ 0x02   │ 1 byte │ Parameter length (= buffer length - 3)    │
/// │ 0x03   │ 1 byte │ Meta sub-event (0x02 = advertising report)│
/// │ 0x04   │ 1 byte │ Number of reports (> 0)                   │
/// │ 0x05   │ ...    │ Reports                                   │
/// └────────┴────────┴───────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventEnvelope {
    pub packet_type: u8,
    pub event_code: u8,
    pub total_length: u8,
    pub meta_event_code: u8,
    pub report_count: u8,
}

impl EventEnvelope {
    /// Parse and validate the envelope of a complete event buffer.
    ///
    /// `buf` must be the whole event: the length check compares the
    /// declared parameter length against `buf.len()`.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if `buf` is shorter than 5 bytes.
    /// - [`WireError::WrongPacketType`], [`WireError::WrongEventCode`],
    ///   [`WireError::WrongMetaEvent`] if a magic byte is wrong.
    /// - [`WireError::LengthMismatch`] if `total_length + 3 != buf.len()`.
    /// - [`WireError::NoReports`] if the report count is zero.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        let Some(&[packet_type, event_code, total_length, meta_event_code, report_count]) =
            buf.get(..ENVELOPE_SIZE)
        else {
            return Err(WireError::UnexpectedEof {
                offset: buf.len(),
                needed: ENVELOPE_SIZE - buf.len(),
            });
        };

        if packet_type != HCI_EVENT_PACKET {
            return Err(WireError::WrongPacketType { found: packet_type });
        }
        if event_code != LE_META_EVENT {
            return Err(WireError::WrongEventCode { found: event_code });
        }
        if meta_event_code != LE_ADVERTISING_REPORT {
            return Err(WireError::WrongMetaEvent {
                found: meta_event_code,
            });
        }

        let declared = usize::from(total_length);
        let actual = buf.len() - ENVELOPE_PREAMBLE;
        if declared != actual {
            return Err(WireError::LengthMismatch { declared, actual });
        }

        if report_count == 0 {
            return Err(WireError::NoReports);
        }

        Ok(Self {
            packet_type,
            event_code,
            total_length,
            meta_event_code,
            report_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Envelope followed by `params_after` filler bytes, length byte fixed up.
    fn event(report_count: u8, params_after: usize) -> Vec<u8> {
        let mut buf = vec![
            HCI_EVENT_PACKET,
            LE_META_EVENT,
            0,
            LE_ADVERTISING_REPORT,
            report_count,
        ];
        buf.extend(std::iter::repeat_n(0xAA, params_after));
        buf[2] = u8::try_from(buf.len() - ENVELOPE_PREAMBLE).unwrap();
        buf
    }

    #[test]
    fn parses_valid_envelope() {
        let buf = event(2, 20);
        let env = EventEnvelope::read_from(&buf).unwrap();
        assert_eq!(env.report_count, 2);
        assert_eq!(usize::from(env.total_length), buf.len() - 3);
    }

    #[test]
    fn reject_short_buffer() {
        for len in 0..ENVELOPE_SIZE {
            let buf = vec![HCI_EVENT_PACKET; len];
            assert!(matches!(
                EventEnvelope::read_from(&buf),
                Err(WireError::UnexpectedEof { .. })
            ));
        }
    }

    #[test]
    fn reject_wrong_packet_type() {
        let mut buf = event(1, 4);
        buf[0] = 0x02;
        assert_eq!(
            EventEnvelope::read_from(&buf),
            Err(WireError::WrongPacketType { found: 0x02 })
        );
    }

    #[test]
    fn reject_wrong_event_code() {
        let mut buf = event(1, 4);
        buf[1] = 0x0E;
        assert_eq!(
            EventEnvelope::read_from(&buf),
            Err(WireError::WrongEventCode { found: 0x0E })
        );
    }

    #[test]
    fn reject_wrong_meta_event() {
        let mut buf = event(1, 4);
        buf[3] = 0x0D;
        assert_eq!(
            EventEnvelope::read_from(&buf),
            Err(WireError::WrongMetaEvent { found: 0x0D })
        );
    }

    #[test]
    fn reject_length_mismatch() {
        let mut buf = event(1, 4);
        buf.push(0x00);
        assert_eq!(
            EventEnvelope::read_from(&buf),
            Err(WireError::LengthMismatch {
                declared: 6,
                actual: 7
            })
        );
    }

    #[test]
    fn reject_zero_reports() {
        let buf = event(0, 4);
        assert_eq!(EventEnvelope::read_from(&buf), Err(WireError::NoReports));
    }
}
