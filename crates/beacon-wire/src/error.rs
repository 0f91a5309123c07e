/// Framing errors raised while reading the outer layers of an HCI event.
///
/// Every variant carries enough context to locate the problem in the
/// raw buffer. Offsets are relative to the start of the slice handed to
/// the failing reader, not to the start of the whole event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A read needed more bytes than the slice holds.
    #[error("unexpected end of input at offset {offset}: needed {needed} more byte(s)")]
    UnexpectedEof { offset: usize, needed: usize },

    /// First byte was not the HCI event packet indicator (0x04).
    #[error("not an HCI event packet: packet type {found:#04X}")]
    WrongPacketType { found: u8 },

    /// Event code was not LE Meta (0x3E).
    #[error("not an LE meta event: event code {found:#04X}")]
    WrongEventCode { found: u8 },

    /// LE meta sub-event was not an advertising report (0x02).
    #[error("not an LE advertising report: sub-event {found:#04X}")]
    WrongMetaEvent { found: u8 },

    /// The envelope's parameter length disagrees with the buffer length.
    #[error("event length mismatch: header declares {declared} parameter bytes, buffer holds {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// The envelope declared zero advertising reports.
    #[error("advertising report event carries no reports")]
    NoReports,

    /// The report's address type is neither public (0) nor random (1).
    #[error("invalid address type {value:#04X}")]
    InvalidAddressType { value: u8 },

    /// The report's data length runs past the end of the buffer.
    #[error("report data length {data_length} overruns the {remaining} remaining byte(s)")]
    ReportOverrun { data_length: usize, remaining: usize },
}
