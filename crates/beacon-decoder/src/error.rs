use beacon_wire::WireError;

/// Errors surfaced by the diagnostic decode paths.
///
/// The plain [`BeaconDecoder::decode`](crate::BeaconDecoder::decode) never
/// returns these; it maps every failure to "no more beacons". They exist
/// for [`try_decode`](crate::BeaconDecoder::try_decode), the inspector,
/// and the H4 stream adapter.
///
/// ```text
///   DecodeError
///   ├── NotAdvertisingEvent(WireError) ← envelope rejected, nothing decoded
///   ├── MalformedReport                ← report header bad, rest of event dropped
///   ├── TruncatedStream                ← H4 stream ended inside a packet
///   ├── UnknownPacketType              ← H4 indicator byte not recognized
///   └── Io(std::io::Error)             ← underlying reader failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The buffer is not an LE Advertising Report event.
    ///
    /// Routine on a live controller: most events are something else.
    #[error("not an LE advertising report event: {0}")]
    NotAdvertisingEvent(WireError),

    /// Report `index` (zero-based) at byte `offset` of the event had an
    /// invalid header. There is no resync point, so later reports in the
    /// same event are not read.
    #[error("malformed advertising report #{index} at offset {offset}: {source}")]
    MalformedReport {
        index: usize,
        offset: usize,
        source: WireError,
    },

    /// The H4 stream ended part way through a packet.
    #[error("stream truncated inside a packet starting at offset {offset}")]
    TruncatedStream { offset: u64 },

    /// An H4 packet indicator outside 0x01..=0x05. Packet boundaries are
    /// lost from here on.
    #[error("unknown H4 packet indicator {indicator:#04X} at offset {offset}")]
    UnknownPacketType { indicator: u8, offset: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
