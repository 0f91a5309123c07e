use std::io;

use beacon_types::BeaconRecord;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::decoder::BeaconDecoder;
use crate::error::DecodeError;

/// H4 (UART transport) packet indicator, the byte that precedes every
/// HCI packet on the wire.
///
/// ```text
/// ┌──────┬──────────┬────────┬─────────────────────────────────┐
/// │ Byte │ Variant  │ Header │ Payload length field            │
/// ├──────┼──────────┼────────┼─────────────────────────────────┤
/// │ 0x01 │ Command  │ 3      │ header[2]                       │
/// │ 0x02 │ AclData  │ 4      │ header[2..4] LE                 │
/// │ 0x03 │ ScoData  │ 3      │ header[2]                       │
/// │ 0x04 │ Event    │ 2      │ header[1]                       │
/// │ 0x05 │ IsoData  │ 4      │ header[2..4] LE, low 14 bits    │
/// └──────┴──────────┴────────┴─────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketIndicator {
    Command,
    AclData,
    ScoData,
    Event,
    IsoData,
}

impl PacketIndicator {
    #[must_use]
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x01 => Some(Self::Command),
            0x02 => Some(Self::AclData),
            0x03 => Some(Self::ScoData),
            0x04 => Some(Self::Event),
            0x05 => Some(Self::IsoData),
            _ => None,
        }
    }

    /// Header bytes after the indicator.
    #[must_use]
    pub fn header_len(self) -> usize {
        match self {
            Self::Event => 2,
            Self::Command | Self::ScoData => 3,
            Self::AclData | Self::IsoData => 4,
        }
    }

    /// Payload length declared by `header` (the bytes after the indicator).
    /// Zero if `header` is shorter than [`header_len`](Self::header_len).
    #[must_use]
    pub fn payload_len(self, header: &[u8]) -> usize {
        match (self, header) {
            (Self::Event, [_, len, ..]) | (Self::Command | Self::ScoData, [_, _, len, ..]) => {
                usize::from(*len)
            }
            (Self::AclData, [_, _, lo, hi, ..]) => usize::from(u16::from_le_bytes([*lo, *hi])),
            (Self::IsoData, [_, _, lo, hi, ..]) => {
                usize::from(u16::from_le_bytes([*lo, *hi]) & 0x3FFF)
            }
            _ => 0,
        }
    }
}

/// Running totals for a [`StreamingDecoder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Complete packets of any kind.
    pub packets: u64,
    /// Complete HCI event packets.
    pub events: u64,
    pub beacons: u64,
}

/// Decodes beacons from a stream of H4-framed HCI packets.
///
/// Each packet is read whole into a reusable buffer. Command, ACL, SCO
/// and ISO packets are skipped by their declared length; event packets
/// go through [`BeaconDecoder`], and only those that produce beacons are
/// yielded. Backpressure is natural: nothing is read until the caller
/// awaits [`next`](Self::next).
///
/// The stream has no resync marker, so an unknown indicator byte or a
/// short read inside a packet ends it.
///
/// ```text
///   Reading ──(clean EOF)──────────────────▶ Done
///      │  └──(mid-packet EOF / bad indicator)─▶ Err, then Done
///      └──(event with beacons)──▶ yield, stay Reading
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use beacon_decoder::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn print_beacons(reader: impl AsyncRead + Unpin) {
///     let mut stream = StreamingDecoder::new(reader);
///     while let Some(batch) = stream.next().await {
///         for record in batch.unwrap() {
///             println!("{} {}", record.address, record.kind());
///         }
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    decoder: BeaconDecoder,
    state: StreamState,
    /// Current packet, indicator included. Reused across packets.
    buf: Vec<u8>,
    /// Bytes consumed from `reader` so far.
    offset: u64,
    stats: StreamStats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Reading,
    Done,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_decoder(reader, BeaconDecoder::new())
    }

    #[must_use]
    pub fn with_decoder(reader: R, decoder: BeaconDecoder) -> Self {
        Self {
            reader,
            decoder,
            state: StreamState::Reading,
            buf: Vec::with_capacity(258),
            offset: 0,
            stats: StreamStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read until the next event that carries at least one beacon.
    ///
    /// Returns `None` once the stream is exhausted or after an error has
    /// been returned.
    pub async fn next(&mut self) -> Option<Result<Vec<BeaconRecord>, DecodeError>> {
        while self.state == StreamState::Reading {
            match self.read_packet().await {
                Ok(Some(beacons)) if !beacons.is_empty() => return Some(Ok(beacons)),
                Ok(Some(_)) => {}
                Ok(None) => self.state = StreamState::Done,
                Err(err) => {
                    self.state = StreamState::Done;
                    return Some(Err(err));
                }
            }
        }
        None
    }

    /// Read one packet. `Ok(None)` on a clean end of stream.
    async fn read_packet(&mut self) -> Result<Option<Vec<BeaconRecord>>, DecodeError> {
        let start = self.offset;
        let mut indicator = [0u8; 1];
        if self.reader.read(&mut indicator).await? == 0 {
            return Ok(None);
        }
        self.offset += 1;

        let Some(kind) = PacketIndicator::from_raw(indicator[0]) else {
            return Err(DecodeError::UnknownPacketType {
                indicator: indicator[0],
                offset: start,
            });
        };

        self.buf.clear();
        self.buf.push(indicator[0]);
        self.fill(kind.header_len(), start).await?;
        let payload_len = kind.payload_len(self.buf.get(1..).unwrap_or_default());
        self.fill(payload_len, start).await?;
        self.stats.packets += 1;

        if kind != PacketIndicator::Event {
            trace!(offset = start, ?kind, len = payload_len, "skipping packet");
            return Ok(Some(Vec::new()));
        }
        self.stats.events += 1;

        match self.decoder.try_decode(&self.buf) {
            Ok(decoded) => {
                if let Some(reason) = &decoded.aborted {
                    debug!(offset = start, error = %reason, "event decoded partially");
                }
                self.stats.beacons += decoded.beacons.len() as u64;
                Ok(Some(decoded.beacons))
            }
            Err(err) => {
                trace!(offset = start, error = %err, "skipping event");
                Ok(Some(Vec::new()))
            }
        }
    }

    /// Append exactly `len` bytes from the reader to `buf`.
    async fn fill(&mut self, len: usize, packet_start: u64) -> Result<(), DecodeError> {
        let from = self.buf.len();
        self.buf.resize(from + len, 0);
        match self.reader.read_exact(&mut self.buf[from..]).await {
            Ok(_) => {
                self.offset += len as u64;
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Err(DecodeError::TruncatedStream {
                    offset: packet_start,
                })
            }
            Err(err) => Err(DecodeError::Io(err)),
        }
    }
}
