use beacon_types::BeaconRecord;
use beacon_wire::EventEnvelope;
use beacon_wire::envelope::ENVELOPE_SIZE;
use beacon_wire::report::REPORT_HEADER_SIZE;
use tracing::debug;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::report_parser::parse_report;

/// Result of a diagnostic decode pass.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────┐
/// │ DecodedEvent                                               │
/// │   envelope: EventEnvelope       ← validated outer header   │
/// │   beacons:  Vec<BeaconRecord>   ← in report order          │
/// │   aborted:  Option<DecodeError> ← why reading stopped early│
/// └────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug)]
pub struct DecodedEvent {
    pub envelope: EventEnvelope,
    pub beacons: Vec<BeaconRecord>,
    /// Set when a report header was malformed. `beacons` still holds
    /// everything decoded from the reports before it.
    pub aborted: Option<DecodeError>,
}

/// Decodes complete LE Advertising Report events into beacon records.
///
/// One call handles one buffer and keeps no state between calls, so a
/// single decoder can be shared freely across threads.
///
/// Decoding proceeds in three steps:
///
///   1. **Envelope**: validate the five byte event header. Anything that
///      is not an advertising report event yields no beacons.
///   2. **Reports**: starting at offset 5, parse up to `report_count`
///      reports, stopping early if fewer than nine bytes are left.
///   3. **Beacons**: each report's data is walked with the configured
///      recognizers; at most one beacon is taken per report.
///
/// A report with a bad header ends the pass. Its length cannot be
/// trusted, so there is nowhere to resume from.
///
/// # Example
///
/// ```rust
/// use beacon_decoder::BeaconDecoder;
///
/// let event = [0x04, 0x3E, 0x0C, 0x02, 0x01, 0x03, 0x00, 0x01, 0x02, 0x03,
///              0x04, 0x05, 0x06, 0x00, 0xC5];
/// assert!(BeaconDecoder::new().decode(&event).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BeaconDecoder {
    config: DecoderConfig,
}

impl BeaconDecoder {
    /// Decoder with the default recognizer order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode every beacon in `event`.
    ///
    /// Never fails. A buffer that is not an advertising report event
    /// gives an empty list; a malformed report gives the beacons from the
    /// reports before it.
    #[must_use]
    pub fn decode(&self, event: &[u8]) -> Vec<BeaconRecord> {
        self.try_decode(event)
            .map(|decoded| decoded.beacons)
            .unwrap_or_default()
    }

    /// Same pass as [`decode`](Self::decode), keeping the envelope and the
    /// reason decoding stopped.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NotAdvertisingEvent`] if the envelope is rejected.
    /// A malformed report is not an `Err`; it is reported through
    /// [`DecodedEvent::aborted`].
    pub fn try_decode(&self, event: &[u8]) -> Result<DecodedEvent, DecodeError> {
        let envelope = EventEnvelope::read_from(event).map_err(|err| {
            debug!(len = event.len(), error = %err, "rejected event envelope");
            DecodeError::NotAdvertisingEvent(err)
        })?;

        let mut cursor = ENVELOPE_SIZE;
        let mut beacons = Vec::new();
        let mut aborted = None;

        for index in 0..usize::from(envelope.report_count) {
            let remaining = event.get(cursor..).unwrap_or_default();
            if remaining.len() < REPORT_HEADER_SIZE {
                debug!(
                    index,
                    declared = envelope.report_count,
                    remaining = remaining.len(),
                    "event ran out before its declared report count"
                );
                break;
            }

            match parse_report(remaining, &self.config.recognizers) {
                Ok(parsed) => {
                    cursor += parsed.consumed;
                    beacons.extend(parsed.beacon);
                }
                Err(source) => {
                    debug!(index, offset = cursor, error = %source, "malformed advertising report");
                    aborted = Some(DecodeError::MalformedReport {
                        index,
                        offset: cursor,
                        source,
                    });
                    break;
                }
            }
        }

        Ok(DecodedEvent {
            envelope,
            beacons,
            aborted,
        })
    }
}

/// Decode `event` with the default configuration.
#[must_use]
pub fn decode_beacons(event: &[u8]) -> Vec<BeaconRecord> {
    BeaconDecoder::new().decode(event)
}
