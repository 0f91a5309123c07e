use beacon_types::BeaconRecord;
use beacon_wire::{AdvertisingReport, WireError};

use crate::ad_walker::find_beacon;
use crate::config::Recognizer;

/// A report header plus whatever beacon its data carried.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedReport<'a> {
    pub report: AdvertisingReport<'a>,
    /// Bytes this report occupies in the event, `data_length + 10`.
    pub consumed: usize,
    pub beacon: Option<BeaconRecord>,
}

/// Parse the report at the front of `buf` and look for a beacon in its
/// advertising data.
///
/// The walk is confined to the report's own data; the trailing RSSI byte
/// and any later reports are never offered to a recognizer.
///
/// # Errors
///
/// Propagates the [`WireError`] from [`AdvertisingReport::read_from`] when
/// the header is short, the address type is not public or random, or the
/// data length overruns `buf`. Callers cannot resync after this.
pub fn parse_report<'a>(
    buf: &'a [u8],
    recognizers: &[Recognizer],
) -> Result<ParsedReport<'a>, WireError> {
    let (report, consumed) = AdvertisingReport::read_from(buf)?;
    let beacon = find_beacon(report.data, recognizers).map(|payload| BeaconRecord {
        event_type: report.event_type,
        address_type: report.address_type,
        address: report.address,
        rssi: report.rssi,
        payload,
    });
    Ok(ParsedReport {
        report,
        consumed,
        beacon,
    })
}
