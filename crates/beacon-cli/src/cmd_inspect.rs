/// Implementation of `beacon inspect`.
///
/// Walks each event the same way the decoder does, but prints every layer
/// instead of only the beacons. Rejections are printed rather than
/// returned, so one bad event does not hide the rest.
///
/// # Output format
///
/// ```text
/// arg 1: 45 bytes
///   envelope: packet=0x04 event=0x3E length=42 meta=0x02 reports=1
///   report 0 @5: ADV_NONCONN_IND(0x03) public(0x00) 0C:F3:EE:00:F8:EC rssi=-69 data=30
///     ad @0   len=3  type=0x01 Flags
///     ad @3   len=27 type=0xFF Manufacturer Specific Data -> ibeacon
///   1 beacon(s)
/// ```
use anyhow::Result;
use beacon_decoder::{AdWalker, Recognizer, recognize_at};
use beacon_wire::ad_structure::ad_type;
use beacon_wire::envelope::ENVELOPE_SIZE;
use beacon_wire::report::REPORT_HEADER_SIZE;
use beacon_wire::{AddressType, AdvEventType, AdvertisingReport, EventEnvelope};

use crate::InspectArgs;
use crate::input::read_events;

/// Run the `beacon inspect` command.
///
/// # Errors
///
/// Returns an error only if the input cannot be read or is not hex.
pub fn run(args: &InspectArgs) -> Result<()> {
    let recognizers = args.recognizers.decoder_config().recognizers;
    for event in read_events(&args.source)? {
        println!("{}: {} bytes", event.origin, event.bytes.len());
        for line in inspect_event(&event.bytes, &recognizers) {
            println!("  {line}");
        }
    }
    Ok(())
}

/// Describe one event, one line per layer element.
fn inspect_event(event: &[u8], recognizers: &[Recognizer]) -> Vec<String> {
    let mut lines = Vec::new();
    let envelope = match EventEnvelope::read_from(event) {
        Ok(envelope) => envelope,
        Err(err) => {
            lines.push(format!("not an advertising report event: {err}"));
            return lines;
        }
    };
    lines.push(format!(
        "envelope: packet=0x{:02X} event=0x{:02X} length={} meta=0x{:02X} reports={}",
        envelope.packet_type,
        envelope.event_code,
        envelope.total_length,
        envelope.meta_event_code,
        envelope.report_count
    ));

    let mut cursor = ENVELOPE_SIZE;
    let mut beacons = 0;
    for index in 0..usize::from(envelope.report_count) {
        let remaining = event.get(cursor..).unwrap_or_default();
        if remaining.len() < REPORT_HEADER_SIZE {
            lines.push(format!(
                "report {index} @{cursor}: only {} byte(s) left, stopping",
                remaining.len()
            ));
            break;
        }
        let (report, consumed) = match AdvertisingReport::read_from(remaining) {
            Ok(parsed) => parsed,
            Err(err) => {
                lines.push(format!("report {index} @{cursor}: malformed: {err}"));
                break;
            }
        };
        lines.push(format!(
            "report {index} @{cursor}: {}(0x{:02X}) {}(0x{:02X}) {} rssi={} data={}",
            pdu_name(report.event_type),
            report.event_type.raw(),
            address_type_name(report.address_type),
            report.address_type.raw(),
            report.address,
            report.rssi,
            report.data.len()
        ));

        let mut found = false;
        for ad in AdWalker::new(report.data) {
            let mut line = format!("  ad @{:<3} len={:<3}", ad.offset, ad.consumed);
            match ad.structure() {
                Some(structure) => line.push_str(&format!(
                    "type=0x{:02X} {}",
                    structure.ad_type,
                    ad_type::name(structure.ad_type)
                )),
                None => line.push_str("truncated"),
            }
            if let Some((recognizer, payload)) = recognize_at(&ad, recognizers) {
                if found {
                    line.push_str(&format!(" -> {} (ignored, first beacon wins)", payload.kind()));
                } else {
                    line.push_str(&format!(" -> {} via {recognizer}", payload.kind()));
                    found = true;
                }
            }
            lines.push(line.trim_end().to_string());
        }
        beacons += usize::from(found);
        cursor += consumed;
    }

    lines.push(format!("{beacons} beacon(s)"));
    lines
}

fn pdu_name(event_type: AdvEventType) -> &'static str {
    match event_type {
        AdvEventType::ConnectableUndirected => "ADV_IND",
        AdvEventType::ConnectableDirected => "ADV_DIRECT_IND",
        AdvEventType::ScannableUndirected => "ADV_SCAN_IND",
        AdvEventType::NonConnectable => "ADV_NONCONN_IND",
        AdvEventType::ScanResponse => "SCAN_RSP",
        AdvEventType::Other(_) => "PDU",
    }
}

fn address_type_name(address_type: AddressType) -> &'static str {
    match address_type {
        AddressType::Public => "public",
        AddressType::Random => "random",
    }
}
