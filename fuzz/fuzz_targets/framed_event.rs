#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Report {
    event_type: u8,
    random_address: bool,
    address: [u8; 6],
    data: Vec<u8>,
    rssi: i8,
}

// Fuzz target: correctly framed events with arbitrary advertising data.
//
// Raw fuzzing rarely gets past the envelope length check. Building the
// framing here sends every input through the AD walker and recognizers.
fuzz_target!(|reports: Vec<Report>| {
    let mut body = Vec::new();
    let mut count = 0u8;
    for report in reports.iter().take(8) {
        let data = &report.data[..report.data.len().min(31)];
        body.push(report.event_type);
        body.push(u8::from(report.random_address));
        body.extend_from_slice(&report.address);
        body.push(data.len() as u8);
        body.extend_from_slice(data);
        body.push(report.rssi as u8);
        count += 1;
    }
    if count == 0 || body.len() + 2 > usize::from(u8::MAX) {
        return;
    }

    let mut event = vec![0x04, 0x3E, (body.len() + 2) as u8, 0x02, count];
    event.extend_from_slice(&body);

    let decoded = beacon_decoder::BeaconDecoder::new()
        .try_decode(&event)
        .expect("framed event must pass the envelope");
    assert!(decoded.aborted.is_none());
    assert!(decoded.beacons.len() <= usize::from(count));
});
