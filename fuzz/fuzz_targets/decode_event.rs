#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full event decode.
//
// Catches bugs in:
// - Envelope length checks
// - Report count vs. remaining bytes
// - Report data lengths running past the event
fuzz_target!(|data: &[u8]| {
    let decoder = beacon_decoder::BeaconDecoder::new();
    let beacons = decoder.decode(data);
    if let Ok(decoded) = decoder.try_decode(data) {
        assert_eq!(decoded.beacons, beacons);
        assert!(beacons.len() <= usize::from(decoded.envelope.report_count));
    } else {
        assert!(beacons.is_empty());
    }
});
