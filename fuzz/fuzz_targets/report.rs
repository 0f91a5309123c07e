#![no_main]

use libfuzzer_sys::fuzz_target;
use beacon_wire::report::REPORT_OVERHEAD;
use beacon_wire::AdvertisingReport;

// Fuzz target: AdvertisingReport::read_from.
//
// Catches bugs in:
// - Short headers
// - Data lengths that overrun the buffer
// - The RSSI read after the data
fuzz_target!(|data: &[u8]| {
    if let Ok((report, consumed)) = AdvertisingReport::read_from(data) {
        assert_eq!(consumed, report.data.len() + REPORT_OVERHEAD);
        assert!(consumed <= data.len());
    }
});
