#![no_main]

use libfuzzer_sys::fuzz_target;
use beacon_wire::envelope::ENVELOPE_PREAMBLE;
use beacon_wire::EventEnvelope;

// Fuzz target: EventEnvelope::read_from.
//
// Any accepted envelope must agree with the buffer length and carry at
// least one report.
fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = EventEnvelope::read_from(data) {
        assert_eq!(usize::from(envelope.total_length) + ENVELOPE_PREAMBLE, data.len());
        assert!(envelope.report_count > 0);
    }
});
