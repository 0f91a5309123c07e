#![no_main]

use libfuzzer_sys::fuzz_target;
use beacon_decoder::{find_beacon, AdWalker, Recognizer};
use beacon_wire::ad_structure::consumed_len;

// Fuzz target: AD structure walk and recognizers.
//
// Every recognizer must report `len + 1` consumed bytes for the structure
// in front of it, and the walk must stay inside the data.
fuzz_target!(|data: &[u8]| {
    for cursor in AdWalker::new(data) {
        assert!(cursor.offset < data.len());
        for recognizer in Recognizer::DEFAULT_ORDER {
            let (consumed, _) = recognizer.recognize(cursor.rest);
            assert_eq!(Some(consumed), consumed_len(cursor.rest));
        }
    }
    let _ = find_beacon(data, &Recognizer::DEFAULT_ORDER);
});
