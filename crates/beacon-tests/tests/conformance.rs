//! Conformance tests: captured controller events and hand-built frames for
//! every supported format, decoded end to end through `BeaconDecoder`.
//!
//! The captured events are real `hcidump` output. The built frames pin
//! each format's field layout and byte order independently of any capture.

use beacon_decoder::{BeaconDecoder, decode_beacons};
use beacon_tests::*;
use beacon_types::{BeaconKind, BeaconPayload, BeaconRecord, Eddystone, TlmTelemetry};
use beacon_wire::{AddressType, AdvEventType};
use insta::assert_snapshot;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn decode_hex(fixture: &str) -> Vec<BeaconRecord> {
    decode_beacons(&hex_bytes(fixture))
}

/// Decode a single-report event whose data is `structures`, expecting
/// exactly one beacon.
fn decode_one(structures: &[Vec<u8>]) -> BeaconRecord {
    let event = event(&[simple_report(&ad_data(structures), -70)]);
    let mut beacons = decode_beacons(&event);
    assert_eq!(beacons.len(), 1, "expected one beacon, got {beacons:?}");
    beacons.remove(0)
}

fn summary(records: &[BeaconRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} {} rssi={}", r.address, r.kind(), r.rssi))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Captured events ───────────────────────────────────────────────────────────

#[test]
fn single_ibeacon_event() {
    let beacons = decode_hex(SINGLE_IBEACON);
    assert_eq!(beacons.len(), 1);

    let record = &beacons[0];
    assert_eq!(record.address.to_string(), "0C:F3:EE:00:F8:EC");
    assert_eq!(record.address_type, AddressType::Public);
    assert_eq!(record.event_type, AdvEventType::NonConnectable);
    assert_eq!(record.rssi, -69);

    let BeaconPayload::IBeacon(beacon) = &record.payload else {
        panic!("expected iBeacon, got {:?}", record.payload);
    };
    assert_eq!(beacon.uuid.to_string(), "8deefbb9-f738-4297-8040-96668bb44281");
    assert_eq!(beacon.major, 0x1388);
    assert_eq!(beacon.minor, 0x0F4E);
    assert_eq!(beacon.ref_rssi, -63);
}

#[test]
fn second_report_without_flags_still_decodes() {
    let beacons = decode_hex(TWO_IBEACONS);
    assert_snapshot!(summary(&beacons), @r"
    0C:F3:EE:00:F8:EC ibeacon rssi=-69
    0D:F3:EE:00:F8:EC ibeacon rssi=-80
    ");

    let BeaconPayload::IBeacon(second) = &beacons[1].payload else {
        panic!("expected iBeacon");
    };
    assert_eq!(second.minor, 0x0F4F);
}

#[test]
fn ibeacon_and_altbeacon_in_one_event() {
    let beacons = decode_hex(IBEACON_AND_ALTBEACON);
    assert_snapshot!(summary(&beacons), @r"
    0C:F3:EE:00:F8:EC ibeacon rssi=-69
    0D:F3:EE:00:F8:EC altbeacon rssi=-79
    ");

    let BeaconPayload::AltBeacon(alt) = &beacons[1].payload else {
        panic!("expected AltBeacon");
    };
    assert_eq!(alt.mfg_id, 0x0144);
    assert_eq!(alt.beacon_id_hex(), "8deefbb9f7384297804096668bb4428113880f4f");
    assert_eq!(alt.ref_rssi, -63);
    assert_eq!(alt.mfg_reserved, 0x55);
}

#[test]
fn captured_events_as_json() {
    let beacons = decode_hex(IBEACON_AND_ALTBEACON);
    let json = serde_json::to_string_pretty(&beacons).unwrap();
    assert_snapshot!(json, @r#"
    [
      {
        "event_type": "non_connectable",
        "address_type": "public",
        "address": "0C:F3:EE:00:F8:EC",
        "rssi": -69,
        "payload": {
          "format": "ibeacon",
          "uuid": "8deefbb9-f738-4297-8040-96668bb44281",
          "major": 5000,
          "minor": 3918,
          "ref_rssi": -63
        }
      },
      {
        "event_type": "non_connectable",
        "address_type": "public",
        "address": "0D:F3:EE:00:F8:EC",
        "rssi": -79,
        "payload": {
          "format": "altbeacon",
          "mfg_id": 324,
          "beacon_id": "8deefbb9f7384297804096668bb4428113880f4f",
          "ref_rssi": -63,
          "mfg_reserved": 85
        }
      }
    ]
    "#);
}

// ── Built frames ──────────────────────────────────────────────────────────────

#[test]
fn ibeacon_fields_are_big_endian() {
    let record = decode_one(&[flags_ad(0x06), ibeacon_ad(CAPTURED_UUID, 0x0102, 0xFFFE, -59)]);
    let BeaconPayload::IBeacon(beacon) = record.payload else {
        panic!("expected iBeacon");
    };
    assert_eq!(beacon.uuid.as_bytes(), &CAPTURED_UUID);
    assert_eq!(beacon.major, 0x0102);
    assert_eq!(beacon.minor, 0xFFFE);
    assert_eq!(beacon.ref_rssi, -59);
}

#[test]
fn altbeacon_header_is_little_endian() {
    let mut id = [0u8; 20];
    id.iter_mut().enumerate().for_each(|(i, b)| *b = u8::try_from(i).unwrap());
    let record = decode_one(&[altbeacon_ad(0x0118, id, -56, 0xA5)]);
    let BeaconPayload::AltBeacon(beacon) = record.payload else {
        panic!("expected AltBeacon");
    };
    assert_eq!(beacon.mfg_id, 0x0118);
    assert_eq!(beacon.beacon_id, id);
    assert_eq!(beacon.ref_rssi, -56);
    assert_eq!(beacon.mfg_reserved, 0xA5);
}

#[test]
fn eddystone_uid_with_and_without_reserved_bytes() {
    let namespace = [0xED, 0xD1, 0xEB, 0xEA, 0xC0, 0x4E, 0x5D, 0xEF, 0xA0, 0x17];
    let instance = [0x0B, 0xDB, 0x87, 0x53, 0x98, 0x03];

    let short = decode_one(&[eddystone_uid_ad(-20, namespace, instance, false)]);
    let long = decode_one(&[eddystone_uid_ad(-20, namespace, instance, true)]);
    assert_eq!(short.payload, long.payload);

    let BeaconPayload::Eddystone(Eddystone::Uid(uid)) = short.payload else {
        panic!("expected Eddystone UID");
    };
    assert_eq!(uid.ref_rssi, -61);
    assert_eq!(uid.namespace, namespace);
    assert_eq!(uid.instance, instance);
}

#[test]
fn eddystone_url_expands_suffix_after_literal() {
    let record = decode_one(&[
        flags_ad(0x06),
        ad_structure(0x03, &[0xAA, 0xFE]),
        eddystone_url_ad(-18, 0x02, b"goo.gl/abc\x00"),
    ]);
    let BeaconPayload::Eddystone(Eddystone::Url(url)) = record.payload else {
        panic!("expected Eddystone URL");
    };
    assert_eq!(url.url, "http://goo.gl/abc.com/");
    assert_eq!(url.ref_rssi, -59);
}

#[test]
fn eddystone_url_every_scheme() {
    let urls: Vec<_> = (0..4)
        .map(|scheme| {
            let record = decode_one(&[eddystone_url_ad(0, scheme, b"x\x07")]);
            let BeaconPayload::Eddystone(Eddystone::Url(url)) = record.payload else {
                panic!("expected Eddystone URL");
            };
            url.url
        })
        .collect();
    assert_eq!(
        urls,
        vec!["http://www.x.com", "https://www.x.com", "http://x.com", "https://x.com"]
    );
}

#[test]
fn eddystone_tlm_version_zero() {
    let record = decode_one(&[eddystone_tlm_ad(0, 3100, 0x1400, 42, 36_000)]);
    assert_eq!(record.kind(), BeaconKind::EddystoneTlm);
    let BeaconPayload::Eddystone(Eddystone::Tlm(tlm)) = record.payload else {
        panic!("expected Eddystone TLM");
    };
    assert_eq!(tlm.version, 0);
    assert_eq!(
        tlm.telemetry,
        Some(TlmTelemetry {
            battery_v: 3.1,
            temperature_c: 20.0,
            adv_count: 42,
            uptime_s: 3600.0,
        })
    );
}

#[test]
fn eddystone_tlm_other_version_has_no_telemetry() {
    let record = decode_one(&[eddystone_tlm_ad(1, 3100, 0x1400, 42, 36_000)]);
    let BeaconPayload::Eddystone(Eddystone::Tlm(tlm)) = record.payload else {
        panic!("expected Eddystone TLM");
    };
    assert_eq!(tlm.version, 1);
    assert_eq!(tlm.telemetry, None);
}

#[test]
fn one_event_every_kind() {
    let reports: Vec<_> = [
        ibeacon_ad(CAPTURED_UUID, 1, 2, -60),
        altbeacon_ad(0x0118, [0x11; 20], -60, 0),
        eddystone_uid_ad(-20, [0x22; 10], [0x33; 6], true),
        eddystone_url_ad(-20, 0x03, b"example\x01"),
        eddystone_tlm_ad(0, 2900, -256, 7, 10),
    ]
    .iter()
    .map(|ad| simple_report(ad, -75))
    .collect();
    let kinds: Vec<_> = decode_beacons(&event(&reports))
        .iter()
        .map(BeaconRecord::kind)
        .collect();
    assert_eq!(kinds, BeaconKind::ALL.to_vec());
}

#[test]
fn other_advertising_event_types_are_accepted() {
    let data = ibeacon_ad(CAPTURED_UUID, 1, 2, -60);
    for (raw, expected) in [
        (0x00, AdvEventType::ConnectableUndirected),
        (0x02, AdvEventType::ScannableUndirected),
        (0x04, AdvEventType::ScanResponse),
    ] {
        let beacons = decode_beacons(&event(&[report(raw, 0x01, TEST_ADDRESS, &data, -40)]));
        assert_eq!(beacons.len(), 1);
        assert_eq!(beacons[0].event_type, expected);
        assert_eq!(beacons[0].address_type, AddressType::Random);
    }
}

#[test]
fn decoder_instance_matches_free_function() {
    let bytes = hex_bytes(IBEACON_AND_ALTBEACON);
    assert_eq!(BeaconDecoder::new().decode(&bytes), decode_beacons(&bytes));
}
