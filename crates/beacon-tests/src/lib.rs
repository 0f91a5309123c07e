//! Shared fixtures for the integration suites and benches.
//!
//! Two kinds of fixture live here:
//!
//! - **Captured events**: hex dumps of real controller output, kept as
//!   text so they read the same as a btmon/hcidump trace.
//! - **Builders**: functions that assemble AD structures, reports, events
//!   and H4 packets from field values, computing every length byte so a
//!   test only states what it cares about.
//!
//! Builders panic on inputs that cannot be encoded (for example an event
//! longer than 255 parameter bytes); they are for tests only.

/// One iBeacon report (with a flags structure) from address
/// `0C:F3:EE:00:F8:EC`.
pub const SINGLE_IBEACON: &str = "
    04 3E 2A 02 01 03 00 EC F8 00 EE F3 0C 1E 02 01
    04 1A FF 4C 00 02 15 8D EE FB B9 F7 38 42 97 80
    40 96 66 8B B4 42 81 13 88 0F 4E C1 BB";

/// Two iBeacon reports; the second has no flags structure and comes from
/// `0D:F3:EE:00:F8:EC`.
pub const TWO_IBEACONS: &str = "
    04 3E 4F 02 02
    03 00 EC F8 00 EE F3 0C 1E 02 01
    04 1A FF 4C 00 02 15 8D EE FB B9 F7 38 42 97 80
    40 96 66 8B B4 42 81 13 88 0F 4E C1 BB
    03 00 EC F8 00 EE F3 0D 1B
    1A FF 4C 00 02 15 8D EE FB B9 F7 38 42 97 80
    40 96 66 8B B4 42 81 13 88 0F 4F C1 B0";

/// One iBeacon report followed by one AltBeacon report.
pub const IBEACON_AND_ALTBEACON: &str = "
    04 3E 50 02 02
    03 00 EC F8 00 EE F3 0C 1E 02 01
    04 1A FF 4C 00 02 15 8D EE FB B9 F7 38 42 97 80
    40 96 66 8B B4 42 81 13 88 0F 4E C1 BB
    03 00 EC F8 00 EE F3 0D 1C
    1B FF 44 01 BE AC 8D EE FB B9 F7 38 42 97 80
    40 96 66 8B B4 42 81 13 88 0F 4F C1 55
    B1";

/// Proximity UUID / beacon id prefix shared by the captured events.
pub const CAPTURED_UUID: [u8; 16] = [
    0x8D, 0xEE, 0xFB, 0xB9, 0xF7, 0x38, 0x42, 0x97, 0x80, 0x40, 0x96, 0x66, 0x8B, 0xB4, 0x42,
    0x81,
];

/// Wire-order address used by builder defaults.
pub const TEST_ADDRESS: [u8; 6] = [0x66, 0x55, 0x44, 0x33, 0x22, 0x11];

/// Event type for non-connectable undirected advertising.
pub const ADV_NONCONN_IND: u8 = 0x03;

/// Decode a hex fixture, ignoring whitespace.
///
/// # Panics
///
/// Panics if `text` is not valid hex.
#[must_use]
pub fn hex_bytes(text: &str) -> Vec<u8> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).unwrap_or_else(|e| panic!("bad hex fixture {text:?}: {e}"))
}

fn raw_i8(value: i8) -> u8 {
    u8::from_ne_bytes(value.to_ne_bytes())
}

fn length_byte(len: usize) -> u8 {
    u8::try_from(len).unwrap_or_else(|_| panic!("{len} bytes do not fit a length byte"))
}

/// Frame `payload` as an AD structure of type `ad_type`.
#[must_use]
pub fn ad_structure(ad_type: u8, payload: &[u8]) -> Vec<u8> {
    let mut ad = vec![length_byte(payload.len() + 1), ad_type];
    ad.extend_from_slice(payload);
    ad
}

#[must_use]
pub fn flags_ad(flags: u8) -> Vec<u8> {
    ad_structure(0x01, &[flags])
}

#[must_use]
pub fn ibeacon_ad(uuid: [u8; 16], major: u16, minor: u16, ref_rssi: i8) -> Vec<u8> {
    let mut payload = vec![0x4C, 0x00, 0x02, 0x15];
    payload.extend_from_slice(&uuid);
    payload.extend_from_slice(&major.to_be_bytes());
    payload.extend_from_slice(&minor.to_be_bytes());
    payload.push(raw_i8(ref_rssi));
    ad_structure(0xFF, &payload)
}

#[must_use]
pub fn altbeacon_ad(mfg_id: u16, beacon_id: [u8; 20], ref_rssi: i8, reserved: u8) -> Vec<u8> {
    let mut payload = mfg_id.to_le_bytes().to_vec();
    payload.extend_from_slice(&0xACBE_u16.to_le_bytes());
    payload.extend_from_slice(&beacon_id);
    payload.push(raw_i8(ref_rssi));
    payload.push(reserved);
    ad_structure(0xFF, &payload)
}

fn eddystone_ad(frame_type: u8, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![0xAA, 0xFE, frame_type];
    payload.extend_from_slice(body);
    ad_structure(0x16, &payload)
}

/// Eddystone UID frame. `reserved` appends the two trailing RFU bytes.
#[must_use]
pub fn eddystone_uid_ad(
    tx_power: i8,
    namespace: [u8; 10],
    instance: [u8; 6],
    reserved: bool,
) -> Vec<u8> {
    let mut body = vec![raw_i8(tx_power)];
    body.extend_from_slice(&namespace);
    body.extend_from_slice(&instance);
    if reserved {
        body.extend_from_slice(&[0x00, 0x00]);
    }
    eddystone_ad(0x00, &body)
}

#[must_use]
pub fn eddystone_url_ad(tx_power: i8, scheme: u8, encoded: &[u8]) -> Vec<u8> {
    let mut body = vec![raw_i8(tx_power), scheme];
    body.extend_from_slice(encoded);
    eddystone_ad(0x10, &body)
}

#[must_use]
pub fn eddystone_tlm_ad(
    version: u8,
    battery_mv: u16,
    temperature_raw: i16,
    adv_count: u32,
    sec_count: u32,
) -> Vec<u8> {
    let mut body = vec![version];
    body.extend_from_slice(&battery_mv.to_be_bytes());
    body.extend_from_slice(&temperature_raw.to_be_bytes());
    body.extend_from_slice(&adv_count.to_be_bytes());
    body.extend_from_slice(&sec_count.to_be_bytes());
    eddystone_ad(0x20, &body)
}

/// Concatenate AD structures into one report's advertising data.
#[must_use]
pub fn ad_data(structures: &[Vec<u8>]) -> Vec<u8> {
    structures.concat()
}

/// One advertising report: header, data, RSSI.
#[must_use]
pub fn report(
    event_type: u8,
    address_type: u8,
    address: [u8; 6],
    data: &[u8],
    rssi: i8,
) -> Vec<u8> {
    let mut buf = vec![event_type, address_type];
    buf.extend_from_slice(&address);
    buf.push(length_byte(data.len()));
    buf.extend_from_slice(data);
    buf.push(raw_i8(rssi));
    buf
}

/// Non-connectable report from [`TEST_ADDRESS`] with public addressing.
#[must_use]
pub fn simple_report(data: &[u8], rssi: i8) -> Vec<u8> {
    report(ADV_NONCONN_IND, 0x00, TEST_ADDRESS, data, rssi)
}

/// Wrap reports in an LE Advertising Report event, H4 indicator included.
#[must_use]
pub fn event(reports: &[Vec<u8>]) -> Vec<u8> {
    let body = reports.concat();
    let mut buf = vec![
        0x04,
        0x3E,
        length_byte(body.len() + 2),
        0x02,
        length_byte(reports.len()),
    ];
    buf.extend_from_slice(&body);
    buf
}

/// H4 command packet.
#[must_use]
pub fn h4_command(opcode: u16, params: &[u8]) -> Vec<u8> {
    let mut buf = vec![0x01];
    buf.extend_from_slice(&opcode.to_le_bytes());
    buf.push(length_byte(params.len()));
    buf.extend_from_slice(params);
    buf
}

/// H4 ACL data packet.
///
/// # Panics
///
/// Panics if `data` is longer than 65535 bytes.
#[must_use]
pub fn h4_acl(handle: u16, data: &[u8]) -> Vec<u8> {
    let len = u16::try_from(data.len()).unwrap_or_else(|_| panic!("ACL payload too long"));
    let mut buf = vec![0x02];
    buf.extend_from_slice(&handle.to_le_bytes());
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(data);
    buf
}

/// H4 event packet with an arbitrary event code.
#[must_use]
pub fn h4_event(event_code: u8, params: &[u8]) -> Vec<u8> {
    let mut buf = vec![0x04, event_code, length_byte(params.len())];
    buf.extend_from_slice(params);
    buf
}
