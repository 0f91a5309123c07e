//! Rendering beacon records for stdout.
//!
//! ```text
//! ┌──────┬──────────────────────────────────────────────────────────────┐
//! │ Mode │ One line per beacon                                          │
//! ├──────┼──────────────────────────────────────────────────────────────┤
//! │ text │ 0C:F3:EE:00:F8:EC ibeacon rssi=-69 uuid=... major=5000 ...   │
//! │ json │ {"event_type":"non_connectable","address_type":"public",...} │
//! └──────┴──────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, Write};

use anyhow::Result;
use beacon_types::{BeaconKind, BeaconPayload, BeaconRecord, Eddystone};
use clap::ValueEnum;

use crate::RecordOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Applies the `--include` filter and writes records in the chosen format.
pub struct Renderer {
    format: OutputFormat,
    include: Option<Vec<BeaconKind>>,
}

impl Renderer {
    pub fn new(format: OutputFormat, include: Option<Vec<BeaconKind>>) -> Self {
        Self { format, include }
    }

    pub fn from_options(options: &RecordOptions) -> Self {
        Self::new(options.output, options.include.clone())
    }

    pub fn wants(&self, record: &BeaconRecord) -> bool {
        self.include
            .as_ref()
            .is_none_or(|kinds| kinds.contains(&record.kind()))
    }

    /// Write `record` as one line unless the filter excludes it. Returns
    /// whether a line was written.
    ///
    /// # Errors
    ///
    /// Fails if writing to `out` fails.
    pub fn write(&self, out: &mut impl Write, record: &BeaconRecord) -> Result<bool> {
        if !self.wants(record) {
            return Ok(false);
        }
        let line = match self.format {
            OutputFormat::Text => text_line(record),
            OutputFormat::Json => serde_json::to_string(record)?,
        };
        writeln!(out, "{line}")?;
        Ok(true)
    }

    /// Write a batch to stdout.
    ///
    /// # Errors
    ///
    /// Fails if stdout is closed or cannot be written.
    pub fn print_all<'a>(
        &self,
        records: impl IntoIterator<Item = &'a BeaconRecord>,
    ) -> Result<usize> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let mut written = 0;
        for record in records {
            if self.write(&mut out, record)? {
                written += 1;
            }
        }
        out.flush()?;
        Ok(written)
    }
}

/// Human-readable single line for `record`.
pub fn text_line(record: &BeaconRecord) -> String {
    format!(
        "{} {} rssi={} {}",
        record.address,
        record.kind(),
        record.rssi,
        payload_fields(&record.payload)
    )
}

/// `key=value` fields for one payload, space separated.
fn payload_fields(payload: &BeaconPayload) -> String {
    match payload {
        BeaconPayload::IBeacon(b) => format!(
            "uuid={} major={} minor={} ref_rssi={}",
            b.uuid, b.major, b.minor, b.ref_rssi
        ),
        BeaconPayload::AltBeacon(b) => format!(
            "mfg=0x{:04X} id={} ref_rssi={} reserved=0x{:02X}",
            b.mfg_id,
            b.beacon_id_hex(),
            b.ref_rssi,
            b.mfg_reserved
        ),
        BeaconPayload::Eddystone(Eddystone::Uid(uid)) => format!(
            "namespace={} instance={} ref_rssi={}",
            uid.namespace_hex(),
            uid.instance_hex(),
            uid.ref_rssi
        ),
        BeaconPayload::Eddystone(Eddystone::Url(url)) => {
            format!("url={} ref_rssi={}", url.url, url.ref_rssi)
        }
        BeaconPayload::Eddystone(Eddystone::Tlm(tlm)) => match &tlm.telemetry {
            Some(t) => format!(
                "version={} battery_v={:.3} temperature_c={:.2} adv_count={} uptime_s={:.1}",
                tlm.version, t.battery_v, t.temperature_c, t.adv_count, t.uptime_s
            ),
            None => format!("version={}", tlm.version),
        },
    }
}

#[cfg(test)]
mod tests {
    use beacon_types::{
        AltBeacon, EddystoneTlm, EddystoneUid, EddystoneUrl, IBeacon, TlmTelemetry,
    };
    use beacon_wire::{AddressType, AdvEventType, DeviceAddress};

    use super::*;

    fn record(payload: BeaconPayload) -> BeaconRecord {
        BeaconRecord {
            event_type: AdvEventType::NonConnectable,
            address_type: AddressType::Public,
            address: DeviceAddress::from_display_octets([0x0C, 0xF3, 0xEE, 0x00, 0xF8, 0xEC]),
            rssi: -69,
            payload,
        }
    }

    fn ibeacon() -> BeaconRecord {
        record(BeaconPayload::IBeacon(IBeacon {
            uuid: "8deefbb9-f738-4297-8040-96668bb44281".parse().unwrap(),
            major: 5000,
            minor: 3918,
            ref_rssi: -63,
        }))
    }

    fn tlm(telemetry: Option<TlmTelemetry>) -> BeaconRecord {
        record(BeaconPayload::Eddystone(Eddystone::Tlm(EddystoneTlm {
            version: u8::from(telemetry.is_none()),
            telemetry,
        })))
    }

    #[test]
    fn text_ibeacon() {
        insta::assert_snapshot!(
            text_line(&ibeacon()),
            @"0C:F3:EE:00:F8:EC ibeacon rssi=-69 uuid=8deefbb9-f738-4297-8040-96668bb44281 major=5000 minor=3918 ref_rssi=-63"
        );
    }

    #[test]
    fn text_altbeacon() {
        let mut beacon_id = [0u8; 20];
        beacon_id[0] = 0xAB;
        beacon_id[19] = 0x01;
        let line = text_line(&record(BeaconPayload::AltBeacon(AltBeacon {
            mfg_id: 0x0118,
            beacon_id,
            ref_rssi: -59,
            mfg_reserved: 0x00,
        })));
        insta::assert_snapshot!(
            line,
            @"0C:F3:EE:00:F8:EC altbeacon rssi=-69 mfg=0x0118 id=ab00000000000000000000000000000000000001 ref_rssi=-59 reserved=0x00"
        );
    }

    #[test]
    fn text_eddystone_frames() {
        let uid = record(BeaconPayload::Eddystone(Eddystone::Uid(EddystoneUid {
            ref_rssi: -59,
            namespace: [0xED, 0xD1, 0xEB, 0xEA, 0xC0, 0x4E, 0x5D, 0xEF, 0xA0, 0x17],
            instance: [0x0B, 0xDB, 0x87, 0x53, 0x98, 0x03],
        })));
        let url = record(BeaconPayload::Eddystone(Eddystone::Url(EddystoneUrl {
            ref_rssi: -62,
            url: "http://example.com/".into(),
        })));
        insta::assert_snapshot!(
            text_line(&uid),
            @"0C:F3:EE:00:F8:EC eddystone-uid rssi=-69 namespace=edd1ebeac04e5defa017 instance=0bdb87539803 ref_rssi=-59"
        );
        insta::assert_snapshot!(
            text_line(&url),
            @"0C:F3:EE:00:F8:EC eddystone-url rssi=-69 url=http://example.com/ ref_rssi=-62"
        );
    }

    #[test]
    fn text_tlm_with_and_without_telemetry() {
        let v0 = tlm(Some(TlmTelemetry {
            battery_v: 3.1,
            temperature_c: 20.0,
            adv_count: 256,
            uptime_s: 1234.5,
        }));
        insta::assert_snapshot!(
            text_line(&v0),
            @"0C:F3:EE:00:F8:EC eddystone-tlm rssi=-69 version=0 battery_v=3.100 temperature_c=20.00 adv_count=256 uptime_s=1234.5"
        );
        insta::assert_snapshot!(
            text_line(&tlm(None)),
            @"0C:F3:EE:00:F8:EC eddystone-tlm rssi=-69 version=1"
        );
    }

    #[test]
    fn text_fields_are_single_spaced() {
        for line in [text_line(&ibeacon()), text_line(&tlm(None))] {
            assert!(!line.contains("  "), "{line}");
            assert_eq!(line.trim(), line);
            assert!(line.split(' ').skip(2).all(|field| field.contains('=')), "{line}");
        }
    }

    #[test]
    fn json_line() {
        let renderer = Renderer::new(OutputFormat::Json, None);
        let mut out = Vec::new();
        assert!(renderer.write(&mut out, &ibeacon()).unwrap());
        insta::assert_snapshot!(
            String::from_utf8(out).unwrap().trim_end(),
            @r#"{"event_type":"non_connectable","address_type":"public","address":"0C:F3:EE:00:F8:EC","rssi":-69,"payload":{"format":"ibeacon","uuid":"8deefbb9-f738-4297-8040-96668bb44281","major":5000,"minor":3918,"ref_rssi":-63}}"#
        );
    }

    #[test]
    fn include_filter() {
        let renderer = Renderer::new(OutputFormat::Text, Some(vec![BeaconKind::EddystoneTlm]));
        let mut out = Vec::new();
        assert!(!renderer.write(&mut out, &ibeacon()).unwrap());
        assert!(renderer.write(&mut out, &tlm(None)).unwrap());
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
