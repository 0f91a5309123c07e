#![warn(clippy::pedantic)]

pub mod ad_walker;
pub mod config;
pub mod decoder;
pub mod error;
pub mod report_parser;
pub mod streaming;

pub use ad_walker::{AdCursor, AdWalker, find_beacon, recognize_at};
pub use config::{DecoderConfig, Recognizer};
pub use decoder::{BeaconDecoder, DecodedEvent, decode_beacons};
pub use error::DecodeError;
pub use report_parser::{ParsedReport, parse_report};
pub use streaming::{PacketIndicator, StreamStats, StreamingDecoder};
