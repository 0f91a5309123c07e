/// Beacon command-line tool: decode BLE beacons from captured HCI
/// LE Advertising Report events.
///
/// # Command overview
///
/// ```text
/// beacon <COMMAND> [OPTIONS]
///
/// Commands:
///   decode     Decode hex-encoded events into beacon records
///   inspect    Print every layer of each event: envelope, reports, AD structures
///   stream     Decode beacons from a binary H4 capture (file or stdin)
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder diagnostics at debug level
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                          |
/// |------|--------------------------------------------------|
/// | 0    | Success, including "no beacons found"            |
/// | 1    | Error (unreadable input, bad hex, broken stream) |
///
/// Records go to stdout; logs and errors go to stderr.
use std::path::PathBuf;
use std::process;

use beacon_decoder::{DecoderConfig, Recognizer};
use beacon_types::BeaconKind;
use clap::{Parser, Subcommand};

mod cmd_decode;
mod cmd_inspect;
mod cmd_stream;
mod input;
mod logging;
mod render;

use render::OutputFormat;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decode iBeacon, AltBeacon and Eddystone frames from HCI advertising
/// report events.
#[derive(Parser)]
#[command(name = "beacon", version, about = "BLE beacon decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder diagnostics at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode hex-encoded events into beacon records.
    Decode(DecodeArgs),
    /// Print every layer of each event for debugging captures.
    Inspect(InspectArgs),
    /// Decode beacons from a binary H4 packet capture.
    Stream(StreamArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Options shared by every command that emits beacon records.
///
/// ```text
/// ┌───────────────┬──────────────────────────────────────────────────────┐
/// │ Flag          │ Values / default                                     │
/// ├───────────────┼──────────────────────────────────────────────────────┤
/// │ --output      │ text (default) | json (one object per line)          │
/// │ --include     │ comma-separated kinds: ibeacon, altbeacon,           │
/// │               │ eddystone-uid, eddystone-url, eddystone-tlm          │
/// │ --recognizers │ comma-separated priority order (default              │
/// │               │ ibeacon,altbeacon,eddystone)                         │
/// └───────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct RecordOptions {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Only print beacons of these kinds.
    #[arg(long, value_delimiter = ',')]
    pub include: Option<Vec<BeaconKind>>,

    #[command(flatten)]
    pub recognizers: RecognizerOptions,
}

#[derive(clap::Args)]
pub struct RecognizerOptions {
    /// Recognizers to try on each AD structure, in priority order.
    #[arg(long, value_delimiter = ',')]
    pub recognizers: Option<Vec<Recognizer>>,
}

impl RecognizerOptions {
    pub fn decoder_config(&self) -> DecoderConfig {
        match &self.recognizers {
            Some(recognizers) => DecoderConfig {
                recognizers: recognizers.clone(),
            },
            None => DecoderConfig::default(),
        }
    }
}

/// Where hex-encoded events come from.
///
/// Each event is one line of hex; whitespace inside a line is ignored, as
/// are blank lines and lines starting with `#`. With neither `EVENT`
/// arguments nor `--file`, events are read from stdin.
#[derive(clap::Args)]
pub struct EventSource {
    /// Hex-encoded events, e.g. `043e2a0201...`.
    pub events: Vec<String>,

    /// Read events from this file, one per line.
    #[arg(short, long, conflicts_with = "events")]
    pub file: Option<PathBuf>,
}

/// Arguments for `beacon decode`.
#[derive(clap::Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub source: EventSource,

    #[command(flatten)]
    pub options: RecordOptions,
}

/// Arguments for `beacon inspect`.
///
/// Decodes each event layer by layer and prints what every layer
/// contained, including AD structures no recognizer claimed and the
/// reason an event or report was rejected.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: EventSource,

    #[command(flatten)]
    pub recognizers: RecognizerOptions,
}

/// Arguments for `beacon stream`.
///
/// The input is raw H4 framing: each packet starts with its indicator
/// byte (0x01 command, 0x02 ACL, 0x03 SCO, 0x04 event, 0x05 ISO). Only
/// event packets are decoded; the rest are skipped.
#[derive(clap::Args)]
pub struct StreamArgs {
    /// Capture file. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub options: RecordOptions,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Stream(args) => cmd_stream::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
