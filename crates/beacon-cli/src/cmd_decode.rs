/// Implementation of `beacon decode`.
///
/// Each input event is decoded independently. Events that are not LE
/// advertising reports are skipped with a debug log; they are normal in a
/// raw capture and do not fail the command.
use anyhow::Result;
use beacon_decoder::BeaconDecoder;
use tracing::{debug, info};

use crate::DecodeArgs;
use crate::input::read_events;
use crate::render::Renderer;

/// Run the `beacon decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, an event is not valid
/// hex, or stdout cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let events = read_events(&args.source)?;
    let decoder = BeaconDecoder::with_config(args.options.recognizers.decoder_config());
    let renderer = Renderer::from_options(&args.options);

    let mut printed = 0;
    for event in &events {
        let beacons = match decoder.try_decode(&event.bytes) {
            Ok(decoded) => {
                if let Some(reason) = &decoded.aborted {
                    debug!(origin = %event.origin, error = %reason, "event cut short");
                }
                decoded.beacons
            }
            Err(err) => {
                debug!(origin = %event.origin, error = %err, "skipped");
                continue;
            }
        };
        printed += renderer.print_all(&beacons)?;
    }

    info!(events = events.len(), printed, "decode finished");
    Ok(())
}
