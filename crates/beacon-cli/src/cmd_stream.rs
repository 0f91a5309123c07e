/// Implementation of `beacon stream`.
///
/// Feeds a binary H4 capture through [`StreamingDecoder`], printing each
/// batch of beacons as soon as its event has been read. Runs on a
/// current-thread tokio runtime; there is nothing to parallelize.
use std::path::Path;

use anyhow::{Context, Result};
use beacon_decoder::{BeaconDecoder, StreamingDecoder};
use tokio::io::{AsyncRead, BufReader};
use tracing::info;

use crate::StreamArgs;
use crate::render::Renderer;

/// Run the `beacon stream` command.
///
/// # Errors
///
/// Returns an error if the capture cannot be opened, the stream is
/// truncated or carries an unknown packet indicator, or stdout cannot be
/// written. Beacons printed before the failure stay printed.
pub fn run(args: &StreamArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    runtime.block_on(run_async(args))
}

async fn run_async(args: &StreamArgs) -> Result<()> {
    let decoder = BeaconDecoder::with_config(args.options.recognizers.decoder_config());
    let renderer = Renderer::from_options(&args.options);

    match &args.file {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("cannot open {}", path.display()))?;
            pump(BufReader::new(file), decoder, &renderer, Some(path)).await
        }
        None => pump(BufReader::new(tokio::io::stdin()), decoder, &renderer, None).await,
    }
}

async fn pump(
    reader: impl AsyncRead + Unpin,
    decoder: BeaconDecoder,
    renderer: &Renderer,
    path: Option<&Path>,
) -> Result<()> {
    let name = path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    let mut stream = StreamingDecoder::with_decoder(reader, decoder);

    while let Some(batch) = stream.next().await {
        let beacons = batch.with_context(|| format!("failed to decode {name}"))?;
        renderer.print_all(&beacons)?;
    }

    let stats = stream.stats();
    info!(
        packets = stats.packets,
        events = stats.events,
        beacons = stats.beacons,
        "stream finished"
    );
    Ok(())
}
