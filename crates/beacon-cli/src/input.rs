//! Reading hex-encoded events for `decode` and `inspect`.

use std::fs;
use std::io::{self, Read as _};

use anyhow::{Context, Result};

use crate::EventSource;

/// One event as read from the input, with where it came from.
pub struct HexEvent {
    /// `arg N` or `line N`, for messages.
    pub origin: String,
    pub bytes: Vec<u8>,
}

/// Collect every event from `source`.
///
/// # Errors
///
/// Fails if the file or stdin cannot be read or any event is not valid
/// hex. The error names the offending argument or line.
pub fn read_events(source: &EventSource) -> Result<Vec<HexEvent>> {
    if !source.events.is_empty() {
        return source
            .events
            .iter()
            .enumerate()
            .map(|(idx, text)| -> Result<HexEvent> {
                let origin = format!("arg {}", idx + 1);
                let bytes = parse_hex(text).with_context(|| format!("{origin}: invalid hex"))?;
                Ok(HexEvent { origin, bytes })
            })
            .collect();
    }

    let text = match &source.file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            text
        }
    };
    parse_lines(&text)
}

/// Parse newline-separated hex events, skipping blanks and `#` comments.
///
/// # Errors
///
/// Fails on the first line that is not valid hex.
pub fn parse_lines(text: &str) -> Result<Vec<HexEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| -> Result<HexEvent> {
            let origin = format!("line {}", idx + 1);
            let bytes = parse_hex(line).with_context(|| format!("{origin}: invalid hex"))?;
            Ok(HexEvent { origin, bytes })
        })
        .collect()
}

/// Decode hex, ignoring any whitespace between digits.
fn parse_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(digits)
}
