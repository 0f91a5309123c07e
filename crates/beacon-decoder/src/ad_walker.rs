use beacon_types::BeaconPayload;
use beacon_wire::AdStructure;
use beacon_wire::ad_structure::{ad_type, consumed_len};
use tracing::trace;

use crate::config::Recognizer;

/// Smallest slice worth offering to a recognizer: a length byte plus a
/// type byte.
const MIN_STRUCTURE: usize = 2;

/// One step of an [`AdWalker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdCursor<'a> {
    /// Offset of the length byte within the report's data.
    pub offset: usize,
    /// Everything from the length byte to the end of the report's data.
    /// May be shorter than `consumed` when the last structure is truncated.
    pub rest: &'a [u8],
    /// `rest[0] + 1`.
    pub consumed: usize,
}

impl<'a> AdCursor<'a> {
    /// Frame this step as an [`AdStructure`], if it is complete and has a
    /// type byte.
    #[must_use]
    pub fn structure(&self) -> Option<AdStructure<'a>> {
        AdStructure::read_from(self.rest).map(|(ad, _)| ad)
    }
}

/// Cursor over the AD structures in one report's advertising data.
///
/// Steps by each structure's self-described length and stops once fewer
/// than two bytes remain. The walk never leaves `data`: a length byte
/// pointing past the end simply ends it.
///
/// ```text
///   data: [len₀ type₀ ...][len₁ type₁ ...][len₂ ...]
///          ^ offset 0      ^ len₀ + 1      ^ len₀ + len₁ + 2
/// ```
pub struct AdWalker<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> AdWalker<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for AdWalker<'a> {
    type Item = AdCursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.data.get(self.pos..)?;
        if rest.len() < MIN_STRUCTURE {
            return None;
        }
        let consumed = consumed_len(rest)?;
        let offset = self.pos;
        self.pos += consumed;
        Some(AdCursor {
            offset,
            rest,
            consumed,
        })
    }
}

/// Offer every AD structure in `data` to `recognizers`, in order, and
/// return the first beacon found.
///
/// A structure nobody recognizes is skipped. Only one beacon is taken
/// per report; structures after the first match are not examined.
#[must_use]
pub fn find_beacon(data: &[u8], recognizers: &[Recognizer]) -> Option<BeaconPayload> {
    for cursor in AdWalker::new(data) {
        if let Some((recognizer, payload)) = recognize_at(&cursor, recognizers) {
            trace!(
                offset = cursor.offset,
                recognizer = recognizer.name(),
                kind = %payload.kind(),
                "recognized beacon"
            );
            return Some(payload);
        }
        trace!(
            offset = cursor.offset,
            len = cursor.consumed,
            ad_type = cursor.rest.get(1).map_or("?", |&t| ad_type::name(t)),
            "skipping AD structure"
        );
    }
    None
}

/// Try each recognizer on a single structure. Returns the one that
/// matched along with its payload.
#[must_use]
pub fn recognize_at(
    cursor: &AdCursor<'_>,
    recognizers: &[Recognizer],
) -> Option<(Recognizer, BeaconPayload)> {
    recognizers.iter().find_map(|&recognizer| {
        let (consumed, payload) = recognizer.recognize(cursor.rest);
        debug_assert_eq!(consumed, cursor.consumed, "{recognizer} disagrees on length");
        payload.map(|payload| (recognizer, payload))
    })
}
