/// Errors raised by the typed layer.
///
/// Recognizers never fail: a structure that does not match a format is
/// simply not that format. The only fallible operation here is turning
/// user input into a [`BeaconKind`](crate::BeaconKind).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("unknown beacon kind: {name}")]
    UnknownBeaconKind { name: String },
}
