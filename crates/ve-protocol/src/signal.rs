//! Signal identifier space: full vs. partial signals, and the protocol tag
//! every signal id is classified under.
//!
//! A single 32-bit integer space is shared by full signals and *partial*
//! signals (paths inside a complex parent signal), disambiguated by the
//! high bit. See [`is_partial`].

use serde::{Deserialize, Serialize};

/// A decoder-manifest signal id.
pub type SignalId = u32;

/// Compact numeric alias for a CAN interface name.
pub type ChannelId = u32;

/// High bit of [`SignalId`] reserved to tag partial signals.
pub const INTERNAL_SIGNAL_ID_BITMASK: SignalId = 1 << 31;

/// Sentinel signal id used when a reference could not be resolved.
pub const INVALID_SIGNAL_ID: SignalId = SignalId::MAX;

/// Sentinel channel id used when an interface name is unknown to the
/// translator.
pub const INVALID_CHANNEL: ChannelId = ChannelId::MAX;

/// Bits per byte; used throughout PID bit-position arithmetic.
pub const BYTE_SIZE: u32 = 8;

/// Generous upper bound on the number of types visited while expanding a
/// complex signal's type graph. Tune per deployment; exhaustion is logged,
/// not treated as an error — the partial graph collected so far is kept.
pub const MAX_COMPLEX_TYPES: usize = 256;

/// True if `id` denotes a partial signal (high bit set).
pub const fn is_partial(id: SignalId) -> bool {
    id & INTERNAL_SIGNAL_ID_BITMASK != 0
}

/// An ordered path into a complex signal: struct-member or array-element
/// indices, outermost first. The empty path addresses the whole signal.
///
/// Ordering is lexicographic over the index sequence, which is exactly the
/// order `signal_paths` must be kept sorted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignalPath(pub Vec<u32>);

impl SignalPath {
    /// The empty path, addressing the whole signal.
    pub fn whole() -> Self {
        Self(Vec::new())
    }

    pub fn is_whole(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for SignalPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

/// Transport classification of a signal id, as reported by the decoder
/// manifest. Unrecognized/future tags are represented as `Invalid` by the
/// manifest implementation, never surfaced as a new variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolTag {
    CanRaw,
    Obd,
    ComplexData,
    Invalid,
}
