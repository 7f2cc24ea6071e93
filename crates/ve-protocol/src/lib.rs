//! Shared domain types for decoder manifests and collection schemes.
//!
//! This crate defines the join point's two input data models —
//! [`scheme::Scheme`] (collection intent) and [`manifest::DecoderManifest`]
//! (wire format) — plus the signal identifier space ([`signal`]) both share.
//! It does not itself extract or decode anything; see `ve-dictionary` for
//! the extraction core that consumes these types.

pub mod error;
pub mod manifest;
pub mod scheme;
pub mod signal;

pub use error::{ManifestError, ManifestResult};
pub use manifest::{
    CanMessageEntry, CanMessageFormat, CanSignalFormat, ComplexDataType, ComplexTypeEntry,
    DecoderManifest, ManifestData, PidDecoderFormat, SignalManifestEntry, StaticDecoderManifest,
    StaticDecoderManifestBuilder,
};
pub use scheme::{PartialSignalEntry, RawCanFrameInfo, Scheme, SignalInfo};
pub use signal::{
    BYTE_SIZE, ChannelId, INTERNAL_SIGNAL_ID_BITMASK, INVALID_CHANNEL, INVALID_SIGNAL_ID,
    MAX_COMPLEX_TYPES, ProtocolTag, SignalId, SignalPath, is_partial,
};
