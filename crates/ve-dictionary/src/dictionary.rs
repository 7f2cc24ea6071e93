//! The target data structures the extractor builds: CAN/OBD decoder
//! dictionaries and complex-data decoder dictionaries, with their
//! invariants enforced by construction rather than by convention.
//!
//! Protocol-polymorphic dictionaries are modeled as an exhaustive tagged
//! enum ([`DecoderDictionary`]) rather than a class hierarchy with
//! downcasts, which eliminates the downcast-failure error path entirely —
//! there's nothing to mismatch.

use std::collections::{BTreeMap, BTreeSet};

use ve_protocol::{CanMessageFormat, ChannelId, ComplexDataType, INVALID_SIGNAL_ID, SignalId, SignalPath};

/// The mode in which a CAN/OBD frame is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectType {
    /// Decoded signals only.
    Decode,
    /// Raw bytes only, no per-signal decoding.
    Raw,
    /// Both raw passthrough and per-signal decoding.
    RawAndDecode,
}

impl CollectType {
    /// Monotonic upgrade: RAW + a decode request, or DECODE + a raw
    /// request, becomes RAW_AND_DECODE. Already RAW_AND_DECODE is a no-op.
    /// Never downgrades.
    pub fn upgrade(self, requested: CollectType) -> CollectType {
        use CollectType::*;
        match (self, requested) {
            (RawAndDecode, _) => RawAndDecode,
            (a, b) if a == b => a,
            _ => RawAndDecode,
        }
    }
}

/// One CAN/OBD frame's capture mode and decoded layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CanMessageDecoderMethod {
    pub collect_type: CollectType,
    pub format: CanMessageFormat,
}

impl CanMessageDecoderMethod {
    pub fn raw() -> Self {
        Self {
            collect_type: CollectType::Raw,
            format: CanMessageFormat::default(),
        }
    }

    pub fn decode(format: CanMessageFormat) -> Self {
        Self {
            collect_type: CollectType::Decode,
            format,
        }
    }
}

/// Raw CAN frame id, or (for OBD) the PID occupying the same slot.
pub type FrameKey = u32;

/// CAN-style decoder dictionary, used for both RAW-SOCKET CAN and OBD
/// (OBD signals all share the synthetic channel id `0`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanDecoderDictionary {
    pub channels: BTreeMap<ChannelId, BTreeMap<FrameKey, CanMessageDecoderMethod>>,
    pub signal_ids_to_collect: BTreeSet<SignalId>,
}

impl CanDecoderDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Get or create the frame-level map for `channel`.
    pub fn channel_entry(
        &mut self,
        channel: ChannelId,
    ) -> &mut BTreeMap<FrameKey, CanMessageDecoderMethod> {
        self.channels.entry(channel).or_default()
    }
}

/// One complex signal's recorded paths and type-graph closure, keyed in the
/// dictionary by (interface_id, message_id).
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexDataMessageFormat {
    /// Parent full signal id; [`INVALID_SIGNAL_ID`] until first assigned.
    pub signal_id: SignalId,
    pub root_type_id: u32,
    /// Transitive closure of types reachable from `root_type_id`, bounded
    /// by `MAX_COMPLEX_TYPES`. Never shrinks once populated.
    pub complex_type_map: BTreeMap<u32, ComplexDataType>,
    /// Set once any scheme asks for the whole signal (empty path).
    pub collect_raw: bool,
    /// Sorted ascending by (path, partial_signal_id).
    pub signal_paths: Vec<(SignalPath, SignalId)>,
}

impl Default for ComplexDataMessageFormat {
    fn default() -> Self {
        Self {
            signal_id: INVALID_SIGNAL_ID,
            root_type_id: 0,
            complex_type_map: BTreeMap::new(),
            collect_raw: false,
            signal_paths: Vec::new(),
        }
    }
}

impl ComplexDataMessageFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first_reference(&self) -> bool {
        self.signal_id == INVALID_SIGNAL_ID
    }

    /// Insert `(path, partial_signal_id)` into `signal_paths` at its sorted
    /// position. Duplicates are permitted (not deduplicated) but should be
    /// avoided at call sites, per the type's documented invariant.
    pub fn insert_path(&mut self, path: SignalPath, partial_signal_id: SignalId) {
        let key = (path, partial_signal_id);
        let idx = self.signal_paths.partition_point(|existing| *existing < key);
        self.signal_paths.insert(idx, key);
    }
}

/// Complex-data decoder dictionary, keyed first by interface id, then by
/// message id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexDataDecoderDictionary {
    pub interfaces: BTreeMap<String, BTreeMap<String, ComplexDataMessageFormat>>,
}

impl ComplexDataDecoderDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Get or create the entry for (interface_id, message_id).
    pub fn entry_mut(
        &mut self,
        interface_id: &str,
        message_id: &str,
    ) -> &mut ComplexDataMessageFormat {
        self.interfaces
            .entry(interface_id.to_string())
            .or_default()
            .entry(message_id.to_string())
            .or_default()
    }
}

/// A single protocol's decoder dictionary. Modeled as an exhaustive tagged
/// variant rather than a trait object + downcast.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderDictionary {
    Can(CanDecoderDictionary),
    ComplexData(ComplexDataDecoderDictionary),
}

impl DecoderDictionary {
    pub fn is_empty(&self) -> bool {
        match self {
            DecoderDictionary::Can(d) => d.is_empty(),
            DecoderDictionary::ComplexData(d) => d.is_empty(),
        }
    }

    pub fn as_can(&self) -> Option<&CanDecoderDictionary> {
        match self {
            DecoderDictionary::Can(d) => Some(d),
            DecoderDictionary::ComplexData(_) => None,
        }
    }

    pub fn as_can_mut(&mut self) -> Option<&mut CanDecoderDictionary> {
        match self {
            DecoderDictionary::Can(d) => Some(d),
            DecoderDictionary::ComplexData(_) => None,
        }
    }

    pub fn as_complex_data(&self) -> Option<&ComplexDataDecoderDictionary> {
        match self {
            DecoderDictionary::ComplexData(d) => Some(d),
            DecoderDictionary::Can(_) => None,
        }
    }

    pub fn as_complex_data_mut(&mut self) -> Option<&mut ComplexDataDecoderDictionary> {
        match self {
            DecoderDictionary::ComplexData(d) => Some(d),
            DecoderDictionary::Can(_) => None,
        }
    }
}
