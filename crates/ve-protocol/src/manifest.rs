//! Decoder manifest: the read-only catalog mapping signal ids to their
//! transport-specific decoding format.
//!
//! [`DecoderManifest`] is the trait the extraction core consumes. This
//! module also ships [`StaticDecoderManifest`], a JSON-loadable in-memory
//! implementation suitable for tests and for the edge agent binary, which
//! loads one from disk at startup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, ManifestResult};
use crate::signal::{ProtocolTag, SignalId};

/// One CAN signal's bit layout and scaling within a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanSignalFormat {
    pub signal_id: SignalId,
    pub first_bit_position: u32,
    pub size_in_bits: u32,
    pub factor: f64,
    pub offset: f64,
}

/// The decoded layout of one CAN message, keyed in the dictionary by raw
/// frame id (or by PID, for OBD).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanMessageFormat {
    pub message_id: u32,
    pub size_in_bytes: u32,
    pub signals: Vec<CanSignalFormat>,
}

/// Per-signal OBD-II decoding parameters, as stored in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidDecoderFormat {
    pub pid: u32,
    pub start_byte: u32,
    pub bit_right_shift: u32,
    pub byte_length: u32,
    pub bit_mask_length: u32,
    pub scaling: f64,
    pub offset: f64,
    pub response_length: u32,
}

/// A node in the complex (array/struct) data-type graph. Types reference
/// each other only through ids — never hold a pointer between type nodes,
/// since the graph may be cyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComplexDataType {
    Primitive,
    Array { element_type_id: u32 },
    Struct { member_type_ids: Vec<u32> },
    Invalid,
}

/// Read-only catalog mapping signal ids to their transport-specific
/// decoding format.
///
/// Implementations must be safe to share across threads as an immutable
/// snapshot (`Arc<dyn DecoderManifest>`) — extraction never mutates it, and
/// a new manifest snapshot simply replaces the `Arc` between passes.
pub trait DecoderManifest: Send + Sync {
    fn protocol_of(&self, signal_id: SignalId) -> ProtocolTag;
    fn can_frame_of(&self, signal_id: SignalId) -> Option<(u32, String)>;
    fn can_message_format(
        &self,
        raw_frame_id: u32,
        interface_name: &str,
    ) -> Option<CanMessageFormat>;
    fn pid_format(&self, signal_id: SignalId) -> Option<PidDecoderFormat>;
    /// Returns `(interface_id, message_id, root_type_id)`.
    fn complex_signal_of(&self, signal_id: SignalId) -> Option<(String, String, u32)>;
    fn complex_type(&self, type_id: u32) -> ComplexDataType;
}

// ---------------------------------------------------------------------------
// On-disk / JSON representation
// ---------------------------------------------------------------------------

/// One signal's manifest entry, tagged by protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "kebab-case")]
pub enum SignalManifestEntry {
    CanRaw {
        signal_id: SignalId,
        raw_frame_id: u32,
        interface_name: String,
    },
    Obd {
        signal_id: SignalId,
        format: PidDecoderFormat,
    },
    ComplexData {
        signal_id: SignalId,
        interface_id: String,
        message_id: String,
        root_type_id: u32,
    },
}

/// A CAN message's decoded layout, keyed by (raw_frame_id, interface_name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanMessageEntry {
    pub raw_frame_id: u32,
    pub interface_name: String,
    pub format: CanMessageFormat,
}

/// One complex type-graph node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexTypeEntry {
    pub type_id: u32,
    pub data_type: ComplexDataType,
}

/// The JSON-serializable shape of a manifest snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestData {
    #[serde(default)]
    pub signals: Vec<SignalManifestEntry>,
    #[serde(default)]
    pub can_messages: Vec<CanMessageEntry>,
    #[serde(default)]
    pub complex_types: Vec<ComplexTypeEntry>,
}

/// In-memory [`DecoderManifest`], built once from [`ManifestData`] and
/// indexed for O(1) lookup. This is what the edge agent loads from disk and
/// what the test suites build programmatically via [`StaticDecoderManifest::builder`].
#[derive(Debug, Clone, Default)]
pub struct StaticDecoderManifest {
    protocols: HashMap<SignalId, ProtocolTag>,
    can_frames: HashMap<SignalId, (u32, String)>,
    can_formats: HashMap<(u32, String), CanMessageFormat>,
    pid_formats: HashMap<SignalId, PidDecoderFormat>,
    complex_signals: HashMap<SignalId, (String, String, u32)>,
    complex_types: HashMap<u32, ComplexDataType>,
}

impl StaticDecoderManifest {
    pub fn builder() -> StaticDecoderManifestBuilder {
        StaticDecoderManifestBuilder::default()
    }

    pub fn from_data(data: ManifestData) -> Self {
        let mut manifest = Self::default();

        for entry in data.signals {
            match entry {
                SignalManifestEntry::CanRaw {
                    signal_id,
                    raw_frame_id,
                    interface_name,
                } => {
                    manifest.protocols.insert(signal_id, ProtocolTag::CanRaw);
                    manifest
                        .can_frames
                        .insert(signal_id, (raw_frame_id, interface_name));
                }
                SignalManifestEntry::Obd { signal_id, format } => {
                    manifest.protocols.insert(signal_id, ProtocolTag::Obd);
                    manifest.pid_formats.insert(signal_id, format);
                }
                SignalManifestEntry::ComplexData {
                    signal_id,
                    interface_id,
                    message_id,
                    root_type_id,
                } => {
                    manifest
                        .protocols
                        .insert(signal_id, ProtocolTag::ComplexData);
                    manifest
                        .complex_signals
                        .insert(signal_id, (interface_id, message_id, root_type_id));
                }
            }
        }

        for entry in data.can_messages {
            manifest
                .can_formats
                .insert((entry.raw_frame_id, entry.interface_name), entry.format);
        }

        for entry in data.complex_types {
            manifest.complex_types.insert(entry.type_id, entry.data_type);
        }

        manifest
    }

    pub fn from_json(json: &str) -> ManifestResult<Self> {
        let data: ManifestData = serde_json::from_str(json).map_err(ManifestError::Json)?;
        Ok(Self::from_data(data))
    }
}

impl DecoderManifest for StaticDecoderManifest {
    fn protocol_of(&self, signal_id: SignalId) -> ProtocolTag {
        self.protocols
            .get(&signal_id)
            .copied()
            .unwrap_or(ProtocolTag::Invalid)
    }

    fn can_frame_of(&self, signal_id: SignalId) -> Option<(u32, String)> {
        self.can_frames.get(&signal_id).cloned()
    }

    fn can_message_format(
        &self,
        raw_frame_id: u32,
        interface_name: &str,
    ) -> Option<CanMessageFormat> {
        self.can_formats
            .get(&(raw_frame_id, interface_name.to_string()))
            .cloned()
    }

    fn pid_format(&self, signal_id: SignalId) -> Option<PidDecoderFormat> {
        self.pid_formats.get(&signal_id).copied()
    }

    fn complex_signal_of(&self, signal_id: SignalId) -> Option<(String, String, u32)> {
        self.complex_signals.get(&signal_id).cloned()
    }

    fn complex_type(&self, type_id: u32) -> ComplexDataType {
        self.complex_types
            .get(&type_id)
            .cloned()
            .unwrap_or(ComplexDataType::Invalid)
    }
}

/// Fluent builder for [`StaticDecoderManifest`], used by tests and by the
/// edge agent when assembling a manifest from a simpler source format.
#[derive(Debug, Clone, Default)]
pub struct StaticDecoderManifestBuilder {
    data: ManifestData,
}

impl StaticDecoderManifestBuilder {
    pub fn can_signal(
        mut self,
        signal_id: SignalId,
        raw_frame_id: u32,
        interface_name: impl Into<String>,
    ) -> Self {
        self.data.signals.push(SignalManifestEntry::CanRaw {
            signal_id,
            raw_frame_id,
            interface_name: interface_name.into(),
        });
        self
    }

    pub fn can_message(
        mut self,
        raw_frame_id: u32,
        interface_name: impl Into<String>,
        format: CanMessageFormat,
    ) -> Self {
        self.data.can_messages.push(CanMessageEntry {
            raw_frame_id,
            interface_name: interface_name.into(),
            format,
        });
        self
    }

    pub fn obd_signal(mut self, signal_id: SignalId, format: PidDecoderFormat) -> Self {
        self.data
            .signals
            .push(SignalManifestEntry::Obd { signal_id, format });
        self
    }

    pub fn complex_signal(
        mut self,
        signal_id: SignalId,
        interface_id: impl Into<String>,
        message_id: impl Into<String>,
        root_type_id: u32,
    ) -> Self {
        self.data.signals.push(SignalManifestEntry::ComplexData {
            signal_id,
            interface_id: interface_id.into(),
            message_id: message_id.into(),
            root_type_id,
        });
        self
    }

    pub fn complex_type(mut self, type_id: u32, data_type: ComplexDataType) -> Self {
        self.data
            .complex_types
            .push(ComplexTypeEntry { type_id, data_type });
        self
    }

    pub fn build(self) -> StaticDecoderManifest {
        StaticDecoderManifest::from_data(self.data)
    }
}
