//! The core extraction algorithm: joins the enabled scheme set with the
//! decoder manifest and produces one decoder dictionary per protocol.
//!
//! The extractor is *total* — malformed input never aborts a pass. Every
//! defect is logged and the offending signal or frame is skipped; the next
//! pass (driven by a new scheme set) is the retry.

use std::collections::BTreeMap;

use ve_protocol::{
    BYTE_SIZE, CanMessageFormat, CanSignalFormat, DecoderManifest, INVALID_CHANNEL,
    INVALID_SIGNAL_ID, ProtocolTag, RawCanFrameInfo, Scheme, SignalId, SignalInfo, SignalPath,
    is_partial,
};

use crate::channel::CanInterfaceTranslator;
use crate::complex;
use crate::dictionary::{
    CanDecoderDictionary, CanMessageDecoderMethod, CollectType, ComplexDataDecoderDictionary,
    DecoderDictionary,
};

/// All OBD signals share this synthetic channel id.
const OBD_CHANNEL: u32 = 0;

/// The extractor's output: one [`DecoderDictionary`] per supported protocol
/// tag. Every key is always present — an unused protocol simply maps to an
/// empty dictionary rather than being absent from the set.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionarySet {
    can_raw: DecoderDictionary,
    obd: DecoderDictionary,
    complex_data: DecoderDictionary,
}

impl DictionarySet {
    pub fn empty() -> Self {
        Self {
            can_raw: DecoderDictionary::Can(CanDecoderDictionary::new()),
            obd: DecoderDictionary::Can(CanDecoderDictionary::new()),
            complex_data: DecoderDictionary::ComplexData(ComplexDataDecoderDictionary::new()),
        }
    }

    pub fn get(&self, protocol: ProtocolTag) -> Option<&DecoderDictionary> {
        match protocol {
            ProtocolTag::CanRaw => Some(&self.can_raw),
            ProtocolTag::Obd => Some(&self.obd),
            ProtocolTag::ComplexData => Some(&self.complex_data),
            ProtocolTag::Invalid => None,
        }
    }

    pub fn can_raw(&self) -> &CanDecoderDictionary {
        expect_can(&self.can_raw)
    }

    pub fn obd(&self) -> &CanDecoderDictionary {
        expect_can(&self.obd)
    }

    pub fn complex_data(&self) -> &ComplexDataDecoderDictionary {
        expect_complex(&self.complex_data)
    }

    /// Iterate the three supported protocol keys and their dictionaries,
    /// for the change notifier to fan out over.
    pub fn iter(&self) -> impl Iterator<Item = (ProtocolTag, &DecoderDictionary)> {
        [
            (ProtocolTag::CanRaw, &self.can_raw),
            (ProtocolTag::Obd, &self.obd),
            (ProtocolTag::ComplexData, &self.complex_data),
        ]
        .into_iter()
    }

    fn can_raw_mut(&mut self) -> &mut CanDecoderDictionary {
        expect_can_mut(&mut self.can_raw)
    }

    fn obd_mut(&mut self) -> &mut CanDecoderDictionary {
        expect_can_mut(&mut self.obd)
    }

    fn complex_data_mut(&mut self) -> &mut ComplexDataDecoderDictionary {
        expect_complex_mut(&mut self.complex_data)
    }
}

fn expect_can(dict: &DecoderDictionary) -> &CanDecoderDictionary {
    dict.as_can()
        .expect("DictionarySet::can_raw/obd always hold a Can dictionary")
}

fn expect_can_mut(dict: &mut DecoderDictionary) -> &mut CanDecoderDictionary {
    dict.as_can_mut()
        .expect("DictionarySet::can_raw/obd always hold a Can dictionary")
}

fn expect_complex(dict: &DecoderDictionary) -> &ComplexDataDecoderDictionary {
    dict.as_complex_data()
        .expect("DictionarySet::complex_data always holds a ComplexData dictionary")
}

fn expect_complex_mut(dict: &mut DecoderDictionary) -> &mut ComplexDataDecoderDictionary {
    dict.as_complex_data_mut()
        .expect("DictionarySet::complex_data always holds a ComplexData dictionary")
}

/// Run one extraction pass over `schemes`, joining them against `manifest`
/// via `translator`. Iteration order over `schemes` is the `BTreeMap`'s
/// (stable by scheme id), which only affects which entry is first-seen for
/// monotonic merges — the end state is the same regardless.
pub fn extract(
    schemes: &BTreeMap<String, Scheme>,
    manifest: &dyn DecoderManifest,
    translator: &dyn CanInterfaceTranslator,
) -> DictionarySet {
    let mut dictionaries = DictionarySet::empty();

    for scheme in schemes.values() {
        for signal_info in scheme.collect_signals() {
            process_signal(&mut dictionaries, scheme, manifest, translator, signal_info);
        }
        for raw_frame in scheme.collect_raw_can_frames() {
            process_raw_frame(&mut dictionaries, scheme, translator, raw_frame);
        }
    }

    dictionaries
}

fn process_signal(
    dictionaries: &mut DictionarySet,
    scheme: &Scheme,
    manifest: &dyn DecoderManifest,
    translator: &dyn CanInterfaceTranslator,
    signal_info: &SignalInfo,
) {
    let original_signal_id = signal_info.signal_id;

    let (sid, path) = if is_partial(original_signal_id) {
        match scheme.resolve(original_signal_id) {
            Some(resolved) => resolved,
            None => {
                tracing::warn!(
                    scheme_id = %scheme.id,
                    partial_signal_id = original_signal_id,
                    "unknown partial signal id in scheme's partial-signal table; skipping"
                );
                (INVALID_SIGNAL_ID, SignalPath::whole())
            }
        }
    } else {
        (original_signal_id, SignalPath::whole())
    };

    if sid == INVALID_SIGNAL_ID {
        return;
    }

    match manifest.protocol_of(sid) {
        ProtocolTag::CanRaw => {
            dispatch_can_raw(dictionaries.can_raw_mut(), manifest, translator, sid)
        }
        ProtocolTag::Obd => dispatch_obd(dictionaries.obd_mut(), manifest, sid, original_signal_id),
        ProtocolTag::ComplexData => dispatch_complex(
            dictionaries.complex_data_mut(),
            manifest,
            sid,
            path,
            original_signal_id,
        ),
        ProtocolTag::Invalid => {
            tracing::warn!(
                scheme_id = %scheme.id,
                signal_id = sid,
                "signal has an invalid or unrecognized protocol tag; skipping"
            );
        }
    }
}

/// RAW-SOCKET (CAN) dispatch.
fn dispatch_can_raw(
    dict: &mut CanDecoderDictionary,
    manifest: &dyn DecoderManifest,
    translator: &dyn CanInterfaceTranslator,
    sid: SignalId,
) {
    let Some((raw_frame_id, interface_name)) = manifest.can_frame_of(sid) else {
        tracing::warn!(signal_id = sid, "CAN signal has no frame mapping in the manifest; skipping");
        return;
    };

    let channel_id = translator.channel_id_of(&interface_name);
    if channel_id == INVALID_CHANNEL {
        tracing::warn!(signal_id = sid, interface_name, "unknown CAN interface; skipping");
        return;
    }

    dict.signal_ids_to_collect.insert(sid);
    let frames = dict.channel_entry(channel_id);

    match frames.get_mut(&raw_frame_id) {
        None => {
            let format = manifest
                .can_message_format(raw_frame_id, &interface_name)
                .unwrap_or_default();
            frames.insert(raw_frame_id, CanMessageDecoderMethod::decode(format));
        }
        Some(existing) if existing.collect_type == CollectType::Raw => {
            // Upgrading RAW->RAW_AND_DECODE: the raw-only insert never
            // populated a format, so it must be (re)seeded here.
            existing.collect_type = CollectType::RawAndDecode;
            existing.format = manifest
                .can_message_format(raw_frame_id, &interface_name)
                .unwrap_or_default();
        }
        Some(_) => {
            // Already DECODE or RAW_AND_DECODE: format already lists this
            // frame's signals, nothing to do.
        }
    }
}

/// OBD dispatch.
fn dispatch_obd(
    dict: &mut CanDecoderDictionary,
    manifest: &dyn DecoderManifest,
    sid: SignalId,
    original_signal_id: SignalId,
) {
    let Some(pid_format) = manifest.pid_format(sid) else {
        tracing::warn!(signal_id = sid, "OBD signal has no PID format in the manifest; skipping");
        return;
    };

    dict.signal_ids_to_collect.insert(sid);
    let frames = dict.channel_entry(OBD_CHANNEL);
    let entry = frames.entry(pid_format.pid).or_insert_with(|| {
        CanMessageDecoderMethod::decode(CanMessageFormat {
            message_id: pid_format.pid,
            size_in_bytes: pid_format.response_length,
            signals: Vec::new(),
        })
    });

    // The consumer-facing signal id is the pre-resolution one the scheme
    // named, not the resolved full id — preserved asymmetrically with the
    // CAN RAW-SOCKET path; see DESIGN.md.
    entry.format.signals.push(CanSignalFormat {
        signal_id: original_signal_id,
        first_bit_position: pid_format.start_byte * BYTE_SIZE + pid_format.bit_right_shift,
        size_in_bits: (pid_format.byte_length - 1) * BYTE_SIZE + pid_format.bit_mask_length,
        factor: pid_format.scaling,
        offset: pid_format.offset,
    });
}

/// COMPLEX-DATA dispatch.
fn dispatch_complex(
    dict: &mut ComplexDataDecoderDictionary,
    manifest: &dyn DecoderManifest,
    sid: SignalId,
    path: SignalPath,
    original_signal_id: SignalId,
) {
    let Some((interface_id, message_id, root_type_id)) = manifest.complex_signal_of(sid) else {
        tracing::warn!(signal_id = sid, "complex signal has no manifest entry; skipping");
        return;
    };

    if interface_id.is_empty() {
        tracing::warn!(signal_id = sid, "complex signal has an empty interface id; skipping");
        return;
    }

    let entry = dict.entry_mut(&interface_id, &message_id);
    complex::record_reference(entry, manifest, sid, root_type_id, path, original_signal_id);
}

/// Raw CAN frame passthrough, independent of any signal mapping.
fn process_raw_frame(
    dictionaries: &mut DictionarySet,
    scheme: &Scheme,
    translator: &dyn CanInterfaceTranslator,
    raw_frame: &RawCanFrameInfo,
) {
    let channel_id = translator.channel_id_of(&raw_frame.interface_id);
    if channel_id == INVALID_CHANNEL {
        tracing::warn!(
            scheme_id = %scheme.id,
            interface_id = %raw_frame.interface_id,
            frame_id = raw_frame.frame_id,
            "unknown CAN interface for raw frame; skipping"
        );
        return;
    }

    let frames = dictionaries.can_raw_mut().channel_entry(channel_id);
    match frames.get_mut(&raw_frame.frame_id) {
        None => {
            frames.insert(raw_frame.frame_id, CanMessageDecoderMethod::raw());
        }
        Some(existing) if existing.collect_type == CollectType::Decode => {
            existing.collect_type = CollectType::RawAndDecode;
        }
        Some(_) => {
            // Already RAW or RAW_AND_DECODE: no change.
        }
    }
}
