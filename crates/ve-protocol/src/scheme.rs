//! Collection scheme: what to collect, independent of decoder format.
//!
//! Condition evaluation, persistence, and scheme transport are out of scope
//! for this crate — a [`Scheme`] here is purely the extraction core's view
//! of a scheme: the signals and raw frames it names, and the partial-signal
//! table needed to resolve any partial ids it references.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::signal::{SignalId, SignalPath, is_partial};

/// One signal a scheme wants collected, named by its (possibly partial) id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    pub signal_id: SignalId,
}

impl SignalInfo {
    pub fn new(signal_id: SignalId) -> Self {
        Self { signal_id }
    }
}

/// A raw CAN frame a scheme wants passed through unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCanFrameInfo {
    pub frame_id: u32,
    pub interface_id: String,
}

/// One entry of a scheme's partial-signal table: a partial id's parent
/// signal and the path inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSignalEntry {
    pub parent_signal_id: SignalId,
    pub path: SignalPath,
}

/// A declarative collection scheme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheme {
    pub id: String,
    #[serde(default)]
    pub collect_signals: Vec<SignalInfo>,
    #[serde(default)]
    pub collect_raw_can_frames: Vec<RawCanFrameInfo>,
    /// Maps partial-signal-id → (parent full signal id, signal path).
    #[serde(default)]
    pub partial_signal_table: HashMap<SignalId, PartialSignalEntry>,
}

impl Scheme {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn collect_signals(&self) -> &[SignalInfo] {
        &self.collect_signals
    }

    pub fn collect_raw_can_frames(&self) -> &[RawCanFrameInfo] {
        &self.collect_raw_can_frames
    }

    pub fn partial_signal_lookup(&self) -> &HashMap<SignalId, PartialSignalEntry> {
        &self.partial_signal_table
    }

    /// Resolve a (possibly partial) signal id to its full signal id and path.
    ///
    /// For full ids this is always `Some((id, SignalPath::whole()))`. For
    /// partial ids it looks the id up in this scheme's partial-signal
    /// table, returning `None` when the table has no entry for it — the
    /// caller must warn and skip the reference in that case.
    pub fn resolve(&self, id: SignalId) -> Option<(SignalId, SignalPath)> {
        if is_partial(id) {
            self.partial_signal_table
                .get(&id)
                .map(|entry| (entry.parent_signal_id, entry.path.clone()))
        } else {
            Some((id, SignalPath::whole()))
        }
    }

    /// Builder helper: add a signal to collect.
    pub fn with_signal(mut self, signal_id: SignalId) -> Self {
        self.collect_signals.push(SignalInfo::new(signal_id));
        self
    }

    /// Builder helper: add a raw CAN frame to pass through.
    pub fn with_raw_frame(mut self, frame_id: u32, interface_id: impl Into<String>) -> Self {
        self.collect_raw_can_frames.push(RawCanFrameInfo {
            frame_id,
            interface_id: interface_id.into(),
        });
        self
    }

    /// Builder helper: register a partial-signal table entry.
    pub fn with_partial_signal(
        mut self,
        partial_id: SignalId,
        parent_signal_id: SignalId,
        path: impl Into<SignalPath>,
    ) -> Self {
        self.partial_signal_table.insert(
            partial_id,
            PartialSignalEntry {
                parent_signal_id,
                path: path.into(),
            },
        );
        self
    }
}
