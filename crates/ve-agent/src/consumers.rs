//! Example [`ActiveDecoderDictionaryListener`] consumers wired by the
//! binary: one that logs, one that records the latest snapshot for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ve_dictionary::{ActiveDecoderDictionaryListener, DecoderDictionary};
use ve_protocol::ProtocolTag;

/// Emits a `tracing` event for every dictionary change notification.
#[derive(Debug, Default)]
pub struct LoggingListener;

impl ActiveDecoderDictionaryListener for LoggingListener {
    fn on_change_of_active_dictionary(
        &self,
        dictionary: Option<Arc<DecoderDictionary>>,
        protocol: ProtocolTag,
    ) {
        match dictionary {
            Some(dict) => tracing::info!(
                ?protocol,
                is_empty = dict.is_empty(),
                "decoder dictionary updated"
            ),
            None => tracing::info!(?protocol, "decoder dictionary is empty"),
        }
    }
}

/// Records the latest notified dictionary per protocol, for callers that
/// want to poll current state rather than react to push notifications.
#[derive(Debug, Default)]
pub struct RecordingListener {
    latest: Mutex<HashMap<ProtocolTag, Option<Arc<DecoderDictionary>>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, protocol: ProtocolTag) -> Option<Arc<DecoderDictionary>> {
        self.latest.lock().unwrap().get(&protocol).cloned().flatten()
    }
}

impl ActiveDecoderDictionaryListener for RecordingListener {
    fn on_change_of_active_dictionary(
        &self,
        dictionary: Option<Arc<DecoderDictionary>>,
        protocol: ProtocolTag,
    ) {
        self.latest.lock().unwrap().insert(protocol, dictionary);
    }
}
