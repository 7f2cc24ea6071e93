//! Change notifier: fans the freshly extracted per-protocol dictionaries
//! out to registered consumers.
//!
//! Consumers never see a dictionary mutate in place — each pass builds a
//! fresh [`crate::dictionary::DecoderDictionary`] and hands out a shared,
//! immutable reference. Registration/unregistration happens outside an
//! extraction pass; the notifier snapshots its listener set before fanning
//! out so a consumer unregistering mid-pass can't race a partially
//! delivered notification.

use std::sync::{Arc, Mutex};

use ve_protocol::ProtocolTag;

use crate::dictionary::DecoderDictionary;
use crate::extractor::DictionarySet;

/// A consumer of decoder dictionary change notifications.
pub trait ActiveDecoderDictionaryListener: Send + Sync {
    /// Called once per protocol per pass. `dictionary` is `None` when the
    /// protocol has no active collection (an empty dictionary), `Some` when
    /// there is at least one channel/frame/complex-signal entry to act on.
    fn on_change_of_active_dictionary(
        &self,
        dictionary: Option<Arc<DecoderDictionary>>,
        protocol: ProtocolTag,
    );
}

/// Registry + fan-out for [`ActiveDecoderDictionaryListener`]s.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Mutex<Vec<Arc<dyn ActiveDecoderDictionaryListener>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Arc<dyn ActiveDecoderDictionaryListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Notify every consumer registered at the time this call started, once
    /// per protocol key present in `dictionaries`. Delivery order across
    /// protocols is unspecified.
    pub fn notify(&self, dictionaries: &DictionarySet) {
        let snapshot: Vec<_> = self.listeners.lock().unwrap().clone();

        for (protocol, dictionary) in dictionaries.iter() {
            let payload = if dictionary.is_empty() {
                None
            } else {
                Some(Arc::new(dictionary.clone()))
            };

            for listener in &snapshot {
                listener.on_change_of_active_dictionary(payload.clone(), protocol);
            }
        }
    }
}
