//! Decoder dictionary extraction core.
//!
//! Joins a set of enabled collection schemes against a read-only decoder
//! manifest and produces one decoder dictionary per protocol, ready to hand
//! to a CAN/OBD/complex-data collection path. The extraction itself is
//! synchronous and CPU-bound — there's nothing in it to `.await`.

pub mod channel;
pub mod complex;
pub mod dictionary;
pub mod extractor;
pub mod notifier;

pub use channel::{CanInterfaceTranslator, StaticChannelTranslator};
pub use dictionary::{
    CanDecoderDictionary, CanMessageDecoderMethod, CollectType, ComplexDataDecoderDictionary,
    ComplexDataMessageFormat, DecoderDictionary, FrameKey,
};
pub use extractor::{DictionarySet, extract};
pub use notifier::{ActiveDecoderDictionaryListener, ChangeNotifier};
