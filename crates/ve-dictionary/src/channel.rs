//! CAN interface translator — bijection between interface name strings and
//! a compact numeric channel id.

use std::collections::HashMap;

use ve_protocol::{ChannelId, INVALID_CHANNEL};

/// Read-only, bijective name ↔ channel-id lookup. Registration happens once
/// at startup (mirroring how an edge agent wires a fixed CAN interface list
/// from its configuration); extraction only ever reads it.
pub trait CanInterfaceTranslator: Send + Sync {
    fn channel_id_of(&self, interface_name: &str) -> ChannelId;
}

/// Static, in-memory translator built from a name → id table.
#[derive(Debug, Clone, Default)]
pub struct StaticChannelTranslator {
    channels: HashMap<String, ChannelId>,
}

impl StaticChannelTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, interface_name: impl Into<String>, channel_id: ChannelId) -> &mut Self {
        self.channels.insert(interface_name.into(), channel_id);
        self
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, ChannelId)>,
        S: Into<String>,
    {
        let mut translator = Self::new();
        for (name, id) in pairs {
            translator.register(name, id);
        }
        translator
    }
}

impl CanInterfaceTranslator for StaticChannelTranslator {
    fn channel_id_of(&self, interface_name: &str) -> ChannelId {
        self.channels
            .get(interface_name)
            .copied()
            .unwrap_or(INVALID_CHANNEL)
    }
}
