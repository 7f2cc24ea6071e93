//! Edge agent binary — edge runtime for the decoder dictionary extraction
//! core.
//!
//! Loads a configuration file, a decoder manifest, and a collection scheme
//! set off disk, runs one extraction pass, and fans the result out to its
//! registered consumers. Deliberately does not open an MQTT connection, a
//! CAN socket, or poll for scheme changes — driving those is out of scope;
//! this binary is a runnable illustration of how a host process wires the
//! extraction core into its own event loop.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ve_agent::config::AgentConfig;
use ve_agent::consumers::{LoggingListener, RecordingListener};
use ve_agent::loader;
use ve_dictionary::{ChangeNotifier, StaticChannelTranslator, extract};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ve-agent starting");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/ve-agent/agent.toml".to_string());
    let config = AgentConfig::from_file(&config_path)?;
    tracing::info!(
        manifest_path = %config.manifest_path,
        scheme_count = config.scheme_paths.len(),
        "config loaded"
    );

    let manifest = loader::load_manifest(&config.manifest_path)?;
    let schemes = loader::load_schemes(&config.scheme_paths)?;
    let translator = StaticChannelTranslator::from_pairs(config.can_interfaces);

    let notifier = ChangeNotifier::new();
    notifier.register(Arc::new(LoggingListener));
    let recorder = Arc::new(RecordingListener::new());
    notifier.register(recorder);
    tracing::info!(listener_count = notifier.listener_count(), "consumers registered");

    let dictionaries = extract(&schemes, &manifest, &translator);
    notifier.notify(&dictionaries);

    tracing::info!("ve-agent completed extraction pass");
    Ok(())
}
