//! Loading a decoder manifest and a set of collection schemes off disk.

use std::collections::BTreeMap;

use ve_protocol::{Scheme, StaticDecoderManifest};

use crate::error::AgentError;

fn read_to_string(path: &str) -> Result<String, AgentError> {
    std::fs::read_to_string(path).map_err(|source| AgentError::Io {
        path: path.to_string(),
        source,
    })
}

/// Load a decoder manifest snapshot from a JSON file.
pub fn load_manifest(path: &str) -> Result<StaticDecoderManifest, AgentError> {
    let contents = read_to_string(path)?;
    Ok(StaticDecoderManifest::from_json(&contents)?)
}

/// Load one scheme per path, keyed by each scheme's own id.
pub fn load_schemes(paths: &[String]) -> Result<BTreeMap<String, Scheme>, AgentError> {
    let mut schemes = BTreeMap::new();
    for path in paths {
        let contents = read_to_string(path)?;
        let scheme: Scheme =
            serde_json::from_str(&contents).map_err(|source| AgentError::Scheme {
                path: path.clone(),
                source,
            })?;
        schemes.insert(scheme.id.clone(), scheme);
    }
    Ok(schemes)
}
