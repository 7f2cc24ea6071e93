//! Bounded transitive closure over the complex data-type graph, invoked
//! once per complex-signal reference during extraction.

use ve_protocol::{ComplexDataType, DecoderManifest, INVALID_SIGNAL_ID, MAX_COMPLEX_TYPES, SignalId, SignalPath};

use crate::dictionary::ComplexDataMessageFormat;

/// Record one reference to a complex signal against `entry`.
///
/// On the first reference (entry's `signal_id` still the sentinel), this
/// performs the bounded DFS described in the module-level docs and records
/// every type visited. Later references to an entry that already claimed a
/// different root type are logged and ignored — first-root-wins.
///
/// Regardless of whether a traversal ran, the path carried by this
/// particular reference is always recorded: an empty path marks the entry
/// for raw collection, otherwise the (path, partial id) pair is inserted in
/// sorted order.
pub fn record_reference(
    entry: &mut ComplexDataMessageFormat,
    manifest: &dyn DecoderManifest,
    signal_id: SignalId,
    root_type_id: u32,
    path: SignalPath,
    partial_signal_id: SignalId,
) {
    if entry.is_first_reference() {
        entry.signal_id = signal_id;
        entry.root_type_id = root_type_id;
        traverse(entry, manifest, root_type_id);
    } else if entry.root_type_id != root_type_id {
        tracing::warn!(
            signal_id,
            first_root_type_id = entry.root_type_id,
            later_root_type_id = root_type_id,
            "complex signal referenced with a different root type; keeping the first"
        );
    }

    if path.is_whole() {
        entry.collect_raw = true;
    } else {
        entry.insert_path(path, partial_signal_id);
    }
}

/// Explicit-stack DFS bounded by `MAX_COMPLEX_TYPES`, so traversal depth
/// never grows the call stack and a pathological/cyclic graph can't run
/// away — types only reference each other by id, never by direct pointer.
fn traverse(entry: &mut ComplexDataMessageFormat, manifest: &dyn DecoderManifest, root_type_id: u32) {
    let mut stack = vec![root_type_id];
    let mut warned_exhausted = false;

    while let Some(type_id) = stack.pop() {
        if entry.complex_type_map.len() >= MAX_COMPLEX_TYPES {
            if !warned_exhausted {
                tracing::warn!(
                    root_type_id,
                    limit = MAX_COMPLEX_TYPES,
                    "complex type traversal budget exhausted; keeping the partial graph collected so far"
                );
                warned_exhausted = true;
            }
            break;
        }

        if entry.complex_type_map.contains_key(&type_id) {
            continue;
        }

        let data_type = manifest.complex_type(type_id);
        if matches!(data_type, ComplexDataType::Invalid) {
            tracing::warn!(type_id, "invalid complex type id during traversal; skipping branch");
            continue;
        }

        match &data_type {
            ComplexDataType::Array { element_type_id } => stack.push(*element_type_id),
            ComplexDataType::Struct { member_type_ids } => {
                stack.extend(member_type_ids.iter().copied());
            }
            ComplexDataType::Primitive | ComplexDataType::Invalid => {}
        }

        entry.complex_type_map.insert(type_id, data_type);
    }
}
