//! End-to-end extraction behavior, driven entirely through the public
//! `ve-protocol` + `ve-dictionary` API.

mod helpers;

use std::collections::BTreeMap;

use helpers::{complex_signal_fixture, obd_pid_merge_fixture, single_can_signal_fixture};
use ve_dictionary::{CollectType, StaticChannelTranslator, extract};
use ve_protocol::{INTERNAL_SIGNAL_ID_BITMASK, Scheme, SignalPath};

fn schemes(list: impl IntoIterator<Item = Scheme>) -> BTreeMap<String, Scheme> {
    list.into_iter().map(|s| (s.id.clone(), s)).collect()
}

#[test]
fn single_can_signal_yields_decode_entry() {
    let (manifest, translator) = single_can_signal_fixture();
    let schemes = schemes([Scheme::new("s1").with_signal(7)]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    let can = dictionaries.can_raw();
    let entry = &can.channels[&3][&0x100];
    assert_eq!(entry.collect_type, CollectType::Decode);
    assert_eq!(entry.format.signals.len(), 1);
    assert!(can.signal_ids_to_collect.contains(&7));
    assert!(dictionaries.obd().is_empty());
    assert!(dictionaries.complex_data().is_empty());
}

#[test]
fn raw_and_signal_merge_to_raw_and_decode() {
    let (manifest, translator) = single_can_signal_fixture();
    let schemes = schemes([Scheme::new("s1")
        .with_signal(7)
        .with_raw_frame(0x100, "can0")]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    let entry = &dictionaries.can_raw().channels[&3][&0x100];
    assert_eq!(entry.collect_type, CollectType::RawAndDecode);
    assert_eq!(entry.format.signals.len(), 1);
}

#[test]
fn raw_frame_alone_yields_raw_entry() {
    let (manifest, translator) = single_can_signal_fixture();
    let schemes = schemes([Scheme::new("s1").with_raw_frame(0x100, "can0")]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    let can = dictionaries.can_raw();
    let entry = &can.channels[&3][&0x100];
    assert_eq!(entry.collect_type, CollectType::Raw);
    assert!(entry.format.signals.is_empty());
    assert!(can.signal_ids_to_collect.is_empty());
}

#[test]
fn two_obd_signals_merge_onto_same_pid() {
    let manifest = obd_pid_merge_fixture();
    let translator = StaticChannelTranslator::new();
    let schemes = schemes([Scheme::new("s1").with_signal(11).with_signal(12)]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    let obd = dictionaries.obd();
    let entry = &obd.channels[&0][&0x0C];
    assert_eq!(entry.format.signals.len(), 2);
    assert_eq!(entry.format.signals[0].signal_id, 11);
    assert_eq!(entry.format.signals[0].first_bit_position, 0);
    assert_eq!(entry.format.signals[1].signal_id, 12);
    assert_eq!(entry.format.signals[1].first_bit_position, 16);
    assert!(obd.signal_ids_to_collect.contains(&11));
    assert!(obd.signal_ids_to_collect.contains(&12));
}

#[test]
fn partial_complex_reference_records_path_not_raw() {
    let manifest = complex_signal_fixture();
    let translator = StaticChannelTranslator::new();
    let partial = INTERNAL_SIGNAL_ID_BITMASK | 1;
    let schemes = schemes([Scheme::new("s1")
        .with_partial_signal(partial, 200, vec![0, 15, 1])
        .with_signal(partial)]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    let complex = dictionaries.complex_data();
    let entry = &complex.interfaces["ros2"]["/objects"];
    assert_eq!(entry.signal_id, 200);
    assert_eq!(entry.root_type_id, 1);
    assert_eq!(entry.complex_type_map.len(), 4);
    assert!(!entry.collect_raw);
    assert_eq!(entry.signal_paths, vec![(SignalPath(vec![0, 15, 1]), partial)]);
}

#[test]
fn whole_and_partial_references_merge_on_same_entry() {
    let manifest = complex_signal_fixture();
    let translator = StaticChannelTranslator::new();
    let partial = INTERNAL_SIGNAL_ID_BITMASK | 2;
    let schemes = schemes([
        Scheme::new("scheme-a").with_signal(200),
        Scheme::new("scheme-b")
            .with_partial_signal(partial, 200, vec![1])
            .with_signal(partial),
    ]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    let complex = dictionaries.complex_data();
    let entry = &complex.interfaces["ros2"]["/objects"];
    assert!(entry.collect_raw);
    assert_eq!(entry.signal_paths, vec![(SignalPath(vec![1]), partial)]);
    assert_eq!(entry.complex_type_map.len(), 4);
}

#[test]
fn unknown_partial_signal_id_is_skipped() {
    let (manifest, translator) = single_can_signal_fixture();
    let unknown_partial = INTERNAL_SIGNAL_ID_BITMASK | 77;
    let schemes = schemes([Scheme::new("s1").with_signal(unknown_partial).with_signal(7)]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    assert!(dictionaries.can_raw().signal_ids_to_collect.contains(&7));
    assert_eq!(dictionaries.can_raw().channels[&3].len(), 1);
}

#[test]
fn unknown_interface_is_skipped() {
    let (manifest, translator) = single_can_signal_fixture();
    let schemes = schemes([Scheme::new("s1").with_raw_frame(0x200, "can9")]);

    let dictionaries = extract(&schemes, &manifest, &translator);

    assert!(dictionaries.can_raw().is_empty());
}

#[test]
fn determinism_across_repeated_passes() {
    let (manifest, translator) = single_can_signal_fixture();
    let schemes = schemes([Scheme::new("s1")
        .with_signal(7)
        .with_raw_frame(0x100, "can0")]);

    let first = extract(&schemes, &manifest, &translator);
    let second = extract(&schemes, &manifest, &translator);
    assert_eq!(first, second);
}
