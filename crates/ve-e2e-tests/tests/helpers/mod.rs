//! Shared manifest/scheme fixtures for the end-to-end extraction tests.

use ve_dictionary::StaticChannelTranslator;
use ve_protocol::{
    CanMessageFormat, CanSignalFormat, ComplexDataType, PidDecoderFormat, StaticDecoderManifest,
};

/// Manifest + translator for scenarios 1-3 and 7-9: one CAN signal (7) and
/// its frame (0x100) on interface "can0" (channel 3).
pub fn single_can_signal_fixture() -> (StaticDecoderManifest, StaticChannelTranslator) {
    let manifest = StaticDecoderManifest::builder()
        .can_signal(7, 0x100, "can0")
        .can_message(
            0x100,
            "can0",
            CanMessageFormat {
                message_id: 0x100,
                size_in_bytes: 8,
                signals: vec![CanSignalFormat {
                    signal_id: 7,
                    first_bit_position: 0,
                    size_in_bits: 16,
                    factor: 1.0,
                    offset: 0.0,
                }],
            },
        )
        .build();
    let translator = StaticChannelTranslator::from_pairs([("can0", 3)]);
    (manifest, translator)
}

/// Manifest for scenario 4: two OBD signals sharing PID 0x0C.
pub fn obd_pid_merge_fixture() -> StaticDecoderManifest {
    StaticDecoderManifest::builder()
        .obd_signal(
            11,
            PidDecoderFormat {
                pid: 0x0C,
                start_byte: 0,
                bit_right_shift: 0,
                byte_length: 2,
                bit_mask_length: 8,
                scaling: 1.0,
                offset: 0.0,
                response_length: 8,
            },
        )
        .obd_signal(
            12,
            PidDecoderFormat {
                pid: 0x0C,
                start_byte: 2,
                bit_right_shift: 0,
                byte_length: 2,
                bit_mask_length: 8,
                scaling: 1.0,
                offset: 0.0,
                response_length: 8,
            },
        )
        .build()
}

/// Manifest for scenarios 5-6: complex signal 200 on "ros2"/"/objects",
/// rooted at an Array<Struct{Primitive, Primitive}> (T1 -> T2 -> T3, T4).
pub fn complex_signal_fixture() -> StaticDecoderManifest {
    StaticDecoderManifest::builder()
        .complex_signal(200, "ros2", "/objects", 1)
        .complex_type(1, ComplexDataType::Array { element_type_id: 2 })
        .complex_type(
            2,
            ComplexDataType::Struct {
                member_type_ids: vec![3, 4],
            },
        )
        .complex_type(3, ComplexDataType::Primitive)
        .complex_type(4, ComplexDataType::Primitive)
        .build()
}
