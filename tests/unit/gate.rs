//! Length-safety gate.

use lanegate::gate::{gate, lt_mask, select_u16, select_usize, GateOutput};

#[test]
fn test_gate_table() {
    let cases = [
        // (length, offset, exclusion) -> (offset, exclusion)
        ((10, 0, 0b11), (0, 0)),
        ((10, 9, 0b11), (9, 0)),
        ((10, 10, 0b11), (0, 0b11)),
        ((10, 11, 0b01), (0, 0b01)),
        ((1, 0, 0xFFFF), (0, 0)),
        ((0, 0, 0b10), (0, 0b10)),
    ];
    for ((length, offset, exclusion), (safe, excluded)) in cases {
        assert_eq!(
            gate(length, offset, exclusion),
            GateOutput {
                offset: safe,
                exclusion: excluded
            },
            "gate({length}, {offset}, {exclusion:#b})"
        );
    }
}

#[test]
fn test_lt_mask_extremes() {
    assert_eq!(lt_mask(0, usize::MAX), usize::MAX);
    assert_eq!(lt_mask(usize::MAX, usize::MAX), 0);
    assert_eq!(lt_mask(usize::MAX, 0), 0);
}

#[test]
fn test_select_ignores_high_mask_bits_for_u16() {
    // Only the low 16 bits of the mask steer a u16 select.
    assert_eq!(select_u16(0xFFFF, 0x1234, 0xABCD), 0x1234);
    assert_eq!(select_u16(0xFFFF_0000, 0x1234, 0xABCD), 0xABCD);
    assert_eq!(select_usize(0, 1, 2), 2);
}
