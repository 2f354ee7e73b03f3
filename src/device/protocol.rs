//! Panel-chain wire geometry
//!
//! A frame is clocked into the chain as one long bitstream; each panel
//! shifts bits through to the next, so the last physical panel receives its
//! bits first. Within a panel the stream enters near the bottom right corner
//! and circles around the four digits:
//!
//! ```text
//! +---+---+---+---+
//! | 3 | 2 | 1 | 0 |   upper digit regions, clocked right to left
//! | 3 | 2 | 1 | 0 |
//! | 4 | 5 | 6 | 7 |   lower digit regions, clocked left to right
//! +---+---+---+---+
//! ```
//!
//! Region 0 takes the first bits of the panel's block, region 7 the last.
//! "Circles around" is only roughly true: a handful of segments displayed in
//! the upper rows are fed through lower-region lanes (a5, b0, d1, e0), which
//! the segment tables account for.
//!
//! Lane numbering in the firmware runs against the clock-in direction, so a
//! segment's lane offset is flipped before any region math. Three independent
//! direction reversals meet here — the lane flip, the per-region digit
//! direction, and the chain order — and a sign error in any one of them
//! scrambles specific rows while leaving the rest looking fine.

use super::segments::SegmentCoord;

/// Digits on one panel.
pub const DIGITS_PER_PANEL: usize = 4;
/// Bits in a lane.
pub const LANE_BITS: usize = 8;
/// Bits in a digit's upper region: 6 grid rows plus the top strip.
pub const UPPER_DIGIT_BITS: usize = 80;
/// Bits in a digit's lower region: the remaining 4 grid rows.
pub const LOWER_DIGIT_BITS: usize = 40;
/// Bits in one digit's full memory region.
pub const DIGIT_BITS: usize = UPPER_DIGIT_BITS + LOWER_DIGIT_BITS;
/// Bits in one panel's block of the stream.
pub const BITS_PER_PANEL: usize = DIGITS_PER_PANEL * DIGIT_BITS;

/// Absolute position of one segment's bit in the outgoing bitstream.
///
/// `digit` counts left to right across the whole chain; `panels` is the
/// chain length. Pure in its inputs — the same segment always lands on the
/// same bit.
///
/// # Panics
///
/// Panics if `panels` is zero or `digit` is beyond the chain.
pub fn resolve(panels: usize, digit: usize, seg: SegmentCoord) -> usize {
    assert!(panels > 0, "chain needs at least one panel");
    assert!(
        digit < panels * DIGITS_PER_PANEL,
        "digit {digit} beyond a {panels}-panel chain"
    );
    debug_assert!((seg.bit as usize) < LANE_BITS);

    let local = digit % DIGITS_PER_PANEL;
    let panel = digit / DIGITS_PER_PANEL;
    // the chain's last physical panel gets its bits first
    let panel_offset = (panels - 1 - panel) * BITS_PER_PANEL;

    // lanes were numbered against the clock-in direction; flip back
    let mut offset = DIGIT_BITS - 1 - (LANE_BITS * seg.label.index() + seg.bit as usize);

    let digit_offset = if offset < UPPER_DIGIT_BITS {
        // upper region: rightmost digit is clocked in first
        (DIGITS_PER_PANEL - 1 - local) * UPPER_DIGIT_BITS
    } else {
        // lower region: follows all four upper regions, leftmost digit first
        offset -= UPPER_DIGIT_BITS;
        DIGITS_PER_PANEL * UPPER_DIGIT_BITS + local * LOWER_DIGIT_BITS
    };

    panel_offset + digit_offset + offset
}

/// Bitstream offsets of a digit's upper and lower regions.
///
/// Glyph records are stored in this split already, so writing one means two
/// straight copies at these offsets.
///
/// # Panics
///
/// Panics if `panels` is zero or `digit` is beyond the chain.
pub fn region_offsets(panels: usize, digit: usize) -> (usize, usize) {
    assert!(panels > 0, "chain needs at least one panel");
    assert!(
        digit < panels * DIGITS_PER_PANEL,
        "digit {digit} beyond a {panels}-panel chain"
    );

    let local = digit % DIGITS_PER_PANEL;
    let panel = digit / DIGITS_PER_PANEL;
    let panel_offset = (panels - 1 - panel) * BITS_PER_PANEL;

    let upper = panel_offset + (DIGITS_PER_PANEL - 1 - local) * UPPER_DIGIT_BITS;
    let lower = panel_offset + DIGITS_PER_PANEL * UPPER_DIGIT_BITS + local * LOWER_DIGIT_BITS;
    (upper, lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::segments::Label;

    fn coord(label: Label, bit: u8) -> SegmentCoord {
        SegmentCoord { label, bit }
    }

    const LANES: [Label; 15] = [
        Label::A,
        Label::B,
        Label::C,
        Label::D,
        Label::E,
        Label::F,
        Label::G,
        Label::H,
        Label::I,
        Label::J,
        Label::K,
        Label::L,
        Label::M,
        Label::N,
        Label::O,
    ];

    #[test]
    fn test_lane_a_lands_at_stream_tail() {
        // lane A sits last in clock order, so on the rightmost digit of a
        // single panel its bit 0 is the final bit of the frame
        assert_eq!(resolve(1, 3, coord(Label::A, 0)), 479);
        assert_eq!(resolve(1, 3, coord(Label::A, 7)), 472);
    }

    #[test]
    fn test_upper_digits_run_right_to_left() {
        // lane O is deep in the upper region; moving one digit left moves
        // the address one upper block later
        let d0 = resolve(1, 0, coord(Label::O, 7));
        let d1 = resolve(1, 1, coord(Label::O, 7));
        assert_eq!(d0, d1 + UPPER_DIGIT_BITS);
    }

    #[test]
    fn test_lower_digits_run_left_to_right() {
        let d0 = resolve(1, 0, coord(Label::A, 0));
        let d1 = resolve(1, 1, coord(Label::A, 0));
        assert_eq!(d1, d0 + LOWER_DIGIT_BITS);
    }

    #[test]
    fn test_region_boundary() {
        // lane F bit 0 flips to offset 79, the last upper bit; lane E bit 7
        // flips to 80, the first lower bit
        let upper_edge = resolve(1, 0, coord(Label::F, 0));
        let lower_edge = resolve(1, 0, coord(Label::E, 7));
        assert_eq!(upper_edge, 3 * UPPER_DIGIT_BITS + 79);
        assert_eq!(lower_edge, 4 * UPPER_DIGIT_BITS);
    }

    #[test]
    fn test_resolve_depends_only_on_inputs() {
        for label in LANES {
            for bit in 0..8 {
                let first = resolve(2, 5, coord(label, bit));
                assert_eq!(first, resolve(2, 5, coord(label, bit)));
            }
        }
    }

    #[test]
    fn test_every_segment_gets_a_distinct_bit() {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        for digit in 0..2 * DIGITS_PER_PANEL {
            for label in LANES {
                for bit in 0..8u8 {
                    let addr = resolve(2, digit, coord(label, bit));
                    assert!(addr < 2 * BITS_PER_PANEL);
                    assert!(seen.insert(addr), "address {addr} hit twice");
                }
            }
        }
        assert_eq!(seen.len(), 2 * BITS_PER_PANEL);
    }

    #[test]
    fn test_panels_chain_in_reverse() {
        // logical panel 0 occupies the second block of a two-panel frame,
        // and the second logical panel's first digit lands in the first
        for label in LANES {
            for bit in 0..8 {
                assert!(resolve(2, 0, coord(label, bit)) >= BITS_PER_PANEL);
                assert!(resolve(2, DIGITS_PER_PANEL, coord(label, bit)) < BITS_PER_PANEL);
            }
        }
    }

    #[test]
    fn test_region_offsets_match_resolve() {
        // lane O bit 7 flips to offset 0 of the upper region, lane E bit 7
        // to offset 0 of the lower region
        for panels in 1..=3 {
            for digit in 0..panels * DIGITS_PER_PANEL {
                let (upper, lower) = region_offsets(panels, digit);
                assert_eq!(upper, resolve(panels, digit, coord(Label::O, 7)));
                assert_eq!(lower, resolve(panels, digit, coord(Label::E, 7)));
            }
        }
    }

    #[test]
    #[should_panic(expected = "beyond a 1-panel chain")]
    fn test_digit_beyond_chain_panics() {
        resolve(1, DIGITS_PER_PANEL, coord(Label::A, 0));
    }
}
