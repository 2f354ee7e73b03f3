//! One frame's worth of segment state across the chain
//!
//! A `Window` owns the raw bit buffer that eventually goes over the wire.
//! Every mutation routes through the offset resolver, so callers think in
//! digits and grid cells and never see the wiring. The usual pattern is
//! build, draw, blit, discard; nothing here is retained between frames.

use crate::device::protocol::{
    self, BITS_PER_PANEL, DIGITS_PER_PANEL, DIGIT_BITS, LOWER_DIGIT_BITS, UPPER_DIGIT_BITS,
};
use crate::device::segments::{self, segments_for, SegmentCoord, GRID_HEIGHT, GRID_WIDTH};

/// In-memory bit buffer for one full frame across all chained panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    panels: usize,
    bits: Vec<bool>,
}

impl Window {
    /// An all-dark frame for a chain of `panels` panels.
    ///
    /// # Panics
    ///
    /// Panics if `panels` is zero.
    pub fn new(panels: usize) -> Self {
        assert!(panels > 0, "chain needs at least one panel");
        Self {
            panels,
            bits: vec![false; panels * BITS_PER_PANEL],
        }
    }

    /// Chain length this frame was built for.
    pub fn panels(&self) -> usize {
        self.panels
    }

    /// Digits across the whole chain.
    pub fn digits(&self) -> usize {
        self.panels * DIGITS_PER_PANEL
    }

    /// The raw bit buffer in wire order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Darken the whole frame.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Set one physical segment of one digit.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is beyond the chain.
    pub fn set_segment(&mut self, digit: usize, seg: SegmentCoord, on: bool) {
        let addr = protocol::resolve(self.panels, digit, seg);
        self.bits[addr] = on;
    }

    /// Set one grid cell of one digit, lighting every segment behind it.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is beyond the chain or the cell is outside the grid.
    pub fn set_pixel(&mut self, digit: usize, col: usize, row: usize, on: bool) {
        for &seg in segments_for(col, row) {
            self.set_segment(digit, seg, on);
        }
    }

    /// Set one cell of the strip above the grid.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is beyond the chain or `col` is not below 5.
    pub fn set_marker(&mut self, digit: usize, col: usize, on: bool) {
        self.set_segment(digit, segments::top_segment(col), on);
    }

    /// Set a whole grid row of one digit.
    pub fn fill_row(&mut self, digit: usize, row: usize, on: bool) {
        for col in 0..GRID_WIDTH {
            self.set_pixel(digit, col, row, on);
        }
    }

    /// Set a whole grid column of one digit.
    pub fn fill_column(&mut self, digit: usize, col: usize, on: bool) {
        for row in 0..GRID_HEIGHT {
            self.set_pixel(digit, col, row, on);
        }
    }

    /// Light every mapped segment of every digit, top strip included.
    pub fn fill_all(&mut self) {
        for digit in 0..self.digits() {
            for row in 0..GRID_HEIGHT {
                self.fill_row(digit, row, true);
            }
            for col in 0..GRID_WIDTH {
                self.set_marker(digit, col, true);
            }
        }
    }

    /// Write a pre-sliced glyph record straight into one digit's regions.
    ///
    /// The record is already in on-wire bit order for the digit — upper
    /// region first, lower region after — so this bypasses the per-segment
    /// lookup and copies at the two region offsets.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is beyond the chain or the record is not exactly
    /// one digit's worth of bits.
    pub fn write_glyph_bits(&mut self, digit: usize, record: &[bool]) {
        assert_eq!(
            record.len(),
            DIGIT_BITS,
            "glyph record must be {DIGIT_BITS} bits"
        );
        let (upper, lower) = protocol::region_offsets(self.panels, digit);
        self.bits[upper..upper + UPPER_DIGIT_BITS].copy_from_slice(&record[..UPPER_DIGIT_BITS]);
        self.bits[lower..lower + LOWER_DIGIT_BITS].copy_from_slice(&record[UPPER_DIGIT_BITS..]);
    }
}
