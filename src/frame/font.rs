//! Glyph extraction from a controller firmware dump
//!
//! The stock firmware carries a complete bitmap font: 256 records of one
//! digit's worth of bits each, starting 1 KiB into the image, indexed by
//! character code. The ordering happens to line up with ASCII and Latin-1,
//! so text maps straight onto record indices. Records are stored in the
//! per-digit region split the panels expect (upper bits first, then lower),
//! which means rendering a glyph never touches the segment tables.

use std::path::Path;

use crate::device::protocol::DIGIT_BITS;
use crate::error::{ChainError, Result};
use crate::frame::codec;
use crate::frame::window::Window;

/// Where the glyph table starts inside the firmware image.
const GLYPH_TABLE_OFFSET: usize = 0x400;
/// Records in the table, one per character code.
const GLYPH_COUNT: usize = 256;
/// Bytes the packed table occupies.
const GLYPH_TABLE_BYTES: usize = GLYPH_COUNT * DIGIT_BITS / 8;

/// Bitmap font sliced out of a firmware dump.
///
/// Read-only once loaded; `glyph` hands out direct slices of the expanded
/// bit table.
pub struct Font {
    bits: Vec<bool>,
}

impl Font {
    /// Slice the glyph table out of a firmware image.
    pub fn load(firmware: &[u8]) -> Result<Self> {
        let needed = GLYPH_TABLE_OFFSET + GLYPH_TABLE_BYTES;
        if firmware.len() < needed {
            return Err(ChainError::TruncatedFirmware {
                len: firmware.len(),
                needed,
            });
        }
        let table = &firmware[GLYPH_TABLE_OFFSET..needed];
        Ok(Self {
            bits: codec::unpack_msb_first(table),
        })
    }

    /// Load a firmware dump from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(&std::fs::read(path)?)
    }

    /// The record for one character code.
    pub fn glyph(&self, code: usize) -> Result<&[bool]> {
        if code >= GLYPH_COUNT {
            return Err(ChainError::OutOfRange { code });
        }
        Ok(&self.bits[code * DIGIT_BITS..(code + 1) * DIGIT_BITS])
    }

    /// Draw one glyph onto one digit of a window.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is beyond the window's chain.
    pub fn render_glyph(&self, window: &mut Window, digit: usize, code: usize) -> Result<()> {
        window.write_glyph_bits(digit, self.glyph(code)?);
        Ok(())
    }

    /// Draw a string across the chain, one char per digit from the left.
    ///
    /// Chars map to records by code point, so ASCII and Latin-1 work as-is;
    /// anything beyond comes back as `OutOfRange`.
    ///
    /// # Panics
    ///
    /// Panics if the text holds more chars than the chain has digits.
    pub fn render_text(&self, window: &mut Window, text: &str) -> Result<()> {
        let digits = window.digits();
        assert!(
            text.chars().count() <= digits,
            "text does not fit a {digits}-digit chain"
        );
        for (digit, ch) in text.chars().enumerate() {
            self.render_glyph(window, digit, ch as usize)?;
        }
        Ok(())
    }
}
