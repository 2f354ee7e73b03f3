//! Bit-level packing for the wire
//!
//! The chain takes frames as raw bytes with each byte's bits sent most
//! significant first. Packing only works on whole bytes; a frame is always
//! a multiple of 480 bits so a ragged buffer means a construction bug
//! upstream, surfaced as an error rather than padded over.

use crate::error::{ChainError, Result};

/// Pack a bit buffer into bytes, most significant bit first.
pub fn pack_msb_first(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(ChainError::InvalidLength { len: bits.len() });
    }
    Ok(bits
        .chunks_exact(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| if bit { byte | 0x80 >> i } else { byte })
        })
        .collect())
}

/// Expand bytes into individual bits, most significant bit first.
///
/// Exact inverse of [`pack_msb_first`].
pub fn unpack_msb_first(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |i| byte & (0x80 >> i) != 0))
        .collect()
}
