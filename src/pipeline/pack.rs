//! Bit packing into data words and byte reordering

use crate::preset::{BlockSize, BytesOrder};

use super::{PipelineError, PixelData};

/// Pack the bits selected by `mask_used` into words of `block` bits
///
/// Bits are taken from the highest selected bit down and fill each word from
/// its most significant bit. Every scan line starts a new word; the last word
/// of a line is padded with zeros.
pub fn pack(data: PixelData, mask_used: u32, block: BlockSize) -> Result<PixelData, PipelineError> {
    let bits: Vec<u32> = (0..32u32).rev().filter(|bit| mask_used & (1u32 << *bit) != 0).collect();
    if bits.is_empty() {
        return Err(PipelineError::EmptyMask);
    }

    let block_bits = block.bits();
    let mut words = Vec::new();
    let mut width = 0;

    if data.width > 0 {
        for line in data.samples.chunks(data.width as usize) {
            let start = words.len();
            let mut acc: u64 = 0;
            let mut filled = 0;

            for &sample in line {
                for &bit in &bits {
                    acc = (acc << 1) | u64::from((sample >> bit) & 1);
                    filled += 1;
                    if filled == block_bits {
                        words.push(acc as u32);
                        acc = 0;
                        filled = 0;
                    }
                }
            }
            if filled > 0 {
                words.push((acc << (block_bits - filled)) as u32);
            }

            width = words.len() - start;
        }
    }

    Ok(PixelData {
        samples: words,
        width: width as u32,
        height: data.height,
    })
}

/// Swap bytes inside multi-byte words for little-endian output
pub fn reorder(data: PixelData, block: BlockSize, order: BytesOrder) -> PixelData {
    if order == BytesOrder::BigEndian || block.bytes() == 1 {
        return data;
    }

    let shift = 32 - block.bits();
    PixelData {
        samples: data.samples.iter().map(|v| v.swap_bytes() >> shift).collect(),
        ..data
    }
}
