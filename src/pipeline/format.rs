//! Numeric literal text for packed words

use crate::preset::BlockSize;

use super::PixelData;

/// Format words as `prefix` + zero padded hex, separated by `, `
///
/// With `split_to_rows` each row of `data.width` words goes on its own line
/// and rows are joined with `,\n`.
pub fn format(data: &PixelData, block: BlockSize, split_to_rows: bool, prefix: &str) -> String {
    let digits = (block.bits() / 4) as usize;
    let join = |words: &[u32]| {
        words
            .iter()
            .map(|w| format!("{}{:0width$x}", prefix, w, width = digits))
            .collect::<Vec<_>>()
            .join(", ")
    };

    if split_to_rows && data.width > 0 {
        data.samples
            .chunks(data.width as usize)
            .map(join)
            .collect::<Vec<_>>()
            .join(",\n")
    } else {
        join(&data.samples)
    }
}
