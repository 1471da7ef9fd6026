//! Run-length compression of packed words
//!
//! A run of 2 to 127 equal words becomes `count, word`. Other words are
//! grouped into literal stretches of up to 127 words, written as
//! `0x80 | length` followed by the words themselves.

use super::PixelData;

const MAX_RUN: usize = 127;
const LITERAL_FLAG: u32 = 0x80;

/// Compress all words into a single row
pub fn compress(data: PixelData) -> PixelData {
    let words = &data.samples;
    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        let run = words[i..]
            .iter()
            .take(MAX_RUN)
            .take_while(|w| **w == words[i])
            .count();

        if run >= 2 {
            out.push(run as u32);
            out.push(words[i]);
            i += run;
            continue;
        }

        let start = i;
        while i < words.len() && i - start < MAX_RUN && !starts_run(words, i) {
            i += 1;
        }
        out.push(LITERAL_FLAG | (i - start) as u32);
        out.extend_from_slice(&words[start..i]);
    }

    PixelData {
        width: out.len() as u32,
        height: u32::from(!out.is_empty()),
        samples: out,
    }
}

fn starts_run(words: &[u32], i: usize) -> bool {
    i + 1 < words.len() && words[i] == words[i + 1]
}
