//! Pixel extraction in scan order

use image::{DynamicImage, Rgba};

use crate::preset::{LineDirection, MatrixOptions, PrepareOptions};

use super::PixelData;

fn argb(p: &Rgba<u8>) -> u32 {
    let [r, g, b, a] = p.0;
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Read ARGB words line by line in the configured scan order
///
/// With band scanning the in-line axis is cut into bands of `band_width`
/// pixels and each band is scanned completely before the next one. Positions
/// past the image edge in the last band read as zero.
pub fn extract(image: &DynamicImage, options: &PrepareOptions) -> PixelData {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let vertical = options.scan_main.is_vertical();
    let (line_count, line_len) = if vertical {
        (width, height)
    } else {
        (height, width)
    };

    let mut lines: Vec<u32> = (0..line_count).collect();
    if options.scan_main.is_reversed() {
        lines.reverse();
    }

    let mut along: Vec<u32> = (0..line_len).collect();
    if options.scan_sub == LineDirection::Backward {
        along.reverse();
    }

    let band = if options.band_scanning && options.band_width > 0 {
        options.band_width
    } else {
        line_len
    };

    let mut data = PixelData {
        samples: Vec::new(),
        width: band,
        height: 0,
    };
    if band == 0 {
        return data;
    }

    for chunk in along.chunks(band as usize) {
        for &line in &lines {
            for k in 0..band as usize {
                let value = chunk.get(k).map_or(0, |&pos| {
                    let (x, y) = if vertical { (line, pos) } else { (pos, line) };
                    argb(rgba.get_pixel(x, y))
                });
                data.samples.push(value);
            }
            data.height += 1;
        }
    }

    data
}

/// Apply the matrix operations and the AND / OR masks to every sample
pub fn process(data: PixelData, matrix: &MatrixOptions) -> PixelData {
    let samples = data
        .samples
        .iter()
        .map(|&value| {
            let combined = if matrix.operations.is_empty() {
                value
            } else {
                matrix
                    .operations
                    .iter()
                    .fold(0, |acc, op| acc | op.apply(value))
            };
            (combined & matrix.mask_and) | matrix.mask_or
        })
        .collect();

    PixelData { samples, ..data }
}
