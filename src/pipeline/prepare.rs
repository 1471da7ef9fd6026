//! Colour reduction applied before scanning

use image::{DynamicImage, Rgba, RgbaImage};

use crate::preset::{ConversionType, MonochromeType, PrepareOptions};

/// 4x4 Bayer threshold matrix
const BAYER: [[u32; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Reduce colours according to the conversion type, then optionally invert
pub fn prepare(image: &DynamicImage, options: &PrepareOptions) -> DynamicImage {
    let mut rgba = image.to_rgba8();

    match options.conv_type {
        ConversionType::Monochrome => match options.mono_type {
            MonochromeType::Edge => edge(&mut rgba, options.edge),
            MonochromeType::DiffuseDither => diffuse_dither(&mut rgba, options.edge),
            MonochromeType::OrderedDither => ordered_dither(&mut rgba),
        },
        ConversionType::Grayscale => {
            for p in rgba.pixels_mut() {
                let level = luma(p);
                set_level(p, level);
            }
        }
        ConversionType::Color => {}
    }

    if options.inverse {
        for p in rgba.pixels_mut() {
            for c in &mut p.0[..3] {
                *c = 255 - *c;
            }
        }
    }

    DynamicImage::ImageRgba8(rgba)
}

/// ITU-R BT.601 luma
fn luma(p: &Rgba<u8>) -> u8 {
    let [r, g, b, _] = p.0;
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000) as u8
}

fn set_level(p: &mut Rgba<u8>, level: u8) {
    p.0[0] = level;
    p.0[1] = level;
    p.0[2] = level;
}

fn black_or_white(level: u32, edge: u8) -> u8 {
    if level >= u32::from(edge) {
        255
    } else {
        0
    }
}

fn edge(rgba: &mut RgbaImage, edge: u8) {
    for p in rgba.pixels_mut() {
        let level = black_or_white(u32::from(luma(p)), edge);
        set_level(p, level);
    }
}

fn ordered_dither(rgba: &mut RgbaImage) {
    for (x, y, p) in rgba.enumerate_pixels_mut() {
        let threshold = BAYER[(y % 4) as usize][(x % 4) as usize] * 16 + 8;
        let level = if u32::from(luma(p)) >= threshold { 255 } else { 0 };
        set_level(p, level);
    }
}

/// Floyd-Steinberg error diffusion
fn diffuse_dither(rgba: &mut RgbaImage, edge: u8) {
    let (width, height) = rgba.dimensions();
    let (w, h) = (width as usize, height as usize);
    let mut levels: Vec<i32> = rgba.pixels().map(|p| i32::from(luma(p))).collect();

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let old = levels[i];
            let new = if old >= i32::from(edge) { 255 } else { 0 };
            let error = old - new;
            levels[i] = new;

            let mut spread = |dx: isize, dy: usize, weight: i32| {
                let nx = x as isize + dx;
                let ny = y + dy;
                if nx >= 0 && (nx as usize) < w && ny < h {
                    levels[ny * w + nx as usize] += error * weight / 16;
                }
            };
            spread(1, 0, 7);
            spread(-1, 1, 3);
            spread(0, 1, 5);
            spread(1, 1, 1);
        }
    }

    for (p, level) in rgba.pixels_mut().zip(levels) {
        set_level(p, level.clamp(0, 255) as u8);
    }
}
