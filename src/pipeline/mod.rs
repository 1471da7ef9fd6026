//! Pixel pipeline turning an image into packed data words
//!
//! Each stage takes the previous stage's value and returns a new one:
//! prepare → extract → process → pack → reorder → compress, followed by
//! `format` which renders the words as numeric literals.

mod format;
mod pack;
mod prepare;
mod rle;
mod scan;

use image::DynamicImage;
use thiserror::Error;

use crate::preset::Preset;

/// Errors raised by pipeline stages
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The used-bits mask selects nothing, so no data can be packed
    #[error("matrix mask selects no bits")]
    EmptyMask,

    /// Failure reported by a custom pipeline
    #[error("pixel pipeline failed: {0}")]
    Stage(String),
}

/// Row-major words plus the dimensions they are laid out in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelData {
    pub samples: Vec<u32>,
    pub width: u32,
    pub height: u32,
}

/// The conversion stages consumed by the images table
pub trait PixelPipeline {
    fn prepare(&self, image: &DynamicImage, preset: &Preset) -> Result<DynamicImage, PipelineError>;

    fn extract_pixels(&self, image: &DynamicImage, preset: &Preset) -> Result<PixelData, PipelineError>;

    fn process_pixels(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError>;

    fn pack(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError>;

    fn reorder(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError>;

    fn compress(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError>;

    fn format(&self, data: &PixelData, preset: &Preset, radix_prefix: &str) -> String;

    /// Run every stage up to and including compression
    fn convert(&self, image: &DynamicImage, preset: &Preset) -> Result<PixelData, PipelineError> {
        let prepared = self.prepare(image, preset)?;
        let data = self.extract_pixels(&prepared, preset)?;
        let data = self.process_pixels(data, preset)?;
        let data = self.pack(data, preset)?;
        let data = self.reorder(data, preset)?;
        self.compress(data, preset)
    }
}

/// The built-in pipeline driven entirely by the preset
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPipeline;

impl PixelPipeline for StandardPipeline {
    fn prepare(&self, image: &DynamicImage, preset: &Preset) -> Result<DynamicImage, PipelineError> {
        Ok(prepare::prepare(image, &preset.prepare))
    }

    fn extract_pixels(&self, image: &DynamicImage, preset: &Preset) -> Result<PixelData, PipelineError> {
        Ok(scan::extract(image, &preset.prepare))
    }

    fn process_pixels(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError> {
        Ok(scan::process(data, &preset.matrix))
    }

    fn pack(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError> {
        pack::pack(data, preset.matrix.mask_used, preset.image.block_size)
    }

    fn reorder(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError> {
        Ok(pack::reorder(data, preset.image.block_size, preset.image.bytes_order))
    }

    fn compress(&self, data: PixelData, preset: &Preset) -> Result<PixelData, PipelineError> {
        if preset.image.compression_rle {
            Ok(rle::compress(data))
        } else {
            Ok(data)
        }
    }

    fn format(&self, data: &PixelData, preset: &Preset, radix_prefix: &str) -> String {
        format::format(data, preset.image.block_size, preset.image.split_to_rows, radix_prefix)
    }
}
