//! Option sections of a conversion preset

use std::path::PathBuf;

use serde::Deserialize;

/// How source pixels are reduced before packing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversionType {
    #[default]
    Monochrome,
    Grayscale,
    Color,
}

impl ConversionType {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            ConversionType::Monochrome => "Monochrome",
            ConversionType::Grayscale => "Grayscale",
            ConversionType::Color => "Color",
        }
    }
}

/// Black/white reduction method for monochrome conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonochromeType {
    #[default]
    Edge,
    DiffuseDither,
    OrderedDither,
}

impl MonochromeType {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            MonochromeType::Edge => "Edge",
            MonochromeType::DiffuseDither => "Diffuse Dither",
            MonochromeType::OrderedDither => "Ordered Dither",
        }
    }
}

/// Order in which scan lines are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanDirection {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl ScanDirection {
    pub fn label(self) -> &'static str {
        match self {
            ScanDirection::TopToBottom => "top to bottom",
            ScanDirection::BottomToTop => "bottom to top",
            ScanDirection::LeftToRight => "left to right",
            ScanDirection::RightToLeft => "right to left",
        }
    }

    /// Whether scan lines are image columns
    pub fn is_vertical(self) -> bool {
        matches!(self, ScanDirection::LeftToRight | ScanDirection::RightToLeft)
    }

    /// Whether lines are visited from the far edge back to the origin
    pub fn is_reversed(self) -> bool {
        matches!(self, ScanDirection::BottomToTop | ScanDirection::RightToLeft)
    }
}

/// Order of pixels inside one scan line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineDirection {
    #[default]
    Forward,
    Backward,
}

impl LineDirection {
    pub fn label(self) -> &'static str {
        match self {
            LineDirection::Forward => "forward",
            LineDirection::Backward => "backward",
        }
    }
}

/// Byte order inside a data word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BytesOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl BytesOrder {
    pub fn label(self) -> &'static str {
        match self {
            BytesOrder::LittleEndian => "little-endian",
            BytesOrder::BigEndian => "big-endian",
        }
    }
}

/// Width of one emitted data word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(try_from = "u32")]
pub enum BlockSize {
    #[default]
    Bits8,
    Bits16,
    Bits24,
    Bits32,
}

impl BlockSize {
    /// Position in the list of supported sizes
    pub fn index(self) -> u32 {
        match self {
            BlockSize::Bits8 => 0,
            BlockSize::Bits16 => 1,
            BlockSize::Bits24 => 2,
            BlockSize::Bits32 => 3,
        }
    }

    pub fn bits(self) -> u32 {
        (self.index() + 1) * 8
    }

    pub fn bytes(self) -> u32 {
        self.index() + 1
    }
}

impl TryFrom<u32> for BlockSize {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(BlockSize::Bits8),
            16 => Ok(BlockSize::Bits16),
            24 => Ok(BlockSize::Bits24),
            32 => Ok(BlockSize::Bits32),
            other => Err(format!("unsupported block size {other}, expected 8, 16, 24 or 32")),
        }
    }
}

/// Image preparation and scanning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    pub conv_type: ConversionType,
    pub mono_type: MonochromeType,
    /// Luma threshold for monochrome conversion
    pub edge: u8,
    pub scan_main: ScanDirection,
    pub scan_sub: LineDirection,
    pub inverse: bool,
    pub band_scanning: bool,
    pub band_width: u32,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            conv_type: ConversionType::Monochrome,
            mono_type: MonochromeType::Edge,
            edge: 128,
            scan_main: ScanDirection::TopToBottom,
            scan_sub: LineDirection::Forward,
            inverse: false,
            band_scanning: false,
            band_width: 8,
        }
    }
}

/// One masked shift applied to every pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatrixOperation {
    pub mask: u32,
    #[serde(default)]
    pub shift: u32,
    /// Shift left instead of right
    #[serde(default)]
    pub left: bool,
}

impl MatrixOperation {
    pub fn new(mask: u32, shift: u32, left: bool) -> Self {
        Self { mask, shift, left }
    }

    pub fn apply(&self, value: u32) -> u32 {
        let masked = value & self.mask;
        if self.left {
            masked.checked_shl(self.shift).unwrap_or(0)
        } else {
            masked.checked_shr(self.shift).unwrap_or(0)
        }
    }
}

/// Bit selection applied to each pixel value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatrixOptions {
    /// Bits of the processed value that are packed into the output
    pub mask_used: u32,
    pub mask_and: u32,
    pub mask_or: u32,
    pub operations: Vec<MatrixOperation>,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            mask_used: 0x0000_0001,
            mask_and: 0xffff_ffff,
            mask_or: 0,
            operations: vec![MatrixOperation::new(0x0000_0001, 0, false)],
        }
    }
}

impl MatrixOptions {
    /// Number of bits emitted per pixel
    pub fn bits_per_pixel(&self) -> u32 {
        self.mask_used.count_ones()
    }
}

/// Output word layout
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct ImageOptions {
    pub block_size: BlockSize,
    pub bytes_order: BytesOrder,
    pub split_to_rows: bool,
    pub compression_rle: bool,
}

/// Character code options for font conversion
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    pub bom: bool,
    pub encoding: String,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            bom: false,
            encoding: "UTF-8".to_string(),
        }
    }
}

/// User template files, used instead of the built-in bodies when present
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct TemplateOptions {
    pub image: Option<PathBuf>,
    pub font: Option<PathBuf>,
}
