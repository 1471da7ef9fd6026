//! Conversion presets
//!
//! A preset bundles every parameter of a conversion: preparation and scan
//! order, the pixel bit matrix, output word layout, character encoding and
//! template locations. Presets are read from TOML; all fields are optional.
//!
//! ```toml
//! name = "lcd_128x64"
//!
//! [prepare]
//! conv_type = "monochrome"
//! scan_main = "left_to_right"
//! band_scanning = true
//! band_width = 8
//!
//! [image]
//! block_size = 8
//! bytes_order = "big_endian"
//!
//! [font]
//! encoding = "windows-1251"
//! ```

mod options;
mod tags;

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub use options::*;
pub use tags::build_tags;

/// Errors that can occur when loading presets
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read preset file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse preset TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("unknown built-in preset '{0}'")]
    UnknownPreset(String),
}

/// Names of the presets shipped with the crate
pub const BUILTIN_PRESETS: &[&str] = &[
    "monochrome",
    "grayscale_4",
    "grayscale_8",
    "color_r5g6b5",
    "color_r8g8b8",
];

/// A named set of conversion options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub name: String,
    pub prepare: PrepareOptions,
    pub matrix: MatrixOptions,
    pub image: ImageOptions,
    pub font: FontOptions,
    pub templates: TemplateOptions,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: "monochrome".to_string(),
            prepare: PrepareOptions::default(),
            matrix: MatrixOptions::default(),
            image: ImageOptions {
                split_to_rows: true,
                ..ImageOptions::default()
            },
            font: FontOptions::default(),
            templates: TemplateOptions::default(),
        }
    }
}

impl Preset {
    /// Load preset from TOML file
    ///
    /// A file without a `name` key is named after its stem.
    pub fn from_file(path: &Path) -> Result<Self, PresetError> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = content.parse()?;
        let named = table.contains_key("name");
        let mut preset: Preset = toml::Value::Table(table).try_into()?;
        if !named {
            if let Some(stem) = path.file_stem() {
                preset.name = stem.to_string_lossy().into_owned();
            }
        }
        Ok(preset)
    }

    /// Load preset from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PresetError> {
        Ok(toml::from_str(content)?)
    }

    /// One of the built-in presets
    pub fn builtin(name: &str) -> Result<Self, PresetError> {
        let base = Preset {
            name: name.to_string(),
            ..Preset::default()
        };

        let preset = match name {
            "monochrome" => base,
            "grayscale_4" => Preset {
                prepare: PrepareOptions {
                    conv_type: ConversionType::Grayscale,
                    ..PrepareOptions::default()
                },
                matrix: matrix(0x0000_000f, vec![MatrixOperation::new(0x0000_00f0, 4, false)]),
                ..base
            },
            "grayscale_8" => Preset {
                prepare: PrepareOptions {
                    conv_type: ConversionType::Grayscale,
                    ..PrepareOptions::default()
                },
                matrix: matrix(0x0000_00ff, vec![MatrixOperation::new(0x0000_00ff, 0, false)]),
                ..base
            },
            "color_r5g6b5" => Preset {
                prepare: PrepareOptions {
                    conv_type: ConversionType::Color,
                    ..PrepareOptions::default()
                },
                matrix: matrix(
                    0x0000_ffff,
                    vec![
                        MatrixOperation::new(0x00f8_0000, 8, false),
                        MatrixOperation::new(0x0000_fc00, 5, false),
                        MatrixOperation::new(0x0000_00f8, 3, false),
                    ],
                ),
                image: ImageOptions {
                    block_size: BlockSize::Bits16,
                    ..base.image.clone()
                },
                ..base
            },
            "color_r8g8b8" => Preset {
                prepare: PrepareOptions {
                    conv_type: ConversionType::Color,
                    ..PrepareOptions::default()
                },
                matrix: matrix(0x00ff_ffff, vec![MatrixOperation::new(0x00ff_ffff, 0, false)]),
                image: ImageOptions {
                    block_size: BlockSize::Bits24,
                    ..base.image.clone()
                },
                ..base
            },
            other => return Err(PresetError::UnknownPreset(other.to_string())),
        };

        Ok(preset)
    }

    /// Resolve a built-in preset name or a TOML file path
    pub fn resolve(name_or_path: &str) -> Result<Self, PresetError> {
        if BUILTIN_PRESETS.contains(&name_or_path) {
            Self::builtin(name_or_path)
        } else {
            Self::from_file(Path::new(name_or_path))
        }
    }
}

fn matrix(mask_used: u32, operations: Vec<MatrixOperation>) -> MatrixOptions {
    MatrixOptions {
        mask_used,
        operations,
        ..MatrixOptions::default()
    }
}
