//! pixel-codegen - turn bitmaps and glyphs into source code
//!
//! This library renders a small template language into text describing pixel
//! data: tags are substituted from the conversion preset, and the
//! `images_table` block is expanded once per image or glyph.
//!
//! # Example
//!
//! ```rust
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use pixel_codegen::items::DataContainer;
//! use pixel_codegen::preset::Preset;
//! use pixel_codegen::template::Tags;
//! use pixel_codegen::render;
//!
//! let black = RgbaImage::from_pixel(8, 1, Rgba([0, 0, 0, 255]));
//! let items = DataContainer::new().with("A", DynamicImage::ImageRgba8(black));
//!
//! let out = render(
//!     "@start_block_images_table@@charText@: @imageData@@end_block_images_table@",
//!     &Tags::new(),
//!     &items,
//!     &Preset::default(),
//! )
//! .unwrap();
//! assert_eq!(out, "\nA: 0x00");
//! ```

pub mod encoding;
pub mod error;
pub mod items;
pub mod parser;
pub mod pipeline;
pub mod preset;
pub mod template;

use std::path::PathBuf;

pub use error::{EncodingError, ParseError};
pub use items::{DataContainer, ItemSource};
pub use parser::{parse, Template};
pub use pipeline::{PipelineError, PixelPipeline, StandardPipeline};
pub use preset::Preset;
pub use template::{Renderer, TemplateKind, Tags};

use thiserror::Error;

/// Errors that can occur while producing a document
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The item source listed a key it has no image for
    #[error("no image for item '{key}'")]
    MissingImage { key: String },

    /// The template file exists but could not be read
    #[error("error reading template file {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<Vec<ParseError>> for RenderError {
    fn from(errors: Vec<ParseError>) -> Self {
        RenderError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for a complete conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Conversion parameters
    pub preset: Preset,
    /// Image or font document
    pub kind: TemplateKind,
    /// Template file; overrides the preset's template for `kind`
    pub template_path: Option<PathBuf>,
    /// Extra tags such as `documentName`
    pub tags: Tags,
}

impl ConvertConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_kind(mut self, kind: TemplateKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name, value);
        self
    }

    /// Set `documentName` and `documentName_ws`
    pub fn with_document_name(mut self, name: &str) -> Self {
        self.tags.merge(template::document_tags(name));
        self
    }

    /// Template file to read: the explicit path, else the preset's entry for `kind`
    pub fn resolved_template_path(&self) -> Option<&std::path::Path> {
        let from_preset = match self.kind {
            TemplateKind::Image => self.preset.templates.image.as_deref(),
            TemplateKind::Font => self.preset.templates.font.as_deref(),
        };
        self.template_path.as_deref().or(from_preset)
    }
}

/// Render template source with the standard pixel pipeline
///
/// When `tags` has no `imageDataIndent`, it is taken from the whitespace in
/// front of `@imageData@` in `source`.
pub fn render(source: &str, tags: &Tags, items: &dyn ItemSource, preset: &Preset) -> Result<String, RenderError> {
    let template = parse(source)?;
    let mut tags = tags.clone();
    if !tags.contains("imageDataIndent") {
        if let Some(indent) = parser::image_data_indent(source) {
            tags.insert("imageDataIndent", indent);
        }
    }
    Renderer::new(items, &StandardPipeline, preset).render(&template, &tags)
}

/// Produce a complete document from `items` with the standard pipeline
pub fn convert(items: &dyn ItemSource, config: &ConvertConfig) -> Result<String, RenderError> {
    convert_with_pipeline(items, config, &StandardPipeline)
}

/// Produce a complete document from `items` with a custom pixel pipeline
pub fn convert_with_pipeline(
    items: &dyn ItemSource,
    config: &ConvertConfig,
    pipeline: &dyn PixelPipeline,
) -> Result<String, RenderError> {
    let path = config.resolved_template_path();
    let body = template::load_template(path, config.kind).map_err(|source| RenderError::TemplateRead {
        path: path.map(|p| p.to_path_buf()).unwrap_or_default(),
        source,
    })?;

    let mut tags = config.tags.clone();
    tags.insert("templateFile", body.origin.as_str());
    tags.insert(
        "imageDataIndent",
        parser::image_data_indent(&body.text)
            .unwrap_or_else(|| template::DEFAULT_IMAGE_DATA_INDENT.to_string()),
    );
    tags.merge(preset::build_tags(&config.preset));
    tags.insert("imagesCount", items.count().to_string());

    tracing::debug!(template = %body.origin, items = items.count(), preset = %config.preset.name, "converting");

    let template = parse(&body.text)?;
    Renderer::new(items, pipeline, &config.preset).render(&template, &tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_path_precedence() {
        let mut preset = Preset::default();
        preset.templates.font = Some(PathBuf::from("font.tmpl"));

        let config = ConvertConfig::new().with_preset(preset).with_kind(TemplateKind::Font);
        assert_eq!(config.resolved_template_path(), Some(std::path::Path::new("font.tmpl")));

        let config = config.with_template("mine.tmpl");
        assert_eq!(config.resolved_template_path(), Some(std::path::Path::new("mine.tmpl")));

        let config = config.with_kind(TemplateKind::Image);
        assert_eq!(config.resolved_template_path(), Some(std::path::Path::new("mine.tmpl")));
    }

    #[test]
    fn test_parse_error_message() {
        let err = render(
            "@start_block_a@@start_block_a@@end_block_a@@end_block_a@",
            &Tags::new(),
            &DataContainer::new(),
            &Preset::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Parse(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("parse errors: block 'a'"));
    }

    #[test]
    fn test_render_takes_indent_from_source() {
        let items = DataContainer::new().with(
            "A",
            image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
                8,
                2,
                image::Rgba([255, 255, 255, 255]),
            )),
        );
        let out = render(
            "@start_block_images_table@\n  @imageData@\n@end_block_images_table@",
            &Tags::new(),
            &items,
            &Preset::default(),
        )
        .unwrap();
        assert_eq!(out, "\n0xff,\n  0xff");
    }
}
