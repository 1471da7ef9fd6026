//! Rendering parsed templates against tags and an item source

use crate::encoding::hex_code;
use crate::items::ItemSource;
use crate::parser::lexer::{end_keyword, start_keyword};
use crate::parser::{Node, Spanned, Template};
use crate::pipeline::PixelPipeline;
use crate::preset::Preset;
use crate::RenderError;

use super::tags::{TagLookup, TagScope, Tags};

/// Prefix written in front of every numeric literal in `imageData`
pub const RADIX_PREFIX: &str = "0x";

/// Continuation indent for `imageData` when the template does not show one
pub const DEFAULT_IMAGE_DATA_INDENT: &str = "    ";

/// Walks a template tree, expanding the images table once per item
pub struct Renderer<'a> {
    items: &'a dyn ItemSource,
    pipeline: &'a dyn PixelPipeline,
    preset: &'a Preset,
}

impl<'a> Renderer<'a> {
    pub fn new(items: &'a dyn ItemSource, pipeline: &'a dyn PixelPipeline, preset: &'a Preset) -> Self {
        Self {
            items,
            pipeline,
            preset,
        }
    }

    /// Render the whole template in document order
    pub fn render(&self, template: &Template, tags: &Tags) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render_nodes(&template.nodes, tags, &mut out)?;
        Ok(out)
    }

    fn render_nodes(&self, nodes: &[Spanned<Node>], tags: &Tags, out: &mut String) -> Result<(), RenderError> {
        for node in nodes {
            match &node.node {
                Node::Text(text) => out.push_str(text),
                Node::Tag(name) => out.push_str(tags.resolve(name)),
                Node::StrayEnd(name) => out.push_str(tags.resolve(&end_keyword(name))),
                Node::Unclosed(_) => {}
                Node::Block(block) if block.is_images_table() => self.expand_items(&block.body, tags, out)?,
                Node::Block(block) => self.render_nodes(&block.body, tags, out)?,
            }
        }
        Ok(())
    }

    /// Render `body` once per item, each copy preceded by a newline
    fn expand_items(&self, body: &[Spanned<Node>], tags: &Tags, out: &mut String) -> Result<(), RenderError> {
        let keys = self.items.keys();
        let indent = format!(
            "\n{}",
            tags.get("imageDataIndent").unwrap_or(DEFAULT_IMAGE_DATA_INDENT)
        );
        let font = &self.preset.font;

        for (index, key) in keys.iter().enumerate() {
            let image = self
                .items
                .image(key)
                .ok_or_else(|| RenderError::MissingImage { key: key.to_string() })?;

            let mut scope = TagScope::new(tags);
            scope.set("imagesCount", keys.len().to_string());
            scope.set("width", image.width().to_string());
            scope.set("height", image.height().to_string());

            let data = self.pipeline.convert(image, self.preset)?;
            let literal = self.pipeline.format(&data, self.preset, RADIX_PREFIX);
            scope.set("blocksCount", data.samples.len().to_string());
            scope.set("imageData", literal.replace('\n', &indent));

            let char_code = match key.chars().next() {
                Some(ch) => hex_code(ch, &font.encoding, font.bom)?,
                None => String::new(),
            };
            scope.set("charCode", char_code);
            scope.set("comma", if index + 1 < keys.len() { "," } else { "" });
            scope.set("charText", char_text(key));

            tracing::debug!(key = %key, words = data.samples.len(), "expanded item");

            out.push('\n');
            substitute(body, &scope, out);
        }
        Ok(())
    }
}

/// Substitute tags without expanding blocks
///
/// Block markers are looked up as tags under their full keyword.
pub fn substitute(nodes: &[Spanned<Node>], tags: &impl TagLookup, out: &mut String) {
    for node in nodes {
        match &node.node {
            Node::Text(text) => out.push_str(text),
            Node::Tag(name) => out.push_str(tags.resolve(name)),
            Node::Block(block) => {
                out.push_str(tags.resolve(&start_keyword(&block.name)));
                substitute(&block.body, tags, out);
                out.push_str(tags.resolve(&end_keyword(&block.name)));
            }
            Node::Unclosed(name) => out.push_str(tags.resolve(&start_keyword(name))),
            Node::StrayEnd(name) => out.push_str(tags.resolve(&end_keyword(name))),
        }
    }
}

/// Display text for an item key
///
/// `@` would read as a marker in the generated comment, so keys containing
/// it are spelled out in full with `(a)` in its place.
fn char_text(key: &str) -> String {
    if key.contains('@') {
        key.replace('@', "(a)")
    } else {
        key.chars().next().map(String::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodingError;
    use crate::items::DataContainer;
    use crate::parser::parse;
    use crate::pipeline::{PipelineError, PixelData};
    use image::{DynamicImage, RgbaImage};
    use pretty_assertions::assert_eq;

    /// Emits the image dimensions as two words on two rows
    struct SizePipeline;

    impl PixelPipeline for SizePipeline {
        fn prepare(&self, image: &DynamicImage, _: &Preset) -> Result<DynamicImage, PipelineError> {
            Ok(image.clone())
        }

        fn extract_pixels(&self, image: &DynamicImage, _: &Preset) -> Result<PixelData, PipelineError> {
            Ok(PixelData {
                samples: vec![image.width(), image.height()],
                width: 1,
                height: 2,
            })
        }

        fn process_pixels(&self, data: PixelData, _: &Preset) -> Result<PixelData, PipelineError> {
            Ok(data)
        }

        fn pack(&self, data: PixelData, _: &Preset) -> Result<PixelData, PipelineError> {
            Ok(data)
        }

        fn reorder(&self, data: PixelData, _: &Preset) -> Result<PixelData, PipelineError> {
            Ok(data)
        }

        fn compress(&self, data: PixelData, _: &Preset) -> Result<PixelData, PipelineError> {
            Ok(data)
        }

        fn format(&self, data: &PixelData, _: &Preset, radix_prefix: &str) -> String {
            data.samples
                .iter()
                .map(|w| format!("{radix_prefix}{w:x}"))
                .collect::<Vec<_>>()
                .join(",\n")
        }
    }

    /// Claims a key it has no image for
    struct Ghost;

    impl ItemSource for Ghost {
        fn keys(&self) -> Vec<&str> {
            vec!["ghost"]
        }

        fn image(&self, _: &str) -> Option<&DynamicImage> {
            None
        }
    }

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
    }

    fn two_items() -> DataContainer {
        DataContainer::new().with("A", blank(3, 2)).with("B", blank(1, 1))
    }

    fn render_with(source: &str, tags: &Tags, items: &dyn ItemSource, preset: &Preset) -> Result<String, RenderError> {
        let template = parse(source)?;
        Renderer::new(items, &SizePipeline, preset).render(&template, tags)
    }

    fn render(source: &str, tags: &Tags, items: &dyn ItemSource) -> String {
        render_with(source, tags, items, &Preset::default()).unwrap()
    }

    #[test]
    fn test_text_unchanged() {
        let source = "const int x = 1; // mail me@home $5\n";
        assert_eq!(render(source, &Tags::new(), &two_items()), source);
    }

    #[test]
    fn test_tags() {
        let tags = Tags::new().with("bpp", "1");
        assert_eq!(render("bpp=@bpp@ rle=$(rle)", &tags, &DataContainer::new()), "bpp=1 rle=<value not defined>");
    }

    #[test]
    fn test_images_table() {
        let source = "{@start_block_images_table@\n  @charText@=@charCode@ @width@x@height@ [@blocksCount@] @imageData@@comma@\n@end_block_images_table@\n}";
        assert_eq!(
            render(source, &Tags::new(), &two_items()),
            "{\nA=41 3x2 [2] 0x3,\n    0x2,\nB=42 1x1 [2] 0x1,\n    0x1\n}"
        );
    }

    #[test]
    fn test_empty_source_renders_nothing() {
        let source = "[@start_block_images_table@@width@@end_block_images_table@]";
        assert_eq!(render(source, &Tags::new(), &DataContainer::new()), "[]");
    }

    #[test]
    fn test_item_tags_do_not_leak() {
        let tags = Tags::new().with("width", "base");
        let source = "@start_block_images_table@@width@@end_block_images_table@ @width@ @comma@";
        assert_eq!(
            render(source, &tags, &two_items()),
            "\n3\n1 base <value not defined>"
        );
    }

    #[test]
    fn test_images_count_inside_body() {
        let source = "@start_block_images_table@@imagesCount@@end_block_images_table@";
        assert_eq!(render(source, &Tags::new(), &two_items()), "\n2\n2");
    }

    #[test]
    fn test_indent_from_tags() {
        let tags = Tags::new().with("imageDataIndent", "\t");
        let items = DataContainer::new().with("A", blank(3, 2));
        let source = "@start_block_images_table@@imageData@@end_block_images_table@";
        assert_eq!(render(source, &tags, &items), "\n0x3,\n\t0x2");
    }

    #[test]
    fn test_nested_block_in_item_body_is_tags() {
        let items = DataContainer::new().with("A", blank(1, 1));
        let tags = Tags::new().with("start_block_inner", "<").with("end_block_inner", ">");
        let source = "@start_block_images_table@@start_block_inner@ @charText@ @end_block_inner@@end_block_images_table@";
        assert_eq!(render(source, &tags, &items), "\n<A>");
    }

    #[test]
    fn test_plain_block_recurses() {
        let tags = Tags::new().with("width", "8");
        assert_eq!(
            render("<@start_block_header@  w=@width@\n@end_block_header@>", &tags, &DataContainer::new()),
            "<w=8>"
        );
    }

    #[test]
    fn test_unclosed_block_renders_empty() {
        assert_eq!(
            render("a@start_block_foo@b@width@", &Tags::new().with("width", "1"), &DataContainer::new()),
            "ab1"
        );
    }

    #[test]
    fn test_stray_end_is_tag() {
        assert_eq!(
            render("x@end_block_foo@y", &Tags::new(), &DataContainer::new()),
            "x<value not defined>y"
        );
    }

    #[test]
    fn test_char_text() {
        assert_eq!(char_text("a@b"), "a(a)b");
        assert_eq!(char_text("@"), "(a)");
        assert_eq!(char_text("Жук"), "Ж");
        assert_eq!(char_text(""), "");
    }

    #[test]
    fn test_empty_key() {
        let items = DataContainer::new().with("", blank(1, 1));
        let source = "@start_block_images_table@[@charCode@|@charText@]@end_block_images_table@";
        assert_eq!(render(source, &Tags::new(), &items), "\n[|]");
    }

    #[test]
    fn test_utf16_char_code() {
        let mut preset = Preset::default();
        preset.font.encoding = "UTF-16".to_string();
        preset.font.bom = true;
        let items = DataContainer::new().with("A", blank(1, 1));
        let source = "@start_block_images_table@@charCode@@end_block_images_table@";
        assert_eq!(render_with(source, &Tags::new(), &items, &preset).unwrap(), "\nfeff0041");
    }

    #[test]
    fn test_unknown_encoding_surfaces() {
        let mut preset = Preset::default();
        preset.font.encoding = "EBCDIC-XX".to_string();
        let source = "@start_block_images_table@@charCode@@end_block_images_table@";
        let result = render_with(source, &Tags::new(), &two_items(), &preset);
        assert!(matches!(
            result,
            Err(RenderError::Encoding(EncodingError::UnknownEncoding { .. }))
        ));
    }

    #[test]
    fn test_missing_image() {
        let result = render_with(
            "@start_block_images_table@x@end_block_images_table@",
            &Tags::new(),
            &Ghost,
            &Preset::default(),
        );
        assert!(matches!(result, Err(RenderError::MissingImage { key }) if key == "ghost"));
    }
}
