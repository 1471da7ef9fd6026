//! Descriptive template tags derived from a preset

use crate::template::Tags;

use super::{ConversionType, Preset};

const NOT_USED: &str = "not used";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Project a preset into the tags describing the conversion
pub fn build_tags(preset: &Preset) -> Tags {
    let prepare = &preset.prepare;
    let image = &preset.image;
    let mut tags = Tags::new();

    tags.insert("bytesOrder", image.bytes_order.label());
    tags.insert("dataBlockSize", image.block_size.bits().to_string());
    tags.insert("scanMain", prepare.scan_main.label());
    tags.insert("scanSub", prepare.scan_sub.label());
    tags.insert("bands", yes_no(prepare.band_scanning));
    tags.insert("bandWidth", prepare.band_width.to_string());
    tags.insert("inverse", yes_no(prepare.inverse));
    tags.insert("bom", yes_no(preset.font.bom));
    tags.insert("encoding", preset.font.encoding.as_str());
    tags.insert("splitToRows", yes_no(image.split_to_rows));
    tags.insert("rle", yes_no(image.compression_rle));
    tags.insert("preset", preset.name.as_str());
    tags.insert("convType", prepare.conv_type.name());

    if prepare.conv_type == ConversionType::Monochrome {
        tags.insert("monoType", prepare.mono_type.name());
        tags.insert("edge", prepare.edge.to_string());
    } else {
        tags.insert("monoType", NOT_USED);
        tags.insert("edge", NOT_USED);
    }

    tags.insert("bpp", preset.matrix.bits_per_pixel().to_string());

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{BlockSize, BytesOrder, LineDirection, ScanDirection};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_preset_tags() {
        let tags = build_tags(&Preset::default());
        let expected: Tags = [
            ("bandWidth", "8"),
            ("bands", "no"),
            ("bom", "no"),
            ("bpp", "1"),
            ("bytesOrder", "little-endian"),
            ("convType", "Monochrome"),
            ("dataBlockSize", "8"),
            ("edge", "128"),
            ("encoding", "UTF-8"),
            ("inverse", "no"),
            ("monoType", "Edge"),
            ("preset", "monochrome"),
            ("rle", "no"),
            ("scanMain", "top to bottom"),
            ("scanSub", "forward"),
            ("splitToRows", "yes"),
        ]
        .into_iter()
        .collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_non_monochrome_marks_unused() {
        let tags = build_tags(&Preset::builtin("grayscale_8").unwrap());
        assert_eq!(tags.get("convType"), Some("Grayscale"));
        assert_eq!(tags.get("monoType"), Some("not used"));
        assert_eq!(tags.get("edge"), Some("not used"));
        assert_eq!(tags.get("bpp"), Some("8"));
    }

    #[test]
    fn test_layout_tags() {
        let mut preset = Preset::default();
        preset.image.block_size = BlockSize::Bits32;
        preset.image.bytes_order = BytesOrder::BigEndian;
        preset.prepare.scan_main = ScanDirection::RightToLeft;
        preset.prepare.scan_sub = LineDirection::Backward;
        preset.prepare.band_scanning = true;

        let tags = build_tags(&preset);
        assert_eq!(tags.get("dataBlockSize"), Some("32"));
        assert_eq!(tags.get("bytesOrder"), Some("big-endian"));
        assert_eq!(tags.get("scanMain"), Some("right to left"));
        assert_eq!(tags.get("scanSub"), Some("backward"));
        assert_eq!(tags.get("bands"), Some("yes"));
    }

    #[test]
    fn test_build_is_repeatable() {
        let preset = Preset::builtin("color_r5g6b5").unwrap();
        assert_eq!(build_tags(&preset), build_tags(&preset));
    }
}
