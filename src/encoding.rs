//! Character code formatting for glyph tables
//!
//! A character is encoded with the named codec, the produced bytes are read
//! as one big-endian number and the UTF-16 / UTF-32 families are then
//! reordered so the printed code reads in natural order.

use crate::error::EncodingError;

/// Most bytes taken into account from one encoded character
const MAX_CODE_BYTES: usize = 8;

const UTF16_BOM: [u8; 2] = [0xfe, 0xff];
const UTF32_BOM: [u8; 4] = [0x00, 0x00, 0xfe, 0xff];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Little,
    Big,
}

/// Resolved codec for a named encoding
#[derive(Debug, Clone, Copy)]
enum Codec {
    Ascii,
    Utf16 { bom: bool, order: Order },
    Utf32 { bom: bool, order: Order },
    Label(&'static encoding_rs::Encoding),
}

impl Codec {
    fn for_name(name: &str) -> Result<Self, EncodingError> {
        let upper = name.trim().to_ascii_uppercase();
        let codec = match upper.as_str() {
            "ASCII" | "US-ASCII" => Codec::Ascii,
            "UTF-16" => Codec::Utf16 { bom: true, order: Order::Little },
            "UTF-16LE" => Codec::Utf16 { bom: false, order: Order::Little },
            "UTF-16BE" => Codec::Utf16 { bom: false, order: Order::Big },
            "UTF-32" => Codec::Utf32 { bom: true, order: Order::Little },
            "UTF-32LE" => Codec::Utf32 { bom: false, order: Order::Little },
            "UTF-32BE" => Codec::Utf32 { bom: false, order: Order::Big },
            _ => match encoding_rs::Encoding::for_label(upper.as_bytes()) {
                Some(enc) if enc == encoding_rs::UTF_16LE => Codec::Utf16 { bom: false, order: Order::Little },
                Some(enc) if enc == encoding_rs::UTF_16BE => Codec::Utf16 { bom: false, order: Order::Big },
                // encoding_rs writes UTF-8 for encodings it can only decode
                Some(enc) if enc.output_encoding() == enc => Codec::Label(enc),
                _ => {
                    return Err(EncodingError::UnknownEncoding {
                        name: name.to_string(),
                    })
                }
            },
        };
        Ok(codec)
    }

    fn encode(self, ch: char) -> Vec<u8> {
        match self {
            Codec::Ascii => vec![if ch.is_ascii() { ch as u8 } else { b'?' }],
            Codec::Utf16 { bom, order } => {
                let mut bytes = if bom { UTF16_BOM.to_vec() } else { Vec::new() };
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    match order {
                        Order::Little => bytes.extend_from_slice(&unit.to_le_bytes()),
                        Order::Big => bytes.extend_from_slice(&unit.to_be_bytes()),
                    }
                }
                bytes
            }
            Codec::Utf32 { bom, order } => {
                let mut bytes = if bom { UTF32_BOM.to_vec() } else { Vec::new() };
                let code = u32::from(ch);
                match order {
                    Order::Little => bytes.extend_from_slice(&code.to_le_bytes()),
                    Order::Big => bytes.extend_from_slice(&code.to_be_bytes()),
                }
                bytes
            }
            Codec::Label(encoding) => {
                let mut buf = [0u8; 4];
                let (bytes, _, unmappable) = encoding.encode(ch.encode_utf8(&mut buf));
                if unmappable {
                    vec![b'?']
                } else {
                    bytes.into_owned()
                }
            }
        }
    }
}

/// Hexadecimal code of `ch` in the named encoding
///
/// Output is lower-case and zero padded, without a radix prefix:
///
/// ```rust
/// use pixel_codegen::encoding::hex_code;
///
/// assert_eq!(hex_code('A', "ASCII", false).unwrap(), "41");
/// assert_eq!(hex_code('A', "UTF-16", true).unwrap(), "feff0041");
/// assert_eq!(hex_code('A', "UTF-16", false).unwrap(), "0041");
/// ```
pub fn hex_code(ch: char, encoding: &str, bom: bool) -> Result<String, EncodingError> {
    let codec = Codec::for_name(encoding)?;
    let bytes = codec.encode(ch);
    let count = bytes.len().min(MAX_CODE_BYTES);

    let mut code = bytes[..count]
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));

    let hex = if matches!(codec, Codec::Utf16 { .. }) {
        let swapped = ((code & 0xff00) >> 8) | ((code & 0x00ff) << 8);
        code = (code & !0xffff) | swapped;
        if bom {
            format!("{:08x}", code)
        } else {
            format!("{:04x}", code & 0xffff)
        }
    } else if matches!(codec, Codec::Utf32 { .. }) {
        let swapped = u64::from((code as u32).swap_bytes());
        code = (code & !0xffff_ffff) | swapped;
        if bom {
            format!("{:016x}", code)
        } else {
            format!("{:08x}", code & 0xffff_ffff)
        }
    } else {
        format!("{:0width$x}", code, width = count * 2)
    };

    Ok(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        assert_eq!(hex_code('A', "ASCII", false).unwrap(), "41");
        assert_eq!(hex_code('~', "US-ASCII", true).unwrap(), "7e");
    }

    #[test]
    fn test_ascii_replaces_non_ascii() {
        assert_eq!(hex_code('é', "ASCII", false).unwrap(), "3f");
    }

    #[test]
    fn test_utf16_bom() {
        assert_eq!(hex_code('A', "UTF-16", true).unwrap(), "feff0041");
        assert_eq!(hex_code('Á', "UTF-16", true).unwrap(), "feff00c1");
    }

    #[test]
    fn test_utf16_without_bom() {
        assert_eq!(hex_code('A', "UTF-16", false).unwrap(), "0041");
        assert_eq!(hex_code('Ж', "UTF-16", false).unwrap(), "0416");
        assert_eq!(hex_code('Ж', "UTF-16LE", false).unwrap(), "0416");
    }

    #[test]
    fn test_utf16_big_endian_codec_is_swapped() {
        // the reorder step assumes little-endian units
        assert_eq!(hex_code('A', "UTF-16BE", false).unwrap(), "4100");
    }

    #[test]
    fn test_utf32() {
        assert_eq!(hex_code('A', "UTF-32", true).unwrap(), "0000feff00000041");
        assert_eq!(hex_code('A', "UTF-32", false).unwrap(), "00000041");
        assert_eq!(hex_code('€', "UTF-32LE", false).unwrap(), "000020ac");
    }

    #[test]
    fn test_single_byte_codepage() {
        assert_eq!(hex_code('Ж', "windows-1251", false).unwrap(), "c6");
        assert_eq!(hex_code('A', "windows-1251", false).unwrap(), "41");
    }

    #[test]
    fn test_multi_byte_utf8() {
        assert_eq!(hex_code('Ж', "UTF-8", false).unwrap(), "d096");
        assert_eq!(hex_code('€', "UTF-8", false).unwrap(), "e282ac");
    }

    #[test]
    fn test_unmappable_becomes_question_mark() {
        assert_eq!(hex_code('€', "KOI8-R", false).unwrap(), "3f");
    }

    #[test]
    fn test_utf16_aliases() {
        assert_eq!(hex_code('Ж', "UCS-2", false).unwrap(), "0416");
        assert_eq!(hex_code('Ж', "unicode", true).unwrap(), "00000416");
        assert_eq!(hex_code('Ж', "unicodeFFFE", false).unwrap(), hex_code('Ж', "UTF-16BE", false).unwrap());
    }

    #[test]
    fn test_decode_only_encodings_rejected() {
        for name in ["ISO-2022-KR", "HZ-GB-2312", "csiso2022kr", "replacement"] {
            assert_eq!(
                hex_code('Ж', name, false),
                Err(EncodingError::UnknownEncoding {
                    name: name.to_string()
                })
            );
        }
    }

    #[test]
    fn test_unknown_encoding() {
        let err = hex_code('A', "NOT-A-CODEC", false).unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnknownEncoding {
                name: "NOT-A-CODEC".to_string()
            }
        );
    }
}
