//! Ordered collections of keyed images
//!
//! An item source hands the images table its items: a key (the character a
//! glyph stands for, or a label for plain images) and the original image.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

/// Errors raised while building an item source from files
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot derive an item key from {path}")]
    NoKey { path: PathBuf },
}

/// Read access to an ordered collection of items
pub trait ItemSource {
    /// Keys in iteration order
    fn keys(&self) -> Vec<&str>;

    /// The original image stored under `key`
    fn image(&self, key: &str) -> Option<&DynamicImage>;

    fn count(&self) -> usize {
        self.keys().len()
    }
}

/// In-memory item source keeping insertion order
#[derive(Debug, Clone, Default)]
pub struct DataContainer {
    items: Vec<(String, DynamicImage)>,
    index: HashMap<String, usize>,
}

impl DataContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, replacing the image of an existing key in place
    pub fn insert(&mut self, key: impl Into<String>, image: DynamicImage) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => self.items[slot].1 = image,
            None => {
                self.index.insert(key.clone(), self.items.len());
                self.items.push((key, image));
            }
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, image: DynamicImage) -> Self {
        self.insert(key, image);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load every path as an image, keyed by [`key_for_path`]
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, SourceError> {
        let mut container = Self::new();
        for path in paths {
            let path = path.as_ref();
            let key = key_for_path(path).ok_or_else(|| SourceError::NoKey {
                path: path.to_path_buf(),
            })?;
            let image = image::open(path).map_err(|source| SourceError::Image {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), key = %key, "loaded item");
            container.insert(key, image);
        }
        Ok(container)
    }
}

impl ItemSource for DataContainer {
    fn keys(&self) -> Vec<&str> {
        self.items.iter().map(|(k, _)| k.as_str()).collect()
    }

    fn image(&self, key: &str) -> Option<&DynamicImage> {
        self.index.get(key).map(|&slot| &self.items[slot].1)
    }

    fn count(&self) -> usize {
        self.items.len()
    }
}

/// Item key for an image file
///
/// Stems written as `U+XXXX` or `0xXX` decode to the character with that
/// code point, so glyph files can be named after characters that are not
/// valid in file names. Any other stem is used as is.
pub fn key_for_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let code = stem
        .strip_prefix("U+")
        .or_else(|| stem.strip_prefix("u+"))
        .or_else(|| stem.strip_prefix("0x"))
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(char::from_u32);
    Some(match code {
        Some(ch) => ch.to_string(),
        None => stem.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
    }

    #[test]
    fn test_insertion_order() {
        let items = DataContainer::new()
            .with("b", blank(1, 1))
            .with("a", blank(2, 2))
            .with("c", blank(3, 3));
        assert_eq!(items.keys(), vec!["b", "a", "c"]);
        assert_eq!(items.count(), 3);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut items = DataContainer::new().with("a", blank(1, 1)).with("b", blank(1, 1));
        items.insert("a", blank(4, 2));
        assert_eq!(items.keys(), vec!["a", "b"]);
        assert_eq!(items.image("a").map(|i| i.width()), Some(4));
        assert!(items.image("z").is_none());
    }

    #[test]
    fn test_lookup_after_many_inserts() {
        let mut items = DataContainer::new();
        for code in 0x20u32..0x220 {
            let key = char::from_u32(code).unwrap().to_string();
            items.insert(key, blank(code % 7 + 1, 1));
        }
        items.insert("A", blank(9, 9));

        assert_eq!(items.len(), 0x200);
        assert_eq!(items.keys()[0], " ");
        assert_eq!(items.keys()[0x21], "A");
        assert_eq!(items.image("A").map(|i| i.width()), Some(9));
        assert_eq!(items.image("é").map(|i| i.width()), Some(0xe9 % 7 + 1));
    }

    #[test]
    fn test_key_for_path() {
        assert_eq!(key_for_path(Path::new("glyphs/U+0416.png")), Some("Ж".to_string()));
        assert_eq!(key_for_path(Path::new("0x41.bmp")), Some("A".to_string()));
        assert_eq!(key_for_path(Path::new("logo.png")), Some("logo".to_string()));
        assert_eq!(key_for_path(Path::new("U+zz.png")), Some("U+zz".to_string()));
    }

    #[test]
    fn test_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("U+0041.png");
        RgbaImage::new(3, 5).save(&path).unwrap();

        let items = DataContainer::from_paths(&[&path]).unwrap();
        assert_eq!(items.keys(), vec!["A"]);
        assert_eq!(items.image("A").map(|i| (i.width(), i.height())), Some((3, 5)));
    }

    #[test]
    fn test_from_paths_missing_file() {
        let result = DataContainer::from_paths(&["/nonexistent/dir/a.png"]);
        assert!(matches!(result, Err(SourceError::Image { .. })));
    }
}
