//! Template bodies from user files with built-in fallbacks

use std::fs;
use std::io;
use std::path::Path;

use super::tags::Tags;

const BUILTIN_IMAGE: &str = include_str!("builtin/image.tmpl");
const BUILTIN_FONT: &str = include_str!("builtin/font.tmpl");

/// Which document a template produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateKind {
    /// One bitmap per item
    #[default]
    Image,
    /// A font: bitmaps plus a character lookup table
    Font,
}

impl TemplateKind {
    /// Body of the template compiled into the binary
    pub fn builtin(self) -> &'static str {
        match self {
            TemplateKind::Image => BUILTIN_IMAGE,
            TemplateKind::Font => BUILTIN_FONT,
        }
    }

    /// Origin reported for the compiled-in body
    pub fn builtin_origin(self) -> &'static str {
        match self {
            TemplateKind::Image => "builtin:image",
            TemplateKind::Font => "builtin:font",
        }
    }
}

/// A template body and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBody {
    pub text: String,
    /// File path, or `builtin:<kind>`
    pub origin: String,
}

/// Read the template at `path`, falling back to the built-in body
///
/// A path that does not exist selects the built-in template; any other read
/// failure is returned.
pub fn load_template(path: Option<&Path>, kind: TemplateKind) -> io::Result<TemplateBody> {
    if let Some(path) = path {
        match fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "using template file");
                return Ok(TemplateBody {
                    text,
                    origin: path.display().to_string(),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "template file not found, using built-in template");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(TemplateBody {
        text: kind.builtin().to_string(),
        origin: kind.builtin_origin().to_string(),
    })
}

/// `documentName` and its identifier-safe form `documentName_ws`
pub fn document_tags(name: &str) -> Tags {
    let ws: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    Tags::new().with("documentName", name).with("documentName_ws", ws)
}
