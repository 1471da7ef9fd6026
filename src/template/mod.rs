//! Template rendering
//!
//! A template is plain text with tag markers (`@name@` or `$(name)`) and
//! block markers (`@start_block_name@` ... `@end_block_name@`). Rendering
//! substitutes tags from a [`Tags`] mapping and expands the reserved
//! `images_table` block once per item of an [`ItemSource`](crate::items::ItemSource).
//!
//! # Example
//!
//! ```text
//! static const uint@dataBlockSize@_t data[] = {@start_block_images_table@
//!     @imageData@@comma@ // '@charText@'
//! @end_block_images_table@
//! };
//! ```

mod renderer;
mod source;
mod tags;

pub use renderer::{substitute, Renderer, DEFAULT_IMAGE_DATA_INDENT, RADIX_PREFIX};
pub use source::{document_tags, load_template, TemplateBody, TemplateKind};
pub use tags::{TagLookup, TagScope, Tags, UNDEFINED_VALUE};
