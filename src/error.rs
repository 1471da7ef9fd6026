//! Error types for template parsing and character encoding

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A block opened again before its own end marker
    #[error("block '{name}' at {inner:?} is nested inside another '{name}' block")]
    NestedBlock { name: String, outer: Span, inner: Span },
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::NestedBlock { name, outer, inner } => {
                let written = Report::build(ReportKind::Error, filename, inner.start)
                    .with_message(format!("block '{}' cannot contain itself", name))
                    .with_label(
                        Label::new((filename, outer.clone()))
                            .with_message("outer block opens here")
                            .with_color(Color::Blue),
                    )
                    .with_label(
                        Label::new((filename, inner.clone()))
                            .with_message("same block opened again before it ends")
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8(buf).unwrap_or_else(|_| self.to_string())
    }
}

/// Errors raised while producing character codes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// No codec is known under this name
    #[error("no codec found for encoding '{name}'")]
    UnknownEncoding { name: String },
}
