//! Parser for the template language

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse;
pub use lexer::image_data_indent;
