//! Lexer for the template language using logos
//!
//! A marker opens with `@` or `$(` and closes with `@` or `)`. Everything that
//! is not a complete marker is literal text, including a lone `@` or `$`.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

const START_BLOCK: &str = "start_block_";
const END_BLOCK: &str = "end_block_";

/// Template token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, copied verbatim
    Text(String),
    /// Scalar tag: `@name@`
    Tag(String),
    /// Block opener: `@start_block_name@`
    BlockStart(String),
    /// Block closer: `@end_block_name@`
    BlockEnd(String),
}

impl Token {
    fn from_marker(name: String) -> Self {
        if let Some(block) = name.strip_prefix(START_BLOCK).filter(|b| !b.is_empty()) {
            Token::BlockStart(block.to_string())
        } else if let Some(block) = name.strip_prefix(END_BLOCK).filter(|b| !b.is_empty()) {
            Token::BlockEnd(block.to_string())
        } else {
            Token::Tag(name)
        }
    }

    /// Marker keyword as written between the delimiters
    pub fn keyword(&self) -> Option<String> {
        match self {
            Token::Text(_) => None,
            Token::Tag(name) => Some(name.clone()),
            Token::BlockStart(name) => Some(start_keyword(name)),
            Token::BlockEnd(name) => Some(end_keyword(name)),
        }
    }
}

/// `start_block_<name>`
pub fn start_keyword(name: &str) -> String {
    format!("{START_BLOCK}{name}")
}

/// `end_block_<name>`
pub fn end_keyword(name: &str) -> String {
    format!("{END_BLOCK}{name}")
}

/// Result of scanning past an opening delimiter
#[derive(Debug, Clone, PartialEq)]
enum Open {
    Marker(String),
    Stray,
}

#[derive(Logos, Debug, Clone, PartialEq)]
enum RawToken {
    #[token("@", open_marker)]
    #[token("$(", open_marker)]
    Open(Open),

    #[token("$")]
    Dollar,

    #[regex(r"[^@$]+")]
    Text,
}

fn open_marker(lex: &mut logos::Lexer<'_, RawToken>) -> Open {
    let rest = lex.remainder();
    let len = identifier_len(rest);
    if len == 0 {
        return Open::Stray;
    }
    match rest.as_bytes().get(len) {
        Some(b'@') | Some(b')') => {
            let name = rest[..len].to_string();
            lex.bump(len + 1);
            Open::Marker(name)
        }
        _ => Open::Stray,
    }
}

fn identifier_len(s: &str) -> usize {
    s.bytes()
        .enumerate()
        .take_while(|&(i, b)| b == b'_' || b.is_ascii_alphabetic() || (i > 0 && b.is_ascii_digit()))
        .count()
}

/// Lex input string into tokens with spans
///
/// Adjacent literal runs are merged into a single `Token::Text`.
pub fn lex(input: &str) -> Vec<(Token, Span)> {
    let mut tokens: Vec<(Token, Span)> = Vec::new();

    for (raw, span) in RawToken::lexer(input).spanned() {
        let token = match raw {
            Ok(RawToken::Open(Open::Marker(name))) => Token::from_marker(name),
            _ => Token::Text(input[span.clone()].to_string()),
        };

        if let (Token::Text(text), Some((Token::Text(prev), prev_span))) = (&token, tokens.last_mut()) {
            prev.push_str(text);
            prev_span.end = span.end;
            continue;
        }
        tokens.push((token, span));
    }

    tokens
}

/// Indentation used for continuation lines of the `imageData` literal
///
/// Returns the run of spaces and tabs directly in front of the first
/// `imageData` marker that has one.
pub fn image_data_indent(input: &str) -> Option<String> {
    let tokens = lex(input);
    tokens.windows(2).find_map(|pair| match pair {
        [(Token::Text(text), _), (Token::Tag(name), _)] if name == "imageData" => {
            let indent: String = text
                .chars()
                .rev()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            (!indent.is_empty()).then_some(indent)
        }
        _ => None,
    })
}
