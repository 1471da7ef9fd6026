//! Block structure recovery over the flat token stream

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::lexer::{lex, Token};

/// Parse template source into a node tree
///
/// A block start is paired with the first end marker of the same name that
/// follows it. Blocks of one name may follow each other, but a block may not
/// be opened again inside itself.
pub fn parse(input: &str) -> Result<Template, Vec<ParseError>> {
    let tokens = lex(input);
    let mut errors = Vec::new();
    let mut open = Vec::new();

    let nodes = parse_nodes(&tokens, &mut open, &mut errors);

    if errors.is_empty() {
        Ok(Template { nodes })
    } else {
        Err(errors)
    }
}

/// Build nodes for one nesting level
///
/// A start marker closes at the first end marker of its name anywhere after
/// it, even one inside a differently named block. The tokens in between form
/// the body and are parsed recursively with the name pushed on `open`.
fn parse_nodes(
    tokens: &[(Token, Span)],
    open: &mut Vec<(String, Span)>,
    errors: &mut Vec<ParseError>,
) -> Vec<Spanned<Node>> {
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let (token, span) = &tokens[i];
        match token {
            Token::Text(text) => nodes.push(Spanned::new(Node::Text(text.clone()), span.clone())),
            Token::Tag(name) => nodes.push(Spanned::new(Node::Tag(name.clone()), span.clone())),
            Token::BlockEnd(name) => {
                nodes.push(Spanned::new(Node::StrayEnd(name.clone()), span.clone()))
            }
            Token::BlockStart(name) => {
                if let Some((_, outer)) = open.iter().find(|(n, _)| n == name) {
                    errors.push(ParseError::NestedBlock {
                        name: name.clone(),
                        outer: outer.clone(),
                        inner: span.clone(),
                    });
                }

                let end = tokens[i + 1..]
                    .iter()
                    .position(|(t, _)| matches!(t, Token::BlockEnd(n) if n == name))
                    .map(|offset| i + 1 + offset);

                match end {
                    Some(end) => {
                        open.push((name.clone(), span.clone()));
                        let body = parse_nodes(&tokens[i + 1..end], open, errors);
                        open.pop();

                        let block = Block {
                            name: name.clone(),
                            body: trim_body(body),
                        };
                        nodes.push(Spanned::new(Node::Block(block), span.start..tokens[end].1.end));
                        i = end + 1;
                        continue;
                    }
                    None => {
                        tracing::warn!(block = %name, at = span.start, "block has no matching end marker");
                        nodes.push(Spanned::new(Node::Unclosed(name.clone()), span.clone()));
                    }
                }
            }
        }
        i += 1;
    }

    nodes
}

/// Strip leading whitespace of the first text node and trailing whitespace of the last
fn trim_body(mut body: Vec<Spanned<Node>>) -> Vec<Spanned<Node>> {
    if let Some(Spanned { node: Node::Text(text), .. }) = body.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Spanned { node: Node::Text(text), .. }) = body.last_mut() {
        *text = text.trim_end().to_string();
    }
    body.retain(|n| !matches!(&n.node, Node::Text(t) if t.is_empty()));
    body
}
