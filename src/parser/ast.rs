//! Syntax tree for parsed templates

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Name of the block expanded once per item
pub const IMAGES_TABLE: &str = "images_table";

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Root node - a complete parsed template
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    pub nodes: Vec<Spanned<Node>>,
}

impl Template {
    /// Names of the top-level blocks, in document order
    pub fn block_names(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match &n.node {
                Node::Block(block) => Some(block.name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Template element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text
    Text(String),
    /// Scalar tag lookup
    Tag(String),
    /// Matched `start_block_<name>` ... `end_block_<name>` region
    Block(Block),
    /// `start_block_<name>` with no matching end marker; renders nothing
    Unclosed(String),
    /// `end_block_<name>` with no open block; treated as a plain tag
    StrayEnd(String),
}

/// A named block with trimmed content
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub body: Vec<Spanned<Node>>,
}

impl Block {
    /// Whether this block iterates over the item source
    pub fn is_images_table(&self) -> bool {
        self.name == IMAGES_TABLE
    }
}
