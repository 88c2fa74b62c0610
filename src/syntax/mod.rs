//! Syntax tree model for declarative UI programs
//!
//! Trees are produced by an external front-end and handed over as JSON syntax
//! dumps (see [`SourceFile`]). A dump is lowered once into an immutable
//! [`SyntaxTree`] arena; every node is addressed by a [`NodeId`] and refers to
//! its children by id.
//!
//! # Node kinds
//!
//! ```text
//! Call        Box(modifier = ...) { ... }      callee, arguments, trailing block
//! Argument    modifier = Modifier.clickable    optional name + value
//! Block       { Text("a"); Icon(...) }         ordered statements
//! Assignment  contentDescription = "x"         only inside semantics blocks
//! Chain       Modifier.padding(4.dp)           receiver '.' selector
//! String      "text" / "$name"                 raw content + interpolation flag
//! Null        null
//! Opaque      anything else                    source rendering kept as text
//! ```

mod source;
mod symbols;

pub use source::{DumpError, ParsedFile, SourceArgument, SourceFile, SourceNode};
pub use symbols::{ResolvedSymbols, SymbolResolver};

use serde::{Deserialize, Serialize};

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Location of a call in the analyzed source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line (0 when the front-end did not supply one)
    #[serde(default)]
    pub line: u32,
    /// 1-based column (0 when the front-end did not supply one)
    #[serde(default)]
    pub column: u32,
    /// Placeholder for a call without a location; `start`/`end` are then an
    /// ordinal, not a byte range
    #[serde(skip_deserializing, skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            synthetic: false,
        }
    }

    /// Placeholder span for calls the front-end emitted without a location.
    /// The ordinal keeps it unique within one tree.
    pub(crate) fn synthetic(ordinal: usize) -> Self {
        Self {
            start: ordinal,
            end: ordinal,
            line: 0,
            column: 0,
            synthetic: true,
        }
    }

    pub fn has_position(&self) -> bool {
        self.line > 0
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_position() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "@{}", self.start)
        }
    }
}

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Call(Call),
    Argument(Argument),
    Block(Block),
    Assignment(Assignment),
    Chain(Chain),
    StringLiteral(StringLiteral),
    NullLiteral,
    Opaque(Opaque),
}

/// An element-construction (or modifier) call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: String,
    /// Ids of [`Node::Argument`] nodes, in source order
    pub args: Vec<NodeId>,
    /// Id of the trailing [`Node::Block`], if any
    pub trailing_block: Option<NodeId>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// `None` for positional arguments
    pub name: Option<String>,
    /// `None` only in malformed trees
    pub value: Option<NodeId>,
}

impl Argument {
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    pub fn is_positional(&self) -> bool {
        self.name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: NodeId,
    pub value: Option<NodeId>,
}

/// `receiver.selector`, the wrapper node of fluent modifier chains
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub receiver: NodeId,
    pub selector: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// Content between the quotes
    pub raw: String,
    pub has_interpolation: bool,
}

impl StringLiteral {
    /// Templates are never considered empty; their value is unknown statically.
    pub fn is_empty(&self) -> bool {
        !self.has_interpolation && self.raw.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Opaque {
    pub text: String,
}

/// Immutable arena holding one analyzed file's tree
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids of this tree
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Node for an id handed out by this tree
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn call(&self, id: NodeId) -> Option<&Call> {
        match self.node(id) {
            Node::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn argument(&self, id: NodeId) -> Option<&Argument> {
        match self.node(id) {
            Node::Argument(arg) => Some(arg),
            _ => None,
        }
    }

    pub fn block(&self, id: NodeId) -> Option<&Block> {
        match self.node(id) {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Arguments of a call, skipping ids that are not argument nodes
    pub fn arguments<'t>(&'t self, call: &'t Call) -> impl Iterator<Item = &'t Argument> + 't {
        call.args.iter().filter_map(move |id| self.argument(*id))
    }

    /// Source text of an identifier-like node (`Opaque`), trimmed
    pub fn identifier(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Node::Opaque(opaque) => Some(opaque.text.trim()),
            _ => None,
        }
    }

    /// Direct children in source order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id) {
            Node::Call(call) => call
                .args
                .iter()
                .copied()
                .chain(call.trailing_block)
                .collect(),
            Node::Argument(arg) => arg.value.into_iter().collect(),
            Node::Block(block) => block.statements.clone(),
            Node::Assignment(assign) => std::iter::once(assign.target)
                .chain(assign.value)
                .collect(),
            Node::Chain(chain) => vec![chain.receiver, chain.selector],
            Node::StringLiteral(_) | Node::NullLiteral | Node::Opaque(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyntaxTree {
        // Box(modifier = Modifier.clickable { }) { Text("hi") }
        let root = SourceNode::call("Box")
            .arg(
                "modifier",
                SourceNode::modifier([SourceNode::call("clickable").content(vec![])]),
            )
            .content(vec![SourceNode::call("Text").positional(SourceNode::string("hi"))]);
        SyntaxTree::from_source(&root)
    }

    #[test]
    fn test_children_in_source_order() {
        let tree = sample();
        let root = tree.call(tree.root()).expect("root is a call");
        assert_eq!(root.callee, "Box");

        let children = tree.children(tree.root());
        assert_eq!(children.len(), 2);
        assert!(tree.argument(children[0]).is_some());
        assert!(tree.block(children[1]).is_some());
    }

    #[test]
    fn test_string_literal_emptiness() {
        let empty = StringLiteral {
            raw: String::new(),
            has_interpolation: false,
        };
        let template = StringLiteral {
            raw: String::new(),
            has_interpolation: true,
        };
        assert!(empty.is_empty());
        assert!(!template.is_empty());
    }

    #[test]
    fn test_identifier_only_for_opaque() {
        let tree = SyntaxTree::from_source(&SourceNode::opaque(" contentDescription "));
        assert_eq!(tree.identifier(tree.root()), Some("contentDescription"));

        let tree = SyntaxTree::from_source(&SourceNode::string("contentDescription"));
        assert_eq!(tree.identifier(tree.root()), None);
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(10, 20, 3, 7).to_string(), "3:7");
        assert_eq!(Span::synthetic(4).to_string(), "@4");
    }

    #[test]
    fn test_placeholder_span_marked() {
        assert!(Span::synthetic(4).synthetic);
        assert!(!Span::new(10, 20, 3, 7).synthetic);

        let placeholder = serde_json::to_value(Span::synthetic(4)).expect("serialize");
        assert_eq!(placeholder["synthetic"], true);
        let located = serde_json::to_value(Span::new(10, 20, 3, 7)).expect("serialize");
        assert!(located.get("synthetic").is_none());

        // Dumps cannot claim a placeholder span
        let parsed: Span = serde_json::from_str(
            r#"{ "start": 1, "end": 2, "line": 1, "column": 1, "synthetic": true }"#,
        )
        .expect("deserialize");
        assert!(!parsed.synthetic);
    }
}
