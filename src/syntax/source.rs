//! JSON interchange format for syntax dumps
//!
//! A front-end with access to the real parser writes one [`SourceFile`] per
//! analyzed source file:
//!
//! ```json
//! {
//!   "path": "app/src/main/java/ui/Settings.kt",
//!   "type_resolution": true,
//!   "root": { "kind": "block", "statements": [
//!     { "kind": "call", "callee": "Image",
//!       "resolved": "androidx.compose.foundation.Image",
//!       "span": { "start": 120, "end": 164, "line": 8, "column": 5 },
//!       "args": [ { "name": "contentDescription", "value": { "kind": "null" } } ] }
//!   ] }
//! }
//! ```

use super::{
    Argument, Assignment, Block, Call, Chain, Node, NodeId, Opaque, ResolvedSymbols, Span,
    StringLiteral, SymbolResolver, SyntaxTree,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while loading a syntax dump
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("failed to read syntax dump {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid syntax dump {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One analyzed source file as emitted by the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Whether the front-end ran with type information; only then are the
    /// `resolved` annotations on calls trusted.
    #[serde(default)]
    pub type_resolution: bool,
    pub root: SourceNode,
}

/// Tree node in interchange form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceNode {
    Call {
        callee: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<SourceArgument>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trailing_block: Option<Vec<SourceNode>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
        /// Fully-qualified name of the called symbol
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolved: Option<String>,
    },
    Block {
        #[serde(default)]
        statements: Vec<SourceNode>,
    },
    Assignment {
        target: Box<SourceNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<SourceNode>>,
    },
    Chain {
        receiver: Box<SourceNode>,
        selector: Box<SourceNode>,
    },
    #[serde(rename = "string")]
    StringLiteral {
        #[serde(default)]
        raw: String,
        #[serde(default)]
        interpolated: bool,
    },
    #[serde(rename = "null")]
    NullLiteral,
    Opaque {
        #[serde(default)]
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceArgument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SourceNode>,
}

// Builders, mostly for hosts and tests that assemble trees in code.
impl SourceNode {
    pub fn call(callee: impl Into<String>) -> Self {
        SourceNode::Call {
            callee: callee.into(),
            args: Vec::new(),
            trailing_block: None,
            span: None,
            resolved: None,
        }
    }

    pub fn block(statements: Vec<SourceNode>) -> Self {
        SourceNode::Block { statements }
    }

    pub fn string(raw: impl Into<String>) -> Self {
        SourceNode::StringLiteral {
            raw: raw.into(),
            interpolated: false,
        }
    }

    /// String template such as `"$count items"`
    pub fn template(raw: impl Into<String>) -> Self {
        SourceNode::StringLiteral {
            raw: raw.into(),
            interpolated: true,
        }
    }

    pub fn null() -> Self {
        SourceNode::NullLiteral
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        SourceNode::Opaque { text: text.into() }
    }

    pub fn chain(receiver: SourceNode, selector: SourceNode) -> Self {
        SourceNode::Chain {
            receiver: Box::new(receiver),
            selector: Box::new(selector),
        }
    }

    pub fn assign(target: SourceNode, value: SourceNode) -> Self {
        SourceNode::Assignment {
            target: Box::new(target),
            value: Some(Box::new(value)),
        }
    }

    /// `target = <missing>`, as front-ends emit for code that failed to parse
    pub fn assign_missing(target: SourceNode) -> Self {
        SourceNode::Assignment {
            target: Box::new(target),
            value: None,
        }
    }

    /// `Modifier.a(..).b(..)`, built as left-nested chains
    pub fn modifier(calls: impl IntoIterator<Item = SourceNode>) -> Self {
        calls
            .into_iter()
            .fold(SourceNode::opaque("Modifier"), SourceNode::chain)
    }

    /// Add a named argument. No-op on non-call nodes.
    pub fn arg(mut self, name: impl Into<String>, value: SourceNode) -> Self {
        if let SourceNode::Call { args, .. } = &mut self {
            args.push(SourceArgument {
                name: Some(name.into()),
                value: Some(value),
            });
        }
        self
    }

    /// Add a named argument whose value is missing. No-op on non-call nodes.
    pub fn arg_missing(mut self, name: impl Into<String>) -> Self {
        if let SourceNode::Call { args, .. } = &mut self {
            args.push(SourceArgument {
                name: Some(name.into()),
                value: None,
            });
        }
        self
    }

    /// Add a positional argument. No-op on non-call nodes.
    pub fn positional(mut self, value: SourceNode) -> Self {
        if let SourceNode::Call { args, .. } = &mut self {
            args.push(SourceArgument {
                name: None,
                value: Some(value),
            });
        }
        self
    }

    /// Set the trailing content block. No-op on non-call nodes.
    pub fn content(mut self, statements: Vec<SourceNode>) -> Self {
        if let SourceNode::Call { trailing_block, .. } = &mut self {
            *trailing_block = Some(statements);
        }
        self
    }

    pub fn at(mut self, location: Span) -> Self {
        if let SourceNode::Call { span, .. } = &mut self {
            *span = Some(location);
        }
        self
    }

    pub fn resolved_as(mut self, fqn: impl Into<String>) -> Self {
        if let SourceNode::Call { resolved, .. } = &mut self {
            *resolved = Some(fqn.into());
        }
        self
    }
}

/// A lowered file ready for rule evaluation
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub tree: SyntaxTree,
    /// `None` when the dump was produced without type information
    pub symbols: Option<ResolvedSymbols>,
}

impl ParsedFile {
    pub fn resolver(&self) -> Option<&dyn SymbolResolver> {
        self.symbols.as_ref().map(|s| s as &dyn SymbolResolver)
    }
}

impl SourceFile {
    /// Read and deserialize a dump from disk
    pub fn load(path: &Path) -> Result<Self, DumpError> {
        let content = std::fs::read_to_string(path).map_err(|source| DumpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &content)
    }

    pub fn from_json(path: &Path, content: &str) -> Result<Self, DumpError> {
        serde_json::from_str(content).map_err(|source| DumpError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Lower into the arena representation
    pub fn lower(&self) -> ParsedFile {
        let mut lowering = Lowering::default();
        let root = lowering.lower(&self.root);
        if self.type_resolution {
            if lowering.symbols.is_empty() {
                debug!("{} has type resolution but no resolved calls", self.path.display());
            } else {
                trace!("{}: {} resolved calls", self.path.display(), lowering.symbols.len());
            }
        }
        ParsedFile {
            path: self.path.clone(),
            tree: SyntaxTree {
                nodes: lowering.nodes,
                root,
            },
            symbols: self.type_resolution.then_some(lowering.symbols),
        }
    }
}

impl SyntaxTree {
    /// Lower a single interchange node, discarding symbol annotations
    pub fn from_source(root: &SourceNode) -> Self {
        let mut lowering = Lowering::default();
        let root = lowering.lower(root);
        SyntaxTree {
            nodes: lowering.nodes,
            root,
        }
    }
}

#[derive(Default)]
struct Lowering {
    nodes: Vec<Node>,
    symbols: ResolvedSymbols,
    synthetic_spans: usize,
}

impl Lowering {
    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn lower(&mut self, node: &SourceNode) -> NodeId {
        match node {
            SourceNode::Call {
                callee,
                args,
                trailing_block,
                span,
                resolved,
            } => {
                let span = match span {
                    Some(span) => *span,
                    None => {
                        self.synthetic_spans += 1;
                        Span::synthetic(self.synthetic_spans)
                    }
                };
                let args = args.iter().map(|arg| self.lower_argument(arg)).collect();
                let trailing_block = trailing_block
                    .as_ref()
                    .map(|statements| self.lower_block(statements));
                let id = self.push(Node::Call(Call {
                    callee: callee.clone(),
                    args,
                    trailing_block,
                    span,
                }));
                if let Some(fqn) = resolved {
                    self.symbols.insert(id, fqn.clone());
                }
                id
            }
            SourceNode::Block { statements } => self.lower_block(statements),
            SourceNode::Assignment { target, value } => {
                let target = self.lower(target);
                let value = value.as_deref().map(|value| self.lower(value));
                self.push(Node::Assignment(Assignment { target, value }))
            }
            SourceNode::Chain { receiver, selector } => {
                let receiver = self.lower(receiver);
                let selector = self.lower(selector);
                self.push(Node::Chain(Chain { receiver, selector }))
            }
            SourceNode::StringLiteral { raw, interpolated } => {
                self.push(Node::StringLiteral(StringLiteral {
                    raw: raw.clone(),
                    has_interpolation: *interpolated,
                }))
            }
            SourceNode::NullLiteral => self.push(Node::NullLiteral),
            SourceNode::Opaque { text } => self.push(Node::Opaque(Opaque { text: text.clone() })),
        }
    }

    fn lower_argument(&mut self, arg: &SourceArgument) -> NodeId {
        let value = arg.value.as_ref().map(|value| self.lower(value));
        self.push(Node::Argument(Argument {
            name: arg.name.clone(),
            value,
        }))
    }

    fn lower_block(&mut self, statements: &[SourceNode]) -> NodeId {
        let statements = statements.iter().map(|s| self.lower(s)).collect();
        self.push(Node::Block(Block { statements }))
    }
}
