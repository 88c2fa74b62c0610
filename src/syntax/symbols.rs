//! Resolved-symbol lookup supplied by the host

use super::NodeId;
use rustc_hash::FxHashMap;

/// Maps a call to the fully-qualified name of the function it invokes.
///
/// Hosts without type information simply do not provide a resolver; rules
/// that cannot work without one are then skipped for the file.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, call: NodeId) -> Option<&str>;
}

/// Resolver backed by the `resolved` annotations of a syntax dump
#[derive(Debug, Clone, Default)]
pub struct ResolvedSymbols {
    by_call: FxHashMap<NodeId, String>,
}

impl ResolvedSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, call: NodeId, fqn: impl Into<String>) {
        self.by_call.insert(call, fqn.into());
    }

    pub fn len(&self) -> usize {
        self.by_call.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_call.is_empty()
    }
}

impl SymbolResolver for ResolvedSymbols {
    fn resolve(&self, call: NodeId) -> Option<&str> {
        self.by_call.get(&call).map(String::as_str)
    }
}
