//! Resolution context: the tree of plugin imports on the current path
//!
//! Every plugin being resolved pushes a node under the node of the template
//! that declared it. Nodes live in an arena and point upward to their
//! parent; a parent owns the ids of its children. The tree belongs to a
//! single top-level resolution and is dropped when it returns.

use devfile_api::ImportReference;

use crate::error::{Error, Result};

/// Name rendered for the root node in cycle chains
pub const ROOT_NAME: &str = "devfile";

/// Handle to a node in a [`ResolutionContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    component_name: String,
    /// `None` only for the root
    reference: Option<ImportReference>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Tree of imports rooted at the top-level devfile
#[derive(Debug)]
pub struct ResolutionContext {
    nodes: Vec<Node>,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                component_name: ROOT_NAME.to_string(),
                reference: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Record that `parent` imports `reference` through plugin `name`.
    ///
    /// Returns the new child so resolution can continue on the extended path.
    pub fn add_plugin(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        reference: ImportReference,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            component_name: name.into(),
            reference: Some(reference),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Fail if the reference at `node` already appears on the path above it
    pub fn has_cycle(&self, node: NodeId) -> Result<()> {
        let Some(reference) = self.reference(node) else {
            return Ok(());
        };
        let repeated = self
            .ancestors(node)
            .any(|ancestor| self.reference(ancestor) == Some(reference));
        if repeated {
            let chain = self.chain(node).join(" -> ");
            tracing::debug!(%chain, "Import cycle detected");
            return Err(Error::Cycle { chain });
        }
        Ok(())
    }

    /// Component names from the root down to `node`
    pub fn chain(&self, node: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = std::iter::once(node)
            .chain(self.ancestors(node))
            .map(|id| self.nodes[id.0].component_name.as_str())
            .collect();
        names.reverse();
        names
    }

    pub fn component_name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].component_name
    }

    /// Import recorded at `node`; `None` for the root
    pub fn reference(&self, node: NodeId) -> Option<&ImportReference> {
        self.nodes[node.0].reference.as_ref()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Number of imports between the root and `node`
    pub fn depth(&self, node: NodeId) -> usize {
        self.ancestors(node).count()
    }

    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[node.0].parent, move |id| {
            self.nodes[id.0].parent
        })
    }
}
