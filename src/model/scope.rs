use super::document::{self, Record};
use super::node::{Edge, Node};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

/// Errors raised while reading a scope document. Each names the first
/// violation found; nothing is loaded when one is returned.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Scope file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scope file has no 'elements' collection")]
    MissingElements,
    #[error("Element #{index} is malformed: {reason}")]
    InvalidElement { index: usize, reason: String },
    #[error("Node '{id}' is missing required field '{field}'")]
    MissingField { id: String, field: String },
    #[error("Node '{id}' has an invalid '{field}' (expected {expected})")]
    InvalidField {
        id: String,
        field: String,
        expected: String,
    },
    #[error("Node '{id}' has unknown type '{tag}'")]
    UnknownNodeType { id: String, tag: String },
    #[error("Duplicate element identifier '{0}'")]
    DuplicateId(String),
    #[error("Edge '{edge}' references unknown node '{node}'")]
    DanglingEdge { edge: String, node: String },
}

/// Load counter stamped on every graph. Asset reads carry the generation
/// they were issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Elements highlighted around a selected node: the node, every node one edge
/// away in either direction, and the connecting edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighborhood {
    pub nodes: BTreeSet<String>,
    pub edges: BTreeSet<String>,
}

impl Neighborhood {
    pub fn contains(&self, element_id: &str) -> bool {
        self.nodes.contains(element_id) || self.edges.contains(element_id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &String> {
        self.nodes.iter().chain(self.edges.iter())
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One loaded scope. Built whole by [`ScopeGraph::parse`] and never merged
/// into; a new load produces a new graph.
#[derive(Debug, Clone)]
pub struct ScopeGraph {
    title: String,
    generation: Generation,
    graph: DiGraph<Node, Edge>,
    node_indices: HashMap<String, NodeIndex>,
}

impl ScopeGraph {
    pub fn parse(
        title: impl Into<String>,
        raw: &str,
        generation: Generation,
    ) -> Result<Self, FormatError> {
        let records = document::read_records(raw)?;

        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut taken: HashSet<String> = HashSet::new();
        let mut pending_edges = Vec::new();

        for record in records {
            match record {
                Record::Node(node) => {
                    if !taken.insert(node.id().to_string()) {
                        return Err(FormatError::DuplicateId(node.id().to_string()));
                    }
                    let id = node.id().to_string();
                    let idx = graph.add_node(node);
                    node_indices.insert(id, idx);
                }
                Record::Edge { id, source, target } => {
                    if let Some(id) = &id {
                        if !taken.insert(id.clone()) {
                            return Err(FormatError::DuplicateId(id.clone()));
                        }
                    }
                    pending_edges.push((id, source, target));
                }
            }
        }

        // Edges may precede their endpoints in flat element lists
        for (ordinal, (id, source, target)) in pending_edges.into_iter().enumerate() {
            let id = match id {
                Some(id) => id,
                None => generated_edge_id(ordinal, &mut taken),
            };
            let from = *node_indices
                .get(&source)
                .ok_or_else(|| FormatError::DanglingEdge {
                    edge: id.clone(),
                    node: source.clone(),
                })?;
            let to = *node_indices
                .get(&target)
                .ok_or_else(|| FormatError::DanglingEdge {
                    edge: id.clone(),
                    node: target.clone(),
                })?;
            graph.add_edge(from, to, Edge { id, source, target });
        }

        Ok(Self {
            title: title.into(),
            generation,
            graph,
            node_indices,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_indices.get(id).map(|idx| &self.graph[*idx])
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let idx = *self.node_indices.get(id)?;
        Some(&mut self.graph[idx])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges in document order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Identifiers of every node and edge.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes()
            .map(Node::id)
            .chain(self.edges().map(|e| e.id.as_str()))
    }

    /// Compounds flagged as search sources; these root the layout.
    pub fn source_ids(&self) -> Vec<String> {
        self.nodes()
            .filter(|n| n.as_compound().is_some_and(|c| c.is_source))
            .map(|n| n.id().to_string())
            .collect()
    }

    pub fn neighborhood(&self, id: &str) -> Option<Neighborhood> {
        let idx = *self.node_indices.get(id)?;
        let mut hood = Neighborhood::default();
        hood.nodes.insert(id.to_string());

        for direction in [Direction::Outgoing, Direction::Incoming] {
            for edge in self.graph.edges_directed(idx, direction) {
                let other = if direction == Direction::Outgoing {
                    edge.target()
                } else {
                    edge.source()
                };
                hood.nodes.insert(self.graph[other].id().to_string());
                hood.edges.insert(edge.weight().id.clone());
            }
        }

        Some(hood)
    }
}

fn generated_edge_id(ordinal: usize, taken: &mut HashSet<String>) -> String {
    let mut candidate = format!("edge-{}", ordinal);
    let mut suffix = 1;
    while taken.contains(&candidate) {
        candidate = format!("edge-{}-{}", ordinal, suffix);
        suffix += 1;
    }
    taken.insert(candidate.clone());
    candidate
}
