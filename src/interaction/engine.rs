//! Command interface to the rendering engine.
//!
//! The engine draws, lays out, hit-tests and animates; the controller only
//! tells it what to do through [`RenderCommand`]s and hears back through
//! [`Event`](super::Event)s.

use crate::model::{Generation, Node, NodeType, ScopeGraph};
use serde::Serialize;

/// Duration of the fit-and-center animation after a selection.
pub const FIT_DURATION_MS: u64 = 250;

/// Zoom floor applied while a new graph is being laid out, so the layout can
/// settle at any scale. Layout completion raises it again.
pub const RELEASED_MIN_ZOOM: f64 = 1e-50;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Replace everything on screen with these elements.
    ShowGraph {
        generation: Generation,
        elements: Vec<ElementView>,
    },
    SetTitle {
        title: String,
    },
    SetImage {
        id: String,
        uri: String,
    },
    /// Exactly these elements carry the faded class; all others do not.
    SetFaded {
        elements: Vec<String>,
    },
    ClearFaded,
    FitAndCenter {
        elements: Vec<String>,
        duration_ms: u64,
    },
    SetMinZoom {
        zoom: f64,
    },
    RunLayout(LayoutOptions),
}

pub trait RenderEngine {
    fn execute(&mut self, command: RenderCommand);
}

/// Records commands for a front-end to fetch, and serves as a test double.
impl RenderEngine for Vec<RenderCommand> {
    fn execute(&mut self, command: RenderCommand) {
        self.push(command);
    }
}

/// Layout request, serialized in the renderer's own option names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub name: String,
    pub roots: Vec<String>,
    /// Directed breadth-first layout degenerates on scope topologies.
    pub directed: bool,
    pub circle: bool,
    pub avoid_overlap: bool,
    pub animate: bool,
}

impl LayoutOptions {
    pub fn for_scope(graph: &ScopeGraph) -> Self {
        Self {
            name: "breadthfirst".to_string(),
            roots: graph.source_ids(),
            directed: false,
            circle: false,
            avoid_overlap: true,
            animate: false,
        }
    }
}

/// One graph element as the renderer receives it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementView {
    pub group: &'static str,
    pub data: ElementData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementData {
    Node(NodeData),
    Edge(EdgeData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_sink: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_source: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
}

pub fn elements(graph: &ScopeGraph) -> Vec<ElementView> {
    let nodes = graph.nodes().map(|node| ElementView {
        group: "nodes",
        data: ElementData::Node(node_data(node)),
    });
    let edges = graph.edges().map(|edge| ElementView {
        group: "edges",
        data: ElementData::Edge(EdgeData {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
        }),
    });
    nodes.chain(edges).collect()
}

fn node_data(node: &Node) -> NodeData {
    let compound = node.as_compound();
    NodeData {
        id: node.id().to_string(),
        node_type: node.node_type(),
        label: node.display_label().to_string(),
        in_sink: compound.map(|c| u8::from(c.in_sink)),
        is_source: compound.map(|c| u8::from(c.is_source)),
        img: compound.and_then(|c| c.image()).map(str::to_string),
    }
}
