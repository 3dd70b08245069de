use crate::labels::{self, CompoundLabel, ReactionLabels};
use serde::Serialize;

/// Node kind as written in the scope document's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Compound,
    Reaction,
}

impl NodeType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "compound" => Some(Self::Compound),
            "reaction" => Some(Self::Reaction),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compound => "compound",
            Self::Reaction => "reaction",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub names: Vec<String>,
    pub smiles: String,
    pub inchi: String,
    pub in_sink: bool,
    pub is_source: bool,
    label: CompoundLabel,
    image: Option<String>,
}

impl Compound {
    pub fn new(
        names: Vec<String>,
        smiles: String,
        inchi: String,
        in_sink: bool,
        is_source: bool,
    ) -> Self {
        let label = labels::compound_label(&names);
        Self {
            names,
            smiles,
            inchi,
            in_sink,
            is_source,
            label,
            image: None,
        }
    }

    /// Short display name derived at load time.
    pub fn label(&self) -> &CompoundLabel {
        &self.label
    }

    /// Depiction as an embeddable data URI, once an asset has been attached.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub(crate) fn set_image(&mut self, uri: String) {
        self.image = Some(uri);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub rule_ids: Vec<String>,
    pub ec_numbers: Vec<String>,
    pub score: f64,
    pub chemical_score: Option<f64>,
    pub smiles: String,
    pub diameter: i64,
    pub iteration: i64,
    labels: ReactionLabels,
}

impl Reaction {
    pub fn new(
        rule_ids: Vec<String>,
        ec_numbers: Vec<String>,
        score: f64,
        chemical_score: Option<f64>,
        smiles: String,
        diameter: i64,
        iteration: i64,
    ) -> Self {
        let labels = labels::reaction_labels(&ec_numbers, score, chemical_score);
        Self {
            rule_ids,
            ec_numbers,
            score,
            chemical_score,
            smiles,
            diameter,
            iteration,
            labels,
        }
    }

    /// EC label and formatted scores derived at load time.
    pub fn labels(&self) -> &ReactionLabels {
        &self.labels
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Compound(Compound),
    Reaction(Reaction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Canonical accession; for compounds this is also the InChIKey.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Compound(_) => NodeType::Compound,
            NodeKind::Reaction(_) => NodeType::Reaction,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match &self.kind {
            NodeKind::Compound(c) => Some(c),
            NodeKind::Reaction(_) => None,
        }
    }

    pub fn as_reaction(&self) -> Option<&Reaction> {
        match &self.kind {
            NodeKind::Reaction(r) => Some(r),
            NodeKind::Compound(_) => None,
        }
    }

    pub(crate) fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match &mut self.kind {
            NodeKind::Compound(c) => Some(c),
            NodeKind::Reaction(_) => None,
        }
    }

    /// Text drawn on the node by the renderer.
    pub fn display_label(&self) -> &str {
        match &self.kind {
            NodeKind::Compound(c) => c.label().as_str(),
            NodeKind::Reaction(r) => &r.labels().ec,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}
