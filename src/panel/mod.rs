//! Detail panel shown next to the graph.
//!
//! The panel holds no state. [`project`] turns the active graph and the node
//! the panel should describe into an [`InfoView`]; [`render_html`] turns that
//! view into markup for the browser front-end.

mod html;
pub mod links;

pub use html::render_html;

use crate::labels;
use crate::model::{Compound, Node, NodeKind, Reaction, ScopeGraph};
use serde::Serialize;

/// Text with an optional external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedText {
    pub text: String,
    pub href: Option<String>,
}

impl LinkedText {
    fn new(text: &str, href: Option<String>) -> Self {
        Self {
            text: text.to_string(),
            href,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundView {
    pub names: Vec<LinkedText>,
    pub image: Option<String>,
    /// "Yes" or "No".
    pub in_sink: String,
    pub smiles: LinkedText,
    pub inchi: LinkedText,
    pub inchikey: LinkedText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformationView {
    pub id: String,
    pub rule_ids: Vec<LinkedText>,
    pub ec_numbers: Vec<String>,
    pub diameter: i64,
    pub iteration: i64,
    pub score: String,
    pub chemical_score: String,
    pub reaction_smiles: String,
    pub selenzyme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum InfoView {
    /// Legend and loading instructions; independent of the graph.
    Legend,
    Compound(CompoundView),
    Transformation(TransformationView),
}

/// Panel contents for `focus` on `graph`. Falls back to the legend when there
/// is no graph, no focus, or the focus is not a node of this graph.
pub fn project(graph: Option<&ScopeGraph>, focus: Option<&str>) -> InfoView {
    let node = match (graph, focus) {
        (Some(graph), Some(id)) => graph.node(id),
        _ => None,
    };
    match node {
        Some(node) => node_view(node),
        None => InfoView::Legend,
    }
}

pub fn node_view(node: &Node) -> InfoView {
    match node.kind() {
        NodeKind::Compound(compound) => InfoView::Compound(compound_view(node.id(), compound)),
        NodeKind::Reaction(reaction) => {
            InfoView::Transformation(transformation_view(node.id(), reaction))
        }
    }
}

fn compound_view(id: &str, compound: &Compound) -> CompoundView {
    CompoundView {
        names: compound
            .names
            .iter()
            .map(|name| LinkedText::new(name, links::compound_accession(name)))
            .collect(),
        image: compound.image().map(str::to_string),
        in_sink: if compound.in_sink { "Yes" } else { "No" }.to_string(),
        smiles: LinkedText::new(
            &compound.smiles,
            Some(links::pubchem_identity(&compound.smiles)),
        ),
        inchi: LinkedText::new(
            &compound.inchi,
            Some(links::pubchem_identity(&compound.inchi)),
        ),
        inchikey: LinkedText::new(id, Some(links::web_search(id))),
    }
}

fn transformation_view(id: &str, reaction: &Reaction) -> TransformationView {
    let derived = reaction.labels();
    TransformationView {
        id: id.to_string(),
        rule_ids: labels::sorted(&reaction.rule_ids)
            .iter()
            .map(|rule| LinkedText::new(rule, links::rule_accession(rule)))
            .collect(),
        ec_numbers: labels::sorted(&reaction.ec_numbers),
        diameter: reaction.diameter,
        iteration: reaction.iteration,
        score: derived.score.clone(),
        chemical_score: derived.chemical_score.clone(),
        reaction_smiles: reaction.smiles.clone(),
        selenzyme: links::selenzyme(&reaction.smiles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{self, AssetTicket};
    use crate::model::Generation;
    use serde_json::json;

    fn graph() -> ScopeGraph {
        let doc = json!({"elements": {"nodes": [
            {"data": {
                "id": "XLYOFNOQVPJJNP-UHFFFAOYSA-N", "type": "compound",
                "Names": ["MNXM2", "water"], "SMILES": "O", "InChI": "InChI=1S/H2O/h1H2",
                "inSink": 1, "isSource": 0,
            }},
            {"data": {
                "id": "T1", "type": "reaction",
                "Rule ID": ["RR-b", "MNXR94682_rule2"], "EC number": ["3.1.1.2", "1.1.1.1"],
                "Score": 0.5, "Reaction SMILES": "O>>[OH-]", "Diameter": 16, "Iteration": 3,
            }},
        ]}});
        ScopeGraph::parse("t", &doc.to_string(), Generation::new(1)).unwrap()
    }

    #[test]
    fn test_legend_without_focus() {
        let g = graph();
        assert_eq!(project(None, None), InfoView::Legend);
        assert_eq!(project(Some(&g), None), InfoView::Legend);
        assert_eq!(project(Some(&g), Some("missing")), InfoView::Legend);
    }

    #[test]
    fn test_compound_view() {
        let g = graph();
        let InfoView::Compound(view) = project(Some(&g), Some("XLYOFNOQVPJJNP-UHFFFAOYSA-N"))
        else {
            panic!("expected compound view");
        };
        assert_eq!(view.names.len(), 2);
        assert!(view.names[0].href.as_deref().unwrap().ends_with("chem=MNXM2"));
        assert!(view.names[1].href.is_none());
        assert_eq!(view.in_sink, "Yes");
        assert_eq!(view.smiles.text, "O");
        assert!(view.inchikey.href.as_deref().unwrap().contains("google"));
        assert!(view.image.is_none());
    }

    #[test]
    fn test_compound_view_shows_attached_image() {
        let mut g = graph();
        let ticket = AssetTicket::new(Generation::new(1), "XLYOFNOQVPJJNP-UHFFFAOYSA-N.svg");
        assets::attach(&mut g, &ticket, b"<svg/>");
        let InfoView::Compound(view) = project(Some(&g), Some("XLYOFNOQVPJJNP-UHFFFAOYSA-N"))
        else {
            panic!("expected compound view");
        };
        assert_eq!(view.image, Some(assets::svg_data_uri(b"<svg/>")));
    }

    #[test]
    fn test_transformation_view() {
        let g = graph();
        let InfoView::Transformation(view) = project(Some(&g), Some("T1")) else {
            panic!("expected transformation view");
        };
        let rules: Vec<_> = view.rule_ids.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(rules, vec!["MNXR94682_rule2", "RR-b"]);
        assert!(view.rule_ids[0].href.as_deref().unwrap().ends_with("equa=MNXR94682"));
        assert!(view.rule_ids[1].href.is_none());
        assert_eq!(view.ec_numbers, vec!["1.1.1.1", "3.1.1.2"]);
        assert_eq!(view.score, "0.500");
        assert_eq!(view.chemical_score, "NA");
        assert_eq!(view.diameter, 16);
        assert_eq!(view.iteration, 3);
        assert!(view.selenzyme.ends_with("smarts=O%3E%3E%5BOH-%5D"));
    }
}
