//! Binding of depiction files to compound nodes.
//!
//! A depiction file is matched to a node by its basename without extension.
//! Reads are asynchronous, so every read is issued with an [`AssetTicket`]
//! naming the graph generation it was started against; a completion whose
//! generation is no longer active is dropped.

use crate::model::{Generation, ScopeGraph};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;charset=utf-8;base64,";

/// Handle for one in-flight asset read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTicket {
    pub generation: Generation,
    pub filename: String,
}

impl AssetTicket {
    pub fn new(generation: Generation, filename: impl Into<String>) -> Self {
        Self {
            generation,
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Image stored on the compound with this id.
    Attached(String),
    /// No compound with a matching id. Routine, not an error.
    Unmatched(String),
    /// The read was issued against a graph that has since been replaced.
    Stale,
}

/// File name with any directory prefix and the final extension removed.
/// Depictions match the compound whose id equals this stem; scope titles
/// use it too.
pub fn file_stem(filename: &str) -> &str {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    }
}

pub fn svg_data_uri(content: &[u8]) -> String {
    let mut uri = String::with_capacity(SVG_DATA_URI_PREFIX.len() + content.len() * 4 / 3 + 4);
    uri.push_str(SVG_DATA_URI_PREFIX);
    STANDARD.encode_string(content, &mut uri);
    uri
}

pub fn is_svg(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("svg"))
}

/// Attach a completed read to `graph`. Reattaching the same file overwrites the
/// same field, so completions may arrive in any order.
pub fn attach(graph: &mut ScopeGraph, ticket: &AssetTicket, content: &[u8]) -> AttachOutcome {
    if ticket.generation != graph.generation() {
        return AttachOutcome::Stale;
    }

    let id = file_stem(&ticket.filename);
    match graph.node_mut(id).and_then(|n| n.as_compound_mut()) {
        Some(compound) => {
            compound.set_image(svg_data_uri(content));
            AttachOutcome::Attached(id.to_string())
        }
        None => AttachOutcome::Unmatched(id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn graph(generation: u64) -> ScopeGraph {
        let doc = json!({"elements": {"nodes": [
            {"data": {"id": "C00001", "type": "compound", "inSink": 1}},
            {"data": {"id": "C00002", "type": "compound", "inSink": 0}},
            {"data": {
                "id": "R1", "type": "reaction", "Rule ID": [], "EC number": [],
                "Score": 1.0, "Reaction SMILES": "", "Diameter": 2, "Iteration": 0,
            }},
        ]}});
        ScopeGraph::parse("t", &doc.to_string(), Generation::new(generation)).unwrap()
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("C00001.svg"), "C00001");
        assert_eq!(file_stem("out/svg/C00001.svg"), "C00001");
        assert_eq!(file_stem("C:\\out\\svg\\C00001.svg"), "C00001");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem("noext"), "noext");
    }

    #[test]
    fn test_svg_data_uri() {
        assert_eq!(
            svg_data_uri(b"<svg/>"),
            "data:image/svg+xml;charset=utf-8;base64,PHN2Zy8+"
        );
    }

    #[test]
    fn test_is_svg() {
        assert!(is_svg("a.svg"));
        assert!(is_svg("dir/A.SVG"));
        assert!(!is_svg("a.png"));
        assert!(!is_svg("svg"));
    }

    #[test]
    fn test_attach_matching_compound() {
        let mut g = graph(1);
        let ticket = AssetTicket::new(Generation::new(1), "C00001.svg");
        assert_eq!(
            attach(&mut g, &ticket, b"<svg/>"),
            AttachOutcome::Attached("C00001".to_string())
        );
        let image = g.node("C00001").unwrap().as_compound().unwrap().image();
        assert_eq!(image, Some(svg_data_uri(b"<svg/>").as_str()));
        assert!(g.node("C00002").unwrap().as_compound().unwrap().image().is_none());
    }

    #[test]
    fn test_attach_unmatched_and_reaction_are_noops() {
        let mut g = graph(1);
        let before = g.clone();
        let outcome = attach(&mut g, &AssetTicket::new(Generation::new(1), "C99999.svg"), b"x");
        assert_eq!(outcome, AttachOutcome::Unmatched("C99999".to_string()));
        let outcome = attach(&mut g, &AssetTicket::new(Generation::new(1), "R1.svg"), b"x");
        assert_eq!(outcome, AttachOutcome::Unmatched("R1".to_string()));
        assert!(g.nodes().eq(before.nodes()));
    }

    #[test]
    fn test_attach_stale_generation_dropped() {
        let mut g = graph(2);
        let outcome = attach(&mut g, &AssetTicket::new(Generation::new(1), "C00001.svg"), b"x");
        assert_eq!(outcome, AttachOutcome::Stale);
        assert!(g.node("C00001").unwrap().as_compound().unwrap().image().is_none());
    }

    #[test]
    fn test_attach_is_order_independent() {
        let ticket_a = AssetTicket::new(Generation::new(1), "C00001.svg");
        let ticket_b = AssetTicket::new(Generation::new(1), "C00002.svg");

        let mut first = graph(1);
        attach(&mut first, &ticket_a, b"<a/>");
        attach(&mut first, &ticket_b, b"<b/>");

        let mut second = graph(1);
        attach(&mut second, &ticket_b, b"<b/>");
        attach(&mut second, &ticket_a, b"<a/>");
        attach(&mut second, &ticket_a, b"<a/>");

        assert!(first.nodes().eq(second.nodes()));
    }
}
