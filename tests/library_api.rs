//! Integration tests for the scope-viewer library API.

use scope_viewer::interaction::{ElementData, FIT_DURATION_MS, RELEASED_MIN_ZOOM};
use scope_viewer::panel::{self, links};
use scope_viewer::{
    AttachOutcome, Event, FormatError, Generation, InfoView, RenderCommand, ScopeGraph, Selection,
    Viewer, ViewerError,
};
use serde_json::json;

/// S (source) -> R1 -> P (sink), plus an unrelated branch Q -> R2 -> P.
fn pathway() -> String {
    json!({"elements": {
        "nodes": [
            {"data": {"id": "S", "type": "compound", "Names": ["MNXM1"], "SMILES": "CCO",
                      "InChI": "InChI=1S/C2H6O/c1-2-3/h3H,2H2,1H3", "inSink": 0, "isSource": 1}},
            {"data": {"id": "P", "type": "compound", "Names": ["MNXM1234567890"], "inSink": 1}},
            {"data": {"id": "Q", "type": "compound", "Names": ["quinone"], "inSink": 0}},
            {"data": {"id": "R1", "type": "reaction", "Rule ID": ["MNXR94682_RP3"],
                      "EC number": ["3.1.1.2", "1.1.1.1"], "Score": 0.123456,
                      "Reaction SMILES": "CCO>>CC=O", "Diameter": 16, "Iteration": 1}},
            {"data": {"id": "R2", "type": "reaction", "Rule ID": ["RR-02"],
                      "EC number": [], "Score": -1.0, "ChemicalScore": 0.5,
                      "Reaction SMILES": "C>>C", "Diameter": 2, "Iteration": 2}},
        ],
        "edges": [
            {"data": {"id": "e1", "source": "S", "target": "R1"}},
            {"data": {"id": "e2", "source": "R1", "target": "P"}},
            {"data": {"id": "e3", "source": "Q", "target": "R2"}},
            {"data": {"id": "e4", "source": "R2", "target": "P"}},
        ],
    }})
    .to_string()
}

fn loaded() -> Viewer<Vec<RenderCommand>> {
    let mut viewer = Viewer::new(Vec::new());
    viewer.load("pathway.json", &pathway()).unwrap();
    viewer.engine_mut().clear();
    viewer
}

#[test]
fn test_parse_counts_nodes_and_edges() {
    let graph = ScopeGraph::parse("pathway", &pathway(), Generation::new(1)).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);

    for edge in graph.edges() {
        assert!(graph.contains_node(&edge.source));
        assert!(graph.contains_node(&edge.target));
    }
    assert_eq!(graph.source_ids(), vec!["S".to_string()]);
}

#[test]
fn test_parse_rejects_dangling_edge() {
    let raw = json!({"elements": [
        {"group": "nodes", "data": {"id": "A", "type": "compound", "inSink": 0}},
        {"group": "edges", "data": {"id": "e", "source": "A", "target": "B"}},
    ]})
    .to_string();
    let err = ScopeGraph::parse("broken", &raw, Generation::new(1)).unwrap_err();
    assert!(matches!(err, FormatError::DanglingEdge { .. }));
}

#[test]
fn test_labels_on_screen() {
    let mut viewer = Viewer::new(Vec::new());
    viewer.load("pathway.json", &pathway()).unwrap();

    let elements = match &viewer.engine()[0] {
        RenderCommand::ShowGraph { elements, .. } => elements.clone(),
        other => panic!("expected ShowGraph, got {:?}", other),
    };
    let label = |id: &str| {
        elements
            .iter()
            .find_map(|element| match &element.data {
                ElementData::Node(node) if node.id == id => Some(node.label.clone()),
                _ => None,
            })
            .unwrap()
    };

    assert_eq!(label("S"), "MNXM1");
    assert_eq!(label("P"), "MNXM123456..");
    assert_eq!(label("R1"), "1.1.1.1");
    assert_eq!(label("R2"), "");
}

#[test]
fn test_load_sets_title_and_releases_zoom() {
    let mut viewer = Viewer::new(Vec::new());
    let generation = viewer.load("out/pathway.json", &pathway()).unwrap();
    assert_eq!(generation, Generation::new(1));
    assert!(viewer.engine().contains(&RenderCommand::SetTitle {
        title: "pathway".to_string()
    }));
    assert_eq!(viewer.min_zoom(), Some(RELEASED_MIN_ZOOM));

    viewer.layout_complete(0.42);
    assert_eq!(viewer.min_zoom(), Some(0.42));
}

#[test]
fn test_selection_fades_everything_outside_neighborhood() {
    let mut viewer = loaded();
    viewer.handle(Event::TapNode { id: "R1".to_string() }).unwrap();

    assert_eq!(viewer.selection(), &Selection::NodeSelected("R1".to_string()));
    let faded: Vec<&str> = viewer.faded().iter().map(String::as_str).collect();
    assert_eq!(faded, vec!["Q", "R2", "e3", "e4"]);
    for kept in ["R1", "S", "P", "e1", "e2"] {
        assert!(!viewer.is_faded(kept), "{} should stay visible", kept);
    }

    assert!(viewer.engine().iter().any(|command| matches!(
        command,
        RenderCommand::FitAndCenter { duration_ms, .. } if *duration_ms == FIT_DURATION_MS
    )));
}

#[test]
fn test_background_tap_restores_legend() {
    let mut viewer = loaded();
    viewer.handle(Event::TapNode { id: "S".to_string() }).unwrap();
    assert!(matches!(viewer.panel(), InfoView::Compound(_)));

    viewer.handle(Event::TapBackground).unwrap();
    assert_eq!(viewer.selection(), &Selection::Idle);
    assert!(viewer.faded().is_empty());
    assert_eq!(viewer.panel(), InfoView::Legend);
    assert_eq!(viewer.engine().last(), Some(&RenderCommand::ClearFaded));
}

#[test]
fn test_unknown_node_leaves_state_alone() {
    let mut viewer = loaded();
    viewer.handle(Event::TapNode { id: "S".to_string() }).unwrap();
    let before = viewer.faded().clone();

    let err = viewer
        .handle(Event::TapNode { id: "nope".to_string() })
        .unwrap_err();
    assert!(matches!(err, ViewerError::UnknownNode(_)));
    assert_eq!(viewer.faded(), &before);
    assert_eq!(viewer.selection(), &Selection::NodeSelected("S".to_string()));
}

#[test]
fn test_malformed_reload_keeps_previous_graph() {
    let mut viewer = loaded();
    let err = viewer.load("bad.json", "{\"elements\": [").unwrap_err();
    assert!(matches!(err, ViewerError::Format(FormatError::Json(_))));
    assert_eq!(viewer.generation(), Generation::new(1));
    assert_eq!(viewer.graph().map(ScopeGraph::title), Some("pathway"));
    assert!(viewer.engine().is_empty());
}

#[test]
fn test_reload_drops_pending_assets() {
    let mut viewer = loaded();
    let pending = viewer.asset_ticket("S.svg");

    viewer.load("pathway.json", &pathway()).unwrap();
    assert_eq!(viewer.attach_asset(&pending, b"<svg/>"), AttachOutcome::Stale);

    let fresh = viewer.asset_ticket("S.svg");
    assert_eq!(
        viewer.attach_asset(&fresh, b"<svg/>"),
        AttachOutcome::Attached("S".to_string())
    );
}

#[test]
fn test_unmatched_asset_is_silent() {
    let mut viewer = loaded();
    let ticket = viewer.asset_ticket("C99999.svg");
    assert_eq!(
        viewer.attach_asset(&ticket, b"<svg/>"),
        AttachOutcome::Unmatched("C99999".to_string())
    );
    assert!(viewer.engine().is_empty());
}

#[test]
fn test_compound_panel_links() {
    let mut viewer = loaded();
    let ticket = viewer.asset_ticket("S.svg");
    viewer.attach_asset(&ticket, b"<svg/>");
    viewer.select("S").unwrap();

    let compound = match viewer.panel() {
        InfoView::Compound(compound) => compound,
        other => panic!("expected compound view, got {:?}", other),
    };
    assert_eq!(
        compound.names[0].href.as_deref(),
        Some("http://www.metanetx.org/cgi-bin/mnxweb/chem_info?chem=MNXM1")
    );
    assert_eq!(compound.in_sink, "No");
    assert!(
        compound
            .image
            .as_deref()
            .is_some_and(|uri| uri.starts_with("data:image/svg+xml;charset=utf-8;base64,"))
    );

    let html = panel::render_html(&InfoView::Compound(compound));
    assert!(html.contains("chem_info?chem=MNXM1"));
}

#[test]
fn test_transformation_panel() {
    let mut viewer = loaded();
    viewer.select("R1").unwrap();

    let transformation = match viewer.panel() {
        InfoView::Transformation(transformation) => transformation,
        other => panic!("expected transformation view, got {:?}", other),
    };
    assert_eq!(transformation.ec_numbers, vec!["1.1.1.1", "3.1.1.2"]);
    assert_eq!(transformation.score, "0.123");
    assert_eq!(transformation.chemical_score, "NA");
    assert_eq!(
        transformation.rule_ids[0].href.as_deref(),
        Some("http://www.metanetx.org/cgi-bin/mnxweb/equa_info?equa=MNXR94682")
    );
    assert_eq!(transformation.selenzyme, links::selenzyme("CCO>>CC=O"));
}

#[test]
fn test_layout_complete_resets_panel_but_keeps_selection() {
    let mut viewer = loaded();
    viewer.select("S").unwrap();
    viewer.layout_complete(1.0);

    assert_eq!(viewer.panel(), InfoView::Legend);
    assert_eq!(viewer.selection(), &Selection::NodeSelected("S".to_string()));
    assert!(!viewer.faded().is_empty());
}
