use super::engine::{
    self, FIT_DURATION_MS, LayoutOptions, RELEASED_MIN_ZOOM, RenderCommand, RenderEngine,
};
use super::event::Event;
use crate::assets::{self, AssetTicket, AttachOutcome};
use crate::model::{FormatError, Generation, ScopeGraph};
use crate::panel::{self, InfoView};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("No node '{0}' in the current scope")]
    UnknownNode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    NodeSelected(String),
}

impl Selection {
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Selection::Idle => None,
            Selection::NodeSelected(id) => Some(id),
        }
    }
}

/// The viewer's whole mutable state: active graph, selection, faded elements
/// and panel focus. Every change goes through one of its operations, and the
/// engine is told about each visible change as it happens.
pub struct Viewer<E: RenderEngine> {
    engine: E,
    graph: Option<ScopeGraph>,
    /// Generation of the last successful load; zero before the first.
    generation: Generation,
    selection: Selection,
    faded: BTreeSet<String>,
    /// Node the panel describes. Follows the selection, except that a
    /// finished layout resets the panel to the legend.
    panel_focus: Option<String>,
    animate: bool,
    min_zoom: Option<f64>,
}

impl<E: RenderEngine> Viewer<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            graph: None,
            generation: Generation::new(0),
            selection: Selection::Idle,
            faded: BTreeSet::new(),
            panel_focus: None,
            animate: true,
            min_zoom: None,
        }
    }

    pub fn with_animation(mut self, enabled: bool) -> Self {
        self.animate = enabled;
        self
    }

    pub fn handle(&mut self, event: Event) -> Result<(), ViewerError> {
        debug!(kind = ?event.kind(), "dispatching event");
        match event {
            Event::TapNode { id } => self.select(&id),
            Event::TapBackground => {
                self.clear_selection();
                Ok(())
            }
            Event::LayoutComplete { zoom } => {
                self.layout_complete(zoom);
                Ok(())
            }
            Event::ScopeFileReady { filename, content } => {
                self.load(&filename, &content).map(|_| ())
            }
            Event::AssetFileReady { ticket, content } => {
                self.attach_asset(&ticket, &content);
                Ok(())
            }
        }
    }

    /// Replace the active graph with the scope in `content`. On error the
    /// previous graph, selection and screen stay exactly as they were.
    pub fn load(&mut self, filename: &str, content: &str) -> Result<Generation, ViewerError> {
        let generation = self.generation.next();
        let graph = match ScopeGraph::parse(assets::file_stem(filename), content, generation) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(file = filename, error = %e, "rejected scope file");
                return Err(e.into());
            }
        };
        info!(
            file = filename,
            generation = generation.value(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded scope"
        );

        self.generation = generation;
        self.selection = Selection::Idle;
        self.faded.clear();
        self.panel_focus = None;
        self.min_zoom = Some(RELEASED_MIN_ZOOM);

        self.engine.execute(RenderCommand::ShowGraph {
            generation,
            elements: engine::elements(&graph),
        });
        self.engine.execute(RenderCommand::SetTitle {
            title: graph.title().to_string(),
        });
        self.engine.execute(RenderCommand::SetMinZoom {
            zoom: RELEASED_MIN_ZOOM,
        });
        self.engine
            .execute(RenderCommand::RunLayout(LayoutOptions::for_scope(&graph)));

        self.graph = Some(graph);
        Ok(generation)
    }

    /// Re-send the current state to a renderer that has just attached: the
    /// active graph with its depictions, the title, a fresh layout and the
    /// faded set. Does nothing before the first load.
    pub fn replay(&mut self) {
        let Some(graph) = self.graph.as_ref() else {
            return;
        };
        self.min_zoom = Some(RELEASED_MIN_ZOOM);

        self.engine.execute(RenderCommand::ShowGraph {
            generation: self.generation,
            elements: engine::elements(graph),
        });
        self.engine.execute(RenderCommand::SetTitle {
            title: graph.title().to_string(),
        });
        self.engine.execute(RenderCommand::SetMinZoom {
            zoom: RELEASED_MIN_ZOOM,
        });
        self.engine
            .execute(RenderCommand::RunLayout(LayoutOptions::for_scope(graph)));
        if !self.faded.is_empty() {
            self.engine.execute(RenderCommand::SetFaded {
                elements: self.faded.iter().cloned().collect(),
            });
        }
        debug!(generation = self.generation.value(), "replayed scope");
    }

    /// Ticket for an asset read starting now, bound to the active graph.
    pub fn asset_ticket(&self, filename: impl Into<String>) -> AssetTicket {
        AssetTicket::new(self.generation, filename)
    }

    pub fn attach_asset(&mut self, ticket: &AssetTicket, content: &[u8]) -> AttachOutcome {
        let outcome = match self.graph.as_mut() {
            Some(graph) => assets::attach(graph, ticket, content),
            None => AttachOutcome::Stale,
        };

        match &outcome {
            AttachOutcome::Attached(id) => {
                let uri = self
                    .graph
                    .as_ref()
                    .and_then(|g| g.node(id))
                    .and_then(|n| n.as_compound())
                    .and_then(|c| c.image())
                    .map(str::to_string);
                if let Some(uri) = uri {
                    self.engine.execute(RenderCommand::SetImage {
                        id: id.clone(),
                        uri,
                    });
                }
                debug!(file = %ticket.filename, node = %id, "attached depiction");
            }
            AttachOutcome::Unmatched(id) => {
                debug!(file = %ticket.filename, node = %id, "no compound for depiction");
            }
            AttachOutcome::Stale => {
                debug!(
                    file = %ticket.filename,
                    issued = ticket.generation.value(),
                    active = self.generation.value(),
                    "dropped depiction for a replaced scope"
                );
            }
        }
        outcome
    }

    /// Select `id`: fade everything outside its neighborhood, frame the
    /// neighborhood, and point the panel at the node.
    pub fn select(&mut self, id: &str) -> Result<(), ViewerError> {
        let graph = self
            .graph
            .as_ref()
            .ok_or_else(|| ViewerError::UnknownNode(id.to_string()))?;
        let hood = graph
            .neighborhood(id)
            .ok_or_else(|| ViewerError::UnknownNode(id.to_string()))?;

        self.faded = graph
            .element_ids()
            .filter(|element| !hood.contains(element))
            .map(str::to_string)
            .collect();
        self.selection = Selection::NodeSelected(id.to_string());
        self.panel_focus = Some(id.to_string());

        self.engine.execute(RenderCommand::SetFaded {
            elements: self.faded.iter().cloned().collect(),
        });
        if self.animate {
            self.engine.execute(RenderCommand::FitAndCenter {
                elements: hood.elements().cloned().collect(),
                duration_ms: FIT_DURATION_MS,
            });
        }
        debug!(node = id, highlighted = hood.len(), "selected node");
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::Idle;
        self.faded.clear();
        self.panel_focus = None;
        self.engine.execute(RenderCommand::ClearFaded);
    }

    /// Stop users zooming out past the view the layout produced.
    pub fn layout_complete(&mut self, zoom: f64) {
        self.min_zoom = Some(zoom);
        self.panel_focus = None;
        self.engine.execute(RenderCommand::SetMinZoom { zoom });
    }

    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.animate = enabled;
    }

    pub fn animation_enabled(&self) -> bool {
        self.animate
    }

    pub fn panel(&self) -> InfoView {
        panel::project(self.graph.as_ref(), self.panel_focus.as_deref())
    }

    pub fn graph(&self) -> Option<&ScopeGraph> {
        self.graph.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn faded(&self) -> &BTreeSet<String> {
        &self.faded
    }

    pub fn is_faded(&self, element_id: &str) -> bool {
        self.faded.contains(element_id)
    }

    pub fn min_zoom(&self) -> Option<f64> {
        self.min_zoom
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
