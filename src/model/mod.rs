mod document;
mod node;
mod scope;

pub use node::{Compound, Edge, Node, NodeKind, NodeType, Reaction};
pub use scope::{FormatError, Generation, Neighborhood, ScopeGraph};
