//! Display labels derived from raw node attributes.
//!
//! Labels are computed once, when a node is built during a scope load, and are
//! stored on the node. Nothing recomputes or overwrites them afterwards.

use serde::Serialize;

/// Names longer than this are truncated for display.
pub const MAX_COMPOUND_LABEL: usize = 12;
/// Characters kept from a truncated name, before the ellipsis marker.
pub const TRUNCATED_KEEP: usize = 10;
pub const ELLIPSIS: &str = "..";
/// Placeholder written by the exporter when a compound has no name.
pub const NAME_PLACEHOLDER: &str = "None";
/// Chemical score rendered when the pipeline did not produce one.
pub const MISSING_SCORE: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CompoundLabel(String);

impl CompoundLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionLabels {
    /// First EC number in plain string order.
    pub ec: String,
    pub score: String,
    pub chemical_score: String,
}

/// Short compound label from the ordered name list.
pub fn compound_label(names: &[String]) -> CompoundLabel {
    let Some(first) = names.first() else {
        return CompoundLabel::default();
    };
    if first.is_empty() || first == NAME_PLACEHOLDER {
        return CompoundLabel::default();
    }

    if first.chars().count() > MAX_COMPOUND_LABEL {
        let mut short: String = first.chars().take(TRUNCATED_KEEP).collect();
        short.push_str(ELLIPSIS);
        CompoundLabel(short)
    } else {
        CompoundLabel(first.clone())
    }
}

pub fn reaction_labels(
    ec_numbers: &[String],
    score: f64,
    chemical_score: Option<f64>,
) -> ReactionLabels {
    ReactionLabels {
        ec: first_ec(ec_numbers),
        score: format_score(score),
        chemical_score: chemical_score
            .map(format_score)
            .unwrap_or_else(|| MISSING_SCORE.to_string()),
    }
}

/// Lexicographically smallest EC number. Dotted segments are compared as
/// text, so "10.1.1.1" sorts before "2.1.1.1".
pub fn first_ec(ec_numbers: &[String]) -> String {
    ec_numbers.iter().min().cloned().unwrap_or_default()
}

pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Sorted copy of a string list; the node's own order is left untouched.
pub fn sorted(values: &[String]) -> Vec<String> {
    let mut values = values.to_vec();
    values.sort();
    values
}
