//! Raw scope document reading.
//!
//! Scope files are cytoscape exports. Records are untyped attribute bags, so
//! every field is pulled out explicitly and checked here, before anything
//! downstream sees a node.

use super::node::{Compound, Node, NodeKind, NodeType, Reaction};
use super::scope::FormatError;
use serde_json::{Map, Value};

type Data = Map<String, Value>;

/// One element record, in document order.
pub(crate) enum Record {
    Node(Node),
    Edge {
        id: Option<String>,
        source: String,
        target: String,
    },
}

#[derive(Clone, Copy, PartialEq)]
enum Group {
    Nodes,
    Edges,
    Infer,
}

pub(crate) fn read_records(raw: &str) -> Result<Vec<Record>, FormatError> {
    let document: Value = serde_json::from_str(raw)?;
    let elements = document
        .get("elements")
        .ok_or(FormatError::MissingElements)?;

    let mut grouped = Vec::new();
    match elements {
        Value::Array(items) => {
            for item in items {
                grouped.push((Group::Infer, item));
            }
        }
        Value::Object(map) => {
            for (key, group) in [("nodes", Group::Nodes), ("edges", Group::Edges)] {
                match map.get(key) {
                    None | Some(Value::Null) => {}
                    Some(Value::Array(items)) => {
                        grouped.extend(items.iter().map(|item| (group, item)));
                    }
                    Some(_) => {
                        return Err(FormatError::InvalidElement {
                            index: grouped.len(),
                            reason: format!("'{}' must be a list", key),
                        });
                    }
                }
            }
        }
        _ => return Err(FormatError::MissingElements),
    }

    grouped
        .into_iter()
        .enumerate()
        .map(|(index, (group, item))| read_record(index, group, item))
        .collect()
}

fn read_record(index: usize, group: Group, item: &Value) -> Result<Record, FormatError> {
    let invalid = |reason: &str| FormatError::InvalidElement {
        index,
        reason: reason.to_string(),
    };

    let record = item.as_object().ok_or_else(|| invalid("not an object"))?;
    let data = record
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("missing 'data' object"))?;

    let group = match (group, record.get("group").and_then(Value::as_str)) {
        (Group::Infer, Some("nodes")) => Group::Nodes,
        (Group::Infer, Some("edges")) => Group::Edges,
        (Group::Infer, Some(other)) => {
            return Err(invalid(&format!("unknown group '{}'", other)));
        }
        (Group::Infer, None) if data.contains_key("source") && data.contains_key("target") => {
            Group::Edges
        }
        (Group::Infer, None) => Group::Nodes,
        (known, _) => known,
    };

    match group {
        Group::Edges => read_edge(index, data),
        _ => read_node(index, data).map(Record::Node),
    }
}

fn read_node(index: usize, data: &Data) -> Result<Node, FormatError> {
    let id = match data.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(_) => {
            return Err(FormatError::InvalidElement {
                index,
                reason: "node 'id' must be a non-empty string".to_string(),
            });
        }
        None => {
            return Err(FormatError::InvalidElement {
                index,
                reason: "node record without 'id'".to_string(),
            });
        }
    };

    let fields = Fields { id: &id, data };
    let tag = fields.required_str("type")?;
    let node_type = NodeType::parse(&tag).ok_or_else(|| FormatError::UnknownNodeType {
        id: id.clone(),
        tag: tag.clone(),
    })?;

    let kind = match node_type {
        NodeType::Compound => NodeKind::Compound(Compound::new(
            fields.optional_list("Names")?.unwrap_or_default(),
            fields.optional_str("SMILES")?.unwrap_or_default(),
            fields.optional_str("InChI")?.unwrap_or_default(),
            fields.required_flag("inSink")?,
            fields.optional_flag("isSource")?.unwrap_or(false),
        )),
        NodeType::Reaction => NodeKind::Reaction(Reaction::new(
            fields.required_list("Rule ID")?,
            fields.required_list("EC number")?,
            fields.required_number("Score")?,
            fields.optional_number("ChemicalScore")?,
            fields.required_str("Reaction SMILES")?,
            fields.required_integer("Diameter")?,
            fields.required_integer("Iteration")?,
        )),
    };

    Ok(Node::new(id, kind))
}

fn read_edge(index: usize, data: &Data) -> Result<Record, FormatError> {
    let endpoint = |key: &str| match data.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(FormatError::InvalidElement {
            index,
            reason: format!("edge record without a '{}' identifier", key),
        }),
    };
    let source = endpoint("source")?;
    let target = endpoint("target")?;
    let id = match data.get("id") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(_) => {
            return Err(FormatError::InvalidElement {
                index,
                reason: "edge 'id' must be a non-empty string".to_string(),
            });
        }
    };
    Ok(Record::Edge { id, source, target })
}

/// Typed access to one node's attribute bag. `null` counts as absent.
struct Fields<'a> {
    id: &'a str,
    data: &'a Data,
}

impl Fields<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    fn missing(&self, key: &str) -> FormatError {
        FormatError::MissingField {
            id: self.id.to_string(),
            field: key.to_string(),
        }
    }

    fn invalid(&self, key: &str, expected: &str) -> FormatError {
        FormatError::InvalidField {
            id: self.id.to_string(),
            field: key.to_string(),
            expected: expected.to_string(),
        }
    }

    fn optional_str(&self, key: &str) -> Result<Option<String>, FormatError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(key, "a string")),
        }
    }

    fn required_str(&self, key: &str) -> Result<String, FormatError> {
        self.optional_str(key)?.ok_or_else(|| self.missing(key))
    }

    /// A single string is accepted as a one-element list.
    fn optional_list(&self, key: &str) -> Result<Option<Vec<String>>, FormatError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| self.invalid(key, "a list of strings"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(self.invalid(key, "a list of strings")),
        }
    }

    fn required_list(&self, key: &str) -> Result<Vec<String>, FormatError> {
        self.optional_list(key)?.ok_or_else(|| self.missing(key))
    }

    fn optional_number(&self, key: &str) -> Result<Option<f64>, FormatError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a number")),
        }
    }

    fn required_number(&self, key: &str) -> Result<f64, FormatError> {
        self.optional_number(key)?.ok_or_else(|| self.missing(key))
    }

    fn required_integer(&self, key: &str) -> Result<i64, FormatError> {
        let value = self.get(key).ok_or_else(|| self.missing(key))?;
        if let Some(n) = value.as_i64() {
            return Ok(n);
        }
        // Some exporters write integral floats, e.g. `2.0`
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
            _ => Err(self.invalid(key, "an integer")),
        }
    }

    /// 0/1 flags; booleans are accepted too.
    fn optional_flag(&self, key: &str) -> Result<Option<bool>, FormatError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::Number(n)) => Ok(Some(n.as_f64().is_some_and(|f| f != 0.0))),
            Some(_) => Err(self.invalid(key, "0 or 1")),
        }
    }

    fn required_flag(&self, key: &str) -> Result<bool, FormatError> {
        self.optional_flag(key)?.ok_or_else(|| self.missing(key))
    }
}
