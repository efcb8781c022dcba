//! Generic document tree.
//!
//! Templates are loaded into a [`Node`] tree instead of typed structs because
//! CloudFormation documents have an open shape. String scalars are kept
//! verbatim. Plain numbers and booleans keep their own variants, since the
//! parser does not retain their source text. Accessors return typed
//! `NotFound` / `TypeMismatch` errors carrying a dotted path so the caller can
//! decide which absences are fatal.

use crate::{LintError, LintResult};
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;

/// A node of a loaded template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Explicit or implicit null (`~`, empty value)
    Null,
    /// String scalar, quoted or plain, kept verbatim
    Scalar(String),
    /// Plain scalar resolved as a number, in its canonical rendering
    Number(String),
    /// Plain scalar resolved as a boolean
    Bool(bool),
    /// Block or flow sequence
    Sequence(Vec<Node>),
    /// Mapping in document order
    Mapping(Vec<(String, Node)>),
    /// Node carrying a local tag such as `!Ref` or `!Sub`
    Tagged { tag: String, value: Box<Node> },
}

impl Node {
    /// Name of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Scalar(_) => "string",
            Node::Number(_) => "number",
            Node::Bool(_) => "boolean",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
            Node::Tagged { .. } => "tagged value",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Scalar text, if this is an untagged string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Mapping entries, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// The node with any tag removed.
    pub fn untagged(&self) -> &Node {
        match self {
            Node::Tagged { value, .. } => value.untagged(),
            other => other,
        }
    }

    /// Look up a key in a mapping node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Walk a path of mapping keys.
    ///
    /// `base` is the dotted path of `self`, used to build error paths.
    /// A missing key yields `NotFound`; stepping into anything other than a
    /// mapping yields `TypeMismatch`.
    pub fn lookup(&self, base: &str, keys: &[&str]) -> LintResult<&Node> {
        let mut current = self;
        let mut path = base.to_string();

        for key in keys {
            let entries = current.as_mapping().ok_or_else(|| LintError::TypeMismatch {
                path: path.clone(),
                expected: "mapping",
                found: current.kind(),
            })?;

            path = join_path(&path, key);

            current = entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v)
                .ok_or_else(|| LintError::NotFound { path: path.clone() })?;
        }

        Ok(current)
    }

    /// Text of a string node. Tags are stripped, so `!Sub |` blocks are
    /// returned verbatim with their `${...}` markers.
    pub fn require_str(&self, path: &str) -> LintResult<&str> {
        self.untagged().as_str().ok_or_else(|| LintError::TypeMismatch {
            path: path.to_string(),
            expected: "string",
            found: self.untagged().kind(),
        })
    }
}

/// Join a key onto a dotted path.
pub fn join_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", base, key)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n.to_string()),
            Value::String(s) => Node::Scalar(s),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (key_text(k), Node::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                Node::Tagged {
                    tag: tag.to_string(),
                    value: Box::new(Node::from(value)),
                }
            }
        }
    }
}

fn key_text(key: Value) -> String {
    match Node::from(key) {
        Node::Scalar(s) | Node::Number(s) => s,
        Node::Bool(b) => b.to_string(),
        Node::Null => "~".to_string(),
        other => format!("<{}>", other.kind()),
    }
}
