//! CloudFormation template loading.
//!
//! # Graceful Degradation
//!
//! - Missing `Resources` section: treated as a template with nothing to check
//! - Empty `Resources` / `Parameters` (`Resources:` with no value): treated as absent
//! - Unreadable file: `LintError::Io`
//! - Invalid YAML: `LintError::Parse`
//! - Sections that are present but not mappings: `LintError::TypeMismatch`

pub mod node;

pub use node::Node;

use crate::{LintError, LintResult};
use std::fs;
use std::path::Path;

/// Top-level section holding resources.
pub const RESOURCES: &str = "Resources";
/// Top-level section holding template parameters.
pub const PARAMETERS: &str = "Parameters";

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template {
    /// Where the template came from (file path or a label)
    pub origin: String,
    root: Node,
}

impl Template {
    /// Wrap an already parsed root node.
    pub fn new(origin: impl Into<String>, root: Node) -> Self {
        Template {
            origin: origin.into(),
            root,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Entries of the `Resources` section, or `None` if the template has none.
    pub fn resources(&self) -> LintResult<Option<&[(String, Node)]>> {
        Ok(self.section(RESOURCES)?.and_then(Node::as_mapping))
    }

    /// The `Parameters` section node, or `None` if the template has none.
    pub fn parameters(&self) -> LintResult<Option<&Node>> {
        self.section(PARAMETERS)
    }

    fn section(&self, name: &str) -> LintResult<Option<&Node>> {
        if self.root.is_null() {
            return Ok(None);
        }

        let entries = self.root.as_mapping().ok_or_else(|| LintError::TypeMismatch {
            path: "<root>".to_string(),
            expected: "mapping",
            found: self.root.kind(),
        })?;

        match entries.iter().find(|(k, _)| k == name).map(|(_, v)| v) {
            None | Some(Node::Null) => Ok(None),
            Some(section @ Node::Mapping(_)) => Ok(Some(section)),
            Some(other) => Err(LintError::TypeMismatch {
                path: name.to_string(),
                expected: "mapping",
                found: other.kind(),
            }),
        }
    }
}

/// Parse template source text.
pub fn parse_template(source: &str, origin: &str) -> LintResult<Template> {
    let blank = source
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    if blank {
        return Ok(Template::new(origin, Node::Null));
    }

    let value: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| LintError::Parse {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    Ok(Template::new(origin, Node::from(value)))
}

/// Read and parse a template file.
pub fn load_template(path: &Path) -> LintResult<Template> {
    tracing::info!(file = %path.display(), "reading template");

    let source = fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let template = parse_template(&source, &path.display().to_string())?;
    tracing::debug!(file = %path.display(), "template parsed");
    Ok(template)
}
