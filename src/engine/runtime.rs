//! Runtime resolution.
//!
//! A function's `Runtime` is either a literal such as `python3.12` or a
//! reference to a template parameter (`!Ref PythonRuntime`), in which case the
//! parameter's `Default` is used.
//!
//! Reference detection is a substring heuristic: any runtime text containing
//! [`REFERENCE_MARKER`] is a reference, and its last whitespace separated
//! token is the parameter name. Nested or multi-token forms are not parsed.

use crate::checker::Language;
use crate::template::node::join_path;
use crate::template::Node;
use crate::{LintError, LintResult};

/// Marker identifying a parameter reference in runtime text.
pub const REFERENCE_MARKER: &str = "!Ref";

/// Whether runtime text refers to a parameter.
pub fn is_parameter_reference(runtime: &str) -> bool {
    runtime.contains(REFERENCE_MARKER)
}

/// Declared runtime of a function resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSpec {
    /// Runtime given inline
    Literal(String),
    /// Runtime taken from a parameter's default
    Reference { parameter: String },
    /// Intrinsic function or other form that cannot be evaluated here
    Unresolvable { form: String },
}

impl RuntimeSpec {
    /// Classify runtime text.
    pub fn parse(text: &str) -> Self {
        if is_parameter_reference(text) {
            RuntimeSpec::Reference {
                parameter: text.split_whitespace().last().unwrap_or_default().to_string(),
            }
        } else {
            RuntimeSpec::Literal(text.to_string())
        }
    }

    /// Read a runtime node.
    ///
    /// Tagged scalars (`!Ref Name`) and the long form (`Ref: Name`) are
    /// rendered as `!Ref Name` before classification. Other tagged values and
    /// mappings (`!FindInMap [...]`, `Fn::If: ...`) are `Unresolvable`. A bare
    /// sequence is a `TypeMismatch`.
    pub fn from_node(node: &Node, path: &str) -> LintResult<Self> {
        let text = match node {
            Node::Scalar(s) | Node::Number(s) => s.clone(),
            Node::Bool(b) => b.to_string(),
            Node::Tagged { tag, value } => match value.as_str() {
                Some(value) => format!("{} {}", tag, value),
                None => {
                    return Ok(RuntimeSpec::Unresolvable {
                        form: format!("{} {}", tag, value.kind()),
                    })
                }
            },
            Node::Mapping(entries) => match entries.as_slice() {
                [(key, Node::Scalar(value))] if key == "Ref" => {
                    format!("{} {}", REFERENCE_MARKER, value)
                }
                [(key, _)] => return Ok(RuntimeSpec::Unresolvable { form: key.clone() }),
                _ => {
                    return Ok(RuntimeSpec::Unresolvable {
                        form: node.kind().to_string(),
                    })
                }
            },
            other => {
                return Err(LintError::TypeMismatch {
                    path: path.to_string(),
                    expected: "string",
                    found: other.kind(),
                })
            }
        };

        Ok(Self::parse(&text))
    }
}

/// Language a function resource should be checked as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeLanguage {
    Supported { language: Language, runtime: String },
    Unsupported { reason: String },
}

/// Resolve the language of a function from its `Properties` node.
///
/// A missing `Runtime`, an intrinsic function that cannot be evaluated, a
/// parameter without a string `Default`, or a runtime naming no known language
/// all give `Unsupported`. A reference to an
/// undeclared parameter is a `MissingParameter` error.
pub fn resolve_language(
    resource: &str,
    properties: &Node,
    properties_path: &str,
    parameters: Option<&Node>,
) -> LintResult<RuntimeLanguage> {
    let runtime_path = join_path(properties_path, "Runtime");
    let runtime_node = match properties.get("Runtime") {
        Some(node) if !node.is_null() => node,
        _ => {
            return Ok(RuntimeLanguage::Unsupported {
                reason: "no Runtime declared".to_string(),
            })
        }
    };

    let runtime = match RuntimeSpec::from_node(runtime_node, &runtime_path)? {
        RuntimeSpec::Literal(runtime) => runtime,
        RuntimeSpec::Reference { parameter } => {
            let declared = parameters
                .and_then(|params| params.get(&parameter))
                .ok_or_else(|| LintError::MissingParameter {
                    resource: resource.to_string(),
                    parameter: parameter.clone(),
                })?;

            match declared.get("Default").map(Node::untagged) {
                Some(Node::Scalar(default)) => {
                    tracing::debug!(resource, parameter = %parameter, runtime = %default, "runtime resolved from parameter");
                    default.clone()
                }
                _ => {
                    return Ok(RuntimeLanguage::Unsupported {
                        reason: format!("parameter '{}' has no string Default", parameter),
                    })
                }
            }
        }
        RuntimeSpec::Unresolvable { form } => {
            tracing::debug!(resource, %form, "runtime cannot be resolved");
            return Ok(RuntimeLanguage::Unsupported {
                reason: format!("runtime '{}' cannot be resolved", form),
            });
        }
    };

    Ok(match Language::detect(&runtime) {
        Some(language) => RuntimeLanguage::Supported { language, runtime },
        None => RuntimeLanguage::Unsupported {
            reason: format!("runtime '{}' is not supported", runtime),
        },
    })
}
