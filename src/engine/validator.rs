//! Per-template validation.
//!
//! Drives one template through scan, extraction, runtime resolution and the
//! checker, one resource at a time.
//!
//! # Graceful Degradation
//!
//! - No `Resources` section: `FileOutcome::NoResources`, nothing is checked
//! - No function resources: `FileOutcome::Checked` with zero entries
//! - No `ZipFile` or an empty one (code stored in S3 or an image): resource
//!   is `Skipped`
//! - Runtime naming no supported language: resource is `LanguageUnsupported`
//! - Runtime given by an intrinsic function (`!FindInMap`, `Fn::If`): resource
//!   is `LanguageUnsupported`
//!
//! Everything else (non-string `ZipFile` such as a plain number, undeclared
//! parameter, checker crash) aborts the template with an error. Resources
//! already checked are discarded with it.

use crate::checker::{interpret_output, Checker};
use crate::engine::result::FileOutcome;
use crate::engine::runtime::{resolve_language, RuntimeLanguage};
use crate::engine::scanner;
use crate::template::node::join_path;
use crate::template::{Node, Template, RESOURCES};
use crate::{CheckResult, LintError, LintResult, ResourceCheck};

/// Path of the inline code below a resource's `Properties`.
pub const INLINE_CODE_PATH: &[&str] = &["Code", "ZipFile"];

/// Reason recorded for functions without inline code.
pub const NO_INLINE_CODE: &str = "no inline code";

/// Validates function resources of one template.
pub struct Validator<'a> {
    checker: &'a dyn Checker,
    extra_args: &'a [String],
}

impl<'a> Validator<'a> {
    pub fn new(checker: &'a dyn Checker, extra_args: &'a [String]) -> Self {
        Validator { checker, extra_args }
    }

    /// Validate every entry of the worklist in order, stopping at the first
    /// fatal error.
    pub fn validate_all(&self, template: &Template, checks: &mut [ResourceCheck]) -> LintResult<()> {
        let resources = template.resources()?.unwrap_or_default();
        let parameters = template.parameters()?;

        for check in checks.iter_mut() {
            let resource = resources
                .iter()
                .find(|(id, _)| *id == check.id)
                .map(|(_, node)| node)
                .ok_or_else(|| LintError::NotFound {
                    path: join_path(RESOURCES, &check.id),
                })?;

            self.validate_resource(check, resource, parameters)?;
        }

        Ok(())
    }

    /// Validate a single function resource and record its outcome.
    pub fn validate_resource(
        &self,
        check: &mut ResourceCheck,
        resource: &Node,
        parameters: Option<&Node>,
    ) -> LintResult<()> {
        let resource_path = join_path(RESOURCES, &check.id);
        let properties_path = join_path(&resource_path, "Properties");

        let properties = match resource.lookup(&resource_path, &["Properties"]) {
            Ok(properties) if properties.is_null() => return self.skip(check),
            Ok(properties) => properties,
            Err(LintError::NotFound { .. }) => {
                return self.skip(check);
            }
            Err(e) => return Err(e),
        };

        let code_node = match properties.lookup(&properties_path, INLINE_CODE_PATH) {
            Ok(node) if node.is_null() => return self.skip(check),
            Ok(node) => node,
            Err(LintError::NotFound { .. }) => {
                return self.skip(check);
            }
            Err(e) => return Err(e),
        };

        let code_path = INLINE_CODE_PATH
            .iter()
            .fold(properties_path.clone(), |path, key| join_path(&path, key));
        let code = code_node.require_str(&code_path)?;
        if code.is_empty() {
            return self.skip(check);
        }

        let (language, runtime) =
            match resolve_language(&check.id, properties, &properties_path, parameters)? {
                RuntimeLanguage::Supported { language, runtime } => (language, runtime),
                RuntimeLanguage::Unsupported { reason } => {
                    tracing::info!(resource = %check.id, %reason, "language unsupported");
                    check.complete(CheckResult::LanguageUnsupported { reason });
                    return Ok(());
                }
            };

        tracing::info!(resource = %check.id, %runtime, "checking inline code");

        let output = self.checker.check(language, code, self.extra_args)?;
        tracing::debug!(resource = %check.id, status = ?output.status, "checker returned");

        let result = interpret_output(&check.id, &output)?;
        check.language = Some(language);
        check.complete(result);
        Ok(())
    }

    fn skip(&self, check: &mut ResourceCheck) -> LintResult<()> {
        tracing::info!(resource = %check.id, "skipping: {}", NO_INLINE_CODE);
        check.complete(CheckResult::Skipped {
            reason: NO_INLINE_CODE.to_string(),
        });
        Ok(())
    }
}

/// Lint a loaded template.
pub fn lint_template(
    template: &Template,
    checker: &dyn Checker,
    extra_args: &[String],
) -> LintResult<FileOutcome> {
    let resources = match template.resources()? {
        Some(resources) => resources,
        None => {
            tracing::info!(file = %template.origin, "no Resources section");
            return Ok(FileOutcome::NoResources);
        }
    };

    let mut checks = scanner::scan(resources);
    Validator::new(checker, extra_args).validate_all(template, &mut checks)?;

    Ok(FileOutcome::Checked { resources: checks })
}
