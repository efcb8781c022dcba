//! Function resource discovery.

use crate::template::Node;
use crate::ResourceCheck;

/// Resource type whose inline code is linted.
pub const FUNCTION_RESOURCE_TYPE: &str = "AWS::Lambda::Function";

/// Ids of resources whose `Type` is exactly [`FUNCTION_RESOURCE_TYPE`], in
/// document order.
///
/// Resources without a `Type`, or whose body is not a mapping, are skipped.
pub fn find_function_resources(resources: &[(String, Node)]) -> Vec<String> {
    resources
        .iter()
        .filter(|(_, resource)| {
            resource.get("Type").and_then(Node::as_str) == Some(FUNCTION_RESOURCE_TYPE)
        })
        .map(|(id, _)| id.clone())
        .collect()
}

/// Build the worklist for a `Resources` section, every entry `NotYetChecked`.
pub fn scan(resources: &[(String, Node)]) -> Vec<ResourceCheck> {
    let checks: Vec<ResourceCheck> = find_function_resources(resources)
        .into_iter()
        .map(ResourceCheck::new)
        .collect();

    if checks.is_empty() {
        tracing::info!("no Lambda functions found in the resources");
    } else {
        tracing::info!(count = checks.len(), "found Lambda function(s) to check");
    }

    checks
}
