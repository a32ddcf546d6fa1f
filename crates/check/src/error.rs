use std::collections::BTreeMap;
use std::num::ParseIntError;

/// All errors a check function can return.
///
/// Every variant carries enough of the inspected state to diagnose the
/// failure without re-running the check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The resource is not in the root module (or there is no root module).
    #[error("not found: {resource} in {module}")]
    NotFound { resource: String, module: String },

    /// The resource exists but has no primary instance.
    #[error("no primary instance: {resource} in {module}")]
    NoPrimaryInstance { resource: String, module: String },

    /// There is no `<collection>.#` count entry.
    #[error("{resource:?} {collection:?} does not appear to be a collection")]
    NotACollection {
        resource: String,
        collection: String,
    },

    /// The `<collection>.#` entry is not a non-negative decimal integer.
    #[error("{resource:?} {collection:?} has malformed element count {value:?}: {source}")]
    MalformedCardinality {
        resource: String,
        collection: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The count entry disagrees with the number of element groups found.
    #[error(
        "{resource:?} {collection:?} declares {declared} elements but {observed} were found in state: {attributes:?}"
    )]
    CardinalityMismatch {
        resource: String,
        collection: String,
        declared: usize,
        observed: usize,
        attributes: BTreeMap<String, String>,
    },

    /// A nested element check was built with no attribute/value pairs.
    #[error("{resource:?} {collection:?}: expected attribute/value pairs must not be empty")]
    EmptyExpectation {
        resource: String,
        collection: String,
    },

    /// No element carries every expected attribute/value pair.
    #[error(
        "no element of {resource:?} {collection:?} with attr/value pairs: {expected:?} in state: {attributes:?}"
    )]
    NoMatchingElement {
        resource: String,
        collection: String,
        expected: BTreeMap<String, String>,
        attributes: BTreeMap<String, String>,
    },

    /// No direct element of a scalar collection equals the expected value.
    #[error("no element of {resource:?} {collection:?} with value: {expected:?} in state: {attributes:?}")]
    NoMatchingValue {
        resource: String,
        collection: String,
        expected: String,
        attributes: BTreeMap<String, String>,
    },

    /// A check inside a [`compose`](crate::compose) chain failed.
    #[error("check {index}/{total} error: {source}")]
    Step {
        index: usize,
        total: usize,
        #[source]
        source: Box<CheckError>,
    },

    /// One or more checks inside a [`compose_aggregate`](crate::compose_aggregate) failed.
    #[error("{} check(s) failed:\n{}", .0.len(), render_aggregate(.0))]
    Aggregate(Vec<CheckError>),
}

fn render_aggregate(errors: &[CheckError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}) {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}
