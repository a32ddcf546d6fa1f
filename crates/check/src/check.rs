use std::collections::BTreeMap;

use flatcheck_state::State;

use crate::error::CheckError;
use crate::flatmap;
use crate::resolve;

/// A check evaluated against a state snapshot. `Ok(())` is the only pass.
pub type CheckFn = Box<dyn Fn(&State) -> Result<(), CheckError> + Send + Sync>;

/// What to do when a collection's count entry disagrees with the number of
/// element groups actually present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardinalityPolicy {
    /// Fail with [`CheckError::CardinalityMismatch`].
    #[default]
    Enforce,
    /// Log a warning and keep searching.
    Ignore,
}

/// Options for [`check_nested_collection_element_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Handling of a count entry that disagrees with the grouped elements.
    pub cardinality: CardinalityPolicy,
}

/// Check that the unordered collection `collection` of `resource` holds an
/// element carrying every pair in `expected`.
///
/// Elements are rebuilt from the flat attributes; an element matches when each
/// expected attribute is present with an equal string value. Extra attributes
/// on the element are ignored, so a loose expectation may match an element you
/// did not intend. Pass every distinguishing attribute to pin one down.
pub fn check_nested_collection_element<I, K, V>(
    resource: impl Into<String>,
    collection: impl Into<String>,
    expected: I,
) -> CheckFn
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    check_nested_collection_element_with(CheckOptions::default(), resource, collection, expected)
}

/// [`check_nested_collection_element`] with explicit [`CheckOptions`].
pub fn check_nested_collection_element_with<I, K, V>(
    options: CheckOptions,
    resource: impl Into<String>,
    collection: impl Into<String>,
    expected: I,
) -> CheckFn
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let resource = resource.into();
    let collection = collection.into();
    let expected: BTreeMap<String, String> = expected
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    Box::new(move |state: &State| {
        let instance = resolve::primary_instance(state, &resource)?;
        let attributes = &instance.attributes;
        let declared = resolve::declared_count(attributes, &resource, &collection)?;

        let elements = flatmap::group_elements(attributes, &collection);
        if elements.len() != declared {
            match options.cardinality {
                CardinalityPolicy::Enforce => {
                    return Err(CheckError::CardinalityMismatch {
                        resource: resource.clone(),
                        collection: collection.clone(),
                        declared,
                        observed: elements.len(),
                        attributes: attributes.clone(),
                    });
                }
                CardinalityPolicy::Ignore => {
                    tracing::warn!(
                        resource = %resource,
                        collection = %collection,
                        declared,
                        observed = elements.len(),
                        "collection count does not match grouped elements"
                    );
                }
            }
        }

        if expected.is_empty() {
            return Err(CheckError::EmptyExpectation {
                resource: resource.clone(),
                collection: collection.clone(),
            });
        }

        if let Some((id, _)) = elements
            .iter()
            .find(|(_, element)| flatmap::element_matches(element, &expected))
        {
            tracing::debug!(resource = %resource, collection = %collection, id = %id, "matched element");
            return Ok(());
        }

        Err(CheckError::NoMatchingElement {
            resource: resource.clone(),
            collection: collection.clone(),
            expected: expected.clone(),
            attributes: attributes.clone(),
        })
    })
}

/// Check that the scalar collection `collection` of `resource` holds an
/// element equal to `expected`.
///
/// Scalar elements sit directly below the collection (`ports.0`, `ports.1`),
/// so no grouping is needed: any key one segment below `collection`, other
/// than the count entry, whose value equals `expected` is a match.
pub fn check_collection_element_value(
    resource: impl Into<String>,
    collection: impl Into<String>,
    expected: impl Into<String>,
) -> CheckFn {
    let resource = resource.into();
    let collection = collection.into();
    let expected = expected.into();

    Box::new(move |state: &State| {
        let instance = resolve::primary_instance(state, &resource)?;
        let attributes = &instance.attributes;
        resolve::count_entry(attributes, &resource, &collection)?;

        let found = attributes.iter().find(|(key, value)| {
            **value == expected && flatmap::is_direct_element(key, &collection)
        });
        if let Some((key, _)) = found {
            tracing::debug!(resource = %resource, key = %key, "matched element value");
            return Ok(());
        }

        Err(CheckError::NoMatchingValue {
            resource: resource.clone(),
            collection: collection.clone(),
            expected: expected.clone(),
            attributes: attributes.clone(),
        })
    })
}
