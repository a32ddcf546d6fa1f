use std::collections::BTreeMap;

use flatcheck_state::{InstanceState, State, ROOT_MODULE_PATH};

use crate::error::CheckError;
use crate::flatmap;

/// Look up `resource` in the root module and return its primary instance.
pub(crate) fn primary_instance<'s>(
    state: &'s State,
    resource: &str,
) -> Result<&'s InstanceState, CheckError> {
    let Some(module) = state.root_module() else {
        return Err(CheckError::NotFound {
            resource: resource.to_string(),
            module: ROOT_MODULE_PATH.to_string(),
        });
    };

    let rs = module
        .resources
        .get(resource)
        .ok_or_else(|| CheckError::NotFound {
            resource: resource.to_string(),
            module: module.display_path(),
        })?;

    let primary = rs
        .primary
        .as_ref()
        .ok_or_else(|| CheckError::NoPrimaryInstance {
            resource: resource.to_string(),
            module: module.display_path(),
        })?;

    tracing::debug!(resource, id = %primary.id, "resolved primary instance");
    Ok(primary)
}

/// Raw value of the collection's count entry.
pub(crate) fn count_entry<'a>(
    attributes: &'a BTreeMap<String, String>,
    resource: &str,
    collection: &str,
) -> Result<&'a str, CheckError> {
    attributes
        .get(&flatmap::count_key(collection))
        .map(String::as_str)
        .ok_or_else(|| CheckError::NotACollection {
            resource: resource.to_string(),
            collection: collection.to_string(),
        })
}

/// The collection's declared element count.
pub(crate) fn declared_count(
    attributes: &BTreeMap<String, String>,
    resource: &str,
    collection: &str,
) -> Result<usize, CheckError> {
    let raw = count_entry(attributes, resource, collection)?;
    raw.parse::<usize>()
        .map_err(|source| CheckError::MalformedCardinality {
            resource: resource.to_string(),
            collection: collection.to_string(),
            value: raw.to_string(),
            source,
        })
}
