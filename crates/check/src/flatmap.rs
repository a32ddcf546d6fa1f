//! Helpers for reading unordered collections out of a flatmap.
//!
//! Keys are dotted paths. Inside a collection rooted at `P`, the segment after
//! `P` is either the [`COUNT_SENTINEL`] or an element identifier, and whatever
//! follows the identifier belongs to that element.

use std::collections::{BTreeMap, HashMap};

/// Segment holding a collection's element count.
pub const COUNT_SENTINEL: &str = "#";

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// The residual attributes of one collection element, keyed by the path
/// below the element identifier.
pub type Element = BTreeMap<String, String>;

/// Elements of an unordered collection keyed by their identifier.
pub type Elements = HashMap<String, Element>;

/// Key of the count entry for `collection` (`tags` -> `tags.#`).
pub fn count_key(collection: &str) -> String {
    format!("{}{}{}", collection, SEPARATOR, COUNT_SENTINEL)
}

/// True when `key` is a scalar element directly below `collection`. The count
/// entry sits at the same depth but is not an element.
pub fn is_direct_element(key: &str, collection: &str) -> bool {
    match key.rsplit_once(SEPARATOR) {
        Some((parent, last)) => parent == collection && last != COUNT_SENTINEL,
        None => false,
    }
}

/// Rebuild the elements of the collection at `collection`.
///
/// Only keys whose leading segments equal the collection's segments are
/// considered, so `tags` does not pick up `tags_all.0.key`. The count entry is
/// skipped. A key that ends at the identifier is stored under the empty
/// suffix.
pub fn group_elements(attributes: &BTreeMap<String, String>, collection: &str) -> Elements {
    let mut elements = Elements::new();

    for (key, value) in attributes {
        let Some(rest) = strip_collection(key, collection) else {
            continue;
        };
        let (id, suffix) = rest.split_once(SEPARATOR).unwrap_or((rest, ""));
        if id == COUNT_SENTINEL {
            continue;
        }
        tracing::trace!(collection, id, suffix, "grouped flatmap entry");
        elements
            .entry(id.to_string())
            .or_default()
            .insert(suffix.to_string(), value.clone());
    }

    elements
}

/// The part of `key` after `collection.`, when `key` lies inside it.
fn strip_collection<'a>(key: &'a str, collection: &str) -> Option<&'a str> {
    let rest = key.strip_prefix(collection)?.strip_prefix(SEPARATOR)?;
    (!rest.is_empty()).then_some(rest)
}

/// True when every expected pair is present in `element` with an equal value.
pub fn element_matches(element: &Element, expected: &BTreeMap<String, String>) -> bool {
    let matches = expected
        .iter()
        .filter(|(k, v)| element.get(*k) == Some(*v))
        .count();
    matches == expected.len()
}
