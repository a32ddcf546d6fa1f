//! flatcheck: assertions over unordered collections in flatmap state.
//!
//! A flatmap stores a nested value as dotted keys. An unordered collection at
//! `tags` is written as a `tags.#` count plus one group of keys per element,
//! each group sharing a synthetic identifier (`tags.0.key`, `tags.0.value`,
//! `tags.1.key`, ...). The identifiers carry no ordering, so asserting on a
//! particular element means rebuilding the elements and searching them.
//!
//! The two constructors here return [`CheckFn`] closures that do exactly that:
//!
//! ```
//! use flatcheck::check_nested_collection_element;
//! use flatcheck_state::{InstanceState, ResourceState, State};
//!
//! let state = State::new().with_resource(
//!     "aws_instance.web",
//!     ResourceState::new("aws_instance").with_primary(
//!         InstanceState::new("i-1").with_attributes([
//!             ("tags.#", "1"),
//!             ("tags.0.key", "Env"),
//!             ("tags.0.value", "prod"),
//!         ]),
//!     ),
//! );
//!
//! let check = check_nested_collection_element(
//!     "aws_instance.web",
//!     "tags",
//!     [("key", "Env"), ("value", "prod")],
//! );
//! assert!(check(&state).is_ok());
//! ```

mod check;
mod compose;
mod error;
pub mod flatmap;
mod report;
mod resolve;

pub use check::{
    check_collection_element_value, check_nested_collection_element,
    check_nested_collection_element_with, CardinalityPolicy, CheckFn, CheckOptions,
};
pub use compose::{compose, compose_aggregate};
pub use error::CheckError;
pub use report::{run_checks, CheckOutcome, CheckReport};
