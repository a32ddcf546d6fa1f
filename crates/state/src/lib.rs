//! flatcheck-state: the flatmap state document checks are evaluated against.
//!
//! A state document holds modules; each module maps resource names to a
//! resource whose primary instance carries a flat `attributes` map. Nested
//! values in that map are encoded with dotted keys (`tags.0.key`) and every
//! collection carries a `.#` count entry.

mod error;
mod record;

pub use error::StateError;
pub use record::{InstanceState, ModuleState, ResourceState, State, ROOT_MODULE_PATH};
