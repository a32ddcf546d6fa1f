use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// Path of the root module in every state document.
pub const ROOT_MODULE_PATH: &str = "root";

/// Newest state format whose instances still carry flatmap attributes.
const MAX_FLATMAP_VERSION: u32 = 3;

/// A full state snapshot: a list of modules, one of which is the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub serial: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleState>,
}

fn default_version() -> u32 {
    MAX_FLATMAP_VERSION
}

/// One module of the state tree and the resources it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleState {
    pub path: Vec<String>,
    #[serde(default)]
    pub outputs: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceState>,
}

/// A resource entry keyed by its address (e.g. `aws_instance.web`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// None when the resource was recorded without a live instance.
    #[serde(default)]
    pub primary: Option<InstanceState>,
    #[serde(default)]
    pub provider: String,
}

/// A concrete instance and its flattened attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceState {
    #[serde(default)]
    pub id: String,
    /// Dotted-key attribute map. All values are strings.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub tainted: bool,
}

impl State {
    /// An empty state with a single, empty root module.
    pub fn new() -> Self {
        Self {
            version: MAX_FLATMAP_VERSION,
            serial: 0,
            lineage: None,
            modules: vec![ModuleState::root()],
        }
    }

    /// Parse a state document from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self, StateError> {
        let state: State = serde_json::from_str(input)?;
        state.validated()
    }

    /// Convert an already-parsed JSON value into a state document.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, StateError> {
        let state: State = serde_json::from_value(value)?;
        state.validated()
    }

    /// Read and parse a state file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn validated(self) -> Result<Self, StateError> {
        if self.version > MAX_FLATMAP_VERSION {
            return Err(StateError::UnsupportedVersion {
                version: self.version,
                max: MAX_FLATMAP_VERSION,
            });
        }
        Ok(self)
    }

    /// The module whose path is exactly `["root"]`, if present.
    pub fn root_module(&self) -> Option<&ModuleState> {
        self.modules.iter().find(|m| m.is_root())
    }

    /// Add (or replace) a resource in the root module, creating the module if needed.
    pub fn with_resource(mut self, name: impl Into<String>, resource: ResourceState) -> Self {
        let idx = match self.modules.iter().position(|m| m.is_root()) {
            Some(idx) => idx,
            None => {
                self.modules.insert(0, ModuleState::root());
                0
            }
        };
        self.modules[idx].resources.insert(name.into(), resource);
        self
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleState {
    /// An empty module at the root path.
    pub fn root() -> Self {
        Self {
            path: vec![ROOT_MODULE_PATH.to_string()],
            outputs: BTreeMap::new(),
            resources: BTreeMap::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.len() == 1 && self.path[0] == ROOT_MODULE_PATH
    }

    /// Dotted rendering of the module path, used in diagnostics.
    pub fn display_path(&self) -> String {
        self.path.join(".")
    }
}

impl ResourceState {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            depends_on: Vec::new(),
            primary: None,
            provider: String::new(),
        }
    }

    pub fn with_primary(mut self, instance: InstanceState) -> Self {
        self.primary = Some(instance);
        self
    }
}

impl InstanceState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Extend the attribute map. Later duplicates overwrite earlier ones.
    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}
