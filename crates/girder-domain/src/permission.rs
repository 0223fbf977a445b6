//! Permission matrix: module → allowed actions.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::module::{Action, Module};

/// The four per-module action grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub delete: bool,
}

impl ActionSet {
    pub const NONE: ActionSet = ActionSet::new(false, false, false, false);
    pub const ALL: ActionSet = ActionSet::new(true, true, true, true);
    pub const VIEW: ActionSet = ActionSet::new(true, false, false, false);

    pub const fn new(view: bool, create: bool, edit: bool, delete: bool) -> Self {
        Self {
            view,
            create,
            edit,
            delete,
        }
    }

    pub const fn allows(self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }
}

/// Fixed-size table keyed by the closed [`Module`] enumeration.
///
/// A module with no grants is simply all-false; lookups never fail, so the
/// deny-by-default path is the absence of a grant, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix([ActionSet; Module::COUNT]);

impl PermissionMatrix {
    /// Matrix with every action denied on every module.
    pub const fn empty() -> Self {
        Self([ActionSet::NONE; Module::COUNT])
    }

    /// Matrix with every action granted on every module.
    pub const fn full() -> Self {
        Self([ActionSet::ALL; Module::COUNT])
    }

    /// Builder-style grant, used by the legacy tables and tests.
    pub const fn grant(mut self, module: Module, actions: ActionSet) -> Self {
        self.0[module.index()] = actions;
        self
    }

    pub fn set(&mut self, module: Module, actions: ActionSet) {
        self.0[module.index()] = actions;
    }

    pub const fn get(&self, module: Module) -> ActionSet {
        self.0[module.index()]
    }

    /// The `can(module, action)` primitive. Total: missing grants are false.
    pub const fn allows(&self, module: Module, action: Action) -> bool {
        self.get(module).allows(action)
    }

    /// Modules with at least one granted action, in wire order.
    pub fn granted_modules(&self) -> impl Iterator<Item = (Module, ActionSet)> + '_ {
        Module::ALL
            .into_iter()
            .map(|m| (m, self.get(m)))
            .filter(|(_, a)| *a != ActionSet::NONE)
    }
}

impl FromIterator<(Module, ActionSet)> for PermissionMatrix {
    fn from_iter<I: IntoIterator<Item = (Module, ActionSet)>>(iter: I) -> Self {
        let mut matrix = Self::empty();
        for (module, actions) in iter {
            matrix.set(module, actions);
        }
        matrix
    }
}

// Wire shape: `{"dashboard": {"view": true, ...}, ...}` with all modules
// present on output, partial maps accepted on input. Unknown module keys
// fail deserialization via the Module enum.
impl Serialize for PermissionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Module::COUNT))?;
        for module in Module::ALL {
            map.serialize_entry(module.as_str(), &self.get(module))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PermissionMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<Module, ActionSet>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
