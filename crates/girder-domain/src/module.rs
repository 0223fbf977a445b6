//! Closed module and action enumerations.

use serde::{Deserialize, Serialize};

/// ERP module a permission can be granted on.
///
/// Closed enumeration: adding a module is a wire-contract change, so
/// unknown module names are rejected at the serde boundary rather than
/// carried as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Dashboard,
    Projects,
    Financial,
    Procurement,
    Hrms,
    Compliance,
    Einvoicing,
    Reports,
    AiAssistant,
    Settings,
    Admin,
}

impl Module {
    /// Every module, in wire order.
    pub const ALL: [Module; 11] = [
        Module::Dashboard,
        Module::Projects,
        Module::Financial,
        Module::Procurement,
        Module::Hrms,
        Module::Compliance,
        Module::Einvoicing,
        Module::Reports,
        Module::AiAssistant,
        Module::Settings,
        Module::Admin,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable index into matrix storage.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Projects => "projects",
            Module::Financial => "financial",
            Module::Procurement => "procurement",
            Module::Hrms => "hrms",
            Module::Compliance => "compliance",
            Module::Einvoicing => "einvoicing",
            Module::Reports => "reports",
            Module::AiAssistant => "ai_assistant",
            Module::Settings => "settings",
            Module::Admin => "admin",
        }
    }

    /// Parse a wire name. Returns `None` for unknown modules.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

/// Action that can be permitted on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }

    /// Parse a wire name. Returns `None` for unknown actions.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}
