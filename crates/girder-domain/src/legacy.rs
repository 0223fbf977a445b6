//! Legacy string roles and their fixed permission tables.
//!
//! These predate the role registry and are still the mandatory fallback on
//! every account. The tables are hard-coded by design: live data may carry
//! only a legacy role, and its meaning must not drift with registry edits.

use serde::{Deserialize, Serialize};

use crate::module::Module;
use crate::permission::{ActionSet, PermissionMatrix};

/// Fixed legacy role assigned to every account at registration.
///
/// Wire names are the historical strings: `admin`, `site_engineer`,
/// `finance`, `procurement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyRole {
    Admin,
    SiteEngineer,
    Finance,
    Procurement,
}

impl LegacyRole {
    pub const ALL: [LegacyRole; 4] = [
        LegacyRole::Admin,
        LegacyRole::SiteEngineer,
        LegacyRole::Finance,
        LegacyRole::Procurement,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LegacyRole::Admin => "admin",
            LegacyRole::SiteEngineer => "site_engineer",
            LegacyRole::Finance => "finance",
            LegacyRole::Procurement => "procurement",
        }
    }

    /// Parse a wire name. Returns `None` for unknown roles.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// The hard-coded permission table for this legacy role.
    pub fn permissions(self) -> PermissionMatrix {
        match self {
            LegacyRole::Admin => PermissionMatrix::full(),
            LegacyRole::SiteEngineer => PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Projects, ActionSet::new(true, true, true, false))
                .grant(Module::Reports, ActionSet::VIEW)
                .grant(Module::AiAssistant, ActionSet::new(true, true, false, false)),
            LegacyRole::Finance => PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Projects, ActionSet::VIEW)
                .grant(Module::Financial, ActionSet::ALL)
                .grant(Module::Compliance, ActionSet::ALL)
                .grant(Module::Einvoicing, ActionSet::ALL)
                .grant(Module::Reports, ActionSet::new(true, true, false, false)),
            LegacyRole::Procurement => PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Projects, ActionSet::VIEW)
                .grant(Module::Procurement, ActionSet::ALL)
                .grant(Module::Reports, ActionSet::VIEW),
        }
    }
}
