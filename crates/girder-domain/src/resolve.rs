//! Precedence rules between the assigned registry role and the legacy role.

use crate::legacy::LegacyRole;
use crate::module::{Action, Module};
use crate::permission::PermissionMatrix;

/// The registry role currently bound to an account, as seen by the resolver.
#[derive(Debug, Clone, Copy)]
pub struct AssignedGrant<'a> {
    pub matrix: &'a PermissionMatrix,
    pub is_active: bool,
}

/// Resolve an account's effective permission matrix.
///
/// An assigned role that is present and active wins verbatim; it is a total
/// override of the legacy table, never a union. Anything else (no binding,
/// inactive role, dangling reference already mapped to `None` by the caller)
/// falls back to the legacy table.
pub fn resolve_permissions(
    legacy: LegacyRole,
    assigned: Option<AssignedGrant<'_>>,
) -> PermissionMatrix {
    match assigned {
        Some(grant) if grant.is_active => grant.matrix.clone(),
        _ => legacy.permissions(),
    }
}

/// Admin check: legacy `admin` OR a resolved view grant on the admin module.
/// Either branch alone suffices; a custom role without admin access never
/// downgrades a legacy administrator.
pub fn is_admin(legacy: LegacyRole, resolved: &PermissionMatrix) -> bool {
    legacy == LegacyRole::Admin || resolved.allows(Module::Admin, Action::View)
}
