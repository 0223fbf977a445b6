//! Route-access state machine mirrored by UI route guards.
//!
//! While a session's permissions are still being fetched the guard must
//! render a neutral placeholder; once resolved it settles on authorized or
//! denied and stays there for the rest of the navigation. This mirror is
//! cosmetic only — the server re-checks every request.

use crate::module::{Action, Module};
use crate::permission::PermissionMatrix;

/// Outcome of a route guard for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Permissions not yet resolved; no decision may be rendered.
    Loading,
    Authorized,
    Denied,
}

/// One navigation's access decision. Transitions out of `Loading` exactly
/// once; later resolutions are ignored until [`RouteGate::reset`].
#[derive(Debug, Clone, Default)]
pub struct RouteGate {
    access: Option<RouteAccess>,
}

impl RouteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access(&self) -> RouteAccess {
        self.access.unwrap_or(RouteAccess::Loading)
    }

    /// Settle the decision from a resolved matrix. The first call wins;
    /// re-resolving with a different matrix cannot flip the outcome.
    pub fn resolve(&mut self, matrix: &PermissionMatrix, module: Module) -> RouteAccess {
        let decided = *self.access.get_or_insert_with(|| {
            if matrix.allows(module, Action::View) {
                RouteAccess::Authorized
            } else {
                RouteAccess::Denied
            }
        });
        decided
    }

    /// Start a new navigation: back to `Loading`, next resolve decides again.
    pub fn reset(&mut self) {
        self.access = None;
    }
}
