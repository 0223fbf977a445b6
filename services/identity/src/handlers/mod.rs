use girder_core::identity::Identity;

use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::resolve::AuthorizeUseCase;

pub mod auth;
pub mod employee;
pub mod role;
pub mod user;

/// Every management endpoint sits behind this gate. Unknown callers and
/// non-admins both land on the same opaque 403.
pub(crate) async fn require_admin(
    state: &AppState,
    identity: &Identity,
) -> Result<(), IdentityServiceError> {
    AuthorizeUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    }
    .require_admin(identity.user_id)
    .await?;
    Ok(())
}
