use girder_domain::legacy::LegacyRole;
use girder_domain::module::{Action, Module};
use girder_domain::permission::{ActionSet, PermissionMatrix};
use girder_identity::error::IdentityServiceError;
use girder_identity::usecase::resolve::{AuthorizeUseCase, CurrentUserUseCase};
use uuid::Uuid;

use crate::helpers::{MockStore, test_role, test_user};

// ── CurrentUser resolution ───────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_legacy_table_when_nothing_assigned() {
    let store = MockStore::new();
    let user = test_user("Asha", LegacyRole::Finance);
    let user_id = user.id;
    store.add_user(user);

    let current = CurrentUserUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    }
    .execute(user_id)
    .await
    .unwrap();

    assert!(current.permissions.allows(Module::Financial, Action::Edit));
    assert!(!current.permissions.allows(Module::Hrms, Action::View));
    assert!(!current.is_admin);
    assert_eq!(current.role_name, None);
}

#[tokio::test]
async fn should_let_assigned_role_override_legacy_entirely() {
    let store = MockStore::new();
    // Narrower than the finance legacy table on purpose.
    let role = test_role(
        "Reports Only",
        PermissionMatrix::empty().grant(Module::Reports, ActionSet::VIEW),
    );
    let role_id = role.id;
    store.add_role(role);
    let mut user = test_user("Asha", LegacyRole::Finance);
    user.assigned_role_id = Some(role_id);
    let user_id = user.id;
    store.add_user(user);

    let current = CurrentUserUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    }
    .execute(user_id)
    .await
    .unwrap();

    // No merging: the legacy financial grants are gone.
    assert!(current.permissions.allows(Module::Reports, Action::View));
    assert!(!current.permissions.allows(Module::Financial, Action::View));
    assert_eq!(current.role_name.as_deref(), Some("Reports Only"));
}

#[tokio::test]
async fn should_fall_back_to_legacy_when_assigned_role_is_inactive() {
    let store = MockStore::new();
    let mut role = test_role(
        "Switched Off",
        PermissionMatrix::empty().grant(Module::Admin, ActionSet::ALL),
    );
    role.is_active = false;
    let role_id = role.id;
    store.add_role(role);
    let mut user = test_user("Asha", LegacyRole::Procurement);
    user.assigned_role_id = Some(role_id);
    let user_id = user.id;
    store.add_user(user);

    let current = CurrentUserUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    }
    .execute(user_id)
    .await
    .unwrap();

    assert!(!current.permissions.allows(Module::Admin, Action::View));
    assert!(current.permissions.allows(Module::Procurement, Action::Create));
    // The binding itself is untouched; only resolution ignores it.
    assert_eq!(current.role_name.as_deref(), Some("Switched Off"));
}

#[tokio::test]
async fn should_fall_back_to_legacy_when_binding_dangles() {
    let store = MockStore::new();
    let mut user = test_user("Asha", LegacyRole::SiteEngineer);
    user.assigned_role_id = Some(Uuid::new_v4());
    let user_id = user.id;
    store.add_user(user);

    let current = CurrentUserUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    }
    .execute(user_id)
    .await
    .unwrap();

    assert!(current.permissions.allows(Module::Projects, Action::View));
    assert_eq!(current.role_name, None);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let store = MockStore::new();
    let result = CurrentUserUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    }
    .execute(Uuid::new_v4())
    .await;

    assert!(matches!(result, Err(IdentityServiceError::UserNotFound)));
}

// ── Admin flag ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_flag_legacy_admin_even_with_non_admin_assigned_role() {
    let store = MockStore::new();
    let role = test_role(
        "Reports Only",
        PermissionMatrix::empty().grant(Module::Reports, ActionSet::VIEW),
    );
    let role_id = role.id;
    store.add_role(role);
    let mut user = test_user("Root", LegacyRole::Admin);
    user.assigned_role_id = Some(role_id);
    let user_id = user.id;
    store.add_user(user);

    let current = CurrentUserUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    }
    .execute(user_id)
    .await
    .unwrap();

    // The matrix narrows, the admin flag does not.
    assert!(current.is_admin);
    assert!(!current.permissions.allows(Module::Admin, Action::View));
}

#[tokio::test]
async fn should_flag_admin_from_matrix_admin_view() {
    let store = MockStore::new();
    let role = test_role(
        "Ops Admin",
        PermissionMatrix::empty().grant(Module::Admin, ActionSet::VIEW),
    );
    let role_id = role.id;
    store.add_role(role);
    let mut user = test_user("Asha", LegacyRole::SiteEngineer);
    user.assigned_role_id = Some(role_id);
    let user_id = user.id;
    store.add_user(user);

    let current = CurrentUserUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    }
    .execute(user_id)
    .await
    .unwrap();

    assert!(current.is_admin);
}

// ── Authorize gateway ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_deny_unknown_caller_with_forbidden_not_404() {
    let store = MockStore::new();
    let usecase = AuthorizeUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    };

    let result = usecase
        .execute(Uuid::new_v4(), Module::Dashboard, Action::View)
        .await;

    assert!(matches!(result, Err(IdentityServiceError::Forbidden)));
}

#[tokio::test]
async fn should_deny_action_missing_from_matrix() {
    let store = MockStore::new();
    let role = test_role(
        "Viewer",
        PermissionMatrix::empty().grant(Module::Projects, ActionSet::VIEW),
    );
    let role_id = role.id;
    store.add_role(role);
    let mut user = test_user("Asha", LegacyRole::SiteEngineer);
    user.assigned_role_id = Some(role_id);
    let user_id = user.id;
    store.add_user(user);

    let usecase = AuthorizeUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    };

    usecase
        .execute(user_id, Module::Projects, Action::View)
        .await
        .unwrap();
    let result = usecase
        .execute(user_id, Module::Projects, Action::Delete)
        .await;
    assert!(matches!(result, Err(IdentityServiceError::Forbidden)));
}

#[tokio::test]
async fn should_see_role_edit_on_next_request_without_caching() {
    let store = MockStore::new();
    let role = test_role(
        "Evolving",
        PermissionMatrix::empty().grant(Module::Procurement, ActionSet::VIEW),
    );
    let role_id = role.id;
    store.add_role(role.clone());
    let mut user = test_user("Asha", LegacyRole::SiteEngineer);
    user.assigned_role_id = Some(role_id);
    let user_id = user.id;
    store.add_user(user);

    let usecase = AuthorizeUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    };
    let result = usecase
        .execute(user_id, Module::Procurement, Action::Create)
        .await;
    assert!(matches!(result, Err(IdentityServiceError::Forbidden)));

    // Widen the role in place; the very next check must see it.
    {
        let mut roles = store.roles.lock().unwrap();
        roles[0].permissions = PermissionMatrix::empty().grant(Module::Procurement, ActionSet::ALL);
    }
    usecase
        .execute(user_id, Module::Procurement, Action::Create)
        .await
        .unwrap();
}

#[tokio::test]
async fn should_gate_admin_surface_on_admin_flag() {
    let store = MockStore::new();
    let admin = test_user("Root", LegacyRole::Admin);
    let admin_id = admin.id;
    store.add_user(admin);
    let engineer = test_user("Asha", LegacyRole::SiteEngineer);
    let engineer_id = engineer.id;
    store.add_user(engineer);

    let usecase = AuthorizeUseCase {
        users: store.user_repo(),
        roles: store.role_repo(),
    };

    usecase.require_admin(admin_id).await.unwrap();
    let result = usecase.require_admin(engineer_id).await;
    assert!(matches!(result, Err(IdentityServiceError::Forbidden)));
}
