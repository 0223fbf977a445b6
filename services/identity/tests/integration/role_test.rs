use girder_domain::module::{Action, Module};
use girder_domain::permission::{ActionSet, PermissionMatrix};
use girder_identity::error::IdentityServiceError;
use girder_identity::usecase::role::{
    CreateRoleInput, CreateRoleUseCase, DeleteRoleUseCase, GetRoleUseCase,
    InitializeSystemRolesUseCase, ListRolesUseCase, UpdateRoleInput, UpdateRoleUseCase,
};
use uuid::Uuid;

use crate::helpers::{MockStore, test_role, test_system_role};

// ── CreateRole ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_role_with_trimmed_name() {
    let store = MockStore::new();
    let usecase = CreateRoleUseCase {
        repo: store.role_repo(),
    };

    let role = usecase
        .execute(CreateRoleInput {
            name: "  Quality Inspector  ".to_owned(),
            description: Some("QA walkthroughs".to_owned()),
            permissions: PermissionMatrix::empty().grant(Module::Compliance, ActionSet::ALL),
        })
        .await
        .unwrap();

    assert_eq!(role.name, "Quality Inspector");
    assert!(role.is_active);
    assert!(!role.is_system_role);
    assert!(role.permissions.allows(Module::Compliance, Action::Delete));
    assert_eq!(store.roles.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_blank_role_name() {
    let store = MockStore::new();
    let usecase = CreateRoleUseCase {
        repo: store.role_repo(),
    };

    let result = usecase
        .execute(CreateRoleInput {
            name: "   ".to_owned(),
            description: None,
            permissions: PermissionMatrix::empty(),
        })
        .await;

    assert!(matches!(result, Err(IdentityServiceError::InvalidRoleName)));
}

#[tokio::test]
async fn should_reject_duplicate_role_name() {
    let store = MockStore::new();
    store.add_role(test_role("Supervisor", PermissionMatrix::empty()));
    let usecase = CreateRoleUseCase {
        repo: store.role_repo(),
    };

    let result = usecase
        .execute(CreateRoleInput {
            name: "Supervisor".to_owned(),
            description: None,
            permissions: PermissionMatrix::empty(),
        })
        .await;

    assert!(matches!(result, Err(IdentityServiceError::RoleNameTaken)));
}

// ── GetRole / ListRoles ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_unknown_role() {
    let store = MockStore::new();
    let usecase = GetRoleUseCase {
        repo: store.role_repo(),
    };

    let result = usecase.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(IdentityServiceError::RoleNotFound)));
}

#[tokio::test]
async fn should_hide_inactive_roles_by_default() {
    let store = MockStore::new();
    store.add_role(test_role("Active", PermissionMatrix::empty()));
    let mut dormant = test_role("Dormant", PermissionMatrix::empty());
    dormant.is_active = false;
    store.add_role(dormant);

    let usecase = ListRolesUseCase {
        repo: store.role_repo(),
    };

    let visible = usecase.execute(false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Active");

    let all = usecase.execute(true).await.unwrap();
    assert_eq!(all.len(), 2);
}

// ── UpdateRole ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_matrix_wholesale_on_update() {
    let store = MockStore::new();
    let role = test_role(
        "Estimator",
        PermissionMatrix::empty()
            .grant(Module::Projects, ActionSet::ALL)
            .grant(Module::Financial, ActionSet::VIEW),
    );
    let role_id = role.id;
    store.add_role(role);

    let usecase = UpdateRoleUseCase {
        repo: store.role_repo(),
    };
    let updated = usecase
        .execute(
            role_id,
            UpdateRoleInput {
                name: "Estimator".to_owned(),
                description: None,
                permissions: PermissionMatrix::empty().grant(Module::Reports, ActionSet::VIEW),
                is_active: true,
            },
        )
        .await
        .unwrap();

    // Modules absent from the new matrix lose access entirely.
    assert!(updated.permissions.allows(Module::Reports, Action::View));
    assert!(!updated.permissions.allows(Module::Projects, Action::View));
    assert!(!updated.permissions.allows(Module::Financial, Action::View));
}

#[tokio::test]
async fn should_reject_update_renaming_onto_existing_role() {
    let store = MockStore::new();
    store.add_role(test_role("First", PermissionMatrix::empty()));
    let second = test_role("Second", PermissionMatrix::empty());
    let second_id = second.id;
    store.add_role(second);

    let usecase = UpdateRoleUseCase {
        repo: store.role_repo(),
    };
    let result = usecase
        .execute(
            second_id,
            UpdateRoleInput {
                name: "First".to_owned(),
                description: None,
                permissions: PermissionMatrix::empty(),
                is_active: true,
            },
        )
        .await;

    assert!(matches!(result, Err(IdentityServiceError::RoleNameTaken)));
}

#[tokio::test]
async fn should_allow_update_keeping_own_name() {
    let store = MockStore::new();
    let role = test_role("Keeper", PermissionMatrix::empty());
    let role_id = role.id;
    store.add_role(role);

    let usecase = UpdateRoleUseCase {
        repo: store.role_repo(),
    };
    let updated = usecase
        .execute(
            role_id,
            UpdateRoleInput {
                name: "Keeper".to_owned(),
                description: Some("unchanged name, new description".to_owned()),
                permissions: PermissionMatrix::empty(),
                is_active: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description.as_deref(), Some("unchanged name, new description"));
}

#[tokio::test]
async fn should_reject_deactivating_system_role() {
    let store = MockStore::new();
    let role = test_system_role("Administrator", PermissionMatrix::full());
    let role_id = role.id;
    store.add_role(role);

    let usecase = UpdateRoleUseCase {
        repo: store.role_repo(),
    };
    let result = usecase
        .execute(
            role_id,
            UpdateRoleInput {
                name: "Administrator".to_owned(),
                description: None,
                permissions: PermissionMatrix::full(),
                is_active: false,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(IdentityServiceError::SystemRoleProtected)
    ));
}

#[tokio::test]
async fn should_allow_editing_system_role_matrix() {
    let store = MockStore::new();
    let role = test_system_role("HR Manager", PermissionMatrix::empty());
    let role_id = role.id;
    store.add_role(role);

    let usecase = UpdateRoleUseCase {
        repo: store.role_repo(),
    };
    let updated = usecase
        .execute(
            role_id,
            UpdateRoleInput {
                name: "HR Manager".to_owned(),
                description: None,
                permissions: PermissionMatrix::empty().grant(Module::Hrms, ActionSet::ALL),
                is_active: true,
            },
        )
        .await
        .unwrap();

    assert!(updated.is_system_role);
    assert!(updated.permissions.allows(Module::Hrms, Action::Edit));
}

// ── DeleteRole ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_deleting_system_role() {
    let store = MockStore::new();
    let role = test_system_role("Administrator", PermissionMatrix::full());
    let role_id = role.id;
    store.add_role(role);

    let usecase = DeleteRoleUseCase {
        repo: store.role_repo(),
    };
    let result = usecase.execute(role_id).await;

    assert!(matches!(
        result,
        Err(IdentityServiceError::SystemRoleProtected)
    ));
    assert_eq!(store.roles.lock().unwrap().len(), 1);
}

// ── InitializeSystemRoles ────────────────────────────────────────────────────

#[tokio::test]
async fn should_seed_six_roles_on_first_init() {
    let store = MockStore::new();
    let usecase = InitializeSystemRolesUseCase {
        repo: store.role_repo(),
    };

    let created = usecase.execute().await.unwrap();
    assert_eq!(created, 6);

    let roles = store.roles.lock().unwrap();
    assert_eq!(roles.len(), 6);
    let admin = roles.iter().find(|r| r.name == "Administrator").unwrap();
    assert!(admin.is_system_role);
    assert_eq!(admin.permissions, PermissionMatrix::full());
    assert!(roles.iter().any(|r| r.name == "Site Engineer"));
}

#[tokio::test]
async fn should_not_overwrite_edited_role_on_reinit() {
    let store = MockStore::new();
    let usecase = InitializeSystemRolesUseCase {
        repo: store.role_repo(),
    };
    usecase.execute().await.unwrap();

    // An admin narrows the Accountant preset by hand.
    let accountant_id = {
        let roles = store.roles.lock().unwrap();
        roles.iter().find(|r| r.name == "Accountant").unwrap().id
    };
    let update = UpdateRoleUseCase {
        repo: store.role_repo(),
    };
    update
        .execute(
            accountant_id,
            UpdateRoleInput {
                name: "Accountant".to_owned(),
                description: None,
                permissions: PermissionMatrix::empty().grant(Module::Financial, ActionSet::VIEW),
                is_active: true,
            },
        )
        .await
        .unwrap();

    let created = usecase.execute().await.unwrap();
    assert_eq!(created, 0);

    let roles = store.roles.lock().unwrap();
    assert_eq!(roles.len(), 6);
    let accountant = roles.iter().find(|r| r.name == "Accountant").unwrap();
    assert!(!accountant.permissions.allows(Module::Financial, Action::Edit));
}
