use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use girder_core::health::{healthz, readyz};
use girder_core::middleware::request_id_layer;

use crate::handlers::{
    auth::get_me,
    employee::{get_employees, link_user, unlink_user},
    role::{create_role, delete_role, get_role, get_roles, init_roles, update_role},
    user::{assign_role, clear_role, get_stats, get_users},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Current user
        .route("/auth/me", get(get_me))
        // Role registry
        .route("/rbac/roles", post(create_role))
        .route("/rbac/roles", get(get_roles))
        .route("/rbac/roles/{role_id}", get(get_role))
        .route("/rbac/roles/{role_id}", put(update_role))
        .route("/rbac/roles/{role_id}", delete(delete_role))
        .route("/rbac/init", post(init_roles))
        // Role bindings
        .route("/rbac/users", get(get_users))
        .route("/rbac/assign-role", post(assign_role))
        .route("/rbac/users/{user_id}/role", delete(clear_role))
        .route("/rbac/stats", get(get_stats))
        // Employee accounts
        .route("/rbac/employees", get(get_employees))
        .route("/employees/{employee_id}/link-user", post(link_user))
        .route("/employees/{employee_id}/unlink-user", delete(unlink_user))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
