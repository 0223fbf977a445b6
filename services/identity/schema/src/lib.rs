//! sea-orm entities for the identity service.

pub mod employees;
pub mod role_permissions;
pub mod roles;
pub mod users;
