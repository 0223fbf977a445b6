//! Pure RBAC domain shared across Girder services.
//!
//! Holds the closed module/action enumerations, the permission matrix,
//! the legacy role tables, and the resolution rules. No I/O, no clock.

pub mod gate;
pub mod legacy;
pub mod module;
pub mod permission;
pub mod resolve;
