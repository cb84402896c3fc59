//! Router Module Index
//!
//! Routing split by access level. Authentication is applied per group with
//! router layers, so a handler cannot end up exposed by accident.

/// Routes usable without an identity.
pub mod public;

/// Routes requiring a resolved `AuthUser`.
pub mod authenticated;

/// Routes restricted to the `Admin` role.
pub mod admin;
