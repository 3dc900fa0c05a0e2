//! Administrator features

pub mod roles;

pub use roles::{RoleManagementClient, UserLookup};
