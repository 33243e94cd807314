//! # Permissions
//!
//! One permission gates both commands. The host's permission system is
//! reached through [`PermissionService`]; [`PermissionRegistry`] is an
//! in-memory implementation for standalone use and tests.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{PluginError, PluginResult};

/// Permission required for `reload` and `unload`.
pub const PERMISSION_USE: &str = "reloadhotbar.use";

/// Every permission this plugin registers.
pub const PERMISSIONS: &[&str] = &[PERMISSION_USE];

/// Capability checks provided by the host.
pub trait PermissionService {
    /// Makes a permission known to the host.
    fn register_permission(&mut self, name: &str);

    /// Checks whether a user holds a permission.
    fn user_has_permission(&self, user_id: &str, name: &str) -> bool;
}

/// In-memory permission store. Names are case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct PermissionRegistry {
    registered: HashSet<String>,
    grants: HashMap<String, HashSet<String>>,
}

impl PermissionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` has been registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(&name.to_lowercase())
    }

    /// Grants a registered permission to a user.
    ///
    /// # Errors
    ///
    /// Returns `PluginError::UnknownPermission` if `name` was never
    /// registered.
    pub fn grant(&mut self, user_id: &str, name: &str) -> PluginResult<()> {
        let name = name.to_lowercase();
        if !self.registered.contains(&name) {
            return Err(PluginError::UnknownPermission(name));
        }
        debug!(user_id, permission = %name, "granted");
        self.grants.entry(user_id.to_string()).or_default().insert(name);
        Ok(())
    }

    /// Revokes a permission. Returns true if the user had it.
    pub fn revoke(&mut self, user_id: &str, name: &str) -> bool {
        self.grants
            .get_mut(user_id)
            .is_some_and(|held| held.remove(&name.to_lowercase()))
    }
}

impl PermissionService for PermissionRegistry {
    fn register_permission(&mut self, name: &str) {
        self.registered.insert(name.to_lowercase());
    }

    fn user_has_permission(&self, user_id: &str, name: &str) -> bool {
        let name = name.to_lowercase();
        self.registered.contains(&name)
            && self
                .grants
                .get(user_id)
                .is_some_and(|held| held.contains(&name))
    }
}
