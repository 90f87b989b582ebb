/*!
 * # Role-Based Access Control (RBAC) Module
 *
 * Operator roles and the service that answers permission questions for them.
 * The current role is a session selection passed in by the caller, not an
 * authenticated identity.
 */

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::warn;

use super::permissions::{Action, Module, Permission, PermissionMatrix, PERMISSION_MATRIX};
use crate::errors::ServiceError;

/// Operator persona
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Registration,
    Medical,
    Workshop,
    Warehouse,
    Administration,
}

impl Role {
    pub fn title(&self) -> &'static str {
        match self {
            Role::Registration => "Регистратура",
            Role::Medical => "Медицинский отдел",
            Role::Workshop => "Цех",
            Role::Warehouse => "Склад",
            Role::Administration => "Администрация",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Registration => "Registers clients, personal files, orders and invoices",
            Role::Medical => "Reviews referrals and assigns diagnoses",
            Role::Workshop => "Manufactures and repairs products",
            Role::Warehouse => "Issues finished products from stock",
            Role::Administration => "Full access to every module",
        }
    }
}

/// RBAC service answering permission questions for a role
#[derive(Clone, Debug)]
pub struct RbacService {
    matrix: Arc<PermissionMatrix>,
}

impl RbacService {
    /// Service backed by the built-in table
    pub fn new() -> Self {
        Self {
            matrix: Arc::new(PERMISSION_MATRIX.clone()),
        }
    }

    pub fn with_matrix(matrix: PermissionMatrix) -> Self {
        Self {
            matrix: Arc::new(matrix),
        }
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    pub fn permission(&self, role: Role, module: Module) -> Permission {
        self.matrix.get(module, role)
    }

    pub fn check(&self, role: Role, module: Module, action: Action) -> bool {
        self.matrix.has_permission(role, module, action)
    }

    /// Fail with `Forbidden` unless `role` may perform `action` on `module`
    pub fn require(&self, role: Role, module: Module, action: Action) -> Result<(), ServiceError> {
        if self.check(role, module, action) {
            return Ok(());
        }
        warn!(%role, %module, %action, "permission denied");
        Err(ServiceError::Forbidden(format!(
            "role '{}' cannot {} in module '{}'",
            role, action, module
        )))
    }

    /// Every module with its permission for the role
    pub fn permissions_for(&self, role: Role) -> Vec<(Module, Permission)> {
        Module::iter()
            .map(|module| (module, self.matrix.get(module, role)))
            .collect()
    }

    /// Modules the role can at least view
    pub fn modules_visible_to(&self, role: Role) -> Vec<Module> {
        Module::iter()
            .filter(|module| self.check(role, *module, Action::View))
            .collect()
    }
}

impl Default for RbacService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn require_returns_forbidden_for_denied_action() {
        let rbac = RbacService::new();
        assert!(rbac
            .require(Role::Workshop, Module::ProsthesisOrders, Action::Edit)
            .is_ok());
        assert_matches!(
            rbac.require(Role::Workshop, Module::ProsthesisOrders, Action::Create),
            Err(ServiceError::Forbidden(msg)) if msg.contains("workshop")
        );
    }

    #[test]
    fn warehouse_sees_only_its_modules() {
        let rbac = RbacService::new();
        let visible = rbac.modules_visible_to(Role::Warehouse);
        assert!(visible.contains(&Module::WarehouseIssuance));
        assert!(visible.contains(&Module::Reports));
        assert!(!visible.contains(&Module::ProsthesisOrders));
    }

    #[test]
    fn administration_has_everything() {
        let rbac = RbacService::new();
        assert!(rbac
            .permissions_for(Role::Administration)
            .iter()
            .all(|(_, permission)| *permission == Permission::FULL));
    }

    #[test]
    fn role_parses_from_id() {
        assert_eq!("warehouse".parse::<Role>().ok(), Some(Role::Warehouse));
        assert_eq!(Role::Administration.to_string(), "administration");
        assert_eq!(Role::iter().count(), 5);
    }
}
