/*!
 * # Permissions Module
 *
 * This module defines the permission table for the dashboard.
 * Every functional module carries one permission tuple per role; the table is
 * written as exhaustive matches so a new role or module does not compile until
 * it has a row.
 */

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use super::rbac::Role;
use crate::errors::ServiceError;

/// Functional areas subject to role-based permissions
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
pub enum Module {
    PersonalFile,
    ProsthesisReferral,
    RehabilitationReferral,
    ProsthesisOrders,
    FootwearOrders,
    OttobockOrders,
    OrthosisOrders,
    RepairOrders,
    ReadyPoiOrders,
    ProsthesisInvoices,
    FootwearInvoices,
    OttobockInvoices,
    OrthosisInvoices,
    ReadyPoiInvoices,
    RepairCategories,
    Reports,
    WarehouseIssuance,
}

impl Module {
    /// Menu title shown to operators
    pub fn title(&self) -> &'static str {
        match self {
            Module::PersonalFile => "Личное дело",
            Module::ProsthesisReferral => "Направление на протезирование",
            Module::RehabilitationReferral => "Направление на реабилитацию",
            Module::ProsthesisOrders => "Заказы на протезы",
            Module::FootwearOrders => "Заказы на ортопедическую обувь",
            Module::OttobockOrders => "Заказы Ottobock",
            Module::OrthosisOrders => "Заказы на ортезы",
            Module::RepairOrders => "Наряды на ремонт",
            Module::ReadyPoiOrders => "Выдача готовых ПОИ",
            Module::ProsthesisInvoices => "Счета за протезы",
            Module::FootwearInvoices => "Счета за обувь",
            Module::OttobockInvoices => "Счета Ottobock",
            Module::OrthosisInvoices => "Счета за ортезы",
            Module::ReadyPoiInvoices => "Счета за готовые ПОИ",
            Module::RepairCategories => "Категории ремонта",
            Module::Reports => "Отчёты",
            Module::WarehouseIssuance => "Выдача со склада",
        }
    }
}

/// Permission actions
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
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Print,
}

/// Five independent action flags for one (module, role) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permission {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
    pub print: bool,
}

impl Permission {
    pub const FULL: Permission = Permission::new(true, true, true, true, true);
    pub const NONE: Permission = Permission::new(false, false, false, false, false);
    /// View and print
    pub const READ_ONLY: Permission = Permission::new(true, false, false, false, true);
    /// View, edit and print; cannot create or delete
    pub const EDIT_ONLY: Permission = Permission::new(true, false, true, false, true);
    /// Everything except delete
    pub const NO_DELETE: Permission = Permission::new(true, true, true, false, true);

    pub const fn new(view: bool, create: bool, edit: bool, delete: bool, print: bool) -> Self {
        Self {
            view,
            create,
            edit,
            delete,
            print,
        }
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
            Action::Print => self.print,
        }
    }

    /// Actions this permission grants, in declaration order
    pub fn actions(&self) -> Vec<Action> {
        Action::iter().filter(|a| self.allows(*a)).collect()
    }
}

/// One row of the permission table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePermissions {
    pub registration: Permission,
    pub medical: Permission,
    pub workshop: Permission,
    pub warehouse: Permission,
    pub administration: Permission,
}

impl RolePermissions {
    pub fn for_role(&self, role: Role) -> Permission {
        match role {
            Role::Registration => self.registration,
            Role::Medical => self.medical,
            Role::Workshop => self.workshop,
            Role::Warehouse => self.warehouse,
            Role::Administration => self.administration,
        }
    }
}

/// Static permission table row for a module
pub fn permission_row(module: Module) -> RolePermissions {
    use Permission as P;

    // Manufactured orders share one shape: registration owns the record,
    // medical and workshop edit their stage, warehouse never sees them.
    const MANUFACTURED_ORDER: RolePermissions = RolePermissions {
        registration: P::FULL,
        medical: P::EDIT_ONLY,
        workshop: P::EDIT_ONLY,
        warehouse: P::NONE,
        administration: P::FULL,
    };
    const INVOICE: RolePermissions = RolePermissions {
        registration: P::FULL,
        medical: P::NONE,
        workshop: P::NONE,
        warehouse: P::READ_ONLY,
        administration: P::FULL,
    };
    const REFERRAL: RolePermissions = RolePermissions {
        registration: P::NO_DELETE,
        medical: P::FULL,
        workshop: P::NONE,
        warehouse: P::NONE,
        administration: P::FULL,
    };

    match module {
        Module::PersonalFile => RolePermissions {
            registration: P::FULL,
            medical: P::READ_ONLY,
            workshop: P::NONE,
            warehouse: P::NONE,
            administration: P::FULL,
        },
        Module::ProsthesisReferral | Module::RehabilitationReferral => REFERRAL,
        Module::ProsthesisOrders
        | Module::FootwearOrders
        | Module::OttobockOrders
        | Module::OrthosisOrders => MANUFACTURED_ORDER,
        Module::RepairOrders => RolePermissions {
            registration: P::FULL,
            medical: P::NONE,
            workshop: P::EDIT_ONLY,
            warehouse: P::NONE,
            administration: P::FULL,
        },
        Module::ReadyPoiOrders => RolePermissions {
            registration: P::FULL,
            medical: P::NONE,
            workshop: P::READ_ONLY,
            warehouse: P::NONE,
            administration: P::FULL,
        },
        Module::ProsthesisInvoices
        | Module::FootwearInvoices
        | Module::OttobockInvoices
        | Module::OrthosisInvoices
        | Module::ReadyPoiInvoices => INVOICE,
        Module::RepairCategories => RolePermissions {
            registration: P::READ_ONLY,
            medical: P::NONE,
            workshop: P::FULL,
            warehouse: P::NONE,
            administration: P::FULL,
        },
        Module::Reports => RolePermissions {
            registration: P::READ_ONLY,
            medical: P::READ_ONLY,
            workshop: P::READ_ONLY,
            warehouse: P::READ_ONLY,
            administration: P::FULL,
        },
        Module::WarehouseIssuance => RolePermissions {
            registration: P::READ_ONLY,
            medical: P::NONE,
            workshop: P::READ_ONLY,
            warehouse: P::FULL,
            administration: P::FULL,
        },
    }
}

/// Permission table as plain data keyed by (module, role).
///
/// A matrix can only be constructed complete; lookups never fall back to a
/// default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    entries: HashMap<(Module, Role), Permission>,
}

impl PermissionMatrix {
    /// The built-in table
    pub fn standard() -> Self {
        let entries = Module::iter()
            .flat_map(|module| {
                let row = permission_row(module);
                Role::iter().map(move |role| ((module, role), row.for_role(role)))
            })
            .collect();
        Self { entries }
    }

    /// Build a matrix from arbitrary entries, rejecting tables with gaps.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ((Module, Role), Permission)>,
    ) -> Result<Self, ServiceError> {
        let entries: HashMap<_, _> = entries.into_iter().collect();
        for module in Module::iter() {
            for role in Role::iter() {
                if !entries.contains_key(&(module, role)) {
                    return Err(ServiceError::IncompletePermissionTable { module, role });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, module: Module, role: Role) -> Permission {
        match self.entries.get(&(module, role)) {
            Some(permission) => *permission,
            // from_entries/standard guarantee totality
            None => panic!("permission matrix has no entry for {}/{}", module, role),
        }
    }

    pub fn has_permission(&self, role: Role, module: Module, action: Action) -> bool {
        self.get(module, role).allows(action)
    }

    /// All entries ordered by module, then role
    pub fn rows(&self) -> Vec<(Module, Role, Permission)> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .map(|((module, role), permission)| (*module, *role, *permission))
            .collect();
        rows.sort_by_key(|(module, role, _)| (*module, *role));
        rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

lazy_static! {
    pub static ref PERMISSION_MATRIX: PermissionMatrix = PermissionMatrix::standard();
}

/// Look up `table[module][role][action]` in the built-in table
pub fn has_permission(role: Role, module: Module, action: Action) -> bool {
    PERMISSION_MATRIX.has_permission(role, module, action)
}

pub fn can_view(role: Role, module: Module) -> bool {
    has_permission(role, module, Action::View)
}

pub fn can_create(role: Role, module: Module) -> bool {
    has_permission(role, module, Action::Create)
}

pub fn can_edit(role: Role, module: Module) -> bool {
    has_permission(role, module, Action::Edit)
}

pub fn can_delete(role: Role, module: Module) -> bool {
    has_permission(role, module, Action::Delete)
}

pub fn can_print(role: Role, module: Module) -> bool {
    has_permission(role, module, Action::Print)
}
