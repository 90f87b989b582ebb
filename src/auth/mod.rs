//! Access control: roles, the module permission table and menu visibility.

pub mod navigation;
pub mod permissions;
pub mod rbac;

pub use navigation::{
    filter_navigation, is_nav_item_visible, navigation_allow_list, visible_item_ids,
    visible_navigation, NavItem, NAVIGATION,
};
pub use permissions::{
    can_create, can_delete, can_edit, can_print, can_view, has_permission, permission_row,
    Action, Module, Permission, PermissionMatrix, RolePermissions, PERMISSION_MATRIX,
};
pub use rbac::{RbacService, Role};
