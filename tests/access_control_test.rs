//! Permission table and menu visibility across every role and module.

use assert_matches::assert_matches;
use pno_dashboard::auth::{
    can_create, can_delete, can_edit, can_print, can_view, has_permission, navigation_allow_list,
    visible_item_ids, visible_navigation, Action, Module, NavItem, Permission, PermissionMatrix,
    RbacService, Role, NAVIGATION, PERMISSION_MATRIX,
};
use pno_dashboard::errors::ServiceError;
use rstest::rstest;
use strum::IntoEnumIterator;

fn find<'a>(items: &'a [NavItem], id: &str) -> Option<&'a NavItem> {
    items.iter().find_map(|item| {
        if item.id == id {
            Some(item)
        } else {
            find(&item.children, id)
        }
    })
}

// ==================== Permission table ====================

#[test]
fn every_module_has_a_row_for_every_role() {
    assert_eq!(PERMISSION_MATRIX.len(), Module::iter().count() * Role::iter().count());
    for module in Module::iter() {
        for role in Role::iter() {
            // panics on a missing pair
            let _ = PERMISSION_MATRIX.get(module, role);
        }
    }
}

#[test]
fn incomplete_table_is_rejected() {
    let entries = PERMISSION_MATRIX
        .rows()
        .into_iter()
        .filter(|(module, role, _)| !(*module == Module::Reports && *role == Role::Warehouse))
        .map(|(module, role, permission)| ((module, role), permission));

    assert_matches!(
        PermissionMatrix::from_entries(entries),
        Err(ServiceError::IncompletePermissionTable {
            module: Module::Reports,
            role: Role::Warehouse
        })
    );

    let complete = PERMISSION_MATRIX
        .rows()
        .into_iter()
        .map(|(module, role, permission)| ((module, role), permission));
    assert_eq!(
        PermissionMatrix::from_entries(complete).unwrap(),
        *PERMISSION_MATRIX
    );
}

#[rstest]
#[case(Role::Workshop, Module::ProsthesisOrders, Action::Create, false)]
#[case(Role::Workshop, Module::ProsthesisOrders, Action::Edit, true)]
#[case(Role::Workshop, Module::ProsthesisOrders, Action::Print, true)]
#[case(Role::Workshop, Module::ProsthesisOrders, Action::Delete, false)]
#[case(Role::Warehouse, Module::ProsthesisOrders, Action::View, false)]
#[case(Role::Warehouse, Module::WarehouseIssuance, Action::Create, true)]
#[case(Role::Medical, Module::ProsthesisReferral, Action::Delete, true)]
#[case(Role::Registration, Module::ProsthesisReferral, Action::Delete, false)]
#[case(Role::Medical, Module::ProsthesisInvoices, Action::View, false)]
#[case(Role::Registration, Module::RepairCategories, Action::Edit, false)]
fn concrete_permissions(
    #[case] role: Role,
    #[case] module: Module,
    #[case] action: Action,
    #[case] expected: bool,
) {
    assert_eq!(has_permission(role, module, action), expected);
}

#[test]
fn convenience_predicates_match_the_table() {
    for module in Module::iter() {
        for role in Role::iter() {
            let row = PERMISSION_MATRIX.get(module, role);
            assert_eq!(can_view(role, module), row.view);
            assert_eq!(can_create(role, module), row.create);
            assert_eq!(can_edit(role, module), row.edit);
            assert_eq!(can_delete(role, module), row.delete);
            assert_eq!(can_print(role, module), row.print);
        }
    }
}

#[test]
fn administration_is_a_superset_of_every_role() {
    for module in Module::iter() {
        assert_eq!(
            PERMISSION_MATRIX.get(module, Role::Administration),
            Permission::FULL
        );
        for role in Role::iter() {
            for action in Action::iter() {
                if has_permission(role, module, action) {
                    assert!(has_permission(Role::Administration, module, action));
                }
            }
        }
    }
}

#[test]
fn rbac_service_lists_rows_per_role() {
    let rbac = RbacService::new();
    let rows = rbac.permissions_for(Role::Workshop);
    assert_eq!(rows.len(), Module::iter().count());

    let (_, repair) = rows
        .iter()
        .find(|(module, _)| *module == Module::RepairOrders)
        .copied()
        .unwrap();
    assert_eq!(repair.actions(), vec![Action::View, Action::Edit, Action::Print]);
}

// ==================== Navigation ====================

#[test]
fn administration_allow_list_is_a_superset() {
    let admin = navigation_allow_list(Role::Administration);
    for role in Role::iter() {
        let allowed = navigation_allow_list(role);
        assert!(
            allowed.is_subset(&admin),
            "{} sees items administration does not: {:?}",
            role,
            allowed.difference(&admin).collect::<Vec<_>>()
        );
    }
}

#[test]
fn visible_leaves_are_viewable_modules() {
    for role in Role::iter() {
        let allowed = navigation_allow_list(role);
        for id in &allowed {
            if let Some(module) = find(&NAVIGATION, id).and_then(|item| item.module) {
                assert!(
                    can_view(role, module),
                    "{} sees menu item {} but cannot view {}",
                    role,
                    id,
                    module
                );
            }
        }
    }
}

#[test]
fn parents_follow_the_any_child_rule() {
    for role in Role::iter() {
        let visible = visible_item_ids(role);
        for item in NAVIGATION.iter().filter(|item| item.has_submenu()) {
            let any_child = item.children.iter().any(|c| visible.contains(c.id));
            assert_eq!(
                visible.contains(item.id),
                any_child,
                "section {} for {}",
                item.id,
                role
            );
        }
    }
}

#[test]
fn warehouse_menu_is_dashboard_warehouse_reports() {
    let ids: Vec<_> = visible_navigation(Role::Warehouse)
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec!["dashboard", "warehouse", "reports"]);
}

#[rstest]
#[case(Role::Registration, "orders", 6)]
#[case(Role::Medical, "orders", 4)]
#[case(Role::Medical, "medical", 2)]
#[case(Role::Workshop, "workshop", 2)]
#[case(Role::Administration, "invoices", 5)]
fn submenu_sizes(#[case] role: Role, #[case] section: &str, #[case] children: usize) {
    let menu = visible_navigation(role);
    let item = menu.iter().find(|item| item.id == section).unwrap();
    assert_eq!(item.children.len(), children);
}

#[rstest]
#[case(Role::Medical, "invoices")]
#[case(Role::Warehouse, "orders")]
#[case(Role::Workshop, "medical")]
fn hidden_sections(#[case] role: Role, #[case] section: &str) {
    assert!(visible_navigation(role).iter().all(|item| item.id != section));
}
