//! Navigation menu and per-role visibility.
//!
//! Leaves are shown when their id is allow-listed for the role. A parent with
//! a submenu is shown when at least one child is shown, and only the visible
//! children are rendered under it.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::BTreeSet;

use super::permissions::Module;
use super::rbac::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<Module>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    fn leaf(id: &'static str, title: &'static str, module: Option<Module>) -> Self {
        Self {
            id,
            title,
            module,
            children: Vec::new(),
        }
    }

    fn section(id: &'static str, title: &'static str, children: Vec<NavItem>) -> Self {
        Self {
            id,
            title,
            module: None,
            children,
        }
    }

    pub fn has_submenu(&self) -> bool {
        !self.children.is_empty()
    }
}

lazy_static! {
    /// Full navigation tree in display order
    pub static ref NAVIGATION: Vec<NavItem> = vec![
        NavItem::leaf("dashboard", "Главная", None),
        NavItem::leaf("personal-files", "Личные дела", Some(Module::PersonalFile)),
        NavItem::section(
            "medical",
            "Медицинский отдел",
            vec![
                NavItem::leaf(
                    "prosthesis-referral",
                    "Направления на протезирование",
                    Some(Module::ProsthesisReferral),
                ),
                NavItem::leaf(
                    "rehabilitation-referral",
                    "Направления на реабилитацию",
                    Some(Module::RehabilitationReferral),
                ),
            ],
        ),
        NavItem::section(
            "orders",
            "Заказы",
            vec![
                NavItem::leaf("prosthesis-orders", "Протезы", Some(Module::ProsthesisOrders)),
                NavItem::leaf(
                    "footwear-orders",
                    "Ортопедическая обувь",
                    Some(Module::FootwearOrders),
                ),
                NavItem::leaf("ottobock-orders", "Ottobock", Some(Module::OttobockOrders)),
                NavItem::leaf("orthosis-orders", "Ортезы", Some(Module::OrthosisOrders)),
                NavItem::leaf("repair-orders", "Ремонт", Some(Module::RepairOrders)),
                NavItem::leaf("ready-poi-orders", "Готовые ПОИ", Some(Module::ReadyPoiOrders)),
            ],
        ),
        NavItem::section(
            "workshop",
            "Цех",
            vec![
                NavItem::leaf("manufacturing-orders", "Заказы на производство", None),
                NavItem::leaf(
                    "repair-categories",
                    "Категории ремонта",
                    Some(Module::RepairCategories),
                ),
            ],
        ),
        NavItem::section(
            "warehouse",
            "Склад",
            vec![NavItem::leaf(
                "warehouse-issuance",
                "Выдача со склада",
                Some(Module::WarehouseIssuance),
            )],
        ),
        NavItem::section(
            "invoices",
            "Счета",
            vec![
                NavItem::leaf("prosthesis-invoices", "Протезы", Some(Module::ProsthesisInvoices)),
                NavItem::leaf("footwear-invoices", "Обувь", Some(Module::FootwearInvoices)),
                NavItem::leaf("ottobock-invoices", "Ottobock", Some(Module::OttobockInvoices)),
                NavItem::leaf("orthosis-invoices", "Ортезы", Some(Module::OrthosisInvoices)),
                NavItem::leaf("ready-poi-invoices", "Готовые ПОИ", Some(Module::ReadyPoiInvoices)),
            ],
        ),
        NavItem::leaf("reports", "Отчёты", Some(Module::Reports)),
    ];
}

const ALL_ORDER_PAGES: &[&str] = &[
    "prosthesis-orders",
    "footwear-orders",
    "ottobock-orders",
    "orthosis-orders",
    "repair-orders",
    "ready-poi-orders",
];

const ALL_INVOICE_PAGES: &[&str] = &[
    "prosthesis-invoices",
    "footwear-invoices",
    "ottobock-invoices",
    "orthosis-invoices",
    "ready-poi-invoices",
];

/// Top-level items without a submenu
fn section_access(role: Role) -> &'static [&'static str] {
    match role {
        Role::Registration => &["dashboard", "personal-files", "reports"],
        Role::Medical => &["dashboard", "personal-files", "reports"],
        Role::Workshop => &["dashboard", "reports"],
        Role::Warehouse => &["dashboard", "reports"],
        Role::Administration => &["dashboard", "personal-files", "reports"],
    }
}

/// Submenu items under medical, orders, workshop, warehouse and invoices
fn submenu_access(role: Role) -> Vec<&'static str> {
    match role {
        Role::Registration => {
            let mut items = vec!["prosthesis-referral", "rehabilitation-referral"];
            items.extend_from_slice(ALL_ORDER_PAGES);
            items.extend_from_slice(ALL_INVOICE_PAGES);
            items
        }
        Role::Medical => vec![
            "prosthesis-referral",
            "rehabilitation-referral",
            "prosthesis-orders",
            "footwear-orders",
            "ottobock-orders",
            "orthosis-orders",
        ],
        Role::Workshop => {
            let mut items = ALL_ORDER_PAGES.to_vec();
            items.extend_from_slice(&["manufacturing-orders", "repair-categories"]);
            items
        }
        Role::Warehouse => vec!["warehouse-issuance"],
        Role::Administration => {
            let mut items = vec!["prosthesis-referral", "rehabilitation-referral"];
            items.extend_from_slice(ALL_ORDER_PAGES);
            items.extend_from_slice(&[
                "manufacturing-orders",
                "repair-categories",
                "warehouse-issuance",
            ]);
            items.extend_from_slice(ALL_INVOICE_PAGES);
            items
        }
    }
}

/// Ids of every navigation leaf the role may open
pub fn navigation_allow_list(role: Role) -> BTreeSet<&'static str> {
    section_access(role)
        .iter()
        .copied()
        .chain(submenu_access(role))
        .collect()
}

/// A leaf is visible when allow-listed; a parent when any child is visible
pub fn is_nav_item_visible(item: &NavItem, allowed: &BTreeSet<&'static str>) -> bool {
    if item.has_submenu() {
        item.children
            .iter()
            .any(|child| is_nav_item_visible(child, allowed))
    } else {
        allowed.contains(item.id)
    }
}

/// Filter a menu tree against an allow-list, re-checking each child
pub fn filter_navigation(items: &[NavItem], allowed: &BTreeSet<&'static str>) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| is_nav_item_visible(item, allowed))
        .map(|item| NavItem {
            children: filter_navigation(&item.children, allowed),
            ..item.clone()
        })
        .collect()
}

/// Menu as the role should see it
pub fn visible_navigation(role: Role) -> Vec<NavItem> {
    filter_navigation(&NAVIGATION, &navigation_allow_list(role))
}

/// Ids of every visible item, parents included
pub fn visible_item_ids(role: Role) -> BTreeSet<&'static str> {
    fn collect(items: &[NavItem], out: &mut BTreeSet<&'static str>) {
        for item in items {
            out.insert(item.id);
            collect(&item.children, out);
        }
    }

    let mut ids = BTreeSet::new();
    collect(&visible_navigation(role), &mut ids);
    ids
}
