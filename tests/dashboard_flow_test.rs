//! End-to-end flows through the dashboard container.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use pno_dashboard::{
    auth::{Action, Module, Role},
    config::AppConfig,
    errors::ServiceError,
    events::Event,
    models::{
        orders::{ComponentLine, ProsthesisOrder, RepairOrder, Side},
        personal_file::NewPersonalFile,
        work_order::{NewWorkOrder, OrderType, WorkOrderPatch, WorkOrderStatus},
    },
    services::TransitionMode,
    Dashboard,
};
use rstest::{fixture, rstest};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use uuid::Uuid;

#[fixture]
fn admin() -> Dashboard {
    Dashboard::new(Role::Administration).with_seed_data()
}

fn new_prosthesis_order(personal_file_id: &str) -> NewWorkOrder {
    NewWorkOrder {
        order_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        personal_file_id: personal_file_id.into(),
        client_name: "Иванов Иван Иванович".into(),
        disability_group: Some("II".into()),
        disability_category: None,
        product_name: "Протез бедра".into(),
        order_type: OrderType::Prosthesis,
        measurements: BTreeMap::from([("длина культи".to_string(), "24".to_string())]),
        manufacturing_date: None,
        issue_date: None,
        notes: None,
        workflow: None,
    }
}

fn component(code: &str) -> ComponentLine {
    ComponentLine {
        code: code.into(),
        name: "Коленный модуль".into(),
        quantity: 1,
        unit_price: dec!(2400),
    }
}

// ==================== Permissions ====================

#[test]
fn registration_creates_numbered_order() {
    let mut dashboard = Dashboard::new(Role::Registration).with_seed_data();
    dashboard.drain_events();

    let order = dashboard
        .new_work_order(new_prosthesis_order("pf-1"))
        .unwrap();

    assert!(Uuid::parse_str(&order.id).is_ok());
    assert_eq!(order.order_number, "ПР-2024-0002");
    assert_eq!(order.status, WorkOrderStatus::Registration);
    assert_eq!(order.movement_status, "Оформлен");
    assert_eq!(order.created_by, "operator");
    assert_eq!(dashboard.work_orders().len(), 7);

    let events = dashboard.drain_events();
    assert_eq!(
        events.iter().map(|r| r.event.clone()).collect::<Vec<_>>(),
        vec![Event::WorkOrderCreated {
            id: order.id.clone(),
            order_type: OrderType::Prosthesis
        }]
    );
}

#[rstest]
fn workshop_edits_but_cannot_create_or_delete(mut admin: Dashboard) {
    admin.set_role(Role::Workshop);

    assert_matches!(
        admin.new_work_order(new_prosthesis_order("pf-1")),
        Err(ServiceError::Forbidden(_))
    );
    assert_matches!(admin.delete_work_order("wo-1"), Err(ServiceError::Forbidden(_)));

    let updated = admin
        .update_work_order(
            "wo-1",
            WorkOrderPatch {
                movement_status: Some("В цехе".into()),
                ..WorkOrderPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.movement_status, "В цехе");
    assert!(admin.can(Module::ProsthesisOrders, Action::Print));
}

#[rstest]
fn warehouse_cannot_open_order_views(mut admin: Dashboard) {
    admin.set_role(Role::Warehouse);

    assert_matches!(
        admin.specialized_orders::<ProsthesisOrder>(),
        Err(ServiceError::Forbidden(_))
    );
    assert_matches!(admin.work_order("wo-1"), Err(ServiceError::Forbidden(_)));
    assert!(admin.visible_work_orders().is_empty());
    assert!(admin.all_specialized().is_empty());
}

#[rstest]
fn medical_sees_only_manufactured_types(mut admin: Dashboard) {
    admin.set_role(Role::Medical);
    let mut types: Vec<_> = admin
        .visible_work_orders()
        .into_iter()
        .map(|o| o.order_type)
        .collect();
    types.sort();
    assert_eq!(
        types,
        vec![
            OrderType::Prosthesis,
            OrderType::Footwear,
            OrderType::Ottobock,
            OrderType::Orthosis
        ]
    );
    assert_matches!(
        admin.specialized_of_type(OrderType::Repair),
        Err(ServiceError::Forbidden(_))
    );
}

// ==================== Validation and integrity ====================

#[rstest]
fn unknown_personal_file_is_a_field_error(mut admin: Dashboard) {
    let err = admin
        .new_work_order(new_prosthesis_order("pf-404"))
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains_key("personal_file_id"));
    assert_eq!(admin.work_orders().len(), 6);
}

#[rstest]
fn empty_client_name_is_reported_inline(mut admin: Dashboard) {
    let mut input = new_prosthesis_order("pf-1");
    input.client_name.clear();
    let err = admin.new_work_order(input).unwrap_err();
    assert_eq!(
        err.field_errors().unwrap().get("client_name").map(String::as_str),
        Some("Укажите ФИО клиента")
    );
}

#[rstest]
fn personal_files_are_added_and_referenced(mut admin: Dashboard) {
    let file = admin
        .add_personal_file(NewPersonalFile {
            file_number: "ЛД-0042".into(),
            client_name: "Кузнецова Мария".into(),
            birth_date: None,
            disability_group: Some("III".into()),
            disability_category: None,
            address: None,
            phone: None,
        })
        .unwrap();
    assert_eq!(admin.personal_files().unwrap().len(), 4);
    assert!(admin.new_work_order(new_prosthesis_order(&file.id)).is_ok());

    let duplicate = NewPersonalFile {
        file_number: "ЛД-0042".into(),
        client_name: "Другой клиент".into(),
        birth_date: None,
        disability_group: None,
        disability_category: None,
        address: None,
        phone: None,
    };
    assert_matches!(
        admin.add_personal_file(duplicate),
        Err(ServiceError::ValidationError(errors)) if errors.contains_key("file_number")
    );
}

#[rstest]
fn numbers_stay_unique_after_a_manual_edit(mut admin: Dashboard) {
    let first = admin.new_work_order(new_prosthesis_order("pf-1")).unwrap();
    let second = admin.new_work_order(new_prosthesis_order("pf-1")).unwrap();
    assert_eq!(first.order_number, "ПР-2024-0002");
    assert_eq!(second.order_number, "ПР-2024-0003");

    let mut view = admin.specialized_order::<ProsthesisOrder>(&second.id).unwrap();
    view.common.order_number = "ПР-2024-0004".into();
    admin.update_specialized(view).unwrap();

    let third = admin.new_work_order(new_prosthesis_order("pf-1")).unwrap();
    assert_eq!(third.order_number, "ПР-2024-0005");

    let mut numbers: Vec<_> = admin
        .work_orders()
        .iter()
        .map(|o| o.order_number.clone())
        .collect();
    let total = numbers.len();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), total);
}

#[rstest]
fn duplicate_order_number_is_rejected(mut admin: Dashboard) {
    let taken = admin.work_order("wo-1").unwrap().order_number;

    let mut copy = admin.work_order("wo-1").unwrap();
    copy.id = String::new();
    assert_matches!(
        admin.add_work_order(copy),
        Err(ServiceError::ValidationError(errors)) if errors.contains_key("order_number")
    );

    let patch = WorkOrderPatch {
        order_number: Some(taken),
        ..WorkOrderPatch::default()
    };
    assert_matches!(
        admin.update_work_order("wo-2", patch),
        Err(ServiceError::ValidationError(errors)) if errors.contains_key("order_number")
    );
    assert_eq!(admin.work_orders().len(), 6);
}

#[rstest]
fn patch_is_validated_before_it_is_stored(mut admin: Dashboard) {
    let before = admin.work_order("wo-1").unwrap();

    let blank_name = WorkOrderPatch {
        client_name: Some(String::new()),
        ..WorkOrderPatch::default()
    };
    let err = admin.update_work_order("wo-1", blank_name).unwrap_err();
    assert_eq!(
        err.field_errors().unwrap().get("client_name").map(String::as_str),
        Some("Укажите ФИО клиента")
    );

    let reversed_dates = WorkOrderPatch {
        manufacturing_date: Some(NaiveDate::from_ymd_opt(2024, 5, 1)),
        issue_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1)),
        ..WorkOrderPatch::default()
    };
    let err = admin.update_work_order("wo-1", reversed_dates).unwrap_err();
    assert_eq!(
        err.field_errors().unwrap().get("__all__").map(String::as_str),
        Some("Дата выдачи раньше даты изготовления")
    );

    assert_eq!(admin.work_order("wo-1").unwrap(), before);
}

#[rstest]
fn saving_a_view_checks_issue_dates(mut admin: Dashboard) {
    let mut view = admin.specialized_order::<ProsthesisOrder>("wo-1").unwrap();
    view.common.manufacturing_date = NaiveDate::from_ymd_opt(2024, 5, 1);
    view.common.issue_date = NaiveDate::from_ymd_opt(2024, 1, 1);

    assert_matches!(
        admin.update_specialized(view),
        Err(ServiceError::ValidationError(errors)) if errors.contains_key("__all__")
    );
    assert_eq!(admin.work_order("wo-1").unwrap().issue_date, None);
}

// ==================== Status transitions ====================

#[rstest]
fn free_mode_accepts_any_jump(mut admin: Dashboard) {
    let order = admin
        .transition_status("wo-3", WorkOrderStatus::Completed)
        .unwrap();
    assert_eq!(order.status, WorkOrderStatus::Completed);
}

#[rstest]
fn strict_mode_follows_the_stage_table(admin: Dashboard) {
    let mut dashboard = admin.with_transition_mode(TransitionMode::Strict);
    dashboard.drain_events();

    assert_matches!(
        dashboard.transition_status("wo-3", WorkOrderStatus::Completed),
        Err(ServiceError::InvalidTransition { .. })
    );
    assert_eq!(
        dashboard.work_order("wo-3").unwrap().status,
        WorkOrderStatus::Registration
    );

    dashboard
        .transition_status("wo-3", WorkOrderStatus::MedicalReview)
        .unwrap();
    let events: Vec<_> = dashboard.drain_events().into_iter().map(|r| r.event).collect();
    assert!(events.contains(&Event::WorkOrderStatusChanged {
        id: "wo-3".into(),
        old_status: WorkOrderStatus::Registration,
        new_status: WorkOrderStatus::MedicalReview,
    }));
}

// ==================== Specialized views ====================

#[rstest]
fn saving_a_view_is_lossy_by_default(mut admin: Dashboard) {
    let mut order = admin.specialized_order::<ProsthesisOrder>("wo-1").unwrap();
    order.side = Side::Left;
    order.components.push(component("3R60"));
    order.common.notes = Some("после примерки".into());

    let saved = admin.update_specialized(order).unwrap();

    assert_eq!(saved.common.notes.as_deref(), Some("после примерки"));
    assert_eq!(saved.side, Side::Right);
    assert!(saved.components.is_empty());

    let generic = admin.work_order("wo-1").unwrap();
    assert_eq!(generic.status, WorkOrderStatus::Registration);
    assert!(generic.measurements.is_empty());
}

#[rstest]
fn strict_mode_keeps_status_when_saving_a_view(admin: Dashboard) {
    let mut dashboard = admin.with_transition_mode(TransitionMode::Strict);
    let order = dashboard.specialized_order::<ProsthesisOrder>("wo-1").unwrap();
    dashboard.update_specialized(order).unwrap();
    assert_eq!(
        dashboard.work_order("wo-1").unwrap().status,
        WorkOrderStatus::InProduction
    );
}

#[rstest]
fn retained_payload_survives_a_save(admin: Dashboard) {
    let mut dashboard = admin.with_payload_retention(true);
    let mut order = dashboard.specialized_order::<ProsthesisOrder>("wo-1").unwrap();
    order.side = Side::Bilateral;
    order.components = vec![component("3R60"), component("1C60")];
    order.order_cost = dec!(4800);

    dashboard.update_specialized(order).unwrap();

    // shared fields still come from the work order
    dashboard
        .update_work_order(
            "wo-1",
            WorkOrderPatch {
                client_name: Some("Иванов И. И.".into()),
                ..WorkOrderPatch::default()
            },
        )
        .unwrap();

    let reread = dashboard.specialized_order::<ProsthesisOrder>("wo-1").unwrap();
    assert_eq!(reread.side, Side::Bilateral);
    assert_eq!(reread.components.len(), 2);
    assert_eq!(reread.order_cost, dec!(4800));
    assert_eq!(reread.common.client_name, "Иванов И. И.");

    let listed = dashboard.specialized_orders::<ProsthesisOrder>().unwrap();
    assert_eq!(listed[0].components.len(), 2);
}

#[rstest]
fn create_and_delete_through_a_view(mut admin: Dashboard) {
    let template = admin.specialized_order::<RepairOrder>("wo-5").unwrap();
    let mut draft = RepairOrder::with_defaults(template.common.clone());
    draft.common.id = String::new();
    draft.common.order_number = String::new();
    draft.defect_description = Some("Износ стопы".into());

    let created = admin.create_specialized(draft).unwrap();
    assert_ne!(created.common.id, "wo-5");
    assert_eq!(created.common.created_by, "operator");
    assert!(created.common.created_at > template.common.created_at);
    assert_eq!(created.common.updated_at, created.common.created_at);
    assert_eq!(created.common.order_number, "РМ-2024-0002");
    assert_eq!(created.defect_description, None);
    assert_eq!(admin.specialized_orders::<RepairOrder>().unwrap().len(), 2);

    assert_matches!(
        admin.delete_specialized::<ProsthesisOrder>(&created.common.id),
        Err(ServiceError::OrderTypeMismatch {
            expected: OrderType::Prosthesis,
            found: OrderType::Repair
        })
    );
    admin
        .delete_specialized::<RepairOrder>(&created.common.id)
        .unwrap();
    assert_eq!(admin.specialized_orders::<RepairOrder>().unwrap().len(), 1);
    assert_matches!(
        admin.work_order(&created.common.id),
        Err(ServiceError::NotFound(_))
    );
}

#[rstest]
fn medical_cannot_create_through_a_view(mut admin: Dashboard) {
    let template = admin.specialized_order::<ProsthesisOrder>("wo-1").unwrap();
    admin.set_role(Role::Medical);

    let mut draft = ProsthesisOrder::with_defaults(template.common);
    draft.common.id = String::new();
    assert_matches!(
        admin.create_specialized(draft),
        Err(ServiceError::Forbidden(_))
    );
}

// ==================== Collections ====================

#[rstest]
fn snapshots_do_not_change_after_mutation(mut admin: Dashboard) {
    let before = admin.work_orders();
    admin.delete_work_order("wo-2").unwrap();

    assert_eq!(before.len(), 6);
    assert_eq!(admin.work_orders().len(), 5);
    assert!(before.iter().any(|o| o.id == "wo-2"));
}

#[test]
fn config_controls_seed_and_modes() {
    let config = AppConfig {
        seed_demo_data: false,
        default_role: Role::Medical,
        status_transitions: TransitionMode::Strict,
        ..AppConfig::default()
    };
    let dashboard = Dashboard::from_config(&config);
    assert_eq!(dashboard.role(), Role::Medical);
    assert!(dashboard.work_orders().is_empty());

    let seeded = Dashboard::from_config(&AppConfig::default());
    assert_eq!(seeded.work_orders().len(), 6);
}

#[test]
fn missing_order_is_not_found() {
    let mut dashboard = Dashboard::new(Role::Administration);
    assert_matches!(
        dashboard.transition_status("nope", WorkOrderStatus::Completed),
        Err(ServiceError::NotFound(_))
    );
}
