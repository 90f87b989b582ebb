//! Static demo data standing in for a database.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

use crate::models::orders::DEFAULT_MOVEMENT_STATUS;
use crate::models::personal_file::PersonalFile;
use crate::models::work_order::{OrderType, Priority, WorkOrder, WorkOrderStatus, WorkflowMeta};

const SEED_AUTHOR: &str = "seed";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn morning_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(9, 0, 0)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(Utc::now)
}

pub fn demo_personal_files() -> Vec<PersonalFile> {
    vec![
        PersonalFile {
            id: "pf-1".into(),
            file_number: "ЛД-0001".into(),
            client_name: "Иванов Иван Иванович".into(),
            birth_date: Some(date(1968, 4, 12)),
            disability_group: Some("II".into()),
            disability_category: Some("Инвалид труда".into()),
            address: Some("г. Бишкек, ул. Токтогула, 10".into()),
            phone: Some("+996555123456".into()),
            created_at: morning_of(date(2024, 1, 10)),
        },
        PersonalFile {
            id: "pf-2".into(),
            file_number: "ЛД-0002".into(),
            client_name: "Петрова Анна Сергеевна".into(),
            birth_date: Some(date(1985, 9, 3)),
            disability_group: Some("III".into()),
            disability_category: Some("Инвалид с детства".into()),
            address: None,
            phone: None,
            created_at: morning_of(date(2024, 1, 15)),
        },
        PersonalFile {
            id: "pf-3".into(),
            file_number: "ЛД-0003".into(),
            client_name: "Сидоров Пётр Алексеевич".into(),
            birth_date: Some(date(1950, 1, 30)),
            disability_group: Some("I".into()),
            disability_category: Some("Инвалид ВОВ".into()),
            address: None,
            phone: Some("+996700654321".into()),
            created_at: morning_of(date(2024, 2, 1)),
        },
    ]
}

struct SeedOrder {
    id: &'static str,
    seq: u32,
    order_type: OrderType,
    file: &'static str,
    client: &'static str,
    group: &'static str,
    product: &'static str,
    ordered: NaiveDate,
    status: WorkOrderStatus,
}

pub fn demo_work_orders() -> Vec<WorkOrder> {
    let seeds = [
        SeedOrder {
            id: "wo-1",
            seq: 1,
            order_type: OrderType::Prosthesis,
            file: "pf-1",
            client: "Иванов Иван Иванович",
            group: "II",
            product: "Протез голени",
            ordered: date(2024, 2, 5),
            status: WorkOrderStatus::InProduction,
        },
        SeedOrder {
            id: "wo-2",
            seq: 1,
            order_type: OrderType::Footwear,
            file: "pf-2",
            client: "Петрова Анна Сергеевна",
            group: "III",
            product: "Обувь ортопедическая сложная",
            ordered: date(2024, 2, 7),
            status: WorkOrderStatus::MedicalReview,
        },
        SeedOrder {
            id: "wo-3",
            seq: 1,
            order_type: OrderType::Ottobock,
            file: "pf-3",
            client: "Сидоров Пётр Алексеевич",
            group: "I",
            product: "Протез бедра (Ottobock)",
            ordered: date(2024, 2, 12),
            status: WorkOrderStatus::Registration,
        },
        SeedOrder {
            id: "wo-4",
            seq: 1,
            order_type: OrderType::Orthosis,
            file: "pf-2",
            client: "Петрова Анна Сергеевна",
            group: "III",
            product: "Ортез коленный",
            ordered: date(2024, 2, 14),
            status: WorkOrderStatus::ReadyForFitting,
        },
        SeedOrder {
            id: "wo-5",
            seq: 1,
            order_type: OrderType::Repair,
            file: "pf-1",
            client: "Иванов Иван Иванович",
            group: "II",
            product: "Ремонт: Протез бедра",
            ordered: date(2024, 2, 20),
            status: WorkOrderStatus::InProduction,
        },
        SeedOrder {
            id: "wo-6",
            seq: 1,
            order_type: OrderType::ReadyPoi,
            file: "pf-3",
            client: "Сидоров Пётр Алексеевич",
            group: "I",
            product: "Трость",
            ordered: date(2024, 2, 21),
            status: WorkOrderStatus::ReadyForIssue,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let created = morning_of(seed.ordered);
            WorkOrder {
                id: seed.id.into(),
                order_number: format!(
                    "{}-{}-{:04}",
                    seed.order_type.number_prefix(),
                    seed.ordered.format("%Y"),
                    seed.seq
                ),
                order_date: seed.ordered,
                personal_file_id: seed.file.into(),
                client_name: seed.client.into(),
                disability_group: Some(seed.group.into()),
                disability_category: None,
                product_name: seed.product.into(),
                manufacturing_date: None,
                issue_date: None,
                movement_status: DEFAULT_MOVEMENT_STATUS.into(),
                status: seed.status,
                order_type: seed.order_type,
                measurements: BTreeMap::new(),
                notes: None,
                created_by: SEED_AUTHOR.into(),
                created_at: created,
                updated_at: created,
                workflow: Some(WorkflowMeta {
                    priority: Priority::Normal,
                    ..WorkflowMeta::default()
                }),
            }
        })
        .collect()
}
