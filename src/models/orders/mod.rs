//! Specialized order shapes.
//!
//! Each specialized order embeds [`SharedOrderFields`], the subset it has in
//! common with a [`WorkOrder`]; everything else is the type's own payload.

pub mod footwear;
pub mod orthosis;
pub mod ottobock;
pub mod prosthesis;
pub mod ready_poi;
pub mod repair;

pub use footwear::{FootDeformity, FootwearKind, FootwearOrder};
pub use orthosis::{OrthosisIndication, OrthosisKind, OrthosisOrder};
pub use ottobock::OttobockOrder;
pub use prosthesis::{AmputationLevel, ProsthesisKind, ProsthesisOrder};
pub use ready_poi::{ReadyPoiKind, ReadyPoiOrder};
pub use repair::RepairOrder;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};
use validator::{Validate, ValidationError};

use super::work_order::{check_issue_dates, OrderType, WorkOrder, WorkOrderStatus};

/// Movement status written by every reverse adapter
pub const DEFAULT_MOVEMENT_STATUS: &str = "Оформлен";
/// Generic status written by every reverse adapter
pub const DEFAULT_STATUS: WorkOrderStatus = WorkOrderStatus::Registration;

/// Identity, client, date and audit fields shared with [`WorkOrder`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_shared_dates", skip_on_field_errors = false))]
pub struct SharedOrderFields {
    pub id: String,
    pub order_number: String,
    pub order_date: NaiveDate,
    #[validate(length(min = 1, message = "Выберите личное дело"))]
    pub personal_file_id: String,
    #[validate(length(min = 1, message = "Укажите ФИО клиента"))]
    pub client_name: String,
    pub disability_group: Option<String>,
    pub disability_category: Option<String>,
    pub notes: Option<String>,
    pub manufacturing_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_shared_dates(fields: &SharedOrderFields) -> Result<(), ValidationError> {
    check_issue_dates(fields.manufacturing_date, fields.issue_date)
}

impl SharedOrderFields {
    pub fn from_work_order(order: &WorkOrder) -> Self {
        Self {
            id: order.id.clone(),
            order_number: order.order_number.clone(),
            order_date: order.order_date,
            personal_file_id: order.personal_file_id.clone(),
            client_name: order.client_name.clone(),
            disability_group: order.disability_group.clone(),
            disability_category: order.disability_category.clone(),
            notes: order.notes.clone(),
            manufacturing_date: order.manufacturing_date,
            issue_date: order.issue_date,
            created_by: order.created_by.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }

    /// Rebuild a work order from the shared subset alone.
    ///
    /// Status, movement status, measurements and workflow metadata are reset
    /// to their defaults.
    pub fn into_work_order(self, order_type: OrderType, product_name: String) -> WorkOrder {
        WorkOrder {
            id: self.id,
            order_number: self.order_number,
            order_date: self.order_date,
            personal_file_id: self.personal_file_id,
            client_name: self.client_name,
            disability_group: self.disability_group,
            disability_category: self.disability_category,
            product_name,
            manufacturing_date: self.manufacturing_date,
            issue_date: self.issue_date,
            movement_status: DEFAULT_MOVEMENT_STATUS.to_string(),
            status: DEFAULT_STATUS,
            order_type,
            measurements: BTreeMap::new(),
            notes: self.notes,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
            workflow: None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum Side {
    #[default]
    #[serde(rename = "Правый")]
    #[strum(serialize = "Правый")]
    Right,
    #[serde(rename = "Левый")]
    #[strum(serialize = "Левый")]
    Left,
    #[serde(rename = "Двусторонний")]
    #[strum(serialize = "Двусторонний")]
    Bilateral,
}

/// Whether this is the client's first product of the kind
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum OrderKind {
    #[default]
    #[serde(rename = "Первичный")]
    #[strum(serialize = "Первичный")]
    Primary,
    #[serde(rename = "Повторный")]
    #[strum(serialize = "Повторный")]
    Repeat,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "Бесплатная")]
    #[strum(serialize = "Бесплатная")]
    Free,
    #[serde(rename = "Платная")]
    #[strum(serialize = "Платная")]
    Paid,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum Urgency {
    #[default]
    #[serde(rename = "Обычный")]
    #[strum(serialize = "Обычный")]
    Normal,
    #[serde(rename = "Срочный")]
    #[strum(serialize = "Срочный")]
    Urgent,
}

/// Catalog component (sleeves, feet, knee units, locks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ComponentLine {
    #[validate(length(min = 1, message = "Укажите код комплектующего"))]
    pub code: String,
    pub name: String,
    #[validate(range(min = 1, message = "Количество должно быть больше нуля"))]
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl ComponentLine {
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Raw material consumed by the workshop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MaterialLine {
    #[validate(length(min = 1, message = "Укажите материал"))]
    pub name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl MaterialLine {
    pub fn total(&self) -> Decimal {
        self.unit_price * self.quantity
    }
}

/// Fitting appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fitting {
    pub date: NaiveDate,
    pub specialist: Option<String>,
    pub result: Option<String>,
}

pub fn components_total(lines: &[ComponentLine]) -> Decimal {
    lines.iter().map(ComponentLine::total).sum()
}

pub fn materials_total(lines: &[MaterialLine]) -> Decimal {
    lines.iter().map(MaterialLine::total).sum()
}
