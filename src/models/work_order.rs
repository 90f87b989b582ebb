use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};
use validator::{Validate, ValidationError};

use crate::auth::Module;

/// Which specialized domain a work order belongs to.
///
/// Serialized as the literal order-type string stored on the record.
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
)]
pub enum OrderType {
    #[serde(rename = "Заказ на изготовление протеза")]
    #[strum(to_string = "Заказ на изготовление протеза", serialize = "prosthesis")]
    Prosthesis,
    #[serde(rename = "Заказ на изготовление ортопедической обуви")]
    #[strum(to_string = "Заказ на изготовление ортопедической обуви", serialize = "footwear")]
    Footwear,
    #[serde(rename = "Заказ Ottobock")]
    #[strum(to_string = "Заказ Ottobock", serialize = "ottobock")]
    Ottobock,
    #[serde(rename = "Заказ на изготовление ортеза")]
    #[strum(to_string = "Заказ на изготовление ортеза", serialize = "orthosis")]
    Orthosis,
    #[serde(rename = "Наряд на ремонт")]
    #[strum(to_string = "Наряд на ремонт", serialize = "repair")]
    Repair,
    #[serde(rename = "Выдача готового ПОИ")]
    #[strum(to_string = "Выдача готового ПОИ", serialize = "ready_poi")]
    ReadyPoi,
}

impl OrderType {
    /// Short id used on the command line
    pub fn code(&self) -> &'static str {
        match self {
            OrderType::Prosthesis => "prosthesis",
            OrderType::Footwear => "footwear",
            OrderType::Ottobock => "ottobock",
            OrderType::Orthosis => "orthosis",
            OrderType::Repair => "repair",
            OrderType::ReadyPoi => "ready_poi",
        }
    }

    /// Permission module guarding orders of this type
    pub fn module(&self) -> Module {
        match self {
            OrderType::Prosthesis => Module::ProsthesisOrders,
            OrderType::Footwear => Module::FootwearOrders,
            OrderType::Ottobock => Module::OttobockOrders,
            OrderType::Orthosis => Module::OrthosisOrders,
            OrderType::Repair => Module::RepairOrders,
            OrderType::ReadyPoi => Module::ReadyPoiOrders,
        }
    }

    /// Order number prefix
    pub fn number_prefix(&self) -> &'static str {
        match self {
            OrderType::Prosthesis => "ПР",
            OrderType::Footwear => "ОБ",
            OrderType::Ottobock => "ОТ",
            OrderType::Orthosis => "ОР",
            OrderType::Repair => "РМ",
            OrderType::ReadyPoi => "ГП",
        }
    }
}

/// Generic work order status.
///
/// Stages: registration, medical review, production, fitting/issue, completion,
/// with rejection and return-for-revision as side branches.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    Registration,
    MedicalReview,
    InProduction,
    ReadyForFitting,
    ReadyForIssue,
    Completed,
    Rejected,
    ReturnedForRevision,
}

impl WorkOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Registration => "Регистрация",
            WorkOrderStatus::MedicalReview => "Медицинское заключение",
            WorkOrderStatus::InProduction => "В производстве",
            WorkOrderStatus::ReadyForFitting => "Готов к примерке",
            WorkOrderStatus::ReadyForIssue => "Готов к выдаче",
            WorkOrderStatus::Completed => "Завершен",
            WorkOrderStatus::Rejected => "Отклонен",
            WorkOrderStatus::ReturnedForRevision => "Возвращен на доработку",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// Optional workflow bookkeeping attached to a work order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowMeta {
    pub workflow_status: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub assigned_department: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

/// Canonical order record shared by every product domain.
///
/// Validation covers the same form rules as [`NewWorkOrder`] and is run on
/// every stored revision, including patched ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_record_dates", skip_on_field_errors = false))]
pub struct WorkOrder {
    pub id: String,
    pub order_number: String,
    pub order_date: NaiveDate,
    #[validate(length(min = 1, message = "Выберите личное дело"))]
    pub personal_file_id: String,
    #[validate(length(min = 1, message = "Укажите ФИО клиента"))]
    pub client_name: String,
    pub disability_group: Option<String>,
    pub disability_category: Option<String>,
    #[validate(length(min = 1, message = "Укажите наименование изделия"))]
    pub product_name: String,
    pub manufacturing_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub movement_status: String,
    pub status: WorkOrderStatus,
    pub order_type: OrderType,
    #[serde(default)]
    pub measurements: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowMeta>,
}

/// Input for registering a new work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_order_dates", skip_on_field_errors = false))]
pub struct NewWorkOrder {
    pub order_date: NaiveDate,
    #[validate(length(min = 1, message = "Выберите личное дело"))]
    pub personal_file_id: String,
    #[validate(length(min = 1, message = "Укажите ФИО клиента"))]
    pub client_name: String,
    pub disability_group: Option<String>,
    pub disability_category: Option<String>,
    #[validate(length(min = 1, message = "Укажите наименование изделия"))]
    pub product_name: String,
    pub order_type: OrderType,
    #[serde(default)]
    pub measurements: BTreeMap<String, String>,
    pub manufacturing_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub workflow: Option<WorkflowMeta>,
}

/// A product cannot be issued before it is made
pub(crate) fn check_issue_dates(
    manufacturing_date: Option<NaiveDate>,
    issue_date: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(made), Some(issued)) = (manufacturing_date, issue_date) {
        if issued < made {
            let mut err = ValidationError::new("issue_before_manufacturing");
            err.message = Some(Cow::from("Дата выдачи раньше даты изготовления"));
            return Err(err);
        }
    }
    Ok(())
}

fn validate_order_dates(input: &NewWorkOrder) -> Result<(), ValidationError> {
    check_issue_dates(input.manufacturing_date, input.issue_date)
}

fn validate_record_dates(order: &WorkOrder) -> Result<(), ValidationError> {
    check_issue_dates(order.manufacturing_date, order.issue_date)
}

/// Partial update for a work order.
///
/// `None` leaves a field untouched; for nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkOrderPatch {
    pub order_number: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub personal_file_id: Option<String>,
    pub client_name: Option<String>,
    pub disability_group: Option<Option<String>>,
    pub disability_category: Option<Option<String>>,
    pub product_name: Option<String>,
    pub manufacturing_date: Option<Option<NaiveDate>>,
    pub issue_date: Option<Option<NaiveDate>>,
    pub movement_status: Option<String>,
    pub status: Option<WorkOrderStatus>,
    pub measurements: Option<BTreeMap<String, String>>,
    pub notes: Option<Option<String>>,
    pub workflow: Option<Option<WorkflowMeta>>,
}

impl WorkOrderPatch {
    pub fn status(status: WorkOrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// New record with the patch applied; the input is left untouched
    pub fn apply(&self, current: &WorkOrder, now: DateTime<Utc>) -> WorkOrder {
        let mut next = current.clone();
        if let Some(v) = &self.order_number {
            next.order_number = v.clone();
        }
        if let Some(v) = self.order_date {
            next.order_date = v;
        }
        if let Some(v) = &self.personal_file_id {
            next.personal_file_id = v.clone();
        }
        if let Some(v) = &self.client_name {
            next.client_name = v.clone();
        }
        if let Some(v) = &self.disability_group {
            next.disability_group = v.clone();
        }
        if let Some(v) = &self.disability_category {
            next.disability_category = v.clone();
        }
        if let Some(v) = &self.product_name {
            next.product_name = v.clone();
        }
        if let Some(v) = self.manufacturing_date {
            next.manufacturing_date = v;
        }
        if let Some(v) = self.issue_date {
            next.issue_date = v;
        }
        if let Some(v) = &self.movement_status {
            next.movement_status = v.clone();
        }
        if let Some(v) = self.status {
            next.status = v;
        }
        if let Some(v) = &self.measurements {
            next.measurements = v.clone();
        }
        if let Some(v) = &self.notes {
            next.notes = v.clone();
        }
        if let Some(v) = &self.workflow {
            next.workflow = v.clone();
        }
        next.updated_at = now;
        next
    }
}

/// Overwrites every mutable field with the record's values
impl From<WorkOrder> for WorkOrderPatch {
    fn from(order: WorkOrder) -> Self {
        Self {
            order_number: Some(order.order_number),
            order_date: Some(order.order_date),
            personal_file_id: Some(order.personal_file_id),
            client_name: Some(order.client_name),
            disability_group: Some(order.disability_group),
            disability_category: Some(order.disability_category),
            product_name: Some(order.product_name),
            manufacturing_date: Some(order.manufacturing_date),
            issue_date: Some(order.issue_date),
            movement_status: Some(order.movement_status),
            status: Some(order.status),
            measurements: Some(order.measurements),
            notes: Some(order.notes),
            workflow: Some(order.workflow),
        }
    }
}
