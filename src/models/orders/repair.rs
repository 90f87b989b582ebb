use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::prosthesis::ProsthesisKind;
use super::{Fitting, MaterialLine, ServiceType, SharedOrderFields, Urgency};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RepairOrder {
    #[serde(flatten)]
    #[validate]
    pub common: SharedOrderFields,
    /// Product brought in for repair
    pub product_type: ProsthesisKind,
    /// Stored under `status` in repair forms
    #[serde(rename = "status")]
    pub urgency: Urgency,
    pub service_type: ServiceType,
    pub defect_description: Option<String>,
    /// Repair category codes applied by the workshop
    pub repair_categories: Vec<String>,
    #[validate]
    pub materials: Vec<MaterialLine>,
    pub fittings: Vec<Fitting>,
    pub order_cost: Decimal,
}

impl RepairOrder {
    pub fn with_defaults(common: SharedOrderFields) -> Self {
        Self {
            common,
            product_type: ProsthesisKind::Thigh,
            urgency: Urgency::Normal,
            service_type: ServiceType::Free,
            defect_description: None,
            repair_categories: Vec::new(),
            materials: Vec::new(),
            fittings: Vec::new(),
            order_cost: Decimal::ZERO,
        }
    }
}
