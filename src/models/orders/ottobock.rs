use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::prosthesis::{AmputationLevel, ProsthesisKind};
use super::{ComponentLine, Fitting, OrderKind, ServiceType, SharedOrderFields, Side, Urgency};

/// Prosthesis assembled from the Ottobock catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OttobockOrder {
    #[serde(flatten)]
    #[validate]
    pub common: SharedOrderFields,
    pub diagnosis: Option<AmputationLevel>,
    pub product_type: ProsthesisKind,
    pub side: Side,
    pub order_kind: OrderKind,
    pub service_type: ServiceType,
    pub urgency: Urgency,
    /// Supplier-side order reference
    pub supplier_order_number: Option<String>,
    #[validate]
    pub components: Vec<ComponentLine>,
    pub fittings: Vec<Fitting>,
    pub order_cost: Decimal,
}

impl OttobockOrder {
    pub fn with_defaults(common: SharedOrderFields) -> Self {
        Self {
            common,
            diagnosis: None,
            product_type: ProsthesisKind::Shin,
            side: Side::Right,
            order_kind: OrderKind::Primary,
            service_type: ServiceType::Paid,
            urgency: Urgency::Normal,
            supplier_order_number: None,
            components: Vec::new(),
            fittings: Vec::new(),
            order_cost: Decimal::ZERO,
        }
    }
}
