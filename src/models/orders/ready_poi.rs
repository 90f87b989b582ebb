use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

use super::{ServiceType, SharedOrderFields, Urgency};

/// Ready-made prosthetic-orthopedic item issued from stock
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
pub enum ReadyPoiKind {
    #[default]
    #[serde(rename = "Трость")]
    #[strum(serialize = "Трость")]
    Cane,
    #[serde(rename = "Костыли")]
    #[strum(serialize = "Костыли")]
    Crutches,
    #[serde(rename = "Ходунки")]
    #[strum(serialize = "Ходунки")]
    Walker,
    #[serde(rename = "Кресло-коляска")]
    #[strum(serialize = "Кресло-коляска")]
    Wheelchair,
    #[serde(rename = "Бандаж")]
    #[strum(serialize = "Бандаж")]
    Bandage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReadyPoiOrder {
    #[serde(flatten)]
    #[validate]
    pub common: SharedOrderFields,
    pub product_type: ReadyPoiKind,
    #[validate(range(min = 1, message = "Количество должно быть больше нуля"))]
    pub quantity: u32,
    /// Stock item issued against this order
    pub warehouse_item_code: Option<String>,
    pub service_type: ServiceType,
    pub urgency: Urgency,
    pub order_cost: Decimal,
}

impl ReadyPoiOrder {
    pub fn with_defaults(common: SharedOrderFields) -> Self {
        Self {
            common,
            product_type: ReadyPoiKind::default(),
            quantity: 1,
            warehouse_item_code: None,
            service_type: ServiceType::Free,
            urgency: Urgency::Normal,
            order_cost: Decimal::ZERO,
        }
    }
}
