use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

use super::{ComponentLine, Fitting, OrderKind, ServiceType, SharedOrderFields, Side, Urgency};

/// Amputation level recorded by the medical review
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum AmputationLevel {
    #[serde(rename = "Культя кисти")]
    #[strum(serialize = "Культя кисти")]
    Hand,
    #[serde(rename = "Культя предплечья")]
    #[strum(serialize = "Культя предплечья")]
    Forearm,
    #[serde(rename = "Культя плеча")]
    #[strum(serialize = "Культя плеча")]
    Shoulder,
    #[serde(rename = "Культя стопы")]
    #[strum(serialize = "Культя стопы")]
    Foot,
    #[serde(rename = "Культя голени")]
    #[strum(serialize = "Культя голени")]
    Shin,
    #[serde(rename = "Культя бедра")]
    #[strum(serialize = "Культя бедра")]
    Thigh,
    #[serde(rename = "Вычленение бедра")]
    #[strum(serialize = "Вычленение бедра")]
    HipDisarticulation,
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
pub enum ProsthesisKind {
    #[serde(rename = "Протез кисти")]
    #[strum(serialize = "Протез кисти")]
    Hand,
    #[serde(rename = "Протез предплечья")]
    #[strum(serialize = "Протез предплечья")]
    Forearm,
    #[serde(rename = "Протез плеча")]
    #[strum(serialize = "Протез плеча")]
    Shoulder,
    #[serde(rename = "Протез стопы")]
    #[strum(serialize = "Протез стопы")]
    Foot,
    #[serde(rename = "Протез голени")]
    #[strum(serialize = "Протез голени")]
    Shin,
    #[default]
    #[serde(rename = "Протез бедра")]
    #[strum(serialize = "Протез бедра")]
    Thigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProsthesisOrder {
    #[serde(flatten)]
    #[validate]
    pub common: SharedOrderFields,
    pub diagnosis: Option<AmputationLevel>,
    pub product_type: ProsthesisKind,
    pub side: Side,
    pub order_kind: OrderKind,
    pub service_type: ServiceType,
    pub urgency: Urgency,
    #[validate]
    pub components: Vec<ComponentLine>,
    pub fittings: Vec<Fitting>,
    pub order_cost: Decimal,
}

impl ProsthesisOrder {
    /// Payload defaults on top of the given shared fields
    pub fn with_defaults(common: SharedOrderFields) -> Self {
        Self {
            common,
            diagnosis: None,
            product_type: ProsthesisKind::default(),
            side: Side::Right,
            order_kind: OrderKind::Primary,
            service_type: ServiceType::Free,
            urgency: Urgency::Normal,
            components: Vec::new(),
            fittings: Vec::new(),
            order_cost: Decimal::ZERO,
        }
    }

    /// Order cost recomputed from the component list
    pub fn components_cost(&self) -> Decimal {
        super::components_total(&self.components)
    }
}
