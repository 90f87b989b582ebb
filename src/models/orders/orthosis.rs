use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

use super::{Fitting, MaterialLine, OrderKind, ServiceType, SharedOrderFields, Side, Urgency};

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
pub enum OrthosisIndication {
    #[serde(rename = "Парез")]
    #[strum(serialize = "Парез")]
    Paresis,
    #[serde(rename = "Контрактура")]
    #[strum(serialize = "Контрактура")]
    Contracture,
    #[serde(rename = "Нестабильность сустава")]
    #[strum(serialize = "Нестабильность сустава")]
    JointInstability,
    #[serde(rename = "Сколиоз")]
    #[strum(serialize = "Сколиоз")]
    Scoliosis,
    #[serde(rename = "Посттравматическое состояние")]
    #[strum(serialize = "Посттравматическое состояние")]
    PostTrauma,
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
pub enum OrthosisKind {
    #[default]
    #[serde(rename = "Ортез коленный")]
    #[strum(serialize = "Ортез коленный")]
    Knee,
    #[serde(rename = "Ортез голеностопный")]
    #[strum(serialize = "Ортез голеностопный")]
    Ankle,
    #[serde(rename = "Ортез лучезапястный")]
    #[strum(serialize = "Ортез лучезапястный")]
    Wrist,
    #[serde(rename = "Аппарат на всю ногу")]
    #[strum(serialize = "Аппарат на всю ногу")]
    FullLeg,
    #[serde(rename = "Корсет")]
    #[strum(serialize = "Корсет")]
    Corset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrthosisOrder {
    #[serde(flatten)]
    #[validate]
    pub common: SharedOrderFields,
    pub diagnosis: Option<OrthosisIndication>,
    pub product_type: OrthosisKind,
    pub side: Side,
    pub order_kind: OrderKind,
    pub service_type: ServiceType,
    pub urgency: Urgency,
    #[validate]
    pub materials: Vec<MaterialLine>,
    pub fittings: Vec<Fitting>,
    pub order_cost: Decimal,
}

impl OrthosisOrder {
    pub fn with_defaults(common: SharedOrderFields) -> Self {
        Self {
            common,
            diagnosis: None,
            product_type: OrthosisKind::default(),
            side: Side::Right,
            order_kind: OrderKind::Primary,
            service_type: ServiceType::Free,
            urgency: Urgency::Normal,
            materials: Vec::new(),
            fittings: Vec::new(),
            order_cost: Decimal::ZERO,
        }
    }
}
