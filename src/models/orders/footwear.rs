use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

use super::{Fitting, MaterialLine, OrderKind, ServiceType, SharedOrderFields, Urgency};

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
pub enum FootDeformity {
    #[serde(rename = "Плоскостопие")]
    #[strum(serialize = "Плоскостопие")]
    FlatFoot,
    #[serde(rename = "Косолапость")]
    #[strum(serialize = "Косолапость")]
    ClubFoot,
    #[serde(rename = "Укорочение конечности")]
    #[strum(serialize = "Укорочение конечности")]
    LimbShortening,
    #[serde(rename = "Диабетическая стопа")]
    #[strum(serialize = "Диабетическая стопа")]
    DiabeticFoot,
    #[serde(rename = "Вальгусная деформация")]
    #[strum(serialize = "Вальгусная деформация")]
    Valgus,
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
pub enum FootwearKind {
    #[serde(rename = "Обувь ортопедическая простая")]
    #[strum(serialize = "Обувь ортопедическая простая")]
    Simple,
    #[default]
    #[serde(rename = "Обувь ортопедическая сложная")]
    #[strum(serialize = "Обувь ортопедическая сложная")]
    Complex,
    #[serde(rename = "Стельки ортопедические")]
    #[strum(serialize = "Стельки ортопедические")]
    Insoles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FootwearOrder {
    #[serde(flatten)]
    #[validate]
    pub common: SharedOrderFields,
    pub diagnosis: Option<FootDeformity>,
    pub product_type: FootwearKind,
    pub order_kind: OrderKind,
    #[validate(range(min = 1, max = 4, message = "От 1 до 4 пар"))]
    pub pairs: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub service_type: ServiceType,
    pub urgency: Urgency,
    #[validate]
    pub materials: Vec<MaterialLine>,
    pub fittings: Vec<Fitting>,
    pub order_cost: Decimal,
}

impl FootwearOrder {
    pub fn with_defaults(common: SharedOrderFields) -> Self {
        Self {
            common,
            diagnosis: None,
            product_type: FootwearKind::default(),
            order_kind: OrderKind::Primary,
            pairs: 1,
            size: None,
            color: None,
            service_type: ServiceType::Free,
            urgency: Urgency::Normal,
            materials: Vec::new(),
            fittings: Vec::new(),
            order_cost: Decimal::ZERO,
        }
    }
}
