//! Conversion between the generic [`WorkOrder`] and the specialized order
//! views.
//!
//! Forward adapters return `None` when the discriminant belongs to another
//! type; callers mapping a mixed collection drop those. Reverse adapters are
//! projections: only [`SharedOrderFields`] survive, the rest of the payload is
//! discarded and the generic status fields are reset.

pub mod footwear;
pub mod orthosis;
pub mod ottobock;
pub mod prosthesis;
pub mod ready_poi;
pub mod repair;

pub use footwear::{from_footwear_order, to_footwear_order};
pub use orthosis::{from_orthosis_order, to_orthosis_order};
pub use ottobock::{from_ottobock_order, to_ottobock_order};
pub use prosthesis::{from_prosthesis_order, to_prosthesis_order};
pub use ready_poi::{from_ready_poi_order, to_ready_poi_order};
pub use repair::{from_repair_order, to_repair_order};

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::auth::Module;
use crate::models::orders::{
    FootwearOrder, OrthosisOrder, OttobockOrder, ProsthesisOrder, ReadyPoiOrder, RepairOrder,
    SharedOrderFields,
};
use crate::models::work_order::{OrderType, WorkOrder};

/// A domain-specific view over a work order
pub trait SpecializedOrder: Clone + Serialize + DeserializeOwned + Validate {
    /// Discriminant this view applies to
    const ORDER_TYPE: OrderType;

    /// Payload defaults layered over the shared fields
    fn with_defaults(common: SharedOrderFields) -> Self;

    fn common(&self) -> &SharedOrderFields;

    fn common_mut(&mut self) -> &mut SharedOrderFields;

    /// Generic product name written back to the work order
    fn product_name(&self) -> String;

    /// Forward adapter
    fn from_work_order(order: &WorkOrder) -> Option<Self> {
        if order.order_type != Self::ORDER_TYPE {
            return None;
        }
        Some(Self::with_defaults(SharedOrderFields::from_work_order(order)))
    }

    /// Reverse adapter. Lossy: keeps only the shared subset.
    fn project_to_work_order(&self) -> WorkOrder {
        self.common()
            .clone()
            .into_work_order(Self::ORDER_TYPE, self.product_name())
    }

    fn module() -> Module {
        Self::ORDER_TYPE.module()
    }

    fn id(&self) -> &str {
        &self.common().id
    }
}

/// Adapt every matching work order, dropping the rest
pub fn adapt_all<T: SpecializedOrder>(orders: &[WorkOrder]) -> Vec<T> {
    orders.iter().filter_map(T::from_work_order).collect()
}

/// Any specialized order, tagged by its type
#[derive(Debug, Clone, PartialEq)]
pub enum AnyOrder {
    Prosthesis(ProsthesisOrder),
    Footwear(FootwearOrder),
    Ottobock(OttobockOrder),
    Orthosis(OrthosisOrder),
    Repair(RepairOrder),
    ReadyPoi(ReadyPoiOrder),
}

impl AnyOrder {
    /// Adapt a work order through the adapter its discriminant selects
    pub fn from_work_order(order: &WorkOrder) -> Self {
        let common = SharedOrderFields::from_work_order(order);
        match order.order_type {
            OrderType::Prosthesis => AnyOrder::Prosthesis(ProsthesisOrder::with_defaults(common)),
            OrderType::Footwear => AnyOrder::Footwear(FootwearOrder::with_defaults(common)),
            OrderType::Ottobock => AnyOrder::Ottobock(OttobockOrder::with_defaults(common)),
            OrderType::Orthosis => AnyOrder::Orthosis(OrthosisOrder::with_defaults(common)),
            OrderType::Repair => AnyOrder::Repair(RepairOrder::with_defaults(common)),
            OrderType::ReadyPoi => AnyOrder::ReadyPoi(ReadyPoiOrder::with_defaults(common)),
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            AnyOrder::Prosthesis(_) => OrderType::Prosthesis,
            AnyOrder::Footwear(_) => OrderType::Footwear,
            AnyOrder::Ottobock(_) => OrderType::Ottobock,
            AnyOrder::Orthosis(_) => OrderType::Orthosis,
            AnyOrder::Repair(_) => OrderType::Repair,
            AnyOrder::ReadyPoi(_) => OrderType::ReadyPoi,
        }
    }

    pub fn common(&self) -> &SharedOrderFields {
        match self {
            AnyOrder::Prosthesis(o) => o.common(),
            AnyOrder::Footwear(o) => o.common(),
            AnyOrder::Ottobock(o) => o.common(),
            AnyOrder::Orthosis(o) => o.common(),
            AnyOrder::Repair(o) => o.common(),
            AnyOrder::ReadyPoi(o) => o.common(),
        }
    }

    pub fn project_to_work_order(&self) -> WorkOrder {
        match self {
            AnyOrder::Prosthesis(o) => o.project_to_work_order(),
            AnyOrder::Footwear(o) => o.project_to_work_order(),
            AnyOrder::Ottobock(o) => o.project_to_work_order(),
            AnyOrder::Orthosis(o) => o.project_to_work_order(),
            AnyOrder::Repair(o) => o.project_to_work_order(),
            AnyOrder::ReadyPoi(o) => o.project_to_work_order(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            AnyOrder::Prosthesis(o) => serde_json::to_value(o),
            AnyOrder::Footwear(o) => serde_json::to_value(o),
            AnyOrder::Ottobock(o) => serde_json::to_value(o),
            AnyOrder::Orthosis(o) => serde_json::to_value(o),
            AnyOrder::Repair(o) => serde_json::to_value(o),
            AnyOrder::ReadyPoi(o) => serde_json::to_value(o),
        }
    }
}
