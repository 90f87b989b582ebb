use super::SpecializedOrder;
use crate::models::orders::{OrthosisOrder, SharedOrderFields};
use crate::models::work_order::{OrderType, WorkOrder};

impl SpecializedOrder for OrthosisOrder {
    const ORDER_TYPE: OrderType = OrderType::Orthosis;

    fn with_defaults(common: SharedOrderFields) -> Self {
        OrthosisOrder::with_defaults(common)
    }

    fn common(&self) -> &SharedOrderFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut SharedOrderFields {
        &mut self.common
    }

    fn product_name(&self) -> String {
        self.product_type.to_string()
    }
}

pub fn to_orthosis_order(order: &WorkOrder) -> Option<OrthosisOrder> {
    OrthosisOrder::from_work_order(order)
}

/// Lossy: indication, side, materials and fittings are not kept
pub fn from_orthosis_order(order: &OrthosisOrder) -> WorkOrder {
    order.project_to_work_order()
}
