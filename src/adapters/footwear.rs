use super::SpecializedOrder;
use crate::models::orders::{FootwearOrder, SharedOrderFields};
use crate::models::work_order::{OrderType, WorkOrder};

impl SpecializedOrder for FootwearOrder {
    const ORDER_TYPE: OrderType = OrderType::Footwear;

    fn with_defaults(common: SharedOrderFields) -> Self {
        FootwearOrder::with_defaults(common)
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

pub fn to_footwear_order(order: &WorkOrder) -> Option<FootwearOrder> {
    FootwearOrder::from_work_order(order)
}

/// Lossy: diagnosis, pairs, size, materials and fittings are not kept
pub fn from_footwear_order(order: &FootwearOrder) -> WorkOrder {
    order.project_to_work_order()
}
