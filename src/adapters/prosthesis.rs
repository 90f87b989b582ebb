use super::SpecializedOrder;
use crate::models::orders::{ProsthesisOrder, SharedOrderFields};
use crate::models::work_order::{OrderType, WorkOrder};

impl SpecializedOrder for ProsthesisOrder {
    const ORDER_TYPE: OrderType = OrderType::Prosthesis;

    fn with_defaults(common: SharedOrderFields) -> Self {
        ProsthesisOrder::with_defaults(common)
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

pub fn to_prosthesis_order(order: &WorkOrder) -> Option<ProsthesisOrder> {
    ProsthesisOrder::from_work_order(order)
}

/// Lossy: components, fittings, diagnosis, side and cost are not kept
pub fn from_prosthesis_order(order: &ProsthesisOrder) -> WorkOrder {
    order.project_to_work_order()
}
