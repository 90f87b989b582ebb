use super::SpecializedOrder;
use crate::models::orders::{ReadyPoiOrder, SharedOrderFields};
use crate::models::work_order::{OrderType, WorkOrder};

impl SpecializedOrder for ReadyPoiOrder {
    const ORDER_TYPE: OrderType = OrderType::ReadyPoi;

    fn with_defaults(common: SharedOrderFields) -> Self {
        ReadyPoiOrder::with_defaults(common)
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

pub fn to_ready_poi_order(order: &WorkOrder) -> Option<ReadyPoiOrder> {
    ReadyPoiOrder::from_work_order(order)
}

/// Lossy: quantity and warehouse item are not kept
pub fn from_ready_poi_order(order: &ReadyPoiOrder) -> WorkOrder {
    order.project_to_work_order()
}
