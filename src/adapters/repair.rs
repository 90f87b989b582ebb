use super::SpecializedOrder;
use crate::models::orders::{RepairOrder, SharedOrderFields};
use crate::models::work_order::{OrderType, WorkOrder};

impl SpecializedOrder for RepairOrder {
    const ORDER_TYPE: OrderType = OrderType::Repair;

    fn with_defaults(common: SharedOrderFields) -> Self {
        RepairOrder::with_defaults(common)
    }

    fn common(&self) -> &SharedOrderFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut SharedOrderFields {
        &mut self.common
    }

    fn product_name(&self) -> String {
        format!("Ремонт: {}", self.product_type)
    }
}

pub fn to_repair_order(order: &WorkOrder) -> Option<RepairOrder> {
    RepairOrder::from_work_order(order)
}

/// Lossy: defect, repair categories, materials and cost are not kept
pub fn from_repair_order(order: &RepairOrder) -> WorkOrder {
    order.project_to_work_order()
}
