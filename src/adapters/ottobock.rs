use super::SpecializedOrder;
use crate::models::orders::{OttobockOrder, SharedOrderFields};
use crate::models::work_order::{OrderType, WorkOrder};

impl SpecializedOrder for OttobockOrder {
    const ORDER_TYPE: OrderType = OrderType::Ottobock;

    fn with_defaults(common: SharedOrderFields) -> Self {
        OttobockOrder::with_defaults(common)
    }

    fn common(&self) -> &SharedOrderFields {
        &self.common
    }

    fn common_mut(&mut self) -> &mut SharedOrderFields {
        &mut self.common
    }

    fn product_name(&self) -> String {
        format!("{} (Ottobock)", self.product_type)
    }
}

pub fn to_ottobock_order(order: &WorkOrder) -> Option<OttobockOrder> {
    OttobockOrder::from_work_order(order)
}

/// Lossy: supplier reference, components and fittings are not kept
pub fn from_ottobock_order(order: &OttobockOrder) -> WorkOrder {
    order.project_to_work_order()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_support::work_order;
    use crate::models::orders::{ComponentLine, ProsthesisKind, ServiceType, Side};
    use rust_decimal_macros::dec;

    #[test]
    fn forward_applies_defaults() {
        let ottobock = to_ottobock_order(&work_order("w3", OrderType::Ottobock)).unwrap();
        assert_eq!(ottobock.common.id, "w3");
        assert_eq!(ottobock.product_type, ProsthesisKind::Shin);
        assert_eq!(ottobock.side, Side::Right);
        assert_eq!(ottobock.service_type, ServiceType::Paid);
        assert!(ottobock.supplier_order_number.is_none());
        assert!(ottobock.components.is_empty());
    }

    #[test]
    fn prosthesis_order_is_not_ottobock() {
        assert!(to_ottobock_order(&work_order("w1", OrderType::Prosthesis)).is_none());
    }

    #[test]
    fn round_trip_drops_supplier_data() {
        let mut ottobock = to_ottobock_order(&work_order("w3", OrderType::Ottobock)).unwrap();
        ottobock.supplier_order_number = Some("OB-778812".into());
        ottobock.components.push(ComponentLine {
            code: "3R80".into(),
            name: "Коленный модуль".into(),
            quantity: 1,
            unit_price: dec!(5400),
        });

        let generic = from_ottobock_order(&ottobock);
        assert_eq!(generic.product_name, "Протез голени (Ottobock)");
        assert_eq!(generic.order_type, OrderType::Ottobock);

        let back = to_ottobock_order(&generic).unwrap();
        assert_eq!(back.common, ottobock.common);
        assert!(back.supplier_order_number.is_none());
        assert!(back.components.is_empty());
    }
}
