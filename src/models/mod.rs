// Core models
pub mod orders;
pub mod personal_file;
pub mod work_order;

pub use orders::{
    AmputationLevel, ComponentLine, Fitting, FootDeformity, FootwearKind, FootwearOrder,
    MaterialLine, OrderKind, OrthosisIndication, OrthosisKind, OrthosisOrder, OttobockOrder,
    ProsthesisKind, ProsthesisOrder, ReadyPoiKind, ReadyPoiOrder, RepairOrder, ServiceType,
    SharedOrderFields, Side, Urgency,
};
pub use personal_file::{NewPersonalFile, PersonalFile};
pub use work_order::{
    NewWorkOrder, OrderType, Priority, WorkOrder, WorkOrderPatch, WorkOrderStatus, WorkflowMeta,
};
