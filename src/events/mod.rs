use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::models::work_order::{OrderType, WorkOrderStatus};

// Change notifications raised by the dashboard container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    WorkOrderCreated {
        id: String,
        order_type: OrderType,
    },
    WorkOrderUpdated {
        id: String,
    },
    WorkOrderDeleted {
        id: String,
        order_type: OrderType,
    },
    WorkOrderStatusChanged {
        id: String,
        old_status: WorkOrderStatus,
        new_status: WorkOrderStatus,
    },
    PersonalFileCreated {
        id: String,
    },
    RoleChanged {
        from: Role,
        to: Role,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: Event,
    pub timestamp: DateTime<Utc>,
}

/// Pending notifications, drained by whoever re-renders
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pending: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.pending.push(EventRecord {
            event,
            timestamp: Utc::now(),
        });
    }

    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
