use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::{errors::ServiceError, models::work_order::WorkOrderStatus};

/// How status changes are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransitionMode {
    /// Any status may follow any status
    #[default]
    Free,
    /// Only transitions in the stage table are accepted
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTransitionPolicy {
    mode: TransitionMode,
}

impl StatusTransitionPolicy {
    pub fn new(mode: TransitionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Statuses reachable in one step under the stage table
    pub fn allowed_next(from: WorkOrderStatus) -> &'static [WorkOrderStatus] {
        use WorkOrderStatus::*;

        match from {
            Registration => &[MedicalReview, Rejected],
            MedicalReview => &[InProduction, Rejected, ReturnedForRevision],
            ReturnedForRevision => &[MedicalReview, Rejected],
            InProduction => &[ReadyForFitting, ReadyForIssue],
            ReadyForFitting => &[ReadyForIssue, InProduction],
            ReadyForIssue => &[Completed],
            Completed => &[],
            Rejected => &[],
        }
    }

    /// Validates if a status transition is allowed
    pub fn is_valid_transition(&self, from: WorkOrderStatus, to: WorkOrderStatus) -> bool {
        match self.mode {
            TransitionMode::Free => true,
            // Transitioning to the same status is a no-op
            TransitionMode::Strict => from == to || Self::allowed_next(from).contains(&to),
        }
    }

    pub fn check(&self, from: WorkOrderStatus, to: WorkOrderStatus) -> Result<(), ServiceError> {
        if self.is_valid_transition(from, to) {
            Ok(())
        } else {
            warn!(%from, %to, "rejected status transition");
            Err(ServiceError::InvalidTransition { from, to })
        }
    }
}
