// Session container over the in-memory collections
pub mod dashboard;

// Status stage table and transition checks
pub mod order_status;

// Form validation helpers
pub mod validation;

pub use dashboard::Dashboard;
pub use order_status::{StatusTransitionPolicy, TransitionMode};
pub use validation::{field_errors, validate_input};
