//! PNO Dashboard Library
//!
//! Core of the prosthetic and orthopedic workshop dashboard: operator roles
//! and their module permissions, menu visibility, the generic work order and
//! the specialized order views adapted from it.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod seed;
pub mod services;

pub use adapters::{AnyOrder, SpecializedOrder};
pub use auth::{Action, Module, Permission, RbacService, Role};
pub use errors::ServiceError;
pub use models::work_order::{OrderType, WorkOrder, WorkOrderStatus};
pub use services::Dashboard;
