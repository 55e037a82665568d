//! transit-viz: regional public-transit access-mode dashboard.
//!
//! The crate loads one statistics CSV (with encoding fallback), lets a
//! session pick year/region columns and filters, reshapes the wide table into
//! `(region, year, transport, value)` records, and lays out line, bar-sum, or
//! stacked-bar charts as backend-agnostic render frames.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{Dashboard, DashboardConfig};
pub use error::{DashboardError, DashboardResult};
