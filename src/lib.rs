//! dispatch-planner core
//!
//! Greedy field-service route construction: assigns geolocated jobs with
//! time windows, service durations, and priorities to technicians with
//! duty hours, producing one ordered route per technician plus aggregate
//! statistics. Travel estimates come from a pluggable routing backend with
//! a silent great-circle fallback.

pub mod estimate;
pub mod model;
pub mod openroute;
pub mod polyline;
pub mod solver;
pub mod traits;
