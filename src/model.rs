//! Domain model for field-service dispatch planning.
//!
//! These types mirror the wire format consumed and produced by the planner:
//! the request carries jobs and technicians, the result carries one ordered
//! route per technician plus aggregate statistics. All wall-clock times are
//! "HH:mm" strings interpreted as minutes since midnight; cross-midnight
//! windows are not supported.

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parse a "HH:mm" wall-clock string into minutes since midnight.
///
/// Request validation happens upstream of the planner, so a malformed time
/// string here is a programmer error and panics.
pub fn parse_hhmm(time: &str) -> i32 {
    let parsed = time
        .split_once(':')
        .and_then(|(h, m)| Some((h.parse::<i32>().ok()?, m.parse::<i32>().ok()?)));
    match parsed {
        Some((hours, minutes)) if (0..24).contains(&hours) && (0..60).contains(&minutes) => {
            hours * 60 + minutes
        }
        _ => panic!("invalid HH:mm time string: {time:?}"),
    }
}

/// Format minutes since midnight as a zero-padded "HH:mm" string.
///
/// Does not wrap at 24h: a route that overruns the day formats as e.g.
/// "25:10", which keeps stop ordering unambiguous for the caller.
pub fn format_hhmm(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// An inclusive [start, end] wall-clock interval within a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn start_minutes(&self) -> i32 {
        parse_hhmm(&self.start)
    }

    pub fn end_minutes(&self) -> i32 {
        parse_hhmm(&self.end)
    }

    pub fn duration_minutes(&self) -> i32 {
        self.end_minutes() - self.start_minutes()
    }
}

/// A service job to be routed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub client_ref: Option<String>,
    pub address: String,
    pub coordinates: Coordinate,
    pub time_window: TimeWindow,
    /// On-site service duration in minutes.
    pub service_time: i32,
    /// Lower value = more urgent (priority 1 outranks priority 3).
    pub priority: i32,
    pub job_type: String,
    /// When set, only this technician may take the job.
    pub technician_id: Option<String>,
}

/// A technician with a home base, duty hours, and capability tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    pub name: String,
    pub home_address: String,
    pub home_coordinates: Coordinate,
    pub working_hours: TimeWindow,
    pub skills: Vec<String>,
    pub max_jobs_per_day: Option<u32>,
}

/// Shared depot context for the request. Routes start and end at each
/// technician's own home, so this is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub depot: Depot,
    pub jobs: Vec<Job>,
    pub technicians: Vec<Technician>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    Depot,
    Job,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopLocation {
    pub address: String,
    pub coordinates: Coordinate,
}

/// One visited location in a technician's route.
///
/// Stop 0 is always the technician's home; the final stop is the return
/// there. Job stops carry the job id, service time, and the travel leg from
/// the previous stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub sequence: u32,
    #[serde(rename = "type")]
    pub stop_type: StopType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub location: StopLocation,
    pub planned_arrival: String,
    pub planned_departure: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time_from_previous: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub technician_id: String,
    /// Kilometers, travel legs only.
    pub total_distance: f64,
    /// Minutes, travel plus service.
    pub total_time: i32,
    /// Minutes of on-site service.
    pub total_service_time: i32,
    pub stops: Vec<RouteStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_jobs: usize,
    pub total_routes: usize,
    pub total_distance: f64,
    pub total_time: i32,
    /// Fraction of requested jobs assigned, in [0, 1]. Zero when the
    /// request carried no jobs.
    pub optimization_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub optimization_id: String,
    pub routes: Vec<Route>,
    pub summary: Summary,
}
