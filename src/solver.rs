//! Greedy route construction for field-service dispatch.
//!
//! One pass per technician: repeatedly pick the most urgent feasible job
//! (smallest distance breaks priority ties) and append it, then close the
//! route back at the technician's home. No backtracking and no inter-route
//! improvement; infeasible jobs are simply left unassigned.
//!
//! Priority convention: lower numeric value is more urgent, so a priority-1
//! job is always scheduled before a feasible priority-3 job regardless of
//! relative distance.

use std::cmp::Ordering;
use std::collections::HashSet;

use rayon::prelude::*;
use uuid::Uuid;

use crate::model::{
    format_hhmm, parse_hhmm, Job, OptimizationRequest, OptimizationResult, Route, RouteStop,
    StopLocation, StopType, Summary, Technician,
};
use crate::traits::TravelEstimator;

/// A job evaluated against the technician's current position and clock.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    job: &'a Job,
    distance_km: f64,
    travel_minutes: i32,
    /// Minutes since midnight, before any waiting for the window to open.
    arrival: i32,
}

/// Assigns the request's jobs to its technicians, in technician input order.
///
/// Earlier technicians get first pick of contested jobs, so the iteration is
/// strictly sequential. The unassigned pool is rebuilt by set difference
/// after each route rather than mutated in place.
pub fn optimize<E>(request: &OptimizationRequest, estimator: &E) -> OptimizationResult
where
    E: TravelEstimator,
{
    let requested = request.jobs.len();

    // Stable sort keeps input order within a priority level, which fixes a
    // deterministic initial state; the per-technician builder re-ranks on
    // every iteration anyway.
    let mut unassigned: Vec<&Job> = request.jobs.iter().collect();
    unassigned.sort_by_key(|job| job.priority);

    let mut routes: Vec<Route> = Vec::new();
    for technician in &request.technicians {
        if unassigned.is_empty() {
            break;
        }

        let candidates: Vec<&Job> = unassigned
            .iter()
            .copied()
            .filter(|job| eligible_for(job, technician))
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let route = build_route(technician, &candidates, estimator);
        let assigned: HashSet<&str> = route
            .stops
            .iter()
            .filter_map(|stop| stop.job_id.as_deref())
            .collect();
        if assigned.is_empty() {
            // Only the two depot stops: nothing fit, drop the route.
            continue;
        }

        unassigned = unassigned
            .into_iter()
            .filter(|job| !assigned.contains(job.id.as_str()))
            .collect();
        routes.push(route);
    }

    let total_jobs = requested - unassigned.len();
    let summary = Summary {
        total_jobs,
        total_routes: routes.len(),
        total_distance: routes.iter().map(|route| route.total_distance).sum(),
        total_time: routes.iter().map(|route| route.total_time).sum(),
        optimization_score: if requested == 0 {
            0.0
        } else {
            total_jobs as f64 / requested as f64
        },
    };

    tracing::info!(
        requested_jobs = requested,
        assigned_jobs = total_jobs,
        unassigned_jobs = unassigned.len(),
        routes = routes.len(),
        "optimization completed"
    );

    OptimizationResult {
        optimization_id: Uuid::new_v4().to_string(),
        routes,
        summary,
    }
}

/// A job pinned to a different technician is off limits; everything else is
/// fair game. Skills and job_type are carried in the model but deliberately
/// not matched here.
fn eligible_for(job: &Job, technician: &Technician) -> bool {
    job.technician_id
        .as_deref()
        .is_none_or(|pinned| pinned == technician.id)
}

/// Builds one technician's route over the given candidate pool.
///
/// Never fails: when no candidate fits the remaining time the route simply
/// ends, and a technician with zero feasible jobs gets a route containing
/// only the opening and closing home stops.
pub fn build_route<E>(technician: &Technician, candidates: &[&Job], estimator: &E) -> Route
where
    E: TravelEstimator,
{
    let day_start = parse_hhmm(&technician.working_hours.start);
    let day_end = parse_hhmm(&technician.working_hours.end);

    let home = StopLocation {
        address: technician.home_address.clone(),
        coordinates: technician.home_coordinates,
    };

    let mut route = Route {
        technician_id: technician.id.clone(),
        total_distance: 0.0,
        total_time: 0,
        total_service_time: 0,
        stops: vec![RouteStop {
            sequence: 0,
            stop_type: StopType::Depot,
            job_id: None,
            location: home.clone(),
            planned_arrival: technician.working_hours.start.clone(),
            planned_departure: technician.working_hours.start.clone(),
            service_time: None,
            travel_time_from_previous: None,
        }],
    };

    let mut current_time = day_start;
    let mut current_location = technician.home_coordinates;
    // The orchestrator pre-filters foreign pins; enforced again here since
    // pinning is a hard constraint, not a ranking preference.
    let mut remaining: Vec<&Job> = candidates
        .iter()
        .copied()
        .filter(|job| eligible_for(job, technician))
        .collect();
    let mut sequence: u32 = 1;

    while !remaining.is_empty() {
        if let Some(max_jobs) = technician.max_jobs_per_day {
            if sequence - 1 >= max_jobs {
                break;
            }
        }

        // One estimator round-trip per remaining job. The calls are
        // independent so they fan out, but selection below is a fold over
        // the fully collected list, keeping the winner deterministic.
        let evaluated: Vec<Candidate> = remaining
            .par_iter()
            .map(|&job| {
                let estimate = estimator.estimate(current_location, job.coordinates);
                Candidate {
                    job,
                    distance_km: estimate.distance_km,
                    travel_minutes: estimate.travel_minutes,
                    arrival: current_time + estimate.travel_minutes,
                }
            })
            .collect();

        let Some(next) = select_next(&evaluated, day_start, day_end) else {
            break;
        };

        // Wait on site if we arrive before the window opens.
        let actual_start = next.arrival.max(next.job.time_window.start_minutes());
        let departure = actual_start + next.job.service_time;

        route.stops.push(RouteStop {
            sequence,
            stop_type: StopType::Job,
            job_id: Some(next.job.id.clone()),
            location: StopLocation {
                address: next.job.address.clone(),
                coordinates: next.job.coordinates,
            },
            planned_arrival: format_hhmm(next.arrival),
            planned_departure: format_hhmm(departure),
            service_time: Some(next.job.service_time),
            travel_time_from_previous: Some(next.travel_minutes),
        });
        route.total_distance += next.distance_km;
        route.total_time += next.travel_minutes + next.job.service_time;
        route.total_service_time += next.job.service_time;

        current_time = departure;
        current_location = next.job.coordinates;
        sequence += 1;

        let chosen = next.job.id.as_str();
        remaining.retain(|job| job.id != chosen);

        if current_time >= day_end {
            break;
        }
    }

    // Close the loop back home.
    let ret = estimator.estimate(current_location, technician.home_coordinates);
    let return_time = current_time + ret.travel_minutes;
    route.stops.push(RouteStop {
        sequence,
        stop_type: StopType::Depot,
        job_id: None,
        location: home,
        planned_arrival: format_hhmm(return_time),
        planned_departure: format_hhmm(return_time),
        service_time: None,
        travel_time_from_previous: Some(ret.travel_minutes),
    });
    route.total_distance += ret.distance_km;
    route.total_time += ret.travel_minutes;

    route
}

/// Picks the most urgent feasible candidate, nearest on priority ties.
/// Full ties keep the earlier candidate, so selection order is stable.
fn select_next<'a, 'b>(
    evaluated: &'b [Candidate<'a>],
    day_start: i32,
    day_end: i32,
) -> Option<&'b Candidate<'a>> {
    let mut best: Option<&Candidate> = None;
    for candidate in evaluated {
        if !is_feasible(candidate, day_start, day_end) {
            continue;
        }
        match best {
            None => best = Some(candidate),
            Some(current) => {
                let ordering = candidate
                    .job
                    .priority
                    .cmp(&current.job.priority)
                    .then(candidate.distance_km.total_cmp(&current.distance_km));
                if ordering == Ordering::Less {
                    best = Some(candidate);
                }
            }
        }
    }
    best
}

fn is_feasible(candidate: &Candidate<'_>, day_start: i32, day_end: i32) -> bool {
    let window_start = candidate.job.time_window.start_minutes();
    let window_end = candidate.job.time_window.end_minutes();
    let service_time = candidate.job.service_time;

    // Too late for the window, or the service would overrun it.
    if candidate.arrival > window_end || candidate.arrival + service_time > window_end {
        return false;
    }
    // Service longer than the window can ever hold.
    if service_time > window_end - window_start {
        return false;
    }
    // Window disjoint from the technician's duty hours.
    if window_start >= day_end || window_end <= day_start {
        return false;
    }
    // No starting a job at or past end of day.
    if candidate.arrival >= day_end {
        return false;
    }

    true
}
