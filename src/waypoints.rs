//! Waypoint synthesis for tracks that carry no explicit points of interest.

use crate::track::{GeoPoint, Waypoint};

/// Derive a representative, evenly spaced waypoint set from a route.
///
/// The first point is labeled "Start of route" and the last "End of route".
/// Routes longer than 10 points also get interior markers at a fixed stride
/// of `max(1, n / 10)`, numbered sequentially, giving at most ~11 markers
/// regardless of route density. A single-point route yields one waypoint; a
/// closed loop keeps separate start and end entries.
///
/// Deterministic and pure. Callers must guard against an empty route.
pub fn synthesize(route_points: &[GeoPoint]) -> Vec<Waypoint> {
    debug_assert!(!route_points.is_empty(), "route must be non-empty");

    let n = route_points.len();
    let mut waypoints = vec![Waypoint::new(route_points[0], "Start of route")];

    if n == 1 {
        return waypoints;
    }

    if n > 10 {
        let stride = (n / 10).max(1);
        let mut i = stride;
        while i < n - 1 {
            waypoints.push(Waypoint::new(
                route_points[i],
                format!("Point {}", i / stride),
            ));
            i += stride;
        }
    }

    waypoints.push(Waypoint::new(route_points[n - 1], "End of route"));
    waypoints
}
