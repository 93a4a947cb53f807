//! Google Maps directions deep-link builder.

use crate::track::GeoPoint;

/// External service limit on the number of points a directions link may carry
/// (origin + destination + 23 intermediate stops).
const MAX_LINK_POINTS: usize = 25;
const MAX_INTERMEDIATE: usize = 23;

/// Build a Google Maps directions URL from the first and last route points.
///
/// Routes of 3 to 25 points get intermediate stops sampled at a fixed stride;
/// longer routes link origin and destination only. Returns `None` for routes
/// with fewer than 2 points. Coordinates keep Rust's default shortest
/// round-trippable formatting, which the external contract relies on.
pub fn build_maps_link(route_points: &[GeoPoint]) -> Option<String> {
    if route_points.len() < 2 {
        return None;
    }

    let n = route_points.len();
    let start = route_points[0];
    let end = route_points[n - 1];
    let mut link = format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}",
        start.lat, start.lon, end.lat, end.lon
    );

    if n > 2 && n <= MAX_LINK_POINTS {
        let stride = (n / MAX_INTERMEDIATE).max(1);
        let stops: Vec<String> = route_points[1..n - 1]
            .iter()
            .step_by(stride)
            .map(|p| format!("{},{}", p.lat, p.lon))
            .collect();
        if !stops.is_empty() {
            link.push_str("&waypoints=");
            link.push_str(&stops.join("|"));
        }
    }

    Some(link)
}
