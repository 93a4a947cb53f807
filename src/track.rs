use serde::Serialize;

/// A geographic coordinate in decimal degrees.
///
/// Equality is exact floating-point equality of both components; points that
/// differ in the last bit are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A labeled point of interest.
///
/// Labels live on the waypoint itself rather than in a coordinate-keyed map,
/// so duplicate points (closed loops) keep their own labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub point: GeoPoint,
    pub label: String,
}

impl Waypoint {
    pub fn new(point: GeoPoint, label: impl Into<String>) -> Self {
        Self {
            point,
            label: label.into(),
        }
    }
}

/// Unified parse result shared by both format parsers.
///
/// `route_points` preserves file traversal order: segments within a track,
/// tracks within the file. It may contain duplicates. Constructed once per
/// uploaded file and immutable afterwards.
#[derive(Debug, Default)]
pub struct TrackData {
    pub route_points: Vec<GeoPoint>,
    pub waypoints: Vec<Waypoint>,
}
